//! Per-entity list descriptors.
//!
//! Each list row wraps one record together with the values joined in from other
//! collections, and each `*_table` function declares the columns, search fields and empty
//! message of that list.

use crate::gateway::Resource;
use crate::models::{Assignment, Datacenter, Host, IpAddress, OperatingSystem, Person, Server};
use crate::table::{Column, FieldValue, Record, RowLink, RecordTable};

fn count(n: usize) -> FieldValue<'static> {
    FieldValue::Int(i64::try_from(n).unwrap_or(i64::MAX))
}

pub struct DatacenterRow<'a> {
    pub datacenter: &'a Datacenter,
    pub server_count: usize,
}

impl Record for DatacenterRow<'_> {
    fn id(&self) -> &str {
        &self.datacenter.id
    }

    fn field(&self, key: &str) -> FieldValue<'_> {
        match key {
            "servers" => count(self.server_count),
            _ => self.datacenter.field(key),
        }
    }
}

pub fn datacenter_table<'a>() -> RecordTable<DatacenterRow<'a>> {
    RecordTable::new(vec![
        Column::new("name", "Name").sortable(),
        Column::new("location", "Location").sortable(),
        Column::new("servers", "Servers"),
        Column::new("description", "Description"),
        Column::new("updatedAt", "Last Updated").sortable(),
    ])
    .search_keys(["name", "location"])
    .empty_message("No datacenters found")
    .on_row_click(|row: &DatacenterRow<'_>| RowLink::new(Resource::Datacenters, row.id()))
}

pub struct ServerRow<'a> {
    pub server: &'a Server,
    pub datacenter_name: &'a str,
    pub host_count: usize,
}

impl Record for ServerRow<'_> {
    fn id(&self) -> &str {
        &self.server.id
    }

    fn field(&self, key: &str) -> FieldValue<'_> {
        match key {
            "datacenterName" => FieldValue::Text(self.datacenter_name),
            "hosts" => count(self.host_count),
            _ => self.server.field(key),
        }
    }
}

pub fn server_table<'a>() -> RecordTable<ServerRow<'a>> {
    RecordTable::new(vec![
        Column::new("hostname", "Hostname").sortable(),
        Column::new("datacenterName", "Datacenter").sortable(),
        Column::new("model", "Model").sortable(),
        Column::new("serialNumber", "Serial Number"),
        Column::new("hosts", "Hosts"),
        Column::new("status", "Status").sortable(),
    ])
    .search_keys(["hostname", "serialNumber", "model"])
    .empty_message("No servers found")
    .on_row_click(|row: &ServerRow<'_>| RowLink::new(Resource::Servers, row.id()))
}

pub struct HostRow<'a> {
    pub host: &'a Host,
    pub server_hostname: &'a str,
    pub os_name: Option<&'a str>,
    pub ip_count: usize,
}

impl Record for HostRow<'_> {
    fn id(&self) -> &str {
        &self.host.id
    }

    fn field(&self, key: &str) -> FieldValue<'_> {
        match key {
            "serverHostname" => FieldValue::Text(self.server_hostname),
            "osName" => self.os_name.into(),
            "ips" => count(self.ip_count),
            _ => self.host.field(key),
        }
    }
}

pub fn host_table<'a>() -> RecordTable<HostRow<'a>> {
    RecordTable::new(vec![
        Column::new("hostname", "Hostname").sortable(),
        Column::new("serverHostname", "Server").sortable(),
        Column::new("type", "Type").sortable(),
        Column::new("osName", "OS").sortable(),
        Column::new("resources", "Resources").render_with(|row: &HostRow<'_>| {
            format!("{} vCPU / {} GB", row.host.cpu, row.host.memory_gb)
        }),
        Column::new("ips", "IPs"),
        Column::new("status", "Status").sortable(),
    ])
    .search_keys(["hostname", "osName"])
    .empty_message("No hosts found")
    .on_row_click(|row: &HostRow<'_>| RowLink::new(Resource::Hosts, row.id()))
}

pub struct IpAddressRow<'a> {
    pub ip_address: &'a IpAddress,
    pub host_hostname: Option<&'a str>,
}

impl Record for IpAddressRow<'_> {
    fn id(&self) -> &str {
        &self.ip_address.id
    }

    fn field(&self, key: &str) -> FieldValue<'_> {
        match key {
            "hostHostname" => self.host_hostname.into(),
            _ => self.ip_address.field(key),
        }
    }
}

pub fn ip_address_table<'a>() -> RecordTable<IpAddressRow<'a>> {
    RecordTable::new(vec![
        Column::new("address", "Address").sortable(),
        Column::new("type", "Type").sortable(),
        Column::new("allocation", "Allocation").sortable(),
        Column::new("hostHostname", "Host").sortable(),
        Column::new("createdAt", "Created").sortable(),
    ])
    .search_keys(["address", "hostHostname"])
    .empty_message("No IP addresses found")
    .on_row_click(|row: &IpAddressRow<'_>| RowLink::new(Resource::IpAddresses, row.id()))
}

pub struct OperatingSystemRow<'a> {
    pub operating_system: &'a OperatingSystem,
    pub host_count: usize,
}

impl Record for OperatingSystemRow<'_> {
    fn id(&self) -> &str {
        &self.operating_system.id
    }

    fn field(&self, key: &str) -> FieldValue<'_> {
        match key {
            "hosts" => count(self.host_count),
            _ => self.operating_system.field(key),
        }
    }
}

pub fn operating_system_table<'a>() -> RecordTable<OperatingSystemRow<'a>> {
    RecordTable::new(vec![
        Column::new("name", "Name").sortable(),
        Column::new("version", "Version").sortable(),
        Column::new("vendor", "Vendor").sortable(),
        Column::new("hosts", "Hosts"),
        Column::new("eolDate", "EOL Date").sortable(),
    ])
    .search_keys(["name", "version", "vendor"])
    .empty_message("No operating systems found")
    .on_row_click(|row: &OperatingSystemRow<'_>| RowLink::new(Resource::OperatingSystems, row.id()))
}

pub struct PersonRow<'a> {
    pub person: &'a Person,
    pub assignment_count: usize,
}

impl Record for PersonRow<'_> {
    fn id(&self) -> &str {
        &self.person.id
    }

    fn field(&self, key: &str) -> FieldValue<'_> {
        match key {
            "assignments" => count(self.assignment_count),
            _ => self.person.field(key),
        }
    }
}

pub fn person_table<'a>() -> RecordTable<PersonRow<'a>> {
    RecordTable::new(vec![
        Column::new("name", "Name").sortable(),
        Column::new("email", "Email").sortable(),
        Column::new("role", "Role").sortable(),
        Column::new("department", "Department").sortable(),
        Column::new("assignments", "Assignments"),
    ])
    .search_keys(["name", "email", "role", "department"])
    .empty_message("No persons found")
    .on_row_click(|row: &PersonRow<'_>| RowLink::new(Resource::Persons, row.id()))
}

pub struct AssignmentRow<'a> {
    pub assignment: &'a Assignment,
    pub person_name: &'a str,
    pub entity_name: &'a str,
}

impl Record for AssignmentRow<'_> {
    fn id(&self) -> &str {
        &self.assignment.id
    }

    fn field(&self, key: &str) -> FieldValue<'_> {
        match key {
            "personName" => FieldValue::Text(self.person_name),
            "entityName" => FieldValue::Text(self.entity_name),
            _ => self.assignment.field(key),
        }
    }
}

pub fn assignment_table<'a>() -> RecordTable<AssignmentRow<'a>> {
    RecordTable::new(vec![
        Column::new("personName", "Person").sortable(),
        Column::new("entityType", "Entity Type").sortable(),
        Column::new("entityName", "Entity").sortable(),
        Column::new("role", "Role").sortable(),
    ])
    .search_keys(["personName", "entityName"])
    .empty_message("No assignments found")
    .on_row_click(|row: &AssignmentRow<'_>| RowLink::new(Resource::Assignments, row.id()))
}
