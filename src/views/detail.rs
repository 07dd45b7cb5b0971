//! Detail views.
//!
//! Each loader fetches every collection its view joins, concurrently and fail-fast, then
//! locates the focal record in its full primary collection. `Ok(None)` means the fetch
//! succeeded but the record does not exist.

use serde::Serialize;

use crate::errors::GatewayError;
use crate::gateway::{ApiGateway, Resource};
use crate::models::{
    Assignment, AssignmentRole, Datacenter, EntityRef, Host, HostStatus, IpAddress,
    OperatingSystem, Person, Server, ServerStatus,
};
use crate::table::{Column, Record, RecordTable, RowLink, TableView};
use crate::xref::{
    assignments_for, count_where, display_name, find_by_id, optional_display_name, related,
    TargetCollections,
};

use super::rows::AssignmentRow;

/// A person assigned to the focal entity.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignee {
    pub assignment_id: String,
    pub person_id: String,
    pub person_name: String,
    pub role: AssignmentRole,
}

fn assignees(assignments: &[Assignment], persons: &[Person], target: &EntityRef) -> Vec<Assignee> {
    assignments_for(assignments, target)
        .into_iter()
        .map(|a| Assignee {
            assignment_id: a.id.clone(),
            person_id: a.person_id.clone(),
            person_name: display_name(persons, &a.person_id).to_string(),
            role: a.role,
        })
        .collect()
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct ServerStats {
    pub total: usize,
    pub online: usize,
    pub offline: usize,
    pub maintenance: usize,
}

impl ServerStats {
    pub fn of(servers: &[&Server]) -> Self {
        Self {
            total: servers.len(),
            online: count_where(servers, |s| s.status == ServerStatus::Online),
            offline: count_where(servers, |s| s.status == ServerStatus::Offline),
            maintenance: count_where(servers, |s| s.status == ServerStatus::Maintenance),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct HostStats {
    pub total: usize,
    pub running: usize,
    pub stopped: usize,
    pub suspended: usize,
}

impl HostStats {
    pub fn of(hosts: &[&Host]) -> Self {
        Self {
            total: hosts.len(),
            running: count_where(hosts, |h| h.status == HostStatus::Running),
            stopped: count_where(hosts, |h| h.status == HostStatus::Stopped),
            suspended: count_where(hosts, |h| h.status == HostStatus::Suspended),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatacenterDetail {
    pub datacenter: Datacenter,
    pub stats: ServerStats,
    pub servers: TableView,
    pub assignees: Vec<Assignee>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerDetail {
    pub server: Server,
    pub datacenter_name: String,
    pub stats: HostStats,
    pub hosts: TableView,
    pub assignees: Vec<Assignee>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HostDetail {
    pub host: Host,
    pub server_hostname: String,
    pub os_name: Option<String>,
    pub ip_addresses: TableView,
    pub assignees: Vec<Assignee>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IpAddressDetail {
    pub ip_address: IpAddress,
    pub host_hostname: Option<String>,
    pub server_hostname: Option<String>,
    pub assignees: Vec<Assignee>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OperatingSystemDetail {
    pub operating_system: OperatingSystem,
    pub hosts_using: usize,
    pub running: usize,
    pub hosts: TableView,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonDetail {
    pub person: Person,
    pub assignments: TableView,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentDetail {
    pub assignment: Assignment,
    pub person_name: String,
    pub entity_name: String,
}

/// Detail view of any resource.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum DetailView {
    Datacenter(DatacenterDetail),
    Server(ServerDetail),
    Host(HostDetail),
    IpAddress(IpAddressDetail),
    OperatingSystem(OperatingSystemDetail),
    Person(PersonDetail),
    Assignment(AssignmentDetail),
}

/// Load the detail view of record `id` in `resource`.
pub async fn load_detail(
    gateway: &ApiGateway,
    resource: Resource,
    id: &str,
) -> Result<Option<DetailView>, GatewayError> {
    let view = match resource {
        Resource::Datacenters => load_datacenter(gateway, id).await?.map(DetailView::Datacenter),
        Resource::Servers => load_server(gateway, id).await?.map(DetailView::Server),
        Resource::Hosts => load_host(gateway, id).await?.map(DetailView::Host),
        Resource::IpAddresses => load_ip_address(gateway, id).await?.map(DetailView::IpAddress),
        Resource::OperatingSystems => load_operating_system(gateway, id)
            .await?
            .map(DetailView::OperatingSystem),
        Resource::Persons => load_person(gateway, id).await?.map(DetailView::Person),
        Resource::Assignments => load_assignment(gateway, id).await?.map(DetailView::Assignment),
    };
    Ok(view)
}

pub async fn load_datacenter(
    gateway: &ApiGateway,
    id: &str,
) -> Result<Option<DatacenterDetail>, GatewayError> {
    let (datacenters, servers, assignments, persons) = tokio::try_join!(
        gateway.list::<Datacenter>(),
        gateway.list::<Server>(),
        gateway.list::<Assignment>(),
        gateway.list::<Person>(),
    )?;
    Ok(datacenter_detail(id, &datacenters, &servers, &assignments, &persons))
}

pub fn datacenter_detail(
    id: &str,
    datacenters: &[Datacenter],
    servers: &[Server],
    assignments: &[Assignment],
    persons: &[Person],
) -> Option<DatacenterDetail> {
    let datacenter = find_by_id(datacenters, id)?;
    let dc_servers = related(servers, id, |s| Some(s.datacenter_id.as_str()));

    let table: RecordTable<&Server> = RecordTable::new(vec![
        Column::new("hostname", "Hostname"),
        Column::new("model", "Model"),
        Column::new("status", "Status"),
    ])
    .search_keys(["hostname"])
    .empty_message("No servers in this datacenter")
    .on_row_click(|row: &&Server| RowLink::new(Resource::Servers, row.id()));

    Some(DatacenterDetail {
        datacenter: datacenter.clone(),
        stats: ServerStats::of(&dc_servers),
        servers: table.view(&dc_servers),
        assignees: assignees(assignments, persons, &EntityRef::Datacenter(id.to_string())),
    })
}

pub async fn load_server(gateway: &ApiGateway, id: &str) -> Result<Option<ServerDetail>, GatewayError> {
    let (servers, datacenters, hosts, assignments, persons) = tokio::try_join!(
        gateway.list::<Server>(),
        gateway.list::<Datacenter>(),
        gateway.list::<Host>(),
        gateway.list::<Assignment>(),
        gateway.list::<Person>(),
    )?;

    let Some(server) = find_by_id(&servers, id) else {
        return Ok(None);
    };
    let server_hosts = related(&hosts, id, |h| Some(h.server_id.as_str()));

    let table: RecordTable<&Host> = RecordTable::new(vec![
        Column::new("hostname", "Hostname"),
        Column::new("type", "Type"),
        Column::new("status", "Status"),
    ])
    .search_keys(["hostname"])
    .empty_message("No hosts on this server")
    .on_row_click(|row: &&Host| RowLink::new(Resource::Hosts, row.id()));

    Ok(Some(ServerDetail {
        server: server.clone(),
        datacenter_name: display_name(&datacenters, &server.datacenter_id).to_string(),
        stats: HostStats::of(&server_hosts),
        hosts: table.view(&server_hosts),
        assignees: assignees(&assignments, &persons, &EntityRef::Server(id.to_string())),
    }))
}

pub async fn load_host(gateway: &ApiGateway, id: &str) -> Result<Option<HostDetail>, GatewayError> {
    let (hosts, servers, operating_systems, ip_addresses, assignments, persons) = tokio::try_join!(
        gateway.list::<Host>(),
        gateway.list::<Server>(),
        gateway.list::<OperatingSystem>(),
        gateway.list::<IpAddress>(),
        gateway.list::<Assignment>(),
        gateway.list::<Person>(),
    )?;

    let Some(host) = find_by_id(&hosts, id) else {
        return Ok(None);
    };
    let host_ips = related(&ip_addresses, id, |ip| ip.host_id.as_deref());

    let os_name = host.os_id.as_deref().map(|os_id| {
        find_by_id(&operating_systems, os_id).map_or_else(|| os_id.to_string(), OperatingSystem::full_name)
    });

    let table: RecordTable<&IpAddress> = RecordTable::new(vec![
        Column::new("address", "Address"),
        Column::new("type", "Type"),
        Column::new("allocation", "Allocation"),
    ])
    .search_keys(["address"])
    .empty_message("No IP addresses assigned")
    .on_row_click(|row: &&IpAddress| RowLink::new(Resource::IpAddresses, row.id()));

    Ok(Some(HostDetail {
        host: host.clone(),
        server_hostname: display_name(&servers, &host.server_id).to_string(),
        os_name,
        ip_addresses: table.view(&host_ips),
        assignees: assignees(&assignments, &persons, &EntityRef::Host(id.to_string())),
    }))
}

pub async fn load_ip_address(
    gateway: &ApiGateway,
    id: &str,
) -> Result<Option<IpAddressDetail>, GatewayError> {
    let (ip_addresses, hosts, servers, assignments, persons) = tokio::try_join!(
        gateway.list::<IpAddress>(),
        gateway.list::<Host>(),
        gateway.list::<Server>(),
        gateway.list::<Assignment>(),
        gateway.list::<Person>(),
    )?;
    Ok(ip_address_detail(id, &ip_addresses, &hosts, &servers, &assignments, &persons))
}

pub fn ip_address_detail(
    id: &str,
    ip_addresses: &[IpAddress],
    hosts: &[Host],
    servers: &[Server],
    assignments: &[Assignment],
    persons: &[Person],
) -> Option<IpAddressDetail> {
    let ip_address = find_by_id(ip_addresses, id)?;
    let host_id = ip_address.host_id.as_deref();

    // The server is only reachable through a host that resolves.
    let server_hostname = host_id
        .and_then(|host_id| find_by_id(hosts, host_id))
        .map(|host| display_name(servers, &host.server_id).to_string());

    Some(IpAddressDetail {
        ip_address: ip_address.clone(),
        host_hostname: optional_display_name(hosts, host_id).map(str::to_string),
        server_hostname,
        assignees: assignees(assignments, persons, &EntityRef::Ip(id.to_string())),
    })
}

pub async fn load_operating_system(
    gateway: &ApiGateway,
    id: &str,
) -> Result<Option<OperatingSystemDetail>, GatewayError> {
    let (operating_systems, hosts) = tokio::try_join!(
        gateway.list::<OperatingSystem>(),
        gateway.list::<Host>(),
    )?;

    let Some(operating_system) = find_by_id(&operating_systems, id) else {
        return Ok(None);
    };
    let os_hosts = related(&hosts, id, |h| h.os_id.as_deref());

    let table: RecordTable<&Host> = RecordTable::new(vec![
        Column::new("hostname", "Hostname"),
        Column::new("status", "Status"),
    ])
    .search_keys(["hostname"])
    .empty_message("No hosts using this OS")
    .on_row_click(|row: &&Host| RowLink::new(Resource::Hosts, row.id()));

    Ok(Some(OperatingSystemDetail {
        operating_system: operating_system.clone(),
        hosts_using: os_hosts.len(),
        running: count_where(&os_hosts, |h| h.status == HostStatus::Running),
        hosts: table.view(&os_hosts),
    }))
}

pub async fn load_person(gateway: &ApiGateway, id: &str) -> Result<Option<PersonDetail>, GatewayError> {
    let (persons, assignments, datacenters, servers, hosts, ip_addresses) = tokio::try_join!(
        gateway.list::<Person>(),
        gateway.list::<Assignment>(),
        gateway.list::<Datacenter>(),
        gateway.list::<Server>(),
        gateway.list::<Host>(),
        gateway.list::<IpAddress>(),
    )?;

    let Some(person) = find_by_id(&persons, id) else {
        return Ok(None);
    };
    let targets = TargetCollections {
        datacenters: &datacenters,
        servers: &servers,
        hosts: &hosts,
        ip_addresses: &ip_addresses,
    };
    let rows: Vec<AssignmentRow<'_>> = related(&assignments, id, |a| Some(a.person_id.as_str()))
        .into_iter()
        .map(|assignment| AssignmentRow {
            assignment,
            person_name: &person.name,
            entity_name: targets.display_name(&assignment.target),
        })
        .collect();

    let table: RecordTable<AssignmentRow<'_>> = RecordTable::new(vec![
        Column::new("entityType", "Type"),
        Column::new("entityName", "Entity"),
        Column::new("role", "Role"),
    ])
    .search_keys(["entityName"])
    .empty_message("No assignments")
    .on_row_click(|row: &AssignmentRow<'_>| {
        let target = &row.assignment.target;
        RowLink::new(target.kind().resource(), target.id())
    });

    Ok(Some(PersonDetail {
        person: person.clone(),
        assignments: table.view(&rows),
    }))
}

pub async fn load_assignment(
    gateway: &ApiGateway,
    id: &str,
) -> Result<Option<AssignmentDetail>, GatewayError> {
    let (assignments, persons, datacenters, servers, hosts, ip_addresses) = tokio::try_join!(
        gateway.list::<Assignment>(),
        gateway.list::<Person>(),
        gateway.list::<Datacenter>(),
        gateway.list::<Server>(),
        gateway.list::<Host>(),
        gateway.list::<IpAddress>(),
    )?;

    let Some(assignment) = find_by_id(&assignments, id) else {
        return Ok(None);
    };
    let targets = TargetCollections {
        datacenters: &datacenters,
        servers: &servers,
        hosts: &hosts,
        ip_addresses: &ip_addresses,
    };

    Ok(Some(AssignmentDetail {
        assignment: assignment.clone(),
        person_name: display_name(&persons, &assignment.person_id).to_string(),
        entity_name: targets.display_name(&assignment.target).to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xref::fixtures::*;

    #[test]
    fn test_datacenter_server_counts() {
        let datacenters = vec![datacenter("dc-1", "DC-East-01")];
        let servers = vec![
            server("srv-1", "srv-nyc-01", "dc-1", ServerStatus::Online),
            server("srv-2", "srv-nyc-02", "dc-1", ServerStatus::Offline),
        ];

        let detail = datacenter_detail("dc-1", &datacenters, &servers, &[], &[]).unwrap();
        assert_eq!(
            detail.stats,
            ServerStats {
                total: 2,
                online: 1,
                offline: 1,
                maintenance: 0
            }
        );
        assert_eq!(detail.servers.row_ids(), vec!["srv-1", "srv-2"]);
        assert!(detail.assignees.is_empty());
    }

    #[test]
    fn test_datacenter_missing_is_none() {
        let datacenters = vec![datacenter("dc-1", "DC-East-01")];
        assert!(datacenter_detail("dc-9", &datacenters, &[], &[], &[]).is_none());
    }

    #[test]
    fn test_datacenter_assignees_resolve_person_names() {
        let datacenters = vec![datacenter("dc-1", "DC-East-01")];
        let persons = vec![person("p-1", "Alex Turner")];
        let assignments = vec![
            assignment("a-1", "p-1", EntityRef::Datacenter("dc-1".to_string()), AssignmentRole::Owner),
            assignment("a-2", "p-404", EntityRef::Datacenter("dc-1".to_string()), AssignmentRole::Viewer),
            assignment("a-3", "p-1", EntityRef::Server("dc-1".to_string()), AssignmentRole::Admin),
        ];

        let detail = datacenter_detail("dc-1", &datacenters, &[], &assignments, &persons).unwrap();
        let names: Vec<&str> = detail.assignees.iter().map(|a| a.person_name.as_str()).collect();
        assert_eq!(names, vec!["Alex Turner", "p-404"]);
    }

    #[test]
    fn test_ip_with_dangling_host_shows_raw_id() {
        let ips = vec![ip("ip-1", "10.1.3.30", Some("host-missing"))];
        let detail = ip_address_detail("ip-1", &ips, &[], &[], &[], &[]).unwrap();
        assert_eq!(detail.host_hostname.as_deref(), Some("host-missing"));
        assert_eq!(detail.server_hostname, None);
    }

    #[test]
    fn test_ip_resolves_server_through_host() {
        let ips = vec![ip("ip-1", "10.1.3.30", Some("h-1"))];
        let hosts = vec![host("h-1", "web-prod-01", "srv-1", None)];
        let servers = vec![server("srv-1", "srv-nyc-01", "dc-1", ServerStatus::Online)];
        let detail = ip_address_detail("ip-1", &ips, &hosts, &servers, &[], &[]).unwrap();
        assert_eq!(detail.host_hostname.as_deref(), Some("web-prod-01"));
        assert_eq!(detail.server_hostname.as_deref(), Some("srv-nyc-01"));
    }

    #[test]
    fn test_unassigned_ip_has_no_host() {
        let ips = vec![ip("ip-1", "10.1.3.31", None)];
        let detail = ip_address_detail("ip-1", &ips, &[], &[], &[], &[]).unwrap();
        assert_eq!(detail.host_hostname, None);
    }

    #[test]
    fn test_host_stats() {
        let mut stopped = host("h-2", "b", "srv-1", None);
        stopped.status = HostStatus::Stopped;
        let hosts = vec![host("h-1", "a", "srv-1", None), stopped];
        let refs: Vec<&Host> = hosts.iter().collect();
        assert_eq!(
            HostStats::of(&refs),
            HostStats {
                total: 2,
                running: 1,
                stopped: 1,
                suspended: 0
            }
        );
    }
}
