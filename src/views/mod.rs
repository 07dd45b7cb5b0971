//! Console views: list tables, detail pages and the dashboard.
//!
//! Every view fetches the collections it joins on each request. Nothing is cached, so a
//! view requested after a mutation always reflects the backend.

mod dashboard;
mod detail;
mod rows;

pub use dashboard::*;
pub use detail::*;
pub use rows::*;

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::gateway::{ApiGateway, Resource};
use crate::models::{
    Assignment, Datacenter, Host, IpAddress, OperatingSystem, Person, Server,
};
use crate::table::{Record, RecordTable, SortDirection, TableView};
use crate::xref::{display_name, find_by_id, optional_display_name, related, TargetCollections};

/// Query string of a list request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    /// Free-text search term.
    #[serde(default)]
    pub q: String,
    /// Column key to sort by.
    pub sort: Option<String>,
    pub dir: Option<SortDirection>,
    /// Header clicked on top of `sort` and `dir`: toggles the direction of the active
    /// column, otherwise sorts the clicked column ascending.
    pub click: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ListView {
    pub resource: Resource,
    pub table: TableView,
}

/// Apply search and sort from `query` to `table` and render `rows`.
fn project<T: Record>(
    mut table: RecordTable<T>,
    query: &ListQuery,
    rows: &[T],
) -> Result<TableView, AppError> {
    let unsortable = |key: &str| AppError::BadRequest(format!("Column {:?} is not sortable", key));

    table.set_search(query.q.trim());
    if let Some(key) = &query.sort {
        if !table.set_sort(key, query.dir.unwrap_or_default()) {
            return Err(unsortable(key));
        }
    }
    if let Some(key) = &query.click {
        if !table.click_header(key) {
            return Err(unsortable(key));
        }
    }
    Ok(table.view(rows))
}

/// Build the list view of `resource`.
pub async fn list_view(
    gateway: &ApiGateway,
    resource: Resource,
    query: &ListQuery,
) -> Result<ListView, AppError> {
    let table = match resource {
        Resource::Datacenters => {
            let (datacenters, servers) = tokio::try_join!(
                gateway.list::<Datacenter>(),
                gateway.list::<Server>(),
            )?;
            let rows: Vec<DatacenterRow<'_>> = datacenters
                .iter()
                .map(|datacenter| DatacenterRow {
                    datacenter,
                    server_count: related(&servers, &datacenter.id, |s| {
                        Some(s.datacenter_id.as_str())
                    })
                    .len(),
                })
                .collect();
            project(datacenter_table(), query, &rows)?
        }
        Resource::Servers => {
            let (servers, datacenters, hosts) = tokio::try_join!(
                gateway.list::<Server>(),
                gateway.list::<Datacenter>(),
                gateway.list::<Host>(),
            )?;
            let rows: Vec<ServerRow<'_>> = servers
                .iter()
                .map(|server| ServerRow {
                    server,
                    datacenter_name: display_name(&datacenters, &server.datacenter_id),
                    host_count: related(&hosts, &server.id, |h| Some(h.server_id.as_str())).len(),
                })
                .collect();
            project(server_table(), query, &rows)?
        }
        Resource::Hosts => {
            let (hosts, servers, operating_systems, ip_addresses) = tokio::try_join!(
                gateway.list::<Host>(),
                gateway.list::<Server>(),
                gateway.list::<OperatingSystem>(),
                gateway.list::<IpAddress>(),
            )?;
            let os_names: Vec<Option<String>> = hosts
                .iter()
                .map(|host| {
                    host.os_id.as_deref().map(|os_id| {
                        find_by_id(&operating_systems, os_id)
                            .map_or_else(|| os_id.to_string(), OperatingSystem::full_name)
                    })
                })
                .collect();
            let rows: Vec<HostRow<'_>> = hosts
                .iter()
                .zip(&os_names)
                .map(|(host, os_name)| HostRow {
                    host,
                    server_hostname: display_name(&servers, &host.server_id),
                    os_name: os_name.as_deref(),
                    ip_count: related(&ip_addresses, &host.id, |ip| ip.host_id.as_deref()).len(),
                })
                .collect();
            project(host_table(), query, &rows)?
        }
        Resource::IpAddresses => {
            let (ip_addresses, hosts) = tokio::try_join!(
                gateway.list::<IpAddress>(),
                gateway.list::<Host>(),
            )?;
            let rows: Vec<IpAddressRow<'_>> = ip_addresses
                .iter()
                .map(|ip_address| IpAddressRow {
                    ip_address,
                    host_hostname: optional_display_name(&hosts, ip_address.host_id.as_deref()),
                })
                .collect();
            project(ip_address_table(), query, &rows)?
        }
        Resource::OperatingSystems => {
            let (operating_systems, hosts) = tokio::try_join!(
                gateway.list::<OperatingSystem>(),
                gateway.list::<Host>(),
            )?;
            let rows: Vec<OperatingSystemRow<'_>> = operating_systems
                .iter()
                .map(|operating_system| OperatingSystemRow {
                    operating_system,
                    host_count: related(&hosts, &operating_system.id, |h| h.os_id.as_deref()).len(),
                })
                .collect();
            project(operating_system_table(), query, &rows)?
        }
        Resource::Persons => {
            let (persons, assignments) = tokio::try_join!(
                gateway.list::<Person>(),
                gateway.list::<Assignment>(),
            )?;
            let rows: Vec<PersonRow<'_>> = persons
                .iter()
                .map(|person| PersonRow {
                    person,
                    assignment_count: related(&assignments, &person.id, |a| {
                        Some(a.person_id.as_str())
                    })
                    .len(),
                })
                .collect();
            project(person_table(), query, &rows)?
        }
        Resource::Assignments => {
            let (assignments, persons, datacenters, servers, hosts, ip_addresses) = tokio::try_join!(
                gateway.list::<Assignment>(),
                gateway.list::<Person>(),
                gateway.list::<Datacenter>(),
                gateway.list::<Server>(),
                gateway.list::<Host>(),
                gateway.list::<IpAddress>(),
            )?;
            let targets = TargetCollections {
                datacenters: &datacenters,
                servers: &servers,
                hosts: &hosts,
                ip_addresses: &ip_addresses,
            };
            let rows: Vec<AssignmentRow<'_>> = assignments
                .iter()
                .map(|assignment| AssignmentRow {
                    assignment,
                    person_name: display_name(&persons, &assignment.person_id),
                    entity_name: targets.display_name(&assignment.target),
                })
                .collect();
            project(assignment_table(), query, &rows)?
        }
    };

    Ok(ListView { resource, table })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ServerStatus;
    use crate::table::{RowLink, TableBody};
    use crate::xref::fixtures::*;

    fn server_rows<'a>(servers: &'a [Server], datacenters: &'a [Datacenter]) -> Vec<ServerRow<'a>> {
        servers
            .iter()
            .map(|server| ServerRow {
                server,
                datacenter_name: display_name(datacenters, &server.datacenter_id),
                host_count: 0,
            })
            .collect()
    }

    #[test]
    fn test_server_list_resolves_datacenter_names() {
        let datacenters = vec![datacenter("dc-1", "DC-East-01")];
        let servers = vec![
            server("srv-1", "srv-nyc-01", "dc-1", ServerStatus::Online),
            server("srv-2", "srv-lon-01", "dc-404", ServerStatus::Offline),
        ];
        let rows = server_rows(&servers, &datacenters);

        let view = project(server_table(), &ListQuery::default(), &rows).unwrap();
        let TableBody::Rows { rows } = view.body else {
            panic!("expected rows");
        };
        assert_eq!(rows[0].cells[1], "DC-East-01");
        assert_eq!(rows[1].cells[1], "dc-404");
        assert_eq!(rows[0].cells[4], "0");
    }

    #[test]
    fn test_list_query_search_and_sort() {
        let datacenters = vec![datacenter("dc-1", "DC-East-01")];
        let servers = vec![
            server("srv-1", "srv-nyc-02", "dc-1", ServerStatus::Online),
            server("srv-2", "srv-lon-01", "dc-1", ServerStatus::Offline),
            server("srv-3", "srv-nyc-01", "dc-1", ServerStatus::Online),
        ];
        let rows = server_rows(&servers, &datacenters);
        let query = ListQuery {
            q: "NYC".to_string(),
            sort: Some("hostname".to_string()),
            dir: Some(SortDirection::Desc),
            click: None,
        };

        let view = project(server_table(), &query, &rows).unwrap();
        assert_eq!(view.row_ids(), vec!["srv-1", "srv-3"]);
        assert_eq!(view.shown, 2);
        assert_eq!(view.total, 3);
    }

    #[test]
    fn test_header_click_on_top_of_sort() {
        let datacenters = vec![datacenter("dc-1", "DC-East-01")];
        let servers = vec![
            server("srv-1", "srv-nyc-02", "dc-1", ServerStatus::Online),
            server("srv-2", "srv-lon-01", "dc-1", ServerStatus::Offline),
        ];
        let rows = server_rows(&servers, &datacenters);

        let toggled = ListQuery {
            sort: Some("hostname".to_string()),
            click: Some("hostname".to_string()),
            ..ListQuery::default()
        };
        let view = project(server_table(), &toggled, &rows).unwrap();
        assert_eq!(view.sort.as_ref().unwrap().direction, SortDirection::Desc);
        assert_eq!(view.row_ids(), vec!["srv-1", "srv-2"]);

        let switched = ListQuery {
            sort: Some("hostname".to_string()),
            dir: Some(SortDirection::Desc),
            click: Some("status".to_string()),
            ..ListQuery::default()
        };
        let view = project(server_table(), &switched, &rows).unwrap();
        assert_eq!(view.sort.as_ref().unwrap().key, "status");
        assert_eq!(view.sort.as_ref().unwrap().direction, SortDirection::Asc);
        assert_eq!(view.row_ids(), vec!["srv-2", "srv-1"]);

        let unsortable = ListQuery {
            click: Some("serialNumber".to_string()),
            ..ListQuery::default()
        };
        assert!(matches!(
            project(server_table(), &unsortable, &rows),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn test_list_rows_link_to_their_record() {
        let servers = vec![server("srv-1", "srv-nyc-01", "dc-1", ServerStatus::Online)];
        let rows = server_rows(&servers, &[]);
        let TableBody::Rows { rows } = project(server_table(), &ListQuery::default(), &rows)
            .unwrap()
            .body
        else {
            panic!("expected rows");
        };
        assert_eq!(rows[0].link, Some(RowLink::new(Resource::Servers, "srv-1")));
    }

    #[test]
    fn test_unsortable_column_is_rejected() {
        let query = ListQuery {
            sort: Some("hosts".to_string()),
            ..ListQuery::default()
        };
        let err = project(server_table(), &query, &[]).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn test_host_resources_column_and_missing_os() {
        let hosts = vec![host("h-1", "web-prod-01", "srv-1", None)];
        let rows = vec![HostRow {
            host: &hosts[0],
            server_hostname: "srv-nyc-01",
            os_name: None,
            ip_count: 2,
        }];

        let view = project(host_table(), &ListQuery::default(), &rows).unwrap();
        let TableBody::Rows { rows } = view.body else {
            panic!("expected rows");
        };
        assert_eq!(rows[0].cells[3], "-");
        assert_eq!(rows[0].cells[4], "4 vCPU / 16 GB");
        assert_eq!(rows[0].cells[5], "2");
    }

    #[test]
    fn test_empty_list_message() {
        let view = project(person_table(), &ListQuery::default(), &[]).unwrap();
        assert!(matches!(
            view.body,
            TableBody::Empty { ref message } if message == "No persons found"
        ));
    }
}
