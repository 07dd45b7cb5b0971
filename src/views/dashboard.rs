//! Dashboard summary.

use serde::Serialize;

use crate::errors::GatewayError;
use crate::gateway::ApiGateway;
use crate::models::{
    Datacenter, Host, HostStatus, IpAddress, OperatingSystem, Person, Server, ServerStatus,
};

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EntityCounts {
    pub datacenters: usize,
    pub servers: usize,
    pub hosts: usize,
    pub ip_addresses: usize,
    pub operating_systems: usize,
    pub persons: usize,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub counts: EntityCounts,
    pub online_servers: usize,
    pub running_hosts: usize,
    pub assigned_ips: usize,
}

impl DashboardView {
    pub fn build(
        datacenters: &[Datacenter],
        servers: &[Server],
        hosts: &[Host],
        ip_addresses: &[IpAddress],
        operating_systems: &[OperatingSystem],
        persons: &[Person],
    ) -> Self {
        Self {
            counts: EntityCounts {
                datacenters: datacenters.len(),
                servers: servers.len(),
                hosts: hosts.len(),
                ip_addresses: ip_addresses.len(),
                operating_systems: operating_systems.len(),
                persons: persons.len(),
            },
            online_servers: servers
                .iter()
                .filter(|s| s.status == ServerStatus::Online)
                .count(),
            running_hosts: hosts
                .iter()
                .filter(|h| h.status == HostStatus::Running)
                .count(),
            assigned_ips: ip_addresses.iter().filter(|ip| ip.host_id.is_some()).count(),
        }
    }
}

/// Fetch all six collections and summarize them. Any failed fetch fails the dashboard.
pub async fn load_dashboard(gateway: &ApiGateway) -> Result<DashboardView, GatewayError> {
    let (datacenters, servers, hosts, ip_addresses, operating_systems, persons) = tokio::try_join!(
        gateway.list::<Datacenter>(),
        gateway.list::<Server>(),
        gateway.list::<Host>(),
        gateway.list::<IpAddress>(),
        gateway.list::<OperatingSystem>(),
        gateway.list::<Person>(),
    )?;

    Ok(DashboardView::build(
        &datacenters,
        &servers,
        &hosts,
        &ip_addresses,
        &operating_systems,
        &persons,
    ))
}
