//! Collection names of the CMDB API.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// One REST collection of the CMDB API, e.g. `/api/hosts`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Resource {
    Datacenters,
    Servers,
    Hosts,
    IpAddresses,
    OperatingSystems,
    Persons,
    Assignments,
}

impl Resource {
    pub const ALL: [Resource; 7] = [
        Resource::Datacenters,
        Resource::Servers,
        Resource::Hosts,
        Resource::IpAddresses,
        Resource::OperatingSystems,
        Resource::Persons,
        Resource::Assignments,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Resource::Datacenters => "datacenters",
            Resource::Servers => "servers",
            Resource::Hosts => "hosts",
            Resource::IpAddresses => "ip-addresses",
            Resource::OperatingSystems => "operating-systems",
            Resource::Persons => "persons",
            Resource::Assignments => "assignments",
        }
    }

    /// Singular name used in messages.
    pub fn singular(&self) -> &'static str {
        match self {
            Resource::Datacenters => "Datacenter",
            Resource::Servers => "Server",
            Resource::Hosts => "Host",
            Resource::IpAddresses => "IP address",
            Resource::OperatingSystems => "Operating system",
            Resource::Persons => "Person",
            Resource::Assignments => "Assignment",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Resource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Resource::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| format!("Unknown resource: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_from_str() {
        for resource in Resource::ALL {
            assert_eq!(resource.as_str().parse::<Resource>().unwrap(), resource);
        }
        assert!("racks".parse::<Resource>().is_err());
    }
}
