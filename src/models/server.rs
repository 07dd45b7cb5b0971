//! Server model.

use serde::{Deserialize, Serialize};

use super::{require, Entity, Validate};
use crate::errors::AppError;
use crate::gateway::Resource;
use crate::table::{FieldValue, Record};

/// Operational status of a physical server.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ServerStatus {
    Online,
    Offline,
    Maintenance,
}

impl ServerStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServerStatus::Online => "online",
            ServerStatus::Offline => "offline",
            ServerStatus::Maintenance => "maintenance",
        }
    }
}

/// A physical server racked in a datacenter.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Server {
    pub id: String,
    pub hostname: String,
    pub datacenter_id: String,
    pub model: String,
    pub serial_number: String,
    pub status: ServerStatus,
    pub created_at: String,
    pub updated_at: String,
}

/// Request body for creating or updating a server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerInput {
    pub hostname: String,
    pub datacenter_id: String,
    pub model: String,
    pub serial_number: String,
    pub status: ServerStatus,
}

impl Validate for ServerInput {
    fn validate(&self) -> Result<(), AppError> {
        require("Hostname", &self.hostname)?;
        require("Datacenter", &self.datacenter_id)?;
        require("Model", &self.model)?;
        require("Serial number", &self.serial_number)
    }
}

impl Record for Server {
    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, key: &str) -> FieldValue<'_> {
        match key {
            "id" => FieldValue::Text(&self.id),
            "hostname" => FieldValue::Text(&self.hostname),
            "datacenterId" => FieldValue::Text(&self.datacenter_id),
            "model" => FieldValue::Text(&self.model),
            "serialNumber" => FieldValue::Text(&self.serial_number),
            "status" => FieldValue::Text(self.status.as_str()),
            "createdAt" => FieldValue::Text(&self.created_at),
            "updatedAt" => FieldValue::Text(&self.updated_at),
            _ => FieldValue::Missing,
        }
    }
}

impl Entity for Server {
    const RESOURCE: Resource = Resource::Servers;
    type Input = ServerInput;

    fn display_name(&self) -> &str {
        &self.hostname
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_ignores_denormalized_fields() {
        let server: Server = serde_json::from_value(serde_json::json!({
            "id": "srv-1",
            "hostname": "srv-nyc-prod-01",
            "datacenterId": "dc-1",
            "datacenterName": "DC-East-01",
            "model": "PowerEdge R750",
            "serialNumber": "SN-001",
            "status": "maintenance",
            "createdAt": "2024-01-01",
            "updatedAt": "2024-02-01"
        }))
        .unwrap();

        assert_eq!(server.status, ServerStatus::Maintenance);
        assert_eq!(server.field("status"), FieldValue::Text("maintenance"));
    }

    #[test]
    fn test_server_input_requires_serial_number() {
        let input = ServerInput {
            hostname: "srv-nyc-prod-01".to_string(),
            datacenter_id: "dc-1".to_string(),
            model: "PowerEdge R750".to_string(),
            serial_number: "".to_string(),
            status: ServerStatus::Online,
        };
        let err = input.validate().unwrap_err();
        assert_eq!(err.message(), "Serial number is required");
    }
}
