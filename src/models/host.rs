//! Host model.

use serde::{Deserialize, Serialize};

use super::{at_least, require, Entity, Validate};
use crate::errors::AppError;
use crate::gateway::Resource;
use crate::table::{FieldValue, Record};

/// Kind of workload running on a server.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum HostType {
    Vm,
    Container,
    BareMetal,
}

impl HostType {
    pub fn as_str(&self) -> &'static str {
        match self {
            HostType::Vm => "vm",
            HostType::Container => "container",
            HostType::BareMetal => "bare-metal",
        }
    }
}

/// Power state of a host.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum HostStatus {
    Running,
    Stopped,
    Suspended,
}

impl HostStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            HostStatus::Running => "running",
            HostStatus::Stopped => "stopped",
            HostStatus::Suspended => "suspended",
        }
    }
}

/// A virtual machine, container or bare-metal install on a server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Host {
    pub id: String,
    pub hostname: String,
    pub server_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub os_id: Option<String>,
    #[serde(rename = "type")]
    pub host_type: HostType,
    pub status: HostStatus,
    pub cpu: i64,
    pub memory_gb: i64,
    pub created_at: String,
    pub updated_at: String,
}

/// Request body for creating or updating a host.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostInput {
    pub hostname: String,
    pub server_id: String,
    #[serde(default)]
    pub os_id: Option<String>,
    #[serde(rename = "type")]
    pub host_type: HostType,
    pub status: HostStatus,
    pub cpu: i64,
    pub memory_gb: i64,
}

impl Validate for HostInput {
    fn validate(&self) -> Result<(), AppError> {
        require("Hostname", &self.hostname)?;
        require("Server", &self.server_id)?;
        at_least("CPU", self.cpu, 1)?;
        at_least("Memory (GB)", self.memory_gb, 1)
    }
}

impl Record for Host {
    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, key: &str) -> FieldValue<'_> {
        match key {
            "id" => FieldValue::Text(&self.id),
            "hostname" => FieldValue::Text(&self.hostname),
            "serverId" => FieldValue::Text(&self.server_id),
            "osId" => self.os_id.as_deref().into(),
            "type" => FieldValue::Text(self.host_type.as_str()),
            "status" => FieldValue::Text(self.status.as_str()),
            "cpu" => FieldValue::Int(self.cpu),
            "memoryGb" => FieldValue::Int(self.memory_gb),
            "createdAt" => FieldValue::Text(&self.created_at),
            "updatedAt" => FieldValue::Text(&self.updated_at),
            _ => FieldValue::Missing,
        }
    }
}

impl Entity for Host {
    const RESOURCE: Resource = Resource::Hosts;
    type Input = HostInput;

    fn display_name(&self) -> &str {
        &self.hostname
    }
}
