//! IP address model.

use serde::{Deserialize, Serialize};

use super::{require, Entity, Validate};
use crate::errors::AppError;
use crate::gateway::Resource;
use crate::table::{FieldValue, Record};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum IpType {
    Ipv4,
    Ipv6,
}

impl IpType {
    pub fn as_str(&self) -> &'static str {
        match self {
            IpType::Ipv4 => "ipv4",
            IpType::Ipv6 => "ipv6",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum IpAllocation {
    Static,
    Dhcp,
    Reserved,
}

impl IpAllocation {
    pub fn as_str(&self) -> &'static str {
        match self {
            IpAllocation::Static => "static",
            IpAllocation::Dhcp => "dhcp",
            IpAllocation::Reserved => "reserved",
        }
    }
}

/// An address, optionally bound to a host. The address text is not parsed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IpAddress {
    pub id: String,
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host_id: Option<String>,
    #[serde(rename = "type")]
    pub ip_type: IpType,
    pub allocation: IpAllocation,
    pub created_at: String,
    pub updated_at: String,
}

/// Request body for creating or updating an IP address.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IpAddressInput {
    pub address: String,
    #[serde(default)]
    pub host_id: Option<String>,
    #[serde(rename = "type")]
    pub ip_type: IpType,
    pub allocation: IpAllocation,
}

impl Validate for IpAddressInput {
    fn validate(&self) -> Result<(), AppError> {
        require("Address", &self.address)
    }
}

impl Record for IpAddress {
    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, key: &str) -> FieldValue<'_> {
        match key {
            "id" => FieldValue::Text(&self.id),
            "address" => FieldValue::Text(&self.address),
            "hostId" => self.host_id.as_deref().into(),
            "type" => FieldValue::Text(self.ip_type.as_str()),
            "allocation" => FieldValue::Text(self.allocation.as_str()),
            "createdAt" => FieldValue::Text(&self.created_at),
            "updatedAt" => FieldValue::Text(&self.updated_at),
            _ => FieldValue::Missing,
        }
    }
}

impl Entity for IpAddress {
    const RESOURCE: Resource = Resource::IpAddresses;
    type Input = IpAddressInput;

    fn display_name(&self) -> &str {
        &self.address
    }
}
