//! Operating system model.

use serde::{Deserialize, Serialize};

use super::{require, Entity, Validate};
use crate::errors::AppError;
use crate::gateway::Resource;
use crate::table::{FieldValue, Record};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperatingSystem {
    pub id: String,
    pub name: String,
    pub version: String,
    pub vendor: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eol_date: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl OperatingSystem {
    /// Name and version, e.g. "Ubuntu 22.04".
    pub fn full_name(&self) -> String {
        format!("{} {}", self.name, self.version)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperatingSystemInput {
    pub name: String,
    pub version: String,
    pub vendor: String,
    #[serde(default)]
    pub eol_date: Option<String>,
}

impl Validate for OperatingSystemInput {
    fn validate(&self) -> Result<(), AppError> {
        require("Name", &self.name)?;
        require("Version", &self.version)?;
        require("Vendor", &self.vendor)
    }
}

impl Record for OperatingSystem {
    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, key: &str) -> FieldValue<'_> {
        match key {
            "id" => FieldValue::Text(&self.id),
            "name" => FieldValue::Text(&self.name),
            "version" => FieldValue::Text(&self.version),
            "vendor" => FieldValue::Text(&self.vendor),
            "eolDate" => self.eol_date.as_deref().into(),
            "createdAt" => FieldValue::Text(&self.created_at),
            "updatedAt" => FieldValue::Text(&self.updated_at),
            _ => FieldValue::Missing,
        }
    }
}

impl Entity for OperatingSystem {
    const RESOURCE: Resource = Resource::OperatingSystems;
    type Input = OperatingSystemInput;

    fn display_name(&self) -> &str {
        &self.name
    }
}
