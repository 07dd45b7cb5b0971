//! Datacenter model.

use serde::{Deserialize, Serialize};

use super::{require, Entity, Validate};
use crate::errors::AppError;
use crate::gateway::Resource;
use crate::table::{FieldValue, Record};

/// A physical site housing servers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Datacenter {
    pub id: String,
    pub name: String,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Request body for creating or updating a datacenter.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatacenterInput {
    pub name: String,
    pub location: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl Validate for DatacenterInput {
    fn validate(&self) -> Result<(), AppError> {
        require("Name", &self.name)?;
        require("Location", &self.location)
    }
}

impl Record for Datacenter {
    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, key: &str) -> FieldValue<'_> {
        match key {
            "id" => FieldValue::Text(&self.id),
            "name" => FieldValue::Text(&self.name),
            "location" => FieldValue::Text(&self.location),
            "description" => self.description.as_deref().into(),
            "createdAt" => FieldValue::Text(&self.created_at),
            "updatedAt" => FieldValue::Text(&self.updated_at),
            _ => FieldValue::Missing,
        }
    }
}

impl Entity for Datacenter {
    const RESOURCE: Resource = Resource::Datacenters;
    type Input = DatacenterInput;

    fn display_name(&self) -> &str {
        &self.name
    }
}
