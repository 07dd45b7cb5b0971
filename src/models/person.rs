//! Person model.

use serde::{Deserialize, Serialize};

use super::{require, Entity, Validate};
use crate::errors::AppError;
use crate::gateway::Resource;
use crate::table::{FieldValue, Record};

/// Someone responsible for CMDB entities through assignments.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonInput {
    pub name: String,
    pub email: String,
    pub role: String,
    pub department: String,
    #[serde(default)]
    pub phone: Option<String>,
}

impl Validate for PersonInput {
    fn validate(&self) -> Result<(), AppError> {
        require("Name", &self.name)?;
        require("Email", &self.email)?;
        if !self.email.contains('@') {
            return Err(AppError::Validation(format!(
                "Email {:?} is not a valid address",
                self.email
            )));
        }
        require("Role", &self.role)?;
        require("Department", &self.department)
    }
}

impl Record for Person {
    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, key: &str) -> FieldValue<'_> {
        match key {
            "id" => FieldValue::Text(&self.id),
            "name" => FieldValue::Text(&self.name),
            "email" => FieldValue::Text(&self.email),
            "role" => FieldValue::Text(&self.role),
            "department" => self.department.as_deref().into(),
            "phone" => self.phone.as_deref().into(),
            "createdAt" => FieldValue::Text(&self.created_at),
            "updatedAt" => FieldValue::Text(&self.updated_at),
            _ => FieldValue::Missing,
        }
    }
}

impl Entity for Person {
    const RESOURCE: Resource = Resource::Persons;
    type Input = PersonInput;

    fn display_name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_person_input_rejects_email_without_at() {
        let input = PersonInput {
            name: "Alex Turner".to_string(),
            email: "alex.example.com".to_string(),
            role: "SRE".to_string(),
            department: "Infrastructure".to_string(),
            phone: None,
        };
        assert!(input.validate().is_err());
    }
}
