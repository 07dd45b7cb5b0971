//! Assignment model.
//!
//! An assignment links a person to exactly one datacenter, server, host or IP address.
//! On the wire the target is a pair of `entityType` and `entityId` fields; in memory it is
//! an [`EntityRef`], so every lookup has to handle each target kind.

use serde::{Deserialize, Serialize};

use super::{require, Entity, Validate};
use crate::errors::AppError;
use crate::gateway::Resource;
use crate::table::{FieldValue, Record};

/// Discriminant of an assignment target.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Datacenter,
    Server,
    Host,
    Ip,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Datacenter => "datacenter",
            EntityKind::Server => "server",
            EntityKind::Host => "host",
            EntityKind::Ip => "ip",
        }
    }

    /// Collection that holds records of this kind.
    pub fn resource(&self) -> Resource {
        match self {
            EntityKind::Datacenter => Resource::Datacenters,
            EntityKind::Server => Resource::Servers,
            EntityKind::Host => Resource::Hosts,
            EntityKind::Ip => Resource::IpAddresses,
        }
    }
}

/// Typed reference to the record an assignment points at.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EntityRef {
    Datacenter(String),
    Server(String),
    Host(String),
    Ip(String),
}

impl EntityRef {
    pub fn new(kind: EntityKind, id: impl Into<String>) -> Self {
        let id = id.into();
        match kind {
            EntityKind::Datacenter => EntityRef::Datacenter(id),
            EntityKind::Server => EntityRef::Server(id),
            EntityKind::Host => EntityRef::Host(id),
            EntityKind::Ip => EntityRef::Ip(id),
        }
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            EntityRef::Datacenter(_) => EntityKind::Datacenter,
            EntityRef::Server(_) => EntityKind::Server,
            EntityRef::Host(_) => EntityKind::Host,
            EntityRef::Ip(_) => EntityKind::Ip,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            EntityRef::Datacenter(id)
            | EntityRef::Server(id)
            | EntityRef::Host(id)
            | EntityRef::Ip(id) => id,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum AssignmentRole {
    Owner,
    Admin,
    Operator,
    Viewer,
}

impl AssignmentRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssignmentRole::Owner => "owner",
            AssignmentRole::Admin => "admin",
            AssignmentRole::Operator => "operator",
            AssignmentRole::Viewer => "viewer",
        }
    }
}

/// A person's role on one CMDB entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "AssignmentFields", into = "AssignmentFields")]
pub struct Assignment {
    pub id: String,
    pub person_id: String,
    pub target: EntityRef,
    pub role: AssignmentRole,
    pub created_at: String,
}

/// Flat field layout of an assignment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AssignmentFields {
    id: String,
    person_id: String,
    entity_type: EntityKind,
    entity_id: String,
    role: AssignmentRole,
    created_at: String,
}

impl From<AssignmentFields> for Assignment {
    fn from(fields: AssignmentFields) -> Self {
        Self {
            id: fields.id,
            person_id: fields.person_id,
            target: EntityRef::new(fields.entity_type, fields.entity_id),
            role: fields.role,
            created_at: fields.created_at,
        }
    }
}

impl From<Assignment> for AssignmentFields {
    fn from(assignment: Assignment) -> Self {
        Self {
            id: assignment.id,
            person_id: assignment.person_id,
            entity_type: assignment.target.kind(),
            entity_id: assignment.target.id().to_string(),
            role: assignment.role,
            created_at: assignment.created_at,
        }
    }
}

/// Request body for creating or updating an assignment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentInput {
    pub person_id: String,
    pub entity_type: EntityKind,
    pub entity_id: String,
    pub role: AssignmentRole,
}

impl Validate for AssignmentInput {
    fn validate(&self) -> Result<(), AppError> {
        require("Person", &self.person_id)?;
        require("Entity", &self.entity_id)
    }
}

impl Record for Assignment {
    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, key: &str) -> FieldValue<'_> {
        match key {
            "id" => FieldValue::Text(&self.id),
            "personId" => FieldValue::Text(&self.person_id),
            "entityType" => FieldValue::Text(self.target.kind().as_str()),
            "entityId" => FieldValue::Text(self.target.id()),
            "role" => FieldValue::Text(self.role.as_str()),
            "createdAt" => FieldValue::Text(&self.created_at),
            _ => FieldValue::Missing,
        }
    }
}

impl Entity for Assignment {
    const RESOURCE: Resource = Resource::Assignments;
    type Input = AssignmentInput;

    fn display_name(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_assignment_target_from_wire_fields() {
        let assignment: Assignment = serde_json::from_value(json!({
            "id": "asg-1",
            "personId": "p-1",
            "personName": "Alex Turner",
            "entityType": "ip",
            "entityId": "ip-7",
            "role": "operator",
            "createdAt": "2024-01-01"
        }))
        .unwrap();

        assert_eq!(assignment.target, EntityRef::Ip("ip-7".to_string()));
        assert_eq!(assignment.role, AssignmentRole::Operator);
    }

    #[test]
    fn test_assignment_serializes_flat_fields() {
        let assignment = Assignment {
            id: "asg-1".to_string(),
            person_id: "p-1".to_string(),
            target: EntityRef::Server("srv-1".to_string()),
            role: AssignmentRole::Owner,
            created_at: "2024-01-01".to_string(),
        };
        let value = serde_json::to_value(&assignment).unwrap();
        assert_eq!(value["entityType"], "server");
        assert_eq!(value["entityId"], "srv-1");
        assert_eq!(value["personId"], "p-1");
    }

    #[test]
    fn test_unknown_entity_type_is_rejected() {
        let result: Result<Assignment, _> = serde_json::from_value(json!({
            "id": "asg-1",
            "personId": "p-1",
            "entityType": "rack",
            "entityId": "r-1",
            "role": "owner",
            "createdAt": "2024-01-01"
        }));
        assert!(result.is_err());
    }
}
