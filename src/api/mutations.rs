//! Create, update and delete endpoints.
//!
//! Bodies are validated before anything is sent upstream. Responses carry the record as
//! the backend returned it; views fetched afterwards see the change.

use axum::extract::{Path, State};
use serde_json::{json, Value};

use super::{parse_resource, success, ApiResult, JsonBody};
use crate::errors::AppError;
use crate::gateway::{ApiGateway, Resource};
use crate::models::{
    Assignment, Datacenter, Entity, Host, IpAddress, OperatingSystem, Person, Server,
};
use crate::AppState;

/// Run `$body` with `$E` bound to the entity type stored in `$resource`.
macro_rules! with_entity {
    ($resource:expr, $E:ident => $body:expr) => {
        match $resource {
            Resource::Datacenters => {
                type $E = Datacenter;
                $body
            }
            Resource::Servers => {
                type $E = Server;
                $body
            }
            Resource::Hosts => {
                type $E = Host;
                $body
            }
            Resource::IpAddresses => {
                type $E = IpAddress;
                $body
            }
            Resource::OperatingSystems => {
                type $E = OperatingSystem;
                $body
            }
            Resource::Persons => {
                type $E = Person;
                $body
            }
            Resource::Assignments => {
                type $E = Assignment;
                $body
            }
        }
    };
}

async fn create_entity<E: Entity>(gateway: &ApiGateway, body: Value) -> Result<Value, AppError> {
    let input: E::Input = serde_json::from_value(body)?;
    let created = gateway.create::<E>(&input).await?;
    tracing::info!("Created {} {}", E::RESOURCE.singular(), created.id());
    Ok(serde_json::to_value(created)?)
}

async fn update_entity<E: Entity>(
    gateway: &ApiGateway,
    id: &str,
    body: Value,
) -> Result<Value, AppError> {
    let input: E::Input = serde_json::from_value(body)?;
    let updated = gateway.update::<E>(id, &input).await?;
    tracing::info!("Updated {} {}", E::RESOURCE.singular(), id);
    Ok(serde_json::to_value(updated)?)
}

/// POST /api/:resource - Create a record.
pub async fn create_resource(
    State(state): State<AppState>,
    Path(resource): Path<String>,
    JsonBody(body): JsonBody<Value>,
) -> ApiResult<Value> {
    let resource = parse_resource(&resource)?;
    let created = with_entity!(resource, E => create_entity::<E>(&state.gateway, body).await)?;
    success(created)
}

/// PUT /api/:resource/:id - Replace a record.
pub async fn update_resource(
    State(state): State<AppState>,
    Path((resource, id)): Path<(String, String)>,
    JsonBody(body): JsonBody<Value>,
) -> ApiResult<Value> {
    let resource = parse_resource(&resource)?;
    let updated =
        with_entity!(resource, E => update_entity::<E>(&state.gateway, &id, body).await)?;
    success(updated)
}

/// DELETE /api/:resource/:id - Delete a record.
pub async fn delete_resource(
    State(state): State<AppState>,
    Path((resource, id)): Path<(String, String)>,
) -> ApiResult<Value> {
    let resource = parse_resource(&resource)?;
    state.gateway.delete(resource, &id).await?;
    tracing::info!("Deleted {} {}", resource.singular(), id);
    success(json!({ "id": id }))
}
