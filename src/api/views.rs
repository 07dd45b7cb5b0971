//! Read-only view endpoints.

use axum::extract::{Path, State};

use super::{parse_resource, success, ApiResult, QueryParams};
use crate::errors::AppError;
use crate::page::{PageController, PageState};
use crate::views::{load_dashboard, load_detail, list_view, DashboardView, DetailView, ListQuery, ListView};
use crate::AppState;

/// GET /api/dashboard - Entity counts and status summary.
pub async fn get_dashboard(State(state): State<AppState>) -> ApiResult<DashboardView> {
    let view = load_dashboard(&state.gateway).await?;
    success(view)
}

/// GET /api/:resource - Searchable, sortable list of one collection.
pub async fn list_resource(
    State(state): State<AppState>,
    Path(resource): Path<String>,
    QueryParams(query): QueryParams<ListQuery>,
) -> ApiResult<ListView> {
    let resource = parse_resource(&resource)?;
    let view = list_view(&state.gateway, resource, &query).await?;
    success(view)
}

/// GET /api/:resource/:id - Detail page of one record.
pub async fn get_resource(
    State(state): State<AppState>,
    Path((resource, id)): Path<(String, String)>,
) -> ApiResult<DetailView> {
    let resource = parse_resource(&resource)?;
    let gateway = &state.gateway;

    // Each request gets its own page, so this load is always the newest one.
    let page = PageController::new();
    page.load(&id, |id| async move { load_detail(gateway, resource, &id).await })
        .await;

    match page.state().await {
        PageState::Loaded(view) => success(view),
        PageState::NotFound => Err(AppError::NotFound(format!(
            "{} {} not found",
            resource.singular(),
            id
        ))),
        PageState::Error(e) => Err(e.into()),
        // Unreachable after a settled load.
        PageState::Loading => Err(AppError::Internal(format!(
            "Load of {} {} did not settle",
            resource.singular(),
            id
        ))),
    }
}
