//! HTML fragments for partial page updates.

use axum::extract::{Query, State};
use axum::response::Html;
use serde::Deserialize;

use dosehub_app::ports::{DeviceRepository, VersionRepository};
use dosehub_domain::field::FieldIndex;
use dosehub_domain::selector::versions_for;

use super::DashboardError;
use crate::state::AppState;

/// Query of the versions fragment.
#[derive(Deserialize)]
pub struct VersionsQuery {
    #[serde(default)]
    pub idx: Option<String>,
    pub device: String,
}

/// `GET /fragments/versions` — the content of `versions{idx}` for a device
/// type; empty when the type has no versions.
pub async fn versions<DR, VR>(
    State(state): State<AppState<DR, VR>>,
    Query(query): Query<VersionsQuery>,
) -> Result<Html<String>, DashboardError>
where
    DR: DeviceRepository + Send + Sync + 'static,
    VR: VersionRepository + Send + Sync + 'static,
{
    let map = state.version_service.version_map().await?;
    let idx = query.idx.map(FieldIndex::new).unwrap_or_default();
    let body = versions_for(&map, &idx, &query.device)
        .map(|select| select.render())
        .unwrap_or_default();
    Ok(Html(body))
}
