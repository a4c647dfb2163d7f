//! Request handlers for the directory API.

use axum::{
    extract::{RawQuery, State},
    Json,
};
use serde::Deserialize;

use crate::directory::catalog::AVAILABLE_SPECIALITIES;
use crate::directory::filter::FilterUpdate;
use crate::directory::query::decode_query;
use crate::directory::suggest::suggestions;
use crate::http::response::{
    DoctorsResponse, HealthResponse, SpecialitiesResponse, SuggestionsResponse,
};
use crate::http::server::AppState;
use crate::observability::metrics;

/// Body of `POST /filters`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateRequest {
    /// Current query string (the page URL's).
    pub query: String,
    pub update: FilterUpdate,
    /// Speciality checkbox to flip after `update` is applied.
    pub toggle_speciality: Option<String>,
}

/// `GET /doctors?<filters>`
pub async fn list_doctors(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Json<DoctorsResponse> {
    metrics::record_query("doctors");
    let filters = decode_query(query.as_deref().unwrap_or_default());
    let snapshot = state.snapshot();

    tracing::debug!(query = ?query, status = snapshot.label(), "Listing doctors");
    Json(DoctorsResponse::build(&snapshot, filters))
}

/// `POST /filters`
pub async fn update_filters(
    State(state): State<AppState>,
    Json(request): Json<UpdateRequest>,
) -> Json<DoctorsResponse> {
    metrics::record_query("filters");
    let current = decode_query(&request.query);
    let mut next = current.merged(&request.update);
    if let Some(speciality) = request.toggle_speciality.as_deref() {
        next = next.merged(&FilterUpdate::toggle_speciality(&next, speciality));
    }

    let snapshot = state.snapshot();
    Json(DoctorsResponse::build(&snapshot, next))
}

/// `GET /suggestions?search=<term>`
pub async fn list_suggestions(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Json<SuggestionsResponse> {
    metrics::record_query("suggestions");
    let search = decode_query(query.as_deref().unwrap_or_default()).search;
    let snapshot = state.snapshot();

    Json(SuggestionsResponse {
        suggestions: suggestions(&search, snapshot.doctors()),
        search,
    })
}

/// `GET /specialities`
pub async fn list_specialities(State(state): State<AppState>) -> Json<SpecialitiesResponse> {
    metrics::record_query("specialities");
    let snapshot = state.snapshot();

    Json(SpecialitiesResponse {
        available: AVAILABLE_SPECIALITIES.iter().map(|s| s.to_string()).collect(),
        present: snapshot
            .directory()
            .map(|d| d.specialities().to_vec())
            .unwrap_or_default(),
    })
}

/// `GET /health`
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse::build(&state.snapshot()))
}
