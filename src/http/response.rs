//! JSON payloads returned by the API.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::directory::doctor::Doctor;
use crate::directory::filter::FilterState;
use crate::directory::session::{DirectoryState, LoadOutcome, View};
use crate::presentation::{results_heading, sort_label};

/// Filtered listing, as rendered by the results pane.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorsResponse {
    /// `loading` until the fetch finishes, then `ready`.
    pub status: String,
    pub count: usize,
    pub heading: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sorted_by: Option<String>,
    /// Canonical query string for these filters.
    pub query: String,
    pub filters: FilterState,
    pub suggestions: Vec<String>,
    pub doctors: Vec<Doctor>,
}

impl DoctorsResponse {
    pub fn build(state: &DirectoryState, filters: FilterState) -> Self {
        let View {
            doctors,
            suggestions,
            query,
        } = View::derive(state.doctors(), &filters);

        Self {
            status: state.label().to_string(),
            count: doctors.len(),
            heading: results_heading(doctors.len()),
            sorted_by: sort_label(filters.sort_key).map(str::to_string),
            query,
            filters,
            suggestions,
            doctors,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestionsResponse {
    pub search: String,
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpecialitiesResponse {
    /// Fixed filter-panel options.
    pub available: Vec<String>,
    /// Specialities present in the loaded list.
    pub present: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub doctors: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fetch: Option<LoadOutcome>,
    /// Per-field count of normalization defaults.
    pub fallbacks: BTreeMap<&'static str, usize>,
}

impl HealthResponse {
    pub fn build(state: &DirectoryState) -> Self {
        let directory = state.directory();
        Self {
            status: state.label(),
            doctors: state.doctors().len(),
            fetch: directory.map(|d| d.outcome().clone()),
            fallbacks: directory
                .map(|d| d.fallbacks().iter().collect())
                .unwrap_or_default(),
        }
    }
}
