//! Directory session: the single fetch plus filter state.
//!
//! # States
//! - Loading: fetch not finished, every derived list is empty
//! - Ready: doctors available (possibly empty if the fetch failed)
//!
//! # State Transitions
//! ```text
//! Loading → Ready(Fetched):  source returned an array
//! Loading → Ready(Failed):   transport/parse failure, empty list
//! ```
//!
//! # Design Decisions
//! - The fetch runs at most once per session; filter changes never refetch
//! - Every filter change replaces the state and recomputes the whole view
//! - A loaded [`Directory`] is immutable and shared through `Arc`

use std::sync::Arc;

use serde::Serialize;

use crate::directory::catalog::unique_specialities;
use crate::directory::doctor::Doctor;
use crate::directory::filter::{apply, FilterState, FilterUpdate};
use crate::directory::normalize::{normalize_all, FallbackLog};
use crate::directory::query::{decode_query, encode_query};
use crate::directory::source::DoctorSource;
use crate::directory::suggest::suggestions;
use crate::observability::metrics;

/// How the doctor list was obtained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "error", rename_all = "lowercase")]
pub enum LoadOutcome {
    Fetched,
    /// The fetch failed; the list is empty. Holds the logged error.
    Failed(String),
}

/// The normalized doctor list produced by the one fetch.
#[derive(Debug, Clone)]
pub struct Directory {
    doctors: Vec<Doctor>,
    outcome: LoadOutcome,
    fallbacks: FallbackLog,
    specialities: Vec<String>,
}

impl Directory {
    /// Fetch and normalize. Failures yield an empty directory.
    pub async fn load<S: DoctorSource>(source: &S) -> Self {
        tracing::info!(source = %source.describe(), "Fetching doctor list");

        match source.fetch().await {
            Ok(records) => {
                let mut fallbacks = FallbackLog::new();
                let doctors = normalize_all(&records, &mut fallbacks);

                if !fallbacks.is_empty() {
                    for (field, count) in fallbacks.iter() {
                        tracing::warn!(field, count, "Field defaulted during normalization");
                    }
                }
                tracing::info!(
                    doctors = doctors.len(),
                    fallbacks = fallbacks.total(),
                    "Doctor list loaded"
                );
                metrics::record_fetch("fetched");
                metrics::record_fallbacks(&fallbacks);
                metrics::record_doctors_loaded(doctors.len());

                Self::from_parts(doctors, LoadOutcome::Fetched, fallbacks)
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to fetch doctors, continuing with an empty list");
                metrics::record_fetch("failed");
                metrics::record_doctors_loaded(0);

                Self::from_parts(Vec::new(), LoadOutcome::Failed(e.to_string()), FallbackLog::new())
            }
        }
    }

    /// Build a directory from already-normalized doctors.
    pub fn from_doctors(doctors: Vec<Doctor>) -> Self {
        Self::from_parts(doctors, LoadOutcome::Fetched, FallbackLog::new())
    }

    fn from_parts(doctors: Vec<Doctor>, outcome: LoadOutcome, fallbacks: FallbackLog) -> Self {
        let specialities = unique_specialities(&doctors);
        Self {
            doctors,
            outcome,
            fallbacks,
            specialities,
        }
    }

    pub fn doctors(&self) -> &[Doctor] {
        &self.doctors
    }

    pub fn outcome(&self) -> &LoadOutcome {
        &self.outcome
    }

    pub fn fallbacks(&self) -> &FallbackLog {
        &self.fallbacks
    }

    /// Sorted unique specialities present in the list.
    pub fn specialities(&self) -> &[String] {
        &self.specialities
    }
}

/// Lifecycle of the doctor list.
#[derive(Debug, Clone, Default)]
pub enum DirectoryState {
    #[default]
    Loading,
    Ready(Arc<Directory>),
}

impl DirectoryState {
    /// Doctors, or an empty slice while loading.
    pub fn doctors(&self) -> &[Doctor] {
        match self {
            DirectoryState::Loading => &[],
            DirectoryState::Ready(directory) => directory.doctors(),
        }
    }

    pub fn directory(&self) -> Option<&Arc<Directory>> {
        match self {
            DirectoryState::Loading => None,
            DirectoryState::Ready(directory) => Some(directory),
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, DirectoryState::Ready(_))
    }

    pub fn label(&self) -> &'static str {
        match self {
            DirectoryState::Loading => "loading",
            DirectoryState::Ready(_) => "ready",
        }
    }
}

/// Everything derived from (doctors, filters).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct View {
    pub doctors: Vec<Doctor>,
    pub suggestions: Vec<String>,
    /// Canonical query string mirroring the filters.
    pub query: String,
}

impl View {
    pub fn derive(doctors: &[Doctor], filters: &FilterState) -> Self {
        Self {
            doctors: apply(doctors, filters),
            suggestions: suggestions(&filters.search, doctors),
            query: encode_query(filters),
        }
    }
}

/// Controller owning the filter state and the derived view.
#[derive(Debug, Clone, Default)]
pub struct Session {
    state: DirectoryState,
    filters: FilterState,
    view: View,
}

impl Session {
    /// Start a session in `Loading` with the given filters.
    pub fn new(filters: FilterState) -> Self {
        let mut session = Self {
            state: DirectoryState::Loading,
            filters,
            view: View::default(),
        };
        session.refresh();
        session
    }

    /// Start a session from the page's query string.
    pub fn from_query(query: &str) -> Self {
        Self::new(decode_query(query))
    }

    /// Run the one fetch. Later calls are no-ops.
    pub async fn load<S: DoctorSource>(&mut self, source: &S) {
        if self.state.is_ready() {
            tracing::debug!("Doctor list already loaded, skipping fetch");
            return;
        }
        let directory = Directory::load(source).await;
        self.attach(Arc::new(directory));
    }

    /// Move to `Ready` with an already-loaded directory.
    pub fn attach(&mut self, directory: Arc<Directory>) {
        self.state = DirectoryState::Ready(directory);
        self.refresh();
    }

    /// Apply a partial filter change and recompute everything.
    pub fn update_filters(&mut self, update: &FilterUpdate) {
        self.filters = self.filters.merged(update);
        self.refresh();
    }

    pub fn filtered_doctors(&self) -> &[Doctor] {
        &self.view.doctors
    }

    pub fn suggestions(&self) -> &[String] {
        &self.view.suggestions
    }

    /// Query string to push into the URL.
    pub fn query_string(&self) -> &str {
        &self.view.query
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn state(&self) -> &DirectoryState {
        &self.state
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    fn refresh(&mut self) {
        self.view = View::derive(self.state.doctors(), &self.filters);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::filter::{ConsultationFilter, SortKey};
    use crate::directory::source::{SourceError, SourceResult, StaticDoctorSource};
    use serde_json::{json, Value};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn records() -> Vec<Value> {
        vec![
            json!({"id": "1", "name": "Dr. Alice", "fees": "₹100", "experience": "5 Years",
                   "video_consult": true, "in_clinic": false,
                   "specialities": [{"name": "Dentist"}]}),
            json!({"id": "2", "name": "Dr. Bob", "fees": "₹50", "experience": "10 Years",
                   "video_consult": false, "in_clinic": true,
                   "specialities": [{"name": "ENT"}]}),
            json!({"id": "3", "name": "Dr. Alina", "fees": "free", "experience": "2 Years",
                   "specialities": [{"name": "ENT"}, {"name": "Dentist"}]}),
        ]
    }

    struct FailingSource;

    impl DoctorSource for FailingSource {
        async fn fetch(&self) -> SourceResult<Vec<Value>> {
            Err(SourceError::Status(503))
        }

        fn describe(&self) -> String {
            "failing".to_string()
        }
    }

    struct CountingSource {
        calls: AtomicUsize,
    }

    impl DoctorSource for CountingSource {
        async fn fetch(&self) -> SourceResult<Vec<Value>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(records())
        }

        fn describe(&self) -> String {
            "counting".to_string()
        }
    }

    fn names(doctors: &[Doctor]) -> Vec<&str> {
        doctors.iter().map(|d| d.name.as_str()).collect()
    }

    #[tokio::test]
    async fn test_loading_then_ready() {
        let mut session = Session::from_query("search=ali");
        assert!(!session.state().is_ready());
        assert!(session.filtered_doctors().is_empty());
        assert!(session.suggestions().is_empty());
        assert_eq!(session.query_string(), "search=ali");

        session.load(&StaticDoctorSource::new(records())).await;

        assert!(session.state().is_ready());
        assert_eq!(names(session.filtered_doctors()), vec!["Alice", "Alina"]);
        assert_eq!(session.suggestions(), ["Alice", "Alina"]);
    }

    #[tokio::test]
    async fn test_failed_fetch_is_ready_and_empty() {
        let mut session = Session::default();
        session.load(&FailingSource).await;

        let directory = session.state().directory().unwrap();
        assert!(matches!(directory.outcome(), LoadOutcome::Failed(msg) if msg.contains("503")));
        assert!(session.filtered_doctors().is_empty());
    }

    #[tokio::test]
    async fn test_fetch_runs_once() {
        let source = CountingSource {
            calls: AtomicUsize::new(0),
        };
        let mut session = Session::default();
        session.load(&source).await;
        session.update_filters(&FilterUpdate::search("bob"));
        session.load(&source).await;

        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
        assert_eq!(names(session.filtered_doctors()), vec!["Bob"]);
    }

    #[tokio::test]
    async fn test_updates_refresh_view_and_query() {
        let mut session = Session::default();
        session.load(&StaticDoctorSource::new(records())).await;
        assert_eq!(session.query_string(), "");
        assert_eq!(session.suggestions().len(), 3);

        session.update_filters(&FilterUpdate::sort(SortKey::Fees));
        assert_eq!(names(session.filtered_doctors()), vec!["Alina", "Bob", "Alice"]);
        assert_eq!(session.query_string(), "sortBy=fees&sortOrder=asc");

        let toggle = FilterUpdate::toggle_speciality(session.filters(), "Dentist");
        session.update_filters(&toggle);
        session.update_filters(&FilterUpdate::consultation(ConsultationFilter::VideoConsult));
        assert_eq!(names(session.filtered_doctors()), vec!["Alina", "Alice"]);
        assert_eq!(
            session.query_string(),
            "consultationType=Video+Consult&specialities=Dentist&sortBy=fees&sortOrder=asc"
        );
    }

    #[tokio::test]
    async fn test_directory_tracks_fallbacks_and_specialities() {
        let directory = Directory::load(&StaticDoctorSource::new(records())).await;

        assert_eq!(directory.outcome(), &LoadOutcome::Fetched);
        assert_eq!(directory.fallbacks().count("fees"), 1);
        assert_eq!(directory.specialities(), ["Dentist", "ENT"]);
    }
}
