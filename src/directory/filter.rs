//! Filter state and the filter/sort engine.
//!
//! # Pipeline
//! ```text
//! doctors
//!     → search (case-insensitive name substring, skipped when empty)
//!     → consultation (exact mode, skipped for Any)
//!     → speciality (any overlap, skipped when none selected)
//!     → sort (stable, by fees or experience, skipped for SortKey::None)
//! ```
//!
//! # Design Decisions
//! - `FilterState` is an immutable value; updates build a new one
//! - Only the final stage may reorder; earlier stages preserve input order
//! - The input slice is never mutated

use serde::{Deserialize, Serialize};

use crate::directory::doctor::{ConsultationType, Doctor};

/// Consultation constraint selected in the filter panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ConsultationFilter {
    #[default]
    Any,
    #[serde(rename = "Video Consult")]
    VideoConsult,
    #[serde(rename = "In Clinic")]
    InClinic,
}

impl ConsultationFilter {
    /// The single mode this filter requires, if any.
    pub fn required(&self) -> Option<ConsultationType> {
        match self {
            ConsultationFilter::Any => None,
            ConsultationFilter::VideoConsult => Some(ConsultationType::VideoConsult),
            ConsultationFilter::InClinic => Some(ConsultationType::InClinic),
        }
    }
}

impl From<ConsultationType> for ConsultationFilter {
    fn from(mode: ConsultationType) -> Self {
        match mode {
            ConsultationType::VideoConsult => ConsultationFilter::VideoConsult,
            ConsultationType::InClinic => ConsultationFilter::InClinic,
        }
    }
}

/// Numeric field to order results by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    None,
    Fees,
    Experience,
}

impl SortKey {
    /// Query-string label; `None` has no label.
    pub fn as_param(&self) -> Option<&'static str> {
        match self {
            SortKey::None => None,
            SortKey::Fees => Some("fees"),
            SortKey::Experience => Some("experience"),
        }
    }

    pub fn from_param(value: &str) -> Self {
        match value {
            "fees" => SortKey::Fees,
            "experience" => SortKey::Experience,
            _ => SortKey::None,
        }
    }

    /// Order the filter panel pairs with this key: cheapest first, most
    /// experienced first.
    pub fn default_order(&self) -> SortOrder {
        match self {
            SortKey::Experience => SortOrder::Descending,
            SortKey::None | SortKey::Fees => SortOrder::Ascending,
        }
    }

    fn value_of(&self, doctor: &Doctor) -> u32 {
        match self {
            SortKey::None => 0,
            SortKey::Fees => doctor.fees,
            SortKey::Experience => doctor.experience,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SortOrder {
    #[default]
    #[serde(rename = "asc")]
    Ascending,
    #[serde(rename = "desc")]
    Descending,
}

impl SortOrder {
    pub fn as_param(&self) -> &'static str {
        match self {
            SortOrder::Ascending => "asc",
            SortOrder::Descending => "desc",
        }
    }

    pub fn from_param(value: &str) -> Self {
        match value {
            "desc" => SortOrder::Descending,
            _ => SortOrder::Ascending,
        }
    }
}

/// Every active search, filter and sort selection.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterState {
    pub search: String,
    pub consultation_type: ConsultationFilter,
    /// Selected specialities in selection order, without duplicates.
    pub specialities: Vec<String>,
    pub sort_key: SortKey,
    pub sort_order: SortOrder,
}

impl FilterState {
    /// Build the next state by applying a partial update.
    pub fn merged(&self, update: &FilterUpdate) -> FilterState {
        FilterState {
            search: update.search.clone().unwrap_or_else(|| self.search.clone()),
            consultation_type: update.consultation_type.unwrap_or(self.consultation_type),
            specialities: update
                .specialities
                .as_ref()
                .map(|s| dedup(s))
                .unwrap_or_else(|| self.specialities.clone()),
            sort_key: update.sort_key.unwrap_or(self.sort_key),
            sort_order: update.sort_order.unwrap_or(self.sort_order),
        }
    }

    /// True when every stage of the pipeline is a no-op.
    pub fn is_default(&self) -> bool {
        *self == FilterState::default()
    }
}

/// A partial filter change; absent fields keep their current value.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterUpdate {
    pub search: Option<String>,
    pub consultation_type: Option<ConsultationFilter>,
    pub specialities: Option<Vec<String>>,
    pub sort_key: Option<SortKey>,
    pub sort_order: Option<SortOrder>,
}

impl FilterUpdate {
    /// Typing in the search box or picking a suggestion.
    pub fn search(term: impl Into<String>) -> Self {
        Self {
            search: Some(term.into()),
            ..Self::default()
        }
    }

    /// Selecting a consultation radio button.
    pub fn consultation(filter: ConsultationFilter) -> Self {
        Self {
            consultation_type: Some(filter),
            ..Self::default()
        }
    }

    /// Selecting a sort radio button; the order follows the key.
    pub fn sort(key: SortKey) -> Self {
        Self {
            sort_key: Some(key),
            sort_order: Some(key.default_order()),
            ..Self::default()
        }
    }

    /// Ticking or unticking a speciality checkbox against `current`.
    pub fn toggle_speciality(current: &FilterState, speciality: &str) -> Self {
        let specialities = if current.specialities.iter().any(|s| s == speciality) {
            current
                .specialities
                .iter()
                .filter(|s| s.as_str() != speciality)
                .cloned()
                .collect()
        } else {
            let mut next = current.specialities.clone();
            next.push(speciality.to_string());
            next
        };
        Self {
            specialities: Some(specialities),
            ..Self::default()
        }
    }
}

/// Run the full pipeline. Returns a new list; `doctors` is untouched.
pub fn apply(doctors: &[Doctor], filters: &FilterState) -> Vec<Doctor> {
    let needle = filters.search.to_lowercase();
    let required_mode = filters.consultation_type.required();

    let mut result: Vec<Doctor> = doctors
        .iter()
        .filter(|d| needle.is_empty() || d.name_contains(&needle))
        .filter(|d| required_mode.map_or(true, |mode| d.consultation_type == mode))
        .filter(|d| filters.specialities.is_empty() || d.has_any_speciality(&filters.specialities))
        .cloned()
        .collect();

    if filters.sort_key != SortKey::None {
        let key = filters.sort_key;
        // sort_by_key is stable: ties keep their filtered order.
        match filters.sort_order {
            SortOrder::Ascending => result.sort_by_key(|d| key.value_of(d)),
            SortOrder::Descending => result.sort_by_key(|d| std::cmp::Reverse(key.value_of(d))),
        }
    }

    result
}

fn dedup(items: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(items.len());
    for item in items {
        if !out.contains(item) {
            out.push(item.clone());
        }
    }
    out
}
