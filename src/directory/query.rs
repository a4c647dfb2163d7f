//! URL query codec for [`FilterState`].
//!
//! # Keys
//! - `search`: free text
//! - `consultationType`: `Video Consult` | `In Clinic`
//! - `specialities`: comma-joined labels
//! - `sortBy`: `fees` | `experience`, always paired with `sortOrder`: `asc` | `desc`
//!
//! # Design Decisions
//! - Decoding never fails: unknown keys are ignored, unknown values fall
//!   back to the field default
//! - Encoding omits every field at its no-op value so shared URLs stay short
//! - A repeated key is read from its first occurrence

use url::form_urlencoded;

use crate::directory::doctor::ConsultationType;
use crate::directory::filter::{ConsultationFilter, FilterState, SortKey, SortOrder};

pub const SEARCH: &str = "search";
pub const CONSULTATION_TYPE: &str = "consultationType";
pub const SPECIALITIES: &str = "specialities";
pub const SORT_BY: &str = "sortBy";
pub const SORT_ORDER: &str = "sortOrder";

/// Build a filter state from decoded query pairs.
pub fn decode<I, K, V>(pairs: I) -> FilterState
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut search = None;
    let mut consultation = None;
    let mut specialities = None;
    let mut sort_by = None;
    let mut sort_order = None;

    for (key, value) in pairs {
        let slot = match key.as_ref() {
            SEARCH => &mut search,
            CONSULTATION_TYPE => &mut consultation,
            SPECIALITIES => &mut specialities,
            SORT_BY => &mut sort_by,
            SORT_ORDER => &mut sort_order,
            _ => continue,
        };
        if slot.is_none() {
            *slot = Some(value.as_ref().to_string());
        }
    }

    FilterState {
        search: search.unwrap_or_default(),
        consultation_type: consultation
            .as_deref()
            .and_then(ConsultationType::from_label)
            .map(ConsultationFilter::from)
            .unwrap_or_default(),
        specialities: specialities.as_deref().map(split_list).unwrap_or_default(),
        sort_key: sort_by.as_deref().map(SortKey::from_param).unwrap_or_default(),
        sort_order: sort_order.as_deref().map(SortOrder::from_param).unwrap_or_default(),
    }
}

/// Decode a raw query string (without the leading `?`).
pub fn decode_query(query: &str) -> FilterState {
    let query = query.strip_prefix('?').unwrap_or(query);
    decode(form_urlencoded::parse(query.as_bytes()))
}

/// Query pairs for every field that differs from its no-op value.
pub fn encode(filters: &FilterState) -> Vec<(&'static str, String)> {
    let mut pairs = Vec::new();

    if !filters.search.is_empty() {
        pairs.push((SEARCH, filters.search.clone()));
    }
    if let Some(mode) = filters.consultation_type.required() {
        pairs.push((CONSULTATION_TYPE, mode.as_str().to_string()));
    }
    if !filters.specialities.is_empty() {
        pairs.push((SPECIALITIES, filters.specialities.join(",")));
    }
    if let Some(sort_by) = filters.sort_key.as_param() {
        pairs.push((SORT_BY, sort_by.to_string()));
        pairs.push((SORT_ORDER, filters.sort_order.as_param().to_string()));
    }

    pairs
}

/// Encode to a form-urlencoded query string; empty for default filters.
pub fn encode_query(filters: &FilterState) -> String {
    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(encode(filters))
        .finish()
}

fn split_list(value: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for item in value.split(',').filter(|s| !s.is_empty()) {
        if !out.iter().any(|existing| existing == item) {
            out.push(item.to_string());
        }
    }
    out
}
