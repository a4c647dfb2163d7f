//! Raw record normalization.
//!
//! # Responsibilities
//! - Turn one loosely-typed upstream record into a [`Doctor`]
//! - Degrade every malformed or missing field to a safe default
//! - Record which fields fell back so data-quality stays observable
//!
//! # Design Decisions
//! - Input is a `serde_json::Value`, not a typed struct: a wrongly-typed
//!   field must not reject the whole record
//! - Numeric text is read like a leading-integer parse ("13+ Years" → 13)

use std::collections::BTreeMap;

use serde_json::Value;
use uuid::Uuid;

use crate::directory::doctor::{ConsultationType, Doctor};

const TITLE_PREFIX: &str = "Dr. ";
const CURRENCY_GLYPH: char = '₹';
const DEFAULT_QUALIFICATION: &str = "MBBS";

/// Per-field count of defaults applied during normalization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FallbackLog {
    counts: BTreeMap<&'static str, usize>,
}

impl FallbackLog {
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&mut self, field: &'static str) {
        *self.counts.entry(field).or_insert(0) += 1;
    }

    /// Number of records where `field` fell back to its default.
    pub fn count(&self, field: &str) -> usize {
        self.counts.get(field).copied().unwrap_or(0)
    }

    /// Total number of fallbacks across all fields.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, usize)> + '_ {
        self.counts.iter().map(|(k, v)| (*k, *v))
    }
}

/// Normalize a single raw record, discarding fallback bookkeeping.
pub fn normalize(raw: &Value) -> Doctor {
    normalize_tracked(raw, &mut FallbackLog::new())
}

/// Normalize a batch of raw records, accumulating fallbacks into `log`.
pub fn normalize_all(raw: &[Value], log: &mut FallbackLog) -> Vec<Doctor> {
    raw.iter().map(|record| normalize_tracked(record, log)).collect()
}

/// Normalize a single raw record. Never fails.
pub fn normalize_tracked(raw: &Value, log: &mut FallbackLog) -> Doctor {
    let clinic = raw.get("clinic");
    let address = clinic.and_then(|c| c.get("address"));
    let intro = text(raw, "doctor_introduction");

    let id = match identifier(raw.get("id")) {
        Some(id) => id,
        None => {
            log.record("id");
            Uuid::new_v4().to_string()
        }
    };

    let experience = match raw.get("experience").and_then(parse_experience) {
        Some(years) => years,
        None => {
            log.record("experience");
            0
        }
    };

    let fees = match raw.get("fees").and_then(parse_fees) {
        Some(fees) => fees,
        None => {
            log.record("fees");
            0
        }
    };

    let qualification = match intro.and_then(qualification_from_intro) {
        Some(q) => q,
        None => {
            log.record("qualification");
            DEFAULT_QUALIFICATION.to_string()
        }
    };

    let name = text(raw, "name").map(strip_title).unwrap_or_else(|| {
        log.record("name");
        String::new()
    });

    Doctor {
        id,
        name,
        speciality: specialities(raw.get("specialities")),
        experience,
        fees,
        consultation_type: resolve_consultation(
            flag(raw, "video_consult"),
            flag(raw, "in_clinic"),
        ),
        qualification,
        clinic_name: clinic.and_then(|c| text(c, "name")).unwrap_or_default().to_string(),
        location: address.and_then(|a| text(a, "locality")).unwrap_or_default().to_string(),
        full_address: full_address(address),
        introduction: intro.unwrap_or_default().to_string(),
        languages: string_list(raw.get("languages")),
        image_url: non_empty(text(raw, "photo")),
        clinic_logo: non_empty(address.and_then(|a| text(a, "logo_url"))),
    }
}

/// Leading integer of the first whitespace-separated token ("7 Years" → 7).
pub fn parse_experience(value: &Value) -> Option<u32> {
    match value {
        Value::String(s) => s.split_whitespace().next().and_then(leading_integer),
        other => whole_number(other),
    }
}

/// Fee text with the currency glyph and whitespace removed ("₹1200" → 1200).
pub fn parse_fees(value: &Value) -> Option<u32> {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            let stripped = trimmed.strip_prefix(CURRENCY_GLYPH).unwrap_or(trimmed);
            leading_integer(stripped.trim())
        }
        other => whole_number(other),
    }
}

/// Resolve the two upstream capability flags to a single mode.
///
/// Only an exclusive in-clinic flag yields [`ConsultationType::InClinic`];
/// every other combination, including both and neither, is video.
pub fn resolve_consultation(video: bool, in_clinic: bool) -> ConsultationType {
    match (video, in_clinic) {
        (false, true) => ConsultationType::InClinic,
        _ => ConsultationType::VideoConsult,
    }
}

pub fn strip_title(name: &str) -> String {
    name.strip_prefix(TITLE_PREFIX).unwrap_or(name).to_string()
}

/// Second comma-separated segment of the biography, trimmed.
pub fn qualification_from_intro(intro: &str) -> Option<String> {
    intro
        .split(',')
        .nth(1)
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
}

fn full_address(address: Option<&Value>) -> String {
    let Some(address) = address else {
        return String::new();
    };
    ["address_line1", "locality", "city"]
        .iter()
        .filter_map(|key| text(address, key))
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

fn leading_integer(token: &str) -> Option<u32> {
    let digits: String = token.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}

fn whole_number(value: &Value) -> Option<u32> {
    value.as_u64().and_then(|n| u32::try_from(n).ok())
}

fn identifier(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn specialities(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| text(item, "name"))
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn string_list(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn text<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    value.get(key).and_then(Value::as_str)
}

fn flag(value: &Value, key: &str) -> bool {
    value.get(key).and_then(Value::as_bool).unwrap_or(false)
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|s| !s.is_empty()).map(str::to_string)
}
