//! Text presentation of directory results.
//!
//! Mirrors what the listing page shows: a result heading, the active sort
//! label and one card per doctor.

pub mod card;

pub use card::DoctorCard;

use crate::directory::filter::SortKey;

/// "{n} Doctors Found", singular for exactly one.
pub fn results_heading(count: usize) -> String {
    if count == 1 {
        "1 Doctor Found".to_string()
    } else {
        format!("{count} Doctors Found")
    }
}

/// Label for the "Sorted by" hint; `None` when unsorted.
pub fn sort_label(key: SortKey) -> Option<&'static str> {
    match key {
        SortKey::None => None,
        SortKey::Fees => Some("Fees"),
        SortKey::Experience => Some("Experience"),
    }
}
