//! Speciality catalogue.

use std::collections::BTreeSet;

use crate::directory::doctor::Doctor;

/// Specialities offered as checkboxes in the filter panel.
pub const AVAILABLE_SPECIALITIES: [&str; 24] = [
    "General Physician",
    "Dentist",
    "Dermatologist",
    "Paediatrician",
    "Gynaecologist",
    "ENT",
    "Diabetologist",
    "Cardiologist",
    "Physiotherapist",
    "Endocrinologist",
    "Orthopaedic",
    "Ophthalmologist",
    "Gastroenterologist",
    "Pulmonologist",
    "Psychiatrist",
    "Urologist",
    "Dietitian/Nutritionist",
    "Psychologist",
    "Sexologist",
    "Nephrologist",
    "Neurologist",
    "Oncologist",
    "Ayurveda",
    "Homeopath",
];

/// Every speciality present in `doctors`, deduplicated and sorted.
pub fn unique_specialities(doctors: &[Doctor]) -> Vec<String> {
    doctors
        .iter()
        .flat_map(|d| d.speciality.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::doctor::fixtures::doctor;

    #[test]
    fn test_unique_specialities_sorted() {
        let mut a = doctor("A", 1, 1);
        a.speciality = vec!["ENT".into(), "Dentist".into()];
        let mut b = doctor("B", 1, 1);
        b.speciality = vec!["Dentist".into(), "Ayurveda".into()];

        assert_eq!(unique_specialities(&[a, b]), vec!["Ayurveda", "Dentist", "ENT"]);
        assert!(unique_specialities(&[]).is_empty());
    }

    #[test]
    fn test_available_labels_are_query_safe() {
        // Labels are comma-joined in the URL.
        assert!(AVAILABLE_SPECIALITIES.iter().all(|s| !s.contains(',')));
    }
}
