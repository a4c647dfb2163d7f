//! Canonical doctor record.

use serde::{Deserialize, Serialize};

/// How a doctor can be consulted.
///
/// A doctor carries exactly one mode; records flagged for both (or neither)
/// resolve to [`ConsultationType::VideoConsult`] during normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConsultationType {
    #[serde(rename = "Video Consult")]
    VideoConsult,
    #[serde(rename = "In Clinic")]
    InClinic,
}

impl ConsultationType {
    /// Label used in query strings and on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            ConsultationType::VideoConsult => "Video Consult",
            ConsultationType::InClinic => "In Clinic",
        }
    }

    /// Parse a wire label. Unknown labels yield `None`.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Video Consult" => Some(ConsultationType::VideoConsult),
            "In Clinic" => Some(ConsultationType::InClinic),
            _ => None,
        }
    }
}

impl std::fmt::Display for ConsultationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A practitioner as shown in the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Doctor {
    /// Opaque identifier; random when the source omitted one.
    pub id: String,
    /// Display name without the "Dr. " title.
    pub name: String,
    /// Speciality labels in source order.
    pub speciality: Vec<String>,
    /// Years of experience.
    pub experience: u32,
    /// Consultation fee in whole currency units.
    pub fees: u32,
    pub consultation_type: ConsultationType,
    pub qualification: String,
    pub clinic_name: String,
    pub location: String,
    pub full_address: String,
    pub introduction: String,
    pub languages: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clinic_logo: Option<String>,
}

impl Doctor {
    /// True if the doctor lists any of the given specialities.
    pub fn has_any_speciality(&self, wanted: &[String]) -> bool {
        self.speciality.iter().any(|s| wanted.contains(s))
    }

    /// Case-insensitive substring match on the display name.
    pub fn name_contains(&self, needle_lower: &str) -> bool {
        self.name.to_lowercase().contains(needle_lower)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_consultation_labels() {
        assert_eq!(ConsultationType::from_label("In Clinic"), Some(ConsultationType::InClinic));
        assert_eq!(ConsultationType::from_label("Video Consult"), Some(ConsultationType::VideoConsult));
        assert_eq!(ConsultationType::from_label("video consult"), None);
        assert_eq!(ConsultationType::InClinic.to_string(), "In Clinic");
    }

    #[test]
    fn test_serializes_camel_case_and_skips_absent_urls() {
        let doctor = fixtures::doctor("Alice", 100, 5);
        let json = serde_json::to_value(&doctor).unwrap();

        assert_eq!(json["consultationType"], "Video Consult");
        assert_eq!(json["clinicName"], "");
        assert!(json.get("imageUrl").is_none());
        assert!(json.get("clinicLogo").is_none());
    }

    #[test]
    fn test_name_contains_expects_lowercase_needle() {
        let doctor = fixtures::doctor("Alice Smith", 100, 5);
        assert!(doctor.name_contains("smi"));
        assert!(!doctor.name_contains("SMI"));
    }
}
