//! Doctor card rendering.

use std::fmt;

use crate::directory::doctor::Doctor;

/// Multi-line text card for one doctor.
pub struct DoctorCard<'a>(pub &'a Doctor);

impl fmt::Display for DoctorCard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = self.0;
        writeln!(f, "Dr. {}  ₹{}", d.name, d.fees)?;
        writeln!(f, "  {}", d.qualification)?;
        if !d.speciality.is_empty() {
            writeln!(f, "  {}", d.speciality.join(", "))?;
        }
        write!(f, "  {} yrs exp. | {}", d.experience, d.consultation_type)?;
        if !d.languages.is_empty() {
            write!(f, " | {}", d.languages.join(", "))?;
        }
        if !d.clinic_name.is_empty() || !d.full_address.is_empty() {
            write!(f, "\n  {}", clinic_line(d))?;
        }
        Ok(())
    }
}

fn clinic_line(d: &Doctor) -> String {
    match (d.clinic_name.is_empty(), d.full_address.is_empty()) {
        (false, false) => format!("{}, {}", d.clinic_name, d.full_address),
        (false, true) => d.clinic_name.clone(),
        _ => d.full_address.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::doctor::fixtures::doctor;

    #[test]
    fn test_full_card() {
        let mut d = doctor("Asha Rao", 500, 13);
        d.speciality = vec!["Dentist".into(), "ENT".into()];
        d.languages = vec!["English".into(), "Kannada".into()];
        d.clinic_name = "Smile Care".into();
        d.full_address = "12 MG Road, Bangalore".into();

        assert_eq!(
            DoctorCard(&d).to_string(),
            "Dr. Asha Rao  ₹500\n  MBBS\n  Dentist, ENT\n  13 yrs exp. | Video Consult | English, Kannada\n  Smile Care, 12 MG Road, Bangalore"
        );
    }

    #[test]
    fn test_sparse_card() {
        let d = doctor("Bob", 0, 0);
        assert_eq!(
            DoctorCard(&d).to_string(),
            "Dr. Bob  ₹0\n  MBBS\n  0 yrs exp. | Video Consult"
        );
    }
}
