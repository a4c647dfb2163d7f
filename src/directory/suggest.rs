//! Search-box suggestions.

use crate::directory::doctor::Doctor;

/// Maximum number of names offered under the search box.
pub const SUGGESTION_LIMIT: usize = 3;

/// Names containing `search` (case-insensitive), in list order.
///
/// An empty term matches every name, so the dropdown shows the first
/// entries of the list. Duplicate names are not collapsed.
pub fn suggestions(search: &str, doctors: &[Doctor]) -> Vec<String> {
    let needle = search.to_lowercase();
    doctors
        .iter()
        .filter(|d| d.name_contains(&needle))
        .map(|d| d.name.clone())
        .take(SUGGESTION_LIMIT)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::doctor::fixtures::doctor;

    fn roster() -> Vec<Doctor> {
        ["Anita Rao", "Ravi Kumar", "Arun Das", "Rahul Roy", "Priya Nair"]
            .iter()
            .map(|name| doctor(name, 100, 1))
            .collect()
    }

    #[test]
    fn test_never_more_than_limit() {
        let found = suggestions("a", &roster());
        assert_eq!(found.len(), SUGGESTION_LIMIT);
        assert_eq!(found, vec!["Anita Rao", "Ravi Kumar", "Arun Das"]);
    }

    #[test]
    fn test_empty_term_yields_first_names() {
        assert_eq!(
            suggestions("", &roster()),
            vec!["Anita Rao", "Ravi Kumar", "Arun Das"]
        );
    }

    #[test]
    fn test_case_insensitive_and_ordered() {
        assert_eq!(suggestions("RA", &roster()), vec!["Anita Rao", "Ravi Kumar", "Rahul Roy"]);
        assert_eq!(suggestions("nair", &roster()), vec!["Priya Nair"]);
        assert!(suggestions("zz", &roster()).is_empty());
    }

    #[test]
    fn test_duplicate_names_repeat() {
        let doctors = vec![doctor("Sam", 1, 1), doctor("Sam", 2, 2)];
        assert_eq!(suggestions("sam", &doctors), vec!["Sam", "Sam"]);
    }
}
