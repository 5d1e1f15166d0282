//! Insurance post-filter over provider candidates.
//!
//! Matching is deliberately loose: a provider is kept when any accepted
//! insurance contains the query as a case-insensitive substring. Exact
//! matching would silently empty results on trivial naming differences
//! ("Blue Cross" vs "Blue Cross PPO").

use crate::Provider;

/// Narrows `providers` to those accepting `insurance`.
///
/// A blank query returns the input unchanged. Broadening an empty result back
/// to the full list is the caller's policy; see [`narrow_with_broadening`].
pub fn filter_by_insurance(providers: &[Provider], insurance: &str) -> Vec<Provider> {
    let query = insurance.trim().to_lowercase();
    if query.is_empty() {
        return providers.to_vec();
    }

    providers
        .iter()
        .filter(|p| {
            p.accepted_insurances
                .iter()
                .any(|accepted| accepted.to_lowercase().contains(&query))
        })
        .cloned()
        .collect()
}

/// Applies the insurance filter with the caller-level broadening policy: if
/// filtering empties the list, the unfiltered candidates are returned rather
/// than "no providers".
pub fn narrow_with_broadening(providers: Vec<Provider>, insurance: &str) -> Vec<Provider> {
    let filtered = filter_by_insurance(&providers, insurance);
    if filtered.is_empty() && !providers.is_empty() {
        tracing::debug!(
            insurance,
            "insurance filter matched no providers, broadening to unfiltered list"
        );
        return providers;
    }
    filtered
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider(id: &str, accepted: &[&str]) -> Provider {
        Provider {
            id: id.to_string(),
            name: format!("Provider {id}"),
            address: String::new(),
            lat: None,
            lng: None,
            phone: String::new(),
            accepted_insurances: accepted.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_blank_insurance_returns_input_unchanged() {
        let providers = vec![provider("a", &["Aetna"]), provider("b", &[])];
        assert_eq!(filter_by_insurance(&providers, ""), providers);
        assert_eq!(filter_by_insurance(&providers, "   "), providers);
    }

    #[test]
    fn test_substring_match_is_case_insensitive() {
        let providers = vec![provider("a", &["Blue Cross"]), provider("b", &["UHC"])];
        let filtered = filter_by_insurance(&providers, "blue");
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, "a");
    }

    #[test]
    fn test_no_match_yields_empty_list() {
        let providers = vec![provider("a", &["Blue Cross"])];
        assert!(filter_by_insurance(&providers, "zzz").is_empty());
    }

    #[test]
    fn test_broadening_restores_unfiltered_list() {
        let providers = vec![provider("a", &["Blue Cross"]), provider("b", &["Aetna"])];
        let result = narrow_with_broadening(providers.clone(), "zzz");
        assert_eq!(result, providers);
    }

    #[test]
    fn test_broadening_keeps_non_empty_filtered_result() {
        let providers = vec![provider("a", &["Blue Cross"]), provider("b", &["Aetna"])];
        let result = narrow_with_broadening(providers, "aetna");
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, "b");
    }

    #[test]
    fn test_broadening_of_empty_input_stays_empty() {
        let result = narrow_with_broadening(Vec::new(), "aetna");
        assert!(result.is_empty());
    }
}
