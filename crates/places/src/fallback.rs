//! Pre-baked provider dataset.
//!
//! When the provider directory is unreachable the navigator substitutes this
//! fixed Santa Monica list rather than blocking or surfacing an error to the
//! user. Facilities carry a type (and optionally a specialty) so the list can
//! be narrowed by the same provider keyword used for directory queries.

use navigator_core::Provider;

struct StaticProvider {
    id: &'static str,
    name: &'static str,
    kind: &'static str,
    specialty: Option<&'static str>,
    address: &'static str,
    lat: f64,
    lng: f64,
    phone: &'static str,
    accepted_insurances: &'static [&'static str],
}

const STATIC_PROVIDERS: [StaticProvider; 4] = [
    StaticProvider {
        id: "ucla_er",
        name: "UCLA Santa Monica Medical Center",
        kind: "ER",
        specialty: None,
        address: "1250 16th St, Santa Monica, CA",
        lat: 34.0194,
        lng: -118.4896,
        phone: "+1-310-319-xxx",
        accepted_insurances: &["Medicare", "Aetna", "Blue Cross"],
    },
    StaticProvider {
        id: "sm_primary_ocean",
        name: "Santa Monica Primary Care - Ocean Ave",
        kind: "Primary Care",
        specialty: None,
        address: "200 Ocean Ave, Santa Monica, CA",
        lat: 34.0115,
        lng: -118.4921,
        phone: "+1-310-555-1212",
        accepted_insurances: &["Aetna", "Blue Cross", "UHC"],
    },
    StaticProvider {
        id: "sm_urgent",
        name: "Santa Monica Urgent Care",
        kind: "Urgent Care",
        specialty: None,
        address: "1800 Wilshire Blvd, Santa Monica, CA",
        lat: 34.0396,
        lng: -118.4413,
        phone: "+1-310-555-9876",
        accepted_insurances: &["Aetna", "UHC"],
    },
    StaticProvider {
        id: "ortho_sm",
        name: "Orthopedics of Santa Monica",
        kind: "Specialty",
        specialty: Some("Orthopedics"),
        address: "930 Broadway, Santa Monica, CA",
        lat: 34.0312,
        lng: -118.4466,
        phone: "+1-310-555-3333",
        accepted_insurances: &["Blue Cross", "UHC"],
    },
];

impl StaticProvider {
    fn matches_keyword(&self, keyword: &str) -> bool {
        self.kind.eq_ignore_ascii_case(keyword)
            || self.kind.to_lowercase().contains(keyword)
            || self.name.to_lowercase().contains(keyword)
            || self
                .specialty
                .is_some_and(|s| s.to_lowercase().contains(keyword))
    }

    fn to_provider(&self) -> Provider {
        Provider {
            id: self.id.to_string(),
            name: self.name.to_string(),
            address: self.address.to_string(),
            lat: Some(self.lat),
            lng: Some(self.lng),
            phone: self.phone.to_string(),
            accepted_insurances: self
                .accepted_insurances
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

/// Returns the static provider list narrowed by `keyword` (facility type,
/// name or specialty, case-insensitive). A blank keyword, or one matching
/// nothing, returns the whole list; the fallback must always produce a
/// usable set of candidates.
pub fn static_fallback(keyword: &str) -> Vec<Provider> {
    let kw = keyword.trim().to_lowercase();
    if kw.is_empty() {
        return STATIC_PROVIDERS.iter().map(|p| p.to_provider()).collect();
    }

    let filtered: Vec<Provider> = STATIC_PROVIDERS
        .iter()
        .filter(|p| p.matches_keyword(&kw))
        .map(|p| p.to_provider())
        .collect();

    if filtered.is_empty() {
        return STATIC_PROVIDERS.iter().map(|p| p.to_provider()).collect();
    }
    filtered
}
