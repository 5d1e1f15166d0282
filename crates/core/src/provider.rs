use serde::{Deserialize, Serialize};

/// A care-facility candidate returned by the provider directory.
///
/// Providers are external entities; the navigator only consumes them. The
/// wire shape matches the directory payload (`acceptedInsurances` camelCase).
/// Coordinates are optional because the directory omits them for some
/// listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Provider {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lng: Option<f64>,
    #[serde(default)]
    pub phone: String,
    #[serde(default, rename = "acceptedInsurances")]
    pub accepted_insurances: Vec<String>,
}
