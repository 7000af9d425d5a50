//! Geocoding providers. Nominatim is the real one; tests substitute
//! stubs through the `GeocodeProvider` trait.

use super::types::{Coordinates, ProviderError};
use serde::Deserialize;

/// A geocoding backend: free-text place name in, at most one best
/// match out. `Ok(None)` means the provider had no match; `Err` means
/// the provider itself failed.
pub trait GeocodeProvider {
    fn search(&self, place: &str) -> Result<Option<Coordinates>, ProviderError>;
}

// ─── Nominatim ──────────────────────────────────────────────────

#[derive(Deserialize)]
struct NominatimResult {
    // Nominatim returns lat/lon as strings.
    lat: String,
    lon: String,
}

/// OpenStreetMap Nominatim, queried for a single best match.
pub struct NominatimProvider {
    endpoint: String,
    user_agent: String,
    timeout: std::time::Duration,
}

impl NominatimProvider {
    pub fn new() -> Self {
        Self {
            endpoint: "https://nominatim.openstreetmap.org/search".into(),
            user_agent: format!("college-atlas/{}", env!("CARGO_PKG_VERSION")),
            timeout: std::time::Duration::from_secs(10),
        }
    }

    /// Point at a different endpoint (for testing against a local stub).
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Self::new()
        }
    }
}

impl Default for NominatimProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl GeocodeProvider for NominatimProvider {
    fn search(&self, place: &str) -> Result<Option<Coordinates>, ProviderError> {
        let url = format!(
            "{}?q={}&format=json&limit=1&addressdetails=0",
            self.endpoint,
            urlencod(place),
        );

        let response = ureq::get(&url)
            .set("User-Agent", &self.user_agent)
            .timeout(self.timeout)
            .call()
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        let results: Vec<NominatimResult> = response
            .into_json()
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;

        let Some(top) = results.into_iter().next() else {
            return Ok(None);
        };

        let lat: f64 = top
            .lat
            .parse()
            .map_err(|_| ProviderError::InvalidResponse(format!("bad lat '{}'", top.lat)))?;
        let lon: f64 = top
            .lon
            .parse()
            .map_err(|_| ProviderError::InvalidResponse(format!("bad lon '{}'", top.lon)))?;

        Ok(Some(Coordinates { lat, lon }))
    }
}

// ─── URL encoding (minimal, no extra dep) ───────────────────────

fn urlencod(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            ' ' => "%20".to_string(),
            '&' => "%26".to_string(),
            '=' => "%3D".to_string(),
            '+' => "%2B".to_string(),
            ',' => "%2C".to_string(),
            _ if c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.' || c == '~' => {
                c.to_string()
            }
            _ => format!("%{:02X}", c as u32),
        })
        .collect()
}
