//! Name-candidate resolution against a geocoding provider.
//!
//! Roster data is inconsistent about college naming ("Alabama" vs
//! "University of Alabama" vs "Miami (FL)"), so each college is tried
//! as an ordered list of candidate spellings, stopping at the first
//! match. The raw name goes first so already-well-formed names like
//! "Ohio State" are never second-guessed with a suffix.

use super::provider::GeocodeProvider;
use super::types::{Coordinates, ProviderError, ResolutionFailure};

/// Resolves a college name to coordinates via candidate strategies.
pub struct GeocodeResolver<P: GeocodeProvider> {
    provider: P,
    /// Extra attempts per candidate after a network failure. Zero by
    /// default; an empty result is never retried.
    retries: u32,
}

impl<P: GeocodeProvider> GeocodeResolver<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            retries: 0,
        }
    }

    /// Retry each candidate's network failures up to `retries` extra
    /// times before moving on.
    pub fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    /// The candidate spellings tried for a college, in order.
    fn candidates(college: &str) -> [String; 3] {
        [
            college.to_string(),
            format!("{} University", college),
            format!("University of {}", college),
        ]
    }

    /// Resolve a college name. First candidate with a match wins;
    /// provider outages and no-match-anywhere both collapse into
    /// `ResolutionFailure` — the caller treats them identically.
    pub fn resolve(&self, college: &str) -> Result<Coordinates, ResolutionFailure> {
        let mut last_error: Option<ProviderError> = None;

        for candidate in Self::candidates(college) {
            match self.search_with_retries(&candidate) {
                Ok(Some(coords)) => return Ok(coords),
                Ok(None) => {}
                Err(e) => last_error = Some(e),
            }
        }

        let detail = match last_error {
            Some(e) => e.to_string(),
            None => "no candidate matched".to_string(),
        };
        Err(ResolutionFailure {
            college: college.to_string(),
            detail,
        })
    }

    fn search_with_retries(&self, candidate: &str) -> Result<Option<Coordinates>, ProviderError> {
        let mut attempt = 0;
        loop {
            match self.provider.search(candidate) {
                Ok(result) => return Ok(result),
                Err(e) => {
                    if attempt >= self.retries {
                        return Err(e);
                    }
                    attempt += 1;
                }
            }
        }
    }
}
