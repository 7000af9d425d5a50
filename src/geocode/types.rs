//! Core types for the geocoding subsystem.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A point on Earth's surface, as reported by the geocoding provider.
/// No range validation is applied beyond what the provider returns.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// One (player, college) pair from the roster source.
///
/// Fields are raw as scraped; the coordinator trims the college name
/// before using it as a grouping or cache key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterEntry {
    pub player: String,
    pub college: String,
}

impl RosterEntry {
    pub fn new(player: impl Into<String>, college: impl Into<String>) -> Self {
        Self {
            player: player.into(),
            college: college.into(),
        }
    }
}

/// One college with its coordinates and the players who attended it,
/// in roster order. Rebuilt every run; handed to the renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedCollege {
    pub college: String,
    pub coords: Coordinates,
    pub players: Vec<String>,
}

/// Faults at the geocoding provider boundary.
#[derive(Debug)]
pub enum ProviderError {
    Network(String),
    InvalidResponse(String),
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network(msg) => write!(f, "network error: {}", msg),
            Self::InvalidResponse(msg) => write!(f, "invalid provider response: {}", msg),
        }
    }
}

impl std::error::Error for ProviderError {}

/// The single failure the resolver exposes. Provider outages, rate
/// limits, and no-match-on-any-candidate all collapse into this; the
/// caller treats them identically (skip the college, log, continue).
#[derive(Debug)]
pub struct ResolutionFailure {
    pub college: String,
    pub detail: String,
}

impl fmt::Display for ResolutionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "could not resolve '{}': {}", self.college, self.detail)
    }
}

impl std::error::Error for ResolutionFailure {}

/// Storage-layer faults. Unlike resolution failures these are fatal:
/// the run aborts rather than persisting partial state silently.
#[derive(Debug)]
pub enum CacheError {
    Io(std::io::Error),
    Corrupt(String),
}

impl fmt::Display for CacheError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "cache I/O error: {}", e),
            Self::Corrupt(msg) => write!(f, "cache file is corrupt: {}", msg),
        }
    }
}

impl std::error::Error for CacheError {}

impl From<std::io::Error> for CacheError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
