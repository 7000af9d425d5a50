//! College geocoding subsystem.
//!
//! The persistent cache, the candidate-name resolver over a geocoding
//! provider, and the coordinator that turns roster pairs into one
//! located record per college.

pub mod cache;
pub mod coordinator;
pub mod provider;
pub mod resolver;
pub mod types;

pub use cache::LocationCache;
pub use coordinator::{ResolutionCoordinator, RunStats};
pub use provider::{GeocodeProvider, NominatimProvider};
pub use resolver::GeocodeResolver;
pub use types::{CacheError, Coordinates, ProviderError, ResolutionFailure, ResolvedCollege, RosterEntry};
