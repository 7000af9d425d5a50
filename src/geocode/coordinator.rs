//! Roster → resolved-college pipeline.
//!
//! Groups roster entries by college, answers each college from the
//! cache when possible, and only reaches for the geocoding provider on
//! a miss. New resolutions are written back before the college is
//! emitted, so a rerun over the same roster issues zero provider calls.

use super::cache::LocationCache;
use super::provider::GeocodeProvider;
use super::resolver::GeocodeResolver;
use super::types::{CacheError, ResolvedCollege, RosterEntry};

/// Outcome counters for one run, reported on stderr by the CLI.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunStats {
    pub cache_hits: usize,
    pub geocoded: usize,
    pub dropped: usize,
    pub skipped_entries: usize,
}

/// Owns the cache and resolver for the duration of one run. Both are
/// injected at construction; there is no ambient storage handle.
pub struct ResolutionCoordinator<P: GeocodeProvider> {
    cache: LocationCache,
    resolver: GeocodeResolver<P>,
    stats: RunStats,
}

impl<P: GeocodeProvider> ResolutionCoordinator<P> {
    pub fn new(cache: LocationCache, resolver: GeocodeResolver<P>) -> Self {
        Self {
            cache,
            resolver,
            stats: RunStats::default(),
        }
    }

    /// Resolve a roster into one record per college, in first-seen
    /// college order with players in roster order.
    ///
    /// A college the resolver cannot place is dropped along with its
    /// players — logged, not fatal. Only a cache storage fault aborts
    /// the run.
    pub fn resolve(
        &mut self,
        entries: &[RosterEntry],
    ) -> Result<Vec<ResolvedCollege>, CacheError> {
        self.stats = RunStats::default();

        // Group by trimmed college name, preserving discovery order.
        let mut order: Vec<String> = Vec::new();
        let mut groups: std::collections::HashMap<String, Vec<String>> =
            std::collections::HashMap::new();

        for entry in entries {
            let college = entry.college.trim();
            if college.is_empty() {
                eprintln!(
                    "  Warning: no college for player '{}', skipping entry",
                    entry.player
                );
                self.stats.skipped_entries += 1;
                continue;
            }
            let players = groups.entry(college.to_string()).or_insert_with(|| {
                order.push(college.to_string());
                Vec::new()
            });
            players.push(entry.player.clone());
        }

        let mut resolved = Vec::with_capacity(order.len());
        for college in order {
            let coords = match self.cache.lookup(&college) {
                Some(coords) => {
                    self.stats.cache_hits += 1;
                    coords
                }
                None => match self.resolver.resolve(&college) {
                    Ok(coords) => {
                        // Persist before emitting; a storage fault here
                        // aborts the run rather than losing the record.
                        self.cache.store(&college, coords)?;
                        self.stats.geocoded += 1;
                        coords
                    }
                    Err(failure) => {
                        eprintln!("  Warning: {}, dropping its players", failure);
                        self.stats.dropped += 1;
                        continue;
                    }
                },
            };

            let players = groups.remove(&college).unwrap_or_default();
            resolved.push(ResolvedCollege {
                college,
                coords,
                players,
            });
        }

        Ok(resolved)
    }

    pub fn stats(&self) -> RunStats {
        self.stats
    }

    /// Read access to the cache, mainly for post-run inspection.
    pub fn cache(&self) -> &LocationCache {
        &self.cache
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geocode::types::{Coordinates, ProviderError};
    use approx::assert_relative_eq;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use tempfile::TempDir;

    struct StubProvider {
        responses: HashMap<String, Coordinates>,
        calls: RefCell<usize>,
    }

    impl StubProvider {
        fn new() -> Self {
            Self {
                responses: HashMap::new(),
                calls: RefCell::new(0),
            }
        }

        fn with_match(mut self, query: &str, lat: f64, lon: f64) -> Self {
            self.responses
                .insert(query.to_string(), Coordinates { lat, lon });
            self
        }

        fn call_count(&self) -> usize {
            *self.calls.borrow()
        }
    }

    impl GeocodeProvider for &StubProvider {
        fn search(&self, place: &str) -> Result<Option<Coordinates>, ProviderError> {
            *self.calls.borrow_mut() += 1;
            Ok(self.responses.get(place).copied())
        }
    }

    fn coordinator<'a>(
        dir: &TempDir,
        stub: &'a StubProvider,
    ) -> ResolutionCoordinator<&'a StubProvider> {
        let cache = LocationCache::open(dir.path().join("cache.json")).unwrap();
        ResolutionCoordinator::new(cache, GeocodeResolver::new(stub))
    }

    fn roster(pairs: &[(&str, &str)]) -> Vec<RosterEntry> {
        pairs
            .iter()
            .map(|(p, c)| RosterEntry::new(*p, *c))
            .collect()
    }

    #[test]
    fn test_worked_example() {
        let dir = TempDir::new().unwrap();
        let stub = StubProvider::new()
            .with_match("Clemson", 34.6, -82.8)
            .with_match("Ohio State", 40.0, -83.0);
        let mut coord = coordinator(&dir, &stub);

        let out = coord
            .resolve(&roster(&[
                ("A. Smith", "Clemson"),
                ("B. Jones", "Clemson"),
                ("C. Lee", "Ohio State"),
            ]))
            .unwrap();

        assert_eq!(out.len(), 2);
        assert_eq!(out[0].college, "Clemson");
        assert_relative_eq!(out[0].coords.lat, 34.6, epsilon = 1e-9);
        assert_eq!(out[0].players, vec!["A. Smith", "B. Jones"]);
        assert_eq!(out[1].college, "Ohio State");
        assert_eq!(out[1].players, vec!["C. Lee"]);

        // Cache-fill invariant: both colleges are now persisted with
        // the coordinates used in the output.
        let cached = coord.cache().lookup("Clemson").unwrap();
        assert_relative_eq!(cached.lat, 34.6, epsilon = 1e-9);
        assert!(coord.cache().lookup("Ohio State").is_some());
    }

    #[test]
    fn test_grouping_preserves_roster_order() {
        let dir = TempDir::new().unwrap();
        let stub = StubProvider::new().with_match("Stanford", 37.4, -122.2);
        let mut coord = coordinator(&dir, &stub);

        let out = coord
            .resolve(&roster(&[
                ("First Player", "Stanford"),
                ("Second Player", "Stanford"),
            ]))
            .unwrap();

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].players, vec!["First Player", "Second Player"]);
    }

    #[test]
    fn test_trimmed_names_share_a_group() {
        let dir = TempDir::new().unwrap();
        let stub = StubProvider::new().with_match("Clemson", 34.6, -82.8);
        let mut coord = coordinator(&dir, &stub);

        let out = coord
            .resolve(&roster(&[("A", "Clemson"), ("B", "  Clemson  ")]))
            .unwrap();

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].players.len(), 2);
    }

    #[test]
    fn test_warm_cache_issues_zero_provider_calls() {
        let dir = TempDir::new().unwrap();
        let stub = StubProvider::new()
            .with_match("Clemson", 34.6, -82.8)
            .with_match("Ohio State", 40.0, -83.0);
        let entries = roster(&[("A. Smith", "Clemson"), ("C. Lee", "Ohio State")]);

        let mut coord = coordinator(&dir, &stub);
        let first = coord.resolve(&entries).unwrap();
        let calls_after_first = stub.call_count();
        assert!(calls_after_first > 0);

        // Fresh coordinator over the same persisted cache.
        let mut coord = coordinator(&dir, &stub);
        let second = coord.resolve(&entries).unwrap();

        assert_eq!(stub.call_count(), calls_after_first);
        assert_eq!(first, second);
        assert_eq!(coord.stats().cache_hits, 2);
        assert_eq!(coord.stats().geocoded, 0);
    }

    #[test]
    fn test_failed_college_is_dropped_not_fatal() {
        let dir = TempDir::new().unwrap();
        // "Atlantis Tech" matches no candidate form.
        let stub = StubProvider::new()
            .with_match("Clemson", 34.6, -82.8)
            .with_match("Ohio State", 40.0, -83.0);
        let mut coord = coordinator(&dir, &stub);

        let out = coord
            .resolve(&roster(&[
                ("A", "Clemson"),
                ("B", "Atlantis Tech"),
                ("C", "Ohio State"),
            ]))
            .unwrap();

        assert_eq!(out.len(), 2);
        assert!(out.iter().all(|r| r.college != "Atlantis Tech"));
        assert_eq!(coord.stats().dropped, 1);
        // The failed college is not cached.
        assert!(coord.cache().lookup("Atlantis Tech").is_none());
    }

    #[test]
    fn test_empty_college_name_skipped_with_warning() {
        let dir = TempDir::new().unwrap();
        let stub = StubProvider::new().with_match("Clemson", 34.6, -82.8);
        let mut coord = coordinator(&dir, &stub);

        let out = coord
            .resolve(&roster(&[("A", "Clemson"), ("B", "   "), ("C", "")]))
            .unwrap();

        assert_eq!(out.len(), 1);
        assert_eq!(coord.stats().skipped_entries, 2);
        // Nothing grouped under an empty key.
        assert!(coord.cache().lookup("").is_none());
    }

    #[test]
    fn test_discovery_order_kept_across_colleges() {
        let dir = TempDir::new().unwrap();
        let stub = StubProvider::new()
            .with_match("Oregon", 44.0, -123.1)
            .with_match("Clemson", 34.6, -82.8)
            .with_match("Stanford", 37.4, -122.2);
        let mut coord = coordinator(&dir, &stub);

        let out = coord
            .resolve(&roster(&[
                ("A", "Oregon"),
                ("B", "Clemson"),
                ("C", "Stanford"),
                ("D", "Oregon"),
            ]))
            .unwrap();

        let colleges: Vec<&str> = out.iter().map(|r| r.college.as_str()).collect();
        assert_eq!(colleges, vec!["Oregon", "Clemson", "Stanford"]);
    }
}
