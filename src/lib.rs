//! college-atlas — resolve a roster of (player, college) pairs to map
//! coordinates, with a persistent geocoding cache so repeat runs never
//! re-query a college already placed.

pub mod export;
pub mod geocode;
pub mod roster;
