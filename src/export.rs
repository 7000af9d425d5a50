//! Dataset export — the renderer boundary.
//!
//! The map renderer consumes one row per college: coordinates plus a
//! player list for the hover text. Players are `;`-joined so the list
//! stays a single CSV field.

use crate::geocode::types::ResolvedCollege;
use std::io::{self, Write};

const HEADER: &str = "college,latitude,longitude,players";

/// Write the resolved dataset as CSV.
pub fn write_csv(out: &mut impl Write, colleges: &[ResolvedCollege]) -> io::Result<()> {
    writeln!(out, "{}", HEADER)?;
    for c in colleges {
        writeln!(
            out,
            "{},{},{},{}",
            csv_field(&c.college),
            c.coords.lat,
            c.coords.lon,
            csv_field(&c.players.join("; ")),
        )?;
    }
    Ok(())
}

/// Quote a field if it contains a comma, quote, or newline.
fn csv_field(s: &str) -> String {
    if s.contains([',', '"', '\n']) {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
