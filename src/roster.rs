//! Roster intake — the scraper boundary.
//!
//! The scraping step lives outside this crate; it hands over a CSV of
//! `player,college` rows. Quoted fields are supported since player
//! names can contain commas ("Smith, Jr."). A leading header row is
//! tolerated and skipped.

use crate::geocode::types::RosterEntry;
use std::fmt;
use std::fs;
use std::path::Path;

#[derive(Debug)]
pub enum RosterError {
    Io(std::io::Error),
    Malformed { line: usize, reason: String },
}

impl fmt::Display for RosterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "cannot read roster: {}", e),
            Self::Malformed { line, reason } => {
                write!(f, "malformed roster line {}: {}", line, reason)
            }
        }
    }
}

impl std::error::Error for RosterError {}

impl From<std::io::Error> for RosterError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

/// Read roster entries from a CSV file.
pub fn read_csv(path: &Path) -> Result<Vec<RosterEntry>, RosterError> {
    parse(&fs::read_to_string(path)?)
}

/// Parse `player,college` CSV content. Entries come back in file
/// order; fields are kept raw (the coordinator trims).
pub fn parse(content: &str) -> Result<Vec<RosterEntry>, RosterError> {
    let mut entries = Vec::new();

    for (idx, line) in content.lines().enumerate() {
        let line_no = idx + 1;
        if line.trim().is_empty() {
            continue;
        }
        let fields = split_csv_line(line).map_err(|reason| RosterError::Malformed {
            line: line_no,
            reason,
        })?;
        if fields.len() != 2 {
            return Err(RosterError::Malformed {
                line: line_no,
                reason: format!("expected 2 fields, got {}", fields.len()),
            });
        }
        // Header row from the scraper, if present.
        if idx == 0 && fields[0].eq_ignore_ascii_case("player") {
            continue;
        }
        entries.push(RosterEntry::new(fields[0].clone(), fields[1].clone()));
    }

    Ok(entries)
}

/// Split one CSV line, honoring double-quoted fields with `""` escapes.
fn split_csv_line(line: &str) -> Result<Vec<String>, String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut chars = line.chars().peekable();
    let mut in_quotes = false;

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            }
            '"' if field.is_empty() => in_quotes = true,
            '"' => return Err("stray quote inside unquoted field".into()),
            ',' if !in_quotes => {
                fields.push(std::mem::take(&mut field));
            }
            _ => field.push(c),
        }
    }

    if in_quotes {
        return Err("unterminated quoted field".into());
    }
    fields.push(field);
    Ok(fields)
}
