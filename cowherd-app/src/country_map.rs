//! Country code map loaded from a small CSV file.
//!
//! The collection addresses countries by numeric code, which is useless on a
//! command line without the matching name. Operators keep a `code,name,all_files`
//! CSV next to the binary and the `links` command resolves codes through it.

use std::fs;
use std::path::Path;

use cowherd_common::CowherdError;

/// One row of the country map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryRow {
    pub code: u32,
    pub name: String,
    /// When set, the country's catalog keeps every dated file.
    pub all_files: bool,
}

/// Reads the map file and returns the row for `code`.
pub fn lookup(path: &Path, code: u32) -> cowherd_common::Result<CountryRow> {
    let raw = fs::read_to_string(path).map_err(|e| {
        CowherdError::Config(format!("cannot read country map {}: {e}", path.display()))
    })?;
    let rows = parse(&raw)?;
    rows.into_iter().find(|row| row.code == code).ok_or_else(|| {
        CowherdError::Config(format!(
            "country code {code} not present in {}",
            path.display()
        ))
    })
}

fn parse(raw: &str) -> cowherd_common::Result<Vec<CountryRow>> {
    let mut rows = Vec::new();
    for cells in parse_rows(raw) {
        if cells.is_empty() || cells.iter().all(|c| c.trim().is_empty()) {
            continue;
        }
        // Header row carries column names instead of a numeric code.
        if cells[0].trim().eq_ignore_ascii_case("code") {
            continue;
        }
        let code = cells[0].trim().parse::<u32>().map_err(|_| {
            CowherdError::Config(format!("bad country code cell: {:?}", cells[0]))
        })?;
        let name = cells.get(1).map(|c| c.trim().to_string()).unwrap_or_default();
        let all_files = cells.get(2).map(|c| parse_flag(c)).unwrap_or(false);
        rows.push(CountryRow { code, name, all_files });
    }
    Ok(rows)
}

fn parse_flag(cell: &str) -> bool {
    matches!(cell.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes")
}

/// Splits CSV text into rows of cells.
///
/// Handles double-quoted cells with embedded commas and `""` escapes, plus
/// CRLF line endings. Quotes that do not wrap a whole cell pass through as
/// literal characters.
fn parse_rows(raw: &str) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut cell = String::new();
    let mut in_quotes = false;

    let mut chars = raw.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    cell.push('"');
                } else {
                    in_quotes = false;
                }
            }
            '"' if cell.is_empty() => in_quotes = true,
            ',' if !in_quotes => row.push(std::mem::take(&mut cell)),
            '\r' if !in_quotes => {}
            '\n' if !in_quotes => {
                row.push(std::mem::take(&mut cell));
                rows.push(std::mem::take(&mut row));
            }
            _ => cell.push(ch),
        }
    }
    if !cell.is_empty() || !row.is_empty() {
        row.push(cell);
        rows.push(row);
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAP: &str = "code,country,all_files\n\
                       86,\"Eastasia, Federal Republic of\",0\n\
                       101,Oceania,1\n";

    #[test]
    fn parses_quoted_names_and_skips_the_header() {
        let rows = parse(MAP).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].code, 86);
        assert_eq!(rows[0].name, "Eastasia, Federal Republic of");
        assert!(!rows[0].all_files);
        assert!(rows[1].all_files);
    }

    #[test]
    fn flag_cell_accepts_common_spellings() {
        assert!(parse_flag("1"));
        assert!(parse_flag(" true "));
        assert!(parse_flag("YES"));
        assert!(!parse_flag("0"));
        assert!(!parse_flag(""));
    }

    #[test]
    fn lookup_resolves_known_codes_and_rejects_unknown_ones() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("country_codes.csv");
        fs::write(&path, MAP).unwrap();

        let row = lookup(&path, 86).unwrap();
        assert_eq!(row.name, "Eastasia, Federal Republic of");

        let err = lookup(&path, 7).unwrap_err();
        assert!(err.to_string().contains("country code 7 not present"));
    }

    #[test]
    fn bad_code_cell_is_rejected() {
        let err = parse("code,country\nseven,Oceania\n").unwrap_err();
        assert!(err.to_string().contains("bad country code cell"));
    }

    #[test]
    fn escaped_quotes_survive() {
        let rows = parse_rows("86,\"the \"\"basic\"\" law\"\n");
        assert_eq!(rows[0][1], "the \"basic\" law");
    }
}
