//! Output naming and provenance helpers shared by the commands.

use chrono::Utc;

/// Turns a document or version title into a filesystem-safe slug.
///
/// Whitespace runs collapse to single underscores and anything that is not
/// alphanumeric is dropped, so `"Constitution of 1987 (as Amended)"` becomes
/// `"Constitution_of_1987_as_Amended"`.
pub fn slugify(title: &str) -> String {
    let joined = title.split_whitespace().collect::<Vec<_>>().join("_");
    let mut slug: String = joined
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_')
        .collect();
    while slug.contains("__") {
        slug = slug.replace("__", "_");
    }
    slug.trim_matches('_').to_string()
}

/// Provenance header written at the top of every extracted text file.
pub fn version_header(
    country: &str,
    document: &str,
    year: Option<i32>,
    version: &str,
    url: &str,
) -> String {
    let year = year.map(|y| y.to_string()).unwrap_or_else(|| "unknown".to_string());
    format!(
        "Country: {country}\nDocument: {document}\nYear: {year}\nVersion: {version}\nSource: {url}\nRetrieved: {}\n",
        Utc::now().to_rfc3339()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_drops_punctuation_and_collapses_runs() {
        assert_eq!(
            slugify("Constitution of 1987 (as Amended)"),
            "Constitution_of_1987_as_Amended"
        );
        assert_eq!(slugify("  Basic   Law  "), "Basic_Law");
        assert_eq!(slugify("Charter: 1991 / consolidated"), "Charter_1991_consolidated");
    }

    #[test]
    fn header_lists_every_provenance_line() {
        let header = version_header(
            "Eastasia",
            "Constitution of 1987",
            Some(1987),
            "Original Text",
            "https://example.org/HOL/Page?id=3",
        );
        assert!(header.starts_with("Country: Eastasia\n"));
        assert!(header.contains("Year: 1987\n"));
        assert!(header.contains("Version: Original Text\n"));
        assert!(header.contains("Retrieved: "));
    }

    #[test]
    fn missing_year_reads_unknown() {
        let header = version_header("Eastasia", "Basic Law", None, "Original Text", "u");
        assert!(header.contains("Year: unknown\n"));
    }
}
