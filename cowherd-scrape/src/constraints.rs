//! Title constraints deciding which hierarchy entries are worth scraping.

use regex::Regex;

/// Keyword and year filter over hierarchy item titles.
#[derive(Debug, Clone)]
pub struct TitleFilter {
    max_year: i32,
    all_files: bool,
    keywords: Vec<String>,
    year: Regex,
}

impl TitleFilter {
    pub fn new(max_year: i32, all_files: bool, keywords: &[String]) -> TitleFilter {
        TitleFilter {
            max_year,
            all_files,
            keywords: keywords.iter().map(|k| k.to_lowercase()).collect(),
            // Fixed literal pattern, cannot fail to compile.
            year: Regex::new(r"\d{4}").expect("static year pattern"),
        }
    }

    /// First four-digit run in the title, if any.
    pub fn extract_year(&self, title: &str) -> Option<i32> {
        self.year
            .find(title)
            .and_then(|m| m.as_str().parse::<i32>().ok())
    }

    fn has_keyword(&self, title: &str) -> bool {
        let lower = title.to_lowercase();
        self.keywords.iter().any(|k| lower.contains(k))
    }

    /// A title qualifies when it carries a year at or before the cutoff and,
    /// unless every file was requested, one of the keywords.
    pub fn satisfies(&self, title: &str) -> bool {
        let Some(year) = self.extract_year(title) else {
            return false;
        };
        if year > self.max_year {
            return false;
        }
        self.all_files || self.has_keyword(title)
    }
}
