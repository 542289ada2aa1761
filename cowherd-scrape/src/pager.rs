//! Page-count recovery from the viewer's slider control.
//!
//! The viewer exposes a document's page count only inside the slider's
//! inline `onchange` script, as an integer after a `max:` marker. Parsing is
//! isolated here so it fails fast with its own error kind and can be tested
//! without a browser.

use crate::error::ScrapeError;
use crate::selectors::PAGE_COUNT_MARKER;

/// Extract the maximum page index from the slider's inline script.
pub fn parse_page_count(script: &str) -> Result<u32, ScrapeError> {
    let after = script
        .split_once(PAGE_COUNT_MARKER)
        .map(|(_, rest)| rest)
        .ok_or_else(|| control_broken(format!("script has no `{PAGE_COUNT_MARKER}` marker")))?;

    let digits: String = after
        .trim_start()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    if digits.is_empty() {
        return Err(control_broken(format!(
            "no digits after `{PAGE_COUNT_MARKER}` marker"
        )));
    }

    digits
        .parse::<u32>()
        .map_err(|e| control_broken(format!("page count out of range: {e}")))
}

fn control_broken(detail: String) -> ScrapeError {
    ScrapeError::PaginationControlNotFound(detail)
}
