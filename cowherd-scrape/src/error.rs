use thiserror::Error;

/// Errors raised while reconstructing and walking a document's page sequence.
///
/// Page-level kinds (`MalformedLink`, `PageLoadTimeout`) are contained by the
/// pagination driver; the rest abort the current document and surface to the
/// orchestrating caller.
#[derive(Error, Debug)]
pub enum ScrapeError {
    /// The URL carries no parseable page identifier.
    #[error("malformed page link (no usable id parameter): {url}")]
    MalformedLink { url: String },

    /// The page's text element never rendered within the timeout.
    #[error("page load timed out: {url}")]
    PageLoadTimeout { url: String },

    /// The viewer's pagination control, or its page count, is missing.
    #[error("pagination control not found: {0}")]
    PaginationControlNotFound(String),

    /// A rendered page exposed no usable page links at all.
    #[error("no usable page links on the rendered page")]
    EmptyLinkSet,

    /// The WebDriver session failed underneath us.
    #[error("browser session error: {0}")]
    Session(#[from] anyhow::Error),

    /// The output sink could not be written.
    #[error("sink I/O error: {0}")]
    Io(#[from] std::io::Error),
}
