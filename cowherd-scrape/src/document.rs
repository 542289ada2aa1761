//! Pagination driver: walks a document's pages and streams text to a sink.
//!
//! Two walk shapes exist. A *section* walk covers the contiguous id range
//! between one hierarchy link and the next greater one; a *whole-document*
//! walk covers pages `1..=max` where `max` comes from the viewer's slider
//! control. Both frame their output with the sink's document markers and
//! both survive individual pages that never render.

use std::time::Duration;

use tracing::{info, warn};

use crate::error::ScrapeError;
use crate::links::{self, next_boundary, normalize, page_id};
use crate::pager::parse_page_count;
use crate::session::ViewerSession;
use crate::sink::TextSink;

/// How a walk went: pages appended and pages skipped on timeout.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FetchReport {
    pub pages: u32,
    pub skipped: u32,
}

/// Walk the section starting at `start_id`.
///
/// The section's upper bound is the next greater id found among the page
/// links of `section_url`; with no greater id known, the section is a single
/// page at `start_id`. Ids are fetched strictly sequentially; a page whose
/// text never renders is logged and skipped without aborting the range.
pub async fn fetch_section(
    session: &mut dyn ViewerSession,
    section_url: &str,
    sink: &mut dyn TextSink,
    start_id: u64,
    page_timeout: Duration,
) -> Result<FetchReport, ScrapeError> {
    session.goto(section_url).await?;

    let ordered = normalize(session.page_links().await?);
    if ordered.is_empty() {
        warn!(
            target: "scrape.document",
            url = section_url,
            "{}; falling back to a single page",
            ScrapeError::EmptyLinkSet
        );
    }
    // The boundary id is strictly greater than `start_id`, so the
    // subtraction cannot underflow. An inclusive bound keeps the single-page
    // fallback intact even when `start_id` has no successor.
    let last_id = match next_boundary(start_id, &ordered) {
        Some(boundary) => boundary.id - 1,
        None => start_id,
    };

    let mut report = FetchReport::default();
    sink.begin_document()?;
    for id in start_id..=last_id {
        let page_url = links::with_page_id(&links::text_view_url(section_url), id);
        session.goto(&page_url).await?;
        match session.page_text(page_timeout).await {
            Ok(text) => {
                sink.append_page(&text)?;
                report.pages += 1;
            }
            Err(ScrapeError::PageLoadTimeout { url }) => {
                warn!(target: "scrape.document", %url, "page never rendered; skipping");
                report.skipped += 1;
            }
            Err(e) => return Err(e),
        }
        session.settle().await;
    }
    sink.end_document()?;

    info!(
        target: "scrape.document",
        url = section_url,
        pages = report.pages,
        skipped = report.skipped,
        "section fetched"
    );
    Ok(report)
}

/// Walk a document from page 1 through the count parsed off its slider.
///
/// Each cycle reads the rendered text and advances the viewer by one page;
/// the walk performs exactly `max` read-advance cycles. A missing slider
/// control, or one whose script carries no count, is fatal for the document.
pub async fn fetch_whole_document(
    session: &mut dyn ViewerSession,
    document_url: &str,
    sink: &mut dyn TextSink,
    page_timeout: Duration,
) -> Result<FetchReport, ScrapeError> {
    session.goto(&links::text_view_url(document_url)).await?;

    let script = session.pager_script().await?.ok_or_else(|| {
        ScrapeError::PaginationControlNotFound("no slider control in text view".to_string())
    })?;
    let max = parse_page_count(&script)?;

    let mut report = FetchReport::default();
    sink.begin_document()?;
    for index in 1..=max {
        match session.page_text(page_timeout).await {
            Ok(text) => {
                sink.append_page(&text)?;
                report.pages += 1;
            }
            Err(ScrapeError::PageLoadTimeout { url }) => {
                warn!(target: "scrape.document", %url, index, "page never rendered; skipping");
                report.skipped += 1;
            }
            Err(e) => return Err(e),
        }
        session.advance_page().await?;
        session.settle().await;
    }
    sink.end_document()?;

    info!(
        target: "scrape.document",
        url = document_url,
        pages = report.pages,
        skipped = report.skipped,
        "document fetched"
    );
    Ok(report)
}

/// Walk one document URL end to end.
///
/// A URL already carrying a page identifier is a section request starting at
/// that page; anything else is fetched whole.
pub async fn extract_document(
    session: &mut dyn ViewerSession,
    url: &str,
    sink: &mut dyn TextSink,
    page_timeout: Duration,
) -> Result<FetchReport, ScrapeError> {
    match page_id(url) {
        Ok(start_id) => fetch_section(session, url, sink, start_id, page_timeout).await,
        Err(_) => fetch_whole_document(session, url, sink, page_timeout).await,
    }
}
