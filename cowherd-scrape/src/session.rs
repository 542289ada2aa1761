//! Capability object over the rendered document viewer.
//!
//! The pagination driver in [`crate::document`] only ever borrows a
//! [`ViewerSession`]; constructing and closing the underlying browser is the
//! caller's business. That keeps the core free of driver state and lets
//! tests substitute an in-memory viewer.

use std::time::Duration;

use async_trait::async_trait;
use cowherd_drivers::cowherd_browser::page::CowherdPage;
use fantoccini::error::CmdError;

use crate::error::ScrapeError;
use crate::selectors::{PAGE_FORWARD, PAGE_LINE, PAGE_SLIDER, PAGE_TEXT};

/// One owned, stateful viewer session. Never shared across concurrent
/// extractions.
#[async_trait]
pub trait ViewerSession: Send {
    /// Navigate the session to `url`.
    async fn goto(&mut self, url: &str) -> Result<(), ScrapeError>;

    /// Hrefs of all candidate page links on the current page, in DOM order.
    async fn page_links(&mut self) -> Result<Vec<String>, ScrapeError>;

    /// Text of the currently rendered page, waiting at most `timeout` for
    /// the text element. A text element that never appears maps to
    /// [`ScrapeError::PageLoadTimeout`].
    async fn page_text(&mut self, timeout: Duration) -> Result<String, ScrapeError>;

    /// Inline script of the pagination control, if the control exists.
    async fn pager_script(&mut self) -> Result<Option<String>, ScrapeError>;

    /// Advance the text view by one page.
    async fn advance_page(&mut self) -> Result<(), ScrapeError>;

    /// Pause between navigations.
    async fn settle(&mut self);
}

/// Viewer session backed by a live WebDriver page.
pub struct WebDriverViewer {
    page: CowherdPage,
    current_url: String,
}

impl WebDriverViewer {
    pub fn new(page: CowherdPage) -> WebDriverViewer {
        WebDriverViewer {
            page,
            current_url: String::new(),
        }
    }
}

#[async_trait]
impl ViewerSession for WebDriverViewer {
    async fn goto(&mut self, url: &str) -> Result<(), ScrapeError> {
        self.page.goto(url).await?;
        self.current_url = url.to_string();
        Ok(())
    }

    async fn page_links(&mut self) -> Result<Vec<String>, ScrapeError> {
        let mut hrefs = Vec::new();
        for line in self.page.find_elements(PAGE_LINE).await? {
            let Some(anchor) = line.try_find("a").await? else {
                continue;
            };
            if let Some(href) = anchor.get_attribute("href").await? {
                hrefs.push(href);
            }
        }
        Ok(hrefs)
    }

    async fn page_text(&mut self, timeout: Duration) -> Result<String, ScrapeError> {
        match self.page.wait_for_element(PAGE_TEXT, timeout).await {
            Ok(element) => Ok(element.get_inner_text().await?),
            Err(e) if is_wait_timeout(&e) => Err(ScrapeError::PageLoadTimeout {
                url: self.current_url.clone(),
            }),
            Err(e) => Err(ScrapeError::Session(e)),
        }
    }

    async fn pager_script(&mut self) -> Result<Option<String>, ScrapeError> {
        let Some(slider) = self.page.try_find(PAGE_SLIDER).await? else {
            return Ok(None);
        };
        Ok(slider.get_attribute("onchange").await?)
    }

    async fn advance_page(&mut self) -> Result<(), ScrapeError> {
        let Some(control) = self.page.try_find(PAGE_FORWARD).await? else {
            return Err(ScrapeError::PaginationControlNotFound(
                "advance control missing from text view".to_string(),
            ));
        };
        control.click().await?;
        Ok(())
    }

    async fn settle(&mut self) {
        self.page.settle().await;
    }
}

fn is_wait_timeout(e: &anyhow::Error) -> bool {
    matches!(e.downcast_ref::<CmdError>(), Some(CmdError::WaitTimeout))
}
