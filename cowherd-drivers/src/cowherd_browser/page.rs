use crate::cowherd_browser::pacing::Pacing;
use anyhow::Result;
use fantoccini::{elements::Element, Client, Locator};
use std::time::Duration;

/// High-level page wrapper providing element queries with pacing applied.
pub struct CowherdPage {
    pub(crate) client: Client,
    pub(crate) pacing: Pacing,
}

impl CowherdPage {
    /// Construct a page wrapper around an existing WebDriver client.
    pub fn new(client: Client, pacing: Pacing) -> Self {
        Self { client, pacing }
    }

    /// Navigate to `url`.
    pub async fn goto(&mut self, url: &str) -> Result<()> {
        self.pacing.delay(300, 1200).await;
        self.client.goto(url).await.map_err(anyhow::Error::from)?;
        Ok(())
    }

    /// Find a single element by CSS selector, waiting at most `timeout`.
    ///
    /// A timeout surfaces as `fantoccini::error::CmdError::WaitTimeout`
    /// inside the returned error; callers that need to distinguish a slow
    /// page from a broken session can downcast for it.
    pub async fn wait_for_element(
        &self,
        selector: &str,
        timeout: Duration,
    ) -> Result<CowherdElement> {
        let element = self
            .client
            .wait()
            .at_most(timeout)
            .for_element(Locator::Css(selector))
            .await?;
        Ok(CowherdElement::new(element, &self.pacing))
    }

    /// Find zero or more elements by CSS selector, without waiting.
    pub async fn find_elements(&self, selector: &str) -> Result<Vec<CowherdElement>> {
        let elements = self.client.find_all(Locator::Css(selector)).await?;

        Ok(elements
            .into_iter()
            .map(|element| CowherdElement::new(element, &self.pacing))
            .collect())
    }

    /// Find an element that may legitimately be absent. Absence is `Ok(None)`;
    /// every other driver fault is still an error.
    pub async fn try_find(&self, selector: &str) -> Result<Option<CowherdElement>> {
        match self.client.find(Locator::Css(selector)).await {
            Ok(element) => Ok(Some(CowherdElement::new(element, &self.pacing))),
            Err(e) if e.is_no_such_element() => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Pause for the configured settle delay.
    pub async fn settle(&self) {
        self.pacing.settle().await;
    }
}

// =========================
// CowherdElement Definition
// =========================

#[derive(Clone)]
/// Wrapper for DOM elements that provides typed helpers consistent with [`CowherdPage`].
pub struct CowherdElement {
    pub element: Element,
    pub pacing: Pacing,
}

impl CowherdElement {
    /// Construct an element wrapper.
    pub fn new(element: Element, pacing: &Pacing) -> Self {
        Self {
            element,
            pacing: pacing.clone(),
        }
    }

    /// Click the element. WebDriver may invalidate the reference afterwards,
    /// so the wrapper is consumed; re-query children after expanding.
    pub async fn click(self) -> Result<()> {
        self.element.click().await?;
        Ok(())
    }

    /// Find zero or more child elements by CSS selector.
    pub async fn find_elements(&self, selector: &str) -> Result<Vec<CowherdElement>> {
        let elements = self.element.find_all(Locator::Css(selector)).await?;
        Ok(elements
            .into_iter()
            .map(|element| CowherdElement::new(element, &self.pacing))
            .collect())
    }

    /// Find a child element that may legitimately be absent.
    pub async fn try_find(&self, selector: &str) -> Result<Option<CowherdElement>> {
        match self.element.find(Locator::Css(selector)).await {
            Ok(element) => Ok(Some(CowherdElement::new(element, &self.pacing))),
            Err(e) if e.is_no_such_element() => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Read an attribute value.
    pub async fn get_attribute(&self, attribute: &str) -> Result<Option<String>> {
        self.element
            .attr(attribute)
            .await
            .map_err(anyhow::Error::from)
    }

    /// Return the element's visible text.
    pub async fn get_inner_text(&self) -> Result<String> {
        self.element.text().await.map_err(anyhow::Error::from)
    }
}
