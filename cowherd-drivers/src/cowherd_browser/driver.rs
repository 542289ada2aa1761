use crate::cowherd_browser::{pacing::Pacing, page::CowherdPage};
use anyhow::Result;
use fantoccini::{Client, ClientBuilder};
use serde_json::json;
use std::collections::HashMap;
use tracing::info;
use webdriver::capabilities::Capabilities;

/// Thin wrapper around a `fantoccini` WebDriver client.
pub struct CowherdDriver {
    pub client: Client,
    pub pacing: Pacing,
}

impl CowherdDriver {
    /// Create a new driver connected to a running WebDriver service
    /// (Chromedriver, typically at `http://localhost:9515`).
    pub async fn new(endpoint: &str, headless: bool, pacing: Pacing) -> Result<Self> {
        let mut caps = Capabilities::new();
        let mut chrome_opts = HashMap::new();

        let mut args = vec![json!("--window-size=1440,900")];
        if headless {
            args.push(json!("--headless"));
            args.push(json!("--disable-gpu"));
        }
        chrome_opts.insert("args".to_string(), json!(args));

        caps.insert("goog:chromeOptions".to_string(), json!(chrome_opts));

        let client = ClientBuilder::native()
            .capabilities(caps)
            .connect(endpoint)
            .await?;

        info!(target: "browser.driver", %endpoint, headless, "WebDriver session established");

        Ok(Self { client, pacing })
    }

    /// A page wrapper over the current session, without navigating anywhere.
    pub fn page(&self) -> CowherdPage {
        CowherdPage::new(self.client.clone(), self.pacing.clone())
    }

    /// Close the underlying browser session.
    pub async fn close(self) -> Result<()> {
        self.client.close().await?;
        Ok(())
    }
}
