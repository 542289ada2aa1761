//! `doc` extracts one document URL straight to a file.

use std::fs;
use std::time::Duration;

use anyhow::{Context, Result};
use cowherd_config::Settings;
use cowherd_drivers::cowherd_browser::driver::CowherdDriver;
use cowherd_scrape::document::extract_document;
use cowherd_scrape::session::WebDriverViewer;
use cowherd_scrape::sink::FileSink;
use tracing::info;

use crate::cli::DocArgs;

pub async fn run(driver: &mut CowherdDriver, args: DocArgs, settings: &Settings) -> Result<()> {
    if let Some(parent) = args.out.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
    }

    let mut session = WebDriverViewer::new(driver.page());
    let mut sink = FileSink::create(&args.out)?;
    let page_timeout = Duration::from_secs(settings.webdriver.page_timeout_secs);

    let report = extract_document(&mut session, &args.url, &mut sink, page_timeout).await?;

    info!(
        target: "app.doc",
        url = %args.url,
        pages = report.pages,
        skipped = report.skipped,
        out = %args.out.display(),
        "document extracted"
    );
    println!(
        "{} pages ({} skipped) -> {}",
        report.pages,
        report.skipped,
        args.out.display()
    );
    Ok(())
}
