//! `text` extracts full text for every version listed in a catalog JSON.

use std::fs;
use std::time::Duration;

use anyhow::{Context, Result};
use cowherd_config::Settings;
use cowherd_drivers::cowherd_browser::driver::CowherdDriver;
use cowherd_scrape::constraints::TitleFilter;
use cowherd_scrape::document::extract_document;
use cowherd_scrape::model::CountryCatalog;
use cowherd_scrape::session::WebDriverViewer;
use cowherd_scrape::sink::FileSink;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use crate::cli::TextArgs;
use crate::outputs::{slugify, version_header};

pub async fn run(driver: &mut CowherdDriver, args: TextArgs, settings: &Settings) -> Result<()> {
    let catalog = CountryCatalog::load(&args.catalog)?;

    let out_dir = args
        .out_dir
        .unwrap_or_else(|| settings.output.dir.clone());
    let country_dir = out_dir.join(&catalog.country.name);
    fs::create_dir_all(&country_dir)
        .with_context(|| format!("failed to create {}", country_dir.display()))?;

    // Off-campus first loads sit behind the proxy sign-in, which can hold the
    // viewer blank far longer than an on-campus page fetch.
    let page_timeout = if args.off_campus {
        Duration::from_secs(settings.webdriver.hierarchy_timeout_secs)
    } else {
        Duration::from_secs(settings.webdriver.page_timeout_secs)
    };

    let filter = TitleFilter::new(
        catalog.country.max_year,
        catalog.country.all_files,
        &settings.filters.keywords,
    );

    let total: u64 = catalog
        .documents
        .iter()
        .map(|d| d.versions.len() as u64)
        .sum();
    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40} {pos}/{len} {msg}")?
            .progress_chars("=> "),
    );

    // One session serves every version in turn; versions are never fetched
    // concurrently.
    let mut session = WebDriverViewer::new(driver.page());

    let mut extracted = 0u64;
    let mut failed = 0u64;

    for document in &catalog.documents {
        let doc_dir = country_dir.join(slugify(&document.title));
        fs::create_dir_all(&doc_dir)
            .with_context(|| format!("failed to create {}", doc_dir.display()))?;
        info!(
            target: "app.text",
            document = %document.title,
            versions = document.versions.len(),
            "extracting document"
        );

        for version in &document.versions {
            pb.set_message(version.title.clone());
            let version_path = doc_dir.join(format!("{}.txt", slugify(&version.title)));
            let header = version_header(
                &catalog.country.name,
                document.title.trim(),
                filter.extract_year(&document.title),
                &version.title,
                &version.url,
            );
            fs::write(&version_path, format!("{header}\n"))
                .with_context(|| format!("failed to seed {}", version_path.display()))?;

            let mut sink = FileSink::create(&version_path)?;
            match extract_document(&mut session, &version.url, &mut sink, page_timeout).await {
                Ok(report) => {
                    extracted += 1;
                    info!(
                        target: "app.text",
                        version = %version.title,
                        pages = report.pages,
                        skipped = report.skipped,
                        "version extracted"
                    );
                }
                Err(e) => {
                    failed += 1;
                    warn!(
                        target: "app.text",
                        version = %version.title,
                        "extraction failed, moving on: {e}"
                    );
                }
            }
            pb.inc(1);
        }
    }
    pb.finish_and_clear();

    info!(
        target: "app.text",
        country = %catalog.country.name,
        extracted,
        failed,
        "text extraction finished"
    );
    println!(
        "{}: {extracted} versions extracted, {failed} failed -> {}",
        catalog.country.name,
        country_dir.display()
    );
    Ok(())
}
