//! `links` walks a country's catalog hierarchy and saves the version links.

use std::fs;
use std::time::Duration;

use anyhow::{Context, Result};
use cowherd_common::Access;
use cowherd_config::Settings;
use cowherd_drivers::cowherd_browser::driver::CowherdDriver;
use cowherd_scrape::catalog::{CatalogRequest, scrape_country_links};
use tracing::info;

use crate::cli::LinksArgs;
use crate::country_map;

pub async fn run(driver: &mut CowherdDriver, args: LinksArgs, settings: &Settings) -> Result<()> {
    let row = country_map::lookup(&args.map_file, args.country_code)?;

    let out_dir = args
        .out_dir
        .unwrap_or_else(|| settings.output.dir.clone());
    fs::create_dir_all(&out_dir)
        .with_context(|| format!("failed to create output dir {}", out_dir.display()))?;

    let access = if args.off_campus {
        Access::OffCampus
    } else {
        Access::OnCampus
    };

    let request = CatalogRequest {
        country_name: row.name.clone(),
        country_code: row.code,
        country_url: settings.site.country_url(row.code, args.off_campus),
        max_year: args.max_year.unwrap_or(settings.filters.max_year),
        // The map can widen a country to every dated file, never narrow it.
        all_files: args.all_files || row.all_files,
        keywords: settings.filters.keywords.clone(),
        access,
        hierarchy_timeout: Duration::from_secs(settings.webdriver.hierarchy_timeout_secs),
    };

    let mut page = driver.page();
    let catalog = scrape_country_links(&mut page, &request).await?;

    let documents = catalog.documents.len();
    let versions: usize = catalog.documents.iter().map(|d| d.versions.len()).sum();
    let path = catalog.save(&out_dir)?;

    info!(
        target: "app.links",
        country = %row.name,
        documents,
        versions,
        path = %path.display(),
        "catalog saved"
    );
    println!("{}: {documents} documents, {versions} versions -> {}", row.name, path.display());
    Ok(())
}
