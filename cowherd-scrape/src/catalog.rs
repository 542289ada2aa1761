//! Hierarchy walker: collects a country's document and version links.
//!
//! Walks the country browse page's collection hierarchy the way a reader
//! would: open the constitutions subsection, expand each qualifying
//! document, expand any "Original Text" group one level further, and record
//! every anchor that points back into the collection.

use std::collections::HashSet;
use std::time::Duration;

use chrono::Utc;
use cowherd_common::{Access, CowherdError};
use cowherd_drivers::cowherd_browser::page::{CowherdElement, CowherdPage};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::constraints::TitleFilter;
use crate::model::{CountryCatalog, CountryMeta, DocumentLinks, VersionLink};
use crate::selectors::{
    CONSTITUTIONS_ANCHOR, DOC_TOGGLE, HIER_ITEM, HIER_LIST, MARC_RECORD_KEY, ORIGINAL_TEXT_KEY,
    SLIDE_TOGGLE, VERSION_URL_FRAGMENTS,
};

/// What to walk and how to filter it.
#[derive(Debug, Clone)]
pub struct CatalogRequest {
    pub country_name: String,
    pub country_code: u32,
    pub country_url: String,
    pub max_year: i32,
    pub all_files: bool,
    pub keywords: Vec<String>,
    pub access: Access,
    /// How long to wait for the hierarchy when the sign-in redirect sits in
    /// front of it.
    pub hierarchy_timeout: Duration,
}

/// Walk the country's constitution hierarchy and collect every version link.
pub async fn scrape_country_links(
    page: &mut CowherdPage,
    request: &CatalogRequest,
) -> cowherd_common::Result<CountryCatalog> {
    info!(
        target: "scrape.catalog",
        country = %request.country_name,
        url = %request.country_url,
        "scraping links"
    );

    let filter = TitleFilter::new(request.max_year, request.all_files, &request.keywords);

    page.goto(&request.country_url).await?;
    page.settle().await;

    // Off campus the browse page renders only after the operator signs in
    // through the proxy; give the hierarchy a long wait before touching it.
    if request.access.is_off_campus()
        && page
            .wait_for_element(CONSTITUTIONS_ANCHOR, request.hierarchy_timeout)
            .await
            .is_err()
    {
        return Err(CowherdError::Timeout);
    }

    let section = page.try_find(CONSTITUTIONS_ANCHOR).await?.ok_or_else(|| {
        CowherdError::Catalog("constitutions anchor missing from hierarchy".to_string())
    })?;
    section.click().await?;
    page.settle().await;

    let list = page
        .try_find(HIER_LIST)
        .await?
        .ok_or_else(|| CowherdError::Catalog("document hierarchy list missing".to_string()))?;

    let mut kept = Vec::new();
    for item in list.find_elements(HIER_ITEM).await? {
        let title = item.get_inner_text().await?.trim().to_string();
        if title.is_empty() || !filter.satisfies(&title) {
            continue;
        }
        kept.push((title, item));
    }
    info!(target: "scrape.catalog", count = kept.len(), "documents matching constraints");

    let mut documents = Vec::new();
    for (title, item) in kept {
        let versions = collect_versions(&item).await?;
        if versions.is_empty() {
            warn!(target: "scrape.catalog", document = %title, "no version links found");
        }
        documents.push(DocumentLinks { title, versions });
    }

    Ok(CountryCatalog {
        country: CountryMeta {
            name: request.country_name.clone(),
            code: request.country_code,
            url: request.country_url.clone(),
            max_year: request.max_year,
            all_files: request.all_files,
            run_id: Uuid::new_v4(),
            scraped_at: Utc::now(),
        },
        documents,
    })
}

/// Expand one document entry and gather its version links, deduplicated by
/// (title, url) in discovery order.
async fn collect_versions(item: &CowherdElement) -> cowherd_common::Result<Vec<VersionLink>> {
    let Some(toggle) = item.try_find(DOC_TOGGLE).await? else {
        return Ok(Vec::new());
    };
    toggle.click().await?;
    item.pacing.settle().await;

    let Some(list) = item.try_find(HIER_LIST).await? else {
        return Ok(Vec::new());
    };

    let mut seen: HashSet<VersionLink> = HashSet::new();
    let mut versions = Vec::new();

    for entry in list.find_elements(HIER_ITEM).await? {
        let label = entry.get_inner_text().await?.trim().to_string();
        if label.is_empty() {
            continue;
        }

        if label.contains(ORIGINAL_TEXT_KEY) {
            // The original-text group hides its versions behind one more toggle.
            let Some(slide) = entry.try_find(SLIDE_TOGGLE).await? else {
                continue;
            };
            slide.click().await?;
            entry.pacing.settle().await;

            let Some(nested) = entry.try_find(HIER_LIST).await? else {
                continue;
            };
            for nested_entry in nested.find_elements(HIER_ITEM).await? {
                if nested_entry.get_inner_text().await?.contains(MARC_RECORD_KEY) {
                    continue;
                }
                if let Some(version) = version_from_anchors(&nested_entry).await? {
                    push_unique(&mut versions, &mut seen, version);
                }
            }
        } else if entry.try_find(SLIDE_TOGGLE).await?.is_none() {
            // Leaf entries without a further toggle link a version directly.
            if let Some(version) = version_from_anchors(&entry).await? {
                push_unique(&mut versions, &mut seen, version);
            }
        }
    }

    Ok(versions)
}

/// First anchor in the entry whose href points back into the collection.
async fn version_from_anchors(
    entry: &CowherdElement,
) -> cowherd_common::Result<Option<VersionLink>> {
    for anchor in entry.find_elements("a").await? {
        let Some(href) = anchor.get_attribute("href").await? else {
            continue;
        };
        if !VERSION_URL_FRAGMENTS.iter().any(|f| href.contains(f)) {
            continue;
        }
        let title = anchor.get_inner_text().await?.trim().to_string();
        if title.is_empty() {
            continue;
        }
        return Ok(Some(VersionLink { title, url: href }));
    }
    Ok(None)
}

fn push_unique(
    versions: &mut Vec<VersionLink>,
    seen: &mut HashSet<VersionLink>,
    version: VersionLink,
) {
    if seen.insert(version.clone()) {
        debug!(target: "scrape.catalog", version = %version.title, "version link found");
        versions.push(version);
    }
}
