//! Link normalisation and range resolution for viewer page links.
//!
//! A document's hierarchy view exposes one link per printed line, each
//! carrying the target page's numeric identifier in its query string. The
//! links arrive unordered and duplicated; [`normalize`] turns them into the
//! document's linear page sequence and [`next_boundary`] finds where a
//! section's contiguous range ends.

use std::collections::HashSet;

use tracing::warn;
use url::Url;

use crate::error::ScrapeError;
use crate::selectors::{PAGE_ID_PARAM, SITE_BASE, TEXT_VIEW_SUFFIX};

/// One viewer page link with its extracted page identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLink {
    pub url: String,
    pub id: u64,
}

impl PageLink {
    /// Parse a raw href into a link, extracting the numeric `id` query
    /// parameter. A link without a usable id is malformed and is never
    /// compared against real ones.
    pub fn parse(url: &str) -> Result<PageLink, ScrapeError> {
        let id = page_id(url)?;
        Ok(PageLink {
            url: url.to_string(),
            id,
        })
    }
}

/// Extract the numeric page identifier from a viewer URL's query string.
///
/// Hierarchy hrefs come through site-relative as often as absolute; those
/// resolve against the archive's fixed origin, which leaves the query intact.
pub fn page_id(url: &str) -> Result<u64, ScrapeError> {
    let malformed = || ScrapeError::MalformedLink {
        url: url.to_string(),
    };

    let parsed = match Url::parse(url) {
        Ok(parsed) => parsed,
        Err(url::ParseError::RelativeUrlWithoutBase) => Url::parse(SITE_BASE)
            .and_then(|base| base.join(url))
            .map_err(|_| malformed())?,
        Err(_) => return Err(malformed()),
    };
    let raw = parsed
        .query_pairs()
        .find(|(key, _)| key == PAGE_ID_PARAM)
        .map(|(_, value)| value.into_owned())
        .ok_or_else(malformed)?;
    raw.parse::<u64>().map_err(|_| malformed())
}

/// Normalise raw hrefs into the document's ordered page sequence.
///
/// Stage one dedups on exact URL equality, first occurrence winning; stage
/// two stable-sorts ascending by extracted id, so links sharing an id keep
/// their discovery order. Malformed links are logged and dropped.
pub fn normalize<I>(raw: I) -> Vec<PageLink>
where
    I: IntoIterator<Item = String>,
{
    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for url in raw {
        if !seen.insert(url.clone()) {
            continue;
        }
        match PageLink::parse(&url) {
            Ok(link) => links.push(link),
            Err(e) => warn!(target: "scrape.links", %url, "dropping page link: {e}"),
        }
    }

    links.sort_by_key(|link| link.id);
    links
}

/// Find the link with the smallest identifier strictly greater than
/// `current_id`.
///
/// `None` means no later page is known: the caller sits in the final section
/// and should read through the document's natural end.
pub fn next_boundary(current_id: u64, ordered: &[PageLink]) -> Option<&PageLink> {
    ordered.iter().find(|link| link.id > current_id)
}

/// Switch a viewer URL into text-view mode. Already-switched URLs pass
/// through unchanged.
pub fn text_view_url(url: &str) -> String {
    if url.contains(TEXT_VIEW_SUFFIX) {
        return url.to_string();
    }
    let sep = if url.contains('?') { '&' } else { '?' };
    format!("{url}{sep}{TEXT_VIEW_SUFFIX}")
}

/// Substitute `id` into a viewer URL's query string, appending the parameter
/// if it was absent.
pub fn with_page_id(url: &str, id: u64) -> String {
    match url.split_once('?') {
        Some((base, query)) => {
            let mut replaced = false;
            let mut params: Vec<String> = query
                .split('&')
                .filter(|p| !p.is_empty())
                .map(|p| {
                    let key = p.split_once('=').map_or(p, |(k, _)| k);
                    if key == PAGE_ID_PARAM {
                        replaced = true;
                        format!("{PAGE_ID_PARAM}={id}")
                    } else {
                        p.to_string()
                    }
                })
                .collect();
            if !replaced {
                params.push(format!("{PAGE_ID_PARAM}={id}"));
            }
            format!("{base}?{}", params.join("&"))
        }
        None => format!("{url}?{PAGE_ID_PARAM}={id}"),
    }
}
