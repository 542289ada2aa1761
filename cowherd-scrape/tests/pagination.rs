use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use cowherd_scrape::ScrapeError;
use cowherd_scrape::document::{extract_document, fetch_section, fetch_whole_document};
use cowherd_scrape::links::{text_view_url, with_page_id};
use cowherd_scrape::session::ViewerSession;
use cowherd_scrape::sink::MemorySink;

const TIMEOUT: Duration = Duration::from_millis(10);

fn viewer_url(id: u64) -> String {
    format!("https://heinonline.org/HOL/Page?handle=hein.cow/zzeu0001&id={id}&collection=cow")
}

fn page_url(section_url: &str, id: u64) -> String {
    with_page_id(&text_view_url(section_url), id)
}

/// Scripted viewer for section walks: serves canned hierarchy links, then
/// page text keyed by the exact URL navigated to.
#[derive(Default)]
struct SectionViewer {
    links: Vec<String>,
    texts: HashMap<String, String>,
    visited: Vec<String>,
    reads: u32,
}

#[async_trait]
impl ViewerSession for SectionViewer {
    async fn goto(&mut self, url: &str) -> Result<(), ScrapeError> {
        self.visited.push(url.to_string());
        Ok(())
    }

    async fn page_links(&mut self) -> Result<Vec<String>, ScrapeError> {
        Ok(self.links.clone())
    }

    async fn page_text(&mut self, _timeout: Duration) -> Result<String, ScrapeError> {
        self.reads += 1;
        let current = self.visited.last().cloned().unwrap_or_default();
        match self.texts.get(&current) {
            Some(text) => Ok(text.clone()),
            None => Err(ScrapeError::PageLoadTimeout { url: current }),
        }
    }

    async fn pager_script(&mut self) -> Result<Option<String>, ScrapeError> {
        Ok(None)
    }

    async fn advance_page(&mut self) -> Result<(), ScrapeError> {
        Ok(())
    }

    async fn settle(&mut self) {}
}

/// Scripted viewer for whole-document walks: serves a slider script and one
/// text per read-advance cycle (`None` simulates a page that never renders).
#[derive(Default)]
struct SliderViewer {
    slider: Option<String>,
    cycles: Vec<Option<String>>,
    cursor: usize,
    reads: u32,
    advances: u32,
}

#[async_trait]
impl ViewerSession for SliderViewer {
    async fn goto(&mut self, _url: &str) -> Result<(), ScrapeError> {
        Ok(())
    }

    async fn page_links(&mut self) -> Result<Vec<String>, ScrapeError> {
        Ok(Vec::new())
    }

    async fn page_text(&mut self, _timeout: Duration) -> Result<String, ScrapeError> {
        self.reads += 1;
        match self.cycles.get(self.cursor) {
            Some(Some(text)) => Ok(text.clone()),
            _ => Err(ScrapeError::PageLoadTimeout {
                url: format!("cycle {}", self.cursor),
            }),
        }
    }

    async fn pager_script(&mut self) -> Result<Option<String>, ScrapeError> {
        Ok(self.slider.clone())
    }

    async fn advance_page(&mut self) -> Result<(), ScrapeError> {
        self.advances += 1;
        self.cursor += 1;
        Ok(())
    }

    async fn settle(&mut self) {}
}

#[tokio::test]
async fn section_walks_the_bounded_range() {
    let section_url = viewer_url(5);
    let mut viewer = SectionViewer {
        links: vec![viewer_url(3), viewer_url(5), viewer_url(9)],
        ..Default::default()
    };
    for id in 5..9 {
        viewer
            .texts
            .insert(page_url(&section_url, id), format!("page {id}"));
    }
    let mut sink = MemorySink::new();

    let report = fetch_section(&mut viewer, &section_url, &mut sink, 5, TIMEOUT)
        .await
        .unwrap();

    assert_eq!(report.pages, 4);
    assert_eq!(report.skipped, 0);
    assert_eq!(
        sink.contents,
        "<text>\npage 5\npage 6\npage 7\npage 8\n</text>\n"
    );
    // First visit is the section itself, then each page in ascending order.
    assert_eq!(viewer.visited[0], section_url);
    assert_eq!(viewer.visited[1], page_url(&section_url, 5));
    assert_eq!(viewer.visited[4], page_url(&section_url, 8));
}

#[tokio::test]
async fn section_timeout_skips_the_page_but_keeps_the_frame() {
    let section_url = viewer_url(2);
    let mut viewer = SectionViewer {
        links: vec![viewer_url(2), viewer_url(4)],
        ..Default::default()
    };
    // Page 2 renders; page 3 never does.
    viewer
        .texts
        .insert(page_url(&section_url, 2), "page 2".to_string());
    let mut sink = MemorySink::new();

    let report = fetch_section(&mut viewer, &section_url, &mut sink, 2, TIMEOUT)
        .await
        .unwrap();

    // Exactly two fetch attempts over [2,4), one marker pair around them.
    assert_eq!(viewer.reads, 2);
    assert_eq!(report.pages, 1);
    assert_eq!(report.skipped, 1);
    assert_eq!(sink.contents, "<text>\npage 2\n</text>\n");
}

#[tokio::test]
async fn section_without_boundary_is_a_single_page() {
    let section_url = viewer_url(9);
    let mut viewer = SectionViewer {
        links: vec![viewer_url(3), viewer_url(9)],
        ..Default::default()
    };
    viewer
        .texts
        .insert(page_url(&section_url, 9), "last page".to_string());
    let mut sink = MemorySink::new();

    let report = fetch_section(&mut viewer, &section_url, &mut sink, 9, TIMEOUT)
        .await
        .unwrap();

    assert_eq!(viewer.reads, 1);
    assert_eq!(report.pages, 1);
    assert_eq!(sink.contents, "<text>\nlast page\n</text>\n");
}

#[tokio::test]
async fn final_section_at_the_largest_id_stays_a_single_page() {
    // No successor id can exist at the top of the range; the walk is still
    // exactly one page.
    let section_url = viewer_url(u64::MAX);
    let mut viewer = SectionViewer {
        links: vec![viewer_url(3), viewer_url(u64::MAX)],
        ..Default::default()
    };
    viewer
        .texts
        .insert(page_url(&section_url, u64::MAX), "terminal page".to_string());
    let mut sink = MemorySink::new();

    let report = fetch_section(&mut viewer, &section_url, &mut sink, u64::MAX, TIMEOUT)
        .await
        .unwrap();

    assert_eq!(viewer.reads, 1);
    assert_eq!(report.pages, 1);
    assert_eq!(sink.contents, "<text>\nterminal page\n</text>\n");
}

#[tokio::test]
async fn empty_link_set_degrades_to_a_single_page() {
    let section_url = viewer_url(7);
    let mut viewer = SectionViewer::default();
    viewer
        .texts
        .insert(page_url(&section_url, 7), "only page".to_string());
    let mut sink = MemorySink::new();

    let report = fetch_section(&mut viewer, &section_url, &mut sink, 7, TIMEOUT)
        .await
        .unwrap();

    assert_eq!(report.pages, 1);
    assert_eq!(sink.contents, "<text>\nonly page\n</text>\n");
}

#[tokio::test]
async fn whole_document_runs_exactly_max_cycles() {
    let mut viewer = SliderViewer {
        slider: Some("$(function() { $('#page_slider').slider({min: 1, max: 3}); });".to_string()),
        cycles: vec![
            Some("one".to_string()),
            Some("two".to_string()),
            Some("three".to_string()),
        ],
        ..Default::default()
    };
    let mut sink = MemorySink::new();

    let report = fetch_whole_document(
        &mut viewer,
        "https://heinonline.org/HOL/Page?handle=hein.cow/zzeu0001",
        &mut sink,
        TIMEOUT,
    )
    .await
    .unwrap();

    // Three read-advance cycles, never a fourth.
    assert_eq!(viewer.reads, 3);
    assert_eq!(viewer.advances, 3);
    assert_eq!(report.pages, 3);
    assert_eq!(sink.contents, "<text>\none\ntwo\nthree\n</text>\n");
}

#[tokio::test]
async fn whole_document_skips_unrendered_pages() {
    let mut viewer = SliderViewer {
        slider: Some("slider({min: 1, max: 3})".to_string()),
        cycles: vec![Some("one".to_string()), None, Some("three".to_string())],
        ..Default::default()
    };
    let mut sink = MemorySink::new();

    let report = fetch_whole_document(
        &mut viewer,
        "https://heinonline.org/HOL/Page?handle=hein.cow/zzeu0001",
        &mut sink,
        TIMEOUT,
    )
    .await
    .unwrap();

    assert_eq!(report.pages, 2);
    assert_eq!(report.skipped, 1);
    assert_eq!(sink.contents, "<text>\none\nthree\n</text>\n");
}

#[tokio::test]
async fn missing_slider_is_fatal_and_writes_nothing() {
    let mut viewer = SliderViewer::default();
    let mut sink = MemorySink::new();

    let err = fetch_whole_document(
        &mut viewer,
        "https://heinonline.org/HOL/Page?handle=hein.cow/zzeu0001",
        &mut sink,
        TIMEOUT,
    )
    .await
    .unwrap_err();

    assert!(matches!(err, ScrapeError::PaginationControlNotFound(_)));
    assert!(sink.contents.is_empty());
}

#[tokio::test]
async fn extract_dispatches_on_page_id_presence() {
    // A URL carrying an id goes down the section path.
    let section_url = viewer_url(4);
    let mut viewer = SectionViewer {
        links: vec![viewer_url(4), viewer_url(5)],
        ..Default::default()
    };
    viewer
        .texts
        .insert(page_url(&section_url, 4), "section page".to_string());
    let mut sink = MemorySink::new();
    let report = extract_document(&mut viewer, &section_url, &mut sink, TIMEOUT)
        .await
        .unwrap();
    assert_eq!(report.pages, 1);
    assert!(viewer.visited.contains(&page_url(&section_url, 4)));

    // A URL without an id is fetched whole via the slider.
    let mut viewer = SliderViewer {
        slider: Some("slider({min: 1, max: 1})".to_string()),
        cycles: vec![Some("whole".to_string())],
        ..Default::default()
    };
    let mut sink = MemorySink::new();
    let report = extract_document(
        &mut viewer,
        "https://heinonline.org/HOL/Page?handle=hein.cow/zzeu0001&collection=cow",
        &mut sink,
        TIMEOUT,
    )
    .await
    .unwrap();
    assert_eq!(report.pages, 1);
    assert_eq!(viewer.advances, 1);
    assert_eq!(sink.contents, "<text>\nwhole\n</text>\n");
}
