//! DOM and URL contract of the archive's viewer and hierarchy browser.
//!
//! The scraper targets one fixed site; its class names and query parameters
//! are pinned here rather than made configurable.

/// Per-line wrapper elements in a document's hierarchy view, each optionally
/// holding one page link.
pub const PAGE_LINE: &str = ".page_line";

/// The page slider control in text view; its inline `onchange` script embeds
/// the document's page count.
pub const PAGE_SLIDER: &str = "#page_slider";

/// Marker preceding the maximum page index inside the slider's script.
pub const PAGE_COUNT_MARKER: &str = "max:";

/// The rendered plain-text element in text-view mode.
pub const PAGE_TEXT: &str = "#PageTextBox pre";

/// Control that advances the text view by one page.
pub const PAGE_FORWARD: &str = "#page_forward";

/// Second anchor under the hierarchy root on a country browse page: the
/// constitutions subsection.
pub const CONSTITUTIONS_ANCHOR: &str = "#top_hier > ul > a:nth-of-type(2)";

/// Expandable hierarchy list (top level and nested alike).
pub const HIER_LIST: &str = ".list_hier";

/// Entries of a hierarchy list.
pub const HIER_ITEM: &str = "li";

/// Toggle that expands a document's version list.
pub const DOC_TOGGLE: &str = ".dt_link";

/// Toggle that expands an "Original Text" group one level further.
pub const SLIDE_TOGGLE: &str = ".slide_links";

/// Canonical origin of the archive, for resolving site-relative hrefs.
pub const SITE_BASE: &str = "https://heinonline.org/";

/// URL fragments identifying a version link inside the collection.
pub const VERSION_URL_FRAGMENTS: [&str; 2] = [
    "HOL/Page?handle=hein.cow/",
    "/HOL/Page?collection=cow&handle=hein.cow/",
];

/// Query suffix that switches the viewer into text-view mode.
pub const TEXT_VIEW_SUFFIX: &str = "type=text";

/// Query parameter carrying the page identifier.
pub const PAGE_ID_PARAM: &str = "id";

/// Nested items with this label group original-text versions behind a
/// further toggle.
pub const ORIGINAL_TEXT_KEY: &str = "Original Text";

/// Catalog-record entries to skip while collecting versions.
pub const MARC_RECORD_KEY: &str = "MARC Record";
