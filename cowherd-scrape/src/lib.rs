//! Core scraping logic: link normalisation, range resolution, pagination
//! drive, and the catalog hierarchy walk.
//!
//! The page-sequence machinery lives in three layers:
//!
//! - [`links`]: extract page identifiers, dedup, and order
//!   ([`links::normalize`]); resolve section boundaries
//!   ([`links::next_boundary`])
//! - [`pager`]: recover a document's page count from the slider control
//! - [`document`]: walk a section or a whole document, streaming text into a
//!   [`sink::TextSink`] through a [`session::ViewerSession`]
//!
//! The [`catalog`] walker and [`constraints`] filter feed the link scrape;
//! [`model`] is the JSON catalog they produce. All DOM class names and URL
//! query parameters of the target site are pinned in [`selectors`].

pub mod catalog;
pub mod constraints;
pub mod document;
pub mod error;
pub mod links;
pub mod model;
pub mod pager;
pub mod selectors;
pub mod session;
pub mod sink;

pub use error::ScrapeError;
