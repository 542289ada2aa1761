//! Driver layer for browser automation.
//!
//! This crate exposes the WebDriver client and page/element helpers the
//! scraping layer uses to walk the archive's rendered pages.
//!
//! - [`cowherd_browser::driver::CowherdDriver`]: WebDriver client wrapper
//! - [`cowherd_browser::page::CowherdPage`]: DOM query helpers
//! - [`cowherd_browser::pacing::Pacing`]: jittered settle delays between navigations
pub mod cowherd_browser;
