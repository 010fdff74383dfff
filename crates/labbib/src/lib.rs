#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::perf,
    clippy::style,
    clippy::missing_safety_doc,
    clippy::missing_const_for_fn
)]
#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]

//! # labbib
//!
//! labbib is a library for maintaining the shared bibliography of a research lab. It loads BibTeX
//! into an in memory bibliography model where entries can be merged without duplicate citation
//! keys, rekeyed to the `authorYEARtitle` format, or completed with entries fetched by DOI. The
//! in memory bibliography is written back as [`format::BibTex`] or exported to the
//! [`format::WebsiteJson`] publication list.

mod api;
pub mod ast;
mod error;
pub mod export;
pub mod fetch;
pub mod format;
pub mod harmonize;
pub mod key;
pub mod merge;

pub use api::{Client, DoiSource};
pub use error::{Error, ErrorKind};

use log::trace;

/// Fetch the entries of every DOI in `dois` from `source` over HTTP.
///
/// See [`fetch::fetch`] for how failures are handled.
#[inline]
#[must_use]
pub fn fetch_by_dois<I, S>(dois: I, source: DoiSource) -> (ast::Biblio, fetch::FetchReport)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    trace!("Fetch entries by DOI from {source:?}");
    fetch::fetch(&reqwest::blocking::Client::new(), dois, source)
}
