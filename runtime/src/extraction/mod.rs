//! Document parsing and title extraction.
//!
//! A fetched body is parsed into a `scraper` tree, searched for the target
//! element, and reduced to the first text node beneath it.

pub mod document;
pub mod title;
pub mod tree_search;
