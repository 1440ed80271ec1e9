//! CLI command implementation for the title-scout binary.

pub mod output;
pub mod scrape_cmd;
