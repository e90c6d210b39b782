pub mod analyzer;
pub mod config;
pub mod matcher;
pub mod model;
pub mod normalizer;
pub mod parser;
pub mod presenter;
pub mod scraper;
pub mod utils;
