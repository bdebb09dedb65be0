pub mod analyzers;
pub mod chart;
pub mod config;
pub mod error;
pub mod extract;
pub mod loader;
pub mod output;
pub mod parser;
