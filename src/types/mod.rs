pub mod config;
pub mod lead;
pub mod report;
