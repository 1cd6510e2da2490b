pub mod checks;
pub mod cli;
pub mod config;
pub mod core;
pub mod engine;
pub mod exit;
pub mod probe;
pub mod profile;
pub mod report;
pub mod rules;
pub mod scan;
pub mod ui;
