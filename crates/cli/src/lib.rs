//! Command-line front end of sinktrace.

pub mod args;
pub mod config;
pub mod output;
pub mod scan;
pub mod ui;
