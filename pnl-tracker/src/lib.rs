//! `pnl-tracker` - daily profit and loss tracking
//!
//! Records daily sales and categorized expenses, aggregates them into rolling
//! averages and trend charts, and backs everything up as JSON.

#![deny(unsafe_code)]

pub mod backend;
pub mod cli;
pub mod config;
pub mod logging;

pub use config::AppConfig;
pub use logging::init_logging;
