//! collectd exec plugin for Comet Server health metrics.
//!
//! Polls the admin API on a fixed interval and writes `PUTVAL` lines to stdout.

pub mod cli;
pub mod core;
pub mod logging;
pub mod utils;
