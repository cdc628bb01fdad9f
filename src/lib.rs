//! Library entrypoint for ubuntu-series-gen.
//!
//! The primary interface is the `ubuntu-series-gen` binary. This lib target
//! exists to expose internal modules to integration tests.

pub mod cache;
pub mod config;
pub mod generate;
pub mod launchpad;
pub mod output;
pub mod render;
pub mod series;
