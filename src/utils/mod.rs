// @file: src/utils/mod.rs
// @description: Configuration and logging plumbing.
// @author: LAS.

pub mod config;
pub mod logging;
