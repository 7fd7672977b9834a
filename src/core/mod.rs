// @file: src/core/mod.rs
// @description: Exports domain records, series assembly and the run orchestrator.
// @author: LAS.

pub mod models;
pub mod errors;
pub mod series;
pub mod windows;
pub mod interfaces;
pub mod engine;
