// @file: src/render/mod.rs
// @description: Chart backends.
// @author: LAS.

pub mod chart;
