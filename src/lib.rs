// @file: src/lib.rs
// @description: Exposes the loader modules for the binary and the test suite.
// @author: LAS.


pub mod core;
pub mod connectors;
pub mod render;
pub mod utils;

#[cfg(test)]
mod tests;
