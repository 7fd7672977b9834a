// @file: src/tests/mod.rs
// @description: Unit and integration suites for validation, parsing, assembly, transport and the run loop.
// @author: LAS.

mod logging_tests;
mod engine_tests;
