// @file: src/connectors/mod.rs
// @description: Exchange transport implementations.
// @author: LAS.

pub mod binance_rest;
