//! Shared test infrastructure

#![allow(dead_code)]

pub mod fixtures;
pub mod test_app;
