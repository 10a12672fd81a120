//! Shared fixtures for valida-core integration tests

pub mod fixtures;
