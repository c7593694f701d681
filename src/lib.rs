//! Voyage library exports for testing

pub mod core;
pub mod navigator;
pub mod persistence;
pub mod tui;

#[cfg(test)]
pub mod test_support;

pub use navigator::{NavError, Navigator};
