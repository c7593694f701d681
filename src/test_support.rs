//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use async_trait::async_trait;

use crate::core::catalog::Catalog;
use crate::core::screen::Screen;
use crate::persistence::{StateStore, StoreError};

/// A store whose every call fails, for exercising fault absorption.
pub struct FailingStore;

#[async_trait]
impl StateStore for FailingStore {
    fn name(&self) -> &str {
        "failing"
    }

    async fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
        Err(StoreError::Unavailable("always fails".to_string()))
    }

    async fn set(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("always fails".to_string()))
    }
}

/// Catalog whose crew list is `A`, `B`, `C`.
pub fn three_crew_catalog() -> Catalog {
    Catalog::new([
        (Screen::Destination, vec!["Moon", "Mars"]),
        (Screen::Crew, vec!["A", "B", "C"]),
        (Screen::Technology, vec!["Launch vehicle", "Spaceport"]),
    ])
    .expect("valid test catalog")
}
