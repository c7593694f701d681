//! # Core Navigation Logic
//!
//! This module contains Voyage's business logic.
//! It knows nothing about any specific UI technology or storage backend.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • Screen / Catalog     │
//!                    │  • Gesture classifier   │
//!                    │  • State + Action       │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │
//!                    ┌───────────┴───────────┐
//!                    ▼                       ▼
//!             ┌────────────┐          ┌─────────────┐
//!             │    TUI     │          │ Persistence │
//!             │  Adapter   │          │   (stores)  │
//!             │ (ratatui)  │          │             │
//!             └────────────┘          └─────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`screen`]: the fixed screen sequence and step directions
//! - [`catalog`]: ordered item lists per screen
//! - [`gesture`]: touch sequence → classification
//! - [`state`]: `NavigationState`, the single source of truth
//! - [`action`]: the `Action` enum and `update()`
//! - [`config`]: layered configuration

pub mod action;
pub mod catalog;
pub mod config;
pub mod gesture;
pub mod screen;
pub mod state;

// Re-export commonly used types for convenience
pub use action::{Action, Effect, update};
pub use catalog::Catalog;
pub use gesture::{Classification, GestureSettings, TouchEvent};
pub use screen::{Direction, Screen};
pub use state::{NavigationState, ScreenPhase, SelectionView};
