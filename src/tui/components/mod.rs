//! # TUI Components
//!
//! Stateless, props-based components:
//! - `NavBar`: top menu with one entry per screen, current one highlighted
//! - `ScreenView`: the active screen's heading and item list
//!
//! Each component file carries its own hit test so taps can be mapped back
//! to a menu entry or item using the same geometry the renderer used.

pub mod nav_bar;
pub mod screen_view;

pub use nav_bar::NavBar;
pub use screen_view::ScreenView;
