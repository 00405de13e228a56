//! UI rendering module for ShoreSquad
//!
//! This module contains the rendering logic for the terminal user interface,
//! using the ratatui library for TUI components.

pub mod forecast;
pub mod help_overlay;

pub use forecast::render as render_forecast;
pub use help_overlay::render as render_help_overlay;
