//! ShoreSquad Library
//!
//! The fetch–cache–render pipeline behind the forecast widget, exposed for the
//! binary and for integration tests.

pub mod cache;
pub mod cli;
pub mod data;
pub mod logging;
pub mod refresh;
pub mod render;
pub mod saved;
