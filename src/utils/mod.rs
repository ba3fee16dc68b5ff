//! Utility modules for the gallery
//!
//! Configuration, error types, logging and small formatting helpers.

pub mod config;
pub mod debug;
pub mod error;
pub mod logger;
pub mod time;

// Available exports via submodules:
// config::Config
// debug::{is_debug_enabled, debug_print_module, DebugTimer}
// error::{GenerationError, UpstreamError, CatalogError, GalleryResult}
