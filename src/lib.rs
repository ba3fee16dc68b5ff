// Library exports for the Heritage Gallery

pub mod api;
pub mod app;
pub mod catalog;
pub mod gallery;
pub mod ui;
pub mod utils;

// Re-export commonly used types
pub use api::{GeminiClient, ImageGenerator};
pub use app::App;
pub use catalog::{PromptCatalog, PromptEntry, Style};
pub use gallery::{Gallery, GalleryEvent, GalleryOptions, GalleryState, GeneratedArtwork, Trigger};
pub use utils::config::Config;
pub use utils::error::{CatalogError, GenerationError, UpstreamError};
