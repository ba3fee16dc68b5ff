use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::catalog::Style;

/// Who asked for a style change. Auto-tour ticks are `Auto`; everything the
/// user does is `Manual`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Manual,
    Auto,
}

/// One successful generation. Never mutated after creation; history and the
/// current pointer share it through `Arc`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedArtwork {
    pub id: Uuid,
    /// Remote URL or `data:` URI
    pub url: String,
    pub style: Style,
    pub created_at: DateTime<Utc>,
}

impl GeneratedArtwork {
    pub fn new(url: String, style: Style) -> Self {
        Self {
            id: Uuid::new_v4(),
            url,
            style,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GalleryPhase {
    Idle,
    Generating,
    /// Cleared by the next generation or an explicit dismiss
    Error,
}

#[derive(Debug, Clone)]
pub struct GalleryState {
    pub current_style: Style,
    pub current_artwork: Option<Arc<GeneratedArtwork>>,
    /// Newest first
    pub history: Vec<Arc<GeneratedArtwork>>,
    pub is_loading: bool,
    pub error_message: Option<String>,
    pub is_auto_touring: bool,
}

impl GalleryState {
    pub fn new(initial_style: Style) -> Self {
        Self {
            current_style: initial_style,
            current_artwork: None,
            history: Vec::new(),
            is_loading: false,
            error_message: None,
            is_auto_touring: false,
        }
    }

    pub fn phase(&self) -> GalleryPhase {
        if self.is_loading {
            GalleryPhase::Generating
        } else if self.error_message.is_some() {
            GalleryPhase::Error
        } else {
            GalleryPhase::Idle
        }
    }

    pub fn find_artwork(&self, id: Uuid) -> Option<&Arc<GeneratedArtwork>> {
        self.history.iter().find(|art| art.id == id)
    }

    pub fn is_current(&self, id: Uuid) -> bool {
        self.current_artwork
            .as_ref()
            .is_some_and(|art| art.id == id)
    }
}
