//! View model derived from [`GalleryState`]. Holds no state of its own.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::api::data_uri::{format_size, DataUri};
use crate::catalog::{PromptCatalog, Style};
use crate::gallery::{GalleryState, GeneratedArtwork};
use crate::utils::time::relative_time_from;

const PREVIEW_CHARS: usize = 48;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleTile {
    /// 1-based, as typed by the user
    pub number: usize,
    pub style: Style,
    pub description: String,
    pub active: bool,
    /// Active and currently generating
    pub busy: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryThumb {
    pub number: usize,
    pub id: Uuid,
    pub style: Style,
    pub age: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtworkFrame {
    pub id: Uuid,
    pub style: Style,
    /// Mime type when the reference is a data URI
    pub mime_type: Option<String>,
    /// Decoded image size when the reference is a data URI
    pub size: Option<String>,
    pub age: String,
    /// Truncated reference for display
    pub preview: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameView {
    Loading { message: &'static str },
    Artwork(ArtworkFrame),
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryView {
    pub tiles: Vec<StyleTile>,
    pub history: Vec<HistoryThumb>,
    pub frame: FrameView,
    pub error: Option<String>,
    pub tour_active: bool,
    pub tour_label: &'static str,
    pub generate_label: &'static str,
    /// Style tiles and "Generate New" are disabled while loading
    pub controls_enabled: bool,
}

impl GalleryView {
    pub fn build(state: &GalleryState, catalog: &PromptCatalog) -> Self {
        Self::build_at(state, catalog, Utc::now())
    }

    pub fn build_at(state: &GalleryState, catalog: &PromptCatalog, now: DateTime<Utc>) -> Self {
        let tiles = Style::ALL
            .iter()
            .enumerate()
            .map(|(i, &style)| {
                let active = style == state.current_style;
                StyleTile {
                    number: i + 1,
                    style,
                    description: catalog
                        .get(style)
                        .map(|e| e.description.clone())
                        .unwrap_or_default(),
                    active,
                    busy: active && state.is_loading,
                }
            })
            .collect();

        let history = state
            .history
            .iter()
            .enumerate()
            .map(|(i, art)| HistoryThumb {
                number: i + 1,
                id: art.id,
                style: art.style,
                age: relative_time_from(art.created_at, now),
                selected: state.is_current(art.id),
            })
            .collect();

        let frame = if state.is_loading {
            FrameView::Loading {
                message: state.current_style.loading_message(),
            }
        } else {
            match &state.current_artwork {
                Some(art) => FrameView::Artwork(artwork_frame(art, now)),
                None => FrameView::Empty,
            }
        };

        Self {
            tiles,
            history,
            frame,
            error: state.error_message.clone(),
            tour_active: state.is_auto_touring,
            tour_label: if state.is_auto_touring {
                "Pause Auto-Tour"
            } else {
                "Start Auto-Tour"
            },
            generate_label: if state.is_loading {
                "Curating..."
            } else {
                "Generate New"
            },
            controls_enabled: !state.is_loading,
        }
    }
}

fn artwork_frame(art: &GeneratedArtwork, now: DateTime<Utc>) -> ArtworkFrame {
    let data_uri = art.url.parse::<DataUri>().ok();
    let preview = if art.url.chars().count() > PREVIEW_CHARS {
        let head: String = art.url.chars().take(PREVIEW_CHARS).collect();
        format!("{}…", head)
    } else {
        art.url.clone()
    };

    ArtworkFrame {
        id: art.id,
        style: art.style,
        mime_type: data_uri.as_ref().map(|d| d.mime_type.clone()),
        size: data_uri
            .as_ref()
            .and_then(DataUri::decoded_len)
            .map(format_size),
        age: relative_time_from(art.created_at, now),
        preview,
    }
}
