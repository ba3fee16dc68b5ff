//! Gallery orchestration
//!
//! [`Gallery`] owns the whole view state and is the only thing that mutates
//! it. Work that completes later (a generation request, an auto-tour timer)
//! runs on its own task and reports back by posting a [`GalleryEvent`] to
//! the gallery's queue. The owner pulls events with [`Gallery::next_event`]
//! and hands them to [`Gallery::apply`], so every mutation happens on the
//! owner's task.
//!
//! # Stale responses
//!
//! Each generation request carries a sequence number. Only the settlement of
//! the newest request is applied; older ones are logged and dropped, so a
//! slow response can never replace the result of a newer request.

pub mod state;
pub mod tour;

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::api::ImageGenerator;
use crate::catalog::{PromptCatalog, Style};
use crate::utils::error::{error_chain, CatalogError, GenerationError, GENERIC_FAILURE_MESSAGE};
use crate::utils::logger;

pub use state::{GalleryPhase, GalleryState, GeneratedArtwork, Trigger};
pub use tour::TourSchedule;

pub const DEFAULT_TOUR_INTERVAL: Duration = Duration::from_secs(10);

#[derive(Debug)]
pub enum GalleryEvent {
    /// A generation request finished, successfully or not
    GenerationSettled {
        request: u64,
        style: Style,
        result: Result<String, GenerationError>,
    },
    /// An auto-tour timer elapsed
    TourTick { token: u64 },
}

#[derive(Debug, Clone)]
pub struct GalleryOptions {
    pub initial_style: Style,
    pub tour_interval: Duration,
}

impl Default for GalleryOptions {
    fn default() -> Self {
        Self {
            initial_style: Style::Pattachitra,
            tour_interval: DEFAULT_TOUR_INTERVAL,
        }
    }
}

pub struct Gallery {
    state: GalleryState,
    generator: Arc<dyn ImageGenerator>,
    catalog: Arc<PromptCatalog>,
    events_tx: mpsc::UnboundedSender<GalleryEvent>,
    events_rx: mpsc::UnboundedReceiver<GalleryEvent>,
    tour: TourSchedule,
    latest_request: u64,
}

impl Gallery {
    /// Fails if the catalog lacks a prompt for any style.
    pub fn new(
        generator: Arc<dyn ImageGenerator>,
        catalog: Arc<PromptCatalog>,
        options: GalleryOptions,
    ) -> Result<Self, CatalogError> {
        catalog.validate()?;
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Ok(Self {
            state: GalleryState::new(options.initial_style),
            generator,
            catalog,
            events_tx,
            events_rx,
            tour: TourSchedule::new(options.tour_interval),
            latest_request: 0,
        })
    }

    pub fn state(&self) -> &GalleryState {
        &self.state
    }

    pub fn catalog(&self) -> &PromptCatalog {
        &self.catalog
    }

    pub fn tour_interval(&self) -> Duration {
        self.tour.interval()
    }

    /// True while an auto-tour timer is pending.
    pub fn is_tour_armed(&self) -> bool {
        self.tour.is_armed()
    }

    /// Switch to `style` and generate for it.
    ///
    /// A manual selection stops the auto-tour. Manually re-selecting the
    /// active style while an artwork is shown does nothing. Returns whether
    /// a generation was started.
    pub fn select_style(&mut self, style: Style, trigger: Trigger) -> bool {
        if trigger == Trigger::Manual {
            self.state.is_auto_touring = false;
        }

        if trigger == Trigger::Manual
            && style == self.state.current_style
            && self.state.current_artwork.is_some()
        {
            self.sync_tour();
            return false;
        }

        self.state.current_style = style;
        self.regenerate();
        true
    }

    /// Start a fresh generation for the current style.
    pub fn regenerate(&mut self) {
        self.latest_request += 1;
        let request = self.latest_request;
        let style = self.state.current_style;

        self.state.is_loading = true;
        self.state.error_message = None;
        logger::info(&format!("Generation #{} started for {}", request, style));

        let generator = Arc::clone(&self.generator);
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let result = generator.generate(style).await;
            let _ = tx.send(GalleryEvent::GenerationSettled {
                request,
                style,
                result,
            });
        });

        self.sync_tour();
    }

    /// The "Generate New" action: manual, so it stops the auto-tour first.
    pub fn retry(&mut self) {
        self.state.is_auto_touring = false;
        self.regenerate();
    }

    /// Show an already generated artwork. Never generates. Returns false
    /// (and changes nothing) if `id` is not in the history.
    pub fn select_history_item(&mut self, id: Uuid) -> bool {
        let Some(artwork) = self.state.find_artwork(id).cloned() else {
            return false;
        };

        self.state.is_auto_touring = false;
        self.state.current_style = artwork.style;
        self.state.current_artwork = Some(artwork);
        self.sync_tour();
        true
    }

    pub fn toggle_auto_tour(&mut self) {
        self.state.is_auto_touring = !self.state.is_auto_touring;
        logger::info(&format!(
            "Auto-tour {}",
            if self.state.is_auto_touring { "started" } else { "paused" }
        ));
        self.sync_tour();
    }

    pub fn dismiss_error(&mut self) {
        self.state.error_message = None;
    }

    /// Wait for the next event from a request or timer.
    pub async fn next_event(&mut self) -> Option<GalleryEvent> {
        self.events_rx.recv().await
    }

    /// Apply an event previously returned by [`Gallery::next_event`].
    pub fn apply(&mut self, event: GalleryEvent) {
        match event {
            GalleryEvent::GenerationSettled {
                request,
                style,
                result,
            } => self.settle_generation(request, style, result),
            GalleryEvent::TourTick { token } => self.tour_tick(token),
        }
    }

    /// Wait for one event and apply it.
    pub async fn process_next_event(&mut self) {
        if let Some(event) = self.next_event().await {
            self.apply(event);
        }
    }

    /// Cancel any pending auto-tour timer. In-flight requests still settle
    /// but nothing will apply them.
    pub fn shutdown(&mut self) {
        self.state.is_auto_touring = false;
        self.tour.cancel();
    }

    fn settle_generation(
        &mut self,
        request: u64,
        style: Style,
        result: Result<String, GenerationError>,
    ) {
        if request != self.latest_request {
            logger::info(&format!(
                "Discarding stale generation #{} for {} (latest is #{})",
                request, style, self.latest_request
            ));
            return;
        }

        self.state.is_loading = false;
        match result {
            Ok(url) => {
                let artwork = Arc::new(GeneratedArtwork::new(url, style));
                logger::info(&format!(
                    "Generation #{} for {} succeeded: {}",
                    request, style, artwork.id
                ));
                self.state.history.insert(0, Arc::clone(&artwork));
                self.state.current_style = artwork.style;
                self.state.current_artwork = Some(artwork);
            }
            Err(err) => {
                logger::error(&format!(
                    "Generation #{} for {} failed: {}",
                    request,
                    style,
                    error_chain(&err)
                ));
                self.state.error_message = Some(GENERIC_FAILURE_MESSAGE.to_string());
            }
        }
        self.sync_tour();
    }

    fn tour_tick(&mut self, token: u64) {
        if self.tour.take_fired(token).is_none() {
            return;
        }

        if self.state.is_auto_touring && !self.state.is_loading {
            let next = self.state.current_style.next();
            logger::info(&format!("Auto-tour advancing to {}", next));
            self.select_style(next, Trigger::Auto);
        } else {
            self.sync_tour();
        }
    }

    fn sync_tour(&mut self) {
        let desired = tour::desired_key(
            self.state.is_auto_touring,
            self.state.is_loading,
            self.state.current_style,
        );
        self.tour.sync(desired, &self.events_tx);
    }
}

impl Drop for Gallery {
    fn drop(&mut self) {
        self.tour.cancel();
    }
}
