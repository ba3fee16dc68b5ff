//! Integration tests for the gallery orchestrator


use async_trait::async_trait;
use heritage_gallery::api::ImageGenerator;
use heritage_gallery::catalog::{PromptCatalog, Style};
use heritage_gallery::gallery::{Gallery, GalleryOptions, GalleryPhase, Trigger};
use heritage_gallery::utils::error::{
    CatalogError, GenerationError, UpstreamError, GENERIC_FAILURE_MESSAGE,
};
use mockall::mock;
use pretty_assertions::assert_eq;
use std::sync::Arc;
use std::time::Duration;
use test_utils::*;
use uuid::Uuid;

mock! {
    pub Generator {}

    #[async_trait]
    impl ImageGenerator for Generator {
        async fn generate(&self, style: Style) -> Result<String, GenerationError>;
    }
}

#[tokio::test]
async fn test_successful_regenerate_prepends_artwork() {
    let generator = ScriptedGenerator::new();
    generator.push_ok(&png_uri("first"));
    let mut gallery = gallery_with(generator.clone(), Style::Warli);

    gallery.regenerate();
    assert!(gallery.state().is_loading);
    assert_eq!(gallery.state().phase(), GalleryPhase::Generating);

    gallery.process_next_event().await;

    let state = gallery.state();
    assert!(!state.is_loading);
    assert!(state.error_message.is_none());
    assert_eq!(state.history.len(), 1);
    let current = state.current_artwork.as_ref().unwrap();
    assert!(Arc::ptr_eq(current, &state.history[0]));
    assert_eq!(current.url, png_uri("first"));
    assert_eq!(current.style, Style::Warli);
    assert_eq!(generator.calls(), vec![Style::Warli]);
}

#[tokio::test]
async fn test_two_regenerates_keep_newest_first() {
    let generator = ScriptedGenerator::new();
    generator.push_ok(&png_uri("art1"));
    generator.push_ok(&png_uri("art2"));
    let mut gallery = gallery_with(generator.clone(), Style::Warli);

    gallery.regenerate();
    gallery.process_next_event().await;
    gallery.regenerate();
    gallery.process_next_event().await;

    let state = gallery.state();
    let urls: Vec<&str> = state.history.iter().map(|a| a.url.as_str()).collect();
    assert_eq!(urls, vec![png_uri("art2").as_str(), png_uri("art1").as_str()]);
    assert!(state.history.iter().all(|a| a.style == Style::Warli));
    assert!(Arc::ptr_eq(
        state.current_artwork.as_ref().unwrap(),
        &state.history[0]
    ));
}

#[tokio::test]
async fn test_failed_regenerate_leaves_history_untouched() {
    let generator = ScriptedGenerator::new();
    generator.push_ok(&png_uri("kept"));
    generator.push_err(upstream_error());
    let mut gallery = gallery_with(generator.clone(), Style::Bapu);

    gallery.regenerate();
    gallery.process_next_event().await;
    let before_id = gallery.state().current_artwork.as_ref().unwrap().id;

    gallery.regenerate();
    gallery.process_next_event().await;

    let state = gallery.state();
    assert!(!state.is_loading);
    assert_eq!(state.history.len(), 1);
    assert_eq!(state.current_artwork.as_ref().unwrap().id, before_id);
    assert_eq!(state.error_message.as_deref(), Some(GENERIC_FAILURE_MESSAGE));
    assert_eq!(state.phase(), GalleryPhase::Error);
}

#[tokio::test]
async fn test_every_error_kind_maps_to_generic_message() {
    let errors = vec![
        GenerationError::InvalidStyle("Warli Art".to_string()),
        GenerationError::NoImageInResponse,
        GenerationError::UpstreamFailure(UpstreamError::InvalidResponse("eof".to_string())),
    ];

    for err in errors {
        let generator = ScriptedGenerator::new();
        generator.push_err(err);
        let mut gallery = gallery_with(generator, Style::Warli);

        gallery.regenerate();
        gallery.process_next_event().await;

        assert_eq!(
            gallery.state().error_message.as_deref(),
            Some(GENERIC_FAILURE_MESSAGE)
        );
        assert!(gallery.state().history.is_empty());
        assert!(gallery.state().current_artwork.is_none());
    }
}

#[tokio::test]
async fn test_dismiss_is_independent_of_retry() {
    let generator = ScriptedGenerator::new();
    generator.push_err(GenerationError::NoImageInResponse);
    let mut gallery = gallery_with(generator.clone(), Style::Warli);

    gallery.regenerate();
    gallery.process_next_event().await;
    assert!(gallery.state().error_message.is_some());

    gallery.dismiss_error();
    assert!(gallery.state().error_message.is_none());
    assert!(!gallery.state().is_loading);
    assert_eq!(generator.call_count(), 1);

    // Retry is a fresh call
    gallery.retry();
    gallery.process_next_event().await;
    assert_eq!(generator.call_count(), 2);
    assert_eq!(gallery.state().history.len(), 1);
}

#[tokio::test]
async fn test_regenerate_clears_previous_error() {
    let generator = GatedGenerator::new();
    let mut gallery = gallery_with(generator.clone(), Style::Warli);

    gallery.regenerate();
    generator.wait_for_calls(1).await;
    generator.release(0, Err(GenerationError::NoImageInResponse));
    gallery.process_next_event().await;
    assert!(gallery.state().error_message.is_some());

    gallery.regenerate();
    assert!(gallery.state().error_message.is_none());
    assert!(gallery.state().is_loading);
}

#[tokio::test]
async fn test_manual_reselect_of_active_style_is_noop() {
    let mut generator = MockGenerator::new();
    generator
        .expect_generate()
        .times(1)
        .returning(|_| Ok(png_uri("only")));
    let mut gallery = gallery_with(Arc::new(generator), Style::Pattachitra);

    assert!(gallery.select_style(Style::Pattachitra, Trigger::Manual));
    gallery.process_next_event().await;
    assert_eq!(gallery.state().history.len(), 1);

    assert!(!gallery.select_style(Style::Pattachitra, Trigger::Manual));
    assert!(!gallery.state().is_loading);
    assert_eq!(gallery.state().history.len(), 1);
}

#[tokio::test]
async fn test_manual_select_of_active_style_without_artwork_generates() {
    let generator = ScriptedGenerator::new();
    let mut gallery = gallery_with(generator.clone(), Style::Pattachitra);

    assert!(gallery.select_style(Style::Pattachitra, Trigger::Manual));
    gallery.process_next_event().await;
    assert_eq!(generator.calls(), vec![Style::Pattachitra]);
}

#[tokio::test]
async fn test_auto_select_of_active_style_still_generates() {
    let generator = ScriptedGenerator::new();
    let mut gallery = gallery_with(generator.clone(), Style::Warli);

    gallery.regenerate();
    gallery.process_next_event().await;

    assert!(gallery.select_style(Style::Warli, Trigger::Auto));
    gallery.process_next_event().await;
    assert_eq!(generator.call_count(), 2);
    assert_eq!(gallery.state().history.len(), 2);
}

#[tokio::test]
async fn test_select_history_item_never_generates() {
    let generator = ScriptedGenerator::new();
    let mut gallery = gallery_with(generator.clone(), Style::Warli);

    gallery.regenerate();
    gallery.process_next_event().await;
    gallery.select_style(Style::Bapu, Trigger::Manual);
    gallery.process_next_event().await;
    assert_eq!(generator.call_count(), 2);

    let older = Arc::clone(&gallery.state().history[1]);
    gallery.toggle_auto_tour();
    assert!(gallery.select_history_item(older.id));

    let state = gallery.state();
    assert_eq!(state.history.len(), 2);
    assert!(Arc::ptr_eq(state.current_artwork.as_ref().unwrap(), &older));
    assert_eq!(state.current_style, Style::Warli);
    assert!(!state.is_auto_touring);
    assert!(!state.is_loading);
    assert_eq!(generator.call_count(), 2);
}

#[tokio::test]
async fn test_select_unknown_history_item_changes_nothing() {
    let generator = ScriptedGenerator::new();
    let mut gallery = gallery_with(generator, Style::Warli);
    gallery.toggle_auto_tour();

    assert!(!gallery.select_history_item(Uuid::new_v4()));
    assert!(gallery.state().is_auto_touring);
    assert!(gallery.state().current_artwork.is_none());
}

#[tokio::test]
async fn test_manual_select_stops_auto_tour() {
    let generator = ScriptedGenerator::new();
    let mut gallery = gallery_with(generator, Style::Warli);

    gallery.toggle_auto_tour();
    assert!(gallery.state().is_auto_touring);
    gallery.select_style(Style::Bapu, Trigger::Manual);
    assert!(!gallery.state().is_auto_touring);
}

#[tokio::test]
async fn test_retry_stops_auto_tour() {
    let generator = ScriptedGenerator::new();
    let mut gallery = gallery_with(generator, Style::Warli);

    gallery.toggle_auto_tour();
    gallery.retry();
    assert!(!gallery.state().is_auto_touring);
    assert!(gallery.state().is_loading);
}

#[tokio::test(start_paused = true)]
async fn test_auto_tour_advances_after_interval() {
    let generator = ScriptedGenerator::new();
    let mut gallery = gallery_with(generator.clone(), Style::Warli);

    gallery.toggle_auto_tour();
    assert!(gallery.is_tour_armed());

    let start = tokio::time::Instant::now();
    gallery.process_next_event().await;
    let waited = start.elapsed();
    assert!(waited >= TOUR_INTERVAL, "advanced after {:?}", waited);
    assert!(waited < TOUR_INTERVAL + Duration::from_secs(1));

    let state = gallery.state();
    assert_eq!(state.current_style, Style::Pattachitra);
    assert!(state.is_auto_touring);
    assert!(state.is_loading);
    assert!(!gallery.is_tour_armed());

    gallery.process_next_event().await;
    assert_eq!(generator.calls(), vec![Style::Pattachitra]);
    assert!(gallery.state().is_auto_touring);
    assert!(gallery.is_tour_armed());
}

#[tokio::test(start_paused = true)]
async fn test_auto_tour_wraps_from_last_to_first() {
    let generator = ScriptedGenerator::new();
    let mut gallery = gallery_with(generator.clone(), Style::Bapu);

    gallery.toggle_auto_tour();
    gallery.process_next_event().await; // tick
    assert_eq!(gallery.state().current_style, Style::Warli);
    gallery.process_next_event().await; // settled
    gallery.process_next_event().await; // tick
    assert_eq!(gallery.state().current_style, Style::Pattachitra);
    gallery.process_next_event().await; // settled

    assert_eq!(generator.calls(), vec![Style::Warli, Style::Pattachitra]);
    assert_eq!(gallery.state().history.len(), 2);
    assert!(gallery.state().is_auto_touring);
}

#[tokio::test(start_paused = true)]
async fn test_manual_click_during_delay_cancels_pending_advance() {
    let generator = ScriptedGenerator::new();
    let mut gallery = gallery_with(generator.clone(), Style::Warli);

    gallery.toggle_auto_tour();
    tokio::time::sleep(Duration::from_secs(5)).await;

    gallery.select_style(Style::Bapu, Trigger::Manual);
    assert!(!gallery.state().is_auto_touring);
    gallery.process_next_event().await;
    assert_eq!(gallery.state().current_style, Style::Bapu);
    assert!(!gallery.is_tour_armed());

    let next = tokio::time::timeout(Duration::from_secs(60), gallery.next_event()).await;
    assert!(next.is_err(), "no further event expected, got {:?}", next);
    assert_eq!(generator.calls(), vec![Style::Bapu]);
    assert_eq!(gallery.state().current_style, Style::Bapu);
}

#[tokio::test(start_paused = true)]
async fn test_tour_never_armed_while_loading() {
    let generator = GatedGenerator::new();
    let mut gallery = gallery_with(generator.clone(), Style::Warli);

    gallery.regenerate();
    gallery.toggle_auto_tour();
    assert!(gallery.state().is_auto_touring);
    assert!(!gallery.is_tour_armed());

    // Nothing fires while the request is outstanding
    generator.wait_for_calls(1).await;
    let next = tokio::time::timeout(Duration::from_secs(60), gallery.next_event()).await;
    assert!(next.is_err());

    generator.release(0, Ok(png_uri("done")));
    gallery.process_next_event().await;
    assert!(gallery.is_tour_armed());
}

#[tokio::test(start_paused = true)]
async fn test_toggle_twice_disarms() {
    let generator = ScriptedGenerator::new();
    let mut gallery = gallery_with(generator.clone(), Style::Warli);

    gallery.toggle_auto_tour();
    gallery.toggle_auto_tour();
    assert!(!gallery.is_tour_armed());

    let next = tokio::time::timeout(Duration::from_secs(60), gallery.next_event()).await;
    assert!(next.is_err());
    assert_eq!(generator.call_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_tour_continues_after_failed_generation() {
    let generator = ScriptedGenerator::new();
    generator.push_err(upstream_error());
    let mut gallery = gallery_with(generator.clone(), Style::Warli);

    gallery.toggle_auto_tour();
    gallery.process_next_event().await; // tick -> Pattachitra
    gallery.process_next_event().await; // failure

    let state = gallery.state();
    assert_eq!(state.current_style, Style::Pattachitra);
    assert_eq!(state.error_message.as_deref(), Some(GENERIC_FAILURE_MESSAGE));
    assert!(state.is_auto_touring);
    assert!(gallery.is_tour_armed());

    gallery.process_next_event().await; // tick -> Bapu
    assert_eq!(gallery.state().current_style, Style::Bapu);
    assert!(gallery.state().error_message.is_none());
}

#[tokio::test(start_paused = true)]
async fn test_shutdown_cancels_tour() {
    let generator = ScriptedGenerator::new();
    let mut gallery = gallery_with(generator.clone(), Style::Warli);

    gallery.toggle_auto_tour();
    gallery.shutdown();
    assert!(!gallery.is_tour_armed());
    assert!(!gallery.state().is_auto_touring);

    let next = tokio::time::timeout(Duration::from_secs(60), gallery.next_event()).await;
    assert!(next.is_err());
    assert_eq!(generator.call_count(), 0);
}

#[tokio::test]
async fn test_stale_response_is_discarded() {
    let generator = GatedGenerator::new();
    let mut gallery = gallery_with(generator.clone(), Style::Warli);

    gallery.regenerate();
    gallery.select_style(Style::Bapu, Trigger::Manual);
    generator.wait_for_calls(2).await;

    // Newer request settles first
    assert_eq!(generator.release(1, Ok(png_uri("bapu"))), Style::Bapu);
    gallery.process_next_event().await;
    assert!(!gallery.state().is_loading);
    assert_eq!(
        gallery.state().current_artwork.as_ref().unwrap().url,
        png_uri("bapu")
    );

    // Older one arrives late and must not overwrite
    assert_eq!(generator.release(0, Ok(png_uri("warli"))), Style::Warli);
    gallery.process_next_event().await;

    let state = gallery.state();
    assert_eq!(state.history.len(), 1);
    assert_eq!(state.current_artwork.as_ref().unwrap().url, png_uri("bapu"));
    assert_eq!(state.current_style, Style::Bapu);
}

#[tokio::test]
async fn test_loading_tracks_newest_request() {
    let generator = GatedGenerator::new();
    let mut gallery = gallery_with(generator.clone(), Style::Warli);

    gallery.regenerate();
    gallery.select_style(Style::Pattachitra, Trigger::Manual);
    generator.wait_for_calls(2).await;

    // The stale failure neither clears loading nor shows an error
    generator.release(0, Err(GenerationError::NoImageInResponse));
    gallery.process_next_event().await;
    assert!(gallery.state().is_loading);
    assert!(gallery.state().error_message.is_none());

    generator.release(1, Ok(png_uri("patta")));
    gallery.process_next_event().await;
    assert!(!gallery.state().is_loading);
    assert_eq!(gallery.state().history.len(), 1);
    assert_eq!(gallery.state().current_style, Style::Pattachitra);
}

#[tokio::test]
async fn test_incomplete_catalog_is_rejected() {
    let catalog = PromptCatalog::new(
        [Style::Warli, Style::Pattachitra]
            .into_iter()
            .filter_map(|s| PromptCatalog::builtin().get(s).cloned()),
    );
    let result = Gallery::new(
        ScriptedGenerator::new(),
        Arc::new(catalog),
        GalleryOptions::default(),
    );
    assert!(matches!(result, Err(CatalogError::MissingPrompt(Style::Bapu))));
}
