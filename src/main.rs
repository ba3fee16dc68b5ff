use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;

use heritage_gallery::api::GeminiClient;
use heritage_gallery::app::App;
use heritage_gallery::catalog::{PromptCatalog, Style};
use heritage_gallery::gallery::{Gallery, GalleryOptions};
use heritage_gallery::utils::config::Config;
use heritage_gallery::utils::{debug, logger};

#[derive(Parser)]
#[command(name = "heritage-gallery")]
#[command(about = "Heritage Gallery - AI-curated Indian art styles in your terminal", long_about = None)]
struct Cli {
    /// Image model to use
    #[arg(long)]
    model: Option<String>,

    /// Base URL of the generative language API
    #[arg(long)]
    api_url: Option<String>,

    /// Collection to open with (warli, pattachitra, bapu)
    #[arg(short, long)]
    style: Option<Style>,

    /// Start with auto-tour enabled
    #[arg(short, long)]
    tour: bool,

    /// Seconds between auto-tour advances
    #[arg(long)]
    interval: Option<u64>,

    /// Config file (default: ~/.heritage/config.yaml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable debug mode
    #[arg(short, long)]
    debug: bool,
}

impl Cli {
    fn apply_to(&self, config: &mut Config) {
        if let Some(model) = &self.model {
            config.model = model.clone();
        }
        if let Some(api_url) = &self.api_url {
            config.api_url = api_url.clone();
        }
        if let Some(style) = self.style {
            config.initial_style = style;
        }
        if let Some(interval) = self.interval {
            config.auto_tour_interval_secs = interval;
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.debug {
        debug::enable_debug();
    }
    if let Err(e) = logger::init_global_logger() {
        eprintln!("Failed to initialize logger: {}", e);
    }

    let mut config = Config::load_or_default(cli.config.as_deref())?;
    cli.apply_to(&mut config);
    logger::info(&format!(
        "Starting with model {} at {}",
        config.model, config.api_url
    ));

    let catalog = Arc::new(
        PromptCatalog::builtin()
            .with_overrides(&config.prompts)
            .context("Invalid prompt overrides in config")?,
    );
    let client = GeminiClient::from_config(&config, Arc::clone(&catalog))
        .context("Failed to create HTTP client")?;

    let mut gallery = Gallery::new(
        Arc::new(client),
        catalog,
        GalleryOptions {
            initial_style: config.initial_style,
            tour_interval: config.auto_tour_interval(),
        },
    )?;
    if cli.tour {
        gallery.toggle_auto_tour();
    }

    App::new(gallery).run().await
}
