#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use clap::Parser;
use eframe::{egui, NativeOptions};
use std::path::PathBuf;
use std::sync::Arc;

use linguasync::app::{LinguaSyncApp, SharedClient};
use linguasync::config::{self, Config};
use linguasync::orchestrator::GeminiClient;

#[derive(Parser, Debug)]
#[command(name = "linguasync", about = "Segment and align translations across languages")]
struct Args {
    /// Path to the TOML config file. Missing file means defaults.
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// Model name, overriding the config file.
    #[arg(long)]
    model: Option<String>,
}

fn main() -> Result<(), eframe::Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let (mut config, config_error) = match config::load_config_from_file(&args.config) {
        Ok(loaded_config) => (loaded_config, None),
        Err(err_msg) => {
            log::error!("Error loading {}: {}", args.config.display(), err_msg);
            (Config::default(), Some(err_msg))
        }
    };
    if let Some(model) = args.model {
        config.model = model;
    }

    let api_key = config.api_key_from_env();
    if api_key.is_none() {
        log::warn!(
            "No API key found in ${}; translation requests will fail until it is set",
            config.api_key_env
        );
    }
    let client = GeminiClient::new(&config, api_key).map(|c| Arc::new(c) as SharedClient);
    if let Err(e) = &client {
        log::error!("Could not build HTTP client: {}", e);
    }

    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1024.0, 800.0])
            .with_min_inner_size([640.0, 480.0]),
        ..Default::default()
    };
    eframe::run_native(
        "LinguaSync",
        options,
        Box::new(move |cc| Box::new(LinguaSyncApp::new(cc, config, config_error, client))),
    )
}
