mod classify;
mod config;
mod error;
mod prompt;
mod tools;
mod transcript;
mod vision;

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use crate::config::Config;
use crate::error::GlanceError;
use crate::tools::file::ReadFileTool;
use crate::tools::vision_proxy::VisionReadTool;
use crate::tools::{ToolContext, ToolRegistry};
use crate::vision::VisionAnalyzer;

#[tokio::main]
async fn main() {
    // Load .env file (if present) before anything reads env vars
    dotenvy::dotenv().ok();

    let args: Vec<String> = std::env::args().collect();

    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_usage();
        return;
    }

    if args.iter().any(|a| a == "--default-config") {
        print!("{}", Config::default_config_contents());
        return;
    }

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // Load config
    let config_path = args
        .iter()
        .position(|a| a == "--config")
        .and_then(|i| args.get(i + 1))
        .map(PathBuf::from);

    let config = match Config::load(config_path.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            error!("failed to load config: {e}");
            std::process::exit(1);
        }
    };

    let model_flag = args
        .iter()
        .position(|a| a == "--model")
        .and_then(|i| args.get(i + 1))
        .cloned();

    // Positional args, skipping flag values
    let mut positional = Vec::new();
    let mut iter = args.iter().skip(1);
    while let Some(a) = iter.next() {
        if a == "--config" || a == "--model" {
            iter.next();
            continue;
        }
        if a.starts_with('-') {
            continue;
        }
        positional.push(a.clone());
    }

    let analyzer = Arc::new(VisionAnalyzer::new(&config));

    match positional.first().map(String::as_str) {
        Some("read") => {
            let Some(path) = positional.get(1) else {
                print_usage();
                std::process::exit(2);
            };
            run_read(path, model_flag, analyzer).await;
        }
        Some(path) => run_analyze(path, analyzer).await,
        None => {
            print_usage();
            std::process::exit(2);
        }
    }
}

/// Manual analysis of a single image, cancellable with Ctrl+C.
async fn run_analyze(image_path: &str, analyzer: Arc<VisionAnalyzer>) {
    if !classify::is_supported_image(image_path) {
        error!("not a supported image: {image_path} (expected jpg, jpeg, png, gif, or webp)");
        std::process::exit(1);
    }

    let cancel = CancellationToken::new();
    println!("Analyzing {image_path} with {}...", analyzer.model());

    let result = tokio::select! {
        result = analyzer.analyze(image_path, cancel.clone()) => result,
        _ = tokio::signal::ctrl_c() => {
            cancel.cancel();
            println!("Cancelled");
            return;
        }
    };

    match result {
        Ok(text) => println!("{text}"),
        Err(GlanceError::Aborted) => println!("Cancelled"),
        Err(e) => {
            error!("image analysis failed: {e}");
            std::process::exit(1);
        }
    }
}

/// Exercise the tool-read shim the way a host would: `read_file` is served
/// by the vision proxy, so image paths are redirected when the model
/// cannot see them and everything else passes through unchanged.
async fn run_read(path: &str, model: Option<String>, analyzer: Arc<VisionAnalyzer>) {
    let mut registry = ToolRegistry::new();
    registry.register(Box::new(VisionReadTool::wrap(
        Box::new(ReadFileTool),
        analyzer,
    )));

    let (tx, mut rx) = mpsc::unbounded_channel::<crate::tools::ProgressUpdate>();
    let printer = tokio::spawn(async move {
        while let Some(update) = rx.recv().await {
            if update.done {
                if let Some(model) = update.model {
                    info!(model = %model, "analysis complete");
                }
            } else {
                println!("{}", update.message);
            }
        }
    });

    let mut ctx = ToolContext::new(model);
    ctx.progress = Some(tx);
    let cancel = ctx.cancel.clone();

    let result = tokio::select! {
        result = registry.execute("read_file", serde_json::json!({ "path": path }), &ctx) => result,
        _ = tokio::signal::ctrl_c() => {
            cancel.cancel();
            println!("Cancelled");
            return;
        }
    };

    drop(ctx);
    let _ = printer.await;

    match result {
        Ok(output) if output.success => println!("{}", output.output),
        Ok(output) => {
            error!("read failed: {}", output.output);
            std::process::exit(1);
        }
        Err(GlanceError::Aborted) => println!("Cancelled"),
        Err(e) => {
            error!("{e}");
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!(
        r#"glance — vision-model proxy for image reads

Usage:
  glance [options] <image-path>         Analyze an image with the vision model
  glance [options] read <path>          Run a file read through the proxy shim

Options:
  --config <path>      Config file (default: $XDG_CONFIG_HOME/glance/config.toml)
  --model <id>         Active model id for `read` (decides proxy vs pass-through)
  --default-config     Print the example config and exit
  -h, --help           Show this help

Environment:
  GLANCE_VISION_BIN    Override the vision CLI binary
  GLANCE_VISION_MODEL  Override the vision model identifier"#
    );
}
