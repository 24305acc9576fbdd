//! Command-line entry point: read a recommendation request as JSON, print the
//! recommendation as JSON.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use wps_recommender::wps::{default_rules, load_rules, RecommendRequest, WpsEngine};

/// Command-line arguments for wps-recommend
#[derive(Parser, Debug)]
#[command(name = "wps-recommend")]
#[command(about = "Recommend welding procedure parameters for a weld")]
#[command(version)]
struct Args {
    /// Request JSON with `inputs` and `catalogs`
    request: PathBuf,

    /// Rule file replacing the embedded rule tables
    #[arg(long, env = "WPS_RULES")]
    rules: Option<PathBuf>,
}

fn read_request(path: &Path) -> Result<RecommendRequest> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read request {}", path.display()))?;
    let request: RecommendRequest = serde_json::from_str(&content)
        .with_context(|| format!("invalid request JSON in {}", path.display()))?;
    Ok(request)
}

fn main() -> Result<()> {
    wps_recommender::init_logging();

    let args = Args::parse();
    let rules = match &args.rules {
        Some(path) => load_rules(path)?,
        None => default_rules(),
    };
    let engine = WpsEngine::new(rules);

    let request = read_request(&args.request)?;
    request.inputs.validate(&engine.rules().limits)?;

    let recommendation = engine.recommend(&request.inputs, &request.catalogs);
    info!(
        "Recommended {} passes with {} notes",
        recommendation.pass_plan().len(),
        recommendation.notes().len()
    );

    println!("{}", serde_json::to_string_pretty(&recommendation)?);
    Ok(())
}
