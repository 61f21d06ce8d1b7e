// SPDX-FileCopyrightText: 2025 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use lint_page::{capture, config, engine};

#[derive(Parser, Debug)]
#[command(name = "lint-page")]
struct Args {
    /// Path to the JSON page capture
    #[arg(long)]
    capture: String,

    /// Optional config TOML path (rule toggles and parameters)
    #[arg(long)]
    config: Option<String>,

    /// Pretty-print the JSON report
    #[arg(long)]
    pretty: bool,
}

async fn load_config(path: Option<&str>) -> anyhow::Result<config::Config> {
    match path {
        Some(p) => config::Config::load_from_path(p).await,
        None => Ok(config::Config::default()),
    }
}

async fn run(args: &Args) -> anyhow::Result<String> {
    let cfg = load_config(args.config.as_deref()).await?;
    let engine = engine::Engine::from_config(&cfg)?;
    let graph = capture::load_graph(&args.capture, &cfg.general).await?;
    info!(
        capture = %args.capture,
        resources = graph.num_resources(),
        rules = engine.rule_names().len(),
        "running rules"
    );

    let report = engine.run(&graph);
    let out = if args.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    Ok(out)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    println!("{}", run(&args).await?);
    Ok(())
}
