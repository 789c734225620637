use std::process::ExitCode;

use clap::Parser;
use color_eyre::{Result, eyre::Context};
use engine::{
    DEFAULT_BASE_URL,
    batch::run_batch,
    env::{ApiKey, BASE_URL_VAR, Env},
    image_model::{ImageModel, OpenAIImages, Settings},
    prompt_table::PromptTable,
};
use log::info;

mod cli;
use cli::Cli;

const BUNDLED_TABLE: &str = include_str!("../prompts.ron");

#[tokio::main]
async fn main() -> Result<ExitCode> {
    color_eyre::install()?;
    pretty_env_logger::formatted_builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
    let cli = Cli::parse();

    let env = Env::load(&cli.env_file)?;
    let api_key = match cli.api_key {
        Some(key) => ApiKey::new(key)?,
        None => env.api_key()?,
    };
    let base_url = cli
        .base_url
        .or_else(|| env.get(BASE_URL_VAR))
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    let table = match &cli.table {
        Some(path) => PromptTable::load(path)?,
        None => PromptTable::from_ron_str(BUNDLED_TABLE).context("bundled prompt table")?,
    };

    tokio::fs::create_dir_all(&cli.out_dir)
        .await
        .with_context(|| format!("creating {}", cli.out_dir.display()))?;

    let model = OpenAIImages::new(
        api_key,
        base_url,
        Settings {
            model: cli.model,
            size: cli.size,
            quality: cli.quality,
        },
    );
    info!(
        "Generating {} image(s) with {} ({}, {})",
        table.len(),
        model.model(),
        cli.size,
        cli.quality
    );

    let report = run_batch(&model, &table, &cli.out_dir).await;
    println!("\n{report}");

    Ok(if report.all_succeeded() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
