use std::path::PathBuf;

use engine::image_model::{Model, Quality, Size};

/// Generates every image of a prompt table, one after another
#[derive(Debug, clap::Parser)]
pub struct Cli {
    /// API key, takes precedence over OPENAI_API_KEY
    #[arg(long)]
    pub api_key: Option<String>,

    /// key=value file consulted before the process environment
    #[arg(long, default_value = ".env")]
    pub env_file: PathBuf,

    /// Defaults to OPENAI_BASE_URL, then the public OpenAI endpoint
    #[arg(long)]
    pub base_url: Option<String>,

    #[arg(long, value_enum, default_value_t)]
    pub model: Model,

    #[arg(long, value_enum, default_value_t)]
    pub size: Size,

    #[arg(long, value_enum, default_value_t)]
    pub quality: Quality,

    /// RON prompt table to use instead of the bundled one
    #[arg(long)]
    pub table: Option<PathBuf>,

    #[arg(short, long, default_value = ".")]
    pub out_dir: PathBuf,
}
