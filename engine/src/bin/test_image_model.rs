use std::path::{Path, PathBuf};

use clap::Parser;
use color_eyre::Result;
use engine::{batch::generate, env::ApiKey, image_model::Model, prompt_table::Entry};

#[derive(clap::Parser)]
struct Arg {
    model: Model,
    key: String,
    prompt: String,
    #[arg(default_value = "output.png")]
    out: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    pretty_env_logger::init();
    let Arg {
        model,
        key,
        prompt,
        out,
    } = Arg::parse();
    let model = model.make(ApiKey::new(key)?);

    let entry = Entry::new(out.to_string_lossy(), prompt);
    let path = generate(&*model, &entry, Path::new(".")).await?;
    println!("Saved image to {}, {} bytes", path.display(), std::fs::metadata(&path)?.len());

    Ok(())
}
