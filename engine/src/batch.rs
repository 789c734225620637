use std::{
    fmt,
    path::{Path, PathBuf},
};

use log::{error, info};

use crate::{
    image_model::{GenerateError, ImageModel, PayloadSource},
    prompt_table::{Entry, PromptTable},
};

pub struct EntryOutcome {
    pub filename: String,
    pub result: Result<PathBuf, GenerateError>,
}

pub struct BatchReport {
    pub outcomes: Vec<EntryOutcome>,
}

impl BatchReport {
    pub fn succeeded(&self) -> impl Iterator<Item = &EntryOutcome> {
        self.outcomes.iter().filter(|o| o.result.is_ok())
    }

    pub fn failed(&self) -> impl Iterator<Item = &EntryOutcome> {
        self.outcomes.iter().filter(|o| o.result.is_err())
    }

    pub fn all_succeeded(&self) -> bool {
        self.failed().next().is_none()
    }
}

impl fmt::Display for BatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for outcome in &self.outcomes {
            match &outcome.result {
                Ok(_) => writeln!(f, "  ✓ {}", outcome.filename)?,
                Err(err) => writeln!(f, "  ✗ {}: {err}", outcome.filename)?,
            }
        }
        write!(
            f,
            "{} succeeded, {} failed",
            self.succeeded().count(),
            self.failed().count()
        )
    }
}

/// Generates the image for one entry and writes it to `out_dir/filename`,
/// replacing whatever was there.
pub async fn generate(
    model: &(dyn ImageModel + Sync),
    entry: &Entry,
    out_dir: &Path,
) -> Result<PathBuf, GenerateError> {
    let image = model.get_image(&entry.prompt).await?;
    match &image.source {
        PayloadSource::Url(url) => info!("  fetched {} bytes from {url}", image.data.len()),
        PayloadSource::Inline => info!("  decoded {} inline bytes", image.data.len()),
    }

    let path = out_dir.join(&entry.filename);
    tokio::fs::write(&path, &image.data)
        .await
        .map_err(|source| GenerateError::Write {
            path: path.clone(),
            source,
        })?;
    Ok(path)
}

/// Runs every entry once, in table order. A failing entry is logged and
/// recorded, the rest still run.
pub async fn run_batch(
    model: &(dyn ImageModel + Sync),
    table: &PromptTable,
    out_dir: &Path,
) -> BatchReport {
    let mut outcomes = Vec::with_capacity(table.len());

    for entry in table.iter() {
        info!("Generating {}...", entry.filename);
        let result = generate(model, entry, out_dir).await;
        match &result {
            Ok(path) => info!("  ✓ Saved {}", path.display()),
            Err(err) => error!("  ✗ Error generating {}: {err}", entry.filename),
        }
        outcomes.push(EntryOutcome {
            filename: entry.filename.clone(),
            result,
        });
    }

    BatchReport { outcomes }
}

#[cfg(test)]
mod tests {
    use std::{collections::HashMap, pin::Pin, sync::Mutex};

    use bytes::Bytes;
    use color_eyre::Result;
    use reqwest::StatusCode;

    use super::*;
    use crate::image_model::{Image, Model};

    /// Answers prompts from a fixed script and records what it was asked
    struct ScriptedModel {
        answers: HashMap<&'static str, Option<&'static [u8]>>,
        calls: Mutex<Vec<String>>,
    }

    impl ScriptedModel {
        fn new(answers: impl IntoIterator<Item = (&'static str, Option<&'static [u8]>)>) -> Self {
            Self {
                answers: answers.into_iter().collect(),
                calls: Mutex::default(),
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl ImageModel for ScriptedModel {
        fn get_image<'a>(
            &'a self,
            prompt: &'a str,
        ) -> Pin<Box<dyn Future<Output = Result<Image, GenerateError>> + Send + 'a>> {
            self.calls.lock().unwrap().push(prompt.to_string());
            let answer = self.answers.get(prompt).copied().flatten();
            Box::pin(async move {
                match answer {
                    Some(data) => Ok(Image {
                        data: Bytes::from_static(data),
                        source: PayloadSource::Inline,
                    }),
                    None => Err(GenerateError::Api {
                        status: StatusCode::INTERNAL_SERVER_ERROR,
                        message: format!("cannot draw {prompt}"),
                    }),
                }
            })
        }

        fn model(&self) -> Model {
            Model::default()
        }
    }

    fn table(entries: &[(&str, &str)]) -> PromptTable {
        PromptTable::new(entries.iter().map(|(f, p)| Entry::new(*f, *p)).collect()).unwrap()
    }

    #[tokio::test]
    async fn every_entry_runs_once_in_order() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let model = ScriptedModel::new([
            ("first", None),
            ("second", Some(b"two".as_slice())),
            ("third", None),
            ("fourth", Some(b"four".as_slice())),
        ]);
        let table = table(&[
            ("1.png", "first"),
            ("2.png", "second"),
            ("3.png", "third"),
            ("4.png", "fourth"),
        ]);

        let report = run_batch(&model, &table, dir.path()).await;

        assert_eq!(model.calls(), ["first", "second", "third", "fourth"]);
        let order: Vec<_> = report.outcomes.iter().map(|o| o.filename.as_str()).collect();
        assert_eq!(order, ["1.png", "2.png", "3.png", "4.png"]);
        assert_eq!(report.succeeded().count(), 2);
        assert_eq!(report.failed().count(), 2);
        assert!(!report.all_succeeded());

        assert!(!dir.path().join("1.png").exists());
        assert_eq!(std::fs::read(dir.path().join("2.png"))?, b"two");
        assert!(!dir.path().join("3.png").exists());
        assert_eq!(std::fs::read(dir.path().join("4.png"))?, b"four");
        Ok(())
    }

    #[tokio::test]
    async fn write_failure_is_recorded_not_fatal() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let model = ScriptedModel::new([("x", Some(b"x".as_slice())), ("y", Some(b"y".as_slice()))]);
        let table = table(&[("missing-dir/x.png", "x"), ("y.png", "y")]);

        let report = run_batch(&model, &table, dir.path()).await;

        assert!(matches!(
            report.outcomes[0].result,
            Err(GenerateError::Write { .. })
        ));
        assert_eq!(std::fs::read(dir.path().join("y.png"))?, b"y");
        Ok(())
    }

    #[tokio::test]
    async fn overwrites_existing_output() -> Result<()> {
        let dir = tempfile::tempdir()?;
        std::fs::write(dir.path().join("a.png"), b"old and much longer content")?;
        let model = ScriptedModel::new([("a", Some(b"new".as_slice()))]);

        let report = run_batch(&model, &table(&[("a.png", "a")]), dir.path()).await;

        assert!(report.all_succeeded());
        assert_eq!(std::fs::read(dir.path().join("a.png"))?, b"new");
        Ok(())
    }

    #[tokio::test]
    async fn summary_lists_every_entry() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let model = ScriptedModel::new([("good", Some(b"ok".as_slice())), ("bad", None)]);
        let report = run_batch(&model, &table(&[("a.png", "bad"), ("b.png", "good")]), dir.path()).await;

        assert_eq!(
            report.to_string(),
            "  ✗ a.png: API error (500 Internal Server Error): cannot draw bad\n  ✓ b.png\n1 succeeded, 1 failed"
        );
        Ok(())
    }
}
