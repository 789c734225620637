use std::pin::Pin;

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

pub mod error;
pub use error::GenerateError;

pub mod open_ai;
pub use open_ai::OpenAIImages;

use crate::{DEFAULT_BASE_URL, ImgModBox, env::ApiKey};

#[derive(
    Debug,
    Clone,
    Copy,
    Display,
    clap::ValueEnum,
    Serialize,
    Deserialize,
    Hash,
    PartialEq,
    Eq,
    EnumIter,
    Default,
)]
pub enum Model {
    #[default]
    #[strum(to_string = "gpt-image-1")]
    #[value(name = "gpt-image-1")]
    #[serde(rename = "gpt-image-1")]
    GptImage1,
    #[strum(to_string = "gpt-image-1-mini")]
    #[value(name = "gpt-image-1-mini")]
    #[serde(rename = "gpt-image-1-mini")]
    GptImage1Mini,
}

/// Output resolution, serialized the way the images endpoint expects it.
#[derive(
    Debug,
    Clone,
    Copy,
    Display,
    clap::ValueEnum,
    Serialize,
    Deserialize,
    Hash,
    PartialEq,
    Eq,
    EnumIter,
    Default,
)]
pub enum Size {
    #[default]
    #[strum(to_string = "1024x1024")]
    #[value(name = "1024x1024")]
    #[serde(rename = "1024x1024")]
    Square,
    #[strum(to_string = "1536x1024")]
    #[value(name = "1536x1024")]
    #[serde(rename = "1536x1024")]
    Landscape,
    #[strum(to_string = "1024x1536")]
    #[value(name = "1024x1536")]
    #[serde(rename = "1024x1536")]
    Portrait,
    #[strum(to_string = "auto")]
    #[value(name = "auto")]
    #[serde(rename = "auto")]
    Auto,
}

#[derive(
    Debug,
    Clone,
    Copy,
    Display,
    clap::ValueEnum,
    Serialize,
    Deserialize,
    Hash,
    PartialEq,
    Eq,
    EnumIter,
    Default,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Quality {
    Low,
    #[default]
    Medium,
    High,
    Auto,
}

impl Model {
    pub fn make(&self, key: ApiKey) -> ImgModBox {
        Box::new(OpenAIImages::new(
            key,
            DEFAULT_BASE_URL,
            Settings {
                model: *self,
                ..Settings::default()
            },
        ))
    }
}

/// Everything sent with a prompt besides the prompt itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Settings {
    pub model: Model,
    pub size: Size,
    pub quality: Quality,
}

/// Where the bytes of an [`Image`] came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PayloadSource {
    Url(String),
    Inline,
}

pub struct Image {
    pub data: Bytes,
    pub source: PayloadSource,
}

pub trait ImageModel {
    fn get_image<'a>(
        &'a self,
        prompt: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Image, GenerateError>> + Send + 'a>>;

    fn model(&self) -> Model;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_fixed_request() {
        let settings = Settings::default();
        assert_eq!(settings.model.to_string(), "gpt-image-1");
        assert_eq!(settings.size.to_string(), "1024x1024");
        assert_eq!(settings.quality.to_string(), "medium");
    }

    #[test]
    fn serialized_names_match_display() {
        for size in <Size as strum::IntoEnumIterator>::iter() {
            assert_eq!(
                serde_json::to_value(size).unwrap(),
                serde_json::Value::String(size.to_string())
            );
        }
        for quality in <Quality as strum::IntoEnumIterator>::iter() {
            assert_eq!(
                serde_json::to_value(quality).unwrap(),
                serde_json::Value::String(quality.to_string())
            );
        }
    }
}
