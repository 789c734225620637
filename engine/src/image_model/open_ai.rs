use std::pin::Pin;

use log::debug;
use reqwest::Client;

use crate::{
    env::ApiKey,
    image_model::{GenerateError, Image, ImageModel, Model, PayloadSource, Settings},
};

pub mod open_ai_api;
use open_ai_api::{GenerationRequest, Payload};

/// Client for the OpenAI `images/generations` endpoint, or anything speaking the same protocol
#[derive(Debug, Clone)]
pub struct OpenAIImages {
    client: Client,
    api_key: ApiKey,
    base_url: String,
    settings: Settings,
}

impl OpenAIImages {
    pub fn new(api_key: ApiKey, base_url: impl Into<String>, settings: Settings) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: base_url.into(),
            settings,
        }
    }
}

impl ImageModel for OpenAIImages {
    fn get_image<'a>(
        &'a self,
        prompt: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Image, GenerateError>> + Send + 'a>> {
        Box::pin(async move {
            let request = GenerationRequest {
                model: self.settings.model,
                prompt,
                size: self.settings.size,
                quality: self.settings.quality,
                n: 1,
            };
            let response = open_ai_api::query(
                &request,
                &self.base_url,
                self.api_key.expose(),
                &self.client,
            )
            .await?;
            debug!(
                "Query response: created {:?}, {} item(s)",
                response.created,
                response.data.len()
            );

            match response.payload()? {
                Payload::Url(url) => {
                    let data = open_ai_api::fetch(&url, &self.client).await?;
                    Ok(Image {
                        data,
                        source: PayloadSource::Url(url),
                    })
                }
                Payload::Inline(b64) => Ok(Image {
                    data: open_ai_api::decode(&b64)?,
                    source: PayloadSource::Inline,
                }),
            }
        })
    }

    fn model(&self) -> Model {
        self.settings.model
    }
}
