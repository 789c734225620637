use base64::{Engine, prelude::BASE64_STANDARD};
use bytes::Bytes;
use log::debug;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::image_model::{GenerateError, Model, Quality, Size};

#[derive(Debug, Serialize)]
pub struct GenerationRequest<'a> {
    pub model: Model,
    pub prompt: &'a str,
    pub size: Size,
    pub quality: Quality,
    pub n: u8,
}

#[derive(Debug, Deserialize)]
pub struct GenerationResponse {
    #[serde(default)]
    pub created: Option<u64>,
    #[serde(default)]
    pub data: Vec<ImageData>,
}

#[derive(Debug, Deserialize)]
pub struct ImageData {
    pub url: Option<String>,
    pub b64_json: Option<String>,
    pub revised_prompt: Option<String>,
}

#[derive(Debug, PartialEq, Eq)]
pub enum Payload {
    Url(String),
    Inline(String),
}

impl GenerationResponse {
    /// Picks the image out of the first datum. A URL wins over an inline payload.
    pub fn payload(self) -> Result<Payload, GenerateError> {
        let ImageData { url, b64_json, .. } = self
            .data
            .into_iter()
            .next()
            .ok_or(GenerateError::MissingPayload)?;

        if let Some(url) = url.filter(|u| !u.is_empty()) {
            Ok(Payload::Url(url))
        } else if let Some(b64) = b64_json.filter(|b| !b.is_empty()) {
            Ok(Payload::Inline(b64))
        } else {
            Err(GenerateError::MissingPayload)
        }
    }
}

/// Requests a single image for `request.prompt`
pub async fn query(
    request: &GenerationRequest<'_>,
    base_url: &str,
    api_key: &str,
    client: &Client,
) -> Result<GenerationResponse, GenerateError> {
    let resp = client
        .post(format!("{}/images/generations", base_url.trim_end_matches('/')))
        .bearer_auth(api_key)
        .json(request)
        .send()
        .await?;

    let status = resp.status();
    let body = resp.text().await?;

    if !status.is_success() {
        return Err(GenerateError::from_response(status, &body));
    }

    Ok(serde_json::from_str(&body)?)
}

/// Plain GET of an image by URL
pub async fn fetch(url: &str, client: &Client) -> Result<Bytes, GenerateError> {
    let resp = client.get(url).send().await?;
    let status = resp.status();
    if !status.is_success() {
        return Err(GenerateError::Download {
            url: url.to_string(),
            status,
        });
    }
    let bytes = resp.bytes().await?;
    debug!("Fetched {} bytes from {url}", bytes.len());
    Ok(bytes)
}

pub fn decode(b64: &str) -> Result<Bytes, GenerateError> {
    Ok(BASE64_STANDARD.decode(b64.trim())?.into())
}
