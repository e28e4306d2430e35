// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Client for the upstream text-generation endpoint.
//!
//! One request per call: no retries, no streaming. The caller re-invokes
//! on failure.

use crate::error::AppError;
use crate::models::Flashcard;
use serde::Serialize;
use std::time::Duration;

#[derive(Serialize)]
struct GenerateRequest<'a> {
    text: &'a str,
}

/// Turns free-form text into flashcards via the generation endpoint.
#[derive(Clone)]
pub struct GenerationClient {
    http: reqwest::Client,
    endpoint: String,
}

impl GenerationClient {
    /// Create a client for `endpoint`, failing any request that runs past `timeout`.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            endpoint: endpoint.into(),
        })
    }

    /// Generate flashcards for `text`.
    ///
    /// Blank text is rejected before any network traffic. Every element of a
    /// successful result carries both a front and a back.
    pub async fn generate(&self, text: &str) -> Result<Vec<Flashcard>, AppError> {
        if text.trim().is_empty() {
            return Err(AppError::Validation(
                "Enter some text to generate flashcards from".to_string(),
            ));
        }

        let response = self
            .http
            .post(&self.endpoint)
            .json(&GenerateRequest { text })
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    tracing::warn!(endpoint = %self.endpoint, "Generation request timed out");
                }
                AppError::GenerationFailed(e.to_string())
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(
                status = status.as_u16(),
                body = %body,
                "Generation endpoint returned an error"
            );
            return Err(AppError::GenerationFailed(format!(
                "Generation endpoint returned HTTP {}",
                status.as_u16()
            )));
        }

        let flashcards: Vec<Flashcard> = response
            .json()
            .await
            .map_err(|e| AppError::GenerationFailed(format!("JSON parse error: {}", e)))?;

        tracing::debug!(
            input_len = text.len(),
            card_count = flashcards.len(),
            "Flashcards generated"
        );

        Ok(flashcards)
    }
}
