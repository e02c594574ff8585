//! Narration synthesis from text to an MP3 audio track.

use std::path::Path;

use async_trait::async_trait;

use reelsmith_common::{ReelsmithError, ReelsmithResult};

/// Longest text slice sent in a single synthesis request.
pub const MAX_CHUNK_CHARS: usize = 200;

const TRANSLATE_TTS_ENDPOINT: &str = "https://translate.google.com/translate_tts";

/// A text-to-speech backend.
///
/// Implementations write a complete MP3 file to `output_path`; partial
/// output on failure is the caller's cleanup problem, not the backend's.
#[async_trait]
pub trait SynthesisBackend: Send + Sync {
    fn name(&self) -> &str;

    async fn synthesize(
        &self,
        text: &str,
        language: &str,
        output_path: &Path,
    ) -> ReelsmithResult<()>;
}

/// Backend using the Google Translate TTS endpoint.
///
/// The endpoint caps request length, so the text is chunked at whitespace
/// and the returned MP3 bodies are concatenated. MP3 frames are
/// self-delimiting, so plain byte concatenation yields a playable file.
pub struct TranslateTts {
    client: reqwest::Client,
}

impl TranslateTts {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for TranslateTts {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SynthesisBackend for TranslateTts {
    fn name(&self) -> &str {
        "translate-tts"
    }

    async fn synthesize(
        &self,
        text: &str,
        language: &str,
        output_path: &Path,
    ) -> ReelsmithResult<()> {
        let chunks = split_into_chunks(text, MAX_CHUNK_CHARS);
        if chunks.is_empty() {
            return Err(ReelsmithError::synthesis("Narration text is empty"));
        }

        tracing::info!(
            chunks = chunks.len(),
            language = language,
            "Synthesizing narration"
        );

        let total = chunks.len();
        let mut audio: Vec<u8> = Vec::new();
        for (idx, chunk) in chunks.iter().enumerate() {
            let query: Vec<(&str, String)> = vec![
                ("ie", "UTF-8".to_string()),
                ("client", "tw-ob".to_string()),
                ("tl", language.to_string()),
                ("q", chunk.clone()),
                ("total", total.to_string()),
                ("idx", idx.to_string()),
                ("textlen", chunk.chars().count().to_string()),
            ];

            let response = self
                .client
                .get(TRANSLATE_TTS_ENDPOINT)
                .query(&query)
                .send()
                .await
                .map_err(|e| {
                    ReelsmithError::synthesis(format!("Request for chunk {idx} failed: {e}"))
                })?;

            if !response.status().is_success() {
                return Err(ReelsmithError::synthesis(format!(
                    "Synthesis service returned {} for chunk {idx}",
                    response.status()
                )));
            }

            let body = response.bytes().await.map_err(|e| {
                ReelsmithError::synthesis(format!("Failed to read chunk {idx} body: {e}"))
            })?;
            audio.extend_from_slice(&body);
        }

        if audio.is_empty() {
            return Err(ReelsmithError::synthesis("Synthesis produced no audio"));
        }

        std::fs::write(output_path, &audio)?;
        tracing::info!(
            path = %output_path.display(),
            bytes = audio.len(),
            "Narration audio written"
        );
        Ok(())
    }
}

/// Split text at whitespace into chunks of at most `max_chars` characters.
///
/// A single word longer than `max_chars` becomes its own oversized chunk
/// rather than being split mid-word.
pub fn split_into_chunks(text: &str, max_chars: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        if current.is_empty() {
            current = word.to_string();
            current_len = word_len;
        } else if current_len + 1 + word_len <= max_chars {
            current.push(' ');
            current.push_str(word);
            current_len += 1 + word_len;
        } else {
            chunks.push(std::mem::take(&mut current));
            current = word.to_string();
            current_len = word_len;
        }
    }

    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}
