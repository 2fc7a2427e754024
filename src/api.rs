//! PokeAPI client with an on-disk response cache.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use serde::Deserialize;
use sha2::{Digest, Sha256};
use thiserror::Error;
use tokio::fs;

use crate::config;
use crate::words::{WordPool, WordSource};

const API_BASE: &str = "https://pokeapi.co/api/v2";
const SPRITE_BASE: &str = "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon";

#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Request(String),
    #[error("server responded with status {0}")]
    Status(u16),
    #[error("invalid response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(error: reqwest::Error) -> Self {
        FetchError::Request(error.to_string())
    }
}

#[derive(Clone, Debug, Deserialize)]
struct NamedResource {
    name: String,
}

#[derive(Clone, Debug, Deserialize)]
struct ListResponse {
    results: Vec<NamedResource>,
}

pub fn list_url(source: WordSource) -> String {
    format!("{API_BASE}/{}?limit={}", source.endpoint(), source.limit())
}

pub fn sprite_url(id: u16) -> String {
    format!("{SPRITE_BASE}/{id}.png")
}

/// Fetch every word source and merge whatever succeeded.
pub async fn fetch_words(use_cache: bool) -> WordPool {
    let (species, moves, abilities) = tokio::join!(
        fetch_names(WordSource::Species, use_cache),
        fetch_names(WordSource::Moves, use_cache),
        fetch_names(WordSource::Abilities, use_cache),
    );
    let pool = WordPool::from_results([
        (WordSource::Species, species),
        (WordSource::Moves, moves),
        (WordSource::Abilities, abilities),
    ]);
    tracing::info!(words = pool.len(), status = ?pool.status(), "word pool ready");
    pool
}

pub async fn fetch_names(source: WordSource, use_cache: bool) -> Result<Vec<String>, FetchError> {
    let response: ListResponse = fetch_json(&list_url(source), use_cache).await?;
    Ok(response
        .results
        .into_iter()
        .map(|entry| entry.name)
        .collect())
}

pub async fn fetch_bytes(url: &str, use_cache: bool) -> Result<Vec<u8>, FetchError> {
    if !use_cache {
        return download(url).await;
    }
    let cache_path = cache_path("http", url);
    if let Some(bytes) = read_cache(&cache_path).await {
        tracing::debug!(url, "cache hit");
        return Ok(bytes);
    }
    let bytes = download(url).await?;
    write_cache(&cache_path, &bytes).await;
    Ok(bytes)
}

async fn fetch_json<T: serde::de::DeserializeOwned>(
    url: &str,
    use_cache: bool,
) -> Result<T, FetchError> {
    let bytes = fetch_bytes(url, use_cache).await?;
    match serde_json::from_slice(&bytes) {
        Ok(value) => Ok(value),
        Err(err) => {
            if use_cache {
                let _ = fs::remove_file(cache_path("http", url)).await;
            }
            Err(FetchError::Decode(err.to_string()))
        }
    }
}

async fn download(url: &str) -> Result<Vec<u8>, FetchError> {
    tracing::debug!(url, "GET");
    let response = http_client().get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status(status.as_u16()));
    }
    Ok(response.bytes().await?.to_vec())
}

fn http_client() -> &'static reqwest::Client {
    static CLIENT: OnceLock<reqwest::Client> = OnceLock::new();
    CLIENT.get_or_init(reqwest::Client::new)
}

fn cache_path(kind: &str, url: &str) -> PathBuf {
    let mut hasher = Sha256::new();
    hasher.update(url.as_bytes());
    let digest = hex::encode(hasher.finalize());
    config::data_root().join(kind).join(digest)
}

async fn read_cache(path: &Path) -> Option<Vec<u8>> {
    fs::read(path).await.ok()
}

async fn write_cache(path: &Path, bytes: &[u8]) {
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent).await;
    }
    if let Err(error) = fs::write(path, bytes).await {
        tracing::debug!(path = %path.display(), %error, "cache write failed");
    }
}
