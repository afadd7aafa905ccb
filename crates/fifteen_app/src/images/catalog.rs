//! Remote image catalog.
//!
//! Lists a repository's contents over HTTP, filters for image files,
//! and picks one at random. The catalog endpoint follows the GitHub
//! contents API shape: a JSON array of `{ name, type }` entries.

use anyhow::{bail, Context, Result};
use rand::Rng;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info, instrument};

use crate::config::ImagesConfig;

/// File extensions accepted as puzzle images.
const IMAGE_EXTENSIONS: [&str; 6] = [".jpeg", ".jpg", ".png", ".gif", ".webp", ".bmp"];

#[derive(Debug, Deserialize)]
struct CatalogEntry {
    name: String,
    #[serde(rename = "type")]
    kind: String,
}

/// True when `name` has one of the accepted image extensions.
fn is_image_name(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    IMAGE_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

/// Appends a cache-busting query parameter so a repeat of the same
/// image still fetches fresh bytes.
fn cache_busted(url: &str, nonce: u64) -> String {
    if url.contains('?') {
        format!("{url}&t={nonce}")
    } else {
        format!("{url}?t={nonce}")
    }
}

fn catalog_url(config: &ImagesConfig) -> String {
    format!(
        "https://api.github.com/repos/{}/{}/contents",
        config.owner, config.repo
    )
}

fn raw_url(config: &ImagesConfig, name: &str) -> String {
    format!(
        "https://raw.githubusercontent.com/{}/{}/{}/{}",
        config.owner, config.repo, config.branch, name
    )
}

/// Extracts the image file names from a catalog listing payload.
fn image_names(payload: &[CatalogEntry]) -> Vec<&str> {
    payload
        .iter()
        .filter(|e| e.kind == "file" && is_image_name(&e.name))
        .map(|e| e.name.as_str())
        .collect()
}

/// Picks a random image URL from the configured catalog.
#[instrument(skip(client, config), fields(owner = %config.owner, repo = %config.repo))]
pub async fn pick_random_image(client: &Client, config: &ImagesConfig) -> Result<String> {
    let url = catalog_url(config);
    debug!(%url, "listing image catalog");

    let entries: Vec<CatalogEntry> = client
        .get(&url)
        .header("User-Agent", "fifteen-puzzle")
        .send()
        .await
        .context("catalog request failed")?
        .error_for_status()
        .context("catalog request rejected")?
        .json()
        .await
        .context("catalog payload was not a contents listing")?;

    let names = image_names(&entries);
    if names.is_empty() {
        bail!("no image files in catalog");
    }

    let pick = names[rand::thread_rng().gen_range(0..names.len())];
    let url = cache_busted(&raw_url(config, pick), nonce());
    info!(image = pick, "picked catalog image");
    Ok(url)
}

fn nonce() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
