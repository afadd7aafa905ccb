//! Image acquisition for one fallback-chain attempt.
//!
//! Each remote attempt is bounded by the configured timeout; a timeout
//! counts as a plain failure, and the session controller advances the
//! chain. The credentialed attempt sends the configured auth token;
//! the retry goes out anonymously.

use anyhow::{Context, Result};
use image::DynamicImage;
use reqwest::Client;
use tokio::time::timeout;
use tracing::{debug, info, instrument, warn};

use fifteen_core::{LoadAttempt, PieceSet};

use crate::config::ImagesConfig;
use crate::images::catalog::pick_random_image;
use crate::images::fallback::fallback_image;
use crate::images::split::{split_into_grid, Piece};

/// Executes one load attempt, producing the 16 puzzle pieces.
#[instrument(skip(client, config))]
pub async fn fetch_pieces(
    client: &Client,
    config: &ImagesConfig,
    attempt: LoadAttempt,
) -> Result<PieceSet<Piece>> {
    let picture = match attempt {
        LoadAttempt::Remote { credentials } => {
            timeout(config.timeout(), fetch_remote(client, config, credentials))
                .await
                .map_err(|_| {
                    warn!(timeout = ?config.timeout(), "image fetch timed out");
                    anyhow::anyhow!("image fetch timed out")
                })??
        }
        LoadAttempt::Bundled => {
            info!("using bundled fallback picture");
            fallback_image()
        }
    };
    Ok(split_into_grid(&picture))
}

async fn fetch_remote(
    client: &Client,
    config: &ImagesConfig,
    credentials: bool,
) -> Result<DynamicImage> {
    let url = pick_random_image(client, config).await?;
    debug!(%url, credentials, "fetching image");

    let mut request = client.get(&url).header("User-Agent", "fifteen-puzzle");
    if credentials {
        if let Some(token) = config.token() {
            request = request.bearer_auth(token);
        }
    }

    let bytes = request
        .send()
        .await
        .context("image request failed")?
        .error_for_status()
        .context("image request rejected")?
        .bytes()
        .await
        .context("image body read failed")?;

    let picture = image::load_from_memory(&bytes).context("image decode failed")?;
    info!(
        width = picture.width(),
        height = picture.height(),
        "image fetched and decoded"
    );
    Ok(picture)
}
