//! Export readiness barrier for remote images
//!
//! Every image a scene references is fetched and decoded before any pixel is
//! rasterized. Each asset gets a bounded time budget; a failed or timed-out
//! fetch is retried once with a cache-busting query parameter (stale CDN
//! cache entries with missing CORS-equivalent headers were a recurring cause
//! of tainted captures). An asset that still cannot be fetched degrades to a
//! 1x1 transparent placeholder so a single broken logo never blocks the
//! export.

use std::collections::HashMap;
use std::time::Duration;

use chrono::Utc;
use futures::future::join_all;
use image::RgbaImage;
use tracing::{debug, warn};

/// Append a cache-busting parameter to a URL
fn cache_busted(url: &str, stamp: i64) -> String {
    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{}{}_cb={}", url, separator, stamp)
}

fn placeholder() -> RgbaImage {
    RgbaImage::from_pixel(1, 1, image::Rgba([0, 0, 0, 0]))
}

async fn fetch_image(
    client: &reqwest::Client,
    url: &str,
    budget: Duration,
) -> Result<RgbaImage, String> {
    let response = tokio::time::timeout(budget, client.get(url).send())
        .await
        .map_err(|_| "timed out".to_string())?
        .map_err(|e| e.to_string())?
        .error_for_status()
        .map_err(|e| e.to_string())?;
    let bytes = tokio::time::timeout(budget, response.bytes())
        .await
        .map_err(|_| "timed out reading body".to_string())?
        .map_err(|e| e.to_string())?;
    image::load_from_memory(&bytes)
        .map(|img| img.to_rgba8())
        .map_err(|e| format!("decode failed: {}", e))
}

/// Fetch one asset with a single cache-busted retry, degrading to a
/// transparent placeholder
async fn resolve_one(client: &reqwest::Client, url: String, budget: Duration) -> (String, RgbaImage) {
    match fetch_image(client, &url, budget).await {
        Ok(img) => {
            debug!(url = %url, width = img.width(), height = img.height(), "Asset ready");
            (url, img)
        }
        Err(first_err) => {
            let retry_url = cache_busted(&url, Utc::now().timestamp_millis());
            warn!(url = %url, error = %first_err, "Asset fetch failed, retrying with cache bust");
            match fetch_image(client, &retry_url, budget).await {
                Ok(img) => (url, img),
                Err(second_err) => {
                    warn!(url = %url, error = %second_err, "Asset unavailable, using transparent placeholder");
                    (url, placeholder())
                }
            }
        }
    }
}

/// Resolve all images a scene references, concurrently
///
/// Always returns an entry per requested URL; failures map to placeholders.
pub async fn resolve_images(
    client: &reqwest::Client,
    urls: &[String],
    budget: Duration,
) -> HashMap<String, RgbaImage> {
    let futures = urls
        .iter()
        .map(|url| resolve_one(client, url.clone(), budget));
    join_all(futures).await.into_iter().collect()
}
