//! Menu photo gallery.

use anyhow::{bail, Result};

use visconti_client::{load_gallery, FetchState};
use visconti_commerce::catalog::newest_first;

use super::GalleryArgs;
use crate::context::Context;

/// Run the gallery command.
pub async fn run(args: GalleryArgs, ctx: &Context) -> Result<()> {
    let client = ctx.client()?;

    let spinner = ctx.output.spinner("Fetching menu photos...");
    let mut state = FetchState::Idle;
    load_gallery(&client, &mut state).await;
    spinner.finish_and_clear();

    if let Some(message) = state.error() {
        ctx.output.info("Run the command again to try again.");
        bail!("{}", message);
    }

    let mut images = state.take().unwrap_or_default();
    newest_first(&mut images);
    if let Some(limit) = args.limit {
        images.truncate(limit);
    }

    if ctx.output.is_json() {
        ctx.output.json(&images);
        return Ok(());
    }

    if images.is_empty() {
        ctx.output.info("No menu photos yet");
        return Ok(());
    }

    ctx.output.header(&format!("Menu photos ({})", images.len()));
    for image in &images {
        ctx.output.list_item(&format!(
            "{}  {}",
            image.uploaded_at.format("%Y-%m-%d"),
            image.image_url
        ));
        if !image.category.is_empty() {
            ctx.output.kv("category", &image.category);
        }
    }

    Ok(())
}
