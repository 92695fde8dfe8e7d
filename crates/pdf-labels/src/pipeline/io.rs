//! Async host operations around the synchronous pipeline

use std::path::Path;
use tokio::sync::mpsc;

use super::{RenderProgress, render_pdf};
use crate::options::LabelSheetOptions;
use crate::raster::Rasterizer;
use crate::types::*;

/// Read the source PDF
pub async fn load_source(path: impl AsRef<Path>) -> Result<Vec<u8>> {
    Ok(tokio::fs::read(path).await?)
}

/// Write the finished PDF
pub async fn save_pdf(bytes: &[u8], path: impl AsRef<Path>) -> Result<()> {
    tokio::fs::write(path, bytes).await?;
    Ok(())
}

/// Generate the label PDF on a blocking thread.
///
/// Progress snapshots are sent on `progress` when given; a closed receiver
/// does not stop the render.
pub async fn generate_pdf<R>(
    mut rasterizer: R,
    document: Vec<u8>,
    options: &LabelSheetOptions,
    progress: Option<mpsc::UnboundedSender<RenderProgress>>,
) -> Result<Vec<u8>>
where
    R: Rasterizer + Send + 'static,
{
    options.validate()?;
    let options = options.clone();

    tokio::task::spawn_blocking(move || {
        let mut report = |p: RenderProgress| {
            if let Some(tx) = &progress {
                let _ = tx.send(p);
            }
        };
        render_pdf(&mut rasterizer, &document, &options, &mut report)
    })
    .await?
}
