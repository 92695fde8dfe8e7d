pub mod constants;
pub mod layout;
mod options;
pub mod pipeline;
mod preview;
pub mod raster;
pub mod render;
mod stats;
mod templates;
mod types;
mod writer;

pub use options::*;
pub use pipeline::{
    RenderProgress, RenderSummary, generate_pdf, load_source, render_pdf, render_sheets, save_pdf,
};
pub use preview::{preview_from_raster, render_first_sheet, render_preview};
pub use raster::{CachingRasterizer, DocumentMetadata, Rasterizer, read_metadata};
#[cfg(all(feature = "pdfium", not(target_arch = "wasm32")))]
pub use raster::PdfiumRasterizer;
pub use stats::{calculate_document_statistics, calculate_statistics};
pub use templates::LabelTemplate;
pub use types::*;
pub use writer::{PdfSheetWriter, write_pdf};
