use anyhow::{Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use pdf_labels::{LabelSheetOptions, LabelSizing, LabelStatistics, PdfiumRasterizer, Rasterizer};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pdfl", about = "Lay out PDF pages as printable label sheets", version)]
struct Cli {
    /// Log per-window and per-sheet detail
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render every page of a PDF onto label sheets
    Generate {
        /// Input PDF file (one label per page)
        #[arg(short, long)]
        input: PathBuf,

        /// Output PDF file
        #[arg(short, long)]
        output: PathBuf,

        /// Directory holding the pdfium library
        #[arg(long)]
        pdfium_dir: Option<PathBuf>,

        #[command(flatten)]
        layout: LayoutArgs,
    },

    /// Render a low-resolution preview sheet to PNG
    Preview {
        /// Input PDF file
        #[arg(short, long)]
        input: PathBuf,

        /// Output image file
        #[arg(short, long)]
        output: PathBuf,

        /// Fill the whole first sheet instead of placing page 1 only
        #[arg(long)]
        full_sheet: bool,

        /// Directory holding the pdfium library
        #[arg(long)]
        pdfium_dir: Option<PathBuf>,

        #[command(flatten)]
        layout: LayoutArgs,
    },

    /// Show sheet and label statistics without rendering
    Stats {
        /// Input PDF file
        #[arg(short, long)]
        input: PathBuf,

        #[command(flatten)]
        layout: LayoutArgs,
    },

    /// Write the resolved options to a JSON config file
    InitConfig {
        /// Output JSON file
        #[arg(short, long)]
        output: PathBuf,

        #[command(flatten)]
        layout: LayoutArgs,
    },
}

/// Sheet layout flags shared by every subcommand. Options start from
/// `--config` (or the built-in defaults), `--template` replaces the sheet and
/// label geometry, and every explicit flag overrides both.
#[derive(Args)]
struct LayoutArgs {
    /// Options JSON file to start from
    #[arg(long)]
    config: Option<PathBuf>,

    /// Label stock preset
    #[arg(long, value_enum)]
    template: Option<TemplateArg>,

    /// Paper size
    #[arg(long, value_enum)]
    paper: Option<PaperArg>,

    /// Unit for every length flag
    #[arg(long, value_enum)]
    unit: Option<UnitArg>,

    /// Custom sheet width
    #[arg(long)]
    sheet_width: Option<f64>,

    /// Custom sheet height
    #[arg(long)]
    sheet_height: Option<f64>,

    /// Labels per row
    #[arg(long)]
    cols: Option<usize>,

    /// Labels per column
    #[arg(long)]
    rows: Option<usize>,

    /// Top margin
    #[arg(long)]
    margin_top: Option<f64>,

    /// Bottom margin
    #[arg(long)]
    margin_bottom: Option<f64>,

    /// Left margin
    #[arg(long)]
    margin_left: Option<f64>,

    /// Right margin
    #[arg(long)]
    margin_right: Option<f64>,

    /// Horizontal gap between labels
    #[arg(long)]
    h_gap: Option<f64>,

    /// Vertical gap between labels
    #[arg(long)]
    v_gap: Option<f64>,

    /// Fixed label width (switches to explicit sizing)
    #[arg(long)]
    label_width: Option<f64>,

    /// Fixed label height (switches to explicit sizing)
    #[arg(long)]
    label_height: Option<f64>,

    /// White border inside gapless cells (switches to inset sizing)
    #[arg(long, conflicts_with_all = ["label_width", "label_height"])]
    inset: Option<f64>,

    /// Output resolution in dots per inch
    #[arg(long)]
    dpi: Option<f64>,

    /// Preview resolution in dots per inch
    #[arg(long)]
    preview_dpi: Option<f64>,

    /// How each page is fitted to its label
    #[arg(long, value_enum)]
    resize: Option<ResizeArg>,

    /// Image scale in percent of the label area
    #[arg(long)]
    scale: Option<u32>,

    /// 1-based position of the first label on the sheet
    #[arg(long)]
    start: Option<usize>,

    /// Preview guide outlines
    #[arg(long, value_enum)]
    guides: Option<GuidesArg>,

    /// Pages rasterized per batch
    #[arg(long)]
    batch_size: Option<usize>,
}

#[derive(Clone, Copy, ValueEnum)]
enum TemplateArg {
    #[value(name = "5160")]
    Avery5160,
    #[value(name = "5163")]
    Avery5163,
    #[value(name = "5164")]
    Avery5164,
    #[value(name = "5167")]
    Avery5167,
}

#[derive(Clone, Copy, ValueEnum)]
enum PaperArg {
    Letter,
    Legal,
    Tabloid,
    A4,
    A5,
}

#[derive(Clone, Copy, ValueEnum)]
enum UnitArg {
    In,
    Mm,
    Pt,
}

#[derive(Clone, Copy, ValueEnum)]
enum ResizeArg {
    Fit,
    Fill,
    Stretch,
}

#[derive(Clone, Copy, ValueEnum)]
enum GuidesArg {
    None,
    All,
    Placed,
}

impl From<TemplateArg> for pdf_labels::LabelTemplate {
    fn from(arg: TemplateArg) -> Self {
        match arg {
            TemplateArg::Avery5160 => Self::Avery5160,
            TemplateArg::Avery5163 => Self::Avery5163,
            TemplateArg::Avery5164 => Self::Avery5164,
            TemplateArg::Avery5167 => Self::Avery5167,
        }
    }
}

impl From<PaperArg> for pdf_labels::PaperSize {
    fn from(arg: PaperArg) -> Self {
        match arg {
            PaperArg::Letter => Self::Letter,
            PaperArg::Legal => Self::Legal,
            PaperArg::Tabloid => Self::Tabloid,
            PaperArg::A4 => Self::A4,
            PaperArg::A5 => Self::A5,
        }
    }
}

impl From<UnitArg> for pdf_labels::MeasurementUnit {
    fn from(arg: UnitArg) -> Self {
        match arg {
            UnitArg::In => Self::Inches,
            UnitArg::Mm => Self::Millimeters,
            UnitArg::Pt => Self::Points,
        }
    }
}

impl From<ResizeArg> for pdf_labels::ResizeMode {
    fn from(arg: ResizeArg) -> Self {
        match arg {
            ResizeArg::Fit => Self::Fit,
            ResizeArg::Fill => Self::Fill,
            ResizeArg::Stretch => Self::Stretch,
        }
    }
}

impl From<GuidesArg> for pdf_labels::GuideLines {
    fn from(arg: GuidesArg) -> Self {
        match arg {
            GuidesArg::None => Self::None,
            GuidesArg::All => Self::AllCells,
            GuidesArg::Placed => Self::PlacedOnly,
        }
    }
}

impl LayoutArgs {
    /// Options from `--config`, replaced by `--template` geometry, then by
    /// any explicit flag
    async fn options(&self) -> Result<LabelSheetOptions> {
        let mut options = match &self.config {
            Some(path) => LabelSheetOptions::load(path).await?,
            None => LabelSheetOptions::default(),
        };

        if let Some(template) = self.template {
            pdf_labels::LabelTemplate::from(template).apply(&mut options);
        }
        if let Some(unit) = self.unit {
            options.convert_units(unit.into());
        }

        let sheet = &mut options.sheet;
        if let Some(paper) = self.paper {
            let (width, height) = pdf_labels::PaperSize::from(paper).dimensions(sheet.unit);
            sheet.width = width;
            sheet.height = height;
        }
        if let Some(width) = self.sheet_width {
            sheet.width = width;
        }
        if let Some(height) = self.sheet_height {
            sheet.height = height;
        }
        if let Some(cols) = self.cols {
            sheet.columns = cols;
        }
        if let Some(rows) = self.rows {
            sheet.rows = rows;
        }
        if let Some(top) = self.margin_top {
            sheet.margins.top = top;
        }
        if let Some(bottom) = self.margin_bottom {
            sheet.margins.bottom = bottom;
        }
        if let Some(left) = self.margin_left {
            sheet.margins.left = left;
        }
        if let Some(right) = self.margin_right {
            sheet.margins.right = right;
        }

        options.sizing = self.sizing(options.sizing)?;

        if let Some(dpi) = self.dpi {
            options.dpi = dpi;
        }
        if let Some(dpi) = self.preview_dpi {
            options.preview_dpi = dpi;
        }
        if let Some(resize) = self.resize {
            options.resize_mode = resize.into();
        }
        if let Some(scale) = self.scale {
            options.image_scale_percent = scale;
        }
        if let Some(start) = self.start {
            options.start_position = start;
        }
        if let Some(guides) = self.guides {
            options.guides = guides.into();
        }
        if let Some(batch_size) = self.batch_size {
            options.batch_size = batch_size;
        }

        options.validate()?;
        Ok(options)
    }

    fn sizing(&self, current: LabelSizing) -> Result<LabelSizing> {
        if let Some(buffer) = self.inset {
            return Ok(LabelSizing::Inset { buffer });
        }

        let (h_default, v_default) = match current {
            LabelSizing::Auto {
                h_spacing,
                v_spacing,
            }
            | LabelSizing::Explicit {
                h_spacing,
                v_spacing,
                ..
            } => (h_spacing, v_spacing),
            LabelSizing::Inset { .. } => (0.0, 0.0),
        };
        let h_spacing = self.h_gap.unwrap_or(h_default);
        let v_spacing = self.v_gap.unwrap_or(v_default);

        let explicit_size = match current {
            LabelSizing::Explicit { width, height, .. } => Some((width, height)),
            _ => None,
        };
        match (self.label_width, self.label_height, explicit_size) {
            (None, None, None) => {
                if self.h_gap.is_none() && self.v_gap.is_none() {
                    return Ok(current);
                }
                Ok(LabelSizing::Auto {
                    h_spacing,
                    v_spacing,
                })
            }
            (Some(width), Some(height), _) => Ok(LabelSizing::Explicit {
                width,
                height,
                h_spacing,
                v_spacing,
            }),
            (width, height, Some((current_w, current_h))) => Ok(LabelSizing::Explicit {
                width: width.unwrap_or(current_w),
                height: height.unwrap_or(current_h),
                h_spacing,
                v_spacing,
            }),
            _ => bail!("--label-width and --label-height must be given together"),
        }
    }
}

fn rasterizer(pdfium_dir: Option<PathBuf>) -> PdfiumRasterizer {
    match pdfium_dir {
        Some(dir) => PdfiumRasterizer::with_library_dir(dir),
        None => PdfiumRasterizer::new(),
    }
}

/// Statistics from the page count the rasterizer itself reports
fn rasterizer_statistics<R: Rasterizer + ?Sized>(
    rasterizer: &R,
    document: &[u8],
    options: &LabelSheetOptions,
) -> Result<LabelStatistics> {
    let metadata = rasterizer.metadata(document)?;
    Ok(pdf_labels::calculate_statistics(
        metadata.page_count,
        options,
    )?)
}

fn print_statistics(stats: &LabelStatistics, options: &LabelSheetOptions) {
    let sheet = &options.sheet;
    println!("Label Statistics:");
    println!(
        "  Sheet: {} x {} {} at {} dpi",
        sheet.width,
        sheet.height,
        sheet.unit.name(),
        options.dpi
    );
    println!("  Source pages: {}", stats.source_pages);
    println!("  Labels per sheet: {}", stats.labels_per_sheet);
    println!("  Output sheets: {}", stats.output_sheets);
    println!("  Skipped cells: {}", stats.skipped_cells);
    println!("  Unused cells: {}", stats.unused_cells);
    println!(
        "  Cell size: {}x{} px",
        stats.cell_size_px.0, stats.cell_size_px.1
    );
    println!(
        "  Label content: {}x{} px",
        stats.content_size_px.0, stats.content_size_px.1
    );
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match cli.command {
        Commands::Generate {
            input,
            output,
            pdfium_dir,
            layout,
        } => {
            let options = layout.options().await?;
            let document = pdf_labels::load_source(&input).await?;
            let rasterizer = rasterizer(pdfium_dir);

            let stats = rasterizer_statistics(&rasterizer, &document, &options)?;
            print_statistics(&stats, &options);

            let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel::<pdf_labels::RenderProgress>();
            let progress = tokio::spawn(async move {
                while let Some(update) = rx.recv().await {
                    log::info!(
                        "Sheet {}/{} ({:.0}%)",
                        update.completed_sheets,
                        update.total_sheets,
                        update.fraction() * 100.0
                    );
                }
            });

            let pdf =
                pdf_labels::generate_pdf(rasterizer, document, &options, Some(tx)).await?;
            progress.await?;

            pdf_labels::save_pdf(&pdf, &output).await?;
            println!(
                "Generated {} sheets → {}",
                stats.output_sheets,
                output.display()
            );
        }

        Commands::Preview {
            input,
            output,
            full_sheet,
            pdfium_dir,
            layout,
        } => {
            let options = layout.options().await?;
            let document = pdf_labels::load_source(&input).await?;
            let mut rasterizer = rasterizer(pdfium_dir);

            let sheet = tokio::task::spawn_blocking(move || {
                if full_sheet {
                    pdf_labels::render_first_sheet(&mut rasterizer, &document, &options)
                } else {
                    pdf_labels::render_preview(&mut rasterizer, &document, &options)
                }
            })
            .await??;

            sheet.save(&output)?;
            println!(
                "Preview {}x{} → {}",
                sheet.width(),
                sheet.height(),
                output.display()
            );
        }

        Commands::Stats { input, layout } => {
            let options = layout.options().await?;
            let document = pdf_labels::load_source(&input).await?;
            let stats = pdf_labels::calculate_document_statistics(&document, &options)?;
            print_statistics(&stats, &options);
        }

        Commands::InitConfig { output, layout } => {
            let options = layout.options().await?;
            options.save(&output).await?;
            println!("Wrote options → {}", output.display());
        }
    }

    Ok(())
}
