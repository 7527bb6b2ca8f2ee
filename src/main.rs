use clap::Parser;
use std::path::PathBuf;
use vtm_invoice::{
    FileCounter, InvoiceCounter, InvoiceDocument, InvoiceError, InvoiceRenderer, OutputSink, RasterAsset,
    RendererConfig, counter::peek_next,
};

/// Renders an invoice described in JSON to a single-page PDF.
#[derive(Parser, Debug)]
#[command(name = "vtm-invoice", version, about)]
struct Cli {
    /// Invoice JSON file.
    invoice: PathBuf,

    /// Exact output path.
    #[arg(long, conflicts_with = "out_dir")]
    out: Option<PathBuf>,

    /// Directory for a timestamp-named output file.
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Signature image (PNG or JPEG).
    #[arg(long)]
    signature: Option<PathBuf>,

    /// Renderer config JSON; defaults to $VTM_INVOICE_CONFIG.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Counter file; assigns the next invoice number and advances it after a successful render.
    #[arg(long)]
    auto_number: Option<PathBuf>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), InvoiceError> {
    let config = match &cli.config {
        Some(path) => RendererConfig::from_json_file(path)?,
        None => RendererConfig::load()?,
    };

    let source = std::fs::read_to_string(&cli.invoice)?;
    let mut invoice: InvoiceDocument = serde_json::from_str(&source)?;

    let counter = cli.auto_number.as_ref().map(FileCounter::new);
    if let Some(counter) = &counter {
        invoice.invoice_number = peek_next(counter, &config.invoice_prefix)?;
        log::info!("Assigned invoice number {}", invoice.invoice_number);
    }

    let signature = match &cli.signature {
        Some(path) => Some(RasterAsset::decode(&std::fs::read(path)?).map_err(vtm_invoice::RenderError::from)?),
        None => None,
    };

    let file_prefix = config.file_prefix.clone();
    let renderer = InvoiceRenderer::builder().with_config(config).build()?;
    let sink = match (cli.out, cli.out_dir) {
        (Some(path), _) => OutputSink::File(path),
        (None, Some(dir)) => OutputSink::directory(dir, file_prefix),
        (None, None) => renderer.default_sink(),
    };

    let rendered = renderer.render(&invoice, signature.as_ref(), &sink)?;

    if let Some(counter) = &counter {
        counter.save(&invoice.invoice_number)?;
        log::info!("Advanced invoice counter to {}", invoice.invoice_number);
    }

    if let Some(path) = rendered.location {
        println!("{}", path.display());
    }
    Ok(())
}
