//! Ingest command - builds the vector index from a PDF

use std::path::PathBuf;

use clap::Args;
use tracing::info;

use crate::config::AppConfig;
use crate::infrastructure::logging;

#[derive(Args)]
pub struct IngestArgs {
    /// Path to the PDF to index
    pub pdf: PathBuf,
}

/// Extract the document text and (re)build the persisted index
pub async fn run(args: IngestArgs) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().unwrap_or_default();
    logging::init_logging(&config.logging);

    let service = crate::create_ingestion_service(&config)?;
    let index = service.ingest_file(&args.pdf).await?;

    info!(
        chunks = index.len(),
        path = %config.index.path,
        "Index ready"
    );

    Ok(())
}
