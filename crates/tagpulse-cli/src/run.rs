//! Full pipeline command: collect, process, persist, analyze.

use tagpulse_core::PipelineConfig;
use tracing::info;

/// Run the three pipeline stages in order.
///
/// Collection failures degrade to an empty batch inside the scraper; an
/// empty batch here ends the run with an error since the later stages have
/// nothing to work with. Persistence failures are fatal — a run that cannot
/// write its output is not a run.
///
/// # Errors
///
/// Returns an error if no posts were collected, or if cleaning or the
/// parquet write/read fails.
pub(crate) async fn run_pipeline(cfg: &PipelineConfig) -> anyhow::Result<()> {
    std::fs::create_dir_all(&cfg.output_dir).map_err(|e| {
        anyhow::anyhow!(
            "cannot create output directory '{}': {e}",
            cfg.output_dir.display()
        )
    })?;

    info!(
        query = %cfg.search_query(),
        target = cfg.target_count,
        "starting collection"
    );
    let posts = tagpulse_scraper::collect_posts(cfg).await;
    if posts.is_empty() {
        anyhow::bail!("no posts collected; nothing to process");
    }
    info!(posts = posts.len(), "collection finished");

    let records = tagpulse_process::process_posts(posts)?;
    info!(records = records.len(), "cleaning finished");

    tagpulse_process::write_records(&cfg.table_path, &records)?;
    info!(path = %cfg.table_path.display(), "wrote parquet table");

    // Re-read from disk so the analysis stage consumes exactly what was
    // persisted, not the in-memory batch.
    let stored = tagpulse_process::read_records(&cfg.table_path)?;
    tagpulse_sentiment::analyze(&stored, cfg);

    println!(
        "pipeline complete: {} records in '{}'",
        stored.len(),
        cfg.table_path.display()
    );

    Ok(())
}
