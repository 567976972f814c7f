//! Sentiment stage entry point: score cleaned records, bucket the series,
//! and render the chart.

use tagpulse_core::PipelineConfig;
use tagpulse_process::CleanedRecord;
use tracing::{info, warn};

use crate::plot::render_chart;
use crate::scorer::lexicon_score;
use crate::series::bucket_scores;

/// Score every record, aggregate into fixed-width buckets, and write the
/// chart to `cfg.chart_path`.
///
/// An empty input or a failed render is logged and skipped rather than
/// failing the run; earlier stages have already persisted their output.
pub fn analyze(records: &[CleanedRecord], cfg: &PipelineConfig) {
    if records.is_empty() {
        warn!("no records to analyze, skipping sentiment stage");
        return;
    }

    let samples: Vec<_> = records
        .iter()
        .map(|r| (r.posted_at, lexicon_score(&r.text_clean)))
        .collect();

    // Engagement-weighted aggregate. Replies and shares amplify a post's
    // contribution; the unweighted series is what gets plotted.
    let mut weighted_sum = 0.0_f64;
    let mut weight_total = 0.0_f64;
    for (record, (_, score)) in records.iter().zip(&samples) {
        #[allow(clippy::cast_precision_loss)]
        let weight = 1.0 + (record.reply_count + record.share_count) as f64;
        weighted_sum += f64::from(*score) * weight;
        weight_total += weight;
    }
    let weighted_mean = weighted_sum / weight_total;

    #[allow(clippy::cast_precision_loss)]
    let mean = samples.iter().map(|(_, s)| f64::from(*s)).sum::<f64>() / samples.len() as f64;

    info!(
        records = records.len(),
        mean_score = format!("{mean:.4}"),
        weighted_mean_score = format!("{weighted_mean:.4}"),
        "scored records"
    );

    let buckets = bucket_scores(&samples, cfg.bucket_interval);
    info!(buckets = buckets.len(), "bucketed sentiment series");

    match render_chart(&buckets, cfg.bucket_interval, &cfg.chart_path) {
        Ok(()) => info!(path = %cfg.chart_path.display(), "wrote sentiment chart"),
        Err(e) => warn!(error = %e, "failed to render sentiment chart"),
    }
}
