//! Fixed-width time bucketing of per-post sentiment scores.

use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};

/// One fixed-width bucket of the sentiment series.
#[derive(Debug, Clone, PartialEq)]
pub struct SentimentBucket {
    /// Inclusive start of the bucket.
    pub start: DateTime<Utc>,
    /// Mean score of the rows in this bucket; `None` for buckets with no
    /// rows — an empty interval is missing data, not neutral sentiment.
    pub mean_score: Option<f64>,
    pub sample_count: usize,
}

/// Upper bound on the series length. A scraped `datetime` attribute can be
/// parseable yet wildly wrong (an epoch value from a malformed node), and
/// the bucket vector is proportional to the whole time span; the series is
/// anchored at the newest sample and older samples beyond the cap are
/// dropped with a warning.
const MAX_BUCKETS: usize = 10_000;

/// Group `samples` into consecutive `width`-sized buckets from the first to
/// the last timestamp, averaging scores within each bucket.
///
/// Returns an empty series for empty input. Buckets covering a gap in the
/// data are emitted with `mean_score: None`. The series holds at most
/// [`MAX_BUCKETS`] buckets ending at the newest sample; samples older than
/// that window are dropped.
#[must_use]
pub fn bucket_scores(samples: &[(DateTime<Utc>, f32)], width: Duration) -> Vec<SentimentBucket> {
    let Some(width_secs) = i64::try_from(width.as_secs()).ok().filter(|&w| w > 0) else {
        return Vec::new();
    };
    if samples.is_empty() {
        return Vec::new();
    }

    let floor = |ts: &DateTime<Utc>| ts.timestamp().div_euclid(width_secs) * width_secs;

    let oldest = samples.iter().map(|(ts, _)| floor(ts)).min().unwrap_or(0);
    let last = samples.iter().map(|(ts, _)| floor(ts)).max().unwrap_or(0);

    let max_span =
        (i64::try_from(MAX_BUCKETS).unwrap_or(i64::MAX) - 1).saturating_mul(width_secs);
    let first = if last - oldest > max_span {
        tracing::warn!(
            newest = last,
            oldest,
            "time span exceeds the bucket cap — dropping samples older than the window"
        );
        last - max_span
    } else {
        oldest
    };

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let bucket_count = ((last - first) / width_secs + 1) as usize;
    let mut sums = vec![0.0_f64; bucket_count];
    let mut counts = vec![0_usize; bucket_count];

    for (ts, score) in samples {
        let floored = floor(ts);
        if floored < first {
            continue;
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let idx = ((floored - first) / width_secs) as usize;
        sums[idx] += f64::from(*score);
        counts[idx] += 1;
    }

    (0..bucket_count)
        .map(|i| {
            let start_secs = first + i64::try_from(i).unwrap_or(i64::MAX) * width_secs;
            let start = Utc
                .timestamp_opt(start_secs, 0)
                .single()
                .unwrap_or_default();
            let mean_score = if counts[i] == 0 {
                None
            } else {
                #[allow(clippy::cast_precision_loss)]
                Some(sums[i] / counts[i] as f64)
            };
            SentimentBucket {
                start,
                mean_score,
                sample_count: counts[i],
            }
        })
        .collect()
}
