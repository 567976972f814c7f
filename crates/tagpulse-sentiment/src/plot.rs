//! Chart rendering for the bucketed sentiment series.

use std::ops::Range;
use std::path::Path;
use std::time::Duration;

use chrono::{DateTime, Utc};
use plotters::prelude::*;

use crate::error::{AnalysisError, RenderError};
use crate::series::SentimentBucket;

const CHART_SIZE: (u32, u32) = (1500, 700);

/// Render the series as a line-and-marker time plot with a horizontal zero
/// reference line, overwriting any file at `path`.
///
/// `width` is the bucket width, used to pad the x-axis when the series
/// holds a single bucket.
///
/// # Errors
///
/// Returns [`AnalysisError::EmptySeries`] for an empty series and
/// [`AnalysisError::Render`] on any backend or drawing failure.
pub fn render_chart(
    buckets: &[SentimentBucket],
    width: Duration,
    path: &Path,
) -> Result<(), AnalysisError> {
    let (Some(first), Some(last)) = (buckets.first(), buckets.last()) else {
        return Err(AnalysisError::EmptySeries);
    };

    let pad = chrono::Duration::from_std(width).unwrap_or(chrono::Duration::minutes(15));
    let x_range = first.start..(last.start + pad);

    draw(buckets, x_range, path)?;
    Ok(())
}

fn draw(
    buckets: &[SentimentBucket],
    x_range: Range<DateTime<Utc>>,
    path: &Path,
) -> Result<(), RenderError> {
    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Market Sentiment Over Time", ("sans-serif", 28))
        .margin(12)
        .x_label_area_size(45)
        .y_label_area_size(55)
        .build_cartesian_2d(x_range.clone(), -1.0_f64..1.0_f64)?;

    chart
        .configure_mesh()
        .x_desc("Time")
        .y_desc("Average Sentiment Score")
        .draw()?;

    chart
        .draw_series(LineSeries::new(
            vec![(x_range.start, 0.0), (x_range.end, 0.0)],
            RED.stroke_width(1),
        ))?
        .label("Neutral")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED));

    // Gaps in the data break the line; each run of populated buckets is its
    // own segment.
    for segment in populated_segments(buckets) {
        chart.draw_series(LineSeries::new(segment.clone(), BLUE.stroke_width(2)))?;
        chart.draw_series(
            segment
                .into_iter()
                .map(|point| Circle::new(point, 4, BLUE.filled())),
        )?;
    }

    chart
        .configure_series_labels()
        .border_style(BLACK)
        .background_style(WHITE.mix(0.8))
        .draw()?;

    root.present()?;
    Ok(())
}

/// Runs of consecutive populated buckets, in order.
fn populated_segments(buckets: &[SentimentBucket]) -> Vec<Vec<(DateTime<Utc>, f64)>> {
    let mut segments = Vec::new();
    let mut current: Vec<(DateTime<Utc>, f64)> = Vec::new();
    for bucket in buckets {
        match bucket.mean_score {
            Some(score) => current.push((bucket.start, score)),
            None => {
                if !current.is_empty() {
                    segments.push(std::mem::take(&mut current));
                }
            }
        }
    }
    if !current.is_empty() {
        segments.push(current);
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn bucket(minute: u32, score: Option<f64>) -> SentimentBucket {
        SentimentBucket {
            start: Utc.with_ymd_and_hms(2024, 5, 3, 9, minute, 0).unwrap(),
            mean_score: score,
            sample_count: usize::from(score.is_some()),
        }
    }

    #[test]
    fn segments_split_on_missing_buckets() {
        let buckets = vec![
            bucket(0, Some(0.1)),
            bucket(15, Some(0.2)),
            bucket(30, None),
            bucket(45, Some(-0.3)),
        ];
        let segments = populated_segments(&buckets);
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].len(), 2);
        assert_eq!(segments[1].len(), 1);
    }

    #[test]
    fn all_populated_is_one_segment() {
        let buckets = vec![bucket(0, Some(0.1)), bucket(15, Some(0.2))];
        assert_eq!(populated_segments(&buckets).len(), 1);
    }

    #[test]
    fn all_missing_yields_no_segments() {
        let buckets = vec![bucket(0, None), bucket(15, None)];
        assert!(populated_segments(&buckets).is_empty());
    }

    #[test]
    fn render_writes_a_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sentiment.png");
        let buckets = vec![
            bucket(0, Some(0.5)),
            bucket(15, None),
            bucket(30, Some(-0.25)),
        ];
        render_chart(&buckets, Duration::from_secs(900), &path).unwrap();
        let metadata = std::fs::metadata(&path).unwrap();
        assert!(metadata.len() > 0, "chart file should not be empty");
    }

    #[test]
    fn render_single_bucket_series() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sentiment.png");
        render_chart(&[bucket(0, Some(0.7))], Duration::from_secs(900), &path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn render_empty_series_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sentiment.png");
        let err = render_chart(&[], Duration::from_secs(900), &path).unwrap_err();
        assert!(matches!(err, AnalysisError::EmptySeries));
    }
}
