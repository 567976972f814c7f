//! Engagement-counter decoding.
//!
//! Counters render in abbreviated form past a thousand ("1.2K", "3M"). The
//! decode is deliberately forgiving: a best-effort metric never fails a
//! post, it defaults to 0.

/// Decode a displayed engagement count.
///
/// A trailing `K` multiplies the numeric prefix by 1 000, a trailing `M` by
/// 1 000 000; otherwise the text is parsed as a plain integer (thousands
/// separators tolerated). Empty or unparseable text yields 0.
#[must_use]
pub fn parse_metric_count(text: &str) -> u64 {
    let t = text.trim();
    if t.is_empty() {
        return 0;
    }

    if let Some(prefix) = t.strip_suffix(['K', 'k']) {
        return scale(prefix, 1_000.0);
    }
    if let Some(prefix) = t.strip_suffix(['M', 'm']) {
        return scale(prefix, 1_000_000.0);
    }

    t.replace(',', "").parse::<u64>().unwrap_or(0)
}

fn scale(prefix: &str, factor: f64) -> u64 {
    match prefix.trim().parse::<f64>() {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        Ok(v) if v >= 0.0 => (v * factor).round() as u64,
        _ => 0,
    }
}
