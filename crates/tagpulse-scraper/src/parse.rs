//! Per-item DOM parsing.
//!
//! Malformed items (ads, deleted posts, partially rendered nodes) are
//! expected in every batch. A parse failure drops that one item and never
//! aborts collection, so everything here returns `Option` / defaults.

use fantoccini::elements::Element;
use fantoccini::Locator;

use crate::metrics::parse_metric_count;
use crate::selectors;
use crate::types::RawPost;

/// Parse one rendered post article into a [`RawPost`].
///
/// Returns `None` when any required piece (permalink id, author, timestamp)
/// is missing or unreadable. Body text and engagement counters are
/// best-effort and default to empty / 0.
pub async fn parse_post(article: &Element) -> Option<RawPost> {
    let permalink = article
        .find(Locator::Css(selectors::PERMALINK))
        .await
        .ok()?;
    let href = permalink.attr("href").await.ok()??;
    let id = extract_post_id(&href)?;

    let author = article
        .find(Locator::Css(selectors::AUTHOR))
        .await
        .ok()?
        .text()
        .await
        .ok()?;

    let posted_at = article
        .find(Locator::Css("time"))
        .await
        .ok()?
        .attr("datetime")
        .await
        .ok()??;

    let text = match article.find(Locator::Css(selectors::POST_TEXT)).await {
        Ok(el) => el.text().await.unwrap_or_default(),
        Err(_) => String::new(),
    };

    let reply_count = engagement_metric(article, "reply").await;
    let share_count = engagement_metric(article, "retweet").await;
    let like_count = engagement_metric(article, "like").await;

    let tags = anchor_texts(article, selectors::HASHTAG_ANCHOR).await;
    let mentions = anchor_texts(article, selectors::MENTION_ANCHOR)
        .await
        .into_iter()
        .filter(|t| t.starts_with('@'))
        .collect();

    Some(RawPost {
        id,
        author,
        posted_at,
        text,
        reply_count,
        share_count,
        like_count,
        tags,
        mentions,
    })
}

/// Pull the numeric post id out of a `/status/` permalink.
///
/// Returns `None` when the href carries no identifier — such items are
/// dropped, not emitted.
pub(crate) fn extract_post_id(href: &str) -> Option<String> {
    let idx = href.find("/status/")? + "/status/".len();
    let id: String = href[idx..]
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    if id.is_empty() {
        None
    } else {
        Some(id)
    }
}

/// One engagement counter, decoded from its abbreviated display form.
/// Missing element or unreadable text yields 0.
async fn engagement_metric(article: &Element, metric: &str) -> u64 {
    let selector = selectors::metric_selector(metric);
    match article.find(Locator::Css(&selector)).await {
        Ok(el) => parse_metric_count(&el.text().await.unwrap_or_default()),
        Err(_) => 0,
    }
}

/// Non-empty text of every anchor matching `selector`, in render order.
async fn anchor_texts(article: &Element, selector: &str) -> Vec<String> {
    let Ok(anchors) = article.find_all(Locator::Css(selector)).await else {
        return Vec::new();
    };
    let mut texts = Vec::new();
    for anchor in anchors {
        if let Ok(t) = anchor.text().await {
            if !t.is_empty() {
                texts.push(t);
            }
        }
    }
    texts
}
