//! The collector: drives an authenticated browser session through search,
//! switches to reverse-chronological results, then scrolls and scrapes
//! until the target unique-post count is reached or the feed runs dry.

use std::collections::HashSet;
use std::time::Duration;

use fantoccini::key::Key;
use rand::Rng;

use tagpulse_browser::{load_auth_state, restore_auth_state, Browser, BrowserError};
use tagpulse_core::PipelineConfig;

use crate::parse::parse_post;
use crate::progress::{ScrollProgress, ScrollTracker, TimeoutTally};
use crate::selectors;
use crate::types::RawPost;

/// Wait for the search input on the landing page.
const SEARCH_WAIT: Duration = Duration::from_secs(15);
/// The "Latest" tab transition is the least reliable step observed in
/// production use; give it longer.
const LATEST_TAB_WAIT: Duration = Duration::from_secs(30);
/// Wait for at least one post article per scroll iteration.
const CONTENT_WAIT: Duration = Duration::from_secs(15);
/// Consecutive content-wait timeouts read as end-of-results.
const CONTENT_TIMEOUT_LIMIT: u32 = 2;
/// Only the tail of the rendered feed is re-parsed each iteration, bounding
/// per-iteration cost on a page that keeps growing.
const TAIL_WINDOW: usize = 15;

/// Collect up to `cfg.target_count` unique posts for the configured query.
///
/// Returns an empty list when the credential artifact is missing or the
/// navigation/search phase fails; both are logged. The browser session is
/// released on every exit path.
pub async fn collect_posts(cfg: &PipelineConfig) -> Vec<RawPost> {
    let cookies = match load_auth_state(&cfg.auth_state_path) {
        Ok(c) => c,
        Err(e) => {
            tracing::error!(error = %e, "not authenticated — run `tagpulse setup` first");
            return Vec::new();
        }
    };

    let browser = match Browser::launch(&cfg.webdriver_url, cfg.headless, cfg.nav_timeout_ms).await
    {
        Ok(b) => b,
        Err(e) => {
            tracing::error!(error = %e, "failed to launch browser");
            return Vec::new();
        }
    };

    let query = cfg.search_query();
    let posts = match open_latest_results(&browser, cookies, &query).await {
        Ok(()) => scroll_and_collect(&browser, cfg.target_count).await,
        Err(e) => {
            tracing::error!(error = %e, "navigation/search phase failed");
            Vec::new()
        }
    };

    if let Err(e) = browser.close().await {
        tracing::warn!(error = %e, "failed to close browser session");
    }

    tracing::info!(collected = posts.len(), "finished collecting posts");
    posts
}

/// Navigation/search phase: restore the session, run the query, switch to
/// reverse-chronological results. Any failure here is fatal for the run.
async fn open_latest_results(
    browser: &Browser,
    cookies: Vec<tagpulse_browser::StoredCookie>,
    query: &str,
) -> Result<(), BrowserError> {
    tracing::info!("navigating to the landing page");
    browser.goto(selectors::HOME_URL).await?;

    // Cookies can only be installed for the current origin; reload so the
    // page picks the session up.
    restore_auth_state(browser.client(), cookies).await?;
    browser.refresh().await?;

    tracing::info!("waiting for the search input");
    let search_box = browser
        .wait_for_css(selectors::SEARCH_INPUT, SEARCH_WAIT)
        .await?;

    tracing::info!(query, "submitting search query");
    search_box.send_keys(query).await?;
    search_box
        .send_keys(&char::from(Key::Enter).to_string())
        .await?;

    tracing::info!("waiting for the Latest tab on the results page");
    let latest_tab = browser
        .wait_for_xpath(selectors::LATEST_TAB, LATEST_TAB_WAIT)
        .await?;
    latest_tab.click().await?;
    tracing::info!("switched to reverse-chronological results");

    Ok(())
}

/// Scroll-collection loop. Soft conditions (content-wait timeouts, feed
/// stagnation) terminate the loop normally; unexpected errors end it
/// gracefully with whatever was collected so far.
async fn scroll_and_collect(browser: &Browser, target_count: usize) -> Vec<RawPost> {
    let mut posts: Vec<RawPost> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    let mut timeouts = TimeoutTally::new(CONTENT_TIMEOUT_LIMIT);

    let initial_height = match browser.scroll_height().await {
        Ok(h) => h,
        Err(e) => {
            tracing::warn!(error = %e, "could not read initial scroll height");
            0
        }
    };
    let mut tracker = ScrollTracker::new(initial_height);

    tracing::info!(target_count, "starting scroll collection");

    while posts.len() < target_count {
        match browser
            .wait_for_css(selectors::POST_ARTICLE, CONTENT_WAIT)
            .await
        {
            Ok(_) => timeouts.reset(),
            Err(e) if e.is_wait_timeout() => {
                if timeouts.record() {
                    tracing::info!("repeated timeouts waiting for posts — treating as end of results");
                    break;
                }
                continue;
            }
            Err(e) => {
                tracing::error!(error = %e, "unexpected error while waiting for posts");
                break;
            }
        }

        let articles = match browser.find_all_css(selectors::POST_ARTICLE).await {
            Ok(a) => a,
            Err(e) => {
                tracing::error!(error = %e, "failed to query rendered posts");
                break;
            }
        };

        let tail_start = articles.len().saturating_sub(TAIL_WINDOW);
        for article in &articles[tail_start..] {
            if posts.len() >= target_count {
                break;
            }
            if let Some(post) = parse_post(article).await {
                if seen.insert(post.id.clone()) {
                    posts.push(post);
                }
            }
        }

        tracing::info!(
            collected = posts.len(),
            target_count,
            "scraped unique posts"
        );
        if posts.len() >= target_count {
            break;
        }

        if let Err(e) = browser.scroll_to_bottom().await {
            tracing::error!(error = %e, "scroll failed");
            break;
        }
        pace().await;

        match browser.scroll_height().await {
            Ok(height) => {
                if tracker.observe(height) == ScrollProgress::Stalled {
                    tracing::warn!("scrolled to the bottom of the feed — no more posts to load");
                    break;
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to read scroll height");
                break;
            }
        }
    }

    posts
}

/// Randomized pause between scrolls. This is a deliberate self-imposed rate
/// limit emulating human pacing, not a reaction to backpressure.
async fn pace() {
    let delay = Duration::from_millis(rand::rng().random_range(2_000..=4_000));
    tokio::time::sleep(delay).await;
}
