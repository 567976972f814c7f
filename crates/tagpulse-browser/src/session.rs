//! A thin wrapper over the fantoccini [`Client`] that owns one browser
//! session for the duration of a collection run.
//!
//! Every exit path must release the session; callers do so by consuming the
//! wrapper with [`Browser::close`].

use std::time::Duration;

use fantoccini::elements::Element;
use fantoccini::error::CmdError;
use fantoccini::wd::TimeoutConfiguration;
use fantoccini::{Client, ClientBuilder, Locator};

use crate::error::BrowserError;

pub struct Browser {
    client: Client,
}

impl Browser {
    /// Create a WebDriver session against `webdriver_url`.
    ///
    /// `headless` toggles a visible window; `nav_timeout_ms` becomes the
    /// session's page-load timeout.
    ///
    /// # Errors
    ///
    /// Returns [`BrowserError::NewSession`] if the session cannot be
    /// created, or [`BrowserError::Command`] if the timeout configuration is
    /// rejected.
    pub async fn launch(
        webdriver_url: &str,
        headless: bool,
        nav_timeout_ms: u64,
    ) -> Result<Self, BrowserError> {
        let mut args = vec!["--window-size=1440,900".to_string()];
        if headless {
            args.push("--headless=new".to_string());
            args.push("--disable-gpu".to_string());
        }

        let mut caps = serde_json::map::Map::new();
        caps.insert(
            "goog:chromeOptions".to_string(),
            serde_json::json!({ "args": args }),
        );

        let client = ClientBuilder::native()
            .capabilities(caps)
            .connect(webdriver_url)
            .await?;

        client
            .update_timeouts(TimeoutConfiguration::new(
                None,
                Some(Duration::from_millis(nav_timeout_ms)),
                None,
            ))
            .await?;

        tracing::debug!(webdriver_url, headless, "browser session created");
        Ok(Self { client })
    }

    #[must_use]
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Navigate to `url`, blocking until the page load completes or the
    /// session's page-load timeout fires.
    ///
    /// # Errors
    ///
    /// Returns [`BrowserError::Command`] on navigation failure.
    pub async fn goto(&self, url: &str) -> Result<(), BrowserError> {
        self.client.goto(url).await?;
        Ok(())
    }

    /// Reload the current page.
    ///
    /// # Errors
    ///
    /// Returns [`BrowserError::Command`] on failure.
    pub async fn refresh(&self) -> Result<(), BrowserError> {
        self.client.refresh().await?;
        Ok(())
    }

    /// Block until an element matching `selector` is present, or `timeout`
    /// expires.
    ///
    /// # Errors
    ///
    /// Returns [`BrowserError::WaitTimeout`] when the wait expires, and
    /// [`BrowserError::Command`] for any other WebDriver failure.
    pub async fn wait_for_css(
        &self,
        selector: &str,
        timeout: Duration,
    ) -> Result<Element, BrowserError> {
        self.client
            .wait()
            .at_most(timeout)
            .for_element(Locator::Css(selector))
            .await
            .map_err(|e| match e {
                CmdError::WaitTimeout => BrowserError::WaitTimeout {
                    selector: selector.to_string(),
                },
                other => BrowserError::Command(other),
            })
    }

    /// Block until an element matching the XPath `expr` is present, or
    /// `timeout` expires.
    ///
    /// CSS cannot match on element text; tab controls located by their label
    /// need XPath.
    ///
    /// # Errors
    ///
    /// Returns [`BrowserError::WaitTimeout`] when the wait expires, and
    /// [`BrowserError::Command`] for any other WebDriver failure.
    pub async fn wait_for_xpath(
        &self,
        expr: &str,
        timeout: Duration,
    ) -> Result<Element, BrowserError> {
        self.client
            .wait()
            .at_most(timeout)
            .for_element(Locator::XPath(expr))
            .await
            .map_err(|e| match e {
                CmdError::WaitTimeout => BrowserError::WaitTimeout {
                    selector: expr.to_string(),
                },
                other => BrowserError::Command(other),
            })
    }

    /// All elements currently matching `selector` (possibly empty).
    ///
    /// # Errors
    ///
    /// Returns [`BrowserError::Command`] on failure.
    pub async fn find_all_css(&self, selector: &str) -> Result<Vec<Element>, BrowserError> {
        Ok(self.client.find_all(Locator::Css(selector)).await?)
    }

    /// Current rendered page height in pixels.
    ///
    /// # Errors
    ///
    /// Returns [`BrowserError::UnexpectedScriptResult`] if the page reports
    /// a non-numeric height.
    pub async fn scroll_height(&self) -> Result<u64, BrowserError> {
        let value = self
            .client
            .execute("return document.body.scrollHeight;", vec![])
            .await?;
        value
            .as_u64()
            .or_else(|| {
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                value.as_f64().map(|f| f.max(0.0) as u64)
            })
            .ok_or_else(|| BrowserError::UnexpectedScriptResult(value.to_string()))
    }

    /// Scroll the viewport to the bottom of the document.
    ///
    /// # Errors
    ///
    /// Returns [`BrowserError::Command`] on failure.
    pub async fn scroll_to_bottom(&self) -> Result<(), BrowserError> {
        self.client
            .execute("window.scrollTo(0, document.body.scrollHeight);", vec![])
            .await?;
        Ok(())
    }

    /// End the WebDriver session, releasing the browser.
    ///
    /// # Errors
    ///
    /// Returns [`BrowserError::Command`] if the session teardown fails.
    pub async fn close(self) -> Result<(), BrowserError> {
        self.client.close().await?;
        Ok(())
    }
}
