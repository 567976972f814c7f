//! One-time supervised login flow.
//!
//! External verification, captcha and 2FA cannot be automated, so a human
//! completes the login in a visible browser window while this process
//! blocks on stdin. The resulting cookies become the credential artifact.

use tagpulse_core::PipelineConfig;

use crate::auth::save_auth_state;
use crate::error::BrowserError;
use crate::session::Browser;

const LOGIN_URL: &str = "https://x.com/login";

/// Run the interactive login bootstrapper: open a visible browser on the
/// login page, wait for the operator to confirm via a newline on stdin,
/// then capture the session cookies to the credential artifact.
///
/// Overwrites any existing artifact at the configured path.
///
/// # Errors
///
/// Propagates navigation and capture failures; this is a manual, supervised
/// step with no retries.
pub async fn run_login_setup(cfg: &PipelineConfig) -> Result<(), BrowserError> {
    // Always visible: the operator has to interact with the page.
    let browser = Browser::launch(&cfg.webdriver_url, false, cfg.nav_timeout_ms).await?;

    let result = bootstrap(&browser, cfg).await;
    if let Err(close_err) = browser.close().await {
        tracing::warn!(error = %close_err, "failed to close browser after login setup");
    }
    result
}

async fn bootstrap(browser: &Browser, cfg: &PipelineConfig) -> Result<(), BrowserError> {
    browser.goto(LOGIN_URL).await?;

    println!("\n{}", "=".repeat(50));
    println!("Please log in to your account in the browser window.");
    println!("After you have successfully logged in, press Enter here.");
    println!("{}\n", "=".repeat(50));

    wait_for_operator().await;

    save_auth_state(browser.client(), &cfg.auth_state_path).await?;
    println!(
        "Authentication state saved to '{}'. You can now run the pipeline.",
        cfg.auth_state_path.display()
    );
    Ok(())
}

/// Block until the operator sends a newline on stdin.
async fn wait_for_operator() {
    let _ = tokio::task::spawn_blocking(|| {
        let mut line = String::new();
        std::io::stdin().read_line(&mut line)
    })
    .await;
}
