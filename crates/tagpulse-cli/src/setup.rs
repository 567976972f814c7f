//! Login bootstrap command.

use tagpulse_core::PipelineConfig;

/// Run the one-time supervised login and save the authentication state.
///
/// # Errors
///
/// Propagates browser session and cookie capture failures.
pub(crate) async fn run_setup(cfg: &PipelineConfig) -> anyhow::Result<()> {
    tagpulse_browser::run_login_setup(cfg)
        .await
        .map_err(|e| anyhow::anyhow!("login setup failed: {e}"))
}
