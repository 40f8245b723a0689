use chromiumoxide::Browser;
use futures::StreamExt;

use pageveil::{Result, VeilConfig, VeilError};

pub async fn run(
    config: VeilConfig,
    seed: Option<u64>,
    cdp: String,
    url: Option<String>,
) -> Result<()> {
    let installer = super::installer(config, seed)?;

    let ws_url = if cdp.starts_with("ws://") || cdp.starts_with("wss://") {
        cdp
    } else {
        format!("ws://{cdp}")
    };

    let (browser, mut handler) = Browser::connect(ws_url)
        .await
        .map_err(|e| VeilError::CdpConnectionFailed(format!("failed to connect: {e}")))?;
    let driver = tokio::spawn(async move { while handler.next().await.is_some() {} });

    let page = browser
        .new_page("about:blank")
        .await
        .map_err(|e| VeilError::CdpConnectionFailed(format!("failed to open page: {e}")))?;

    installer.install(&page).await?;
    tracing::info!(
        surfaces = installer.overrides().len(),
        "fingerprint layer installed on new page"
    );

    if let Some(url) = url {
        page.goto(url.clone())
            .await
            .map_err(|e| VeilError::JavaScriptError(format!("navigation failed: {e}")))?;
        tracing::info!(%url, "navigated with overrides active");
    }

    driver.abort();
    Ok(())
}
