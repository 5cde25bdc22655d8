//! Scoped browser sessions.
//!
//! A session is acquired, handed to the caller's work, and released on every
//! exit path. Release closes the WebDriver session and deletes the
//! temporary profile copy.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;

use async_trait::async_trait;
use etsy_stats_core::BrowserConfig;
use fantoccini::ClientBuilder;
use serde_json::{json, Map, Value};
use tempfile::TempDir;

use crate::browser::Browser;
use crate::error::ScraperError;

use super::profile::copy_profile;
use super::WebDriverBrowser;

/// A browser that must be released once the work using it is done.
#[async_trait]
pub trait ScopedSession: Send + Sized {
    type Browser: Browser;

    fn browser(&self) -> &Self::Browser;

    async fn release(self) -> Result<(), ScraperError>;
}

/// Runs `work` against the session's browser, then releases the session
/// whether the work succeeded or not.
///
/// A work error takes precedence over a release error; the latter is only
/// logged in that case.
///
/// # Errors
///
/// Returns the work's error, or the release error when the work succeeded.
pub async fn with_session<S, T, F>(session: S, work: F) -> Result<T, ScraperError>
where
    S: ScopedSession,
    F: for<'b> FnOnce(
        &'b S::Browser,
    ) -> Pin<Box<dyn Future<Output = Result<T, ScraperError>> + 'b>>,
{
    let outcome = work(session.browser()).await;
    let released = session.release().await;

    match (outcome, released) {
        (Ok(value), Ok(())) => Ok(value),
        (Ok(_), Err(release_err)) => Err(release_err),
        (Err(err), Ok(())) => Err(err),
        (Err(err), Err(release_err)) => {
            tracing::warn!(error = %release_err, "failed to release browser session after error");
            Err(err)
        }
    }
}

/// Launches a WebDriver session from `config` and runs `work` inside it.
///
/// # Errors
///
/// Returns [`ScraperError::Session`] if the profile copy or the WebDriver
/// connection fails, otherwise as [`with_session`].
pub async fn run_in_session<T, F>(
    config: &BrowserConfig,
    chrome_profile: &str,
    work: F,
) -> Result<T, ScraperError>
where
    F: for<'b> FnOnce(
        &'b WebDriverBrowser,
    ) -> Pin<Box<dyn Future<Output = Result<T, ScraperError>> + 'b>>,
{
    let session = WebDriverSession::launch(config, chrome_profile).await?;
    with_session(session, work).await
}

/// Chromedriver session plus the temp profile copy it runs against.
pub struct WebDriverSession {
    browser: WebDriverBrowser,
    profile_copy: Option<TempDir>,
}

impl WebDriverSession {
    /// Copies the configured Chrome profile (if any) and opens a session.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Session`] on copy or connection failure. A
    /// profile copy made before a failed connection is removed.
    pub async fn launch(config: &BrowserConfig, chrome_profile: &str) -> Result<Self, ScraperError> {
        let profile_copy = match &config.chrome_user_data_dir {
            Some(root) => Some(copy_profile_blocking(root.clone(), chrome_profile.to_owned()).await?),
            None => None,
        };

        let capabilities = chrome_capabilities(
            config,
            profile_copy.as_ref().map(TempDir::path),
            chrome_profile,
        );

        let mut builder = ClientBuilder::native();
        builder.capabilities(capabilities);
        let client = builder.connect(&config.webdriver_url).await.map_err(|e| {
            ScraperError::Session(format!(
                "failed to start WebDriver session at {}: {e}",
                config.webdriver_url
            ))
        })?;

        tracing::info!(
            webdriver_url = %config.webdriver_url,
            headless = config.headless,
            profile_copy = profile_copy.is_some(),
            "browser session started"
        );

        Ok(Self {
            browser: WebDriverBrowser::new(client),
            profile_copy,
        })
    }
}

#[async_trait]
impl ScopedSession for WebDriverSession {
    type Browser = WebDriverBrowser;

    fn browser(&self) -> &WebDriverBrowser {
        &self.browser
    }

    async fn release(self) -> Result<(), ScraperError> {
        let closed = self.browser.close().await;

        let removed = match self.profile_copy {
            Some(dir) => {
                let path = dir.path().to_path_buf();
                dir.close().map_err(|e| {
                    ScraperError::Session(format!(
                        "failed to remove profile copy {}: {e}",
                        path.display()
                    ))
                })
            }
            None => Ok(()),
        };

        tracing::info!("browser session closed");
        closed.and(removed)
    }
}

async fn copy_profile_blocking(root: PathBuf, profile: String) -> Result<TempDir, ScraperError> {
    tokio::task::spawn_blocking(move || copy_profile(&root, &profile))
        .await
        .map_err(|e| ScraperError::Session(format!("profile copy task failed: {e}")))?
}

/// `goog:chromeOptions` capabilities for a session.
pub(crate) fn chrome_capabilities(
    config: &BrowserConfig,
    user_data_dir: Option<&Path>,
    chrome_profile: &str,
) -> Map<String, Value> {
    let mut args = vec![
        format!("--user-agent={}", config.user_agent),
        "--window-size=1920,1080".to_owned(),
    ];
    if config.headless {
        args.push("--headless=new".to_owned());
    }
    if let Some(dir) = user_data_dir {
        args.push(format!("--user-data-dir={}", dir.display()));
        args.push(format!("--profile-directory={chrome_profile}"));
    }

    let mut chrome_options = Map::new();
    chrome_options.insert("args".to_owned(), json!(args));
    if let Some(binary) = &config.chrome_binary {
        chrome_options.insert("binary".to_owned(), json!(binary.display().to_string()));
    }

    let mut capabilities = Map::new();
    capabilities.insert("browserName".to_owned(), json!("chrome"));
    capabilities.insert("goog:chromeOptions".to_owned(), Value::Object(chrome_options));
    capabilities
}
