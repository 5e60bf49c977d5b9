// File: ./src/client/oauth.rs
//! Access-token acquisition for installed (desktop) applications.
//!
//! The consent flow, refresh and token persistence are delegated to
//! `yup_oauth2`'s installed-flow authenticator. The redirect is caught on
//! `http://localhost:<callback_port>` and tokens are kept in
//! `<token_dir>/user.json`.
use crate::config::{Config, SHEETS_SCOPE};
use crate::context::AppContext;

use anyhow::{Context, Result, anyhow};
use std::future::Future;
use std::path::{Path, PathBuf};
use hyper_rustls::HttpsConnector;
use hyper_util::client::legacy::connect::HttpConnector;
use yup_oauth2::authenticator::Authenticator;
use yup_oauth2::{ApplicationSecret, InstalledFlowAuthenticator, InstalledFlowReturnMethod};

/// Token file inside the token directory; the tool acts for a single local user.
pub const TOKEN_FILE: &str = "user.json";

/// Anything able to hand out a bearer token for the Sheets API.
pub trait CredentialProvider {
    fn access_token(&self) -> impl Future<Output = Result<String>> + Send;
}

/// Fixed token, for tests and for tokens minted elsewhere.
#[derive(Clone, Debug)]
pub struct StaticToken(pub String);

impl CredentialProvider for StaticToken {
    async fn access_token(&self) -> Result<String> {
        Ok(self.0.clone())
    }
}

/// Reads the `installed` (or `web`) client secrets downloaded from the cloud console.
pub async fn read_client_secret(path: &Path) -> Result<ApplicationSecret> {
    yup_oauth2::read_application_secret(path)
        .await
        .with_context(|| format!("Failed to read client secrets {:?}", path))
}

#[cfg(unix)]
fn restrict_to_owner(path: &Path, mode: u32) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(mode))
        .with_context(|| format!("Failed to restrict permissions on {:?}", path))
}

#[cfg(not(unix))]
fn restrict_to_owner(_path: &Path, _mode: u32) -> Result<()> {
    Ok(())
}

/// Creates the token directory if needed and restricts it to the owner (0700),
/// also when it already existed with looser bits.
pub fn prepare_token_dir(dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create token directory {:?}", dir))?;
    restrict_to_owner(dir, 0o700)?;
    Ok(dir.to_path_buf())
}

/// Sets a cached token file to 0600. A missing file is left alone.
pub fn secure_token_file(path: &Path) -> Result<()> {
    if path.exists() {
        restrict_to_owner(path, 0o600)?;
    }
    Ok(())
}

/// Browser-based consent flow with an on-disk token cache.
pub struct InstalledFlow {
    auth: Authenticator<HttpsConnector<HttpConnector>>,
    token_path: PathBuf,
}

impl std::fmt::Debug for InstalledFlow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InstalledFlow")
            .field("token_path", &self.token_path)
            .finish_non_exhaustive()
    }
}

impl InstalledFlow {
    /// Reads client secrets and prepares the token cache named by `config`.
    ///
    /// Nothing is requested from the network until the first `access_token` call.
    pub async fn from_config(config: &Config, ctx: &dyn AppContext) -> Result<Self> {
        let secret = read_client_secret(&config.credentials_path(ctx)?).await?;
        let token_path = prepare_token_dir(&config.token_dir(ctx)?)?.join(TOKEN_FILE);
        secure_token_file(&token_path)?;

        let auth = InstalledFlowAuthenticator::builder(
            secret,
            InstalledFlowReturnMethod::HTTPPortRedirect(config.callback_port),
        )
        .persist_tokens_to_disk(token_path.clone())
        .build()
        .await
        .context("Failed to set up the authorization flow")?;

        log::debug!("Token cache at {:?}", token_path);
        Ok(Self { auth, token_path })
    }
}

impl CredentialProvider for InstalledFlow {
    async fn access_token(&self) -> Result<String> {
        let token = self
            .auth
            .token(&[SHEETS_SCOPE])
            .await
            .context("Authorization failed")?;
        // Owner-only regardless of the umask the cache was written under.
        secure_token_file(&self.token_path)?;
        token
            .token()
            .map(str::to_string)
            .ok_or_else(|| anyhow!("Authorization returned no access token"))
    }
}
