// File: ./src/client/session.rs
use crate::client::core::SheetsClient;
use crate::client::oauth::CredentialProvider;
use crate::config::Config;
use crate::model::Row;
use anyhow::Result;
use std::future::Future;

/// The three values operations the controller needs, bound to one range.
pub trait ValuesApi {
    /// All rows currently in the range (empty when the range is blank).
    fn read(&self) -> impl Future<Output = Result<Vec<Row>>> + Send;
    /// Writes `rows` from the range origin in RAW mode; returns the updated cell count.
    fn update(&self, rows: Vec<Row>) -> impl Future<Output = Result<u64>> + Send;
    fn clear(&self) -> impl Future<Output = Result<()>> + Send;
}

/// An authenticated handle bound to one spreadsheet and range.
#[derive(Clone, Debug)]
pub struct SheetSession {
    client: SheetsClient,
    spreadsheet_id: String,
    range: String,
}

impl SheetSession {
    pub fn new(client: SheetsClient, spreadsheet_id: &str, range: &str) -> Self {
        Self {
            client,
            spreadsheet_id: spreadsheet_id.to_string(),
            range: range.to_string(),
        }
    }

    /// Obtains a token from `provider` and binds a client to the configured sheet.
    pub async fn establish<P>(config: &Config, provider: &P) -> Result<Self>
    where
        P: CredentialProvider + Sync,
    {
        let token = provider.access_token().await?;
        let client = SheetsClient::new(&config.api_base_url, &token, &config.application_name)?;
        log::debug!(
            "Session established for spreadsheet {} ({})",
            config.spreadsheet_id,
            config.range
        );
        Ok(Self::new(client, &config.spreadsheet_id, &config.range))
    }
}

impl ValuesApi for SheetSession {
    async fn read(&self) -> Result<Vec<Row>> {
        let response = self
            .client
            .get_values(&self.spreadsheet_id, &self.range)
            .await?;
        Ok(response.values)
    }

    async fn update(&self, rows: Vec<Row>) -> Result<u64> {
        let response = self
            .client
            .update_values(&self.spreadsheet_id, &self.range, rows)
            .await?;
        Ok(response.updated_cells)
    }

    async fn clear(&self) -> Result<()> {
        let response = self
            .client
            .clear_values(&self.spreadsheet_id, &self.range)
            .await?;
        log::debug!(
            "Cleared {}",
            response.cleared_range.as_deref().unwrap_or(&self.range)
        );
        Ok(())
    }
}
