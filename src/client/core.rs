// File: src/client/core.rs
use crate::model::{ClearValuesResponse, Row, UpdateValuesResponse, ValueRange};

use anyhow::{Context, Result, anyhow, bail};
use http::{HeaderValue, Method, Request, Response, StatusCode, Uri, header};
use http_body_util::BodyExt;
use hyper::body::Incoming;
use hyper_rustls::HttpsConnectorBuilder;
use hyper_util::client::legacy::Client;
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::rt::TokioExecutor;
use serde::de::DeserializeOwned;
use tower::ServiceExt;
use tower_http::auth::AddAuthorization;
use url::Url;

pub type HttpClient = Client<hyper_rustls::HttpsConnector<HttpConnector>, String>;

type AuthorizedClient = AddAuthorization<HttpClient>;

/// Builds the shared HTTPS client.
///
/// With `secure` set, the system trust store must yield at least one root.
/// Plain `http://` endpoints are still reachable for local mock servers.
pub fn build_http_client(secure: bool) -> Result<HttpClient> {
    let mut root_store = rustls::RootCertStore::empty();
    let result = rustls_native_certs::load_native_certs();
    for e in &result.errors {
        log::debug!("Skipping native certificate: {}", e);
    }
    root_store.add_parsable_certificates(result.certs);
    if secure && root_store.is_empty() {
        bail!("No valid system certificates found.");
    }

    let tls_config = rustls::ClientConfig::builder()
        .with_root_certificates(root_store)
        .with_no_client_auth();

    let https_connector = HttpsConnectorBuilder::new()
        .with_tls_config(tls_config)
        .https_or_http()
        .enable_http1()
        .build();

    Ok(Client::builder(TokioExecutor::new()).build(https_connector))
}

pub(crate) fn to_uri(url: &Url) -> Result<Uri> {
    url.as_str()
        .parse::<Uri>()
        .with_context(|| format!("Invalid request URI: {}", url))
}

/// Drains a response, returning its status and raw body.
pub(crate) async fn read_response(response: Response<Incoming>) -> Result<(StatusCode, Vec<u8>)> {
    let status = response.status();
    let body = response
        .into_body()
        .collect()
        .await
        .context("Failed to read response body")?
        .to_bytes();
    Ok((status, body.to_vec()))
}

/// Decodes a JSON body, turning non-success statuses into errors that carry the body text.
pub(crate) fn decode_json<T: DeserializeOwned>(
    what: &str,
    status: StatusCode,
    body: &[u8],
) -> Result<T> {
    if !status.is_success() {
        return Err(anyhow!(
            "{} failed with {}: {}",
            what,
            status,
            String::from_utf8_lossy(body).trim()
        ));
    }
    serde_json::from_slice(body).with_context(|| format!("{}: unexpected response body", what))
}

/// Authenticated client for the Sheets v4 `values` endpoints.
#[derive(Clone, Debug)]
pub struct SheetsClient {
    http: AuthorizedClient,
    base: Url,
    user_agent: HeaderValue,
}

impl SheetsClient {
    pub fn new(base_url: &str, access_token: &str, application_name: &str) -> Result<Self> {
        let base = Url::parse(base_url).with_context(|| format!("Invalid API URL: {}", base_url))?;
        if base.cannot_be_a_base() {
            bail!("Invalid API URL: {}", base_url);
        }
        // AddAuthorization panics on header values it cannot encode; check first.
        HeaderValue::from_str(&format!("Bearer {}", access_token))
            .context("Access token is not a valid header value")?;
        let user_agent = HeaderValue::from_str(application_name)
            .context("Application name is not a valid header value")?;

        let http_client = build_http_client(base.scheme() == "https")?;
        Ok(Self {
            http: AddAuthorization::bearer(http_client, access_token),
            base,
            user_agent,
        })
    }

    /// `{base}/v4/spreadsheets/{id}/values/{range}{suffix}` with the range as one encoded segment.
    fn values_url(&self, spreadsheet_id: &str, range: &str, suffix: &str) -> Result<Url> {
        let target = format!("{}{}", range, suffix);
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow!("Invalid API URL: {}", self.base))?
            .pop_if_empty()
            .extend(["v4", "spreadsheets", spreadsheet_id, "values", target.as_str()]);
        Ok(url)
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        what: &str,
        method: Method,
        url: Url,
        body: String,
    ) -> Result<T> {
        log::debug!("{} {}", method, url);
        let mut builder = Request::builder()
            .method(method)
            .uri(to_uri(&url)?)
            .header(header::USER_AGENT, self.user_agent.clone())
            .header(header::ACCEPT, "application/json");
        if !body.is_empty() {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
        }
        let request = builder.body(body)?;

        let response = self
            .http
            .clone()
            .oneshot(request)
            .await
            .with_context(|| format!("{}: request to {} failed", what, url))?;
        let (status, body) = read_response(response).await?;
        decode_json(what, status, &body)
    }

    pub async fn get_values(&self, spreadsheet_id: &str, range: &str) -> Result<ValueRange> {
        let url = self.values_url(spreadsheet_id, range, "")?;
        self.execute("Reading values", Method::GET, url, String::new())
            .await
    }

    /// Writes `rows` from the range origin with `valueInputOption=RAW`.
    pub async fn update_values(
        &self,
        spreadsheet_id: &str,
        range: &str,
        rows: Vec<Row>,
    ) -> Result<UpdateValuesResponse> {
        let mut url = self.values_url(spreadsheet_id, range, "")?;
        url.query_pairs_mut().append_pair("valueInputOption", "RAW");
        let body = serde_json::to_string(&ValueRange::rows(range, rows))?;
        self.execute("Updating values", Method::PUT, url, body).await
    }

    pub async fn clear_values(
        &self,
        spreadsheet_id: &str,
        range: &str,
    ) -> Result<ClearValuesResponse> {
        let url = self.values_url(spreadsheet_id, range, ":clear")?;
        self.execute("Clearing values", Method::POST, url, "{}".to_string())
            .await
    }
}
