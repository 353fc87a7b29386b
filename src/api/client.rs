use crate::api::api_types::{ApiLiveSessionsResponse, ApiReportResponse};
use crate::api::types::{LiveSession, Report, ReportKind, ReportQuery, DATE_FORMAT};
use crate::config::Config;
use crate::error::ApiError;
use url::Url;

/// Portal API client wrapper
#[derive(Clone)]
pub struct PortalClient {
  http: reqwest::Client,
  base: Url,
  token: Option<String>,
}

impl PortalClient {
  pub fn new(config: &Config) -> Result<Self, ApiError> {
    Self::with_token(&config.api.url, Config::get_api_token())
  }

  pub fn with_token(base_url: &str, token: Option<String>) -> Result<Self, ApiError> {
    let http = reqwest::Client::builder()
      .user_agent(concat!("dealer-portal/", env!("CARGO_PKG_VERSION")))
      .build()?;

    Ok(Self {
      http,
      base: Url::parse(base_url)?,
      token,
    })
  }

  pub fn token(&self) -> Option<&str> {
    self.token.as_deref()
  }

  /// Fetch one report for a date range
  pub async fn fetch_report(&self, kind: ReportKind, query: ReportQuery) -> Result<Report, ApiError> {
    let url = self.report_url(kind, query)?;

    let response: ApiReportResponse = self
      .authorized(self.http.get(url))
      .send()
      .await?
      .error_for_status()?
      .json()
      .await?;

    response.into_report()
  }

  /// Fetch the current list of live reverse-bidding sessions
  pub async fn get_live_sessions(&self) -> Result<Vec<LiveSession>, ApiError> {
    let url = self.base.join("api/reverse-bidding/live-sessions")?;

    let response: ApiLiveSessionsResponse = self
      .authorized(self.http.get(url))
      .send()
      .await?
      .error_for_status()?
      .json()
      .await?;

    response.into_sessions()
  }

  /// URL of the live session event stream. The token travels as a query
  /// parameter since the push endpoint cannot take headers.
  pub fn live_stream_url(&self, token: &str) -> Result<Url, ApiError> {
    let mut url = self.base.join("api/reverse-bidding/live-sessions/stream")?;
    url.query_pairs_mut().append_pair("token", token);
    Ok(url)
  }

  pub fn http(&self) -> &reqwest::Client {
    &self.http
  }

  fn report_url(&self, kind: ReportKind, query: ReportQuery) -> Result<Url, ApiError> {
    let mut url = self.base.join(&format!("api/reports/{}", kind.name()))?;
    url
      .query_pairs_mut()
      .append_pair("dateFrom", &query.range.start().format(DATE_FORMAT).to_string())
      .append_pair("dateTo", &query.range.end().format(DATE_FORMAT).to_string())
      .append_pair("groupBy", query.group_by.as_str());
    Ok(url)
  }

  fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
    match &self.token {
      Some(token) => request.bearer_auth(token),
      None => request,
    }
  }
}
