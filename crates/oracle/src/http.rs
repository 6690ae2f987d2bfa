//! JSON-over-HTTP oracle client.
//!
//! Posts each contract to its own endpoint under a configurable base URL:
//! `verify-language`, `best-practices`, `complexity`, `code-fixes`. The
//! client carries its own timeout so a wedged connection surfaces as
//! [`OracleError::Timeout`] instead of hanging the caller.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::contracts::{
	AnalyzeCode, ComplexityAnalysis, FixCode, LanguageVerdict, Oracle, Suggestions, VerifyLanguage,
};
use crate::error::OracleError;

/// Configuration for [`HttpOracle`].
#[derive(Debug, Clone)]
pub struct OracleConfig {
	/// Base URL the four endpoints live under.
	pub base_url: Url,
	/// Client-level timeout applied to every call.
	pub timeout: Duration,
}

impl OracleConfig {
	/// Default per-call timeout.
	pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

	/// Creates a config with the default timeout.
	pub fn new(base_url: Url) -> Self {
		Self {
			base_url,
			timeout: Self::DEFAULT_TIMEOUT,
		}
	}
}

/// HTTP implementation of [`Oracle`].
#[derive(Debug, Clone)]
pub struct HttpOracle {
	client: Client,
	verify_url: Url,
	best_practices_url: Url,
	complexity_url: Url,
	fixes_url: Url,
}

impl HttpOracle {
	/// Builds the client and resolves the four endpoint URLs up front, so
	/// a bad base URL fails at construction rather than on first use.
	pub fn new(config: OracleConfig) -> Result<Self, OracleError> {
		let client = Client::builder().timeout(config.timeout).build()?;
		Ok(Self {
			client,
			verify_url: endpoint(&config.base_url, "verify-language")?,
			best_practices_url: endpoint(&config.base_url, "best-practices")?,
			complexity_url: endpoint(&config.base_url, "complexity")?,
			fixes_url: endpoint(&config.base_url, "code-fixes")?,
		})
	}

	async fn post<B, R>(&self, url: &Url, body: &B) -> Result<R, OracleError>
	where
		B: Serialize + Sync,
		R: DeserializeOwned,
	{
		debug!(endpoint = %url, "oracle request");
		let response = self
			.client
			.post(url.clone())
			.json(body)
			.send()
			.await
			.map_err(|err| {
				if err.is_timeout() {
					OracleError::Timeout
				} else {
					OracleError::Transport(err)
				}
			})?;

		let status = response.status();
		if !status.is_success() {
			return Err(OracleError::Status {
				status: status.as_u16(),
			});
		}

		response
			.json::<R>()
			.await
			.map_err(|err| OracleError::Malformed(err.to_string()))
	}
}

#[async_trait]
impl Oracle for HttpOracle {
	async fn verify_language(&self, req: VerifyLanguage) -> Result<LanguageVerdict, OracleError> {
		self.post(&self.verify_url, &req).await
	}

	async fn best_practices(&self, req: AnalyzeCode) -> Result<Suggestions, OracleError> {
		self.post(&self.best_practices_url, &req).await
	}

	async fn complexity(&self, req: AnalyzeCode) -> Result<ComplexityAnalysis, OracleError> {
		self.post(&self.complexity_url, &req).await
	}

	async fn code_fixes(&self, req: FixCode) -> Result<Suggestions, OracleError> {
		self.post(&self.fixes_url, &req).await
	}
}

/// Joins an endpoint name onto the base URL, preserving any path prefix.
///
/// `Url::join` drops the final path segment when the base lacks a trailing
/// slash, which would silently eat a `/api`-style prefix.
fn endpoint(base: &Url, name: &str) -> Result<Url, url::ParseError> {
	let mut base = base.clone();
	if !base.path().ends_with('/') {
		let path = format!("{}/", base.path());
		base.set_path(&path);
	}
	base.join(name)
}
