use thiserror::Error;

/// Errors produced at the oracle boundary.
#[derive(Debug, Error)]
pub enum OracleError {
	/// The configured base URL does not yield valid endpoint URLs.
	#[error("invalid oracle endpoint: {0}")]
	Endpoint(#[from] url::ParseError),

	/// The HTTP request could not be completed.
	#[error("oracle request failed: {0}")]
	Transport(#[from] reqwest::Error),

	/// The oracle answered with a non-success HTTP status.
	#[error("oracle returned status {status}")]
	Status {
		/// The HTTP status code.
		status: u16,
	},

	/// The response body did not decode into the expected contract.
	#[error("malformed oracle response: {0}")]
	Malformed(String),

	/// The call exceeded its deadline.
	#[error("oracle call timed out")]
	Timeout,
}
