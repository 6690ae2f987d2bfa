//! Request/response contracts for the four oracle calls.
//!
//! Field sets are fixed; all values are UTF-8 text except the booleans.
//! Wire form is camelCase JSON.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::OracleError;
use crate::language::Language;

/// Request for the language-verification call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyLanguage {
	/// The snippet to verify, verbatim.
	pub code: String,
	/// The language the user declared.
	pub expected_language: Language,
}

/// The oracle's answer to a [`VerifyLanguage`] request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageVerdict {
	/// Whether the snippet matches the declared language.
	pub is_match: bool,
	/// Detected language when it differs from the declared one.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub actual_language: Option<String>,
	/// Confidence in the detection (free-form, e.g. "High").
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub confidence: Option<String>,
	/// Brief explanation for the determination.
	pub reasoning: String,
}

/// Request shared by the best-practices and complexity calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeCode {
	pub code: String,
	pub language: Language,
}

/// Request for the fix-suggestions call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixCode {
	pub code: String,
	pub language: Language,
	/// The error message the user pasted alongside the snippet.
	pub error_message: String,
}

/// Ordered suggestion list returned by the best-practices and fix calls.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestions {
	pub suggestions: Vec<String>,
}

/// Complexity estimate returned by the complexity call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplexityAnalysis {
	/// Estimated time complexity in Big O notation.
	pub time_complexity: String,
	/// Estimated space complexity in Big O notation.
	pub space_complexity: String,
	/// Brief explanation of how the estimate was derived.
	pub explanation: String,
}

/// The remote analysis oracle.
///
/// Implementations answer each call independently; none of them retries.
/// The trait exists so the orchestration core can be driven by a scripted
/// oracle in tests and by [`crate::HttpOracle`] in production.
#[async_trait]
pub trait Oracle: Send + Sync {
	/// Checks whether the snippet is written in the declared language.
	async fn verify_language(&self, req: VerifyLanguage) -> Result<LanguageVerdict, OracleError>;

	/// Suggests refactoring opportunities for the snippet.
	async fn best_practices(&self, req: AnalyzeCode) -> Result<Suggestions, OracleError>;

	/// Estimates time and space complexity of the snippet.
	async fn complexity(&self, req: AnalyzeCode) -> Result<ComplexityAnalysis, OracleError>;

	/// Suggests fixes for the snippet given an error message.
	async fn code_fixes(&self, req: FixCode) -> Result<Suggestions, OracleError>;
}
