//! Oracle boundary for AI-backed code analysis.
//!
//! The analysis backend is an opaque remote service answering four
//! request/response calls: language verification, best-practice
//! suggestions, complexity estimation, and fix suggestions. This crate
//! owns that boundary:
//! * [`Language`]: the canonical declared-language enum (one spelling,
//!   normalized at the edge)
//! * [`Oracle`]: the async trait the orchestration core calls through
//! * [`HttpOracle`]: the shipped JSON-over-HTTP implementation
//! * [`OracleError`]: the error taxonomy for all of the above
//!
//! Calls are request/response, at-most-once, no built-in retry. Callers
//! that need bounded latency wrap calls in their own timeout; [`HttpOracle`]
//! additionally enforces a client-level timeout so a wedged connection
//! cannot hang forever.

mod contracts;
mod error;
mod http;
mod language;

pub use contracts::{
	AnalyzeCode, ComplexityAnalysis, FixCode, LanguageVerdict, Oracle, Suggestions, VerifyLanguage,
};
pub use error::OracleError;
pub use http::{HttpOracle, OracleConfig};
pub use language::{Language, ParseLanguageError};
