use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Declared source language of a snippet.
///
/// The set is closed; the oracle contracts only accept these four. Exactly
/// one canonical wire spelling exists per language (the lowercase id), and
/// [`Language::from_str`] folds the spelling variants found in the wild
/// (`C++`, `JavaScript`, ...) into it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
	Python,
	Javascript,
	Cpp,
	Java,
}

impl Language {
	/// All supported languages, in UI order.
	pub const ALL: [Language; 4] = [
		Language::Python,
		Language::Javascript,
		Language::Cpp,
		Language::Java,
	];

	/// Canonical wire id (lowercase, matches the serde form).
	pub fn id(self) -> &'static str {
		match self {
			Language::Python => "python",
			Language::Javascript => "javascript",
			Language::Cpp => "cpp",
			Language::Java => "java",
		}
	}

	/// Human-readable label for display surfaces.
	pub fn label(self) -> &'static str {
		match self {
			Language::Python => "Python",
			Language::Javascript => "JavaScript",
			Language::Cpp => "C++",
			Language::Java => "Java",
		}
	}
}

impl fmt::Display for Language {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.id())
	}
}

/// Input did not name a supported language.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported language: {input:?} (expected one of python, javascript, cpp, java)")]
pub struct ParseLanguageError {
	/// The rejected input, verbatim.
	pub input: String,
}

impl FromStr for Language {
	type Err = ParseLanguageError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_lowercase().as_str() {
			"python" => Ok(Language::Python),
			"javascript" | "js" => Ok(Language::Javascript),
			"cpp" | "c++" => Ok(Language::Cpp),
			"java" => Ok(Language::Java),
			_ => Err(ParseLanguageError { input: s.to_string() }),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parse_accepts_call_site_spellings() {
		assert_eq!("python".parse::<Language>(), Ok(Language::Python));
		assert_eq!("JavaScript".parse::<Language>(), Ok(Language::Javascript));
		assert_eq!("C++".parse::<Language>(), Ok(Language::Cpp));
		assert_eq!("  Java ".parse::<Language>(), Ok(Language::Java));
	}

	#[test]
	fn parse_rejects_unknown() {
		let err = "ruby".parse::<Language>().unwrap_err();
		assert_eq!(err.input, "ruby");
	}

	#[test]
	fn wire_form_is_lowercase_id() {
		for lang in Language::ALL {
			let json = serde_json::to_string(&lang).unwrap();
			assert_eq!(json, format!("\"{}\"", lang.id()));
			let back: Language = serde_json::from_str(&json).unwrap();
			assert_eq!(back, lang);
		}
	}
}
