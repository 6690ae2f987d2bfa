//! Notice catalog: every user-visible message the session can emit.
//!
//! Kept in one place so wording and severity stay consistent across the
//! call sites in the session task.

use auspex_oracle::{Language, LanguageVerdict, OracleError};

use crate::dispatch::Block;
use crate::notify::{Level, Notice};
use crate::state::AnalysisKind;

pub(crate) fn language_mismatch(verdict: &LanguageVerdict, expected: Language) -> Notice {
	let message = match (&verdict.actual_language, &verdict.confidence) {
		(Some(actual), Some(confidence)) => format!(
			"This code looks like {actual} ({confidence} confidence), not {}.",
			expected.label()
		),
		(Some(actual), None) => {
			format!("This code looks like {actual}, not {}.", expected.label())
		}
		_ => verdict.reasoning.clone(),
	};
	Notice::new(Level::Error, "Language Mismatch", message)
}

pub(crate) fn language_recovered(expected: Language) -> Notice {
	Notice::new(
		Level::Success,
		"Language Verified",
		format!("Code now matches {}.", expected.label()),
	)
}

pub(crate) fn verification_failed(err: &OracleError) -> Notice {
	Notice::new(
		Level::Error,
		"Verification Failed",
		format!("Could not verify the code language: {err}. Analysis stays disabled until the next edit."),
	)
}

pub(crate) fn blocked(kind: AnalysisKind, block: Block) -> Notice {
	match block {
		Block::EmptyCode => match kind {
			AnalysisKind::Complexity => Notice::new(
				Level::Error,
				"Code Missing",
				"Please provide code to analyze for complexity.",
			),
			AnalysisKind::BestPractices => Notice::new(
				Level::Error,
				"Code Missing",
				"Please provide code to analyze for best practices.",
			),
			AnalysisKind::FixSuggestions => missing_fix_input(),
		},
		Block::MissingErrorMessage => missing_fix_input(),
		Block::Mismatched => Notice::new(
			Level::Error,
			"Language Mismatch",
			"The code does not match the selected language. Fix the code or the selection first.",
		),
		Block::Verifying => Notice::new(
			Level::Info,
			"Verification In Progress",
			"Language verification is still running. Try again in a moment.",
		),
		Block::AlreadyRunning => Notice::new(
			Level::Info,
			"Analysis In Progress",
			format!("A {} request is already running.", kind.label()),
		),
	}
}

fn missing_fix_input() -> Notice {
	Notice::new(
		Level::Error,
		"Input Missing",
		"Please provide both code and an error message for fix suggestions.",
	)
}

pub(crate) fn analysis_ready(kind: AnalysisKind) -> Notice {
	match kind {
		AnalysisKind::Complexity => Notice::new(
			Level::Success,
			"Complexity Analysis Complete",
			"AI has estimated the code's complexity.",
		),
		AnalysisKind::BestPractices => Notice::new(
			Level::Success,
			"Best Practices Analyzed",
			"AI has provided suggestions for best practices.",
		),
		AnalysisKind::FixSuggestions => Notice::new(
			Level::Success,
			"Fix Suggestions Ready",
			"AI has generated potential fixes for your code.",
		),
	}
}

pub(crate) fn analysis_failed(kind: AnalysisKind, err: &OracleError) -> Notice {
	let message = match kind {
		AnalysisKind::Complexity => format!("Failed to analyze complexity. {err}"),
		AnalysisKind::BestPractices => format!("Failed to get best practices. {err}"),
		AnalysisKind::FixSuggestions => format!("Failed to get fix suggestions. {err}"),
	};
	Notice::new(Level::Error, "Error", message)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn mismatch_notice_prefers_detection_detail() {
		let verdict = LanguageVerdict {
			is_match: false,
			actual_language: Some("javascript".to_string()),
			confidence: Some("High".to_string()),
			reasoning: "Uses console.log".to_string(),
		};
		let notice = language_mismatch(&verdict, Language::Python);
		assert_eq!(notice.level, Level::Error);
		assert_eq!(
			notice.message,
			"This code looks like javascript (High confidence), not Python."
		);
	}

	#[test]
	fn mismatch_notice_falls_back_to_reasoning() {
		let verdict = LanguageVerdict {
			is_match: false,
			actual_language: None,
			confidence: None,
			reasoning: "Could not determine the language.".to_string(),
		};
		let notice = language_mismatch(&verdict, Language::Cpp);
		assert_eq!(notice.message, "Could not determine the language.");
	}

	#[test]
	fn fix_guard_uses_the_combined_input_wording() {
		let by_empty = blocked(AnalysisKind::FixSuggestions, Block::EmptyCode);
		let by_message = blocked(AnalysisKind::FixSuggestions, Block::MissingErrorMessage);
		assert_eq!(by_empty, by_message);
		assert_eq!(by_empty.title, "Input Missing");
	}
}
