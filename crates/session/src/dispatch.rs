//! Synchronous dispatcher preconditions.
//!
//! Checked before any network call; a refused trigger performs zero calls
//! and leaves every loading flag untouched.

use crate::policy::SessionPolicy;
use crate::state::{AnalysisKind, SessionState, VerifyStatus};

/// Why a trigger was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Block {
	/// The snippet is empty.
	EmptyCode,
	/// Fix suggestions need an error message alongside the snippet.
	MissingErrorMessage,
	/// The declared language does not match the snippet.
	Mismatched,
	/// Verification is still in flight and the policy blocks on it.
	Verifying,
	/// A request of this kind is already in flight.
	AlreadyRunning,
}

/// Evaluates the preconditions for triggering `kind`; `None` means proceed.
pub(crate) fn check(
	state: &SessionState,
	policy: &SessionPolicy,
	kind: AnalysisKind,
) -> Option<Block> {
	if state.is_empty() {
		return Some(Block::EmptyCode);
	}
	if kind == AnalysisKind::FixSuggestions && state.error_message.trim().is_empty() {
		return Some(Block::MissingErrorMessage);
	}
	match state.verification.status {
		VerifyStatus::Mismatched => return Some(Block::Mismatched),
		VerifyStatus::Verifying if policy.block_while_verifying => return Some(Block::Verifying),
		_ => {}
	}
	if state.loading(kind) {
		return Some(Block::AlreadyRunning);
	}
	None
}

#[cfg(test)]
mod tests {
	use auspex_oracle::Language;

	use super::*;

	fn ready_state() -> SessionState {
		let mut state = SessionState::new(Language::Python);
		state.text = "def f():\n    pass".to_string();
		state.verification.status = VerifyStatus::Matched;
		state
	}

	#[test]
	fn matched_state_passes_all_kinds_with_inputs() {
		let mut state = ready_state();
		state.error_message = "SyntaxError".to_string();
		let policy = SessionPolicy::default();
		for kind in [
			AnalysisKind::Complexity,
			AnalysisKind::BestPractices,
			AnalysisKind::FixSuggestions,
		] {
			assert_eq!(check(&state, &policy, kind), None, "{kind}");
		}
	}

	#[test]
	fn empty_code_blocks_everything() {
		let mut state = ready_state();
		state.text = "   ".to_string();
		let policy = SessionPolicy::default();
		assert_eq!(
			check(&state, &policy, AnalysisKind::Complexity),
			Some(Block::EmptyCode)
		);
	}

	#[test]
	fn mismatch_blocks_everything() {
		let mut state = ready_state();
		state.verification.status = VerifyStatus::Mismatched;
		let policy = SessionPolicy::default();
		assert_eq!(
			check(&state, &policy, AnalysisKind::BestPractices),
			Some(Block::Mismatched)
		);
	}

	#[test]
	fn verifying_blocks_only_under_policy() {
		let mut state = ready_state();
		state.verification.status = VerifyStatus::Verifying;

		let blocking = SessionPolicy::default();
		assert_eq!(
			check(&state, &blocking, AnalysisKind::Complexity),
			Some(Block::Verifying)
		);

		let permissive = SessionPolicy {
			block_while_verifying: false,
			..SessionPolicy::default()
		};
		assert_eq!(check(&state, &permissive, AnalysisKind::Complexity), None);
	}

	#[test]
	fn unknown_status_does_not_block() {
		let mut state = ready_state();
		state.verification.status = VerifyStatus::Unknown;
		let policy = SessionPolicy::default();
		assert_eq!(check(&state, &policy, AnalysisKind::Complexity), None);
	}

	#[test]
	fn fixes_require_an_error_message() {
		let state = ready_state();
		let policy = SessionPolicy::default();
		assert_eq!(
			check(&state, &policy, AnalysisKind::FixSuggestions),
			Some(Block::MissingErrorMessage)
		);
	}

	#[test]
	fn loading_kind_refuses_a_second_trigger() {
		let mut state = ready_state();
		state.complexity.loading = true;
		let policy = SessionPolicy::default();
		assert_eq!(
			check(&state, &policy, AnalysisKind::Complexity),
			Some(Block::AlreadyRunning)
		);
		// Other kinds are unaffected.
		assert_eq!(check(&state, &policy, AnalysisKind::BestPractices), None);
	}
}
