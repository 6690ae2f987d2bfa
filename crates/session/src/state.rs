//! Session state and its transition rules.
//!
//! One mutable record per session, owned exclusively by the session task.
//! Everything here is synchronous; the session runtime decides *when*
//! transitions run, this module decides *what* they do.
//!
//! Two monotonic counters keep late network completions honest:
//! * [`Generation`]: one per issued verification attempt; a verdict is
//!   applied only while its generation is still the newest.
//! * [`EditEpoch`]: one per accepted edit; an analysis result is applied
//!   only while the snippet it was computed for is still current.

use auspex_oracle::{ComplexityAnalysis, Language, LanguageVerdict};

/// Monotonic id of one verification attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub struct Generation(u64);

impl Generation {
	pub(crate) fn next(self) -> Self {
		Self(self.0.wrapping_add(1))
	}

	/// Raw counter value, for logging.
	pub fn get(self) -> u64 {
		self.0
	}
}

/// Monotonic counter of accepted edits to the snippet or its language.
///
/// Bumped before any new verification cycle starts, so an analysis response
/// tagged with an older epoch can be recognized as stale and discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub struct EditEpoch(u64);

impl EditEpoch {
	pub(crate) fn next(self) -> Self {
		Self(self.0.wrapping_add(1))
	}
}

/// Gate state derived from background language verification.
///
/// One enum instead of independent mismatch/verifying booleans, so the
/// illegal combinations cannot be represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VerifyStatus {
	/// No verdict yet, or the snippet is empty.
	#[default]
	Unknown,
	/// A verification request is in flight.
	Verifying,
	/// The snippet matches the declared language.
	Matched,
	/// The snippet does not match, or verification failed (fail-closed).
	Mismatched,
}

/// Latest verification outcome, with the oracle's supporting detail.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VerificationRecord {
	/// Current gate state.
	pub status: VerifyStatus,
	/// The oracle's explanation for the latest verdict.
	pub reasoning: Option<String>,
	/// Detected language when it differed from the declared one.
	pub detected_language: Option<String>,
	/// Confidence reported for the detection.
	pub confidence: Option<String>,
}

/// The analysis kinds a user can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnalysisKind {
	Complexity,
	BestPractices,
	FixSuggestions,
}

impl AnalysisKind {
	/// Human label used in notices and logs.
	pub fn label(self) -> &'static str {
		match self {
			AnalysisKind::Complexity => "complexity analysis",
			AnalysisKind::BestPractices => "best practices",
			AnalysisKind::FixSuggestions => "fix suggestions",
		}
	}

	/// The result view this kind populates.
	pub fn view(self) -> ActiveView {
		match self {
			AnalysisKind::Complexity => ActiveView::Complexity,
			AnalysisKind::BestPractices => ActiveView::BestPractices,
			AnalysisKind::FixSuggestions => ActiveView::FixSuggestions,
		}
	}
}

impl std::fmt::Display for AnalysisKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.label())
	}
}

/// Which result panel the frontend should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveView {
	#[default]
	Complexity,
	BestPractices,
	FixSuggestions,
}

/// Result slot for the suggestion-list kinds.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SuggestionSlot {
	/// Whether a request for this slot is in flight.
	pub loading: bool,
	/// Latest accepted suggestions; empty when invalidated.
	pub suggestions: Vec<String>,
}

/// Result slot for the complexity kind.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ComplexitySlot {
	/// Whether a request for this slot is in flight.
	pub loading: bool,
	/// Latest accepted estimate; absent when invalidated.
	pub report: Option<ComplexityAnalysis>,
}

/// Typed result of a completed analysis call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum AnalysisPayload {
	Complexity(ComplexityAnalysis),
	BestPractices(Vec<String>),
	Fixes(Vec<String>),
}

/// The single mutable record behind one editing session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
	/// Current snippet text, verbatim.
	pub text: String,
	/// Declared language of the snippet.
	pub language: Language,
	/// Error message accompanying the snippet (gates fix suggestions only).
	pub error_message: String,
	/// Latest verification outcome.
	pub verification: VerificationRecord,
	/// Best-practice suggestions slot.
	pub best_practices: SuggestionSlot,
	/// Complexity estimate slot.
	pub complexity: ComplexitySlot,
	/// Fix suggestions slot.
	pub fixes: SuggestionSlot,
	/// Which result panel is active.
	pub active_view: ActiveView,
	/// Edit staleness counter for analysis responses.
	pub(crate) epoch: EditEpoch,
	/// Whether the last settled verdict was a mismatch.
	///
	/// Baseline for the mismatch/recovered notice asymmetry: repeat
	/// mismatches stay quiet, and "now matches" fires only after an actual
	/// mismatch.
	pub(crate) settled_mismatch: bool,
}

impl SessionState {
	/// Fresh state with an empty snippet.
	pub fn new(language: Language) -> Self {
		Self {
			text: String::new(),
			language,
			error_message: String::new(),
			verification: VerificationRecord::default(),
			best_practices: SuggestionSlot::default(),
			complexity: ComplexitySlot::default(),
			fixes: SuggestionSlot::default(),
			active_view: ActiveView::default(),
			epoch: EditEpoch::default(),
			settled_mismatch: false,
		}
	}

	/// True when the snippet is empty after trimming.
	pub fn is_empty(&self) -> bool {
		self.text.trim().is_empty()
	}

	/// Clears every result slot. Loading flags are left alone; the
	/// in-flight responses they belong to are discarded by epoch instead.
	pub(crate) fn invalidate_results(&mut self) {
		self.best_practices.suggestions.clear();
		self.complexity.report = None;
		self.fixes.suggestions.clear();
	}

	/// Bumps the edit epoch, marking in-flight analysis responses stale.
	pub(crate) fn bump_epoch(&mut self) {
		self.epoch = self.epoch.next();
	}

	/// Returns the gate to `Unknown` and forgets the verdict detail.
	pub(crate) fn reset_verification(&mut self) {
		self.verification = VerificationRecord::default();
		self.settled_mismatch = false;
	}

	/// Marks a verification request as in flight.
	pub(crate) fn begin_verifying(&mut self) {
		self.verification.status = VerifyStatus::Verifying;
	}

	/// Settles the gate from an oracle verdict.
	pub(crate) fn apply_verdict(&mut self, verdict: &LanguageVerdict) {
		self.verification = VerificationRecord {
			status: if verdict.is_match {
				VerifyStatus::Matched
			} else {
				VerifyStatus::Mismatched
			},
			reasoning: Some(verdict.reasoning.clone()),
			detected_language: verdict.actual_language.clone(),
			confidence: verdict.confidence.clone(),
		};
		self.settled_mismatch = !verdict.is_match;
	}

	/// Settles the gate after a failed verification call: fail-closed.
	pub(crate) fn fail_verification(&mut self) {
		self.verification = VerificationRecord {
			status: VerifyStatus::Mismatched,
			reasoning: None,
			detected_language: None,
			confidence: None,
		};
		self.settled_mismatch = true;
	}

	/// Loading flag for one analysis kind.
	pub fn loading(&self, kind: AnalysisKind) -> bool {
		match kind {
			AnalysisKind::Complexity => self.complexity.loading,
			AnalysisKind::BestPractices => self.best_practices.loading,
			AnalysisKind::FixSuggestions => self.fixes.loading,
		}
	}

	pub(crate) fn set_loading(&mut self, kind: AnalysisKind, loading: bool) {
		match kind {
			AnalysisKind::Complexity => self.complexity.loading = loading,
			AnalysisKind::BestPractices => self.best_practices.loading = loading,
			AnalysisKind::FixSuggestions => self.fixes.loading = loading,
		}
	}

	/// Stores an accepted analysis result into its slot.
	pub(crate) fn store(&mut self, payload: AnalysisPayload) {
		match payload {
			AnalysisPayload::Complexity(report) => self.complexity.report = Some(report),
			AnalysisPayload::BestPractices(suggestions) => {
				self.best_practices.suggestions = suggestions;
			}
			AnalysisPayload::Fixes(suggestions) => self.fixes.suggestions = suggestions,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn populated_state() -> SessionState {
		let mut state = SessionState::new(Language::Python);
		state.text = "def f():\n    pass".to_string();
		state.best_practices.suggestions = vec!["Use a docstring".to_string()];
		state.complexity.report = Some(ComplexityAnalysis {
			time_complexity: "O(1)".to_string(),
			space_complexity: "O(1)".to_string(),
			explanation: "No iteration.".to_string(),
		});
		state.fixes.suggestions = vec!["Remove the pass".to_string()];
		state
	}

	#[test]
	fn invalidate_clears_all_slots_but_not_loading() {
		let mut state = populated_state();
		state.complexity.loading = true;
		state.invalidate_results();

		assert!(state.best_practices.suggestions.is_empty());
		assert_eq!(state.complexity.report, None);
		assert!(state.fixes.suggestions.is_empty());
		assert!(state.complexity.loading);
	}

	#[test]
	fn verdict_application_settles_gate_and_detail() {
		let mut state = populated_state();
		state.begin_verifying();
		assert_eq!(state.verification.status, VerifyStatus::Verifying);

		state.apply_verdict(&LanguageVerdict {
			is_match: false,
			actual_language: Some("javascript".to_string()),
			confidence: Some("High".to_string()),
			reasoning: "Uses console.log".to_string(),
		});
		assert_eq!(state.verification.status, VerifyStatus::Mismatched);
		assert_eq!(state.verification.detected_language.as_deref(), Some("javascript"));
		assert!(state.settled_mismatch);

		state.apply_verdict(&LanguageVerdict {
			is_match: true,
			actual_language: None,
			confidence: None,
			reasoning: "Python syntax throughout.".to_string(),
		});
		assert_eq!(state.verification.status, VerifyStatus::Matched);
		assert!(!state.settled_mismatch);
	}

	#[test]
	fn failed_verification_is_fail_closed() {
		let mut state = populated_state();
		state.begin_verifying();
		state.fail_verification();
		assert_eq!(state.verification.status, VerifyStatus::Mismatched);
		assert!(state.settled_mismatch);
	}

	#[test]
	fn reset_returns_gate_to_unknown() {
		let mut state = populated_state();
		state.fail_verification();
		state.reset_verification();
		assert_eq!(state.verification, VerificationRecord::default());
		assert!(!state.settled_mismatch);
	}

	#[test]
	fn store_routes_payload_to_its_slot() {
		let mut state = SessionState::new(Language::Java);
		state.store(AnalysisPayload::BestPractices(vec!["Prefer final".to_string()]));
		assert_eq!(state.best_practices.suggestions, vec!["Prefer final".to_string()]);
		assert_eq!(state.complexity.report, None);
	}

	#[test]
	fn whitespace_only_text_counts_as_empty() {
		let mut state = SessionState::new(Language::Python);
		state.text = "  \n\t".to_string();
		assert!(state.is_empty());
	}
}
