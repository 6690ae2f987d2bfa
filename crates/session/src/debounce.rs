//! Debounce + staleness bookkeeping for background verification.
//!
//! At most one deadline is armed at a time; re-arming replaces it, which is
//! the cancellation point the contract promises. Once a request is issued
//! there is no abort: superseded responses are recognized by generation and
//! dropped by the session task.

use std::time::Duration;

use auspex_oracle::{Language, VerifyLanguage};
use tokio::time::Instant;

use crate::state::Generation;

/// What recording an edit did to the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EditOutcome {
	/// The pair equals the last issued snapshot; nothing was (re)armed and
	/// any pending deadline is left alone.
	Unchanged,
	/// The deadline was (re)armed for a fresh verification cycle.
	Scheduled,
}

/// A verification attempt handed to the oracle.
#[derive(Debug)]
pub(crate) struct IssuedVerification {
	pub generation: Generation,
	pub request: VerifyLanguage,
}

#[derive(Debug, Default)]
pub(crate) struct VerifyScheduler {
	deadline: Option<Instant>,
	last_issued: Option<(String, Language)>,
	generation: Generation,
}

impl VerifyScheduler {
	pub fn new() -> Self {
		Self::default()
	}

	/// Deadline of the pending cycle, if one is armed.
	pub fn deadline(&self) -> Option<Instant> {
		self.deadline
	}

	pub fn has_pending(&self) -> bool {
		self.deadline.is_some()
	}

	/// Records a non-empty edit, re-arming the deadline unless the pair is
	/// exactly what was last issued.
	pub fn on_edit(
		&mut self,
		text: &str,
		language: Language,
		now: Instant,
		delay: Duration,
	) -> EditOutcome {
		if self
			.last_issued
			.as_ref()
			.is_some_and(|(t, l)| t == text && *l == language)
		{
			return EditOutcome::Unchanged;
		}
		self.deadline = Some(now + delay);
		EditOutcome::Scheduled
	}

	/// Cancels any pending cycle and forgets the issued snapshot.
	///
	/// The generation is bumped even though nothing is issued: an in-flight
	/// response must never apply once the snippet has been wiped, and a
	/// later retype of the identical snippet must re-verify rather than be
	/// deduped against a snapshot that no longer describes the state.
	pub fn reset(&mut self) {
		self.deadline = None;
		self.last_issued = None;
		self.generation = self.generation.next();
	}

	/// Issues a verification attempt for the current pair.
	pub fn fire(&mut self, text: String, language: Language) -> IssuedVerification {
		self.deadline = None;
		self.generation = self.generation.next();
		self.last_issued = Some((text.clone(), language));
		IssuedVerification {
			generation: self.generation,
			request: VerifyLanguage {
				code: text,
				expected_language: language,
			},
		}
	}

	/// Whether a response for `generation` is still the newest attempt.
	pub fn is_current(&self, generation: Generation) -> bool {
		generation == self.generation
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const DELAY: Duration = Duration::from_millis(1000);

	#[test]
	fn edit_arms_deadline_after_delay() {
		let mut sched = VerifyScheduler::new();
		let now = Instant::now();
		let outcome = sched.on_edit("print(1)", Language::Python, now, DELAY);
		assert_eq!(outcome, EditOutcome::Scheduled);
		assert_eq!(sched.deadline(), Some(now + DELAY));
	}

	#[test]
	fn rapid_edits_keep_only_the_newest_deadline() {
		let mut sched = VerifyScheduler::new();
		let t0 = Instant::now();
		sched.on_edit("a", Language::Python, t0, DELAY);
		let t1 = t0 + Duration::from_millis(300);
		sched.on_edit("ab", Language::Python, t1, DELAY);
		assert_eq!(sched.deadline(), Some(t1 + DELAY));
	}

	#[test]
	fn edit_equal_to_last_issued_changes_nothing() {
		let mut sched = VerifyScheduler::new();
		let now = Instant::now();
		sched.on_edit("a", Language::Python, now, DELAY);
		let issued = sched.fire("a".to_string(), Language::Python);
		assert!(sched.is_current(issued.generation));
		assert!(!sched.has_pending());

		let outcome = sched.on_edit("a", Language::Python, now + DELAY, DELAY);
		assert_eq!(outcome, EditOutcome::Unchanged);
		assert!(!sched.has_pending());

		// Same text under a different language is a real change.
		let outcome = sched.on_edit("a", Language::Java, now + DELAY, DELAY);
		assert_eq!(outcome, EditOutcome::Scheduled);
	}

	#[test]
	fn fire_supersedes_older_generations() {
		let mut sched = VerifyScheduler::new();
		let g1 = sched.fire("a".to_string(), Language::Python).generation;
		let g2 = sched.fire("b".to_string(), Language::Python).generation;
		assert!(sched.is_current(g2));
		assert!(!sched.is_current(g1));
		assert!(g1 < g2);
	}

	#[test]
	fn reset_invalidates_in_flight_generation_and_dedupe() {
		let mut sched = VerifyScheduler::new();
		let now = Instant::now();
		let issued = sched.fire("a".to_string(), Language::Python);
		sched.reset();
		assert!(!sched.is_current(issued.generation));
		assert!(!sched.has_pending());

		// Retyping the identical snippet must verify again.
		let outcome = sched.on_edit("a", Language::Python, now, DELAY);
		assert_eq!(outcome, EditOutcome::Scheduled);
	}

	#[test]
	fn fire_snapshots_the_request_pair() {
		let mut sched = VerifyScheduler::new();
		let issued = sched.fire("console.log('hi')".to_string(), Language::Javascript);
		assert_eq!(issued.request.code, "console.log('hi')");
		assert_eq!(issued.request.expected_language, Language::Javascript);
	}
}
