//! Session runtime.
//!
//! One tokio task owns the [`SessionState`] and serializes every mutation:
//! commands from [`SessionHandle`]s, oracle completions, and the debounce
//! deadline all arrive through a single `select!` loop and run to
//! completion one at a time. Suspension happens only at the oracle-call
//! boundary, inside spawned tasks that post their outcome back over a
//! channel; that window is what the staleness guards exist for.
//!
//! # Staleness
//!
//! Verification responses are gated by [`Generation`]: only the newest
//! issued attempt may settle the gate. Analysis responses are gated by
//! [`EditEpoch`]: a result computed for an edited-away snippet is dropped
//! silently (its loading flag still clears). Neither path aborts the
//! in-flight request; discarding the response is the whole mechanism.

use std::sync::Arc;

use auspex_oracle::{AnalyzeCode, FixCode, Language, LanguageVerdict, Oracle, OracleError};
use thiserror::Error;
use tokio::sync::{mpsc, watch};
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::debounce::{EditOutcome, VerifyScheduler};
use crate::dispatch;
use crate::notices;
use crate::notify::NotifySink;
use crate::policy::SessionPolicy;
use crate::state::{AnalysisKind, AnalysisPayload, EditEpoch, Generation, SessionState};

/// The session task has shut down; no further commands can be delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("session task has shut down")]
pub struct SessionClosed;

enum Command {
	SetText(String),
	SetLanguage(Language),
	SetErrorMessage(String),
	Trigger(AnalysisKind),
}

enum Event {
	VerifyDone {
		generation: Generation,
		outcome: Result<LanguageVerdict, OracleError>,
	},
	AnalysisDone {
		kind: AnalysisKind,
		epoch: EditEpoch,
		outcome: Result<AnalysisPayload, OracleError>,
	},
}

/// Cheap, cloneable handle to a running session.
///
/// Commands are fire-and-forget; observed state arrives through the watch
/// channel, which re-publishes after every mutation. The session task ends
/// when the last handle is dropped.
#[derive(Debug, Clone)]
pub struct SessionHandle {
	commands: mpsc::UnboundedSender<Command>,
	state: watch::Receiver<SessionState>,
}

impl SessionHandle {
	/// Replaces the snippet text.
	pub fn set_text(&self, text: impl Into<String>) -> Result<(), SessionClosed> {
		self.send(Command::SetText(text.into()))
	}

	/// Changes the declared language.
	pub fn set_language(&self, language: Language) -> Result<(), SessionClosed> {
		self.send(Command::SetLanguage(language))
	}

	/// Replaces the error message accompanying the snippet.
	pub fn set_error_message(&self, message: impl Into<String>) -> Result<(), SessionClosed> {
		self.send(Command::SetErrorMessage(message.into()))
	}

	/// Requests an analysis of the given kind.
	pub fn trigger(&self, kind: AnalysisKind) -> Result<(), SessionClosed> {
		self.send(Command::Trigger(kind))
	}

	/// Snapshot of the current state.
	pub fn state(&self) -> SessionState {
		self.state.borrow().clone()
	}

	/// Watch receiver for awaiting state changes.
	pub fn watch_state(&self) -> watch::Receiver<SessionState> {
		self.state.clone()
	}

	fn send(&self, command: Command) -> Result<(), SessionClosed> {
		self.commands.send(command).map_err(|_| SessionClosed)
	}
}

/// Spawns a session task onto the current tokio runtime.
pub fn spawn(
	oracle: Arc<dyn Oracle>,
	sink: Arc<dyn NotifySink>,
	policy: SessionPolicy,
	language: Language,
) -> SessionHandle {
	let (command_tx, command_rx) = mpsc::unbounded_channel();
	let (event_tx, event_rx) = mpsc::unbounded_channel();
	let state = SessionState::new(language);
	let (watch_tx, watch_rx) = watch::channel(state.clone());

	let actor = SessionActor {
		state,
		policy,
		oracle,
		sink,
		scheduler: VerifyScheduler::new(),
		commands: command_rx,
		events: event_rx,
		event_tx,
		watch: watch_tx,
	};
	tokio::spawn(actor.run());

	SessionHandle {
		commands: command_tx,
		state: watch_rx,
	}
}

struct SessionActor {
	state: SessionState,
	policy: SessionPolicy,
	oracle: Arc<dyn Oracle>,
	sink: Arc<dyn NotifySink>,
	scheduler: VerifyScheduler,
	commands: mpsc::UnboundedReceiver<Command>,
	events: mpsc::UnboundedReceiver<Event>,
	/// Cloned into spawned oracle calls; keeps `events` open for the
	/// lifetime of the actor.
	event_tx: mpsc::UnboundedSender<Event>,
	watch: watch::Sender<SessionState>,
}

impl SessionActor {
	async fn run(mut self) {
		loop {
			let deadline = self.scheduler.deadline();
			tokio::select! {
				biased;
				command = self.commands.recv() => match command {
					Some(command) => self.handle_command(command),
					// Last handle dropped: the session is over.
					None => break,
				},
				Some(event) = self.events.recv() => self.handle_event(event),
				() = wait_until(deadline), if deadline.is_some() => self.fire_verification(),
			}
		}
	}

	fn handle_command(&mut self, command: Command) {
		match command {
			Command::SetText(text) => {
				if text == self.state.text {
					return;
				}
				self.state.text = text;
				self.after_edit();
			}
			Command::SetLanguage(language) => {
				if language == self.state.language {
					return;
				}
				self.state.language = language;
				self.after_edit();
			}
			Command::SetErrorMessage(message) => {
				if message == self.state.error_message {
					return;
				}
				// Gates fix suggestions only: no invalidation, no reverify.
				self.state.error_message = message;
				self.publish();
			}
			Command::Trigger(kind) => self.trigger(kind),
		}
	}

	fn handle_event(&mut self, event: Event) {
		match event {
			Event::VerifyDone { generation, outcome } => {
				self.settle_verification(generation, outcome);
			}
			Event::AnalysisDone { kind, epoch, outcome } => {
				self.settle_analysis(kind, epoch, outcome);
			}
		}
	}

	/// Shared tail of every accepted text/language edit.
	fn after_edit(&mut self) {
		if self.state.is_empty() {
			self.state.invalidate_results();
			self.state.bump_epoch();
			self.scheduler.reset();
			self.state.reset_verification();
			self.publish();
			return;
		}

		let now = Instant::now();
		match self.scheduler.on_edit(
			&self.state.text,
			self.state.language,
			now,
			self.policy.verify_debounce,
		) {
			// Reverted to exactly what was last verified: results were
			// already cleared by the intervening edit, nothing to redo.
			EditOutcome::Unchanged => {}
			EditOutcome::Scheduled => {
				self.state.invalidate_results();
				self.state.bump_epoch();
			}
		}
		self.publish();
	}

	fn fire_verification(&mut self) {
		let issued = self
			.scheduler
			.fire(self.state.text.clone(), self.state.language);
		self.state.begin_verifying();
		debug!(
			generation = issued.generation.get(),
			language = %issued.request.expected_language,
			"verification issued"
		);

		let oracle = Arc::clone(&self.oracle);
		let events = self.event_tx.clone();
		let timeout = self.policy.call_timeout;
		let generation = issued.generation;
		let request = issued.request;
		tokio::spawn(async move {
			let outcome = match tokio::time::timeout(timeout, oracle.verify_language(request)).await
			{
				Ok(outcome) => outcome,
				Err(_) => Err(OracleError::Timeout),
			};
			let _ = events.send(Event::VerifyDone { generation, outcome });
		});
		self.publish();
	}

	fn settle_verification(
		&mut self,
		generation: Generation,
		outcome: Result<LanguageVerdict, OracleError>,
	) {
		if !self.scheduler.is_current(generation) {
			debug!(
				generation = generation.get(),
				"discarding superseded verification response"
			);
			return;
		}

		let was_mismatch = self.state.settled_mismatch;
		match outcome {
			Ok(verdict) => {
				self.state.apply_verdict(&verdict);
				if verdict.is_match {
					if was_mismatch {
						self.sink
							.notify(notices::language_recovered(self.state.language));
					}
				} else if !was_mismatch {
					self.sink
						.notify(notices::language_mismatch(&verdict, self.state.language));
				}
			}
			Err(err) => {
				warn!(error = %err, "language verification failed");
				self.state.fail_verification();
				self.sink.notify(notices::verification_failed(&err));
			}
		}
		self.publish();
	}

	fn trigger(&mut self, kind: AnalysisKind) {
		if let Some(block) = dispatch::check(&self.state, &self.policy, kind) {
			debug!(kind = %kind, reason = ?block, "analysis trigger refused");
			self.sink.notify(notices::blocked(kind, block));
			return;
		}

		self.state.set_loading(kind, true);
		let epoch = self.state.epoch;
		let oracle = Arc::clone(&self.oracle);
		let events = self.event_tx.clone();
		let timeout = self.policy.call_timeout;
		let code = self.state.text.clone();
		let language = self.state.language;
		let error_message = self.state.error_message.clone();
		tokio::spawn(async move {
			let call = async {
				match kind {
					AnalysisKind::Complexity => oracle
						.complexity(AnalyzeCode { code, language })
						.await
						.map(AnalysisPayload::Complexity),
					AnalysisKind::BestPractices => oracle
						.best_practices(AnalyzeCode { code, language })
						.await
						.map(|reply| AnalysisPayload::BestPractices(reply.suggestions)),
					AnalysisKind::FixSuggestions => oracle
						.code_fixes(FixCode {
							code,
							language,
							error_message,
						})
						.await
						.map(|reply| AnalysisPayload::Fixes(reply.suggestions)),
				}
			};
			let outcome = match tokio::time::timeout(timeout, call).await {
				Ok(outcome) => outcome,
				Err(_) => Err(OracleError::Timeout),
			};
			let _ = events.send(Event::AnalysisDone { kind, epoch, outcome });
		});
		self.publish();
	}

	fn settle_analysis(
		&mut self,
		kind: AnalysisKind,
		epoch: EditEpoch,
		outcome: Result<AnalysisPayload, OracleError>,
	) {
		// Guaranteed cleanup: runs on success, failure, and stale-discard.
		self.state.set_loading(kind, false);

		if epoch != self.state.epoch {
			debug!(kind = %kind, "discarding analysis response for an edited snippet");
			self.publish();
			return;
		}

		match outcome {
			Ok(payload) => {
				self.state.store(payload);
				self.state.active_view = kind.view();
				self.sink.notify(notices::analysis_ready(kind));
			}
			Err(err) => {
				// Fail-soft: prior result stays; only an edit clears it.
				warn!(kind = %kind, error = %err, "analysis request failed");
				self.sink.notify(notices::analysis_failed(kind, &err));
			}
		}
		self.publish();
	}

	fn publish(&self) {
		self.watch.send_replace(self.state.clone());
	}
}

async fn wait_until(deadline: Option<Instant>) {
	match deadline {
		Some(deadline) => tokio::time::sleep_until(deadline).await,
		None => std::future::pending().await,
	}
}
