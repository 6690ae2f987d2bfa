//! Asynchronous orchestration core for AI-backed snippet analysis.
//!
//! A session lets a user edit a code snippet, declare its language, and
//! request on-demand analyses (complexity, best practices, fix
//! suggestions) from a remote oracle. The declared language is verified
//! against the snippet continuously in the background; analyses are gated
//! on the outcome. This crate owns the temporal hazards of that design:
//!
//! * debounced verification: edits re-arm a quiet-period timer; at most
//!   one deadline is ever pending
//! * stale-response discarding: a generation counter for verification, an
//!   edit epoch for analyses; late completions are dropped, never applied
//! * the mismatch gate: one enum ([`VerifyStatus`]), not a pile of
//!   booleans, deciding whether analysis may run
//! * result invalidation: any accepted edit clears stored results before
//!   a new verification cycle can start
//!
//! All state lives in one [`SessionState`] owned by a single tokio task
//! (see [`spawn`]); commands, oracle completions, and timer fires are
//! serialized through its event loop, so every mutation is atomic with
//! respect to the others. Frontends read state through a watch channel and
//! receive user-facing [`Notice`]s through a [`NotifySink`].

pub use auspex_oracle as oracle;

mod debounce;
mod dispatch;
mod notices;
mod notify;
mod policy;
mod session;
mod state;

pub use notify::{Level, Notice, NotifySink, QueueSink, TracingSink};
pub use policy::{CALL_TIMEOUT, SessionPolicy, VERIFY_DEBOUNCE};
pub use session::{SessionClosed, SessionHandle, spawn};
pub use state::{
	ActiveView, AnalysisKind, ComplexitySlot, EditEpoch, Generation, SessionState, SuggestionSlot,
	VerificationRecord, VerifyStatus,
};
