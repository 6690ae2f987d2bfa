use std::time::Duration;

/// Quiet period between the last edit and the verification call.
pub const VERIFY_DEBOUNCE: Duration = Duration::from_millis(1000);

/// Deadline applied to every oracle call.
///
/// The source behavior left calls unbounded; a bounded timeout keeps
/// `Verifying` and the loading flags from sticking when the oracle wedges.
pub const CALL_TIMEOUT: Duration = Duration::from_secs(15);

/// Tunable knobs for a session.
#[derive(Debug, Clone, Copy)]
pub struct SessionPolicy {
	/// Debounce window for background language verification.
	pub verify_debounce: Duration,
	/// Per-call oracle deadline; expiry is reported as an oracle failure.
	pub call_timeout: Duration,
	/// Whether analysis triggers are also refused while verification is in
	/// flight (not just after a mismatch).
	pub block_while_verifying: bool,
}

impl Default for SessionPolicy {
	fn default() -> Self {
		Self {
			verify_debounce: VERIFY_DEBOUNCE,
			call_timeout: CALL_TIMEOUT,
			block_while_verifying: true,
		}
	}
}
