//! Notification sink boundary.
//!
//! The session core emits typed notices for user-visible events and never
//! reads notification state back. Frontends own presentation; tests drain
//! a [`QueueSink`].

use std::collections::VecDeque;
use std::sync::Mutex;

/// Severity level for notices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Level {
	/// Informational message (default).
	#[default]
	Info,
	/// Success message.
	Success,
	/// Error message.
	Error,
}

/// A user-visible notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
	/// Severity level.
	pub level: Level,
	/// Short heading.
	pub title: String,
	/// Body text.
	pub message: String,
}

impl Notice {
	/// Creates a notice.
	pub fn new(level: Level, title: impl Into<String>, message: impl Into<String>) -> Self {
		Self {
			level,
			title: title.into(),
			message: message.into(),
		}
	}
}

/// Consumer of session notices.
///
/// Implementations must tolerate being called from the session task at any
/// point between state mutations; they must not call back into the session.
pub trait NotifySink: Send + Sync {
	/// Delivers one notice.
	fn notify(&self, notice: Notice);
}

/// Queueing sink: holds notices until a frontend drains them.
#[derive(Debug, Default)]
pub struct QueueSink {
	pending: Mutex<VecDeque<Notice>>,
}

impl QueueSink {
	/// Creates an empty queue sink.
	pub fn new() -> Self {
		Self::default()
	}

	/// Drains all queued notices in delivery order.
	pub fn take_pending(&self) -> Vec<Notice> {
		let mut pending = self.pending.lock().expect("notice queue poisoned");
		pending.drain(..).collect()
	}

	/// Returns true if no notices are queued.
	pub fn is_empty(&self) -> bool {
		self.pending.lock().expect("notice queue poisoned").is_empty()
	}
}

impl NotifySink for QueueSink {
	fn notify(&self, notice: Notice) {
		let mut pending = self.pending.lock().expect("notice queue poisoned");
		pending.push_back(notice);
	}
}

/// Sink that forwards notices to `tracing` events.
#[derive(Debug, Default)]
pub struct TracingSink;

impl NotifySink for TracingSink {
	fn notify(&self, notice: Notice) {
		match notice.level {
			Level::Error => tracing::warn!(title = %notice.title, "{}", notice.message),
			Level::Info | Level::Success => {
				tracing::info!(title = %notice.title, "{}", notice.message)
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn queue_sink_drains_in_delivery_order() {
		let sink = QueueSink::new();
		sink.notify(Notice::new(Level::Info, "first", "a"));
		sink.notify(Notice::new(Level::Error, "second", "b"));

		let drained = sink.take_pending();
		assert_eq!(drained.len(), 2);
		assert_eq!(drained[0].title, "first");
		assert_eq!(drained[1].title, "second");
		assert!(sink.is_empty());
	}
}
