/// Severity of a user-facing notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Success,
    Warning,
    Error,
}

/// A message for the rider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: Level,
    pub text: String,
}

impl Notice {
    #[must_use]
    pub fn new(level: Level, text: impl Into<String>) -> Self {
        Self {
            level,
            text: text.into(),
        }
    }
}

/// Consumer-provided message and loading surface.
///
/// Both calls are fire-and-forget; implementations must not block.
pub trait Feedback: Send + Sync + 'static {
    fn notify(&self, notice: Notice);

    fn set_loading(&self, active: bool);
}

/// Feedback that only logs. Useful for headless hosts.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingFeedback;

impl Feedback for TracingFeedback {
    fn notify(&self, notice: Notice) {
        match notice.level {
            Level::Info | Level::Success => tracing::info!(text = %notice.text, "Notice"),
            Level::Warning => tracing::warn!(text = %notice.text, "Notice"),
            Level::Error => tracing::error!(text = %notice.text, "Notice"),
        }
    }

    fn set_loading(&self, active: bool) {
        tracing::trace!(active, "Loading");
    }
}

/// Raises the loading indicator on creation and drops it exactly once.
pub(super) struct LoadingGuard<'a, F: Feedback> {
    feedback: &'a F,
}

impl<'a, F: Feedback> LoadingGuard<'a, F> {
    pub(super) fn start(feedback: &'a F) -> Self {
        feedback.set_loading(true);
        Self { feedback }
    }
}

impl<F: Feedback> Drop for LoadingGuard<'_, F> {
    fn drop(&mut self) {
        self.feedback.set_loading(false);
    }
}
