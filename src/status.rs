use std::borrow::Cow;
use std::sync::{Arc, Mutex};

/// Most recent operator-facing problem, posted from any thread (including
/// the audio callbacks) and picked up by the render loop for the footer.
#[derive(Debug, Clone, Default)]
pub struct StatusBoard {
    latest: Arc<Mutex<Option<Cow<'static, str>>>>,
}

impl StatusBoard {
    /// Never blocks; a post that collides with the reader is skipped.
    pub fn post(&self, message: impl Into<Cow<'static, str>>) {
        if let Ok(mut slot) = self.latest.try_lock() {
            *slot = Some(message.into());
        }
    }

    /// The message posted since the last call, if any.
    pub fn take(&self) -> Option<String> {
        let mut slot = self.latest.lock().ok()?;
        slot.take().map(Cow::into_owned)
    }
}
