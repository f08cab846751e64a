//! Pause/resume guard around frame processing

use parking_lot::Mutex;

/// Lifecycle state of the host tracking session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Running,
    Paused,
}

/// One coarse lock shared by the render loop and the lifecycle callbacks.
///
/// The render loop runs each frame through [`FrameGate::with_frame`];
/// `pause` cannot return while a frame is in flight, and no frame starts
/// once the session is paused.
#[derive(Debug)]
pub struct FrameGate {
    state: Mutex<SessionState>,
}

impl FrameGate {
    /// Sessions start paused until the host resumes them
    pub fn new() -> Self {
        Self {
            state: Mutex::new(SessionState::Paused),
        }
    }

    pub fn pause(&self) {
        *self.state.lock() = SessionState::Paused;
        log::debug!("session paused");
    }

    /// Run `configure` under the lock, then mark the session running
    pub fn resume_with<F: FnOnce()>(&self, configure: F) {
        let mut state = self.state.lock();
        configure();
        *state = SessionState::Running;
        log::debug!("session resumed");
    }

    pub fn resume(&self) {
        self.resume_with(|| {});
    }

    pub fn state(&self) -> SessionState {
        *self.state.lock()
    }

    /// Run `frame` while holding the lock; `None` if the session is paused
    pub fn with_frame<R, F: FnOnce() -> R>(&self, frame: F) -> Option<R> {
        let state = self.state.lock();
        match *state {
            SessionState::Running => Some(frame()),
            SessionState::Paused => None,
        }
    }
}

impl Default for FrameGate {
    fn default() -> Self {
        Self::new()
    }
}
