use crate::cancel::CancelToken;
use crate::frame::Frame;

/// Drives an unbounded sequence of frames until its token is cancelled.
///
/// The host calls [`FrameLoop::tick`] from its frame callback and stops
/// rescheduling as soon as it returns `None`.
#[derive(Debug, Default)]
pub struct FrameLoop {
    last: Option<Frame>,
    token: CancelToken,
}

impl FrameLoop {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn token(&self) -> CancelToken {
        self.token.clone()
    }

    pub fn is_running(&self) -> bool {
        !self.token.is_cancelled()
    }

    pub fn last_frame(&self) -> Option<Frame> {
        self.last
    }

    pub fn tick(&mut self, time_ms: f64) -> Option<Frame> {
        if self.token.is_cancelled() {
            return None;
        }
        let frame = match self.last {
            Some(prev) => prev.next(time_ms),
            None => Frame::first(time_ms),
        };
        self.last = Some(frame);
        Some(frame)
    }
}
