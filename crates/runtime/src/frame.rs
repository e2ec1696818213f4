/// Frame metadata for one tick of the render loop.
///
/// Timestamps come from the host's frame callback (milliseconds, monotonic).
/// Animations driven off `index` are frame-rate dependent; use `time_ms` for
/// anything that must track wall time.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Frame {
    /// 0-based frame index.
    pub index: u64,
    /// Host timestamp at the start of the frame (milliseconds).
    pub time_ms: f64,
    /// Time since the previous frame (milliseconds, never negative).
    pub dt_ms: f64,
}

impl Frame {
    pub fn first(time_ms: f64) -> Self {
        Self {
            index: 0,
            time_ms,
            dt_ms: 0.0,
        }
    }

    pub fn next(self, time_ms: f64) -> Self {
        Self {
            index: self.index + 1,
            time_ms,
            dt_ms: (time_ms - self.time_ms).max(0.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Frame;

    #[test]
    fn next_advances_index_and_time() {
        let f0 = Frame::first(1000.0);
        let f1 = f0.next(1016.5);
        assert_eq!(f1.index, 1);
        assert_eq!(f1.time_ms, 1016.5);
        assert_eq!(f1.dt_ms, 16.5);
    }

    #[test]
    fn dt_never_negative() {
        let f = Frame::first(50.0).next(40.0);
        assert_eq!(f.dt_ms, 0.0);
    }
}
