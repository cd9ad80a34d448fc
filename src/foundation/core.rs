use crate::foundation::error::{KeywarpError, KeywarpResult};

pub use kurbo::{Point, Rect};

/// Inclusive frame range of a transition on its hosting timeline.
///
/// `in_point` and `out_point` are both part of the range, so a one-frame
/// transition has `in_point == out_point`. Keyframe positions and per-frame
/// animation are normalized against this span.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FrameSpan {
    /// First frame of the transition (inclusive).
    pub in_point: i32,
    /// Last frame of the transition (inclusive).
    pub out_point: i32,
}

impl FrameSpan {
    /// Build a span, rejecting negative or inverted ranges.
    pub fn new(in_point: i32, out_point: i32) -> KeywarpResult<Self> {
        if in_point < 0 {
            return Err(KeywarpError::validation("FrameSpan in_point must be >= 0"));
        }
        if out_point < in_point {
            return Err(KeywarpError::validation(
                "FrameSpan out_point must be >= in_point",
            ));
        }
        Ok(Self {
            in_point,
            out_point,
        })
    }

    /// Number of frames covered, inclusive of both endpoints.
    pub fn duration(self) -> i32 {
        self.out_point - self.in_point + 1
    }

    /// Normalized progress of `position` through the span, in `[0, 1)` while
    /// the position is inside the range.
    pub fn progress(self, position: i32) -> f32 {
        (position - self.in_point) as f32 / self.duration() as f32
    }

    /// Frames elapsed since `in_point`, used to scale animated parameters.
    pub fn elapsed(self, position: i32) -> f64 {
        f64::from(position - self.in_point)
    }
}
