//! Position evaluators - interpolation between two integer offsets.

use crate::types::{int_offset, IntOffset};

/// Interpolates between a start and an end offset.
///
/// `fraction` is the animation progress: 0 at `start`, 1 at `end`. Spring
/// progressions may briefly step outside that range.
pub trait PositionEvaluator {
    fn evaluate(&self, fraction: f32, start: IntOffset, end: IntOffset) -> IntOffset;
}

/// Linear blend of x and y independently, truncated toward zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IntOffsetEvaluator;

impl PositionEvaluator for IntOffsetEvaluator {
    fn evaluate(&self, fraction: f32, start: IntOffset, end: IntOffset) -> IntOffset {
        int_offset(
            lerp_truncated(fraction, start.x, end.x),
            lerp_truncated(fraction, start.y, end.y),
        )
    }
}

/// Any `Fn(fraction, start, end)` is an evaluator.
impl<F> PositionEvaluator for F
where
    F: Fn(f32, IntOffset, IntOffset) -> IntOffset,
{
    fn evaluate(&self, fraction: f32, start: IntOffset, end: IntOffset) -> IntOffset {
        self(fraction, start, end)
    }
}

#[inline]
fn lerp_truncated(fraction: f32, start: i32, end: i32) -> i32 {
    (start as f32 + fraction * (end as f32 - start as f32)) as i32
}
