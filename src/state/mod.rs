//! State Module - animation state that survives across layout passes.
//!
//! - **Evaluator** - offset interpolation for a given progress fraction
//! - **Animate** - animation specs (spring, tween, snap) and strategies
//! - **Reflow** - per-identity target tracking and in-flight animations

mod animate;
mod evaluator;
mod reflow;

pub use animate::*;
pub use evaluator::*;
pub use reflow::*;
