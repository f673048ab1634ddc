//! # spark-flow
//!
//! Flexbox-style flow layout with animated reflow.
//!
//! Built on [spark-signals](https://github.com/RLabs-Inc/spark-signals) for
//! reactive host integration and [taffy](https://github.com/DioxusLabs/taffy)
//! for geometry types.
//!
//! ## Architecture
//!
//! Children are measured, packed greedily into lines that wrap when the
//! main-axis space runs out, and arranged inside and between lines. When a
//! pass moves an item, the reflow animator carries it from where it is drawn
//! to its new target over time instead of jumping.
//!
//! ```text
//! measure → pack → arrange → ReflowAnimator → place
//!                                 ▲
//!                        tick(dt) ┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Core types (offsets, sizes, constraints, direction, flags)
//! - [`layout`] - Line packing, arrangement and the full layout pass
//! - [`state`] - Animation specs, position evaluators and the reflow animator
//! - [`pipeline`] - Host glue: the `FlowLayout` session and the reactive derived
//! - [`error`] - Configuration errors

pub mod error;
pub mod layout;
pub mod pipeline;
pub mod state;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use error::LayoutError;

pub use layout::{
    compute_flow_layout, compute_taffy_layout, pack, Alignment, Arrangement, CrossAlignment,
    FlexLine, FlowConfig, ItemPlacement, LayoutResult, PackOptions,
};

pub use state::{
    AnimationProgress, AnimationSpec, DefaultFlowAnimation, Easing, FlowAnimation,
    IntOffsetEvaluator, PositionEvaluator, ReflowAnimator, SpringSpec, TweenFlowAnimation,
    TweenSpec,
};

pub use pipeline::{create_flow_layout_derived, FlowChild, FlowLayout};
