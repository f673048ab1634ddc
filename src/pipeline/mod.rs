//! Flow Pipeline
//!
//! Connects the pure layout pass to a host framework.
//!
//! # Pipeline Architecture
//!
//! ```text
//! children → FlowChild::measure → compute_flow_layout → ReflowAnimator → FlowChild::place
//! ```
//!
//! ## Entry points
//!
//! 1. **FlowLayout** - stateful session: measure, lay out, animate, place, tick
//! 2. **create_flow_layout_derived** - reactive `Derived<LayoutResult>` over item and
//!    constraint signals, for hosts built on spark-signals

pub mod flow_layout;
pub mod layout_derived;

pub use flow_layout::{FlowChild, FlowLayout};
pub use layout_derived::create_flow_layout_derived;
