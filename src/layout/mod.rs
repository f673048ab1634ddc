//! Layout Module - line packing and arrangement.
//!
//! # Architecture
//!
//! A layout pass runs leaf-first through four pieces:
//!
//! 1. [`FlexLine`] accumulates items while they fit the main-axis space
//! 2. [`pack`] drives lines across the whole child set, honoring
//!    `max_lines` / `max_items_in_each_line`
//! 3. [`arrange`] resolves main-axis offsets inside each line, cross-axis
//!    offsets between lines, and item alignment inside a line
//! 4. [`compute_flow_layout`] maps axis offsets to x/y for the direction
//!
//! Every step is a pure function of its inputs. Animation lives in
//! [`crate::state`].
//!
//! # Example
//!
//! ```
//! use spark_flow::layout::{compute_flow_layout, Arrangement, FlowConfig};
//! use spark_flow::{Constraints, ItemKey, MeasuredItem};
//!
//! let config = FlowConfig::row().horizontal_arrangement(Arrangement::spaced_by(8));
//! let items = (0..5u64).map(|i| MeasuredItem::new(i, 30, 10));
//! let layout = compute_flow_layout(items, &config, &Constraints::with_max_width(110));
//!
//! assert_eq!(layout.line_count(), 2);
//! assert_eq!(layout.offset(ItemKey(3)).map(|o| o.y), Some(10));
//! ```

mod arrange;
mod flow;
mod line;
mod packer;
mod taffy_bridge;

pub use arrange::*;
pub use flow::*;
pub use line::*;
pub use packer::*;
pub use taffy_bridge::compute_taffy_layout;
