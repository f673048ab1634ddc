//! Layout Derived - reactive flow layout.
//!
//! Creates a Derived that recomputes the flow layout whenever:
//! - The measured item list changes
//! - The container constraints change
//!
//! The layout pass is pure, so the derived only re-runs when one of its
//! signals actually changed.

use spark_signals::{derived, Derived, Signal};

use crate::layout::{compute_flow_layout, FlowConfig, LayoutResult};
use crate::types::{Constraints, MeasuredItem};

/// Create the flow layout derived.
///
/// `config` is fixed for the lifetime of the derived. Build a new one to
/// change it.
pub fn create_flow_layout_derived(
    items: Signal<Vec<MeasuredItem>>,
    constraints: Signal<Constraints>,
    config: FlowConfig,
) -> Derived<LayoutResult> {
    derived(move || {
        // Reading both signals creates the reactive dependencies
        let items = items.get();
        let constraints = constraints.get();

        compute_flow_layout(items, &config, &constraints)
    })
}

// =============================================================================
// Tests
// =============================================================================
