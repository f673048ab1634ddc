//! Flow Layout - a stateful layout session for one container.
//!
//! Ties the pure layout pass to the reflow animator and to the host's
//! children:
//!
//! ```text
//! FlowChild::measure → compute_flow_layout → ReflowAnimator::apply → FlowChild::place
//!                                                 ▲
//!                               tick(dt) ─────────┘ (advance + re-place)
//! ```
//!
//! Children are measured lazily: once `max_lines` is reached the remaining
//! children are neither measured nor placed.

use std::time::Duration;

use crate::error::LayoutError;
use crate::layout::{compute_flow_layout, FlowConfig, LayoutResult};
use crate::state::{DefaultFlowAnimation, FlowAnimation, ReflowAnimator};
use crate::types::{Constraints, IntOffset, IntSize, ItemKey, MeasuredItem, ReflowFlags};

/// A child as the host framework exposes it.
pub trait FlowChild {
    /// Stable identity across passes.
    fn key(&self) -> ItemKey;

    /// Measure under `constraints` and return the resulting width/height.
    fn measure(&mut self, constraints: &Constraints) -> IntSize;

    /// Position the child relative to the container origin.
    fn place(&mut self, offset: IntOffset);
}

/// Layout state owned by one flow container.
pub struct FlowLayout {
    config: FlowConfig,
    animator: ReflowAnimator,
    last: LayoutResult,
}

impl FlowLayout {
    /// Session with the default spring animation.
    pub fn new(config: FlowConfig) -> Result<Self, LayoutError> {
        Self::with_animation(config, Some(Box::new(DefaultFlowAnimation::default())))
    }

    /// Session with a custom animation, or none for instantaneous moves.
    pub fn with_animation(
        config: FlowConfig,
        animation: Option<Box<dyn FlowAnimation>>,
    ) -> Result<Self, LayoutError> {
        config.validate()?;
        Ok(Self {
            config,
            animator: ReflowAnimator::with_animation(animation),
            last: LayoutResult::default(),
        })
    }

    pub fn config(&self) -> &FlowConfig {
        &self.config
    }

    /// Replace the configuration. Takes effect on the next [`layout`](Self::layout).
    pub fn set_config(&mut self, config: FlowConfig) -> Result<(), LayoutError> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    pub fn animator(&self) -> &ReflowAnimator {
        &self.animator
    }

    /// Result of the most recent pass.
    pub fn last_layout(&self) -> &LayoutResult {
        &self.last
    }

    /// Container size from the most recent pass.
    pub fn size(&self) -> IntSize {
        self.last.size
    }

    /// Run a full pass: measure, pack, arrange, animate and place.
    pub fn layout<C: FlowChild>(
        &mut self,
        children: &mut [C],
        constraints: &Constraints,
    ) -> Result<ReflowFlags, LayoutError> {
        constraints.validate()?;

        let direction = self.config.direction;
        let child_constraints = Constraints::loose(constraints.max_width, constraints.max_height);
        let measured = children.iter_mut().map(|child| {
            let size = child.measure(&child_constraints);
            MeasuredItem::from_size(child.key(), size, direction)
        });

        let layout = compute_flow_layout(measured, &self.config, constraints);
        let flags = self.animator.apply(&layout);
        self.last = layout;
        self.place(children);
        Ok(flags)
    }

    /// Advance animations by `dt` and re-place the children.
    ///
    /// Returns true while anything is still moving.
    pub fn tick<C: FlowChild>(&mut self, dt: Duration, children: &mut [C]) -> bool {
        let running = self.animator.advance(dt);
        self.place(children);
        running
    }

    /// Offset currently rendered for `key`.
    pub fn rendered_offset(&self, key: ItemKey) -> Option<IntOffset> {
        self.animator.rendered_offset(key)
    }

    /// Drop all animation state; the next pass places everything directly.
    pub fn reset(&mut self) {
        self.animator.reset();
        self.last = LayoutResult::default();
    }

    fn place<C: FlowChild>(&self, children: &mut [C]) {
        for child in children.iter_mut() {
            if let Some(offset) = self.animator.rendered_offset(child.key()) {
                child.place(offset);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Arrangement;
    use crate::state::TweenFlowAnimation;
    use crate::types::{int_offset, int_size};

    struct TestChild {
        key: ItemKey,
        size: IntSize,
        measured: usize,
        placed: Vec<IntOffset>,
    }

    impl TestChild {
        fn new(key: u64, width: i32, height: i32) -> Self {
            Self {
                key: ItemKey(key),
                size: int_size(width, height),
                measured: 0,
                placed: Vec::new(),
            }
        }
    }

    impl FlowChild for TestChild {
        fn key(&self) -> ItemKey {
            self.key
        }

        fn measure(&mut self, _constraints: &Constraints) -> IntSize {
            self.measured += 1;
            self.size
        }

        fn place(&mut self, offset: IntOffset) {
            self.placed.push(offset);
        }
    }

    fn setup() -> FlowLayout {
        let config = FlowConfig::default().horizontal_arrangement(Arrangement::spaced_by(10));
        FlowLayout::with_animation(
            config,
            Some(Box::new(TweenFlowAnimation::linear(Duration::from_millis(100)))),
        )
        .unwrap()
    }

    #[test]
    fn test_rejects_invalid_config() {
        assert!(FlowLayout::new(FlowConfig::default().max_lines(0)).is_err());
        let mut layout = FlowLayout::new(FlowConfig::default()).unwrap();
        assert!(layout.set_config(FlowConfig::default().max_items_in_each_line(0)).is_err());
    }

    #[test]
    fn test_rejects_invalid_constraints() {
        let mut layout = setup();
        let mut children = vec![TestChild::new(1, 10, 10)];
        let bad = Constraints::loose(-5, 10);
        assert!(layout.layout(&mut children, &bad).is_err());
    }

    #[test]
    fn test_first_pass_places_directly() {
        let mut layout = setup();
        let mut children = vec![TestChild::new(1, 40, 10), TestChild::new(2, 40, 10)];
        let flags = layout
            .layout(&mut children, &Constraints::with_max_width(100))
            .unwrap();

        assert!(flags.contains(ReflowFlags::ITEMS_ADDED));
        assert!(!flags.contains(ReflowFlags::ANIMATING));
        assert_eq!(children[0].placed, vec![int_offset(0, 0)]);
        assert_eq!(children[1].placed, vec![int_offset(50, 0)]);
        assert_eq!(layout.size(), int_size(90, 10));
    }

    #[test]
    fn test_insertion_animates_following_items() {
        let mut layout = setup();
        let constraints = Constraints::with_max_width(100);
        let mut children = vec![TestChild::new(1, 40, 10), TestChild::new(2, 40, 10)];
        layout.layout(&mut children, &constraints).unwrap();

        // Insert a new item at the front: item 2 wraps to the next line
        children.insert(0, TestChild::new(3, 40, 10));
        let flags = layout.layout(&mut children, &constraints).unwrap();
        assert!(flags.contains(ReflowFlags::ITEMS_ADDED | ReflowFlags::TARGETS_CHANGED));
        assert!(flags.contains(ReflowFlags::ANIMATING));

        // New item jumps, moved items start where they were
        assert_eq!(children[0].placed.last(), Some(&int_offset(0, 0)));
        assert_eq!(children[1].placed.last(), Some(&int_offset(0, 0)));
        assert_eq!(children[2].placed.last(), Some(&int_offset(50, 0)));

        assert!(layout.tick(Duration::from_millis(50), &mut children));
        assert_eq!(children[1].placed.last(), Some(&int_offset(25, 0)));
        assert_eq!(children[2].placed.last(), Some(&int_offset(25, 5)));

        assert!(!layout.tick(Duration::from_millis(50), &mut children));
        assert_eq!(children[1].placed.last(), Some(&int_offset(50, 0)));
        assert_eq!(children[2].placed.last(), Some(&int_offset(0, 10)));
    }

    #[test]
    fn test_removal_purges_state() {
        let mut layout = setup();
        let constraints = Constraints::with_max_width(100);
        let mut children = vec![TestChild::new(1, 40, 10), TestChild::new(2, 40, 10)];
        layout.layout(&mut children, &constraints).unwrap();

        children.remove(0);
        let flags = layout.layout(&mut children, &constraints).unwrap();
        assert!(flags.contains(ReflowFlags::ITEMS_REMOVED));
        assert!(layout.rendered_offset(ItemKey(1)).is_none());
        assert_eq!(layout.animator().len(), 1);
    }

    #[test]
    fn test_children_past_max_lines_are_not_measured() {
        let config = FlowConfig::default().max_lines(1);
        let mut layout = FlowLayout::new(config).unwrap();
        let mut children = vec![
            TestChild::new(1, 60, 10),
            TestChild::new(2, 60, 10),
            TestChild::new(3, 60, 10),
        ];
        layout
            .layout(&mut children, &Constraints::with_max_width(100))
            .unwrap();

        assert_eq!(children[0].placed.len(), 1);
        assert!(children[1].placed.is_empty());
        assert!(children[2].placed.is_empty());
        assert_eq!(children[2].measured, 0);
        assert_eq!(layout.last_layout().len(), 1);
    }

    #[test]
    fn test_reset_forgets_positions() {
        let mut layout = setup();
        let mut children = vec![TestChild::new(1, 10, 10)];
        layout
            .layout(&mut children, &Constraints::with_max_width(100))
            .unwrap();
        layout.reset();
        assert!(layout.rendered_offset(ItemKey(1)).is_none());
        assert!(layout.last_layout().is_empty());
    }
}
