//! Reflow Animator - smooth item movement across layout passes.
//!
//! Layout recomputes target offsets from scratch on every pass. This module
//! remembers, per item identity, the last committed target and the offset
//! currently on screen, and animates between them when a pass moves an item.
//!
//! # Lifecycle per identity
//!
//! ```text
//! absent ──first pass──▶ idle ──target changed──▶ animating ──settled──▶ idle
//!   ▲                      │                        │  ▲
//!   └──── not in a pass ◀──┴────────────────────────┘  └─ target changed again
//! ```
//!
//! - First appearance jumps straight to the target (no animation)
//! - A new target restarts the animation from the *rendered* offset, so an
//!   interrupted move never jumps
//! - An identity missing from a pass is purged immediately, abandoning any
//!   in-flight animation
//!
//! Time comes from the host: call [`ReflowAnimator::advance`] once per frame.

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use tracing::{debug, trace};

use crate::layout::LayoutResult;
use crate::types::{IntOffset, ItemKey, ReflowFlags};

use super::animate::{AnimationProgress, FlowAnimation};

#[derive(Debug, Clone, Copy, PartialEq)]
struct ItemAnimation {
    target: IntOffset,
    start: IntOffset,
    rendered: IntOffset,
    progress: Option<AnimationProgress>,
}

impl ItemAnimation {
    fn settled_at(target: IntOffset) -> Self {
        Self {
            target,
            start: target,
            rendered: target,
            progress: None,
        }
    }
}

/// Per-container animation state, keyed by item identity.
///
/// Owned by exactly one layout instance.
pub struct ReflowAnimator {
    animation: Option<Box<dyn FlowAnimation>>,
    items: HashMap<ItemKey, ItemAnimation>,
}

impl ReflowAnimator {
    /// Animate moves with `animation`.
    pub fn new(animation: impl FlowAnimation + 'static) -> Self {
        Self::with_animation(Some(Box::new(animation)))
    }

    /// Pass targets through as instantaneous positions.
    pub fn disabled() -> Self {
        Self::with_animation(None)
    }

    pub fn with_animation(animation: Option<Box<dyn FlowAnimation>>) -> Self {
        Self {
            animation,
            items: HashMap::new(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.animation.is_some()
    }

    /// Commit a new target for `key` and return the offset to render now.
    ///
    /// A first-seen identity is placed at its target directly. A changed
    /// target starts (or restarts) an animation from the rendered offset;
    /// the returned offset is unchanged until [`advance`](Self::advance) runs.
    pub fn on_new_target(&mut self, key: ItemKey, target: IntOffset) -> IntOffset {
        let enabled = self.animation.is_some();

        let Some(entry) = self.items.get_mut(&key) else {
            trace!(key = key.0, x = target.x, y = target.y, "tracking new item");
            self.items.insert(key, ItemAnimation::settled_at(target));
            return target;
        };

        if entry.target == target {
            return entry.rendered;
        }

        if !enabled {
            *entry = ItemAnimation::settled_at(target);
            return target;
        }

        debug!(
            key = key.0,
            from_x = entry.rendered.x,
            from_y = entry.rendered.y,
            to_x = target.x,
            to_y = target.y,
            restart = entry.progress.is_some(),
            "animating item to new target"
        );
        entry.start = entry.rendered;
        entry.target = target;
        entry.progress = Some(AnimationProgress::new());
        entry.rendered
    }

    /// Feed a whole layout pass through the animator.
    ///
    /// Identities absent from `layout` are purged first, then every placement
    /// goes through [`on_new_target`](Self::on_new_target).
    pub fn apply(&mut self, layout: &LayoutResult) -> ReflowFlags {
        let mut flags = ReflowFlags::empty();

        let present: HashSet<ItemKey> = layout.placements.iter().map(|p| p.key).collect();
        let before = self.items.len();
        self.items.retain(|key, _| present.contains(key));
        if self.items.len() != before {
            debug!(removed = before - self.items.len(), "purged vanished items");
            flags |= ReflowFlags::ITEMS_REMOVED;
        }

        for placement in &layout.placements {
            match self.items.get(&placement.key).map(|entry| entry.target) {
                None => flags |= ReflowFlags::ITEMS_ADDED,
                Some(previous) if previous != placement.offset => {
                    flags |= ReflowFlags::TARGETS_CHANGED
                }
                Some(_) => {}
            }
            self.on_new_target(placement.key, placement.offset);
        }

        if !self.is_idle() {
            flags |= ReflowFlags::ANIMATING;
        }
        flags
    }

    /// Advance every in-flight animation by `dt`.
    ///
    /// Returns true while any animation is still running.
    pub fn advance(&mut self, dt: Duration) -> bool {
        let Some(animation) = self.animation.as_deref() else {
            return false;
        };
        let spec = animation.animation_spec();
        let threshold = animation.visibility_threshold();
        let evaluator = animation.position_evaluator();

        let mut running = false;
        for (key, entry) in self.items.iter_mut() {
            let Some(progress) = entry.progress.as_mut() else {
                continue;
            };
            progress.step(&spec, dt);

            if progress.is_settled(threshold) {
                trace!(key = key.0, "animation settled");
                entry.rendered = entry.target;
                entry.progress = None;
            } else {
                entry.rendered = evaluator.evaluate(progress.value, entry.start, entry.target);
                running = true;
            }
        }
        running
    }

    /// Offset currently on screen for `key`.
    pub fn rendered_offset(&self, key: ItemKey) -> Option<IntOffset> {
        self.items.get(&key).map(|entry| entry.rendered)
    }

    /// Last committed target for `key`.
    pub fn target(&self, key: ItemKey) -> Option<IntOffset> {
        self.items.get(&key).map(|entry| entry.target)
    }

    /// Where the in-flight animation for `key` started, if one is running.
    pub fn animation_start(&self, key: ItemKey) -> Option<IntOffset> {
        self.items
            .get(&key)
            .filter(|entry| entry.progress.is_some())
            .map(|entry| entry.start)
    }

    /// Current progress of the in-flight animation for `key`.
    pub fn progress(&self, key: ItemKey) -> Option<AnimationProgress> {
        self.items.get(&key).and_then(|entry| entry.progress)
    }

    pub fn is_animating(&self, key: ItemKey) -> bool {
        self.progress(key).is_some()
    }

    /// True when no animation is in flight.
    pub fn is_idle(&self) -> bool {
        self.items.values().all(|entry| entry.progress.is_none())
    }

    /// Number of tracked identities.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Forget `key`. Returns true if it was tracked.
    pub fn remove(&mut self, key: ItemKey) -> bool {
        self.items.remove(&key).is_some()
    }

    /// Forget every identity.
    pub fn reset(&mut self) {
        self.items.clear();
    }
}

impl Default for ReflowAnimator {
    fn default() -> Self {
        Self::new(super::animate::DefaultFlowAnimation::default())
    }
}
