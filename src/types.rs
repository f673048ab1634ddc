//! Core types for spark-flow.
//!
//! These types define the foundation that the packer, the arranger and the
//! reflow animator all share. Sizes and offsets are integers: exact
//! comparison, no floating point epsilon in the layout path.

use crate::error::LayoutError;

// =============================================================================
// Geometry
// =============================================================================

/// Integer offset relative to the container origin.
///
/// Backed by taffy's generic point so results can be handed to taffy-based
/// hosts without conversion.
pub type IntOffset = taffy::Point<i32>;

/// Integer width/height pair.
pub type IntSize = taffy::Size<i32>;

/// Build an [`IntOffset`].
#[inline]
pub const fn int_offset(x: i32, y: i32) -> IntOffset {
    taffy::Point { x, y }
}

/// Build an [`IntSize`].
#[inline]
pub const fn int_size(width: i32, height: i32) -> IntSize {
    taffy::Size { width, height }
}

/// An offset expressed in main/cross axis terms.
///
/// The packer and arranger only think in axes; [`FlexDirection::to_offset`]
/// maps the result back to x/y.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AxisOffset {
    pub main: i32,
    pub cross: i32,
}

impl AxisOffset {
    pub const fn new(main: i32, cross: i32) -> Self {
        Self { main, cross }
    }
}

// =============================================================================
// Item identity
// =============================================================================

/// Stable identity of a child, unique within one layout pass.
///
/// Animation state is keyed by this, so hosts must keep it stable across
/// passes for the same logical child.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ItemKey(pub u64);

impl From<u64> for ItemKey {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<usize> for ItemKey {
    fn from(value: usize) -> Self {
        Self(value as u64)
    }
}

impl From<u32> for ItemKey {
    fn from(value: u32) -> Self {
        Self(value as u64)
    }
}

// =============================================================================
// MeasuredItem
// =============================================================================

/// A child after the single measurement pass.
///
/// Immutable for the pass. `main` and `cross` are already resolved against
/// the container direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeasuredItem {
    pub key: ItemKey,
    /// Size along the main axis (width for rows, height for columns).
    pub main: i32,
    /// Size along the cross axis.
    pub cross: i32,
}

impl MeasuredItem {
    pub fn new(key: impl Into<ItemKey>, main: i32, cross: i32) -> Self {
        Self {
            key: key.into(),
            main,
            cross,
        }
    }

    /// Build from a measured width/height, resolving axes for `direction`.
    pub fn from_size(key: impl Into<ItemKey>, size: IntSize, direction: FlexDirection) -> Self {
        let (main, cross) = direction.split_size(size);
        Self::new(key, main, cross)
    }
}

// =============================================================================
// FlexDirection
// =============================================================================

/// Direction in which items are placed inside a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlexDirection {
    #[default]
    Row,
    RowReverse,
    Column,
    ColumnReverse,
}

impl FlexDirection {
    /// Check if this is a row direction (Row or RowReverse).
    pub const fn is_row(&self) -> bool {
        matches!(self, Self::Row | Self::RowReverse)
    }

    /// Check if this is a reverse direction (RowReverse or ColumnReverse).
    pub const fn is_reverse(&self) -> bool {
        matches!(self, Self::RowReverse | Self::ColumnReverse)
    }

    /// Split a width/height pair into (main, cross).
    pub const fn split_size(&self, size: IntSize) -> (i32, i32) {
        if self.is_row() {
            (size.width, size.height)
        } else {
            (size.height, size.width)
        }
    }

    /// Join (main, cross) back into a width/height pair.
    pub const fn join_size(&self, main: i32, cross: i32) -> IntSize {
        if self.is_row() {
            int_size(main, cross)
        } else {
            int_size(cross, main)
        }
    }

    /// Map an axis-relative offset to x/y.
    pub const fn to_offset(&self, offset: AxisOffset) -> IntOffset {
        if self.is_row() {
            int_offset(offset.main, offset.cross)
        } else {
            int_offset(offset.cross, offset.main)
        }
    }
}

// =============================================================================
// Constraints
// =============================================================================

/// Size limits imposed on the container by its parent.
///
/// Use [`Constraints::UNBOUNDED`] for an axis with no upper limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Constraints {
    pub min_width: i32,
    pub max_width: i32,
    pub min_height: i32,
    pub max_height: i32,
}

impl Constraints {
    /// Upper bound used for an unbounded axis.
    pub const UNBOUNDED: i32 = i32::MAX;

    /// Create validated constraints.
    pub fn new(
        min_width: i32,
        max_width: i32,
        min_height: i32,
        max_height: i32,
    ) -> Result<Self, LayoutError> {
        let constraints = Self {
            min_width,
            max_width,
            min_height,
            max_height,
        };
        constraints.validate()?;
        Ok(constraints)
    }

    /// Exactly `width` x `height`.
    pub const fn fixed(width: i32, height: i32) -> Self {
        Self {
            min_width: width,
            max_width: width,
            min_height: height,
            max_height: height,
        }
    }

    /// Anything from zero up to `width` x `height`.
    pub const fn loose(width: i32, height: i32) -> Self {
        Self {
            min_width: 0,
            max_width: width,
            min_height: 0,
            max_height: height,
        }
    }

    /// Bounded width, unbounded height. The usual case for a flow row.
    pub const fn with_max_width(width: i32) -> Self {
        Self::loose(width, Self::UNBOUNDED)
    }

    /// Bounded height, unbounded width. The usual case for a flow column.
    pub const fn with_max_height(height: i32) -> Self {
        Self::loose(Self::UNBOUNDED, height)
    }

    pub fn validate(&self) -> Result<(), LayoutError> {
        for (axis, min, max) in [
            ("width", self.min_width, self.max_width),
            ("height", self.min_height, self.max_height),
        ] {
            if min < 0 || max < 0 {
                return Err(LayoutError::NegativeConstraint { axis, min, max });
            }
            if min > max {
                return Err(LayoutError::InvertedConstraint { axis, min, max });
            }
        }
        Ok(())
    }

    /// Coerce a size into these constraints.
    pub fn constrain(&self, size: IntSize) -> IntSize {
        int_size(
            size.width.max(self.min_width).min(self.max_width),
            size.height.max(self.min_height).min(self.max_height),
        )
    }

    /// (min, max) along the main axis of `direction`.
    pub const fn main_range(&self, direction: FlexDirection) -> (i32, i32) {
        if direction.is_row() {
            (self.min_width, self.max_width)
        } else {
            (self.min_height, self.max_height)
        }
    }
}

impl Default for Constraints {
    fn default() -> Self {
        Self::loose(Self::UNBOUNDED, Self::UNBOUNDED)
    }
}

// =============================================================================
// Reflow flags (bitflags)
// =============================================================================

bitflags::bitflags! {
    /// What changed between two layout passes, as seen by the reflow animator.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
    pub struct ReflowFlags: u8 {
        /// At least one identity was seen for the first time.
        const ITEMS_ADDED = 1 << 0;
        /// At least one identity disappeared and its state was purged.
        const ITEMS_REMOVED = 1 << 1;
        /// At least one known identity received a different target.
        const TARGETS_CHANGED = 1 << 2;
        /// At least one animation is in flight after the pass.
        const ANIMATING = 1 << 3;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_axes() {
        let size = int_size(30, 10);
        assert_eq!(FlexDirection::Row.split_size(size), (30, 10));
        assert_eq!(FlexDirection::ColumnReverse.split_size(size), (10, 30));
        assert_eq!(FlexDirection::Column.join_size(10, 30), size);
        assert_eq!(
            FlexDirection::Column.to_offset(AxisOffset::new(5, 7)),
            int_offset(7, 5)
        );
        assert!(FlexDirection::RowReverse.is_reverse());
        assert!(!FlexDirection::Column.is_row());
    }

    #[test]
    fn test_measured_item_from_size() {
        let item = MeasuredItem::from_size(4u64, int_size(20, 8), FlexDirection::Column);
        assert_eq!(item.key, ItemKey(4));
        assert_eq!(item.main, 8);
        assert_eq!(item.cross, 20);
    }

    #[test]
    fn test_constraints_validate() {
        assert!(Constraints::new(0, 100, 0, 50).is_ok());
        assert!(matches!(
            Constraints::new(-1, 100, 0, 50),
            Err(LayoutError::NegativeConstraint { axis: "width", .. })
        ));
        assert!(matches!(
            Constraints::new(0, 100, 60, 50),
            Err(LayoutError::InvertedConstraint { axis: "height", .. })
        ));
    }

    #[test]
    fn test_constraints_constrain() {
        let c = Constraints::new(10, 100, 0, 40).unwrap();
        assert_eq!(c.constrain(int_size(5, 80)), int_size(10, 40));
        assert_eq!(c.constrain(int_size(50, 20)), int_size(50, 20));
    }

    #[test]
    fn test_reflow_flags() {
        let mut flags = ReflowFlags::empty();
        flags |= ReflowFlags::ITEMS_ADDED | ReflowFlags::ANIMATING;
        assert!(flags.contains(ReflowFlags::ANIMATING));
        assert!(!flags.contains(ReflowFlags::ITEMS_REMOVED));
    }
}
