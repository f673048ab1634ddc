//! FlexLine - one row (or column) of packed items.
//!
//! A line is open while the packer keeps offering it items and closed once it
//! will accept no more. While open, `used_space` carries one provisional
//! spacing unit for the gap before the next item; [`FlexLine::close`] gives it
//! back so a closed line reports only real content.

use crate::types::MeasuredItem;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FlexLine {
    items: Vec<MeasuredItem>,
    used_space: i32,
    cross_size: i32,
    closed: bool,
}

impl FlexLine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Items on this line, in insertion order.
    pub fn items(&self) -> &[MeasuredItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Main-axis space consumed so far.
    pub fn used_space(&self) -> i32 {
        self.used_space
    }

    /// Largest cross-axis size among the items.
    pub fn cross_size(&self) -> i32 {
        self.cross_size
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Append `items` if they fit under `main_axis_constraint`.
    ///
    /// `content_space` is the sum of the items' main sizes plus the spacing
    /// strictly between them. On success `used_space` grows by
    /// `content_space + spacing`, the trailing `spacing` standing in for the
    /// gap before whatever comes next. The comparison is inclusive: an item
    /// that exactly fills the remaining space fits.
    ///
    /// Returns false, leaving the line untouched, if they do not fit or the
    /// line is already closed.
    pub fn try_add(
        &mut self,
        items: &[MeasuredItem],
        main_axis_constraint: i32,
        content_space: i32,
        spacing: i32,
    ) -> bool {
        if self.closed {
            return false;
        }
        // i64 so an unbounded constraint cannot overflow the sum
        if main_axis_constraint as i64 >= self.used_space as i64 + content_space as i64 {
            self.push(items, content_space, spacing);
            true
        } else {
            false
        }
    }

    /// Append `items` regardless of the constraint.
    ///
    /// Only meaningful on an empty line: an item larger than the container
    /// still gets a line of its own instead of being dropped.
    pub fn force_add(&mut self, items: &[MeasuredItem], content_space: i32, spacing: i32) {
        debug_assert!(!self.closed, "force_add on a closed line");
        self.push(items, content_space, spacing);
    }

    /// Finalize the line, removing the provisional trailing `padding`.
    pub fn close(&mut self, padding: i32) {
        if self.closed {
            return;
        }
        self.used_space = (self.used_space - padding).max(0);
        self.closed = true;
    }

    fn push(&mut self, items: &[MeasuredItem], content_space: i32, spacing: i32) {
        self.used_space = self.used_space.saturating_add(content_space).saturating_add(spacing);
        for item in items {
            self.cross_size = self.cross_size.max(item.cross);
        }
        self.items.extend_from_slice(items);
    }
}

/// Main-axis space a run of items occupies, counting spacing only between them.
///
/// Saturates at `i32::MAX`.
pub fn content_space(items: &[MeasuredItem], spacing: i32) -> i32 {
    let sizes: i64 = items.iter().map(|item| item.main as i64).sum();
    let gaps = items.len().saturating_sub(1) as i64 * spacing as i64;
    (sizes + gaps).clamp(i32::MIN as i64, i32::MAX as i64) as i32
}
