//! Line packer - greedy single-pass assignment of items to lines.
//!
//! # Algorithm
//!
//! Items are taken in order and offered to the current line. When an item does
//! not fit, the line is closed and a new one started. An item that does not
//! fit even on an empty line is forced onto it alone. A line holding
//! `max_items_per_line` items is closed immediately. Once `max_lines` lines
//! are closed, the input iterator is not pulled any further, so items past the
//! cap are never measured.
//!
//! No backtracking: once an item is committed to a line it stays there for
//! the pass.

use tracing::{debug, trace};

use crate::types::MeasuredItem;

use super::line::FlexLine;

/// Limits and spacing for one packing pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackOptions {
    /// Available main-axis space.
    pub main_axis_constraint: i32,
    pub max_lines: usize,
    pub max_items_per_line: usize,
    /// Gap between adjacent items on a line.
    pub spacing: i32,
    /// Amount trimmed from a line when it closes.
    pub padding: i32,
}

impl PackOptions {
    /// Unbounded lines and items, `spacing` used for both gap and padding.
    pub fn new(main_axis_constraint: i32, spacing: i32) -> Self {
        Self {
            main_axis_constraint,
            max_lines: usize::MAX,
            max_items_per_line: usize::MAX,
            spacing,
            padding: spacing,
        }
    }

    pub fn max_lines(mut self, max_lines: usize) -> Self {
        self.max_lines = max_lines;
        self
    }

    pub fn max_items_per_line(mut self, max_items_per_line: usize) -> Self {
        self.max_items_per_line = max_items_per_line;
        self
    }
}

/// Pack `items` into closed lines.
///
/// Never fails. Items beyond `max_lines` are silently left out of the result.
pub fn pack<I>(items: I, options: &PackOptions) -> Vec<FlexLine>
where
    I: IntoIterator<Item = MeasuredItem>,
{
    let mut lines: Vec<FlexLine> = Vec::new();
    if options.max_lines == 0 || options.max_items_per_line == 0 {
        return lines;
    }

    let mut current = FlexLine::new();
    for item in items {
        let batch = [item];
        let fits = current.try_add(
            &batch,
            options.main_axis_constraint,
            item.main,
            options.spacing,
        );

        if !fits {
            if current.is_empty() {
                trace!(key = item.key.0, size = item.main, "forcing oversized item onto its own line");
                current.force_add(&batch, item.main, options.spacing);
            } else {
                current.close(options.padding);
                lines.push(std::mem::take(&mut current));
                if lines.len() >= options.max_lines {
                    debug!(max_lines = options.max_lines, "line cap reached, dropping remaining items");
                    return lines;
                }
                if !current.try_add(
                    &batch,
                    options.main_axis_constraint,
                    item.main,
                    options.spacing,
                ) {
                    trace!(key = item.key.0, size = item.main, "forcing oversized item onto its own line");
                    current.force_add(&batch, item.main, options.spacing);
                }
            }
        }

        if current.len() >= options.max_items_per_line {
            trace!(items = current.len(), "line reached max items");
            current.close(options.padding);
            lines.push(std::mem::take(&mut current));
            if lines.len() >= options.max_lines {
                debug!(max_lines = options.max_lines, "line cap reached, not pulling further items");
                return lines;
            }
        }
    }

    if !current.is_empty() {
        current.close(options.padding);
        lines.push(current);
    }

    trace!(lines = lines.len(), "packing complete");
    lines
}
