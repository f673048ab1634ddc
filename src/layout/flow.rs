//! Flow layout pass - measured items in, per-item positions out.
//!
//! ```text
//! MeasuredItem* → pack → FlexLine* → arrange → ArrangedItem* → direction → ItemPlacement*
//! ```
//!
//! The pass is pure: the same items, configuration and constraints always
//! produce the same [`LayoutResult`].

use tracing::trace;

use crate::error::LayoutError;
use crate::types::{
    int_size, AxisOffset, Constraints, FlexDirection, IntOffset, IntSize, ItemKey, MeasuredItem,
};

use super::arrange::{arrange, Arrangement, CrossAlignment};
use super::line::FlexLine;
use super::packer::{pack, PackOptions};

// =============================================================================
// Configuration
// =============================================================================

/// Layout parameters for a flow container.
///
/// Horizontal/vertical arrangements are mapped onto main/cross axes by
/// `direction`. Spacing comes from [`Arrangement::SpacedBy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlowConfig {
    pub direction: FlexDirection,
    pub horizontal_arrangement: Arrangement,
    pub vertical_arrangement: Arrangement,
    /// Alignment of each item inside its line's cross extent.
    pub item_alignment: CrossAlignment,
    pub max_lines: usize,
    pub max_items_in_each_line: usize,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            direction: FlexDirection::Row,
            horizontal_arrangement: Arrangement::Start,
            vertical_arrangement: Arrangement::Start,
            item_alignment: CrossAlignment::Start,
            max_lines: usize::MAX,
            max_items_in_each_line: usize::MAX,
        }
    }
}

impl FlowConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flow row defaults: items centered vertically inside their line.
    pub fn row() -> Self {
        Self {
            item_alignment: CrossAlignment::Center,
            ..Self::default()
        }
    }

    /// Flow column defaults: items centered horizontally inside their line.
    pub fn column() -> Self {
        Self {
            direction: FlexDirection::Column,
            item_alignment: CrossAlignment::Center,
            ..Self::default()
        }
    }

    pub fn direction(mut self, direction: FlexDirection) -> Self {
        self.direction = direction;
        self
    }

    pub fn horizontal_arrangement(mut self, arrangement: Arrangement) -> Self {
        self.horizontal_arrangement = arrangement;
        self
    }

    pub fn vertical_arrangement(mut self, arrangement: Arrangement) -> Self {
        self.vertical_arrangement = arrangement;
        self
    }

    pub fn item_alignment(mut self, alignment: CrossAlignment) -> Self {
        self.item_alignment = alignment;
        self
    }

    pub fn max_lines(mut self, max_lines: usize) -> Self {
        self.max_lines = max_lines;
        self
    }

    pub fn max_items_in_each_line(mut self, max_items: usize) -> Self {
        self.max_items_in_each_line = max_items;
        self
    }

    /// Arrangement along the main axis.
    pub fn main_arrangement(&self) -> Arrangement {
        if self.direction.is_row() {
            self.horizontal_arrangement
        } else {
            self.vertical_arrangement
        }
    }

    /// Arrangement of lines along the cross axis.
    pub fn cross_arrangement(&self) -> Arrangement {
        if self.direction.is_row() {
            self.vertical_arrangement
        } else {
            self.horizontal_arrangement
        }
    }

    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.max_lines == 0 {
            return Err(LayoutError::ZeroMaxLines);
        }
        if self.max_items_in_each_line == 0 {
            return Err(LayoutError::ZeroMaxItemsPerLine);
        }
        for (axis, arrangement) in [
            ("horizontal", self.horizontal_arrangement),
            ("vertical", self.vertical_arrangement),
        ] {
            let value = arrangement.spacing();
            if value < 0 {
                return Err(LayoutError::NegativeSpacing { axis, value });
            }
        }
        Ok(())
    }

    fn pack_options(&self, main_axis_constraint: i32) -> PackOptions {
        let spacing = self.main_arrangement().spacing();
        PackOptions {
            main_axis_constraint,
            max_lines: self.max_lines,
            max_items_per_line: self.max_items_in_each_line,
            spacing,
            padding: spacing,
        }
    }
}

// =============================================================================
// Result
// =============================================================================

/// Final placement of one item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemPlacement {
    pub key: ItemKey,
    /// Index of the line holding the item.
    pub line: usize,
    /// Target offset relative to the container origin.
    pub offset: IntOffset,
    /// Laid-out size (stretched on the cross axis when requested).
    pub size: IntSize,
}

/// Output of one layout pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutResult {
    pub lines: Vec<FlexLine>,
    pub placements: Vec<ItemPlacement>,
    /// The container's own size, coerced into the incoming constraints.
    pub size: IntSize,
}

impl Default for LayoutResult {
    fn default() -> Self {
        Self {
            lines: Vec::new(),
            placements: Vec::new(),
            size: int_size(0, 0),
        }
    }
}

impl LayoutResult {
    pub fn placement(&self, key: ItemKey) -> Option<&ItemPlacement> {
        self.placements.iter().find(|p| p.key == key)
    }

    pub fn offset(&self, key: ItemKey) -> Option<IntOffset> {
        self.placement(key).map(|p| p.offset)
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn len(&self) -> usize {
        self.placements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }
}

// =============================================================================
// Main entry point
// =============================================================================

/// Run one layout pass.
///
/// `items` is consumed lazily; anything past `max_lines` is never pulled.
pub fn compute_flow_layout<I>(items: I, config: &FlowConfig, constraints: &Constraints) -> LayoutResult
where
    I: IntoIterator<Item = MeasuredItem>,
{
    let direction = config.direction;
    let (_, max_main) = constraints.main_range(direction);

    let lines = pack(items, &config.pack_options(max_main));

    let content_main = lines.iter().map(FlexLine::used_space).max().unwrap_or(0);
    let cross_spacing = config.cross_arrangement().spacing();
    let content_cross = lines.iter().map(FlexLine::cross_size).sum::<i32>()
        + cross_spacing * (lines.len().saturating_sub(1) as i32);

    let container_size = constraints.constrain(direction.join_size(content_main, content_cross));
    let (container_main, container_cross) = direction.split_size(container_size);

    let arranged = arrange(
        &lines,
        container_main,
        container_cross,
        config.main_arrangement(),
        config.cross_arrangement(),
        config.item_alignment,
    );

    let placements = arranged
        .into_iter()
        .map(|item| {
            let main = if direction.is_reverse() {
                container_main - item.offset.main - item.main
            } else {
                item.offset.main
            };
            ItemPlacement {
                key: item.key,
                line: item.line,
                offset: direction.to_offset(AxisOffset::new(main, item.offset.cross)),
                size: direction.join_size(item.main, item.cross),
            }
        })
        .collect::<Vec<_>>();

    trace!(
        lines = lines.len(),
        items = placements.len(),
        main = container_main,
        cross = container_cross,
        "flow layout pass"
    );

    LayoutResult {
        lines,
        placements,
        size: container_size,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::int_offset;

    fn row_items(sizes: &[(i32, i32)]) -> Vec<MeasuredItem> {
        sizes
            .iter()
            .enumerate()
            .map(|(i, &(w, h))| MeasuredItem::new(i as u64, w, h))
            .collect()
    }

    #[test]
    fn test_config_validate() {
        assert!(FlowConfig::default().validate().is_ok());
        assert_eq!(
            FlowConfig::default().max_lines(0).validate(),
            Err(LayoutError::ZeroMaxLines)
        );
        assert_eq!(
            FlowConfig::default().max_items_in_each_line(0).validate(),
            Err(LayoutError::ZeroMaxItemsPerLine)
        );
        assert_eq!(
            FlowConfig::default()
                .vertical_arrangement(Arrangement::spaced_by(-2))
                .validate(),
            Err(LayoutError::NegativeSpacing {
                axis: "vertical",
                value: -2
            })
        );
    }

    #[test]
    fn test_presets() {
        let row = FlowConfig::row();
        assert_eq!(row.direction, FlexDirection::Row);
        assert_eq!(row.item_alignment, CrossAlignment::Center);
        assert_eq!(row.max_lines, usize::MAX);

        let column = FlowConfig::column()
            .horizontal_arrangement(Arrangement::spaced_by(3))
            .vertical_arrangement(Arrangement::spaced_by(7));
        assert_eq!(column.main_arrangement(), Arrangement::spaced_by(7));
        assert_eq!(column.cross_arrangement(), Arrangement::spaced_by(3));
    }

    #[test]
    fn test_row_layout_wraps() {
        let config = FlowConfig::default()
            .horizontal_arrangement(Arrangement::spaced_by(10))
            .vertical_arrangement(Arrangement::spaced_by(5));
        let items = row_items(&[(40, 10), (40, 20), (40, 10)]);
        let layout = compute_flow_layout(items, &config, &Constraints::with_max_width(100));

        assert_eq!(layout.line_count(), 2);
        assert_eq!(layout.offset(ItemKey(0)), Some(int_offset(0, 0)));
        assert_eq!(layout.offset(ItemKey(1)), Some(int_offset(50, 0)));
        assert_eq!(layout.offset(ItemKey(2)), Some(int_offset(0, 25)));
        assert_eq!(layout.size, int_size(90, 35));
    }

    #[test]
    fn test_row_reverse_mirrors_main_axis() {
        let config = FlowConfig::default()
            .direction(FlexDirection::RowReverse)
            .horizontal_arrangement(Arrangement::spaced_by(10));
        let items = row_items(&[(20, 10), (30, 10)]);
        let layout = compute_flow_layout(items, &config, &Constraints::fixed(100, 50));

        assert_eq!(layout.offset(ItemKey(0)), Some(int_offset(80, 0)));
        assert_eq!(layout.offset(ItemKey(1)), Some(int_offset(40, 0)));
    }

    #[test]
    fn test_column_layout() {
        let config = FlowConfig::column()
            .vertical_arrangement(Arrangement::spaced_by(2))
            .horizontal_arrangement(Arrangement::spaced_by(4));
        // Column items: main = height, cross = width
        let items = vec![
            MeasuredItem::new(0u64, 10, 30),
            MeasuredItem::new(1u64, 10, 20),
            MeasuredItem::new(2u64, 10, 10),
        ];
        let layout = compute_flow_layout(items, &config, &Constraints::with_max_height(25));

        assert_eq!(layout.line_count(), 2);
        // First column is 30 wide; item 1 is centered in it
        assert_eq!(layout.offset(ItemKey(0)), Some(int_offset(0, 0)));
        assert_eq!(layout.offset(ItemKey(1)), Some(int_offset(5, 12)));
        assert_eq!(layout.offset(ItemKey(2)), Some(int_offset(34, 0)));
        assert_eq!(layout.placement(ItemKey(1)).map(|p| p.size), Some(int_size(20, 10)));
    }

    #[test]
    fn test_stretch_reports_line_size() {
        let config = FlowConfig::default().item_alignment(CrossAlignment::Stretch);
        let items = row_items(&[(10, 4), (10, 12)]);
        let layout = compute_flow_layout(items, &config, &Constraints::with_max_width(100));
        assert_eq!(layout.placement(ItemKey(0)).map(|p| p.size), Some(int_size(10, 12)));
    }

    #[test]
    fn test_max_lines_excludes_items() {
        let config = FlowConfig::default().max_lines(1);
        let items = row_items(&[(60, 10), (60, 10), (60, 10)]);
        let layout = compute_flow_layout(items, &config, &Constraints::with_max_width(100));

        assert_eq!(layout.len(), 1);
        assert!(layout.placement(ItemKey(1)).is_none());
        assert!(layout.placement(ItemKey(2)).is_none());
    }

    #[test]
    fn test_container_respects_min_constraints() {
        let config = FlowConfig::default().horizontal_arrangement(Arrangement::Center);
        let items = row_items(&[(20, 10)]);
        let layout = compute_flow_layout(items, &config, &Constraints::fixed(100, 40));
        assert_eq!(layout.size, int_size(100, 40));
        assert_eq!(layout.offset(ItemKey(0)), Some(int_offset(40, 0)));
    }

    #[test]
    fn test_column_container_coerced_per_axis() {
        let config = FlowConfig::column();
        let constraints = Constraints::new(50, 200, 0, 30).unwrap();

        let layout = compute_flow_layout(vec![MeasuredItem::new(0u64, 10, 20)], &config, &constraints);
        assert_eq!(layout.size, int_size(50, 10));

        // Oversized along the main axis: the container stops at max_height
        let layout = compute_flow_layout(vec![MeasuredItem::new(0u64, 40, 20)], &config, &constraints);
        assert_eq!(layout.size, int_size(50, 30));
    }

    #[test]
    fn test_empty_layout() {
        let layout = compute_flow_layout(
            Vec::new(),
            &FlowConfig::default(),
            &Constraints::with_max_width(100),
        );
        assert!(layout.is_empty());
        assert_eq!(layout.size, int_size(0, 0));
    }
}
