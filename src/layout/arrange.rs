//! Arranger - turns packed lines into axis-relative offsets.
//!
//! Three independent decisions:
//!
//! 1. **Main axis**: where each item sits inside its line
//!    ([`Arrangement::arrange`] over the line's item sizes).
//! 2. **Cross axis, between lines**: where each line sits inside the container
//!    (the same function over the line cross sizes).
//! 3. **Cross axis, inside a line**: where each item sits inside its line's
//!    cross extent ([`CrossAlignment::align`]).
//!
//! Everything here is pure.

use crate::types::{AxisOffset, ItemKey};

use super::line::FlexLine;

// =============================================================================
// Alignment
// =============================================================================

/// One-dimensional alignment used by [`Arrangement::SpacedBy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Start,
    Center,
    End,
}

impl Alignment {
    /// Offset of a block of `size` inside `space`.
    pub fn align(&self, size: i32, space: i32) -> i32 {
        match self {
            Self::Start => 0,
            Self::Center => ((space - size) as f32 / 2.0).round() as i32,
            Self::End => space - size,
        }
    }
}

/// Where an item sits inside its line's cross extent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CrossAlignment {
    #[default]
    Start,
    Center,
    End,
    /// Start-aligned, reported with the line's full cross size.
    Stretch,
}

impl CrossAlignment {
    /// Offset of an item of `item_cross` inside a line of `line_cross`.
    pub fn align(&self, line_cross: i32, item_cross: i32) -> i32 {
        match self {
            Self::Start | Self::Stretch => 0,
            Self::Center => Alignment::Center.align(item_cross, line_cross),
            Self::End => line_cross - item_cross,
        }
    }

    /// Cross size an item ends up with on a line of `line_cross`.
    pub fn resolve_size(&self, line_cross: i32, item_cross: i32) -> i32 {
        match self {
            Self::Stretch => line_cross.max(item_cross),
            _ => item_cross,
        }
    }
}

// =============================================================================
// Arrangement
// =============================================================================

/// Distribution of a sequence of blocks along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Arrangement {
    #[default]
    Start,
    End,
    Center,
    SpaceBetween,
    SpaceAround,
    SpaceEvenly,
    /// Fixed gap between blocks, the group aligned inside the available space.
    SpacedBy { space: i32, alignment: Alignment },
}

impl Arrangement {
    /// Fixed gap, start-aligned.
    pub const fn spaced_by(space: i32) -> Self {
        Self::SpacedBy {
            space,
            alignment: Alignment::Start,
        }
    }

    /// Fixed gap with the group aligned.
    pub const fn spaced_by_aligned(space: i32, alignment: Alignment) -> Self {
        Self::SpacedBy { space, alignment }
    }

    /// The fixed gap this arrangement inserts between adjacent blocks.
    ///
    /// This is what the packer must reserve between items; distributed
    /// arrangements only use leftover space and reserve nothing.
    pub const fn spacing(&self) -> i32 {
        match self {
            Self::SpacedBy { space, .. } => *space,
            _ => 0,
        }
    }

    /// Offsets of `sizes` laid out in `total` space.
    pub fn arrange(&self, total: i32, sizes: &[i32]) -> Vec<i32> {
        let mut out = vec![0; sizes.len()];
        if sizes.is_empty() {
            return out;
        }

        let consumed: i32 = sizes.iter().sum();
        let count = sizes.len() as f32;
        let remaining = (total - consumed) as f32;

        match self {
            Self::Start => place_with_gap(sizes, 0.0, 0.0, &mut out),
            Self::End => place_with_gap(sizes, remaining, 0.0, &mut out),
            Self::Center => place_with_gap(sizes, remaining / 2.0, 0.0, &mut out),
            Self::SpaceBetween => {
                let gap = if sizes.len() > 1 {
                    remaining / (count - 1.0)
                } else {
                    0.0
                };
                place_with_gap(sizes, 0.0, gap, &mut out);
            }
            Self::SpaceAround => {
                let gap = remaining / count;
                place_with_gap(sizes, gap / 2.0, gap, &mut out);
            }
            Self::SpaceEvenly => {
                let gap = remaining / (count + 1.0);
                place_with_gap(sizes, gap, gap, &mut out);
            }
            Self::SpacedBy { space, alignment } => {
                let occupied = consumed + space * (sizes.len() as i32 - 1);
                let shift = alignment.align(occupied, total);
                let mut current = shift;
                for (offset, size) in out.iter_mut().zip(sizes) {
                    *offset = current;
                    current += size + space;
                }
            }
        }
        out
    }
}

fn place_with_gap(sizes: &[i32], start: f32, gap: f32, out: &mut [i32]) {
    let mut current = start;
    for (offset, &size) in out.iter_mut().zip(sizes) {
        *offset = current.round() as i32;
        current += size as f32 + gap;
    }
}

// =============================================================================
// Arrange lines
// =============================================================================

/// An item's axis-relative placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArrangedItem {
    pub key: ItemKey,
    /// Index of the line the item was packed into.
    pub line: usize,
    pub offset: AxisOffset,
    /// Main-axis size.
    pub main: i32,
    /// Cross-axis size after alignment (stretched items take the line's).
    pub cross: i32,
}

/// Compute axis-relative offsets for every item on `lines`.
///
/// Covers exactly the packed items; items dropped by the packer never reach
/// here.
pub fn arrange(
    lines: &[FlexLine],
    container_main: i32,
    container_cross: i32,
    main_arrangement: Arrangement,
    cross_arrangement: Arrangement,
    item_alignment: CrossAlignment,
) -> Vec<ArrangedItem> {
    let line_sizes: Vec<i32> = lines.iter().map(FlexLine::cross_size).collect();
    let line_offsets = cross_arrangement.arrange(container_cross, &line_sizes);

    let mut arranged = Vec::with_capacity(lines.iter().map(FlexLine::len).sum());

    for (line_index, (line, &line_offset)) in lines.iter().zip(&line_offsets).enumerate() {
        let sizes: Vec<i32> = line.items().iter().map(|item| item.main).collect();
        let main_offsets = main_arrangement.arrange(container_main, &sizes);

        for (item, &main_offset) in line.items().iter().zip(&main_offsets) {
            let cross_offset = line_offset + item_alignment.align(line.cross_size(), item.cross);
            arranged.push(ArrangedItem {
                key: item.key,
                line: line_index,
                offset: AxisOffset::new(main_offset, cross_offset),
                main: item.main,
                cross: item_alignment.resolve_size(line.cross_size(), item.cross),
            });
        }
    }

    arranged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::packer::{pack, PackOptions};
    use crate::types::MeasuredItem;

    #[test]
    fn test_arrangement_start_end_center() {
        let sizes = [10, 20];
        assert_eq!(Arrangement::Start.arrange(100, &sizes), vec![0, 10]);
        assert_eq!(Arrangement::End.arrange(100, &sizes), vec![70, 80]);
        assert_eq!(Arrangement::Center.arrange(100, &sizes), vec![35, 45]);
    }

    #[test]
    fn test_arrangement_space_distribution() {
        let sizes = [10, 10, 10];
        assert_eq!(Arrangement::SpaceBetween.arrange(100, &sizes), vec![0, 45, 90]);
        assert_eq!(Arrangement::SpaceEvenly.arrange(110, &sizes), vec![20, 50, 80]);
        assert_eq!(Arrangement::SpaceAround.arrange(90, &sizes), vec![10, 40, 70]);
    }

    #[test]
    fn test_space_between_single_item_starts() {
        assert_eq!(Arrangement::SpaceBetween.arrange(100, &[10]), vec![0]);
    }

    #[test]
    fn test_spaced_by() {
        let sizes = [10, 20, 10];
        assert_eq!(Arrangement::spaced_by(5).arrange(100, &sizes), vec![0, 15, 40]);
        assert_eq!(
            Arrangement::spaced_by_aligned(5, Alignment::End).arrange(100, &sizes),
            vec![50, 65, 90]
        );
        assert_eq!(
            Arrangement::spaced_by_aligned(5, Alignment::Center).arrange(100, &sizes),
            vec![25, 40, 65]
        );
        assert_eq!(Arrangement::spaced_by(5).spacing(), 5);
        assert_eq!(Arrangement::SpaceAround.spacing(), 0);
    }

    #[test]
    fn test_cross_alignment() {
        assert_eq!(CrossAlignment::Start.align(20, 10), 0);
        assert_eq!(CrossAlignment::Center.align(20, 10), 5);
        assert_eq!(CrossAlignment::End.align(20, 10), 10);
        assert_eq!(CrossAlignment::Stretch.align(20, 10), 0);
        assert_eq!(CrossAlignment::Stretch.resolve_size(20, 10), 20);
        assert_eq!(CrossAlignment::Center.resolve_size(20, 10), 10);
    }

    #[test]
    fn test_arrange_lines() {
        let items = vec![
            MeasuredItem::new(1u64, 40, 10),
            MeasuredItem::new(2u64, 40, 20),
            MeasuredItem::new(3u64, 40, 6),
        ];
        let lines = pack(items, &PackOptions::new(100, 10));
        assert_eq!(lines.len(), 2);

        let arranged = arrange(
            &lines,
            100,
            60,
            Arrangement::spaced_by(10),
            Arrangement::spaced_by(4),
            CrossAlignment::Center,
        );

        assert_eq!(arranged.len(), 3);
        assert_eq!(arranged[0].offset, AxisOffset::new(0, 5));
        assert_eq!(arranged[1].offset, AxisOffset::new(50, 0));
        // Second line starts after the first (20) plus the line gap (4)
        assert_eq!(arranged[2].offset, AxisOffset::new(0, 24));
        assert_eq!(arranged[2].line, 1);
    }

    #[test]
    fn test_arrange_empty() {
        let arranged = arrange(
            &[],
            100,
            100,
            Arrangement::Start,
            Arrangement::Start,
            CrossAlignment::Start,
        );
        assert!(arranged.is_empty());
    }
}
