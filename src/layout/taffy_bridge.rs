//! Taffy Bridge - the same flow configuration run through Taffy.
//!
//! Converts a [`FlowConfig`] to a Taffy flex-wrap container with one fixed
//! size leaf per measured item, runs Taffy's W3C flexbox algorithm and reads
//! the positions back as [`ItemPlacement`]s.
//!
//! Taffy has no notion of `max_lines` or `max_items_in_each_line`, so capped
//! configurations are rejected. For uncapped configurations inside fixed
//! constraints the result matches [`compute_flow_layout`](super::compute_flow_layout),
//! which makes this a parity reference for the greedy packer.

use taffy::{
    AlignContent as TaffyAlignContent, AlignItems as TaffyAlignItems, AvailableSpace,
    Dimension as TaffyDimension, Display, FlexDirection as TaffyFlexDirection, FlexWrap,
    JustifyContent as TaffyJustifyContent, LengthPercentage, NodeId, Size, Style, TaffyTree,
};

use crate::error::LayoutError;
use crate::types::{int_offset, int_size, Constraints, FlexDirection, MeasuredItem};

use super::arrange::{Alignment, Arrangement, CrossAlignment};
use super::flow::{FlowConfig, ItemPlacement};

// =============================================================================
// ENUM CONVERSIONS
// =============================================================================

fn to_taffy_flex_direction(dir: FlexDirection) -> TaffyFlexDirection {
    match dir {
        FlexDirection::Row => TaffyFlexDirection::Row,
        FlexDirection::RowReverse => TaffyFlexDirection::RowReverse,
        FlexDirection::Column => TaffyFlexDirection::Column,
        FlexDirection::ColumnReverse => TaffyFlexDirection::ColumnReverse,
    }
}

fn to_taffy_justify_content(arrangement: Arrangement) -> TaffyJustifyContent {
    match arrangement {
        Arrangement::Start => TaffyJustifyContent::FlexStart,
        Arrangement::End => TaffyJustifyContent::FlexEnd,
        Arrangement::Center => TaffyJustifyContent::Center,
        Arrangement::SpaceBetween => TaffyJustifyContent::SpaceBetween,
        Arrangement::SpaceAround => TaffyJustifyContent::SpaceAround,
        Arrangement::SpaceEvenly => TaffyJustifyContent::SpaceEvenly,
        Arrangement::SpacedBy { alignment, .. } => match alignment {
            Alignment::Start => TaffyJustifyContent::FlexStart,
            Alignment::Center => TaffyJustifyContent::Center,
            Alignment::End => TaffyJustifyContent::FlexEnd,
        },
    }
}

fn to_taffy_align_content(arrangement: Arrangement) -> TaffyAlignContent {
    match arrangement {
        Arrangement::Start => TaffyAlignContent::FlexStart,
        Arrangement::End => TaffyAlignContent::FlexEnd,
        Arrangement::Center => TaffyAlignContent::Center,
        Arrangement::SpaceBetween => TaffyAlignContent::SpaceBetween,
        Arrangement::SpaceAround => TaffyAlignContent::SpaceAround,
        Arrangement::SpaceEvenly => TaffyAlignContent::SpaceEvenly,
        Arrangement::SpacedBy { alignment, .. } => match alignment {
            Alignment::Start => TaffyAlignContent::FlexStart,
            Alignment::Center => TaffyAlignContent::Center,
            Alignment::End => TaffyAlignContent::FlexEnd,
        },
    }
}

fn to_taffy_align_items(alignment: CrossAlignment) -> TaffyAlignItems {
    match alignment {
        CrossAlignment::Start => TaffyAlignItems::FlexStart,
        CrossAlignment::Center => TaffyAlignItems::Center,
        CrossAlignment::End => TaffyAlignItems::FlexEnd,
        CrossAlignment::Stretch => TaffyAlignItems::Stretch,
    }
}

fn to_taffy_max(value: i32) -> TaffyDimension {
    if value == Constraints::UNBOUNDED {
        TaffyDimension::Auto
    } else {
        TaffyDimension::Length(value as f32)
    }
}

fn to_available(value: i32) -> AvailableSpace {
    if value == Constraints::UNBOUNDED {
        AvailableSpace::MaxContent
    } else {
        AvailableSpace::Definite(value as f32)
    }
}

// =============================================================================
// STYLE BUILDING
// =============================================================================

fn build_container_style(config: &FlowConfig, constraints: &Constraints) -> Style {
    let horizontal_gap = config.horizontal_arrangement.spacing() as f32;
    let vertical_gap = config.vertical_arrangement.spacing() as f32;

    Style {
        display: Display::Flex,
        flex_direction: to_taffy_flex_direction(config.direction),
        flex_wrap: FlexWrap::Wrap,
        justify_content: Some(to_taffy_justify_content(config.main_arrangement())),
        align_content: Some(to_taffy_align_content(config.cross_arrangement())),
        align_items: Some(to_taffy_align_items(config.item_alignment)),
        gap: Size {
            width: LengthPercentage::Length(horizontal_gap),
            height: LengthPercentage::Length(vertical_gap),
        },
        min_size: Size {
            width: TaffyDimension::Length(constraints.min_width as f32),
            height: TaffyDimension::Length(constraints.min_height as f32),
        },
        max_size: Size {
            width: to_taffy_max(constraints.max_width),
            height: to_taffy_max(constraints.max_height),
        },
        ..Default::default()
    }
}

fn build_item_style(item: &MeasuredItem, direction: FlexDirection) -> Style {
    let size = direction.join_size(item.main, item.cross);
    Style {
        size: Size {
            width: TaffyDimension::Length(size.width as f32),
            height: TaffyDimension::Length(size.height as f32),
        },
        flex_shrink: 0.0,
        ..Default::default()
    }
}

// =============================================================================
// MAIN ENTRY POINT
// =============================================================================

/// Lay `items` out with Taffy.
///
/// Rejects configurations with `max_lines` or `max_items_in_each_line` set,
/// which Taffy cannot express.
pub fn compute_taffy_layout(
    items: &[MeasuredItem],
    config: &FlowConfig,
    constraints: &Constraints,
) -> Result<Vec<ItemPlacement>, LayoutError> {
    config.validate()?;
    constraints.validate()?;
    if config.max_lines != usize::MAX {
        return Err(LayoutError::Unsupported("max_lines"));
    }
    if config.max_items_in_each_line != usize::MAX {
        return Err(LayoutError::Unsupported("max_items_in_each_line"));
    }

    let taffy_err = |e: taffy::TaffyError| LayoutError::Taffy(e.to_string());

    let mut tree: TaffyTree<()> = TaffyTree::new();
    let children: Vec<NodeId> = items
        .iter()
        .map(|item| tree.new_leaf(build_item_style(item, config.direction)))
        .collect::<Result<_, _>>()
        .map_err(taffy_err)?;

    let root = tree
        .new_with_children(build_container_style(config, constraints), &children)
        .map_err(taffy_err)?;

    let available = Size {
        width: to_available(constraints.max_width),
        height: to_available(constraints.max_height),
    };
    tree.compute_layout(root, available).map_err(taffy_err)?;

    let direction = config.direction;
    let mut placements: Vec<ItemPlacement> = Vec::with_capacity(items.len());
    let mut line = 0;
    // (start, end) of the previous item along the main axis
    let mut previous: Option<(i32, i32)> = None;

    for (item, &node) in items.iter().zip(&children) {
        let layout = tree.layout(node).map_err(taffy_err)?;
        let offset = int_offset(
            layout.location.x.round() as i32,
            layout.location.y.round() as i32,
        );
        let size = int_size(
            layout.size.width.round() as i32,
            layout.size.height.round() as i32,
        );

        // Taffy does not report line membership. Within a line items advance
        // monotonically along the main axis, so a step backwards starts a new one.
        let main_start = if direction.is_row() { offset.x } else { offset.y };
        let main_end = main_start + direction.split_size(size).0;
        if let Some((previous_start, previous_end)) = previous {
            let wrapped = if direction.is_reverse() {
                main_end > previous_start
            } else {
                main_start < previous_end
            };
            if wrapped {
                line += 1;
            }
        }
        previous = Some((main_start, main_end));

        placements.push(ItemPlacement {
            key: item.key,
            line,
            offset,
            size,
        });
    }

    Ok(placements)
}
