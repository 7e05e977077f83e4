//! Sizing, corner radius, padding, auto-layout, and placement extractors.

use distill_core::{
    uniform, Align, AxisAlign, Dimension, Direction, Edges, LayoutBlock, LayoutMode, LayoutPositioning,
    LayoutSizing, LayoutWrap, Num, RawNode, Transform2D, ZOrder,
};
use glam::{DAffine2, DVec2};

/// Paint transform `[[a, b, tx], [c, d, ty]]` as an affine map.
pub fn affine(m: &Transform2D) -> DAffine2 {
    DAffine2::from_cols(
        DVec2::new(m[0][0], m[1][0]),
        DVec2::new(m[0][1], m[1][1]),
        DVec2::new(m[0][2], m[1][2]),
    )
}

/// Collapse four per-side values: all zero is nothing, all equal is one number.
pub fn collapse_edges(values: [f64; 4]) -> Option<Edges> {
    if values.iter().all(|v| *v == 0.0) {
        return None;
    }
    if values.iter().all(|v| *v == values[0]) {
        return Some(Edges::Uniform(Num::dec2(values[0])));
    }
    Some(Edges::Sides(values.map(Num::dec2)))
}

/// Corner radius, uniform or `[tl, tr, br, bl]`.
pub fn radius(node: &RawNode) -> Option<Edges> {
    let fallback = uniform(&node.corner_radius).copied().unwrap_or(0.0);
    let corners = [
        node.top_left_radius,
        node.top_right_radius,
        node.bottom_right_radius,
        node.bottom_left_radius,
    ]
    .map(|corner| corner.unwrap_or(fallback).max(0.0));
    collapse_edges(corners)
}

/// Padding, uniform or `[top, right, bottom, left]`.
pub fn padding(node: &RawNode) -> Option<Edges> {
    collapse_edges([
        node.padding_top,
        node.padding_right,
        node.padding_bottom,
        node.padding_left,
    ])
}

/// Output width and height: pixels, or the symbolic sizing mode.
pub fn dimensions(node: &RawNode) -> (Dimension, Dimension) {
    let resolve = |sizing: LayoutSizing, value: f64| match sizing {
        LayoutSizing::Hug => Dimension::Hug,
        LayoutSizing::Fill => Dimension::Fill,
        LayoutSizing::Fixed => Dimension::Px(Num::px(value)),
    };
    (
        resolve(node.horizontal_sizing(), node.width),
        resolve(node.vertical_sizing(), node.height),
    )
}

fn align(value: AxisAlign) -> Align {
    match value {
        AxisAlign::Min => Align::Start,
        AxisAlign::Center => Align::Center,
        AxisAlign::Max => Align::End,
        AxisAlign::SpaceBetween => Align::Between,
        AxisAlign::Baseline => Align::Baseline,
    }
}

/// Auto-layout block, only for nodes with a layout mode.
///
/// `start` alignment and `wrap: false` are the defaults and are left out
/// unless `keep_defaults` is set.
pub fn layout(node: &RawNode, keep_defaults: bool) -> Option<LayoutBlock> {
    let dir = match node.layout_mode {
        LayoutMode::Horizontal => Direction::Row,
        LayoutMode::Vertical => Direction::Col,
        LayoutMode::None => return None,
    };
    let keep = |a: Align| (a != Align::Start || keep_defaults).then_some(a);
    let wraps = node.layout_wrap == Some(LayoutWrap::Wrap);

    Some(LayoutBlock {
        dir,
        gap: (node.item_spacing != 0.0).then(|| Num::dec2(node.item_spacing)),
        pad: padding(node),
        main: keep(node.primary_axis_align_items.map_or(Align::Start, align)),
        cross: keep(node.counter_axis_align_items.map_or(Align::Start, align)),
        wrap: (wraps || keep_defaults).then_some(wraps),
        row_gap: node
            .counter_axis_spacing
            .filter(|gap| wraps && *gap != 0.0)
            .map(Num::dec2),
    })
}

/// Rounded position, only for children flagged absolute by their parent's layout.
pub fn absolute_position(node: &RawNode) -> Option<(Num, Num)> {
    (node.layout_positioning == Some(LayoutPositioning::Absolute))
        .then(|| (Num::px(node.x), Num::px(node.y)))
}

/// Sibling position hint for the `index`-th of `count` emitted siblings.
pub fn z_order(index: usize, count: usize, keep_defaults: bool) -> Option<ZOrder> {
    if count <= 1 {
        return None;
    }
    let flag = |set: bool| (set || keep_defaults).then_some(set);
    Some(ZOrder {
        order: index,
        is_first: flag(index == 0),
        is_last: flag(index + 1 == count),
    })
}

/// Geometry the output cannot carry; such a node aborts the export.
pub fn non_finite_field(node: &RawNode) -> Option<&'static str> {
    [
        ("x", node.x),
        ("y", node.y),
        ("width", node.width),
        ("height", node.height),
    ]
    .into_iter()
    .find(|(_, v)| !v.is_finite())
    .map(|(name, _)| name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use distill_core::{AxisSizingMode, Mixable};

    fn frame() -> RawNode {
        RawNode::new("1", "Frame", "FRAME").with_size(320.0, 200.0)
    }

    #[test]
    fn test_padding_collapse() {
        assert_eq!(padding(&frame()), None);
        assert_eq!(
            padding(&frame().with_padding(16.0, 16.0, 16.0, 16.0)),
            Some(Edges::Uniform(Num(16.0)))
        );
        assert_eq!(
            padding(&frame().with_padding(8.0, 16.0, 8.0, 16.0)),
            Some(Edges::Sides([Num(8.0), Num(16.0), Num(8.0), Num(16.0)]))
        );
    }

    #[test]
    fn test_radius_uniform_and_per_corner() {
        assert_eq!(radius(&frame()), None);
        assert_eq!(radius(&frame().with_radius(8.0)), Some(Edges::Uniform(Num(8.0))));

        let mut node = frame();
        node.corner_radius = Some(Mixable::Mixed);
        node.top_left_radius = Some(12.0);
        node.top_right_radius = Some(12.0);
        node.bottom_right_radius = Some(0.0);
        node.bottom_left_radius = Some(0.0);
        assert_eq!(
            radius(&node),
            Some(Edges::Sides([Num(12.0), Num(12.0), Num(0.0), Num(0.0)]))
        );
    }

    #[test]
    fn test_dimensions_follow_own_direction() {
        let mut node = frame().with_layout(LayoutMode::Vertical);
        node.primary_axis_sizing_mode = Some(AxisSizingMode::Auto);
        node.counter_axis_sizing_mode = Some(AxisSizingMode::Fixed);
        assert_eq!(dimensions(&node), (Dimension::Px(Num(320.0)), Dimension::Hug));

        node.layout_sizing_horizontal = Some(LayoutSizing::Fill);
        assert_eq!(dimensions(&node).0, Dimension::Fill);

        let plain = frame().with_size(99.6, 40.2);
        assert_eq!(dimensions(&plain), (Dimension::Px(Num(100.0)), Dimension::Px(Num(40.0))));
    }

    #[test]
    fn test_layout_only_for_auto_layout() {
        assert_eq!(layout(&frame(), false), None);

        let mut node = frame()
            .with_layout(LayoutMode::Horizontal)
            .with_gap(12.0)
            .with_padding(4.0, 4.0, 4.0, 4.0);
        node.primary_axis_align_items = Some(AxisAlign::SpaceBetween);
        node.counter_axis_align_items = Some(AxisAlign::Min);

        let block = layout(&node, false).unwrap();
        assert_eq!(block.dir, Direction::Row);
        assert_eq!(block.gap, Some(Num(12.0)));
        assert_eq!(block.pad, Some(Edges::Uniform(Num(4.0))));
        assert_eq!(block.main, Some(Align::Between));
        assert_eq!(block.cross, None);
        assert_eq!(block.wrap, None);

        let verbose = layout(&node, true).unwrap();
        assert_eq!(verbose.cross, Some(Align::Start));
        assert_eq!(verbose.wrap, Some(false));
    }

    #[test]
    fn test_wrap_row_gap() {
        let mut node = frame().with_layout(LayoutMode::Horizontal).with_wrap();
        node.counter_axis_spacing = Some(24.0);
        let block = layout(&node, false).unwrap();
        assert_eq!(block.wrap, Some(true));
        assert_eq!(block.row_gap, Some(Num(24.0)));
    }

    #[test]
    fn test_absolute_position() {
        let mut node = frame().with_position(10.4, 20.6);
        assert_eq!(absolute_position(&node), None);
        node.layout_positioning = Some(LayoutPositioning::Absolute);
        assert_eq!(absolute_position(&node), Some((Num(10.0), Num(21.0))));
    }

    #[test]
    fn test_z_order() {
        assert_eq!(z_order(0, 1, false), None);
        assert_eq!(
            z_order(0, 3, false),
            Some(ZOrder { order: 0, is_first: Some(true), is_last: None })
        );
        assert_eq!(
            z_order(2, 3, false),
            Some(ZOrder { order: 2, is_first: None, is_last: Some(true) })
        );
        assert_eq!(
            z_order(1, 3, true),
            Some(ZOrder { order: 1, is_first: Some(false), is_last: Some(false) })
        );
    }

    #[test]
    fn test_affine_columns() {
        let a = affine(&[[0.5, 0.0, 0.25], [0.0, 0.8, 0.1]]);
        assert_eq!(a.matrix2.x_axis, DVec2::new(0.5, 0.0));
        assert_eq!(a.matrix2.y_axis, DVec2::new(0.0, 0.8));
        assert_eq!(a.translation, DVec2::new(0.25, 0.1));
    }

    #[test]
    fn test_non_finite_geometry() {
        assert_eq!(non_finite_field(&frame()), None);
        assert_eq!(non_finite_field(&frame().with_size(f64::NAN, 1.0)), Some("width"));
    }
}
