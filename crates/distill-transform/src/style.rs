//! Paint, stroke, and effect extractors.
//!
//! Each extractor reads one raw node and returns an optional output
//! fragment. Colors and shadows go through the token registry so repeated
//! values collapse to a single `$id` reference.

use crate::geometry::affine;
use distill_core::{
    round_to, uniform, Background, Border, BorderStyle, Color, ColorStop, EffectType, Gradient,
    GradientKind, Num, Overflow, Paint, PaintType, RawNode, TokenKind, TokenRegistry,
};

/// Color used for a shadow that does not declare one.
const DEFAULT_SHADOW_COLOR: Color = Color::rgba(0.0, 0.0, 0.0, 0.1);

/// Dash segments at or below this length read as dots.
const DOT_LENGTH: f64 = 2.0;

/// Background from the first visible fill.
///
/// Image fills are rendered by the image node and yield no background.
pub fn background(node: &RawNode, tokens: &mut TokenRegistry) -> Option<Background> {
    let paint = node.visible_fills().next()?;
    match paint.paint_type {
        PaintType::Solid => {
            let color = paint.color?;
            Some(Background::Color(
                tokens.emit(TokenKind::Color, &color.to_css(paint.opacity())),
            ))
        }
        kind if kind.is_gradient() => gradient(paint, tokens).map(Background::Gradient),
        _ => None,
    }
}

fn gradient(paint: &Paint, tokens: &mut TokenRegistry) -> Option<Gradient> {
    if paint.gradient_stops.is_empty() {
        return None;
    }
    let kind = match paint.paint_type {
        PaintType::GradientLinear => GradientKind::Linear,
        PaintType::GradientAngular => GradientKind::Conic,
        _ => GradientKind::Radial,
    };
    let stops = paint
        .gradient_stops
        .iter()
        .map(|stop| ColorStop {
            position: Num::dec2(stop.position),
            color: tokens.emit(TokenKind::Color, &stop.color.to_css(paint.opacity())),
        })
        .collect();

    Some(Gradient {
        kind,
        stops,
        angle: paint.gradient_transform.as_ref().and_then(gradient_angle),
    })
}

/// Rotation of the gradient's x axis in whole degrees; `None` when zero.
pub fn gradient_angle(transform: &distill_core::Transform2D) -> Option<Num> {
    let x_axis = affine(transform).matrix2.x_axis;
    let degrees = round_to(x_axis.y.atan2(x_axis.x).to_degrees(), 0);
    (degrees != 0.0).then_some(Num(degrees))
}

/// Border from the first visible solid stroke with a non-zero weight.
///
/// The solid style is implied and only written when `keep_defaults` is set.
pub fn border(node: &RawNode, tokens: &mut TokenRegistry, keep_defaults: bool) -> Option<Border> {
    let weight = *uniform(&node.stroke_weight)?;
    if weight <= 0.0 {
        return None;
    }
    let stroke = node
        .visible_strokes()
        .find(|p| p.paint_type == PaintType::Solid)?;
    let color = stroke.color?;

    let style = dash_style(&node.dash_pattern);
    Some(Border {
        width: Num::dec2(weight),
        color: tokens.emit(TokenKind::Color, &color.to_css(stroke.opacity())),
        style: (style != BorderStyle::Solid || keep_defaults).then_some(style),
    })
}

/// Line style implied by a dash pattern.
///
/// Two equal segments read as dashes whatever their length; otherwise a
/// segment at or below [`DOT_LENGTH`] reads as dots.
pub fn dash_style(pattern: &[f64]) -> BorderStyle {
    if pattern.is_empty() {
        BorderStyle::Solid
    } else if matches!(pattern, [dash, gap] if dash == gap) {
        BorderStyle::Dashed
    } else if pattern.iter().any(|segment| *segment <= DOT_LENGTH) {
        BorderStyle::Dotted
    } else {
        BorderStyle::Dashed
    }
}

/// All visible drop and inner shadows, composed into one CSS value.
pub fn shadow(node: &RawNode, tokens: &mut TokenRegistry) -> Option<String> {
    let layers: Vec<String> = node
        .visible_effects()
        .filter(|e| e.is_shadow())
        .map(|e| {
            let offset = e.offset.unwrap_or_default();
            let color = e.color.unwrap_or(DEFAULT_SHADOW_COLOR).to_css(1.0);
            format!(
                "{}{}px {}px {}px {}px {}",
                if e.effect_type == EffectType::InnerShadow { "inset " } else { "" },
                Num::dec2(offset.x),
                Num::dec2(offset.y),
                Num::dec2(e.radius),
                Num::dec2(e.spread.unwrap_or(0.0)),
                color,
            )
        })
        .collect();

    if layers.is_empty() {
        return None;
    }
    Some(tokens.emit(TokenKind::Shadow, &layers.join(", ")))
}

/// Layer blur and background blur radii.
pub fn blurs(node: &RawNode) -> (Option<Num>, Option<Num>) {
    let radius = |kind: EffectType| {
        node.visible_effects()
            .find(|e| e.effect_type == kind && e.radius > 0.0)
            .map(|e| Num::dec2(e.radius))
    };
    (radius(EffectType::LayerBlur), radius(EffectType::BackgroundBlur))
}

/// Node opacity, omitted when fully opaque.
pub fn opacity(node: &RawNode) -> Option<Num> {
    let value = round_to(node.opacity?.clamp(0.0, 1.0), 2);
    (value < 1.0).then_some(Num(value))
}

/// Rotation in whole degrees, omitted when zero.
pub fn rotation(node: &RawNode) -> Option<Num> {
    let degrees = round_to(node.rotation?, 0);
    (degrees != 0.0).then_some(Num(degrees))
}

/// CSS blend mode name, omitted for the pass-through modes.
pub fn blend(node: &RawNode) -> Option<String> {
    let mode = node.blend_mode.as_deref()?;
    match mode {
        "NORMAL" | "PASS_THROUGH" => None,
        other => Some(other.to_ascii_lowercase().replace('_', "-")),
    }
}

pub fn overflow(node: &RawNode) -> Option<Overflow> {
    node.clips_content.unwrap_or(false).then_some(Overflow::Hidden)
}

#[cfg(test)]
mod tests {
    use super::*;
    use distill_core::{Effect, GradientStop};

    fn rect() -> RawNode {
        RawNode::new("1", "Rect", "RECTANGLE").with_size(100.0, 40.0)
    }

    #[test]
    fn test_solid_background_interned() {
        let mut tokens = TokenRegistry::new();
        let node = rect().with_fill(Paint::solid(Color::from_rgb8(59, 130, 246)));
        assert_eq!(background(&node, &mut tokens), Some(Background::Color("$c0".into())));
        assert_eq!(tokens.drain().colors["c0"], "#3B82F6");
    }

    #[test]
    fn test_translucent_background_is_rgba() {
        let mut tokens = TokenRegistry::with_extraction(false);
        let node = rect().with_fill(Paint::solid(Color::rgb(0.0, 0.0, 0.0)).with_opacity(0.5));
        assert_eq!(
            background(&node, &mut tokens),
            Some(Background::Color("rgba(0,0,0,0.50)".into()))
        );
    }

    #[test]
    fn test_hidden_and_image_fills_yield_nothing() {
        let mut tokens = TokenRegistry::new();
        let hidden = rect().with_fill(Paint::solid(Color::rgb(1.0, 0.0, 0.0)).hidden());
        assert_eq!(background(&hidden, &mut tokens), None);

        let image = rect().with_fill(Paint::image("abc", distill_core::ScaleMode::Fill));
        assert_eq!(background(&image, &mut tokens), None);
        assert!(tokens.is_empty());
    }

    #[test]
    fn test_linear_gradient_with_angle() {
        let mut tokens = TokenRegistry::with_extraction(false);
        let mut paint = Paint::gradient(
            PaintType::GradientLinear,
            vec![
                GradientStop { position: 0.0, color: Color::rgb(1.0, 1.0, 1.0) },
                GradientStop { position: 0.333, color: Color::rgb(0.0, 0.0, 0.0) },
            ],
        );
        paint.gradient_transform = Some([[0.0, 1.0, 0.0], [1.0, 0.0, 0.0]]);
        let node = rect().with_fill(paint);

        let Some(Background::Gradient(g)) = background(&node, &mut tokens) else {
            panic!("expected a gradient");
        };
        assert_eq!(g.kind, GradientKind::Linear);
        assert_eq!(g.stops[1].position, Num(0.33));
        assert_eq!(g.stops[0].color, "#FFFFFF");
        assert_eq!(g.angle, Some(Num(90.0)));
    }

    #[test]
    fn test_identity_gradient_omits_angle() {
        assert_eq!(gradient_angle(&[[1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]), None);
    }

    #[test]
    fn test_angular_gradient_is_conic() {
        let mut tokens = TokenRegistry::new();
        let paint = Paint::gradient(
            PaintType::GradientAngular,
            vec![GradientStop { position: 0.0, color: Color::rgb(1.0, 0.0, 0.0) }],
        );
        let Some(Background::Gradient(g)) = background(&rect().with_fill(paint), &mut tokens) else {
            panic!("expected a gradient");
        };
        assert_eq!(g.kind, GradientKind::Conic);
    }

    #[test]
    fn test_border_styles() {
        assert_eq!(dash_style(&[]), BorderStyle::Solid);
        assert_eq!(dash_style(&[4.0, 4.0]), BorderStyle::Dashed);
        assert_eq!(dash_style(&[2.0, 2.0]), BorderStyle::Dashed);
        assert_eq!(dash_style(&[1.0, 1.0]), BorderStyle::Dashed);
        assert_eq!(dash_style(&[1.0, 3.0]), BorderStyle::Dotted);
        assert_eq!(dash_style(&[8.0, 3.0, 1.0]), BorderStyle::Dotted);
        assert_eq!(dash_style(&[8.0, 4.0]), BorderStyle::Dashed);
    }

    #[test]
    fn test_border_requires_weight() {
        let mut tokens = TokenRegistry::with_extraction(false);
        let node = rect().with_stroke(Paint::solid(Color::rgb(0.0, 0.0, 0.0)), 0.0);
        assert_eq!(border(&node, &mut tokens, false), None);

        let node = rect().with_stroke(Paint::solid(Color::rgb(0.0, 0.0, 0.0)), 1.0);
        let bd = border(&node, &mut tokens, false).unwrap();
        assert_eq!(bd.width, Num(1.0));
        assert_eq!(bd.color, "#000000");
        assert_eq!(bd.style, None);
        assert_eq!(border(&node, &mut tokens, true).unwrap().style, Some(BorderStyle::Solid));
    }

    #[test]
    fn test_two_shadows_compose_one_token() {
        let mut tokens = TokenRegistry::new();
        let node = rect()
            .with_effect(Effect::shadow(EffectType::DropShadow, 0.0, 4.0, 6.0, None))
            .with_effect(
                Effect::shadow(EffectType::InnerShadow, 0.0, 1.0, 2.0, Some(Color::rgb(1.0, 1.0, 1.0)))
                    .with_spread(1.0),
            );
        assert_eq!(shadow(&node, &mut tokens), Some("$s0".into()));
        let dict = tokens.drain();
        assert_eq!(
            dict.shadows["s0"],
            "0px 4px 6px 0px rgba(0,0,0,0.10), inset 0px 1px 2px 1px #FFFFFF"
        );
    }

    #[test]
    fn test_blurs() {
        let node = rect()
            .with_effect(Effect::blur(EffectType::LayerBlur, 4.0))
            .with_effect(Effect::blur(EffectType::BackgroundBlur, 20.0));
        assert_eq!(blurs(&node), (Some(Num(4.0)), Some(Num(20.0))));
        assert_eq!(blurs(&rect()), (None, None));
    }

    #[test]
    fn test_default_omission() {
        let mut node = rect();
        node.opacity = Some(1.0);
        node.blend_mode = Some("PASS_THROUGH".into());
        node.clips_content = Some(false);
        node.rotation = Some(0.2);
        assert_eq!(opacity(&node), None);
        assert_eq!(blend(&node), None);
        assert_eq!(overflow(&node), None);
        assert_eq!(rotation(&node), None);

        node.opacity = Some(0.456);
        node.blend_mode = Some("COLOR_BURN".into());
        node.clips_content = Some(true);
        node.rotation = Some(-45.0);
        assert_eq!(opacity(&node), Some(Num(0.46)));
        assert_eq!(blend(&node).as_deref(), Some("color-burn"));
        assert_eq!(overflow(&node), Some(Overflow::Hidden));
        assert_eq!(rotation(&node), Some(Num(-45.0)));
    }
}
