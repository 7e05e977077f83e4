//! Text node content and rich-text runs.
//!
//! Style fields reported as `"mixed"` are left out rather than guessed;
//! the per-run list then carries the actual values.

use distill_core::{
    uniform, Case, Decoration, FontName, Measure, MeasureUnit, Num, Paint, PaintType, RawNode, Spacing,
    TextAlign, TextAlignOut, TextCase, TextContent, TextDecoration, TextRun, TextSegment, TextTruncation,
    TokenKind, TokenRegistry,
};

/// Weight keywords found in font style names, longest first.
const WEIGHT_KEYWORDS: &[(&str, u16)] = &[
    ("extralight", 200),
    ("ultralight", 200),
    ("semibold", 600),
    ("demibold", 600),
    ("extrabold", 800),
    ("ultrabold", 800),
    ("hairline", 100),
    ("thin", 100),
    ("light", 300),
    ("regular", 400),
    ("normal", 400),
    ("book", 400),
    ("medium", 500),
    ("bold", 700),
    ("black", 900),
    ("heavy", 900),
];

/// Numeric weight implied by a style name such as `"Semi Bold Italic"`.
pub fn weight_from_style(style: &str) -> Option<u16> {
    let compact: String = style
        .chars()
        .filter(|c| c.is_alphanumeric())
        .collect::<String>()
        .to_lowercase();
    WEIGHT_KEYWORDS
        .iter()
        .find(|(keyword, _)| compact.contains(keyword))
        .map(|(_, weight)| *weight)
}

fn is_italic(style: &str) -> bool {
    let style = style.to_lowercase();
    style.contains("italic") || style.contains("oblique")
}

/// Color of the first visible solid fill.
fn fill_color(fills: &[Paint], tokens: &mut TokenRegistry) -> Option<String> {
    fills
        .iter()
        .filter(|p| p.is_visible() && p.paint_type == PaintType::Solid)
        .find_map(|p| p.color.map(|c| c.to_css(p.opacity())))
        .map(|css| tokens.emit(TokenKind::Color, &css))
}

fn spacing(measure: &Measure) -> Option<Spacing> {
    let value = measure.value?;
    match measure.unit {
        MeasureUnit::Pixels => Some(Spacing::Px(Num::dec2(value))),
        MeasureUnit::Percent => Some(Spacing::Percent(Num::dec2(value))),
        MeasureUnit::Auto => None,
    }
}

fn decoration(value: TextDecoration) -> Option<Decoration> {
    match value {
        TextDecoration::Underline => Some(Decoration::Underline),
        TextDecoration::Strikethrough => Some(Decoration::LineThrough),
        TextDecoration::None => None,
    }
}

fn case(value: TextCase) -> Option<Case> {
    match value {
        TextCase::Upper => Some(Case::Upper),
        TextCase::Lower => Some(Case::Lower),
        TextCase::Title => Some(Case::Title),
        TextCase::SmallCaps | TextCase::SmallCapsForced => Some(Case::SmallCaps),
        TextCase::Original => None,
    }
}

fn align(value: TextAlign) -> Option<TextAlignOut> {
    match value {
        TextAlign::Left => None,
        TextAlign::Center => Some(TextAlignOut::Center),
        TextAlign::Right => Some(TextAlignOut::Right),
        TextAlign::Justified => Some(TextAlignOut::Justify),
    }
}

fn weight(explicit: Option<f64>, font: Option<&FontName>) -> Option<Num> {
    explicit
        .or_else(|| font.and_then(|f| weight_from_style(&f.style)).map(f64::from))
        .map(Num::px)
}

/// Text payload of a text node.
pub fn text_content(node: &RawNode, tokens: &mut TokenRegistry) -> TextContent {
    let font = uniform(&node.font_name);
    let letter_spacing = uniform(&node.letter_spacing)
        .and_then(spacing)
        .filter(|s| !matches!(s, Spacing::Px(Num(v)) | Spacing::Percent(Num(v)) if *v == 0.0));

    let mut content = TextContent {
        txt: node.characters.clone().unwrap_or_default(),
        font: font.map(|f| tokens.emit(TokenKind::Font, &f.family)),
        size: uniform(&node.font_size).copied().map(Num::dec2),
        weight: weight(uniform(&node.font_weight).copied(), font),
        italic: font.filter(|f| is_italic(&f.style)).map(|_| true),
        color: fill_color(&node.fills, tokens),
        line_height: uniform(&node.line_height).and_then(spacing),
        letter_spacing,
        align: node.text_align_horizontal.and_then(align),
        decoration: uniform(&node.text_decoration).copied().and_then(decoration),
        case: uniform(&node.text_case).copied().and_then(case),
        trunc: (node.text_truncation == Some(TextTruncation::Ending)).then_some(true),
        lines: node.max_lines.filter(|n| *n > 0),
        runs: Vec::new(),
    };

    if distinct_styles(&node.styled_segments) > 1 {
        content.runs = node
            .styled_segments
            .iter()
            .map(|segment| text_run(segment, tokens))
            .collect();
    }
    content
}

/// Number of distinct styles among the segments.
fn distinct_styles(segments: &[TextSegment]) -> usize {
    let mut seen: Vec<TextSegment> = Vec::new();
    for segment in segments {
        let style = TextSegment {
            characters: String::new(),
            ..segment.clone()
        };
        if !seen.contains(&style) {
            seen.push(style);
        }
    }
    seen.len()
}

fn text_run(segment: &TextSegment, tokens: &mut TokenRegistry) -> TextRun {
    let font = segment.font_name.as_ref();
    let decoration = segment.text_decoration;
    TextRun {
        txt: segment.characters.clone(),
        font: font.map(|f| tokens.emit(TokenKind::Font, &f.family)),
        size: segment.font_size.map(Num::dec2),
        weight: weight(segment.font_weight, font),
        color: fill_color(&segment.fills, tokens),
        italic: font.filter(|f| is_italic(&f.style)).map(|_| true),
        underline: (decoration == Some(TextDecoration::Underline)).then_some(true),
        strike: (decoration == Some(TextDecoration::Strikethrough)).then_some(true),
        href: segment
            .hyperlink
            .as_ref()
            .filter(|link| link.link_type == "URL")
            .map(|link| link.value.clone()),
    }
}
