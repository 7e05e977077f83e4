//! Export benchmarks.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use distill_core::{Color, Effect, EffectType, ExportOptions, LayoutMode, Paint, RawNode};
use distill_transform::{export, export_json};

const SIMPLE_NODE: &str = r#"{
  "id": "1:1", "name": "Button", "type": "FRAME",
  "width": 120, "height": 40, "cornerRadius": 8,
  "layoutMode": "HORIZONTAL", "paddingTop": 8, "paddingRight": 16,
  "paddingBottom": 8, "paddingLeft": 16,
  "fills": [{"type": "SOLID", "color": {"r": 0.23, "g": 0.51, "b": 0.96}}],
  "children": [{"id": "1:2", "name": "Label", "type": "TEXT", "characters": "Buy",
                "fontName": {"family": "Inter", "style": "Medium"}, "fontSize": 14}]
}"#;

/// A page of `sections` vertical sections, each a row of product cards.
fn synthetic_page(sections: usize, cards: usize) -> RawNode {
    let card = |s: usize, c: usize| {
        RawNode::new(format!("{}:{}", s, c), "Product Card", "FRAME")
            .with_size(240.0, 320.0)
            .with_radius(12.0)
            .with_layout(LayoutMode::Vertical)
            .with_gap(8.0)
            .with_padding(16.0, 16.0, 16.0, 16.0)
            .with_fill(Paint::solid(Color::rgb(1.0, 1.0, 1.0)))
            .with_effect(Effect::shadow(EffectType::DropShadow, 0.0, 4.0, 12.0, None))
            .with_child(RawNode::new(format!("{}:{}:img", s, c), "Photo", "RECTANGLE")
                .with_size(208.0, 156.0)
                .with_fill(Paint::image("hash", distill_core::ScaleMode::Fill)))
            .with_child(RawNode::new(format!("{}:{}:t", s, c), "Title", "TEXT")
                .with_text(format!("Product {}", c))
                .with_fill(Paint::solid(Color::rgb(0.1, 0.1, 0.1))))
    };
    let section = |s: usize| {
        RawNode::new(format!("{}", s), "Featured Products", "FRAME")
            .with_size(1280.0, 360.0)
            .with_layout(LayoutMode::Horizontal)
            .with_gap(16.0)
            .with_children((0..cards).map(|c| card(s, c)))
    };
    RawNode::new("0", "Home / Desktop", "FRAME")
        .with_size(1440.0, 3000.0)
        .with_layout(LayoutMode::Vertical)
        .with_children((0..sections).map(section))
}

fn export_simple(c: &mut Criterion) {
    c.bench_function("export_simple_json", |b| {
        b.iter(|| export_json(black_box(SIMPLE_NODE), ""))
    });
}

fn export_page(c: &mut Criterion) {
    let page = synthetic_page(20, 12);
    let options = ExportOptions::default();
    c.bench_function("export_page", |b| {
        b.iter(|| export(Some(black_box(&page)), &options))
    });
}

criterion_group!(benches, export_simple, export_page);
criterion_main!(benches);
