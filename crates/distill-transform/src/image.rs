//! Image node content: fit mode, crop rectangle, and aspect ratio.

use crate::geometry::affine;
use distill_core::{AspectRatio, CropRect, ImageContent, ImageFit, Num, Paint, RawNode, ScaleMode, Thresholds};

/// Common aspect ratios a measured ratio snaps to.
const COMMON_RATIOS: &[(&str, f64)] = &[
    ("1:1", 1.0),
    ("4:3", 4.0 / 3.0),
    ("3:4", 3.0 / 4.0),
    ("16:9", 16.0 / 9.0),
    ("9:16", 9.0 / 16.0),
    ("3:2", 3.0 / 2.0),
    ("2:3", 2.0 / 3.0),
    ("21:9", 21.0 / 9.0),
];

pub fn fit(mode: ScaleMode) -> ImageFit {
    match mode {
        ScaleMode::Fill => ImageFit::Cover,
        ScaleMode::Fit => ImageFit::Contain,
        ScaleMode::Stretch | ScaleMode::Crop => ImageFit::Fill,
        ScaleMode::Tile => ImageFit::Repeat,
    }
}

/// Visible region of the source image, when the paint transform crops it.
pub fn crop(paint: &Paint, tolerance: f64) -> Option<CropRect> {
    let transform = affine(paint.image_transform.as_ref()?);
    let scale = glam::DVec2::new(transform.matrix2.x_axis.x, transform.matrix2.y_axis.y);
    let offset = transform.translation;

    let cropped = (scale.x - 1.0).abs() > tolerance
        || (scale.y - 1.0).abs() > tolerance
        || offset.x.abs() > tolerance
        || offset.y.abs() > tolerance;

    cropped.then(|| CropRect {
        x: Num::dec2(offset.x),
        y: Num::dec2(offset.y),
        w: Num::dec2(scale.x),
        h: Num::dec2(scale.y),
    })
}

/// Width/height ratio, snapped to a common ratio when close enough.
pub fn aspect_ratio(width: f64, height: f64, tolerance: f64) -> Option<AspectRatio> {
    if width <= 0.0 || height <= 0.0 {
        return None;
    }
    let ratio = width / height;
    let closest = COMMON_RATIOS
        .iter()
        .map(|(label, value)| (label, (ratio - value).abs()))
        .filter(|(_, diff)| *diff <= tolerance)
        .min_by(|a, b| a.1.total_cmp(&b.1));

    Some(match closest {
        Some((label, _)) => AspectRatio::Named(label.to_string()),
        None => AspectRatio::Ratio(Num::dec2(ratio)),
    })
}

/// Image payload for a node carrying the image `paint`.
pub fn image_content(node: &RawNode, paint: &Paint, thresholds: &Thresholds) -> ImageContent {
    ImageContent {
        img: paint.image_hash.clone(),
        fit: paint.scale_mode.map(fit),
        crop: crop(paint, thresholds.crop_tolerance),
        aspect_ratio: aspect_ratio(node.width, node.height, thresholds.aspect_ratio_tolerance),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_modes() {
        assert_eq!(fit(ScaleMode::Fill), ImageFit::Cover);
        assert_eq!(fit(ScaleMode::Fit), ImageFit::Contain);
        assert_eq!(fit(ScaleMode::Stretch), ImageFit::Fill);
        assert_eq!(fit(ScaleMode::Tile), ImageFit::Repeat);
    }

    #[test]
    fn test_crop_beyond_tolerance() {
        let mut paint = Paint::image("hash", ScaleMode::Crop);
        assert_eq!(crop(&paint, 0.01), None);

        paint.image_transform = Some([[1.0, 0.0, 0.005], [0.0, 1.0, 0.0]]);
        assert_eq!(crop(&paint, 0.01), None);

        paint.image_transform = Some([[0.5, 0.0, 0.25], [0.0, 0.75, 0.1]]);
        assert_eq!(
            crop(&paint, 0.01),
            Some(CropRect {
                x: Num(0.25),
                y: Num(0.1),
                w: Num(0.5),
                h: Num(0.75),
            })
        );
    }

    #[test]
    fn test_aspect_ratio_snapping() {
        assert_eq!(aspect_ratio(1920.0, 1080.0, 0.05), Some(AspectRatio::Named("16:9".into())));
        assert_eq!(aspect_ratio(64.0, 64.0, 0.05), Some(AspectRatio::Named("1:1".into())));
        assert_eq!(aspect_ratio(300.0, 100.0, 0.05), Some(AspectRatio::Ratio(Num(3.0))));
        assert_eq!(aspect_ratio(100.0, 0.0, 0.05), None);
    }

    #[test]
    fn test_image_content() {
        let node = RawNode::new("1", "Hero", "RECTANGLE").with_size(400.0, 300.0);
        let paint = Paint::image("abc123", ScaleMode::Fit);
        let content = image_content(&node, &paint, &Thresholds::default());
        assert_eq!(content.img.as_deref(), Some("abc123"));
        assert_eq!(content.fit, Some(ImageFit::Contain));
        assert_eq!(content.crop, None);
        assert_eq!(content.aspect_ratio, Some(AspectRatio::Named("4:3".into())));
    }
}
