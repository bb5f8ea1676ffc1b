// Raster composition of the final 1080x1080 creative.
//
// Primary path: scale the fetched background to the canvas, darken it
// with three gradient overlay bands, then draw the laid-out caption in
// white over a blurred drop shadow. Fallback path: a green gradient
// with the uppercased product name, two category emojis, and the raw
// caption lines. The fallback never fails.

use image::{imageops, Rgba, RgbaImage};

use crate::core::errors::ComposeError;
use crate::services::classifier::AnimalCategory;
use crate::services::rendering::{layout, TextRenderer};

pub const CANVAS_SIZE: u32 = 1080;
const CENTER_X: f32 = 540.0;

const TEXT_COLOR: Rgba<u8> = Rgba([255, 255, 255, 255]);

const SHADOW_COLOR: Rgba<u8> = Rgba([0, 0, 0, 230]);
const SHADOW_OFFSET: (i64, i64) = (3, 3);
const SHADOW_SIGMA: f32 = 7.5;

const FALLBACK_SHADOW_COLOR: Rgba<u8> = Rgba([0, 0, 0, 128]);
const FALLBACK_SHADOW_SIGMA: f32 = 5.0;

const PRODUCT_FONT_SIZE: f32 = 70.0;
const PRODUCT_BASELINE_Y: f32 = 300.0;
const EMOJI_FONT_SIZE: f32 = 100.0;
const EMOJI_BASELINE_Y: f32 = 500.0;
const EMOJI_CENTERS_X: (f32, f32) = (200.0, 880.0);
const FALLBACK_TEXT_SIZE: f32 = 55.0;
const FALLBACK_TEXT_START_Y: f32 = 650.0;
const FALLBACK_LINE_HEIGHT: f32 = 80.0;

/// One overlay band: black at varying opacity across a vertical span
struct OverlayBand {
    y0: u32,
    y1: u32,
    /// (offset within the span, opacity) pairs, ascending by offset
    stops: &'static [(f32, f32)],
}

const OVERLAY_BANDS: [OverlayBand; 3] = [
    OverlayBand {
        y0: 0,
        y1: 300,
        stops: &[(0.0, 0.6), (0.5, 0.3), (1.0, 0.0)],
    },
    OverlayBand {
        y0: 350,
        y1: 750,
        stops: &[(0.0, 0.0), (0.5, 0.4), (1.0, 0.0)],
    },
    OverlayBand {
        y0: 650,
        y1: 1080,
        stops: &[(0.0, 0.0), (0.2, 0.5), (0.5, 0.75), (1.0, 0.92)],
    },
];

/// Fallback background: 3-stop vertical green gradient
const FALLBACK_STOPS: [(f32, [u8; 3]); 3] = [
    (0.0, [0x16, 0xa3, 0x4a]),
    (0.5, [0x15, 0x80, 0x3d]),
    (1.0, [0x16, 0x65, 0x34]),
];

/// A single line queued for shadowed drawing
struct GlyphLine {
    text: String,
    center_x: f32,
    baseline_y: f32,
    font_size: f32,
}

/// Compose the caption over a fetched background image.
pub fn compose_over_background(
    renderer: &TextRenderer,
    background: &[u8],
    ad_text: &str,
) -> Result<RgbaImage, ComposeError> {
    let decoded = image::load_from_memory(background)?;
    let mut canvas = decoded
        .resize_exact(CANVAS_SIZE, CANVAS_SIZE, imageops::FilterType::Lanczos3)
        .to_rgba8();

    for band in &OVERLAY_BANDS {
        paint_overlay_band(&mut canvas, band);
    }

    let lines = layout::layout(ad_text, &|text, size| renderer.measure_line(text, size));
    let glyph_lines: Vec<GlyphLine> = lines
        .into_iter()
        .map(|line| GlyphLine {
            text: line.text,
            center_x: CENTER_X,
            baseline_y: line.y,
            font_size: line.font_size,
        })
        .collect();

    draw_shadowed_lines(
        renderer,
        &mut canvas,
        &glyph_lines,
        SHADOW_COLOR,
        SHADOW_SIGMA,
        SHADOW_OFFSET,
    );

    Ok(canvas)
}

/// Compose the degraded creative when no background is available.
/// Total: drawing primitives cannot fail and missing fonts are no-ops.
pub fn compose_fallback(
    renderer: &TextRenderer,
    product: &str,
    animal: AnimalCategory,
    ad_text: &str,
) -> RgbaImage {
    let mut canvas = RgbaImage::new(CANVAS_SIZE, CANVAS_SIZE);
    paint_fallback_gradient(&mut canvas);

    let (emoji_left, emoji_right) = fallback_emojis(animal);

    let mut glyph_lines = vec![
        GlyphLine {
            text: product.to_uppercase(),
            center_x: CENTER_X,
            baseline_y: PRODUCT_BASELINE_Y,
            font_size: PRODUCT_FONT_SIZE,
        },
        GlyphLine {
            text: emoji_left.to_string(),
            center_x: EMOJI_CENTERS_X.0,
            baseline_y: EMOJI_BASELINE_Y,
            font_size: EMOJI_FONT_SIZE,
        },
        GlyphLine {
            text: emoji_right.to_string(),
            center_x: EMOJI_CENTERS_X.1,
            baseline_y: EMOJI_BASELINE_Y,
            font_size: EMOJI_FONT_SIZE,
        },
    ];

    for (index, line) in ad_text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .enumerate()
    {
        glyph_lines.push(GlyphLine {
            text: line.to_string(),
            center_x: CENTER_X,
            baseline_y: FALLBACK_TEXT_START_Y + index as f32 * FALLBACK_LINE_HEIGHT,
            font_size: FALLBACK_TEXT_SIZE,
        });
    }

    draw_shadowed_lines(
        renderer,
        &mut canvas,
        &glyph_lines,
        FALLBACK_SHADOW_COLOR,
        FALLBACK_SHADOW_SIGMA,
        (0, 0),
    );

    canvas
}

/// Decorative emoji pair for the fallback creative
fn fallback_emojis(animal: AnimalCategory) -> (&'static str, &'static str) {
    match animal {
        AnimalCategory::Cattle => ("🐄", "🐮"),
        AnimalCategory::Pigs => ("🐷", "🐖"),
        AnimalCategory::GoatsAndSheep => ("🐐", "🐑"),
        AnimalCategory::Fish => ("🐟", "🐠"),
        AnimalCategory::Ducks => ("🦆", "🦢"),
        AnimalCategory::Rabbits => ("🐰", "🐇"),
        _ => ("🌾", "🐥"),
    }
}

fn draw_shadowed_lines(
    renderer: &TextRenderer,
    canvas: &mut RgbaImage,
    lines: &[GlyphLine],
    shadow_color: Rgba<u8>,
    shadow_sigma: f32,
    shadow_offset: (i64, i64),
) {
    if lines.is_empty() {
        return;
    }

    let mut shadow_layer = RgbaImage::new(CANVAS_SIZE, CANVAS_SIZE);
    let mut shadow_drawn = false;
    for line in lines {
        let width = renderer.measure_line(&line.text, line.font_size);
        if width <= 0.0 {
            continue;
        }
        shadow_drawn = true;
        renderer.draw_line(
            &mut shadow_layer,
            &line.text,
            line.font_size,
            shadow_color,
            (line.center_x - width / 2.0) as i32,
            line_box_top(line.baseline_y, line.font_size),
        );
    }

    if shadow_drawn {
        let blurred = imageops::blur(&shadow_layer, shadow_sigma);
        imageops::overlay(canvas, &blurred, shadow_offset.0, shadow_offset.1);
    }

    for line in lines {
        let width = renderer.measure_line(&line.text, line.font_size);
        renderer.draw_line(
            canvas,
            &line.text,
            line.font_size,
            TEXT_COLOR,
            (line.center_x - width / 2.0) as i32,
            line_box_top(line.baseline_y, line.font_size),
        );
    }
}

/// Convert a baseline anchor to the top of the line box
fn line_box_top(baseline_y: f32, font_size: f32) -> i32 {
    (baseline_y - font_size * 0.8) as i32
}

/// Darken a horizontal band of the canvas with an interpolated
/// black-opacity gradient.
fn paint_overlay_band(img: &mut RgbaImage, band: &OverlayBand) {
    let span = (band.y1 - band.y0) as f32;
    for y in band.y0..band.y1.min(CANVAS_SIZE) {
        let t = (y - band.y0) as f32 / span;
        let opacity = interpolate_stops(band.stops, t);
        if opacity <= 0.0 {
            continue;
        }
        let keep = 1.0 - opacity;
        for x in 0..CANVAS_SIZE {
            let pixel = img.get_pixel_mut(x, y);
            pixel[0] = (pixel[0] as f32 * keep) as u8;
            pixel[1] = (pixel[1] as f32 * keep) as u8;
            pixel[2] = (pixel[2] as f32 * keep) as u8;
        }
    }
}

fn paint_fallback_gradient(img: &mut RgbaImage) {
    for y in 0..CANVAS_SIZE {
        let t = y as f32 / (CANVAS_SIZE - 1) as f32;
        let color = interpolate_color(&FALLBACK_STOPS, t);
        for x in 0..CANVAS_SIZE {
            img.put_pixel(x, y, Rgba([color[0], color[1], color[2], 255]));
        }
    }
}

/// Piecewise-linear interpolation over ascending (offset, value) stops
fn interpolate_stops(stops: &[(f32, f32)], t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    let mut previous = stops[0];
    if t <= previous.0 {
        return previous.1;
    }
    for &stop in &stops[1..] {
        if t <= stop.0 {
            let segment = (t - previous.0) / (stop.0 - previous.0);
            return previous.1 + (stop.1 - previous.1) * segment;
        }
        previous = stop;
    }
    previous.1
}

fn interpolate_color(stops: &[(f32, [u8; 3])], t: f32) -> [u8; 3] {
    let t = t.clamp(0.0, 1.0);
    let mut previous = stops[0];
    if t <= previous.0 {
        return previous.1;
    }
    for &stop in &stops[1..] {
        if t <= stop.0 {
            let segment = (t - previous.0) / (stop.0 - previous.0);
            let mut color = [0u8; 3];
            for channel in 0..3 {
                let a = previous.1[channel] as f32;
                let b = stop.1[channel] as f32;
                color[channel] = (a + (b - a) * segment) as u8;
            }
            return color;
        }
        previous = stop;
    }
    previous.1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::classifier;
    use image::DynamicImage;
    use std::io::Cursor;

    fn renderer() -> TextRenderer {
        TextRenderer::new("does-not-exist")
    }

    fn white_png() -> Vec<u8> {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            64,
            64,
            Rgba([255, 255, 255, 255]),
        ));
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn interpolation_hits_the_stops() {
        let stops = [(0.0, 0.6), (0.5, 0.3), (1.0, 0.0)];
        assert_eq!(interpolate_stops(&stops, 0.0), 0.6);
        assert_eq!(interpolate_stops(&stops, 0.5), 0.3);
        assert_eq!(interpolate_stops(&stops, 1.0), 0.0);
        let mid = interpolate_stops(&stops, 0.25);
        assert!((mid - 0.45).abs() < 1e-6);
    }

    #[test]
    fn compose_scales_background_and_darkens_bands() {
        let composed =
            compose_over_background(&renderer(), &white_png(), "Quality feed here").unwrap();
        assert_eq!(composed.dimensions(), (CANVAS_SIZE, CANVAS_SIZE));

        // Top row sits under a 0.6-opacity black overlay.
        let top = composed.get_pixel(540, 0);
        assert!(top[0] < 110, "top row not darkened: {:?}", top);

        // Row 340 is outside every band and stays white.
        let clear = composed.get_pixel(540, 340);
        assert!(clear[0] > 250, "untouched row darkened: {:?}", clear);

        // The bottom edge approaches 0.92 opacity.
        let bottom = composed.get_pixel(540, CANVAS_SIZE - 1);
        assert!(bottom[0] < 30, "bottom row not darkened: {:?}", bottom);
    }

    #[test]
    fn compose_rejects_garbage_background() {
        let result = compose_over_background(&renderer(), b"not an image", "text");
        assert!(matches!(result, Err(ComposeError::Decode(_))));
    }

    #[test]
    fn fallback_paints_the_green_gradient() {
        let animal = classifier::classify("layer mash");
        let img = compose_fallback(&renderer(), "Layer Mash", animal, "Line one\nLine two");
        assert_eq!(img.dimensions(), (CANVAS_SIZE, CANVAS_SIZE));
        assert_eq!(img.get_pixel(0, 0).0, [0x16, 0xa3, 0x4a, 255]);
        assert_eq!(img.get_pixel(0, CANVAS_SIZE - 1).0, [0x16, 0x65, 0x34, 255]);
        // Midpoint matches the middle stop.
        let mid = img.get_pixel(540, (CANVAS_SIZE - 1) / 2);
        assert_eq!(mid.0[1], 0x80);
    }

    #[test]
    fn emoji_table_covers_every_category() {
        use AnimalCategory::*;
        assert_eq!(fallback_emojis(Cattle), ("🐄", "🐮"));
        assert_eq!(fallback_emojis(Pigs), ("🐷", "🐖"));
        assert_eq!(fallback_emojis(GoatsAndSheep), ("🐐", "🐑"));
        assert_eq!(fallback_emojis(Fish), ("🐟", "🐠"));
        assert_eq!(fallback_emojis(Ducks), ("🦆", "🦢"));
        assert_eq!(fallback_emojis(Rabbits), ("🐰", "🐇"));
        assert_eq!(fallback_emojis(Chickens), ("🌾", "🐥"));
        assert_eq!(fallback_emojis(Horses), ("🌾", "🐥"));
        assert_eq!(fallback_emojis(FarmAnimals), ("🌾", "🐥"));
    }
}
