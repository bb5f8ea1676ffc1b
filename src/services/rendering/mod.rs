pub mod compositor;
pub mod layout;

use cosmic_text::{
    Attrs, Buffer, Color as CosmicColor, Family, FontSystem, Metrics, Shaping, SwashCache,
    Weight, Wrap,
};
use image::{Rgba, RgbaImage};
use parking_lot::Mutex;
use tracing::{debug, info, warn};

/// Line box height relative to the font size
const LINE_HEIGHT_RATIO: f32 = 1.2;

/// Single-line text measurement and rasterization using cosmic-text.
///
/// Fonts come from a directory scanned at startup; an empty directory
/// degrades measurement to 0 and drawing to a no-op rather than
/// failing, so the compositing endpoints stay total.
pub struct TextRenderer {
    font_system: Mutex<FontSystem>,
    swash_cache: Mutex<SwashCache>,
}

impl TextRenderer {
    pub fn new(font_dir: &str) -> Self {
        use cosmic_text::fontdb;

        // Empty font database, no system font scan
        let mut db = fontdb::Database::new();
        let mut loaded = 0usize;

        match std::fs::read_dir(font_dir) {
            Ok(entries) => {
                for entry in entries.flatten() {
                    let path = entry.path();
                    let is_font = path
                        .extension()
                        .and_then(|ext| ext.to_str())
                        .map(|ext| matches!(ext.to_ascii_lowercase().as_str(), "ttf" | "otf" | "ttc"))
                        .unwrap_or(false);
                    if !is_font {
                        continue;
                    }
                    match std::fs::read(&path) {
                        Ok(data) => {
                            db.load_font_data(data);
                            loaded += 1;
                            debug!("✓ Font: {}", path.display());
                        }
                        Err(err) => warn!("⚠ Unreadable font {}: {err}", path.display()),
                    }
                }
            }
            Err(err) => warn!("⚠ Font directory {font_dir} not readable: {err}"),
        }

        if loaded == 0 {
            warn!("No fonts loaded from {font_dir}; composed images will carry no text");
        } else {
            info!("✓ Renderer initialized with {loaded} fonts from {font_dir}");
        }

        let font_system = FontSystem::new_with_locale_and_db("en-US".to_string(), db);

        Self {
            font_system: Mutex::new(font_system),
            swash_cache: Mutex::new(SwashCache::new()),
        }
    }

    fn attrs() -> Attrs<'static> {
        Attrs::new().family(Family::SansSerif).weight(Weight::BOLD)
    }

    /// Measure the advance width of a single line at the given size.
    pub fn measure_line(&self, text: &str, font_size: f32) -> f32 {
        if text.trim().is_empty() {
            return 0.0;
        }

        let mut font_system = self.font_system.lock();
        let metrics = Metrics::new(font_size, font_size * LINE_HEIGHT_RATIO);
        let mut buffer = Buffer::new(&mut font_system, metrics);

        buffer.set_wrap(&mut font_system, Wrap::None);
        let attrs = Self::attrs();
        buffer.set_text(&mut font_system, text, &attrs, Shaping::Advanced);
        buffer.shape_until_scroll(&mut font_system, false);

        buffer
            .layout_runs()
            .map(|run| run.line_w)
            .fold(0.0f32, f32::max)
    }

    /// Rasterize a single line into `img` with `(x, y)` as the top-left
    /// corner of the line box, alpha-blending over existing pixels.
    pub fn draw_line(
        &self,
        img: &mut RgbaImage,
        text: &str,
        font_size: f32,
        color: Rgba<u8>,
        x: i32,
        y: i32,
    ) {
        if text.trim().is_empty() {
            return;
        }

        // Shape under the font-system lock only, then draw
        let buffer = {
            let mut font_system = self.font_system.lock();
            let metrics = Metrics::new(font_size, font_size * LINE_HEIGHT_RATIO);
            let mut buffer = Buffer::new(&mut font_system, metrics);

            buffer.set_wrap(&mut font_system, Wrap::None);
            let attrs = Self::attrs();
            buffer.set_text(&mut font_system, text, &attrs, Shaping::Advanced);
            buffer.shape_until_scroll(&mut font_system, false);
            buffer
        };

        let cosmic_color = CosmicColor::rgba(color[0], color[1], color[2], color[3]);

        let mut font_system = self.font_system.lock();
        let mut swash_cache = self.swash_cache.lock();

        buffer.draw(
            &mut font_system,
            &mut swash_cache,
            cosmic_color,
            |px_x, px_y, _w, _h, pixel_color| {
                let img_x = x + px_x;
                let img_y = y + px_y;

                let within_canvas = img_x >= 0
                    && img_x < img.width() as i32
                    && img_y >= 0
                    && img_y < img.height() as i32;
                if !within_canvas {
                    return;
                }

                let existing = img.get_pixel(img_x as u32, img_y as u32);

                // Alpha blend
                let alpha = pixel_color.a() as f32 / 255.0;
                let inv_alpha = 1.0 - alpha;

                let blended = Rgba([
                    ((pixel_color.r() as f32 * alpha) + (existing[0] as f32 * inv_alpha)) as u8,
                    ((pixel_color.g() as f32 * alpha) + (existing[1] as f32 * inv_alpha)) as u8,
                    ((pixel_color.b() as f32 * alpha) + (existing[2] as f32 * inv_alpha)) as u8,
                    existing[3].max(pixel_color.a()),
                ]);

                img.put_pixel(img_x as u32, img_y as u32, blended);
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_font_dir_degrades_to_noop() {
        let renderer = TextRenderer::new("does-not-exist");
        assert_eq!(renderer.measure_line("Premium Layer Mash", 52.0), 0.0);

        let mut img = RgbaImage::new(64, 64);
        renderer.draw_line(&mut img, "Premium Layer Mash", 52.0, Rgba([255; 4]), 0, 0);
        assert!(img.pixels().all(|p| p.0 == [0, 0, 0, 0]));
    }

    #[test]
    fn blank_text_measures_zero() {
        let renderer = TextRenderer::new("does-not-exist");
        assert_eq!(renderer.measure_line("   ", 52.0), 0.0);
        assert_eq!(renderer.measure_line("", 52.0), 0.0);
    }
}
