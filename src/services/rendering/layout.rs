// Word wrap, adaptive font sizing, and three-band line placement.
//
// The measure seam is a closure `(text, font_size) -> width_px` so the
// layout logic stays pure; the compositor plugs in the cosmic-text
// measurer, tests plug in a synthetic one.

/// Font size candidate lines are measured at during wrapping
pub const BASE_FONT_SIZE: f32 = 52.0;

/// Pixel budget for a wrapped line on the 1080px canvas
pub const MAX_TEXT_WIDTH: f32 = 950.0;

/// Vertical baseline anchors for the three bands
const BAND_ANCHORS: [f32; 3] = [150.0, 480.0, 850.0];

/// Extra vertical advance on top of the font size
const LINE_ADVANCE: f32 = 14.0;

/// Last-resort size reduction for a line still over budget
const OVERFLOW_SHRINK: f32 = 6.0;

/// Vertical region of the canvas a line is assigned to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Band {
    Top,
    Middle,
    Bottom,
}

const BANDS: [Band; 3] = [Band::Top, Band::Middle, Band::Bottom];

/// A wrapped line with its final position and size
#[derive(Debug, Clone)]
pub struct PlacedLine {
    pub text: String,
    pub band: Band,
    /// Baseline y coordinate on the canvas
    pub y: f32,
    pub font_size: f32,
}

/// Greedy word wrap of one source line against a pixel budget.
pub fn wrap_line(line: &str, max_width: f32, measure: &dyn Fn(&str) -> f32) -> Vec<String> {
    let mut words = line.split_whitespace();
    let mut current = match words.next() {
        Some(word) => word.to_string(),
        None => return Vec::new(),
    };

    let mut wrapped = Vec::new();
    for word in words {
        let candidate = format!("{current} {word}");
        if measure(&candidate) > max_width && !current.is_empty() {
            wrapped.push(std::mem::replace(&mut current, word.to_string()));
        } else {
            current = candidate;
        }
    }
    if !current.is_empty() {
        wrapped.push(current);
    }
    wrapped
}

/// Adaptive font size: more wrapped lines, smaller text. Stepped, not
/// interpolated.
pub fn font_size_for(line_count: usize) -> f32 {
    match line_count {
        0..=6 => 52.0,
        7..=9 => 46.0,
        10..=12 => 40.0,
        _ => 36.0,
    }
}

/// Lay out ad text: wrap every non-blank line to the pixel budget,
/// pick the adaptive font size, then distribute lines across the three
/// bands in ceil(total/3) groups.
///
/// Wrapping measures at [`BASE_FONT_SIZE`]; the per-line overflow check
/// re-measures at the final size and shrinks that line by
/// [`OVERFLOW_SHRINK`] if it still exceeds the budget.
pub fn layout(ad_text: &str, measure: &dyn Fn(&str, f32) -> f32) -> Vec<PlacedLine> {
    let base_measure = |text: &str| measure(text, BASE_FONT_SIZE);

    let mut wrapped = Vec::new();
    for line in ad_text.lines().filter(|line| !line.trim().is_empty()) {
        wrapped.extend(wrap_line(line, MAX_TEXT_WIDTH, &base_measure));
    }

    if wrapped.is_empty() {
        return Vec::new();
    }

    let font_size = font_size_for(wrapped.len());
    let advance = font_size + LINE_ADVANCE;
    let per_band = wrapped.len().div_ceil(3);

    wrapped
        .into_iter()
        .enumerate()
        .map(|(index, text)| {
            let band_index = (index / per_band).min(2);
            let index_in_band = index - band_index * per_band;
            let size = if measure(&text, font_size) > MAX_TEXT_WIDTH {
                font_size - OVERFLOW_SHRINK
            } else {
                font_size
            };
            PlacedLine {
                text,
                band: BANDS[band_index],
                y: BAND_ANCHORS[band_index] + index_in_band as f32 * advance,
                font_size: size,
            }
        })
        .collect()
}
