//! Shared chart styling and axis-range helpers.

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::register_font;
use std::sync::OnceLock;

use crate::error::{PlotError, PlotResult};

/// Font family every chart draws its text with.
pub const FONT_FAMILY: &str = "sans-serif";

static DEJAVU_SANS: &[u8] = include_bytes!("../assets/DejaVuSans.ttf");
static FONTS: OnceLock<Result<(), String>> = OnceLock::new();

/// Register the bundled font under [`FONT_FAMILY`].
///
/// Text layout never depends on the fonts installed on the host, so PNG and
/// SVG output is the same on every machine. Safe to call repeatedly.
pub fn register_fonts() -> PlotResult<()> {
    FONTS
        .get_or_init(|| {
            register_font(FONT_FAMILY, FontStyle::Normal, DEJAVU_SANS)
                .map_err(|_| String::from("bundled font rejected: invalid font data"))
        })
        .clone()
        .map_err(PlotError::Render)
}

/// Purple used for the fourth run.
pub const PURPLE: RGBColor = RGBColor(128, 0, 128);

/// Run colors in configured order: green, red, blue, purple.
pub const PALETTE: [RGBColor; 4] = [GREEN, RED, BLUE, PURPLE];

/// Color of the `index`-th run, cycling through [`PALETTE`].
pub fn run_color(index: usize) -> RGBColor {
    PALETTE[index % PALETTE.len()]
}

/// Legend label of a run.
pub fn run_label(shots: u32) -> String {
    format!("pVQD: {shots} shots")
}

/// Marker radius in pixels.
pub const MARKER_SIZE: u32 = 3;

/// Error-bar cap width in pixels.
pub const CAP_WIDTH: u32 = 4;

/// Font used for captions and legends.
pub fn font(size: u32) -> TextStyle<'static> {
    TextStyle::from((FONT_FAMILY, f64::from(size)).into_font())
}

/// Legend entry drawn by [`draw_legend_strip`].
pub enum LegendEntry {
    /// Dashed-line sample.
    Line { label: String, color: RGBColor },
    /// Filled-marker sample.
    Marker { label: String, color: RGBColor },
}

/// Draw legend entries in `columns` columns across a pixel-space area.
pub fn draw_legend_strip<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    entries: &[LegendEntry],
    columns: usize,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    let (width, _) = area.dim_in_pixel();
    let columns = columns.max(1);
    let col_width = (width as usize / columns) as i32;
    let row_height = 22;
    let text_style = font(16);

    for (i, entry) in entries.iter().enumerate() {
        let x = (i % columns) as i32 * col_width + 20;
        let y = (i / columns) as i32 * row_height + 14;
        let label = match entry {
            LegendEntry::Line { label, color } => {
                area.draw(&PathElement::new(
                    vec![(x, y), (x + 8, y)],
                    color.stroke_width(2),
                ))?;
                area.draw(&PathElement::new(
                    vec![(x + 12, y), (x + 20, y)],
                    color.stroke_width(2),
                ))?;
                label
            }
            LegendEntry::Marker { label, color } => {
                area.draw(&Circle::new((x + 10, y), 4, color.filled()))?;
                label
            }
        };
        area.draw(&Text::new(label.clone(), (x + 28, y - 8), text_style.clone()))?;
    }
    Ok(())
}

/// Bounds of a log axis covering every positive value, padded by a factor
/// of two either side. `None` when no value is positive.
pub fn log_bounds(values: impl IntoIterator<Item = f64>) -> Option<(f64, f64)> {
    let (lo, hi) = values
        .into_iter()
        .filter(|v| v.is_finite() && *v > 0.0)
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    if lo.is_finite() && hi.is_finite() {
        Some((lo / 2.0, hi * 2.0))
    } else {
        None
    }
}

/// Bounds of a linear axis covering every finite value with 5% padding.
///
/// Falls back to `[0, 1]` for empty input and widens degenerate ranges.
pub fn linear_bounds(values: impl IntoIterator<Item = f64>) -> (f64, f64) {
    let (lo, hi) = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    if !lo.is_finite() || !hi.is_finite() {
        return (0.0, 1.0);
    }
    if (hi - lo).abs() < 1e-12 {
        return (lo - 0.5, hi + 0.5);
    }
    let pad = (hi - lo) * 0.05;
    (lo - pad, hi + pad)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_fonts_is_idempotent() {
        assert!(register_fonts().is_ok());
        assert!(register_fonts().is_ok());
    }

    #[test]
    fn test_palette_cycles() {
        assert_eq!(run_color(0), GREEN);
        assert_eq!(run_color(3), PURPLE);
        assert_eq!(run_color(4), GREEN);
    }

    #[test]
    fn test_run_label() {
        assert_eq!(run_label(8000), "pVQD: 8000 shots");
    }

    #[test]
    fn test_log_bounds_skip_non_positive() {
        assert_eq!(log_bounds([0.0, -1.0, 1e-3, 1e-1]), Some((5e-4, 0.2)));
        assert_eq!(log_bounds([0.0, -2.0, f64::NAN]), None);
    }

    #[test]
    fn test_linear_bounds() {
        assert_eq!(linear_bounds(std::iter::empty()), (0.0, 1.0));
        assert_eq!(linear_bounds([3.0, 3.0]), (2.5, 3.5));
        let (lo, hi) = linear_bounds([0.0, 10.0]);
        assert!((lo + 0.5).abs() < 1e-12 && (hi - 10.5).abs() < 1e-12);
    }
}
