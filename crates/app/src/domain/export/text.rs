//! Shaped text drawing.
//!
//! Lines are split into bidirectional runs, shaped with the bundled DejaVu
//! Sans faces so Arabic letters take their joined forms, and rasterized
//! straight onto the capture.

use ab_glyph::{Font, FontRef, GlyphId, InvalidFont, point};
use image::{Rgb, RgbImage};
use rustybuzz::{Direction, Face, UnicodeBuffer};
use thiserror::Error;
use unicode_bidi::{Level, ParagraphBidiInfo};

static REGULAR: &[u8] = include_bytes!("../../../assets/fonts/DejaVuSans.ttf");
static BOLD: &[u8] = include_bytes!("../../../assets/fonts/DejaVuSans-Bold.ttf");

#[derive(Debug, Error)]
pub enum FontError {
    #[error("bundled font has no usable outlines")]
    Outline(#[from] InvalidFont),

    #[error("bundled font has no shaping tables")]
    Shaping,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Weight {
    Regular,
    Bold,
}

/// Horizontal anchoring of a line relative to its `x` coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

/// Where and how large to draw a line. `x` is the anchor, `baseline` the
/// vertical pen position, both in capture pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub x: f32,
    pub baseline: f32,
    pub size: f32,
    pub max_width: f32,
    pub align: Align,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct PlacedGlyph {
    pub(crate) id: GlyphId,
    pub(crate) x: f32,
    pub(crate) y: f32,
}

/// A line shaped at a given size, glyphs in visual order from the left.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ShapedLine {
    pub(crate) glyphs: Vec<PlacedGlyph>,
    pub(crate) width: f32,
}

/// A bundled typeface ready for shaping and rasterizing.
pub struct Typeface {
    outline: FontRef<'static>,
    shaping: Face<'static>,
}

impl std::fmt::Debug for Typeface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Typeface").finish_non_exhaustive()
    }
}

impl Typeface {
    /// Load one of the bundled faces.
    ///
    /// # Errors
    ///
    /// Returns an error when the bundled font data cannot be parsed.
    pub fn load(weight: Weight) -> Result<Self, FontError> {
        let data = match weight {
            Weight::Regular => REGULAR,
            Weight::Bold => BOLD,
        };

        Ok(Self {
            outline: FontRef::try_from_slice(data)?,
            shaping: Face::from_slice(data, 0).ok_or(FontError::Shaping)?,
        })
    }

    /// Shape `text` at `size` pixels.
    pub(crate) fn shape(&self, text: &str, size: f32) -> ShapedLine {
        if text.is_empty() {
            return ShapedLine {
                glyphs: Vec::new(),
                width: 0.0,
            };
        }

        let factor = size / self.outline.height_unscaled();
        let bidi = ParagraphBidiInfo::new(text, None);
        let (levels, runs) = bidi.visual_runs(0..text.len());

        let mut glyphs = Vec::new();
        let mut pen = 0.0;

        for run in runs {
            let Some(segment) = text.get(run.clone()) else {
                continue;
            };

            let direction = if levels.get(run.start).is_some_and(Level::is_rtl) {
                Direction::RightToLeft
            } else {
                Direction::LeftToRight
            };

            let mut buffer = UnicodeBuffer::new();
            buffer.push_str(segment);
            buffer.set_direction(direction);
            buffer.guess_segment_properties();

            let shaped = rustybuzz::shape(&self.shaping, &[], buffer);

            for (info, position) in shaped.glyph_infos().iter().zip(shaped.glyph_positions()) {
                glyphs.push(PlacedGlyph {
                    id: GlyphId(u16::try_from(info.glyph_id).unwrap_or_default()),
                    x: pen + units(position.x_offset) * factor,
                    y: -units(position.y_offset) * factor,
                });

                pen += units(position.x_advance) * factor;
            }
        }

        ShapedLine { glyphs, width: pen }
    }

    /// Draw `text` onto `canvas`, shrinking it to fit `placement.max_width`.
    /// Returns the drawn width.
    pub fn draw(
        &self,
        canvas: &mut RgbImage,
        text: &str,
        placement: Placement,
        color: Rgb<u8>,
    ) -> f32 {
        let mut size = placement.size;
        let mut line = self.shape(text, size);

        if line.width > placement.max_width && line.width > 0.0 {
            size *= placement.max_width / line.width;
            line = self.shape(text, size);
        }

        let left = match placement.align {
            Align::Left => placement.x,
            Align::Right => placement.x - line.width,
        };

        for glyph in &line.glyphs {
            let origin = point(left + glyph.x, placement.baseline + glyph.y);
            let positioned = glyph.id.with_scale_and_position(size, origin);

            if let Some(outlined) = self.outline.outline_glyph(positioned) {
                let bounds = outlined.px_bounds();

                outlined.draw(|x, y, coverage| {
                    blend(
                        canvas,
                        (bounds.min.x + pixel(x), bounds.min.y + pixel(y)),
                        color,
                        coverage,
                    );
                });
            }
        }

        line.width
    }
}

#[expect(
    clippy::cast_precision_loss,
    reason = "font unit offsets are far below f32 precision"
)]
fn units(value: i32) -> f32 {
    value as f32
}

#[expect(
    clippy::cast_precision_loss,
    reason = "glyph bitmaps are a few hundred pixels wide"
)]
fn pixel(value: u32) -> f32 {
    value as f32
}

#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "coordinates are checked non-negative and clipped to the canvas"
)]
fn blend(canvas: &mut RgbImage, (x, y): (f32, f32), color: Rgb<u8>, coverage: f32) {
    if x < 0.0 || y < 0.0 {
        return;
    }

    let Some(target) = canvas.get_pixel_mut_checked(x as u32, y as u32) else {
        return;
    };

    let alpha = coverage.clamp(0.0, 1.0);

    for (channel, ink) in target.0.iter_mut().zip(color.0) {
        *channel = (f32::from(*channel) * (1.0 - alpha) + f32::from(ink) * alpha).round() as u8;
    }
}
