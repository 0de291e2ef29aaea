//! Clue font resolution.
//!
//! Two tiers: a bold sans-serif TrueType face looked up on disk, and the
//! built-in [`BitmapFace`] when none of the candidates can be loaded. Only
//! failures to read or parse a candidate trigger the fallback.

use std::fmt;
use std::path::{Path, PathBuf};

use image::{Rgba, RgbaImage};
use imageproc::drawing::draw_text_mut;
use rusttype::{point, Font, Scale};
use thiserror::Error;

use crate::bitmap_font::BitmapFace;

/// Clue text size in pixels
pub const CLUE_FONT_SIZE: f32 = 16.0;

/// Where DejaVu Sans Bold is usually installed.
pub const PREFERRED_FONT_PATHS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/dejavu-sans-fonts/DejaVuSans-Bold.ttf",
    "/usr/local/share/fonts/DejaVuSans-Bold.ttf",
    "/Library/Fonts/DejaVuSans-Bold.ttf",
];

/// Failure to resolve a TrueType face.
#[derive(Debug, Error)]
pub enum FontError {
    #[error("Failed to read font file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Not a usable TrueType/OpenType font: {0}")]
    Parse(PathBuf),

    #[error("No font candidates configured")]
    NoCandidates,
}

/// Face used to measure and draw clue text.
pub enum ClueFace {
    TrueType {
        font: Font<'static>,
        scale: Scale,
        path: PathBuf,
    },
    Builtin(BitmapFace),
}

impl ClueFace {
    /// Load one TrueType/OpenType file at `size` pixels.
    pub fn load_truetype(path: &Path, size: f32) -> Result<Self, FontError> {
        let data = std::fs::read(path).map_err(|source| FontError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let font = Font::try_from_vec(data).ok_or_else(|| FontError::Parse(path.to_path_buf()))?;

        Ok(ClueFace::TrueType {
            font,
            scale: Scale::uniform(size),
            path: path.to_path_buf(),
        })
    }

    /// First candidate that loads, or the last candidate's error.
    pub fn resolve_preferred<P: AsRef<Path>>(candidates: &[P], size: f32) -> Result<Self, FontError> {
        let mut last_error = FontError::NoCandidates;
        for candidate in candidates {
            match Self::load_truetype(candidate.as_ref(), size) {
                Ok(face) => return Ok(face),
                Err(e) => {
                    tracing::debug!(path = %candidate.as_ref().display(), error = %e, "Font candidate unavailable");
                    last_error = e;
                }
            }
        }
        Err(last_error)
    }

    /// Preferred face from `candidates`, or the built-in face if none loads.
    pub fn resolve<P: AsRef<Path>>(candidates: &[P]) -> Self {
        match Self::resolve_preferred(candidates, CLUE_FONT_SIZE) {
            Ok(face) => {
                tracing::debug!(face = %face, "Using clue font");
                face
            }
            Err(e) => {
                tracing::warn!(error = %e, "Preferred clue font unavailable, using built-in face");
                Self::builtin()
            }
        }
    }

    /// [`resolve`](Self::resolve) over [`PREFERRED_FONT_PATHS`].
    pub fn resolve_default() -> Self {
        Self::resolve(PREFERRED_FONT_PATHS)
    }

    pub fn builtin() -> Self {
        ClueFace::Builtin(BitmapFace::default())
    }

    pub fn is_builtin(&self) -> bool {
        matches!(self, ClueFace::Builtin(_))
    }

    /// Width and height of the box `text` covers when drawn at the origin.
    pub fn measure(&self, text: &str) -> (i32, i32) {
        if text.is_empty() {
            return (0, 0);
        }
        match self {
            ClueFace::TrueType { font, scale, .. } => match ink_bounds(font, *scale, text) {
                Some((min_x, min_y, max_x, max_y)) => (max_x - min_x, max_y - min_y),
                None => (0, 0),
            },
            ClueFace::Builtin(face) => face.measure(text),
        }
    }

    /// Draw `text` so the top-left of its measured box lands at `(x, y)`.
    pub fn draw(&self, canvas: &mut RgbaImage, color: Rgba<u8>, x: i32, y: i32, text: &str) {
        match self {
            ClueFace::TrueType { font, scale, .. } => {
                let Some((min_x, min_y, _, _)) = ink_bounds(font, *scale, text) else {
                    return;
                };
                draw_text_mut(canvas, color, x - min_x, y - min_y, *scale, font, text)
            }
            ClueFace::Builtin(face) => face.draw(canvas, color, x, y, text),
        }
    }
}

/// Union of the glyph pixel boxes, laid out the way `draw_text_mut` lays them
/// out: origin at the left edge, baseline one ascent down.
///
/// `None` when no glyph has ink (empty or all-space text).
fn ink_bounds(font: &Font<'_>, scale: Scale, text: &str) -> Option<(i32, i32, i32, i32)> {
    let ascent = font.v_metrics(scale).ascent;
    font.layout(text, scale, point(0.0, ascent))
        .filter_map(|glyph| glyph.pixel_bounding_box())
        .fold(None, |acc, bb| {
            let (min_x, min_y, max_x, max_y) =
                acc.unwrap_or((bb.min.x, bb.min.y, bb.max.x, bb.max.y));
            Some((
                min_x.min(bb.min.x),
                min_y.min(bb.min.y),
                max_x.max(bb.max.x),
                max_y.max(bb.max.y),
            ))
        })
}

impl fmt::Display for ClueFace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClueFace::TrueType { path, scale, .. } => {
                write!(f, "{} @ {}px", path.display(), scale.y)
            }
            ClueFace::Builtin(face) => write!(f, "built-in 5x7 @ {}x", face.pixel_scale()),
        }
    }
}

impl fmt::Debug for ClueFace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClueFace({})", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_read_error() {
        let result = ClueFace::load_truetype(Path::new("/nonexistent/font.ttf"), 16.0);
        assert!(matches!(result, Err(FontError::Read { .. })));
    }

    #[test]
    fn test_no_candidates() {
        let candidates: [&str; 0] = [];
        let result = ClueFace::resolve_preferred(&candidates, 16.0);
        assert!(matches!(result, Err(FontError::NoCandidates)));
    }

    #[test]
    fn test_fallback_to_builtin() {
        let face = ClueFace::resolve(&["/nonexistent/a.ttf", "/nonexistent/b.ttf"]);
        assert!(face.is_builtin());
        assert_eq!(face.measure("12"), (22, 14));
    }

    #[test]
    fn test_empty_text_measures_zero() {
        assert_eq!(ClueFace::builtin().measure(""), (0, 0));
    }
}
