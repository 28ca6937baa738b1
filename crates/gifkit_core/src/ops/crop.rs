//! Crop every frame of a clip to a pixel rectangle.

use image::imageops;

use crate::clip::GifClip;
use crate::error::{GifError, GifResult};

/// Smallest accepted crop side in pixels.
pub const MIN_CROP_SIZE: u32 = 16;

/// A crop area in frame pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl CropRect {
    /// The full frame.
    pub fn full(width: u32, height: u32) -> Self {
        Self {
            x: 0,
            y: 0,
            width,
            height,
        }
    }

    /// Intersect the rectangle with the frame bounds.
    ///
    /// When the intersection collapses below [`MIN_CROP_SIZE`] on either
    /// side the whole frame is returned instead, so an out-of-range edit
    /// never produces a sliver.
    pub fn clamped_to(self, bounds: (u32, u32)) -> Self {
        let (bw, bh) = bounds;
        let x = self.x.min(bw.saturating_sub(1));
        let y = self.y.min(bh.saturating_sub(1));
        let width = self.width.min(bw - x);
        let height = self.height.min(bh - y);

        let min_w = MIN_CROP_SIZE.min(bw);
        let min_h = MIN_CROP_SIZE.min(bh);
        if width < min_w || height < min_h {
            return Self::full(bw, bh);
        }

        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Whether the rectangle lies entirely inside the given bounds.
    pub fn fits_in(&self, bounds: (u32, u32)) -> bool {
        self.width > 0
            && self.height > 0
            && self.x.checked_add(self.width).is_some_and(|r| r <= bounds.0)
            && self.y.checked_add(self.height).is_some_and(|b| b <= bounds.1)
    }
}

/// Cut every frame to `rect`, preserving frame order and delays.
pub fn crop(clip: &GifClip, rect: CropRect) -> GifResult<GifClip> {
    if clip.is_empty() {
        return Err(GifError::EmptyClip);
    }

    let bounds = clip.dimensions();
    if rect.width == 0 || rect.height == 0 {
        return Err(GifError::InvalidCrop("area is empty".into()));
    }
    if !rect.fits_in(bounds) {
        return Err(GifError::InvalidCrop(format!(
            "{}x{}+{}+{} exceeds the {}x{} frame",
            rect.width, rect.height, rect.x, rect.y, bounds.0, bounds.1
        )));
    }

    let frames = clip
        .frames
        .iter()
        .map(|frame| imageops::crop_imm(frame, rect.x, rect.y, rect.width, rect.height).to_image())
        .collect();

    Ok(GifClip::from_parts(frames, clip.delays_ms.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn gradient_clip() -> GifClip {
        // Two 40x30 frames where the red channel encodes the x coordinate.
        let frame = RgbaImage::from_fn(40, 30, |x, _y| Rgba([x as u8, 0, 0, 255]));
        GifClip::from_parts(vec![frame.clone(), frame], vec![80, 120])
    }

    #[test]
    fn crop_preserves_count_and_delays() {
        let clip = gradient_clip();
        let rect = CropRect {
            x: 10,
            y: 5,
            width: 20,
            height: 20,
        };

        let cropped = crop(&clip, rect).unwrap();
        assert_eq!(cropped.len(), 2);
        assert_eq!(cropped.delays_ms, vec![80, 120]);
        assert_eq!(cropped.dimensions(), (20, 20));
        // Leftmost column of the crop came from x=10 in the source
        assert_eq!(cropped.frames[0].get_pixel(0, 0)[0], 10);
    }

    #[test]
    fn out_of_bounds_rect_errors() {
        let clip = gradient_clip();
        let rect = CropRect {
            x: 30,
            y: 0,
            width: 20,
            height: 10,
        };
        assert!(matches!(crop(&clip, rect), Err(GifError::InvalidCrop(_))));
    }

    #[test]
    fn empty_rect_errors() {
        let clip = gradient_clip();
        let rect = CropRect {
            x: 0,
            y: 0,
            width: 0,
            height: 10,
        };
        assert!(matches!(crop(&clip, rect), Err(GifError::InvalidCrop(_))));
    }

    #[test]
    fn empty_clip_errors() {
        let clip = GifClip::from_parts(Vec::new(), Vec::new());
        assert!(matches!(
            crop(&clip, CropRect::full(10, 10)),
            Err(GifError::EmptyClip)
        ));
    }

    #[test]
    fn clamp_intersects_with_bounds() {
        let rect = CropRect {
            x: 20,
            y: 10,
            width: 100,
            height: 100,
        };
        let clamped = rect.clamped_to((40, 30));
        assert_eq!(
            clamped,
            CropRect {
                x: 20,
                y: 10,
                width: 20,
                height: 20
            }
        );
    }

    #[test]
    fn clamp_falls_back_to_full_frame_when_too_small() {
        let rect = CropRect {
            x: 38,
            y: 28,
            width: 100,
            height: 100,
        };
        let clamped = rect.clamped_to((40, 30));
        assert_eq!(clamped, CropRect::full(40, 30));
    }
}
