//! Horizontal concatenation of two clips.

use image::{imageops, Rgba, RgbaImage};

use crate::clip::GifClip;
use crate::error::{GifError, GifResult};

/// Canvas colour behind frames shorter than the output height.
const CANVAS_FILL: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Join two clips side by side into a uniform-delay clip.
///
/// Frame counts are reconciled by holding the shorter clip's last frame;
/// heights are reconciled by centring each frame vertically on a white
/// canvas of the taller height. The left clip keeps x = 0, the right clip
/// starts at the left clip's width.
pub fn hconcat(left: &GifClip, right: &GifClip, delay_ms: u32) -> GifResult<GifClip> {
    if left.is_empty() || right.is_empty() {
        return Err(GifError::EmptyClip);
    }

    let (left_w, left_h) = left.dimensions();
    let (right_w, right_h) = right.dimensions();
    let width = left_w + right_w;
    let height = left_h.max(right_h);
    let total = left.len().max(right.len());

    let mut frames = Vec::with_capacity(total);
    for index in 0..total {
        let frame_a = &left.frames[index.min(left.len() - 1)];
        let frame_b = &right.frames[index.min(right.len() - 1)];

        let mut canvas = RgbaImage::from_pixel(width, height, CANVAS_FILL);
        // Frames taller than the canvas (mismatched sizes within a clip)
        // sit at y = 0 and are clipped by the overlay.
        let offset_a = i64::from(height.saturating_sub(frame_a.height()) / 2);
        let offset_b = i64::from(height.saturating_sub(frame_b.height()) / 2);
        imageops::overlay(&mut canvas, frame_a, 0, offset_a);
        imageops::overlay(&mut canvas, frame_b, i64::from(left_w), offset_b);
        frames.push(canvas);
    }

    let delays_ms = vec![delay_ms.max(1); total];
    Ok(GifClip::from_parts(frames, delays_ms))
}

/// Frame rate suggested for the combined output: the faster of the two
/// inputs' average rates, rounded to a whole number and at least 1.
pub fn suggested_fps(left: &GifClip, right: &GifClip) -> u32 {
    let fps = left.average_fps().max(right.average_fps());
    (fps.round() as u32).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid_clip(count: usize, width: u32, height: u32, rgba: [u8; 4], delay: u32) -> GifClip {
        let frame = RgbaImage::from_pixel(width, height, Rgba(rgba));
        GifClip::from_parts(vec![frame; count], vec![delay; count])
    }

    #[test]
    fn dimensions_are_reconciled() {
        let left = solid_clip(2, 10, 30, [255, 0, 0, 255], 100);
        let right = solid_clip(2, 20, 10, [0, 0, 255, 255], 100);

        let combined = hconcat(&left, &right, 50).unwrap();
        assert_eq!(combined.dimensions(), (30, 30));
        assert_eq!(combined.len(), 2);
        assert_eq!(combined.delays_ms, vec![50, 50]);
    }

    #[test]
    fn shorter_clip_holds_its_last_frame() {
        let left = solid_clip(1, 10, 10, [255, 0, 0, 255], 100);
        let right = solid_clip(3, 10, 10, [0, 0, 255, 255], 100);

        let combined = hconcat(&left, &right, 100).unwrap();
        assert_eq!(combined.len(), 3);
        // Left half of the final frame still shows the left clip's only frame
        assert_eq!(*combined.frames[2].get_pixel(5, 5), Rgba([255, 0, 0, 255]));
        assert_eq!(*combined.frames[2].get_pixel(15, 5), Rgba([0, 0, 255, 255]));
    }

    #[test]
    fn short_frames_are_centred_on_white() {
        let left = solid_clip(1, 10, 10, [255, 0, 0, 255], 100);
        let right = solid_clip(1, 10, 30, [0, 0, 255, 255], 100);

        let combined = hconcat(&left, &right, 100).unwrap();
        assert_eq!(combined.dimensions(), (20, 30));

        let frame = &combined.frames[0];
        // Above and below the centred left frame: white canvas
        assert_eq!(*frame.get_pixel(5, 2), CANVAS_FILL);
        assert_eq!(*frame.get_pixel(5, 28), CANVAS_FILL);
        // Centre band: left clip pixels at y in [10, 20)
        assert_eq!(*frame.get_pixel(5, 15), Rgba([255, 0, 0, 255]));
        // Right clip fills its full column
        assert_eq!(*frame.get_pixel(15, 2), Rgba([0, 0, 255, 255]));
    }

    #[test]
    fn oversized_later_frames_are_clipped_not_panicked() {
        // The canvas height comes from the first frames; a later frame that
        // is taller than the canvas must not underflow the centring offset.
        let left = GifClip::from_parts(
            vec![
                RgbaImage::from_pixel(10, 10, Rgba([255, 0, 0, 255])),
                RgbaImage::from_pixel(10, 30, Rgba([0, 255, 0, 255])),
            ],
            vec![100, 100],
        );
        let right = solid_clip(2, 10, 10, [0, 0, 255, 255], 100);

        let combined = hconcat(&left, &right, 100).unwrap();
        assert_eq!(combined.dimensions(), (20, 10));
        // The oversized frame is drawn from the top and clipped
        assert_eq!(*combined.frames[1].get_pixel(5, 0), Rgba([0, 255, 0, 255]));
        assert_eq!(*combined.frames[1].get_pixel(5, 9), Rgba([0, 255, 0, 255]));
    }

    #[test]
    fn empty_side_errors() {
        let left = solid_clip(1, 10, 10, [0; 4], 100);
        let empty = GifClip::from_parts(Vec::new(), Vec::new());
        assert!(matches!(
            hconcat(&left, &empty, 100),
            Err(GifError::EmptyClip)
        ));
        assert!(matches!(
            hconcat(&empty, &left, 100),
            Err(GifError::EmptyClip)
        ));
    }

    #[test]
    fn suggested_fps_takes_the_faster_clip() {
        let slow = solid_clip(2, 8, 8, [0; 4], 200); // 5 fps
        let fast = solid_clip(2, 8, 8, [0; 4], 40); // 25 fps
        assert_eq!(suggested_fps(&slow, &fast), 25);
        assert_eq!(suggested_fps(&fast, &slow), 25);
    }
}
