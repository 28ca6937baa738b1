//! Shared value types: output sizing and frame-rate conversions.

use crate::error::{GifError, GifResult};

/// Smallest accepted output dimension in pixels.
pub const MIN_DIMENSION: u32 = 16;
/// Largest accepted output dimension in pixels.
pub const MAX_DIMENSION: u32 = 4096;

/// Lowest accepted frame rate.
pub const MIN_FPS: f64 = 0.5;
/// Highest accepted frame rate.
pub const MAX_FPS: f64 = 120.0;

/// Requested output dimensions for a resize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeTarget {
    pub width: u32,
    pub height: u32,
}

impl ResizeTarget {
    /// Build a target with both sides clamped to the accepted range.
    pub fn clamped(width: u32, height: u32) -> Self {
        Self {
            width: width.clamp(MIN_DIMENSION, MAX_DIMENSION),
            height: height.clamp(MIN_DIMENSION, MAX_DIMENSION),
        }
    }
}

/// Derive a height for `width` that preserves the reference aspect ratio.
///
/// Returns `None` when the reference has a zero side. The result is
/// rounded and clamped to the accepted dimension range.
pub fn height_for_width(reference: (u32, u32), width: u32) -> Option<u32> {
    let (ref_w, ref_h) = reference;
    if ref_w == 0 || ref_h == 0 {
        return None;
    }
    let height = (f64::from(width) * f64::from(ref_h) / f64::from(ref_w)).round() as u32;
    Some(height.clamp(MIN_DIMENSION, MAX_DIMENSION))
}

/// Derive a width for `height` that preserves the reference aspect ratio.
pub fn width_for_height(reference: (u32, u32), height: u32) -> Option<u32> {
    let (ref_w, ref_h) = reference;
    if ref_w == 0 || ref_h == 0 {
        return None;
    }
    let width = (f64::from(height) * f64::from(ref_w) / f64::from(ref_h)).round() as u32;
    Some(width.clamp(MIN_DIMENSION, MAX_DIMENSION))
}

/// Convert a frame rate to a per-frame delay in milliseconds.
///
/// The delay is rounded and never drops below 1 ms.
pub fn delay_ms_for_fps(fps: f64) -> GifResult<u32> {
    if !fps.is_finite() || fps <= 0.0 {
        return Err(GifError::InvalidFps);
    }
    Ok(((1000.0 / fps).round() as u32).max(1))
}

/// Convert a per-frame delay in milliseconds to a frame rate.
pub fn fps_for_delay_ms(delay_ms: u32) -> f64 {
    if delay_ms == 0 {
        return 0.0;
    }
    1000.0 / f64::from(delay_ms)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resize_target_clamps_both_sides() {
        let target = ResizeTarget::clamped(4, 10_000);
        assert_eq!(target.width, MIN_DIMENSION);
        assert_eq!(target.height, MAX_DIMENSION);
    }

    #[test]
    fn aspect_ratio_derivation_rounds() {
        // 640x480 reference, width 512 -> height 384
        assert_eq!(height_for_width((640, 480), 512), Some(384));
        assert_eq!(width_for_height((640, 480), 384), Some(512));

        // 3:2 reference rounds rather than truncates
        assert_eq!(height_for_width((3, 2), 100), Some(67));
    }

    #[test]
    fn aspect_ratio_rejects_degenerate_reference() {
        assert_eq!(height_for_width((0, 480), 512), None);
        assert_eq!(width_for_height((640, 0), 512), None);
    }

    #[test]
    fn aspect_ratio_result_is_clamped() {
        assert_eq!(height_for_width((1, 100), 100), Some(MAX_DIMENSION));
        assert_eq!(height_for_width((100, 1), 100), Some(MIN_DIMENSION));
    }

    #[test]
    fn fps_to_delay_conversions() {
        assert_eq!(delay_ms_for_fps(10.0).unwrap(), 100);
        assert_eq!(delay_ms_for_fps(30.0).unwrap(), 33);
        // Very high rates still yield at least 1 ms
        assert_eq!(delay_ms_for_fps(5000.0).unwrap(), 1);

        assert!(delay_ms_for_fps(0.0).is_err());
        assert!(delay_ms_for_fps(-5.0).is_err());
        assert!(delay_ms_for_fps(f64::NAN).is_err());

        assert!((fps_for_delay_ms(100) - 10.0).abs() < 1e-9);
        assert_eq!(fps_for_delay_ms(0), 0.0);
    }
}
