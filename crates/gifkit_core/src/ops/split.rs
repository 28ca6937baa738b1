//! Export every frame of a clip as numbered PNG stills.

use std::path::{Path, PathBuf};

use image::imageops::FilterType;

use crate::clip::GifClip;
use crate::error::{GifError, GifResult};
use crate::models::ResizeTarget;

/// Settings for exporting frames as stills.
#[derive(Debug, Clone, Copy, Default)]
pub struct SplitOptions {
    /// Optional uniform output size applied to every exported frame.
    pub resize: Option<ResizeTarget>,
}

/// Zero-padding width for frame numbers up to `total`.
///
/// At least three digits are used so short clips still sort lexically.
/// When the total lands exactly on a power of ten the width grows by one,
/// keeping e.g. frame 100 of 100 at the same width as frame 1.
pub fn padding_for(total: usize) -> usize {
    let digits = total.to_string();
    let mut width = digits.len();
    if width > 1 && digits.starts_with('1') && digits[1..].bytes().all(|b| b == b'0') {
        width += 1;
    }
    width.max(3)
}

/// Write every frame of `clip` into `out_dir` as `{stem}_{NNN}.png`.
///
/// Numbering starts at 1. Returns the written paths in frame order.
pub fn split(
    clip: &GifClip,
    out_dir: &Path,
    stem: &str,
    options: &SplitOptions,
) -> GifResult<Vec<PathBuf>> {
    if clip.is_empty() {
        return Err(GifError::EmptyClip);
    }

    std::fs::create_dir_all(out_dir).map_err(|e| GifError::write(out_dir, e))?;

    let width = padding_for(clip.len());
    let mut written = Vec::with_capacity(clip.len());

    for (index, frame) in clip.frames.iter().enumerate() {
        let path = out_dir.join(format!("{stem}_{:0width$}.png", index + 1));

        let result = match options.resize {
            Some(target) => image::imageops::resize(
                frame,
                target.width,
                target.height,
                FilterType::Lanczos3,
            )
            .save(&path),
            None => frame.save(&path),
        };
        result.map_err(|e| GifError::encode(&path, e))?;

        written.push(path);
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};
    use tempfile::tempdir;

    fn clip_of(count: usize) -> GifClip {
        let frames = (0..count)
            .map(|i| RgbaImage::from_pixel(20, 10, Rgba([i as u8, 0, 0, 255])))
            .collect();
        GifClip::from_parts(frames, vec![100; count])
    }

    #[test]
    fn padding_grows_with_the_frame_count() {
        assert_eq!(padding_for(0), 3);
        assert_eq!(padding_for(1), 3);
        assert_eq!(padding_for(9), 3);
        assert_eq!(padding_for(10), 3);
        assert_eq!(padding_for(99), 3);
        assert_eq!(padding_for(100), 4);
        assert_eq!(padding_for(101), 3);
        assert_eq!(padding_for(999), 3);
        assert_eq!(padding_for(1000), 5);
    }

    #[test]
    fn writes_numbered_stills_in_frame_order() {
        let dir = tempdir().unwrap();
        let clip = clip_of(3);

        let paths = split(&clip, dir.path(), "shot", &SplitOptions::default()).unwrap();

        assert_eq!(
            paths,
            vec![
                dir.path().join("shot_001.png"),
                dir.path().join("shot_002.png"),
                dir.path().join("shot_003.png"),
            ]
        );
        for (i, path) in paths.iter().enumerate() {
            let still = image::open(path).unwrap().to_rgba8();
            assert_eq!(still.get_pixel(0, 0)[0], i as u8);
        }
    }

    #[test]
    fn creates_the_output_directory() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("frames").join("run1");

        let paths = split(&clip_of(1), &nested, "f", &SplitOptions::default()).unwrap();
        assert!(paths[0].exists());
    }

    #[test]
    fn resize_applies_to_exports() {
        let dir = tempdir().unwrap();
        let options = SplitOptions {
            resize: Some(ResizeTarget {
                width: 40,
                height: 40,
            }),
        };

        let paths = split(&clip_of(2), dir.path(), "f", &options).unwrap();
        for path in paths {
            let still = image::open(path).unwrap();
            assert_eq!((still.width(), still.height()), (40, 40));
        }
    }

    #[test]
    fn empty_clip_errors() {
        let dir = tempdir().unwrap();
        let clip = GifClip::from_parts(Vec::new(), Vec::new());
        assert!(matches!(
            split(&clip, dir.path(), "f", &SplitOptions::default()),
            Err(GifError::EmptyClip)
        ));
    }
}
