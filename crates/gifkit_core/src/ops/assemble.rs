//! Build a GIF clip from a list of still images.

use std::path::{Path, PathBuf};

use image::imageops::FilterType;

use crate::clip::GifClip;
use crate::error::{GifError, GifResult};
use crate::models::ResizeTarget;

/// File extensions accepted as still-image input.
pub const SUPPORTED_EXTENSIONS: &[&str] =
    &["png", "jpg", "jpeg", "bmp", "gif", "tiff", "webp"];

/// Settings for assembling stills into an animation.
#[derive(Debug, Clone, Copy)]
pub struct AssembleOptions {
    /// Display duration of every frame in milliseconds.
    pub delay_ms: u32,
    /// Optional uniform output size applied to every frame.
    pub resize: Option<ResizeTarget>,
}

/// Whether a path has a supported still-image extension.
pub fn is_supported_still(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            SUPPORTED_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

/// Decode the given stills, in list order, into a uniform-delay clip.
///
/// Files that cannot be decoded are skipped with a warning, matching the
/// forgiving behaviour of the drop target. Animated inputs contribute only
/// their first frame. Errors only when no input decodes at all.
pub fn assemble(paths: &[PathBuf], options: &AssembleOptions) -> GifResult<GifClip> {
    let mut frames = Vec::with_capacity(paths.len());

    for path in paths {
        let image = match image::open(path) {
            Ok(image) => image.to_rgba8(),
            Err(e) => {
                tracing::warn!("Skipping unreadable image {}: {}", path.display(), e);
                continue;
            }
        };

        let image = match options.resize {
            Some(target) => image::imageops::resize(
                &image,
                target.width,
                target.height,
                FilterType::Lanczos3,
            ),
            None => image,
        };

        frames.push(image);
    }

    if frames.is_empty() {
        return Err(GifError::NoInputs);
    }

    let delay_ms = options.delay_ms.max(1);
    let delays_ms = vec![delay_ms; frames.len()];
    Ok(GifClip::from_parts(frames, delays_ms))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};
    use tempfile::tempdir;

    fn write_png(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
        let path = dir.join(name);
        RgbaImage::from_pixel(width, height, Rgba([10, 20, 30, 255]))
            .save(&path)
            .unwrap();
        path
    }

    #[test]
    fn assembles_in_list_order_with_uniform_delay() {
        let dir = tempdir().unwrap();
        let paths = vec![
            write_png(dir.path(), "b.png", 32, 24),
            write_png(dir.path(), "a.png", 32, 24),
            write_png(dir.path(), "c.png", 32, 24),
        ];

        let clip = assemble(
            &paths,
            &AssembleOptions {
                delay_ms: 40,
                resize: None,
            },
        )
        .unwrap();

        assert_eq!(clip.len(), 3);
        assert_eq!(clip.dimensions(), (32, 24));
        assert_eq!(clip.delays_ms, vec![40, 40, 40]);
    }

    #[test]
    fn unreadable_inputs_are_skipped() {
        let dir = tempdir().unwrap();
        let good = write_png(dir.path(), "good.png", 16, 16);
        let bad = dir.path().join("bad.png");
        std::fs::write(&bad, b"not an image").unwrap();

        let clip = assemble(
            &[bad, good],
            &AssembleOptions {
                delay_ms: 100,
                resize: None,
            },
        )
        .unwrap();

        assert_eq!(clip.len(), 1);
    }

    #[test]
    fn all_unreadable_is_an_error() {
        let dir = tempdir().unwrap();
        let bad = dir.path().join("bad.png");
        std::fs::write(&bad, b"junk").unwrap();

        let result = assemble(
            &[bad],
            &AssembleOptions {
                delay_ms: 100,
                resize: None,
            },
        );
        assert!(matches!(result, Err(GifError::NoInputs)));
    }

    #[test]
    fn resize_applies_to_every_frame() {
        let dir = tempdir().unwrap();
        let paths = vec![
            write_png(dir.path(), "one.png", 64, 48),
            write_png(dir.path(), "two.png", 100, 20),
        ];

        let clip = assemble(
            &paths,
            &AssembleOptions {
                delay_ms: 100,
                resize: Some(ResizeTarget {
                    width: 32,
                    height: 32,
                }),
            },
        )
        .unwrap();

        for frame in &clip.frames {
            assert_eq!((frame.width(), frame.height()), (32, 32));
        }
    }

    #[test]
    fn zero_delay_is_raised_to_one() {
        let dir = tempdir().unwrap();
        let paths = vec![write_png(dir.path(), "one.png", 16, 16)];

        let clip = assemble(
            &paths,
            &AssembleOptions {
                delay_ms: 0,
                resize: None,
            },
        )
        .unwrap();
        assert_eq!(clip.delays_ms, vec![1]);
    }

    #[test]
    fn extension_filter() {
        assert!(is_supported_still(Path::new("/tmp/photo.PNG")));
        assert!(is_supported_still(Path::new("shot.jpeg")));
        assert!(!is_supported_still(Path::new("movie.mp4")));
        assert!(!is_supported_still(Path::new("noext")));
    }
}
