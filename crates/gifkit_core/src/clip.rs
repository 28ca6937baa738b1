//! Decoded GIF clips: loading, saving, and basic queries.
//!
//! A [`GifClip`] is the in-memory form every tool works on: a list of
//! full-canvas RGBA frames in source order plus a per-frame delay in
//! milliseconds. Decoding and encoding are fully delegated to the `image`
//! crate's GIF codec.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::Path;

use image::codecs::gif::{GifDecoder, GifEncoder, Repeat};
use image::{AnimationDecoder, Delay, Frame, RgbaImage};

use crate::error::{GifError, GifResult};

/// Delay applied when a frame carries no usable delay of its own.
pub const DEFAULT_DELAY_MS: u32 = 100;

/// Encoder speed passed to the GIF quantizer (1 = best quality, 30 = fastest).
const ENCODE_SPEED: i32 = 10;

/// An animated GIF decoded into RGBA frames.
#[derive(Debug, Clone)]
pub struct GifClip {
    /// Frames in source order, each the full canvas size.
    pub frames: Vec<RgbaImage>,
    /// Display duration of each frame in milliseconds.
    pub delays_ms: Vec<u32>,
}

impl GifClip {
    /// Build a clip from frames and matching delays.
    pub fn from_parts(frames: Vec<RgbaImage>, delays_ms: Vec<u32>) -> Self {
        debug_assert_eq!(frames.len(), delays_ms.len());
        Self { frames, delays_ms }
    }

    /// Decode a GIF file into a clip.
    ///
    /// Every frame is converted to RGBA at the full canvas size. Frames
    /// with a missing or zero delay fall back to [`DEFAULT_DELAY_MS`].
    pub fn load(path: impl AsRef<Path>) -> GifResult<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| GifError::read(path, e))?;
        let decoder =
            GifDecoder::new(BufReader::new(file)).map_err(|e| GifError::decode(path, e))?;
        let decoded = decoder
            .into_frames()
            .collect_frames()
            .map_err(|e| GifError::decode(path, e))?;

        if decoded.is_empty() {
            return Err(GifError::NoFrames(path.to_path_buf()));
        }

        let mut frames = Vec::with_capacity(decoded.len());
        let mut delays_ms = Vec::with_capacity(decoded.len());
        for frame in decoded {
            let (numer, denom) = frame.delay().numer_denom_ms();
            let ms = if denom == 0 { 0 } else { numer / denom };
            delays_ms.push(if ms == 0 { DEFAULT_DELAY_MS } else { ms });
            frames.push(frame.into_buffer());
        }

        Ok(Self { frames, delays_ms })
    }

    /// Encode the clip to a GIF file with infinite looping.
    ///
    /// Parent directories are created as needed.
    pub fn save(&self, path: impl AsRef<Path>) -> GifResult<()> {
        let path = path.as_ref();
        if self.frames.is_empty() {
            return Err(GifError::EmptyClip);
        }

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| GifError::write(path, e))?;
            }
        }

        let file = File::create(path).map_err(|e| GifError::write(path, e))?;
        let mut encoder = GifEncoder::new_with_speed(BufWriter::new(file), ENCODE_SPEED);
        encoder
            .set_repeat(Repeat::Infinite)
            .map_err(|e| GifError::encode(path, e))?;

        for (buffer, &delay_ms) in self.frames.iter().zip(&self.delays_ms) {
            let frame = Frame::from_parts(
                buffer.clone(),
                0,
                0,
                Delay::from_numer_denom_ms(delay_ms, 1),
            );
            encoder
                .encode_frame(frame)
                .map_err(|e| GifError::encode(path, e))?;
        }

        Ok(())
    }

    /// Canvas dimensions, taken from the first frame.
    pub fn dimensions(&self) -> (u32, u32) {
        self.frames
            .first()
            .map(|f| (f.width(), f.height()))
            .unwrap_or((0, 0))
    }

    /// Number of frames.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Whether the clip has no frames.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Average frame rate derived from the per-frame delays.
    ///
    /// Falls back to 10 fps when the clip is empty or its delays sum to zero.
    pub fn average_fps(&self) -> f64 {
        if self.delays_ms.is_empty() {
            return 10.0;
        }
        let total: u64 = self.delays_ms.iter().map(|&d| u64::from(d)).sum();
        if total == 0 {
            return 10.0;
        }
        let avg_ms = total as f64 / self.delays_ms.len() as f64;
        1000.0 / avg_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;
    use tempfile::tempdir;

    fn solid_frame(width: u32, height: u32, rgba: [u8; 4]) -> RgbaImage {
        RgbaImage::from_pixel(width, height, Rgba(rgba))
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("clip.gif");

        let clip = GifClip::from_parts(
            vec![
                solid_frame(20, 16, [255, 0, 0, 255]),
                solid_frame(20, 16, [0, 255, 0, 255]),
                solid_frame(20, 16, [0, 0, 255, 255]),
            ],
            vec![100, 100, 200],
        );
        clip.save(&path).unwrap();

        let loaded = GifClip::load(&path).unwrap();
        assert_eq!(loaded.len(), 3);
        assert_eq!(loaded.dimensions(), (20, 16));
        assert_eq!(loaded.delays_ms, vec![100, 100, 200]);
    }

    #[test]
    fn zero_delay_defaults_on_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("zero.gif");

        let clip = GifClip::from_parts(vec![solid_frame(8, 8, [0, 0, 0, 255])], vec![0]);
        clip.save(&path).unwrap();

        let loaded = GifClip::load(&path).unwrap();
        assert_eq!(loaded.delays_ms, vec![DEFAULT_DELAY_MS]);
    }

    #[test]
    fn save_creates_parent_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("out").join("clip.gif");

        let clip = GifClip::from_parts(vec![solid_frame(8, 8, [1, 2, 3, 255])], vec![50]);
        clip.save(&path).unwrap();

        assert!(path.exists());
    }

    #[test]
    fn save_empty_clip_errors() {
        let dir = tempdir().unwrap();
        let clip = GifClip::from_parts(Vec::new(), Vec::new());
        assert!(matches!(
            clip.save(dir.path().join("empty.gif")),
            Err(GifError::EmptyClip)
        ));
    }

    #[test]
    fn load_missing_file_errors() {
        let err = GifClip::load("/no/such/file.gif").unwrap_err();
        assert!(matches!(err, GifError::Read { .. }));
    }

    #[test]
    fn load_non_gif_errors() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("not_a.gif");
        std::fs::write(&path, b"definitely not a gif").unwrap();
        let err = GifClip::load(&path).unwrap_err();
        assert!(matches!(err, GifError::Decode { .. }));
    }

    #[test]
    fn average_fps_from_delays() {
        let clip = GifClip::from_parts(
            vec![solid_frame(4, 4, [0; 4]), solid_frame(4, 4, [0; 4])],
            vec![100, 100],
        );
        assert!((clip.average_fps() - 10.0).abs() < 1e-9);

        let empty = GifClip::from_parts(Vec::new(), Vec::new());
        assert!((empty.average_fps() - 10.0).abs() < 1e-9);
    }
}
