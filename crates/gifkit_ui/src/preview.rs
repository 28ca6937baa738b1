//! Animated preview state for decoded clips.
//!
//! Frames are converted once into iced image handles; playback advances on a
//! timer subscription driven by the current frame's own delay.

use std::time::Duration;

use iced::widget::image::Handle;
use image::RgbaImage;

use gifkit_core::clip::GifClip;

/// Convert an RGBA frame buffer into an iced image handle.
pub fn handle_for(frame: &RgbaImage) -> Handle {
    Handle::from_rgba(frame.width(), frame.height(), frame.as_raw().clone())
}

/// Playback state over a decoded clip.
#[derive(Debug, Clone, Default)]
pub struct Playback {
    handles: Vec<Handle>,
    delays_ms: Vec<u32>,
    current: usize,
    playing: bool,
}

impl Playback {
    /// Build playback state from a clip, starting at frame 0, playing.
    pub fn from_clip(clip: &GifClip) -> Self {
        Self {
            handles: clip.frames.iter().map(handle_for).collect(),
            delays_ms: clip.delays_ms.clone(),
            current: 0,
            playing: true,
        }
    }

    /// Number of frames.
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    /// Whether there is nothing to show.
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Index of the frame currently shown.
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Handle of the frame currently shown.
    pub fn current_handle(&self) -> Option<&Handle> {
        self.handles.get(self.current)
    }

    /// How long the current frame stays on screen.
    pub fn current_delay(&self) -> Duration {
        let ms = self
            .delays_ms
            .get(self.current)
            .copied()
            .unwrap_or(gifkit_core::clip::DEFAULT_DELAY_MS);
        Duration::from_millis(u64::from(ms))
    }

    /// Whether the timer subscription should be running.
    pub fn is_playing(&self) -> bool {
        self.playing && self.handles.len() > 1
    }

    /// Toggle play/pause.
    pub fn toggle(&mut self) {
        self.playing = !self.playing;
    }

    /// Advance to the next frame, wrapping at the end.
    pub fn advance(&mut self) {
        if !self.handles.is_empty() {
            self.current = (self.current + 1) % self.handles.len();
        }
    }

    /// Jump to a frame and pause there.
    pub fn seek(&mut self, index: usize) {
        if !self.handles.is_empty() {
            self.current = index.min(self.handles.len() - 1);
            self.playing = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn clip(delays: &[u32]) -> GifClip {
        let frames = delays
            .iter()
            .map(|_| RgbaImage::from_pixel(4, 4, Rgba([1, 2, 3, 255])))
            .collect();
        GifClip::from_parts(frames, delays.to_vec())
    }

    #[test]
    fn advance_wraps_around() {
        let mut playback = Playback::from_clip(&clip(&[50, 60, 70]));
        assert_eq!(playback.current_index(), 0);
        playback.advance();
        playback.advance();
        assert_eq!(playback.current_index(), 2);
        assert_eq!(playback.current_delay(), Duration::from_millis(70));
        playback.advance();
        assert_eq!(playback.current_index(), 0);
    }

    #[test]
    fn seek_clamps_and_pauses() {
        let mut playback = Playback::from_clip(&clip(&[50, 60]));
        assert!(playback.is_playing());
        playback.seek(99);
        assert_eq!(playback.current_index(), 1);
        assert!(!playback.is_playing());
    }

    #[test]
    fn single_frame_never_plays() {
        let playback = Playback::from_clip(&clip(&[100]));
        assert!(!playback.is_playing());
    }
}
