//! GIF Combiner: join two GIFs side by side into one.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use iced::widget::{button, column, container, image as image_widget, row, slider, text, Space};
use iced::{window, Alignment, Element, Event, Length, Subscription, Task, Theme};

use gifkit_core::clip::GifClip;
use gifkit_core::config::{ConfigManager, ConfigSection};
use gifkit_core::models;
use gifkit_core::ops;

use crate::preview::{handle_for, Playback};
use crate::theme::{colors, font, spacing};
use crate::util;
use crate::widgets;

/// Which slot a clip was loaded into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// A loaded input clip plus a static thumbnail of its first frame.
struct Slot {
    path: PathBuf,
    clip: GifClip,
    thumb: iced::widget::image::Handle,
}

impl Slot {
    fn new(path: PathBuf, clip: GifClip) -> Self {
        let thumb = handle_for(&clip.frames[0]);
        Self { path, clip, thumb }
    }
}

/// Application state for the combiner window.
pub struct CombinerApp {
    config: Arc<Mutex<ConfigManager>>,

    left: Option<Slot>,
    right: Option<Slot>,

    fps_input: String,
    output_path: String,
    playback: Playback,

    hovering: bool,
    busy: bool,
    status: String,
    status_is_error: bool,
}

#[derive(Debug, Clone)]
pub enum Message {
    FileHovered,
    FilesHoveredLeft,
    FileDropped(PathBuf),

    Browse(Side),
    SideSelected(Side, Option<PathBuf>),
    ClipLoaded(Side, Result<(PathBuf, GifClip), String>),
    Clear(Side),
    Swap,

    FpsChanged(String),
    PreviewBuilt(Result<GifClip, String>),
    FrameSelected(u32),
    TogglePlay,
    Tick,

    OutputChanged(String),
    BrowseOutput,
    OutputSelected(Option<PathBuf>),

    Save,
    Saved(Result<PathBuf, String>),
}

impl CombinerApp {
    pub fn new(config: Arc<Mutex<ConfigManager>>) -> (Self, Task<Message>) {
        let fps = {
            let cfg = config.lock().unwrap();
            cfg.settings().encode.default_fps
        };
        let app = Self {
            config,
            left: None,
            right: None,
            fps_input: format!("{fps}"),
            output_path: String::new(),
            playback: Playback::default(),
            hovering: false,
            busy: false,
            status: "Drop two GIFs here to begin".to_string(),
            status_is_error: false,
        };
        (app, Task::none())
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::FileHovered => {
                self.hovering = true;
                Task::none()
            }
            Message::FilesHoveredLeft => {
                self.hovering = false;
                Task::none()
            }
            Message::FileDropped(path) => {
                self.hovering = false;
                let path = PathBuf::from(util::clean_file_url(&path.to_string_lossy()));
                // Drops fill the left slot first, then the right.
                let side = if self.left.is_none() {
                    Side::Left
                } else {
                    Side::Right
                };
                self.accept_input(side, path)
            }

            Message::Browse(side) => self.browse_input(side),
            Message::SideSelected(side, path) => match path {
                Some(p) => self.accept_input(side, p),
                None => Task::none(),
            },
            Message::ClipLoaded(side, Ok((path, clip))) => {
                let slot = Slot::new(path, clip);
                match side {
                    Side::Left => self.left = Some(slot),
                    Side::Right => self.right = Some(slot),
                }
                self.on_inputs_changed()
            }
            Message::ClipLoaded(_, Err(e)) => {
                self.set_error(e);
                Task::none()
            }
            Message::Clear(side) => {
                match side {
                    Side::Left => self.left = None,
                    Side::Right => self.right = None,
                }
                self.playback = Playback::default();
                self.set_status("Drop two GIFs here to begin");
                Task::none()
            }
            Message::Swap => {
                std::mem::swap(&mut self.left, &mut self.right);
                self.on_inputs_changed()
            }

            Message::FpsChanged(value) => {
                self.fps_input = value;
                self.rebuild_preview()
            }
            Message::PreviewBuilt(Ok(clip)) => {
                self.set_status(format!(
                    "Combined: {} frame(s), {}x{}",
                    clip.len(),
                    clip.dimensions().0,
                    clip.dimensions().1
                ));
                self.playback = Playback::from_clip(&clip);
                Task::none()
            }
            Message::PreviewBuilt(Err(e)) => {
                self.playback = Playback::default();
                self.set_error(e);
                Task::none()
            }
            Message::FrameSelected(index) => {
                self.playback.seek(index as usize);
                Task::none()
            }
            Message::TogglePlay => {
                self.playback.toggle();
                Task::none()
            }
            Message::Tick => {
                self.playback.advance();
                Task::none()
            }

            Message::OutputChanged(value) => {
                self.output_path = value;
                Task::none()
            }
            Message::BrowseOutput => {
                let name = self
                    .left
                    .as_ref()
                    .map(|s| format!("{}_combined.gif", util::stem_of(&s.path)))
                    .unwrap_or_else(|| "combined.gif".to_string());
                Task::perform(
                    async move {
                        rfd::AsyncFileDialog::new()
                            .set_title("Save Combined GIF As")
                            .add_filter("GIF Files", &["gif"])
                            .set_file_name(&name)
                            .save_file()
                            .await
                            .map(|f| f.path().to_path_buf())
                    },
                    Message::OutputSelected,
                )
            }
            Message::OutputSelected(path) => {
                if let Some(p) = path {
                    self.output_path = util::ensure_gif_extension(&p)
                        .to_string_lossy()
                        .to_string();
                }
                Task::none()
            }

            Message::Save => self.save_combined(),
            Message::Saved(Ok(path)) => {
                self.busy = false;
                self.set_status(format!("Saved {}", path.display()));
                Task::none()
            }
            Message::Saved(Err(e)) => {
                self.busy = false;
                self.set_error(e);
                Task::none()
            }
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        let inputs_section = widgets::group_box(
            "Inputs",
            column![
                row![
                    self.slot_view(Side::Left),
                    self.slot_view(Side::Right),
                ]
                .spacing(spacing::MD),
                row![
                    button(text("Swap").size(font::NORMAL)).on_press(Message::Swap),
                    widgets::labeled_input("FPS", &self.fps_input, Message::FpsChanged),
                ]
                .spacing(spacing::MD)
                .align_y(Alignment::Center),
            ]
            .spacing(spacing::SM)
            .into(),
        );

        let preview_section = widgets::group_box("Preview", self.preview_view());

        let save_label = if self.busy { "Saving..." } else { "Save Combined GIF" };
        let mut save_button = button(text(save_label).size(font::MD));
        if !self.busy && self.left.is_some() && self.right.is_some() {
            save_button = save_button.on_press(Message::Save);
        }

        let bottom = column![
            widgets::path_input_row(
                "Output",
                &self.output_path,
                "combined.gif",
                Message::OutputChanged,
                Message::BrowseOutput,
            ),
            row![
                widgets::status_line(&self.status, self.status_is_error),
                Space::new(Length::Shrink, Length::Shrink).width(Length::Fill),
                save_button,
            ]
            .align_y(Alignment::Center)
            .spacing(spacing::SM),
        ]
        .spacing(spacing::SM);

        container(
            column![inputs_section, preview_section, bottom]
                .spacing(spacing::MD)
                .padding(spacing::MD),
        )
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
    }

    pub fn subscription(&self) -> Subscription<Message> {
        let drops = iced::event::listen_with(|event, _status, _window| match event {
            Event::Window(window::Event::FileDropped(path)) => Some(Message::FileDropped(path)),
            Event::Window(window::Event::FileHovered(_)) => Some(Message::FileHovered),
            Event::Window(window::Event::FilesHoveredLeft) => Some(Message::FilesHoveredLeft),
            _ => None,
        });

        if self.playback.is_playing() {
            Subscription::batch([
                drops,
                iced::time::every(self.playback.current_delay()).map(|_| Message::Tick),
            ])
        } else {
            drops
        }
    }

    pub fn theme(&self) -> Theme {
        Theme::Dark
    }

    fn slot_view(&self, side: Side) -> Element<'_, Message> {
        let label = match side {
            Side::Left => "Left",
            Side::Right => "Right",
        };
        let slot = match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        };

        let body: Element<'_, Message> = match slot {
            Some(slot) => column![
                container(image_widget(slot.thumb.clone()).height(120))
                    .width(Length::Fill)
                    .center_x(Length::Fill),
                text(format!(
                    "{} ({} frames, {}x{})",
                    util::stem_of(&slot.path),
                    slot.clip.len(),
                    slot.clip.dimensions().0,
                    slot.clip.dimensions().1
                ))
                .size(font::SM)
                .color(colors::TEXT_SECONDARY),
                row![
                    button(text("Browse...").size(font::SM)).on_press(Message::Browse(side)),
                    button(text("Clear").size(font::SM)).on_press(Message::Clear(side)),
                ]
                .spacing(spacing::SM),
            ]
            .spacing(spacing::XS)
            .align_x(Alignment::Center)
            .into(),
            None => column![
                widgets::drop_zone(format!("Drop the {} GIF here", label.to_lowercase()), self.hovering),
                button(text("Browse...").size(font::SM)).on_press(Message::Browse(side)),
            ]
            .spacing(spacing::XS)
            .align_x(Alignment::Center)
            .into(),
        };

        container(
            column![
                text(label).size(font::NORMAL).color(colors::TEXT_SECONDARY),
                body,
            ]
            .spacing(spacing::XS),
        )
        .width(Length::Fill)
        .into()
    }

    fn preview_view(&self) -> Element<'_, Message> {
        match self.playback.current_handle() {
            Some(handle) => {
                let play_label = if self.playback.is_playing() { "Pause" } else { "Play" };
                let last = self.playback.len().saturating_sub(1) as u32;
                column![
                    container(image_widget(handle.clone()).height(200))
                        .width(Length::Fill)
                        .center_x(Length::Fill),
                    row![
                        button(text(play_label).size(font::SM)).on_press(Message::TogglePlay),
                        slider(
                            0..=last,
                            self.playback.current_index() as u32,
                            Message::FrameSelected,
                        )
                        .width(Length::Fill),
                        text(format!(
                            "frame {}/{}",
                            self.playback.current_index() + 1,
                            self.playback.len()
                        ))
                        .size(font::SM)
                        .color(colors::TEXT_SECONDARY),
                    ]
                    .spacing(spacing::SM)
                    .align_y(Alignment::Center),
                ]
                .spacing(spacing::SM)
                .into()
            }
            None => text("Load both GIFs to see the combined preview")
                .size(font::NORMAL)
                .color(colors::TEXT_MUTED)
                .into(),
        }
    }

    /// React to a slot change: pick a suggested frame rate, default the
    /// output path, and rebuild the combined preview.
    fn on_inputs_changed(&mut self) -> Task<Message> {
        if let (Some(left), Some(right)) = (&self.left, &self.right) {
            self.fps_input = ops::suggested_fps(&left.clip, &right.clip).to_string();
            if self.output_path.is_empty() {
                self.output_path = util::sibling_with_suffix(&left.path, "combined")
                    .to_string_lossy()
                    .to_string();
            }
        }
        self.rebuild_preview()
    }

    fn rebuild_preview(&mut self) -> Task<Message> {
        let (Some(left), Some(right)) = (&self.left, &self.right) else {
            return Task::none();
        };
        let delay_ms = match self.parse_delay() {
            Ok(delay) => delay,
            Err(e) => {
                self.set_error(e);
                return Task::none();
            }
        };
        let left = left.clip.clone();
        let right = right.clip.clone();

        Task::perform(
            async move {
                tokio::task::spawn_blocking(move || {
                    ops::hconcat(&left, &right, delay_ms).map_err(|e| e.to_string())
                })
                .await
                .map_err(|e| format!("Task panicked: {e}"))?
            },
            Message::PreviewBuilt,
        )
    }

    fn save_combined(&mut self) -> Task<Message> {
        let (Some(left), Some(right)) = (&self.left, &self.right) else {
            return Task::none();
        };
        let delay_ms = match self.parse_delay() {
            Ok(delay) => delay,
            Err(e) => {
                self.set_error(e);
                return Task::none();
            }
        };
        if self.output_path.trim().is_empty() {
            self.set_error("Choose an output path first".to_string());
            return Task::none();
        }
        let output = util::ensure_gif_extension(Path::new(self.output_path.trim()));
        let left = left.clip.clone();
        let right = right.clip.clone();

        self.busy = true;
        self.set_status("Encoding...");
        Task::perform(
            async move {
                tokio::task::spawn_blocking(move || {
                    let combined =
                        ops::hconcat(&left, &right, delay_ms).map_err(|e| e.to_string())?;
                    combined.save(&output).map_err(|e| e.to_string())?;
                    Ok(output)
                })
                .await
                .map_err(|e| format!("Task panicked: {e}"))?
            },
            Message::Saved,
        )
    }

    fn parse_delay(&self) -> Result<u32, String> {
        let fps: f64 = self
            .fps_input
            .trim()
            .parse()
            .map_err(|_| format!("Invalid FPS: {}", self.fps_input))?;
        if !(1.0..=models::MAX_FPS).contains(&fps) {
            return Err(format!("FPS must be between 1 and {}", models::MAX_FPS));
        }
        models::delay_ms_for_fps(fps).map_err(|e| e.to_string())
    }

    fn accept_input(&mut self, side: Side, path: PathBuf) -> Task<Message> {
        if !util::is_gif(&path) {
            self.set_error(format!("Not a GIF: {}", path.display()));
            return Task::none();
        }
        self.remember_input_dir(&path);
        self.set_status("Loading...");
        Task::perform(
            async move {
                tokio::task::spawn_blocking(move || {
                    GifClip::load(&path)
                        .map(|clip| (path, clip))
                        .map_err(|e| e.to_string())
                })
                .await
                .map_err(|e| format!("Task panicked: {e}"))?
            },
            move |result| Message::ClipLoaded(side, result),
        )
    }

    fn browse_input(&self, side: Side) -> Task<Message> {
        let title = match side {
            Side::Left => "Select Left GIF",
            Side::Right => "Select Right GIF",
        };
        let start_dir = {
            let cfg = self.config.lock().unwrap();
            util::dialog_start_dir(&cfg.settings().paths.last_input_dir)
        };
        Task::perform(
            async move {
                rfd::AsyncFileDialog::new()
                    .set_title(title)
                    .set_directory(start_dir)
                    .add_filter("GIF Files", &["gif"])
                    .pick_file()
                    .await
                    .map(|f| f.path().to_path_buf())
            },
            move |path| Message::SideSelected(side, path),
        )
    }

    fn remember_input_dir(&self, path: &Path) {
        if let Some(parent) = path.parent() {
            let mut cfg = self.config.lock().unwrap();
            cfg.settings_mut().paths.last_input_dir = parent.to_string_lossy().to_string();
            if let Err(e) = cfg.update_section(ConfigSection::Paths) {
                tracing::warn!("Failed to save last input dir: {}", e);
            }
        }
    }

    fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
        self.status_is_error = false;
    }

    fn set_error(&mut self, status: impl Into<String>) {
        let status = status.into();
        tracing::warn!("{}", status);
        self.status = status;
        self.status_is_error = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};
    use tempfile::{tempdir, TempDir};

    fn app() -> (CombinerApp, TempDir) {
        let dir = tempdir().unwrap();
        let config = ConfigManager::new(dir.path().join("gifkit.toml"));
        let (app, _) = CombinerApp::new(Arc::new(Mutex::new(config)));
        (app, dir)
    }

    fn clip_of(count: usize) -> GifClip {
        let frames = (0..count)
            .map(|_| RgbaImage::from_pixel(4, 4, Rgba([0, 0, 0, 255])))
            .collect();
        GifClip::from_parts(frames, vec![100; count])
    }

    #[test]
    fn slider_seeks_and_clamps_in_combined_preview() {
        let (mut app, _dir) = app();
        let _ = app.update(Message::PreviewBuilt(Ok(clip_of(3))));

        let _ = app.update(Message::FrameSelected(1));
        assert_eq!(app.playback.current_index(), 1);
        assert!(!app.playback.is_playing());

        // Out-of-range positions land on the last frame
        let _ = app.update(Message::FrameSelected(7));
        assert_eq!(app.playback.current_index(), 2);
    }

    #[test]
    fn fps_outside_range_is_rejected() {
        let (mut app, _dir) = app();
        app.fps_input = "5000".to_string();
        assert!(app.parse_delay().is_err());
        app.fps_input = "0.5".to_string();
        assert!(app.parse_delay().is_err());
        app.fps_input = "24".to_string();
        assert_eq!(app.parse_delay().unwrap(), 42);
    }
}
