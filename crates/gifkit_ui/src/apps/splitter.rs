//! GIF Splitter: export a GIF's frames as numbered PNG stills.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use iced::widget::{button, checkbox, column, container, image as image_widget, row, slider, text, Space};
use iced::{window, Alignment, Element, Event, Length, Subscription, Task, Theme};

use gifkit_core::clip::GifClip;
use gifkit_core::config::{ConfigManager, ConfigSection};
use gifkit_core::models::{self, ResizeTarget};
use gifkit_core::ops::{self, SplitOptions};

use crate::preview::Playback;
use crate::theme::{colors, font, spacing};
use crate::util;
use crate::widgets;

/// Application state for the splitter window.
pub struct SplitterApp {
    config: Arc<Mutex<ConfigManager>>,

    input_path: Option<PathBuf>,
    clip: Option<GifClip>,
    playback: Playback,

    out_dir: String,
    stem: String,
    resize_enabled: bool,
    keep_aspect: bool,
    reference_dims: Option<(u32, u32)>,
    width_input: String,
    height_input: String,

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

    BrowseInput,
    InputSelected(Option<PathBuf>),
    ClipLoaded(Result<(PathBuf, GifClip), String>),

    OutDirChanged(String),
    BrowseOutDir,
    OutDirSelected(Option<PathBuf>),
    StemChanged(String),
    ResizeToggled(bool),
    KeepAspectToggled(bool),
    WidthChanged(String),
    HeightChanged(String),

    FrameSelected(u32),
    TogglePlay,
    Tick,

    Split,
    SplitDone(Result<Vec<PathBuf>, String>),
}

impl SplitterApp {
    pub fn new(config: Arc<Mutex<ConfigManager>>) -> (Self, Task<Message>) {
        let (out_dir, width, height) = {
            let cfg = config.lock().unwrap();
            let s = cfg.settings();
            (
                s.paths.output_folder.clone(),
                s.encode.default_width,
                s.encode.default_height,
            )
        };
        let app = Self {
            config,
            input_path: None,
            clip: None,
            playback: Playback::default(),
            out_dir,
            stem: "frame".to_string(),
            resize_enabled: false,
            keep_aspect: true,
            reference_dims: None,
            width_input: width.to_string(),
            height_input: height.to_string(),
            hovering: false,
            busy: false,
            status: "Drop a GIF here to begin".to_string(),
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
                self.accept_input(path)
            }

            Message::BrowseInput => self.browse_input(),
            Message::InputSelected(path) => match path {
                Some(p) => self.accept_input(p),
                None => Task::none(),
            },
            Message::ClipLoaded(Ok((path, clip))) => {
                let (width, height) = clip.dimensions();
                self.stem = util::stem_of(&path);
                if let Some(parent) = path.parent() {
                    self.out_dir = parent.to_string_lossy().to_string();
                }
                self.width_input = width.to_string();
                self.height_input = height.to_string();
                self.reference_dims = Some((width, height));
                self.playback = Playback::from_clip(&clip);
                self.set_status(format!("{} frame(s), {}x{}", clip.len(), width, height));
                self.input_path = Some(path);
                self.clip = Some(clip);
                Task::none()
            }
            Message::ClipLoaded(Err(e)) => {
                self.set_error(e);
                Task::none()
            }

            Message::OutDirChanged(value) => {
                self.out_dir = value;
                Task::none()
            }
            Message::BrowseOutDir => Task::perform(
                async {
                    rfd::AsyncFileDialog::new()
                        .set_title("Select Output Directory")
                        .pick_folder()
                        .await
                        .map(|f| f.path().to_path_buf())
                },
                Message::OutDirSelected,
            ),
            Message::OutDirSelected(path) => {
                if let Some(p) = path {
                    self.out_dir = p.to_string_lossy().to_string();
                }
                Task::none()
            }
            Message::StemChanged(value) => {
                self.stem = value;
                Task::none()
            }
            Message::ResizeToggled(enabled) => {
                self.resize_enabled = enabled;
                Task::none()
            }
            Message::KeepAspectToggled(enabled) => {
                self.keep_aspect = enabled;
                Task::none()
            }
            Message::WidthChanged(value) => {
                self.width_input = value;
                if self.keep_aspect {
                    if let (Some(reference), Ok(width)) =
                        (self.reference_dims, self.width_input.trim().parse::<u32>())
                    {
                        if let Some(height) = models::height_for_width(reference, width) {
                            self.height_input = height.to_string();
                        }
                    }
                }
                Task::none()
            }
            Message::HeightChanged(value) => {
                self.height_input = value;
                if self.keep_aspect {
                    if let (Some(reference), Ok(height)) =
                        (self.reference_dims, self.height_input.trim().parse::<u32>())
                    {
                        if let Some(width) = models::width_for_height(reference, height) {
                            self.width_input = width.to_string();
                        }
                    }
                }
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

            Message::Split => self.split_frames(),
            Message::SplitDone(Ok(paths)) => {
                self.busy = false;
                let dir = paths
                    .first()
                    .and_then(|p| p.parent())
                    .map(|p| p.display().to_string())
                    .unwrap_or_default();
                self.set_status(format!("Wrote {} still(s) to {}", paths.len(), dir));
                Task::none()
            }
            Message::SplitDone(Err(e)) => {
                self.busy = false;
                self.set_error(e);
                Task::none()
            }
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        let input_section = widgets::group_box(
            "Input",
            column![
                widgets::drop_zone(
                    match &self.input_path {
                        Some(path) => path.to_string_lossy().to_string(),
                        None => "Drop a GIF here, or click Browse...".to_string(),
                    },
                    self.hovering,
                ),
                row![button(text("Browse...").size(font::NORMAL)).on_press(Message::BrowseInput)],
            ]
            .spacing(spacing::SM)
            .into(),
        );

        let resize_row = row![
            checkbox("Resize stills to", self.resize_enabled).on_toggle(Message::ResizeToggled),
            widgets::labeled_input("W", &self.width_input, Message::WidthChanged),
            widgets::labeled_input("H", &self.height_input, Message::HeightChanged),
            checkbox("Keep aspect", self.keep_aspect).on_toggle(Message::KeepAspectToggled),
        ]
        .spacing(spacing::MD)
        .align_y(Alignment::Center);

        let export_section = widgets::group_box(
            "Export",
            column![
                widgets::path_input_row(
                    "Folder",
                    &self.out_dir,
                    "output directory",
                    Message::OutDirChanged,
                    Message::BrowseOutDir,
                ),
                row![widgets::labeled_input("Name", &self.stem, Message::StemChanged)]
                    .spacing(spacing::MD),
                resize_row,
            ]
            .spacing(spacing::SM)
            .into(),
        );

        let preview_section = widgets::group_box("Preview", self.preview_view());

        let split_label = if self.busy { "Splitting..." } else { "Split into PNGs" };
        let mut split_button = button(text(split_label).size(font::MD));
        if !self.busy && self.clip.is_some() {
            split_button = split_button.on_press(Message::Split);
        }

        let bottom = row![
            widgets::status_line(&self.status, self.status_is_error),
            Space::new(Length::Shrink, Length::Shrink).width(Length::Fill),
            split_button,
        ]
        .align_y(Alignment::Center)
        .spacing(spacing::SM);

        container(
            column![input_section, export_section, preview_section, bottom]
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

    fn preview_view(&self) -> Element<'_, Message> {
        match self.playback.current_handle() {
            Some(handle) => {
                let play_label = if self.playback.is_playing() { "Pause" } else { "Play" };
                let last = self.playback.len().saturating_sub(1) as u32;
                column![
                    container(image_widget(handle.clone()).height(220))
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
                            "{}/{}",
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
            None => text("No GIF loaded")
                .size(font::NORMAL)
                .color(colors::TEXT_MUTED)
                .into(),
        }
    }

    fn accept_input(&mut self, path: PathBuf) -> Task<Message> {
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
            Message::ClipLoaded,
        )
    }

    fn split_frames(&mut self) -> Task<Message> {
        let Some(clip) = self.clip.clone() else {
            return Task::none();
        };
        if self.out_dir.trim().is_empty() {
            self.set_error("Choose an output directory first".to_string());
            return Task::none();
        }
        let stem = if self.stem.trim().is_empty() {
            "frame".to_string()
        } else {
            self.stem.trim().to_string()
        };
        let options = match self.split_options() {
            Ok(options) => options,
            Err(e) => {
                self.set_error(e);
                return Task::none();
            }
        };
        let out_dir = PathBuf::from(self.out_dir.trim());

        self.busy = true;
        self.set_status("Writing stills...");
        Task::perform(
            async move {
                tokio::task::spawn_blocking(move || {
                    ops::split(&clip, &out_dir, &stem, &options).map_err(|e| e.to_string())
                })
                .await
                .map_err(|e| format!("Task panicked: {e}"))?
            },
            Message::SplitDone,
        )
    }

    fn split_options(&self) -> Result<SplitOptions, String> {
        if !self.resize_enabled {
            return Ok(SplitOptions::default());
        }
        let width: u32 = self
            .width_input
            .trim()
            .parse()
            .map_err(|_| format!("Invalid width: {}", self.width_input))?;
        let height: u32 = self
            .height_input
            .trim()
            .parse()
            .map_err(|_| format!("Invalid height: {}", self.height_input))?;
        Ok(SplitOptions {
            resize: Some(ResizeTarget::clamped(width, height)),
        })
    }

    fn browse_input(&self) -> Task<Message> {
        let start_dir = {
            let cfg = self.config.lock().unwrap();
            util::dialog_start_dir(&cfg.settings().paths.last_input_dir)
        };
        Task::perform(
            async move {
                rfd::AsyncFileDialog::new()
                    .set_title("Select GIF")
                    .set_directory(start_dir)
                    .add_filter("GIF Files", &["gif"])
                    .pick_file()
                    .await
                    .map(|f| f.path().to_path_buf())
            },
            Message::InputSelected,
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

    fn app() -> (SplitterApp, TempDir) {
        let dir = tempdir().unwrap();
        let config = ConfigManager::new(dir.path().join("gifkit.toml"));
        let (app, _) = SplitterApp::new(Arc::new(Mutex::new(config)));
        (app, dir)
    }

    fn clip_of(count: usize, width: u32, height: u32) -> GifClip {
        let frames = (0..count)
            .map(|_| RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 255])))
            .collect();
        GifClip::from_parts(frames, vec![100; count])
    }

    #[test]
    fn loaded_gif_seeds_folder_and_dimensions() {
        let (mut app, _dir) = app();
        let _ = app.update(Message::ClipLoaded(Ok((
            PathBuf::from("/gifs/cat.gif"),
            clip_of(3, 640, 480),
        ))));
        assert_eq!(app.out_dir, "/gifs");
        assert_eq!(app.stem, "cat");
        assert_eq!(app.width_input, "640");
        assert_eq!(app.height_input, "480");
    }

    #[test]
    fn keep_aspect_derives_the_other_side() {
        let (mut app, _dir) = app();
        let _ = app.update(Message::ClipLoaded(Ok((
            PathBuf::from("/gifs/cat.gif"),
            clip_of(1, 640, 480),
        ))));

        let _ = app.update(Message::WidthChanged("320".to_string()));
        assert_eq!(app.height_input, "240");

        let _ = app.update(Message::HeightChanged("120".to_string()));
        assert_eq!(app.width_input, "160");

        let _ = app.update(Message::KeepAspectToggled(false));
        let _ = app.update(Message::WidthChanged("999".to_string()));
        assert_eq!(app.height_input, "120");
    }
}
