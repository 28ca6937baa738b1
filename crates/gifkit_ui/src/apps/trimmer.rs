//! GIF Trimmer: crop every frame of a dropped GIF to a rectangle.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use iced::widget::{button, column, container, image as image_widget, row, slider, text, Space};
use iced::{window, Alignment, Element, Event, Length, Subscription, Task, Theme};

use gifkit_core::clip::GifClip;
use gifkit_core::config::{ConfigManager, ConfigSection};
use gifkit_core::ops::{self, CropRect};

use crate::preview::Playback;
use crate::theme::{colors, font, spacing};
use crate::util;
use crate::widgets;

/// Application state for the trimmer window.
pub struct TrimmerApp {
    config: Arc<Mutex<ConfigManager>>,

    input_path: Option<PathBuf>,
    clip: Option<GifClip>,
    playback: Playback,

    x_input: String,
    y_input: String,
    width_input: String,
    height_input: String,

    output_path: String,

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

    XChanged(String),
    YChanged(String),
    WidthChanged(String),
    HeightChanged(String),
    ResetRect,

    FrameSelected(u32),
    TogglePlay,
    Tick,

    OutputChanged(String),
    BrowseOutput,
    OutputSelected(Option<PathBuf>),

    Save,
    Saved(Result<(PathBuf, GifClip), String>),
}

impl TrimmerApp {
    pub fn new(config: Arc<Mutex<ConfigManager>>) -> (Self, Task<Message>) {
        let app = Self {
            config,
            input_path: None,
            clip: None,
            playback: Playback::default(),
            x_input: "0".to_string(),
            y_input: "0".to_string(),
            width_input: "0".to_string(),
            height_input: "0".to_string(),
            output_path: String::new(),
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
                self.x_input = "0".to_string();
                self.y_input = "0".to_string();
                self.width_input = width.to_string();
                self.height_input = height.to_string();
                self.output_path = util::sibling_with_suffix(&path, "trimmed")
                    .to_string_lossy()
                    .to_string();
                self.playback = Playback::from_clip(&clip);
                self.set_status(format!(
                    "{}: {} frame(s), {}x{}",
                    util::stem_of(&path),
                    clip.len(),
                    width,
                    height
                ));
                self.input_path = Some(path);
                self.clip = Some(clip);
                Task::none()
            }
            Message::ClipLoaded(Err(e)) => {
                self.set_error(e);
                Task::none()
            }

            Message::XChanged(v) => {
                self.x_input = v;
                Task::none()
            }
            Message::YChanged(v) => {
                self.y_input = v;
                Task::none()
            }
            Message::WidthChanged(v) => {
                self.width_input = v;
                Task::none()
            }
            Message::HeightChanged(v) => {
                self.height_input = v;
                Task::none()
            }
            Message::ResetRect => {
                if let Some(clip) = &self.clip {
                    let (width, height) = clip.dimensions();
                    self.x_input = "0".to_string();
                    self.y_input = "0".to_string();
                    self.width_input = width.to_string();
                    self.height_input = height.to_string();
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

            Message::OutputChanged(value) => {
                self.output_path = value;
                Task::none()
            }
            Message::BrowseOutput => {
                let name = self
                    .input_path
                    .as_deref()
                    .map(|p| format!("{}_trimmed.gif", util::stem_of(p)))
                    .unwrap_or_else(|| "trimmed.gif".to_string());
                Task::perform(
                    async move {
                        rfd::AsyncFileDialog::new()
                            .set_title("Save Trimmed GIF As")
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

            Message::Save => self.save_cropped(),
            Message::Saved(Ok((path, cropped))) => {
                self.busy = false;
                // The preview now shows the written result
                self.playback = Playback::from_clip(&cropped);
                self.set_status(format!(
                    "Saved {} ({}x{})",
                    path.display(),
                    cropped.dimensions().0,
                    cropped.dimensions().1
                ));
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

        let crop_section = widgets::group_box(
            "Crop Rectangle",
            row![
                widgets::labeled_input("X", &self.x_input, Message::XChanged),
                widgets::labeled_input("Y", &self.y_input, Message::YChanged),
                widgets::labeled_input("W", &self.width_input, Message::WidthChanged),
                widgets::labeled_input("H", &self.height_input, Message::HeightChanged),
                button(text("Reset").size(font::NORMAL)).on_press(Message::ResetRect),
            ]
            .spacing(spacing::MD)
            .align_y(Alignment::Center)
            .into(),
        );

        let preview_section = widgets::group_box("Preview", self.preview_view());

        let save_label = if self.busy { "Saving..." } else { "Save Trimmed GIF" };
        let mut save_button = button(text(save_label).size(font::MD));
        if !self.busy && self.clip.is_some() {
            save_button = save_button.on_press(Message::Save);
        }

        let bottom = column![
            widgets::path_input_row(
                "Output",
                &self.output_path,
                "trimmed.gif",
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
            column![input_section, crop_section, preview_section, bottom]
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
                    container(image_widget(handle.clone()).height(240))
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

    fn save_cropped(&mut self) -> Task<Message> {
        let Some(clip) = self.clip.clone() else {
            return Task::none();
        };
        let rect = match self.parse_rect() {
            Ok(rect) => rect,
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

        // An out-of-range rectangle falls back to the full frame rather
        // than failing the save.
        let rect = rect.clamped_to(clip.dimensions());

        self.busy = true;
        self.set_status("Encoding...");
        Task::perform(
            async move {
                tokio::task::spawn_blocking(move || {
                    let cropped = ops::crop(&clip, rect).map_err(|e| e.to_string())?;
                    cropped.save(&output).map_err(|e| e.to_string())?;
                    Ok((output, cropped))
                })
                .await
                .map_err(|e| format!("Task panicked: {e}"))?
            },
            Message::Saved,
        )
    }

    fn parse_rect(&self) -> Result<CropRect, String> {
        let parse = |label: &str, value: &str| -> Result<u32, String> {
            value
                .trim()
                .parse()
                .map_err(|_| format!("Invalid {label}: {value}"))
        };
        Ok(CropRect {
            x: parse("X", &self.x_input)?,
            y: parse("Y", &self.y_input)?,
            width: parse("W", &self.width_input)?,
            height: parse("H", &self.height_input)?,
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

    fn app() -> (TrimmerApp, TempDir) {
        let dir = tempdir().unwrap();
        let config = ConfigManager::new(dir.path().join("gifkit.toml"));
        let (app, _) = TrimmerApp::new(Arc::new(Mutex::new(config)));
        (app, dir)
    }

    fn clip_of(count: usize, width: u32, height: u32) -> GifClip {
        let frames = (0..count)
            .map(|_| RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 255])))
            .collect();
        GifClip::from_parts(frames, vec![100; count])
    }

    #[test]
    fn loaded_gif_defaults_trimmed_output() {
        let (mut app, _dir) = app();
        let _ = app.update(Message::ClipLoaded(Ok((
            PathBuf::from("/gifs/cat.gif"),
            clip_of(3, 32, 24),
        ))));
        assert_eq!(app.output_path, "/gifs/cat_trimmed.gif");
        assert_eq!(app.width_input, "32");
        assert_eq!(app.height_input, "24");
    }

    #[test]
    fn saved_result_replaces_preview() {
        let (mut app, _dir) = app();
        let _ = app.update(Message::ClipLoaded(Ok((
            PathBuf::from("/gifs/cat.gif"),
            clip_of(3, 32, 24),
        ))));
        assert_eq!(app.playback.len(), 3);

        let _ = app.update(Message::Saved(Ok((
            PathBuf::from("/gifs/cat_trimmed.gif"),
            clip_of(2, 16, 16),
        ))));
        assert_eq!(app.playback.len(), 2);
        assert!(!app.busy);
        assert!(app.status.contains("16x16"));
    }
}
