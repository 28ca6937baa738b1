//! GIF Creator: assemble dropped still images into an animated GIF.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use iced::widget::{button, checkbox, column, container, image as image_widget, mouse_area, row, scrollable, slider, text, Space};
use iced::{window, Alignment, Element, Event, Length, Subscription, Task, Theme};

use gifkit_core::clip::GifClip;
use gifkit_core::config::{ConfigManager, ConfigSection};
use gifkit_core::models::{self, ResizeTarget};
use gifkit_core::ops::{self, AssembleOptions};

use crate::preview::Playback;
use crate::theme::{colors, font, spacing};
use crate::util;
use crate::widgets;

/// Application state for the creator window.
pub struct CreatorApp {
    config: Arc<Mutex<ConfigManager>>,

    /// Stills to encode, in output order.
    files: Vec<PathBuf>,
    /// Canvas size of the first decoded image, for aspect-ratio locking.
    reference_dims: Option<(u32, u32)>,

    fps_input: String,
    resize_enabled: bool,
    width_input: String,
    height_input: String,
    keep_aspect: bool,

    output_path: String,
    /// Set once the user edits the output path, so input drops stop
    /// re-deriving it.
    output_edited: bool,
    playback: Playback,
    /// Currently selected list entry, shown as a paused still.
    selected: Option<usize>,

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

    AddFiles,
    FilesSelected(Vec<PathBuf>),
    RemoveFile(usize),
    MoveUp(usize),
    MoveDown(usize),
    ClearFiles,

    FpsChanged(String),
    ResizeToggled(bool),
    WidthChanged(String),
    HeightChanged(String),
    KeepAspectToggled(bool),

    OutputChanged(String),
    BrowseOutput,
    OutputSelected(Option<PathBuf>),

    PreviewBuilt(Result<GifClip, String>),
    SelectFile(usize),
    FrameSelected(u32),
    TogglePlay,
    Tick,

    Create,
    Created(Result<PathBuf, String>),
}

impl CreatorApp {
    pub fn new(config: Arc<Mutex<ConfigManager>>) -> (Self, Task<Message>) {
        let (fps, width, height, output_folder) = {
            let cfg = config.lock().unwrap();
            let s = cfg.settings();
            (
                s.encode.default_fps,
                s.encode.default_width,
                s.encode.default_height,
                s.paths.output_folder.clone(),
            )
        };

        let app = Self {
            config,
            files: Vec::new(),
            reference_dims: None,
            fps_input: format!("{fps}"),
            resize_enabled: false,
            width_input: width.to_string(),
            height_input: height.to_string(),
            keep_aspect: true,
            output_path: Path::new(&output_folder)
                .join("output.gif")
                .to_string_lossy()
                .to_string(),
            output_edited: false,
            playback: Playback::default(),
            selected: None,
            hovering: false,
            busy: false,
            status: "Drop images here to begin".to_string(),
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
                if ops::assemble::is_supported_still(&path) {
                    self.remember_input_dir(&path);
                    self.files.push(path);
                    self.apply_default_output();
                    self.selected = None;
                    self.rebuild_preview()
                } else {
                    self.set_error(format!("Not a supported image: {}", path.display()));
                    Task::none()
                }
            }

            Message::AddFiles => self.browse_images(),
            Message::FilesSelected(paths) => {
                if paths.is_empty() {
                    return Task::none();
                }
                if let Some(first) = paths.first() {
                    self.remember_input_dir(first);
                }
                self.files.extend(paths);
                self.apply_default_output();
                self.selected = None;
                self.rebuild_preview()
            }
            Message::RemoveFile(idx) => {
                if idx < self.files.len() {
                    self.files.remove(idx);
                }
                self.selected = None;
                self.rebuild_preview()
            }
            Message::MoveUp(idx) => {
                if idx > 0 && idx < self.files.len() {
                    self.files.swap(idx - 1, idx);
                }
                self.selected = None;
                self.rebuild_preview()
            }
            Message::MoveDown(idx) => {
                if idx + 1 < self.files.len() {
                    self.files.swap(idx, idx + 1);
                }
                self.selected = None;
                self.rebuild_preview()
            }
            Message::ClearFiles => {
                self.files.clear();
                self.reference_dims = None;
                self.selected = None;
                self.playback = Playback::default();
                self.set_status("Drop images here to begin");
                Task::none()
            }

            Message::FpsChanged(value) => {
                self.fps_input = value;
                Task::none()
            }
            Message::ResizeToggled(enabled) => {
                self.resize_enabled = enabled;
                Task::none()
            }
            Message::WidthChanged(value) => {
                self.width_input = value;
                if self.keep_aspect {
                    if let (Some(dims), Ok(w)) =
                        (self.reference_dims, self.width_input.parse::<u32>())
                    {
                        if let Some(h) = models::height_for_width(dims, w) {
                            self.height_input = h.to_string();
                        }
                    }
                }
                Task::none()
            }
            Message::HeightChanged(value) => {
                self.height_input = value;
                if self.keep_aspect {
                    if let (Some(dims), Ok(h)) =
                        (self.reference_dims, self.height_input.parse::<u32>())
                    {
                        if let Some(w) = models::width_for_height(dims, h) {
                            self.width_input = w.to_string();
                        }
                    }
                }
                Task::none()
            }
            Message::KeepAspectToggled(locked) => {
                self.keep_aspect = locked;
                Task::none()
            }

            Message::OutputChanged(value) => {
                self.output_path = value;
                self.output_edited = true;
                Task::none()
            }
            Message::BrowseOutput => self.browse_output(),
            Message::OutputSelected(path) => {
                if let Some(p) = path {
                    self.output_path = util::ensure_gif_extension(&p)
                        .to_string_lossy()
                        .to_string();
                    self.output_edited = true;
                }
                Task::none()
            }

            Message::PreviewBuilt(Ok(clip)) => {
                self.reference_dims = Some(clip.dimensions());
                self.playback = Playback::from_clip(&clip);
                self.set_status(format!(
                    "{} frame(s), {}x{}",
                    clip.len(),
                    clip.dimensions().0,
                    clip.dimensions().1
                ));
                Task::none()
            }
            Message::PreviewBuilt(Err(e)) => {
                self.playback = Playback::default();
                self.set_error(e);
                Task::none()
            }
            Message::SelectFile(idx) => {
                self.selected = Some(idx);
                self.playback.seek(idx);
                Task::none()
            }
            Message::FrameSelected(index) => {
                self.selected = Some(index as usize);
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

            Message::Create => self.create_gif(),
            Message::Created(Ok(path)) => {
                self.busy = false;
                self.set_status(format!("Saved {}", path.display()));
                Task::none()
            }
            Message::Created(Err(e)) => {
                self.busy = false;
                self.set_error(e);
                Task::none()
            }
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        let file_list: Element<'_, Message> = if self.files.is_empty() {
            widgets::drop_zone(
                "Drop images here, or click Add Images...".to_string(),
                self.hovering,
            )
        } else {
            let rows: Vec<Element<'_, Message>> = self
                .files
                .iter()
                .enumerate()
                .map(|(idx, path)| self.file_row(idx, path))
                .collect();
            scrollable(column(rows).spacing(spacing::XS))
                .height(180)
                .into()
        };

        let input_section = widgets::group_box(
            "Input Images",
            column![
                file_list,
                row![
                    button(text("Add Images...").size(font::NORMAL)).on_press(Message::AddFiles),
                    button(text("Clear").size(font::NORMAL)).on_press(Message::ClearFiles),
                ]
                .spacing(spacing::SM),
            ]
            .spacing(spacing::SM)
            .into(),
        );

        let resize_row = row![
            checkbox("Resize to", self.resize_enabled).on_toggle(Message::ResizeToggled),
            widgets::labeled_input("W", &self.width_input, Message::WidthChanged),
            widgets::labeled_input("H", &self.height_input, Message::HeightChanged),
            checkbox("Keep aspect", self.keep_aspect).on_toggle(Message::KeepAspectToggled),
        ]
        .spacing(spacing::MD)
        .align_y(Alignment::Center);

        let settings_section = widgets::group_box(
            "Output Settings",
            column![
                row![widgets::labeled_input("FPS", &self.fps_input, Message::FpsChanged)]
                    .spacing(spacing::MD),
                resize_row,
                widgets::path_input_row(
                    "Output",
                    &self.output_path,
                    "output.gif",
                    Message::OutputChanged,
                    Message::BrowseOutput,
                ),
            ]
            .spacing(spacing::SM)
            .into(),
        );

        let preview_section = widgets::group_box("Preview", self.preview_view());

        let create_label = if self.busy { "Creating..." } else { "Create GIF" };
        let mut create_button = button(text(create_label).size(font::MD));
        if !self.busy && !self.files.is_empty() {
            create_button = create_button.on_press(Message::Create);
        }

        let bottom = row![
            widgets::status_line(&self.status, self.status_is_error),
            Space::new(Length::Shrink, Length::Shrink).width(Length::Fill),
            create_button,
        ]
        .align_y(Alignment::Center)
        .spacing(spacing::SM);

        container(
            column![input_section, settings_section, preview_section, bottom]
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

    fn file_row<'a>(&'a self, idx: usize, path: &'a Path) -> Element<'a, Message> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());

        row![
            text(format!("{:>3}.", idx + 1))
                .size(font::NORMAL)
                .color(colors::TEXT_MUTED),
            mouse_area(
                text(name)
                    .size(font::NORMAL)
                    .color(if self.selected == Some(idx) {
                        colors::TEXT_PRIMARY
                    } else {
                        colors::TEXT_SECONDARY
                    })
                    .width(Length::Fill),
            )
            .on_press(Message::SelectFile(idx)),
            button(text("Up").size(font::SM)).on_press(Message::MoveUp(idx)),
            button(text("Down").size(font::SM)).on_press(Message::MoveDown(idx)),
            button(text("Remove").size(font::SM)).on_press(Message::RemoveFile(idx)),
        ]
        .spacing(spacing::SM)
        .align_y(Alignment::Center)
        .into()
    }

    fn preview_view(&self) -> Element<'_, Message> {
        match self.playback.current_handle() {
            Some(handle) => {
                let play_label = if self.playback.is_playing() { "Pause" } else { "Play" };
                column![
                    container(image_widget(handle.clone()).height(220))
                        .width(Length::Fill)
                        .center_x(Length::Fill),
                    row![
                        button(text(play_label).size(font::SM)).on_press(Message::TogglePlay),
                        slider(
                            0..=self.playback.len().saturating_sub(1) as u32,
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
            None => text("No preview yet")
                .size(font::NORMAL)
                .color(colors::TEXT_MUTED)
                .into(),
        }
    }

    /// Decode the current file list into a preview clip off the UI thread.
    fn rebuild_preview(&mut self) -> Task<Message> {
        if self.files.is_empty() {
            self.playback = Playback::default();
            self.reference_dims = None;
            return Task::none();
        }

        let paths = self.files.clone();
        let options = match self.assemble_options() {
            Ok(options) => options,
            Err(e) => {
                self.set_error(e);
                return Task::none();
            }
        };

        Task::perform(
            async move {
                tokio::task::spawn_blocking(move || {
                    ops::assemble(&paths, &options).map_err(|e| e.to_string())
                })
                .await
                .map_err(|e| format!("Task panicked: {e}"))?
            },
            Message::PreviewBuilt,
        )
    }

    fn create_gif(&mut self) -> Task<Message> {
        let paths = self.files.clone();
        let options = match self.assemble_options() {
            Ok(options) => options,
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

        self.busy = true;
        self.set_status("Encoding...");
        Task::perform(
            async move {
                tokio::task::spawn_blocking(move || {
                    let clip = ops::assemble(&paths, &options).map_err(|e| e.to_string())?;
                    clip.save(&output).map_err(|e| e.to_string())?;
                    Ok(output)
                })
                .await
                .map_err(|e| format!("Task panicked: {e}"))?
            },
            Message::Created,
        )
    }

    /// Parse the control values into assemble options.
    fn assemble_options(&self) -> Result<AssembleOptions, String> {
        let fps: f64 = self
            .fps_input
            .trim()
            .parse()
            .map_err(|_| format!("Invalid FPS: {}", self.fps_input))?;
        if !(models::MIN_FPS..=models::MAX_FPS).contains(&fps) {
            return Err(format!(
                "FPS must be between {} and {}",
                models::MIN_FPS,
                models::MAX_FPS
            ));
        }
        let delay_ms = models::delay_ms_for_fps(fps).map_err(|e| e.to_string())?;

        let resize = if self.resize_enabled {
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
            Some(ResizeTarget::clamped(width, height))
        } else {
            None
        };

        Ok(AssembleOptions { delay_ms, resize })
    }

    fn browse_images(&self) -> Task<Message> {
        let start_dir = {
            let cfg = self.config.lock().unwrap();
            util::dialog_start_dir(&cfg.settings().paths.last_input_dir)
        };

        Task::perform(
            async move {
                rfd::AsyncFileDialog::new()
                    .set_title("Select Images")
                    .set_directory(start_dir)
                    .add_filter(
                        "Image Files",
                        &["png", "jpg", "jpeg", "bmp", "gif", "tiff", "webp"],
                    )
                    .add_filter("All Files", &["*"])
                    .pick_files()
                    .await
                    .map(|files| files.into_iter().map(|f| f.path().to_path_buf()).collect())
                    .unwrap_or_default()
            },
            Message::FilesSelected,
        )
    }

    fn browse_output(&self) -> Task<Message> {
        Task::perform(
            async {
                rfd::AsyncFileDialog::new()
                    .set_title("Save GIF As")
                    .add_filter("GIF Files", &["gif"])
                    .set_file_name("output.gif")
                    .save_file()
                    .await
                    .map(|f| f.path().to_path_buf())
            },
            Message::OutputSelected,
        )
    }

    /// Default the output path to `<dir of first input>/output.gif` until
    /// the user edits it.
    fn apply_default_output(&mut self) {
        if self.output_edited {
            return;
        }
        if let Some(parent) = self.files.first().and_then(|p| p.parent()) {
            self.output_path = parent.join("output.gif").to_string_lossy().to_string();
        }
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

    fn app() -> (CreatorApp, TempDir) {
        let dir = tempdir().unwrap();
        let config = ConfigManager::new(dir.path().join("gifkit.toml"));
        let (app, _) = CreatorApp::new(Arc::new(Mutex::new(config)));
        (app, dir)
    }

    fn clip_of(count: usize) -> GifClip {
        let frames = (0..count)
            .map(|_| RgbaImage::from_pixel(4, 4, Rgba([0, 0, 0, 255])))
            .collect();
        GifClip::from_parts(frames, vec![100; count])
    }

    #[test]
    fn output_defaults_to_first_input_directory() {
        let (mut app, _dir) = app();
        let _ = app.update(Message::FileDropped(PathBuf::from("/pics/a.png")));
        assert_eq!(app.output_path, "/pics/output.gif");

        // Later inputs keep the first input's directory
        let _ = app.update(Message::FileDropped(PathBuf::from("/other/b.png")));
        assert_eq!(app.output_path, "/pics/output.gif");
    }

    #[test]
    fn edited_output_is_not_overridden() {
        let (mut app, _dir) = app();
        let _ = app.update(Message::OutputChanged("/keep/me.gif".to_string()));
        let _ = app.update(Message::FileDropped(PathBuf::from("/pics/a.png")));
        assert_eq!(app.output_path, "/keep/me.gif");
    }

    #[test]
    fn selecting_a_list_entry_pauses_on_its_still() {
        let (mut app, _dir) = app();
        let _ = app.update(Message::PreviewBuilt(Ok(clip_of(3))));
        let _ = app.update(Message::SelectFile(1));
        assert_eq!(app.selected, Some(1));
        assert_eq!(app.playback.current_index(), 1);
        assert!(!app.playback.is_playing());

        // The slider drives the same selection
        let _ = app.update(Message::FrameSelected(2));
        assert_eq!(app.selected, Some(2));
        assert_eq!(app.playback.current_index(), 2);
    }

    #[test]
    fn fps_outside_range_is_rejected() {
        let (mut app, _dir) = app();
        app.fps_input = "5000".to_string();
        assert!(app.assemble_options().is_err());
        app.fps_input = "0.2".to_string();
        assert!(app.assemble_options().is_err());
        app.fps_input = "12".to_string();
        assert!(app.assemble_options().is_ok());
    }
}
