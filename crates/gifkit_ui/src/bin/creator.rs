//! GIF Creator entry point: build an animated GIF from still images.

use gifkit_ui::apps::creator::CreatorApp;
use gifkit_ui::launch;

fn main() -> iced::Result {
    let startup = launch::startup("gif-creator");
    let config = startup.config.clone();
    let _log_guard = startup.log_guard;

    iced::application(
        "GIF Creator",
        CreatorApp::update,
        CreatorApp::view,
    )
    .subscription(CreatorApp::subscription)
    .theme(CreatorApp::theme)
    .window_size((760.0, 760.0))
    .run_with(move || CreatorApp::new(config.clone()))
}
