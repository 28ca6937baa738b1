//! GIF Trimmer entry point: crop every frame of a GIF.

use gifkit_ui::apps::trimmer::TrimmerApp;
use gifkit_ui::launch;

fn main() -> iced::Result {
    let startup = launch::startup("gif-trimmer");
    let config = startup.config.clone();
    let _log_guard = startup.log_guard;

    iced::application(
        "GIF Trimmer",
        TrimmerApp::update,
        TrimmerApp::view,
    )
    .subscription(TrimmerApp::subscription)
    .theme(TrimmerApp::theme)
    .window_size((760.0, 720.0))
    .run_with(move || TrimmerApp::new(config.clone()))
}
