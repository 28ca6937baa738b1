//! GIF Splitter entry point: export a GIF's frames as numbered PNGs.

use gifkit_ui::apps::splitter::SplitterApp;
use gifkit_ui::launch;

fn main() -> iced::Result {
    let startup = launch::startup("gif-splitter");
    let config = startup.config.clone();
    let _log_guard = startup.log_guard;

    iced::application(
        "GIF Splitter",
        SplitterApp::update,
        SplitterApp::view,
    )
    .subscription(SplitterApp::subscription)
    .theme(SplitterApp::theme)
    .window_size((760.0, 740.0))
    .run_with(move || SplitterApp::new(config.clone()))
}
