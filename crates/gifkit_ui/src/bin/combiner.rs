//! GIF Combiner entry point: join two GIFs side by side.

use gifkit_ui::apps::combiner::CombinerApp;
use gifkit_ui::launch;

fn main() -> iced::Result {
    let startup = launch::startup("gif-combiner");
    let config = startup.config.clone();
    let _log_guard = startup.log_guard;

    iced::application(
        "GIF Combiner",
        CombinerApp::update,
        CombinerApp::view,
    )
    .subscription(CombinerApp::subscription)
    .theme(CombinerApp::theme)
    .window_size((820.0, 700.0))
    .run_with(move || CombinerApp::new(config.clone()))
}
