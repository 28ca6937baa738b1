//! GIF Kit user interface.
//!
//! Four small iced applications share this crate: the creator (stills to
//! GIF), the trimmer (crop), the combiner (side-by-side join), and the
//! splitter (frames to PNGs). Each lives in [`apps`] and is launched by its
//! own binary under `src/bin/`.

pub mod apps;
pub mod launch;
pub mod preview;
pub mod theme;
pub mod util;
pub mod widgets;
