//! GIF Kit Core - backend logic for the GIF Kit desktop tools
//!
//! This crate contains all image-list transforms and shared infrastructure
//! with zero UI dependencies: loading and saving animated GIFs, assembling
//! stills into an animation, cropping, horizontal concatenation, frame
//! export, plus configuration and logging setup shared by the four tools.

pub mod clip;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod ops;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_returns_value() {
        assert!(!version().is_empty());
    }
}
