//! The four tool applications.
//!
//! Each is a self-contained iced application with its own state, message
//! enum, and view, launched by its matching binary:
//!
//! - [`creator`]: build an animated GIF from dropped still images
//! - [`trimmer`]: crop every frame of a GIF to a rectangle
//! - [`combiner`]: join two GIFs side by side
//! - [`splitter`]: export a GIF's frames as numbered PNGs

pub mod combiner;
pub mod creator;
pub mod splitter;
pub mod trimmer;
