//! Image-list transforms behind the four tools.
//!
//! - **assemble**: build an animation from still images
//! - **concat**: join two clips side by side
//! - **crop**: cut every frame to a pixel rectangle
//! - **split**: export frames as numbered PNG stills

pub mod assemble;
pub mod concat;
pub mod crop;
pub mod split;

pub use assemble::{assemble, AssembleOptions};
pub use concat::{hconcat, suggested_fps};
pub use crop::{crop, CropRect, MIN_CROP_SIZE};
pub use split::{padding_for, split, SplitOptions};
