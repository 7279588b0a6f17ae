//! Domain types for Matinee

mod ids;
mod video;

pub use ids::VideoId;
pub use video::VideoAsset;
