#[cfg(feature = "cairo")]
pub mod cairo;
pub mod recording;
