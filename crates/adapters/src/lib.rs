pub mod filter;
pub mod image_io;
pub mod presenters;
pub mod text;

pub use filter::{ParallelFilterEngine, SequentialFilterEngine};
pub use image_io::{ImageCrateDecoder, PngFileEncoder};
pub use presenters::{present_canvas, present_export, present_filter_params};
pub use text::Font8x8Rasterizer;
