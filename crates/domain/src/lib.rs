pub mod canvas;
mod color;
mod error;
pub mod filter;
mod pixel;
mod session;

pub use canvas::{CoverageMask, Point, DEFAULT_STROKE_WIDTH};
pub use color::Rgba;
pub use error::DomainError;
pub use filter::{apply_filter, apply_filter_to_rgba, FilterParams, Hsl};
pub use pixel::{PixelBuffer, CHANNELS};
pub use session::PadSession;
