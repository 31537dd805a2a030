mod error;
mod events;
mod ports;
mod service;
mod use_cases;

pub use error::ApplicationError;
pub use events::{DispatchTable, EventKind, EventOutcome, Handler, PadEvent};
pub use ports::{FilterEngine, ImageDecoder, ImageEncoder, RasterizedText, TextRasterizer};
pub use service::{PadSettings, SignaturePadService};
pub use use_cases::{
    ApplyFilterCommand, ArmTextCommand, BeginStrokeCommand, ClearCanvasCommand, EncodePngQuery,
    EndStrokeCommand, ExportPngCommand, ExtendStrokeCommand, SetBackgroundColorCommand,
    SetInkColorCommand, StampTextCommand, UploadImageCommand,
};
