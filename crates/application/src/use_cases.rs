use std::path::PathBuf;

use inkpad_domain::Point;

#[derive(Debug, Clone, Copy)]
pub struct BeginStrokeCommand {
    pub point: Point,
}

#[derive(Debug, Clone, Copy)]
pub struct ExtendStrokeCommand {
    pub point: Point,
}

#[derive(Debug, Clone, Default)]
pub struct EndStrokeCommand;

#[derive(Debug, Clone, Default)]
pub struct ClearCanvasCommand;

#[derive(Debug, Clone)]
pub struct SetInkColorCommand {
    pub hex: String,
}

#[derive(Debug, Clone)]
pub struct SetBackgroundColorCommand {
    pub hex: String,
}

#[derive(Debug, Clone, Default)]
pub struct ArmTextCommand;

#[derive(Debug, Clone)]
pub struct StampTextCommand {
    pub point: Point,
    pub text: String,
}

#[derive(Debug, Clone)]
pub struct UploadImageCommand {
    pub path: PathBuf,
}

#[derive(Debug, Clone, Default)]
pub struct ApplyFilterCommand;

#[derive(Debug, Clone)]
pub struct ExportPngCommand {
    pub path: PathBuf,
}

#[derive(Debug, Clone, Default)]
pub struct EncodePngQuery;
