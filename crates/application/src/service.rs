use std::path::{Path, PathBuf};
use std::time::Instant;

use inkpad_domain::canvas::{self, DEFAULT_STROKE_WIDTH};
use inkpad_domain::{DomainError, FilterParams, PadSession, PixelBuffer, Point, Rgba};
use tracing::{debug, info, warn};

use crate::{
    ApplicationError, ApplyFilterCommand, ArmTextCommand, BeginStrokeCommand, ClearCanvasCommand,
    EncodePngQuery, EndStrokeCommand, ExportPngCommand, ExtendStrokeCommand, FilterEngine,
    ImageDecoder, ImageEncoder, SetBackgroundColorCommand, SetInkColorCommand, StampTextCommand,
    TextRasterizer, UploadImageCommand,
};

#[derive(Debug, Clone, PartialEq)]
pub struct PadSettings {
    pub width: u32,
    pub height: u32,
    pub stroke_width: f32,
    pub text_size_px: u32,
    pub ink: Rgba,
    pub background: Rgba,
    pub filter: FilterParams,
    pub export_path: PathBuf,
}

impl Default for PadSettings {
    fn default() -> Self {
        Self {
            width: 600,
            height: 240,
            stroke_width: DEFAULT_STROKE_WIDTH,
            text_size_px: 48,
            ink: Rgba::BLACK,
            background: Rgba::WHITE,
            filter: FilterParams::default(),
            export_path: PathBuf::from("signature.png"),
        }
    }
}

pub struct SignaturePadService {
    canvas: PixelBuffer,
    session: PadSession,
    settings: PadSettings,
    decoder: Box<dyn ImageDecoder>,
    encoder: Box<dyn ImageEncoder>,
    text: Box<dyn TextRasterizer>,
    filter: Box<dyn FilterEngine>,
}

impl SignaturePadService {
    pub fn new(
        settings: PadSettings,
        decoder: Box<dyn ImageDecoder>,
        encoder: Box<dyn ImageEncoder>,
        text: Box<dyn TextRasterizer>,
        filter: Box<dyn FilterEngine>,
    ) -> Result<Self, ApplicationError> {
        if settings.width == 0 || settings.height == 0 {
            return Err(DomainError::InvalidDimensions {
                width: settings.width,
                height: settings.height,
            }
            .into());
        }
        if !settings.stroke_width.is_finite() || settings.stroke_width <= 0.0 {
            return Err(ApplicationError::InvalidInput(format!(
                "stroke width must be positive, got {}",
                settings.stroke_width
            )));
        }
        settings.filter.validate()?;

        Ok(Self {
            canvas: PixelBuffer::blank(settings.width, settings.height)?,
            session: PadSession::with_colors(settings.ink, settings.background),
            settings,
            decoder,
            encoder,
            text,
            filter,
        })
    }

    pub fn canvas(&self) -> &PixelBuffer {
        &self.canvas
    }

    pub fn session(&self) -> &PadSession {
        &self.session
    }

    pub fn settings(&self) -> &PadSettings {
        &self.settings
    }

    pub fn begin_stroke(&mut self, command: BeginStrokeCommand) {
        debug!(x = command.point.x, y = command.point.y, "stroke started");
        self.session.begin_stroke(command.point);
    }

    /// Returns true when ink was laid down.
    pub fn extend_stroke(&mut self, command: ExtendStrokeCommand) -> bool {
        let Some((from, to)) = self.session.extend_stroke(command.point) else {
            return false;
        };
        canvas::stroke_segment(
            &mut self.canvas,
            from,
            to,
            self.settings.stroke_width,
            self.session.ink,
        );
        true
    }

    pub fn end_stroke(&mut self, _command: EndStrokeCommand) {
        if self.session.drawing {
            debug!("stroke finished");
        }
        self.session.end_stroke();
    }

    pub fn clear_canvas(&mut self, _command: ClearCanvasCommand) {
        canvas::clear(&mut self.canvas);
        info!("canvas cleared");
    }

    pub fn set_ink_color(&mut self, command: SetInkColorCommand) -> Result<(), ApplicationError> {
        let color = Rgba::parse_hex(&command.hex).inspect_err(|error| {
            warn!(%error, "ink color rejected");
        })?;
        self.session.ink = color;
        debug!(color = %color, "ink color changed");
        Ok(())
    }

    pub fn set_background_color(
        &mut self,
        command: SetBackgroundColorCommand,
    ) -> Result<(), ApplicationError> {
        let color = Rgba::parse_hex(&command.hex).inspect_err(|error| {
            warn!(%error, "background color rejected");
        })?;
        self.session.background = color;
        debug!(color = %color, "background color changed");
        Ok(())
    }

    pub fn arm_text(&mut self, _command: ArmTextCommand) {
        self.session.text_armed = true;
    }

    /// Stamps text at the click point if text mode was armed. The arm is
    /// consumed either way. Returns true when something was drawn.
    pub fn stamp_text(&mut self, command: StampTextCommand) -> Result<bool, ApplicationError> {
        if !self.session.take_text_arm() {
            return Ok(false);
        }
        let text = command.text.trim();
        if text.is_empty() {
            return Ok(false);
        }

        let rasterized = self.text.rasterize(text, self.settings.text_size_px)?;
        let origin = Point::new(
            command.point.x,
            command.point.y - rasterized.baseline as f32,
        );
        canvas::stamp_mask(&mut self.canvas, &rasterized.mask, origin, self.session.ink);
        info!(chars = text.chars().count(), x = command.point.x, y = command.point.y, "text stamped");
        Ok(true)
    }

    pub fn upload_image(&mut self, command: UploadImageCommand) -> Result<(), ApplicationError> {
        require_path(&command.path)?;
        let image = self.decoder.decode_rgba(&command.path)?;
        if image.is_empty() {
            return Err(ApplicationError::Decode(format!(
                "image has no pixels: {}",
                command.path.display()
            )));
        }
        canvas::blit_stretched(&mut self.canvas, &image);
        info!(
            path = %command.path.display(),
            source_width = image.width(),
            source_height = image.height(),
            "image uploaded"
        );
        Ok(())
    }

    pub fn apply_filter(&mut self, _command: ApplyFilterCommand) -> Result<(), ApplicationError> {
        let started = Instant::now();
        self.filter.apply(&mut self.canvas, &self.settings.filter)?;
        info!(
            width = self.canvas.width(),
            height = self.canvas.height(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "filter applied"
        );
        Ok(())
    }

    pub fn export_png(&self, command: ExportPngCommand) -> Result<u64, ApplicationError> {
        require_path(&command.path)?;
        let bytes = self.encoder.write_png(&self.canvas, &command.path)?;
        info!(path = %command.path.display(), bytes, "canvas exported");
        Ok(bytes)
    }

    pub fn encode_png(&self, _query: EncodePngQuery) -> Result<Vec<u8>, ApplicationError> {
        self.encoder.encode_png(&self.canvas)
    }
}

fn require_path(path: &Path) -> Result<(), ApplicationError> {
    if path.as_os_str().is_empty() {
        return Err(ApplicationError::InvalidInput(
            "file path must not be empty".to_string(),
        ));
    }
    Ok(())
}
