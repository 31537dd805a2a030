use std::collections::HashMap;
use std::path::PathBuf;

use inkpad_domain::Point;
use tracing::debug;

use crate::{
    ApplicationError, ApplyFilterCommand, ArmTextCommand, BeginStrokeCommand, ClearCanvasCommand,
    EndStrokeCommand, ExportPngCommand, ExtendStrokeCommand, SetBackgroundColorCommand,
    SetInkColorCommand, SignaturePadService, StampTextCommand, UploadImageCommand,
};

#[derive(Debug, Clone, PartialEq)]
pub enum PadEvent {
    PointerDown(Point),
    PointerMove(Point),
    PointerUp,
    Click(Point),
    TextEntered { point: Point, text: String },
    ClearPressed,
    SavePressed,
    FilterPressed,
    TextPressed,
    InkColorPicked(String),
    BackgroundColorPicked(String),
    ImageChosen(PathBuf),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    PointerDown,
    PointerMove,
    PointerUp,
    Click,
    TextEntered,
    ClearPressed,
    SavePressed,
    FilterPressed,
    TextPressed,
    InkColorPicked,
    BackgroundColorPicked,
    ImageChosen,
}

impl PadEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::PointerDown(_) => EventKind::PointerDown,
            Self::PointerMove(_) => EventKind::PointerMove,
            Self::PointerUp => EventKind::PointerUp,
            Self::Click(_) => EventKind::Click,
            Self::TextEntered { .. } => EventKind::TextEntered,
            Self::ClearPressed => EventKind::ClearPressed,
            Self::SavePressed => EventKind::SavePressed,
            Self::FilterPressed => EventKind::FilterPressed,
            Self::TextPressed => EventKind::TextPressed,
            Self::InkColorPicked(_) => EventKind::InkColorPicked,
            Self::BackgroundColorPicked(_) => EventKind::BackgroundColorPicked,
            Self::ImageChosen(_) => EventKind::ImageChosen,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventOutcome {
    Ignored,
    Redraw,
    /// Text mode is armed and the user clicked here; the shell should ask
    /// for the text and send it back as [`PadEvent::TextEntered`].
    TextRequested { x: i64, y: i64 },
    Exported { path: PathBuf, bytes: u64 },
}

pub type Handler = fn(&mut SignaturePadService, PadEvent) -> Result<EventOutcome, ApplicationError>;

/// Maps each UI event kind to the service operation that handles it.
pub struct DispatchTable {
    handlers: HashMap<EventKind, Handler>,
}

impl DispatchTable {
    pub fn standard() -> Self {
        let entries: [(EventKind, Handler); 12] = [
            (EventKind::PointerDown, on_pointer_down),
            (EventKind::PointerMove, on_pointer_move),
            (EventKind::PointerUp, on_pointer_up),
            (EventKind::Click, on_click),
            (EventKind::TextEntered, on_text_entered),
            (EventKind::ClearPressed, on_clear),
            (EventKind::SavePressed, on_save),
            (EventKind::FilterPressed, on_filter),
            (EventKind::TextPressed, on_text_pressed),
            (EventKind::InkColorPicked, on_ink_color),
            (EventKind::BackgroundColorPicked, on_background_color),
            (EventKind::ImageChosen, on_image_chosen),
        ];
        Self {
            handlers: entries.into_iter().collect(),
        }
    }

    pub fn handles(&self, kind: EventKind) -> bool {
        self.handlers.contains_key(&kind)
    }

    pub fn dispatch(
        &self,
        service: &mut SignaturePadService,
        event: PadEvent,
    ) -> Result<EventOutcome, ApplicationError> {
        let kind = event.kind();
        match self.handlers.get(&kind) {
            Some(handler) => handler(service, event),
            None => {
                debug!(?kind, "no handler registered");
                Ok(EventOutcome::Ignored)
            }
        }
    }
}

fn on_pointer_down(
    service: &mut SignaturePadService,
    event: PadEvent,
) -> Result<EventOutcome, ApplicationError> {
    let PadEvent::PointerDown(point) = event else {
        return Ok(EventOutcome::Ignored);
    };
    service.begin_stroke(BeginStrokeCommand { point });
    Ok(EventOutcome::Ignored)
}

fn on_pointer_move(
    service: &mut SignaturePadService,
    event: PadEvent,
) -> Result<EventOutcome, ApplicationError> {
    let PadEvent::PointerMove(point) = event else {
        return Ok(EventOutcome::Ignored);
    };
    if service.extend_stroke(ExtendStrokeCommand { point }) {
        return Ok(EventOutcome::Redraw);
    }
    Ok(EventOutcome::Ignored)
}

fn on_pointer_up(
    service: &mut SignaturePadService,
    _event: PadEvent,
) -> Result<EventOutcome, ApplicationError> {
    service.end_stroke(EndStrokeCommand);
    Ok(EventOutcome::Ignored)
}

fn on_click(
    service: &mut SignaturePadService,
    event: PadEvent,
) -> Result<EventOutcome, ApplicationError> {
    let PadEvent::Click(point) = event else {
        return Ok(EventOutcome::Ignored);
    };
    if !service.session().text_armed {
        return Ok(EventOutcome::Ignored);
    }
    Ok(EventOutcome::TextRequested {
        x: point.x.round() as i64,
        y: point.y.round() as i64,
    })
}

fn on_text_entered(
    service: &mut SignaturePadService,
    event: PadEvent,
) -> Result<EventOutcome, ApplicationError> {
    let PadEvent::TextEntered { point, text } = event else {
        return Ok(EventOutcome::Ignored);
    };
    if service.stamp_text(StampTextCommand { point, text })? {
        return Ok(EventOutcome::Redraw);
    }
    Ok(EventOutcome::Ignored)
}

fn on_clear(
    service: &mut SignaturePadService,
    _event: PadEvent,
) -> Result<EventOutcome, ApplicationError> {
    service.clear_canvas(ClearCanvasCommand);
    Ok(EventOutcome::Redraw)
}

fn on_save(
    service: &mut SignaturePadService,
    _event: PadEvent,
) -> Result<EventOutcome, ApplicationError> {
    let path = service.settings().export_path.clone();
    let bytes = service.export_png(ExportPngCommand { path: path.clone() })?;
    Ok(EventOutcome::Exported { path, bytes })
}

fn on_filter(
    service: &mut SignaturePadService,
    _event: PadEvent,
) -> Result<EventOutcome, ApplicationError> {
    service.apply_filter(ApplyFilterCommand)?;
    Ok(EventOutcome::Redraw)
}

fn on_text_pressed(
    service: &mut SignaturePadService,
    _event: PadEvent,
) -> Result<EventOutcome, ApplicationError> {
    service.arm_text(ArmTextCommand);
    Ok(EventOutcome::Ignored)
}

fn on_ink_color(
    service: &mut SignaturePadService,
    event: PadEvent,
) -> Result<EventOutcome, ApplicationError> {
    let PadEvent::InkColorPicked(hex) = event else {
        return Ok(EventOutcome::Ignored);
    };
    service.set_ink_color(SetInkColorCommand { hex })?;
    Ok(EventOutcome::Ignored)
}

fn on_background_color(
    service: &mut SignaturePadService,
    event: PadEvent,
) -> Result<EventOutcome, ApplicationError> {
    let PadEvent::BackgroundColorPicked(hex) = event else {
        return Ok(EventOutcome::Ignored);
    };
    service.set_background_color(SetBackgroundColorCommand { hex })?;
    Ok(EventOutcome::Redraw)
}

fn on_image_chosen(
    service: &mut SignaturePadService,
    event: PadEvent,
) -> Result<EventOutcome, ApplicationError> {
    let PadEvent::ImageChosen(path) = event else {
        return Ok(EventOutcome::Ignored);
    };
    service.upload_image(UploadImageCommand { path })?;
    Ok(EventOutcome::Redraw)
}
