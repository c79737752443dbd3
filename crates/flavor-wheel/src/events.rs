use crate::wheel::{Point, PointerId};
use cupping::language::Language;
use cupping::model::NoteKind;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down { id: PointerId, at: Point },
    Move { id: PointerId, at: Point },
    Up { id: PointerId },
    Cancel { id: PointerId },
    /// The pointer left the surface; handled as a release.
    Leave { id: PointerId },
}

#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    Pointer(PointerEvent),
    Frame,
    SetLanguage(Language),
    /// Toggle the active descriptor in the selected coffee's notes.
    Pick(NoteKind),
    /// Select the coffee that picks go to, numbered from 1.
    Select(usize),
    ConfigReload,
    Quit,
}
