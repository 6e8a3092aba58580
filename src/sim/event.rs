/// Events emitted while the engine processes a frame.
/// The presentation layer consumes these for sound and logging.

use crate::domain::board::Mark;
use crate::sim::screen::ScreenId;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FrameEvent {
    KeyClick,
    LineSubmitted,
    AccessGranted,
    AccessDenied,
    ScreenEntered(ScreenId),
    SideChosen(&'static str),
    DefconChanged(u8),
    SimulationComplete,
    MarkPlaced { mark: Mark, row: usize, col: usize },
    CellOccupied,
}
