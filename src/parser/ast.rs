// Abstract Syntax Tree for interaction scripts

use crate::interaction::Interaction;

/// One step of an interaction script
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Step {
    /// Deliver an event to the chart at the current clock time
    Event(Interaction),
    /// Advance the clock by this many milliseconds
    Wait(f64),
}
