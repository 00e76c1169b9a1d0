//! Display capability driven by the pet widget.
//!
//! The widget pushes state out through [`DisplaySurface`] and never reads it
//! back. How an animation is restarted, scrolled or drawn is up to the
//! surface.

use super::Pet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Animation {
    Pulse,
    Bounce,
    Shake,
    Sleep,
}

impl Animation {
    pub fn name(self) -> &'static str {
        match self {
            Animation::Pulse => "pulse",
            Animation::Bounce => "bounce",
            Animation::Shake => "shake",
            Animation::Sleep => "sleep",
        }
    }
}

pub trait DisplaySurface {
    /// Show the selected pet's name, stats and image, or the empty state
    fn show_pet(&mut self, pet: Option<&Pet>);

    /// Replace the roster labels and mark the selected entry
    fn set_roster(&mut self, labels: &[String], selected: Option<usize>);

    /// Start `animation`, replacing any running one. Starting the animation
    /// that is already running restarts it. `None` stops animating.
    fn set_animation(&mut self, animation: Option<Animation>);

    /// Append a line to the log and bring it into view
    fn append_log(&mut self, line: &str);
}
