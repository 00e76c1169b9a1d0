//! Terminal-side state the pet widget writes into and `ui::draw` reads from.

use std::time::{Duration, Instant};

use crate::pet::{Animation, DisplaySurface, Pet};

/// Snapshot of the selected pet as last pushed by the widget
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PetPanel {
    pub name: String,
    pub kind: String,
    pub image: String,
    pub weight: i64,
    pub happiness: i64,
}

#[derive(Debug, Clone, Copy)]
pub struct ActiveAnimation {
    pub animation: Animation,
    pub started: Instant,
}

#[derive(Debug, Default)]
pub struct ViewState {
    pub pet: Option<PetPanel>,
    pub roster: Vec<String>,
    pub roster_selected: Option<usize>,
    pub animation: Option<ActiveAnimation>,
    pub log: Vec<String>,
    /// Lines scrolled back from the newest log entry
    pub log_scroll: usize,
}

impl ViewState {
    /// Drop the running animation once it has played for `duration`
    pub fn expire_animation(&mut self, now: Instant, duration: Duration) {
        if let Some(active) = self.animation {
            if now.saturating_duration_since(active.started) >= duration {
                self.animation = None;
            }
        }
    }

    pub fn scroll_log_back(&mut self, lines: usize) {
        let max = self.log.len().saturating_sub(1);
        self.log_scroll = (self.log_scroll + lines).min(max);
    }

    pub fn scroll_log_forward(&mut self, lines: usize) {
        self.log_scroll = self.log_scroll.saturating_sub(lines);
    }
}

impl DisplaySurface for ViewState {
    fn show_pet(&mut self, pet: Option<&Pet>) {
        self.pet = pet.map(|p| PetPanel {
            name: p.name().to_string(),
            kind: p.kind().to_string(),
            image: p.image().display().to_string(),
            weight: p.weight(),
            happiness: p.happiness(),
        });
    }

    fn set_roster(&mut self, labels: &[String], selected: Option<usize>) {
        self.roster = labels.to_vec();
        self.roster_selected = selected;
    }

    fn set_animation(&mut self, animation: Option<Animation>) {
        // A fresh start time restarts a repeated animation from frame zero
        self.animation = animation.map(|animation| ActiveAnimation {
            animation,
            started: Instant::now(),
        });
    }

    fn append_log(&mut self, line: &str) {
        self.log.push(line.to_string());
        self.log_scroll = 0;
    }
}
