//! Pets, the actions that can be applied to them, and the registry that
//! keeps the display in step with the selected pet.

pub mod registry;
pub mod surface;

pub use registry::PetWidget;
pub use surface::{Animation, DisplaySurface};

use std::path::{Path, PathBuf};

use crate::sound::SoundCue;

pub const INITIAL_WEIGHT: i64 = 10;
pub const INITIAL_HAPPINESS: i64 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pet {
    name: String,
    kind: String,
    image: PathBuf,
    weight: i64,
    happiness: i64,
}

impl Pet {
    /// New pet with starting stats. `kind` is not checked against any known
    /// set; an unknown kind simply yields an image path that may not exist.
    pub fn new(name: impl Into<String>, kind: impl Into<String>, assets_dir: &Path) -> Self {
        let kind = kind.into();
        let image = image_path(assets_dir, &kind);
        Self {
            name: name.into(),
            kind,
            image,
            weight: INITIAL_WEIGHT,
            happiness: INITIAL_HAPPINESS,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn image(&self) -> &Path {
        &self.image
    }

    pub fn weight(&self) -> i64 {
        self.weight
    }

    pub fn happiness(&self) -> i64 {
        self.happiness
    }

    /// Label used in the roster: `name (kind)`
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.kind)
    }

    /// Apply an action's deltas, then floor both stats at zero.
    /// Stats have no ceiling.
    pub fn apply(&mut self, action: Action) {
        let (d_weight, d_happiness) = action.deltas();
        self.weight += d_weight;
        self.happiness += d_happiness;
        self.clamp();
    }

    fn clamp(&mut self) {
        self.weight = self.weight.max(0);
        self.happiness = self.happiness.max(0);
    }
}

/// `<assets>/images/<kind>.png`
pub fn image_path(assets_dir: &Path, kind: &str) -> PathBuf {
    assets_dir.join("images").join(format!("{}.png", kind))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Treat,
    Play,
    Exercise,
    Sleep,
}

impl Action {
    pub fn name(self) -> &'static str {
        match self {
            Action::Treat => "Treat",
            Action::Play => "Play",
            Action::Exercise => "Exercise",
            Action::Sleep => "Sleep",
        }
    }

    /// (Δweight, Δhappiness)
    pub fn deltas(self) -> (i64, i64) {
        match self {
            Action::Treat => (2, 1),
            Action::Play => (-1, 2),
            Action::Exercise => (-1, -1),
            Action::Sleep => (0, 1),
        }
    }

    pub fn cue(self) -> SoundCue {
        match self {
            Action::Treat => SoundCue::Treat,
            Action::Play => SoundCue::Play,
            Action::Exercise => SoundCue::Exercise,
            Action::Sleep => SoundCue::Sleep,
        }
    }

    pub fn animation(self) -> Animation {
        match self {
            Action::Treat => Animation::Pulse,
            Action::Play => Animation::Bounce,
            Action::Exercise => Animation::Shake,
            Action::Sleep => Animation::Sleep,
        }
    }

    /// Log line for this action applied to the named pet
    pub fn describe(self, name: &str) -> String {
        match self {
            Action::Treat => format!("You gave {} a treat! Yummy!", name),
            Action::Play => format!("You played with {}! So fun!", name),
            Action::Exercise => format!("{} exercised. Phew!", name),
            Action::Sleep => format!("{} took a nap. Zzz...", name),
        }
    }
}
