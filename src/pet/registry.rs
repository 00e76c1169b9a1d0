use std::path::PathBuf;

use super::{Action, DisplaySurface, Pet};
use crate::sound::SoundPlayer;

/// Index of a pet in the registry. Pets are never removed, so an id stays
/// valid for the whole session.
pub type PetId = usize;

/// The pets, the current selection and the action log
#[derive(Debug, Default)]
pub struct Registry {
    pets: Vec<Pet>,
    selected: Option<PetId>,
    log: Vec<String>,
}

impl Registry {
    pub fn len(&self) -> usize {
        self.pets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pets.is_empty()
    }

    pub fn selected(&self) -> Option<PetId> {
        self.selected
    }

    pub fn log(&self) -> &[String] {
        &self.log
    }

    /// Bounds-checked even though selection only ever holds valid indices
    pub fn current(&self) -> Option<&Pet> {
        self.selected.and_then(|i| self.pets.get(i))
    }

    fn current_mut(&mut self) -> Option<&mut Pet> {
        match self.selected {
            Some(i) => self.pets.get_mut(i),
            None => None,
        }
    }

    fn labels(&self) -> Vec<String> {
        self.pets.iter().map(Pet::label).collect()
    }
}

/// Registry plus the display and sound capabilities it drives.
///
/// All operations run to completion synchronously. The only thing that
/// outlives a call is sound playback, which the player detaches itself.
pub struct PetWidget<D, S> {
    registry: Registry,
    display: D,
    sound: S,
    assets_dir: PathBuf,
}

impl<D: DisplaySurface, S: SoundPlayer> PetWidget<D, S> {
    pub fn new(display: D, sound: S, assets_dir: impl Into<PathBuf>) -> Self {
        let mut widget = Self {
            registry: Registry::default(),
            display,
            sound,
            assets_dir: assets_dir.into(),
        };
        widget.display.show_pet(None);
        widget
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    /// Append a new pet and select it
    pub fn create_pet(&mut self, name: &str, kind: &str) -> PetId {
        let pet = Pet::new(name, kind, &self.assets_dir);
        self.registry.pets.push(pet);
        let id = self.registry.pets.len() - 1;
        tracing::info!("Created pet #{}: {} ({})", id, name, kind);

        self.select_pet(id);
        self.log_action(format!("Created new pet: {} the {}!", name, kind));
        id
    }

    /// Select `index` if it names a pet; anything else is ignored
    pub fn select_pet(&mut self, index: PetId) {
        if index >= self.registry.pets.len() {
            tracing::debug!("Ignoring selection of missing pet #{}", index);
            return;
        }

        self.registry.selected = Some(index);
        self.display.set_animation(None);
        self.refresh_pet();
        self.refresh_roster();
    }

    pub fn current_pet(&self) -> Option<&Pet> {
        self.registry.current()
    }

    /// Apply `action` to the selected pet; no-op when nothing is selected
    pub fn apply_action(&mut self, action: Action) {
        let Some(pet) = self.registry.current_mut() else {
            return;
        };
        pet.apply(action);
        let message = action.describe(&pet.name);

        self.sound.play(action.cue());
        self.display.set_animation(Some(action.animation()));
        self.log_action(message);
        self.refresh_pet();
    }

    /// Rename the selected pet. Empty names and an empty selection are no-ops.
    pub fn rename_pet(&mut self, new_name: &str) {
        if new_name.is_empty() {
            return;
        }
        let Some(pet) = self.registry.current_mut() else {
            return;
        };

        let old_name = std::mem::replace(&mut pet.name, new_name.to_string());
        tracing::info!("Renamed {} to {}", old_name, new_name);

        self.log_action(format!("Renamed {} to {}.", old_name, new_name));
        self.refresh_roster();
        self.refresh_pet();
    }

    pub fn log_action(&mut self, message: impl Into<String>) {
        let message = message.into();
        self.display.append_log(&message);
        self.registry.log.push(message);
    }

    fn refresh_pet(&mut self) {
        self.display.show_pet(self.registry.current());
    }

    fn refresh_roster(&mut self) {
        let labels = self.registry.labels();
        self.display.set_roster(&labels, self.registry.selected);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use crate::pet::Animation;
    use crate::sound::SoundCue;

    /// Records every call the widget makes on its surfaces
    #[derive(Default)]
    struct Recorder {
        shown: Option<(String, i64, i64)>,
        roster: Vec<String>,
        roster_selected: Option<usize>,
        animations: Vec<Option<Animation>>,
        log: Vec<String>,
    }

    impl DisplaySurface for Recorder {
        fn show_pet(&mut self, pet: Option<&Pet>) {
            self.shown = pet.map(|p| (p.name().to_string(), p.weight(), p.happiness()));
        }

        fn set_roster(&mut self, labels: &[String], selected: Option<usize>) {
            self.roster = labels.to_vec();
            self.roster_selected = selected;
        }

        fn set_animation(&mut self, animation: Option<Animation>) {
            self.animations.push(animation);
        }

        fn append_log(&mut self, line: &str) {
            self.log.push(line.to_string());
        }
    }

    #[derive(Default)]
    struct Cues(Vec<SoundCue>);

    impl SoundPlayer for Cues {
        fn play(&mut self, cue: SoundCue) {
            self.0.push(cue);
        }
    }

    fn widget() -> PetWidget<Recorder, Cues> {
        PetWidget::new(Recorder::default(), Cues::default(), "assets")
    }

    fn stats(w: &PetWidget<Recorder, Cues>) -> (i64, i64) {
        let pet = w.current_pet().unwrap();
        (pet.weight(), pet.happiness())
    }

    #[test]
    fn test_empty_widget_has_no_selection() {
        let mut w = widget();
        assert!(w.current_pet().is_none());
        assert!(w.display().shown.is_none());

        w.apply_action(Action::Treat);
        w.rename_pet("Max");
        assert!(w.registry().log().is_empty());
        assert!(w.sound.0.is_empty());
    }

    #[test]
    fn test_create_pet_selects_it() {
        let mut w = widget();
        let id = w.create_pet("Fluffy", "cat");

        assert_eq!(id, 0);
        assert_eq!(w.registry().selected(), Some(0));
        assert_eq!(stats(&w), (10, 10));
        assert_eq!(w.current_pet().unwrap().image(), Path::new("assets/images/cat.png"));
        assert_eq!(w.registry().log(), ["Created new pet: Fluffy the cat!"]);
        assert_eq!(w.display().roster, ["Fluffy (cat)"]);
        assert_eq!(w.display().roster_selected, Some(0));
    }

    #[test]
    fn test_create_grows_by_one_and_selects_last() {
        let mut w = widget();
        for (i, name) in ["a", "b", "c", "d"].iter().enumerate() {
            let before = w.registry().len();
            let id = w.create_pet(name, "dog");
            assert_eq!(w.registry().len(), before + 1);
            assert_eq!(id, i);
            assert_eq!(w.registry().selected(), Some(w.registry().len() - 1));
        }
    }

    #[test]
    fn test_treat_then_exercise() {
        let mut w = widget();
        w.create_pet("Fluffy", "cat");

        w.apply_action(Action::Treat);
        assert_eq!(stats(&w), (12, 11));

        for _ in 0..5 {
            w.apply_action(Action::Exercise);
        }
        assert_eq!(stats(&w), (7, 6));
        assert_eq!(w.display().shown, Some(("Fluffy".to_string(), 7, 6)));
    }

    #[test]
    fn test_action_side_effects_in_order() {
        let mut w = widget();
        w.create_pet("Fluffy", "cat");
        w.apply_action(Action::Play);
        w.apply_action(Action::Play);

        assert_eq!(w.sound.0, [SoundCue::Play, SoundCue::Play]);
        // Selection clears, then each action starts its animation again
        assert_eq!(
            w.display().animations,
            [None, Some(Animation::Bounce), Some(Animation::Bounce)]
        );
        assert_eq!(w.display().log.last().unwrap(), "You played with Fluffy! So fun!");
    }

    #[test]
    fn test_exercise_floors_at_zero() {
        let mut w = widget();
        w.create_pet("Tiny", "fish");
        for _ in 0..15 {
            w.apply_action(Action::Exercise);
            let (weight, happiness) = stats(&w);
            assert!(weight >= 0 && happiness >= 0);
        }
        assert_eq!(stats(&w), (0, 0));
        assert_eq!(w.display().shown, Some(("Tiny".to_string(), 0, 0)));
    }

    #[test]
    fn test_select_out_of_range_is_ignored() {
        let mut w = widget();
        w.create_pet("Fluffy", "cat");
        w.apply_action(Action::Sleep);
        let log_len = w.registry().log().len();
        let animations = w.display().animations.len();

        w.select_pet(999);
        w.select_pet(1);

        assert_eq!(w.registry().selected(), Some(0));
        assert_eq!(stats(&w), (10, 11));
        assert_eq!(w.registry().log().len(), log_len);
        assert_eq!(w.display().animations.len(), animations);
    }

    #[test]
    fn test_select_switches_and_clears_animation() {
        let mut w = widget();
        w.create_pet("Fluffy", "cat");
        w.create_pet("Rex", "dog");
        w.apply_action(Action::Treat);

        w.select_pet(0);
        assert_eq!(w.current_pet().unwrap().name(), "Fluffy");
        assert_eq!(w.display().animations.last(), Some(&None));
        assert_eq!(w.display().shown, Some(("Fluffy".to_string(), 10, 10)));
        assert_eq!(w.display().roster_selected, Some(0));

        // Rex kept his own stats
        w.select_pet(1);
        assert_eq!(stats(&w), (12, 11));
    }

    #[test]
    fn test_rename_updates_roster_and_log() {
        let mut w = widget();
        w.create_pet("Fluffy", "cat");
        w.rename_pet("Max");

        assert_eq!(w.current_pet().unwrap().name(), "Max");
        assert_eq!(w.registry().log().last().unwrap(), "Renamed Fluffy to Max.");
        assert_eq!(w.display().roster, ["Max (cat)"]);
        assert_eq!(w.display().shown.as_ref().unwrap().0, "Max");
    }

    #[test]
    fn test_rename_empty_is_noop() {
        let mut w = widget();
        w.create_pet("Fluffy", "cat");
        let log_len = w.registry().log().len();

        w.rename_pet("");

        assert_eq!(w.current_pet().unwrap().name(), "Fluffy");
        assert_eq!(w.registry().log().len(), log_len);
    }

    #[test]
    fn test_log_is_append_only() {
        let mut w = widget();
        let mut seen: Vec<String> = Vec::new();
        let mut check = |w: &PetWidget<Recorder, Cues>| {
            let log = w.registry().log();
            assert!(log.len() >= seen.len());
            assert_eq!(&log[..seen.len()], &seen[..]);
            seen = log.to_vec();
        };

        w.create_pet("Fluffy", "cat");
        check(&w);
        w.apply_action(Action::Treat);
        check(&w);
        w.select_pet(5);
        check(&w);
        w.rename_pet("");
        check(&w);
        w.create_pet("Rex", "dog");
        check(&w);
        w.rename_pet("Max");
        check(&w);
        w.log_action("custom entry");
        check(&w);

        assert_eq!(w.display().log, w.registry().log());
    }
}
