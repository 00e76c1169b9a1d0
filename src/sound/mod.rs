//! Sound cues played when a pet action fires.
//!
//! Playback is fire-and-forget. Every player swallows its own failures
//! (missing file, no audio command, notification daemon down) and only
//! traces them, so an action never stalls or fails because of sound.

use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Audio commands (program and leading args) tried in order by
/// [`CommandPlayer`]. The cue path is appended as the last argument.
const PLAYER_COMMANDS: &[&[&str]] = &[
    &["pw-play"],
    &["paplay"],
    &["mpg123", "-q"],
    &["ffplay", "-nodisp", "-autoexit", "-loglevel", "quiet"],
    &["aplay", "-q"],
    &["afplay"],
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    Treat,
    Play,
    Exercise,
    Sleep,
}

impl SoundCue {
    pub fn name(self) -> &'static str {
        match self {
            SoundCue::Treat => "treat",
            SoundCue::Play => "play",
            SoundCue::Exercise => "exercise",
            SoundCue::Sleep => "sleep",
        }
    }

    /// File under `<assets>/sounds/`
    pub fn file_name(self) -> String {
        format!("{}.mp3", self.name())
    }

    /// Freedesktop sound theme name used by the notification backend
    fn theme_sound(self) -> &'static str {
        match self {
            SoundCue::Treat => "message-new-instant",
            SoundCue::Play => "complete",
            SoundCue::Exercise => "dialog-warning",
            SoundCue::Sleep => "dialog-information",
        }
    }
}

/// Capability used by the pet widget to emit a cue.
pub trait SoundPlayer {
    fn play(&mut self, cue: SoundCue);
}

impl<P: SoundPlayer + ?Sized> SoundPlayer for Box<P> {
    fn play(&mut self, cue: SoundCue) {
        (**self).play(cue)
    }
}

/// Which player the app wires in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SoundBackend {
    #[default]
    Command,
    Notify,
    Bell,
    Off,
}

pub fn player_for(backend: SoundBackend, assets_dir: &Path) -> Box<dyn SoundPlayer> {
    match backend {
        SoundBackend::Command => Box::new(CommandPlayer::new(assets_dir.join("sounds"))),
        SoundBackend::Notify => Box::new(NotifyPlayer),
        SoundBackend::Bell => Box::new(BellPlayer),
        SoundBackend::Off => Box::new(MutePlayer),
    }
}

/// Plays `<sounds_dir>/<cue>.mp3` through the first audio command that works
pub struct CommandPlayer {
    sounds_dir: PathBuf,
    commands: Vec<Vec<String>>,
}

impl CommandPlayer {
    pub fn new(sounds_dir: impl Into<PathBuf>) -> Self {
        let commands = PLAYER_COMMANDS
            .iter()
            .map(|argv| argv.iter().map(|a| a.to_string()).collect())
            .collect();
        Self::with_commands(sounds_dir, commands)
    }

    /// Same player with a custom command list, each entry `[program, args...]`
    pub fn with_commands(sounds_dir: impl Into<PathBuf>, commands: Vec<Vec<String>>) -> Self {
        Self {
            sounds_dir: sounds_dir.into(),
            commands,
        }
    }

    pub fn cue_path(&self, cue: SoundCue) -> PathBuf {
        self.sounds_dir.join(cue.file_name())
    }
}

/// Runs each command on `path` until one exits successfully. Returns the
/// program that played it, or `None` once the whole list has failed.
fn play_file(commands: &[Vec<String>], path: &Path) -> Option<String> {
    for argv in commands {
        let Some((program, args)) = argv.split_first() else {
            continue;
        };
        match Command::new(program)
            .args(args)
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
        {
            Ok(status) if status.success() => return Some(program.clone()),
            Ok(status) => {
                tracing::debug!("{} exited with {} playing {}", program, status, path.display());
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => tracing::debug!("{} failed: {}", program, e),
        }
    }

    let tried: Vec<&str> = commands
        .iter()
        .filter_map(|argv| argv.first().map(String::as_str))
        .collect();
    tracing::debug!("No audio command could play {} (tried {})", path.display(), tried.join(", "));
    None
}

impl SoundPlayer for CommandPlayer {
    fn play(&mut self, cue: SoundCue) {
        let path = self.cue_path(cue);
        if !path.exists() {
            tracing::debug!("Sound file not found for {}: {}", cue.name(), path.display());
            return;
        }

        let handle = match tokio::runtime::Handle::try_current() {
            Ok(h) => h,
            Err(e) => {
                tracing::debug!("No runtime for sound playback: {}", e);
                return;
            }
        };

        // Detached: the action pipeline never waits on playback
        let commands = self.commands.clone();
        handle.spawn_blocking(move || play_file(&commands, &path));
    }
}

/// Desktop notification carrying a themed sound
pub struct NotifyPlayer;

impl SoundPlayer for NotifyPlayer {
    fn play(&mut self, cue: SoundCue) {
        let send = move || {
            if let Err(e) = notify_rust::Notification::new()
                .summary("gigapet")
                .body(cue.name())
                .sound_name(cue.theme_sound())
                .show()
            {
                tracing::debug!("Notification sound failed: {}", e);
            }
        };

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn_blocking(send);
            }
            Err(e) => tracing::debug!("No runtime for notification sound: {}", e),
        }
    }
}

/// Rings the terminal bell for every cue
pub struct BellPlayer;

impl SoundPlayer for BellPlayer {
    fn play(&mut self, _cue: SoundCue) {
        let mut out = std::io::stdout();
        if let Err(e) = out.write_all(b"\x07").and_then(|_| out.flush()) {
            tracing::debug!("Terminal bell failed: {}", e);
        }
    }
}

pub struct MutePlayer;

impl SoundPlayer for MutePlayer {
    fn play(&mut self, _cue: SoundCue) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cue_file_names() {
        assert_eq!(SoundCue::Treat.file_name(), "treat.mp3");
        assert_eq!(SoundCue::Exercise.file_name(), "exercise.mp3");
    }

    #[test]
    fn test_command_player_resolves_under_sounds_dir() {
        let player = CommandPlayer::new("assets/sounds");
        assert_eq!(
            player.cue_path(SoundCue::Sleep),
            PathBuf::from("assets/sounds/sleep.mp3")
        );
    }

    #[test]
    fn test_missing_sound_file_is_swallowed() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut player = CommandPlayer::new(dir.path());
        // No file and no runtime: must return quietly
        player.play(SoundCue::Play);
    }

    #[cfg(unix)]
    /// `sh <script>` so the fake players need no exec bit
    fn fake_player(dir: &Path, name: &str, body: &str) -> Vec<String> {
        let script = dir.join(name);
        std::fs::write(&script, format!("#!/bin/sh\n{}\n", body)).unwrap();
        vec!["sh".to_string(), script.display().to_string()]
    }

    #[cfg(unix)]
    fn cue_file(dir: &Path, cue: SoundCue) {
        std::fs::create_dir_all(dir).unwrap();
        std::fs::write(dir.join(cue.file_name()), b"").unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_and_missing_commands_fall_through() {
        let dir = tempfile::TempDir::new().unwrap();
        let marker = dir.path().join("played");
        let sound = dir.path().join("treat.mp3");
        std::fs::write(&sound, b"").unwrap();

        let commands = vec![
            vec![dir.path().join("no-such-player").display().to_string()],
            fake_player(dir.path(), "broken", "exit 1"),
            fake_player(dir.path(), "works", &format!("touch '{}'", marker.display())),
        ];

        let used = play_file(&commands, &sound);
        assert_eq!(used.as_deref(), Some("sh"));
        assert!(marker.exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_all_commands_failing_is_swallowed() {
        let dir = tempfile::TempDir::new().unwrap();
        let sound = dir.path().join("sleep.mp3");
        std::fs::write(&sound, b"").unwrap();

        let commands = vec![
            vec![dir.path().join("absent").display().to_string()],
            fake_player(dir.path(), "broken", "exit 3"),
            Vec::new(),
        ];
        assert_eq!(play_file(&commands, &sound), None);
    }

    #[cfg(unix)]
    #[test]
    fn test_player_reaches_working_command_in_background() {
        let dir = tempfile::TempDir::new().unwrap();
        let sounds = dir.path().join("sounds");
        cue_file(&sounds, SoundCue::Treat);
        let marker = dir.path().join("played");

        let mut player = CommandPlayer::with_commands(
            &sounds,
            vec![
                fake_player(dir.path(), "broken", "exit 1"),
                fake_player(dir.path(), "works", &format!("touch '{}'", marker.display())),
            ],
        );

        let runtime = tokio::runtime::Runtime::new().unwrap();
        {
            let _guard = runtime.enter();
            player.play(SoundCue::Treat);
        }
        // Dropping the runtime waits for the blocking playback task
        drop(runtime);

        assert!(marker.exists());
    }

    #[test]
    fn test_boxed_player_forwards() {
        struct Count(usize);
        impl SoundPlayer for Count {
            fn play(&mut self, _cue: SoundCue) {
                self.0 += 1;
            }
        }

        let mut boxed: Box<Count> = Box::new(Count(0));
        boxed.play(SoundCue::Treat);
        boxed.play(SoundCue::Sleep);
        assert_eq!(boxed.0, 2);
    }

    #[test]
    fn test_backend_parses_lowercase() {
        #[derive(Deserialize)]
        struct Wrapper {
            sound: SoundBackend,
        }
        let w: Wrapper = toml::from_str("sound = \"notify\"").unwrap();
        assert_eq!(w.sound, SoundBackend::Notify);
    }
}
