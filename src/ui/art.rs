//! ASCII portraits per pet kind and the frame transforms for each animation.

use std::time::Duration;

use crate::pet::Animation;

/// Frame length for all animations
const FRAME_MS: u128 = 150;

const CAT: &[&str] = &[
    r" /\_/\ ",
    r"( o.o )",
    r" > ^ < ",
];

const DOG: &[&str] = &[
    r"  __      _ ",
    r"o'')}____// ",
    r" `_/      ) ",
    r" (_(_/-(_/  ",
];

const BIRD: &[&str] = &[
    r"   __  ",
    r"  (o > ",
    r"\\_//) ",
    r" \_/_) ",
    r"  _|_  ",
];

const FISH: &[&str] = &[
    r"   _///_   ",
    r"  /o    \/ ",
    r"  > ))_./\ ",
    r"     <     ",
];

/// Shown when the kind has no portrait, like a missing image
const UNKNOWN: &[&str] = &[
    r"+-------+",
    r"|   ?   |",
    r"+-------+",
];

/// A rendered portrait frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub lines: Vec<String>,
    /// Draw this frame highlighted (pulse)
    pub emphasis: bool,
}

pub fn portrait(kind: &str) -> &'static [&'static str] {
    match kind.to_ascii_lowercase().as_str() {
        "cat" => CAT,
        "dog" => DOG,
        "bird" => BIRD,
        "fish" => FISH,
        _ => UNKNOWN,
    }
}

/// Render `kind`, transformed by the running animation and how long it has
/// been playing
pub fn frame(kind: &str, animation: Option<(Animation, Duration)>) -> Frame {
    let base = portrait(kind);
    let mut lines: Vec<String> = base.iter().map(|l| l.to_string()).collect();

    let Some((animation, elapsed)) = animation else {
        return Frame { lines, emphasis: false };
    };
    let tick = elapsed.as_millis() / FRAME_MS;

    match animation {
        Animation::Pulse => Frame {
            lines,
            emphasis: tick % 2 == 0,
        },
        Animation::Bounce => {
            // Hop: odd frames sit one row higher
            if tick % 2 == 0 {
                lines.insert(0, String::new());
            } else {
                lines.push(String::new());
            }
            Frame { lines, emphasis: false }
        }
        Animation::Shake => {
            let pad = match tick % 4 {
                0 => 1,
                1 => 3,
                2 => 1,
                _ => 0,
            };
            let lines = lines
                .into_iter()
                .map(|l| format!("{}{}", " ".repeat(pad), l))
                .collect();
            Frame { lines, emphasis: false }
        }
        Animation::Sleep => {
            let zs = match tick % 3 {
                0 => "       z",
                1 => "      z Z",
                _ => "     z Z z",
            };
            lines.insert(0, zs.to_string());
            Frame { lines, emphasis: false }
        }
    }
}
