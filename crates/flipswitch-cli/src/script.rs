//! Gesture replay scripts.
//!
//! One command per line; blank lines and `#` comments are skipped.
//!
//! ```text
//! begin
//! move 40
//! end
//! set off animated
//! resize 132 32
//! ```

use anyhow::{bail, Context, Result};
use flipswitch_core::{SwitchSink, ToggleDragEngine, TrackGeometry};

/// One replayable engine call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Command {
    /// Open a drag session
    Begin,
    /// Drag by a horizontal delta
    Move(f32),
    /// Release the drag
    End,
    /// Abandon the drag
    Cancel,
    /// Discrete click or tap
    Click,
    /// Programmatic set
    Set {
        /// Target state
        on: bool,
        /// Whether to animate the settle
        animated: bool,
    },
    /// New switch extent
    Resize {
        /// Total width
        width: f32,
        /// Total height
        height: f32,
    },
}

impl Command {
    /// Feed this command to an engine.
    pub(crate) fn apply(self, engine: &mut ToggleDragEngine, sink: &mut impl SwitchSink) {
        match self {
            Self::Begin => engine.on_drag_begin(sink),
            Self::Move(dx) => engine.on_drag_changed(dx, sink),
            Self::End => engine.on_drag_ended(sink),
            Self::Cancel => engine.on_drag_cancelled(sink),
            Self::Click => engine.on_activate(sink),
            Self::Set { on, animated } => engine.set_state(on, animated, sink),
            Self::Resize { width, height } => {
                engine.configure(TrackGeometry::from_extent(width, height), sink);
            }
        }
    }
}

/// A parsed command with its source line number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Step {
    /// 1-based line number
    pub(crate) line: usize,
    /// The command
    pub(crate) command: Command,
}

/// Parse a whole script.
pub(crate) fn parse(source: &str) -> Result<Vec<Step>> {
    let mut steps = Vec::new();
    for (index, raw) in source.lines().enumerate() {
        let line = index + 1;
        let text = raw.split('#').next().unwrap_or_default().trim();
        if text.is_empty() {
            continue;
        }
        let command = parse_command(text).with_context(|| format!("line {line}: `{text}`"))?;
        steps.push(Step { line, command });
    }
    Ok(steps)
}

fn parse_command(text: &str) -> Result<Command> {
    let words: Vec<&str> = text.split_whitespace().collect();
    let command = match words.as_slice() {
        ["begin"] => Command::Begin,
        ["move", dx] => Command::Move(number(dx)?),
        ["end"] => Command::End,
        ["cancel"] => Command::Cancel,
        ["click"] => Command::Click,
        ["set", state] => Command::Set {
            on: state_word(state)?,
            animated: false,
        },
        ["set", state, "animated"] => Command::Set {
            on: state_word(state)?,
            animated: true,
        },
        ["resize", width, height] => Command::Resize {
            width: number(width)?,
            height: number(height)?,
        },
        _ => bail!("unknown command"),
    };
    Ok(command)
}

fn number(word: &str) -> Result<f32> {
    let value: f32 = word
        .parse()
        .with_context(|| format!("expected a number, got `{word}`"))?;
    if !value.is_finite() {
        bail!("expected a finite number, got `{word}`");
    }
    Ok(value)
}

fn state_word(word: &str) -> Result<bool> {
    match word {
        "on" => Ok(true),
        "off" => Ok(false),
        other => bail!("expected `on` or `off`, got `{other}`"),
    }
}
