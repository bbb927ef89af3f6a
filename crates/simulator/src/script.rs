//! Input scripts for `simulator run`.
//!
//! A script is a comma-separated list of steps:
//!
//! | Step | Meaning |
//! |---|---|
//! | `ch+` / `ch-` | channel knob clockwise / counter-clockwise |
//! | `vol+` / `vol-` | volume knob clockwise / counter-clockwise |
//! | `power` | power button |
//! | `ir-ch+` / `ir-ch-` / `ir-vol+` / `ir-vol-` / `mute` / `ir-power` | IR remote keys |
//! | `wait:<ms>` | let time pass with no input |
//! | `end` | the player reports the current item finished |
//!
//! Space-separated inputs inside brackets (`[ch+ vol+]`) land in the same
//! poll.

use anyhow::{bail, Context, Result};
use platform::{InputEvent, InputFlags};

/// One scripted step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Input edges raised before one poll.
    Input(InputFlags),
    /// Idle for this many milliseconds.
    Wait(u32),
    /// Playback of the current item finished.
    End,
}

fn event(token: &str) -> Option<InputEvent> {
    Some(match token {
        "ch+" => InputEvent::ChannelCw,
        "ch-" => InputEvent::ChannelCcw,
        "vol+" => InputEvent::VolumeCw,
        "vol-" => InputEvent::VolumeCcw,
        "power" => InputEvent::Power,
        "ir-ch+" => InputEvent::IrChannelUp,
        "ir-ch-" => InputEvent::IrChannelDown,
        "ir-vol+" => InputEvent::IrVolumeUp,
        "ir-vol-" => InputEvent::IrVolumeDown,
        "mute" => InputEvent::IrMute,
        "ir-power" => InputEvent::IrPower,
        _ => return None,
    })
}

fn step(token: &str) -> Result<Step> {
    if token == "end" {
        return Ok(Step::End);
    }
    if let Some(ms) = token.strip_prefix("wait:") {
        let ms = ms.parse().with_context(|| format!("bad wait duration in {token:?}"))?;
        return Ok(Step::Wait(ms));
    }
    if let Some(group) = token.strip_prefix('[').and_then(|t| t.strip_suffix(']')) {
        let mut flags = InputFlags::NONE;
        for name in group.split_whitespace() {
            match event(name) {
                Some(e) => flags.raise(e),
                None => bail!("unknown input {name:?} in {token:?}"),
            }
        }
        return Ok(Step::Input(flags));
    }
    match event(token) {
        Some(e) => Ok(Step::Input(InputFlags::only(e))),
        None => bail!("unknown script step {token:?}"),
    }
}

/// Parse a whole script. Empty steps are skipped.
pub fn parse(script: &str) -> Result<Vec<Step>> {
    script
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(step)
        .collect()
}

#[cfg(test)]
#[allow(clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn parses_inputs_waits_and_end() {
        let steps = parse("vol+, ch-,wait:250,,end").unwrap();
        assert_eq!(
            steps,
            [
                Step::Input(InputFlags::only(InputEvent::VolumeCw)),
                Step::Input(InputFlags::only(InputEvent::ChannelCcw)),
                Step::Wait(250),
                Step::End,
            ]
        );
    }

    #[test]
    fn groups_share_one_poll() {
        let steps = parse("[ch+ mute]").unwrap();
        let Step::Input(flags) = steps[0] else {
            panic!("expected input step");
        };
        assert!(flags.contains(InputEvent::ChannelCw));
        assert!(flags.contains(InputEvent::IrMute));
    }

    #[test]
    fn rejects_unknown_steps() {
        assert!(parse("vol+,jump").is_err());
        assert!(parse("wait:soon").is_err());
        assert!(parse("[ch+ nope]").is_err());
    }
}
