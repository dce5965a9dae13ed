//! Text commands for the control surface.
//!
//! ```text
//! select <vehicle-id>   select a vehicle          (alias: sel)
//! select none           clear the selection       (alias: deselect)
//! speed <multiplier>    e.g. `speed 2`, `speed 0.5x`
//! start | play          start or resume
//! pause                 pause
//! toggle                play/pause button
//! reset                 rewind and restore the stored location
//! ```

use std::str::FromStr;

use fleet_core::VehicleId;

use crate::SimError;

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Command {
    Select(Option<VehicleId>),
    /// Raw multiplier; validated when applied.
    Speed(f64),
    Start,
    Pause,
    Toggle,
    Reset,
}

impl FromStr for Command {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, SimError> {
        let mut words = s.split_whitespace();
        let verb = words
            .next()
            .ok_or_else(|| SimError::Parse("empty command".into()))?
            .to_ascii_lowercase();
        let arg = words.next();
        if let Some(extra) = words.next() {
            return Err(SimError::Parse(format!("unexpected argument {extra:?}")));
        }

        let no_arg = |cmd: Command| match arg {
            None => Ok(cmd),
            Some(a) => Err(SimError::Parse(format!("`{verb}` takes no argument, got {a:?}"))),
        };

        match verb.as_str() {
            "select" | "sel" => match arg {
                None => Err(SimError::Parse("`select` needs a vehicle id or `none`".into())),
                Some(a) if a.eq_ignore_ascii_case("none") => Ok(Command::Select(None)),
                Some(a) => a
                    .parse::<VehicleId>()
                    .map(|v| Command::Select(Some(v)))
                    .map_err(|e| SimError::Parse(e.to_string())),
            },
            "deselect" => no_arg(Command::Select(None)),
            "speed" => {
                let a = arg.ok_or_else(|| SimError::Parse("`speed` needs a multiplier".into()))?;
                let a = a.strip_suffix(['x', 'X']).unwrap_or(a);
                a.parse::<f64>()
                    .map(Command::Speed)
                    .map_err(|e| SimError::Parse(format!("speed {a:?}: {e}")))
            }
            "start" | "play" => no_arg(Command::Start),
            "pause"          => no_arg(Command::Pause),
            "toggle"         => no_arg(Command::Toggle),
            "reset"          => no_arg(Command::Reset),
            other => Err(SimError::Parse(format!("unknown command {other:?}"))),
        }
    }
}
