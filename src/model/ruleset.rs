use std::str::FromStr;

use strum_macros::{Display, EnumIter, EnumString};

use crate::error::ProcessorError;

/// Game rulesets as named on the command line. Only osu!standard is
/// supported by the calculators in this repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Ruleset {
    #[strum(serialize = "osu", serialize = "std")]
    Osu,
    Taiko,
    Catch,
    Mania
}

/// Parses a ruleset argument and rejects everything the engine cannot
/// calculate. Fatal before any file or network access.
pub fn resolve_supported(gamemode: &str) -> Result<Ruleset, ProcessorError> {
    let ruleset = Ruleset::from_str(gamemode)
        .map_err(|_| ProcessorError::Config(format!("unknown gamemode: {gamemode}")))?;

    if ruleset != Ruleset::Osu {
        return Err(ProcessorError::Config(format!(
            "only the osu!standard ruleset is supported, got {ruleset}"
        )));
    }

    Ok(ruleset)
}

#[cfg(test)]
mod tests {
    use super::{resolve_supported, Ruleset};

    #[test]
    fn test_std_and_osu_aliases() {
        assert_eq!(resolve_supported("std").unwrap(), Ruleset::Osu);
        assert_eq!(resolve_supported("osu").unwrap(), Ruleset::Osu);
    }

    #[test]
    fn test_unsupported_ruleset_rejected() {
        assert!(resolve_supported("mania").is_err());
        assert!(resolve_supported("catch").is_err());
    }

    #[test]
    fn test_unknown_gamemode_rejected() {
        assert!(resolve_supported("fortnite").is_err());
    }
}
