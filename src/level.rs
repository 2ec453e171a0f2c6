use std::fmt;

use crate::error::LogError;

/// Log levels, carrying the matching `android.util.Log` priorities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogLevel {
    V = 2,
    D = 3,
    I = 4,
    W = 5,
    E = 6,
    A = 7,
}

impl LogLevel {
    pub fn priority(self) -> i32 {
        self as i32
    }

    /// `log` has no assert level, so `A` is reported as an error.
    pub fn to_log_level(self) -> log::Level {
        match self {
            LogLevel::V => log::Level::Trace,
            LogLevel::D => log::Level::Debug,
            LogLevel::I => log::Level::Info,
            LogLevel::W => log::Level::Warn,
            LogLevel::E | LogLevel::A => log::Level::Error,
        }
    }

    /// ARGB colour used when rendering this level in the log overlay.
    pub fn highlight_color(self) -> u32 {
        match self {
            LogLevel::V => 0xffbbbbbb,
            LogLevel::D => 0xffffffff,
            LogLevel::I => 0xff6a8759,
            LogLevel::W => 0xffbbb529,
            LogLevel::E => 0xffff6b68,
            LogLevel::A => 0xffffff00,
        }
    }
}

impl TryFrom<i32> for LogLevel {
    type Error = LogError;

    fn try_from(priority: i32) -> Result<Self, Self::Error> {
        match priority {
            2 => Ok(LogLevel::V),
            3 => Ok(LogLevel::D),
            4 => Ok(LogLevel::I),
            5 => Ok(LogLevel::W),
            6 => Ok(LogLevel::E),
            7 => Ok(LogLevel::A),
            other => Err(LogError::InvalidLevel(other)),
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self {
            LogLevel::V => "V",
            LogLevel::D => "D",
            LogLevel::I => "I",
            LogLevel::W => "W",
            LogLevel::E => "E",
            LogLevel::A => "A",
        };
        f.write_str(letter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_conversion() {
        for level in [LogLevel::V, LogLevel::D, LogLevel::I, LogLevel::W, LogLevel::E, LogLevel::A] {
            let parsed = LogLevel::try_from(level.priority()).expect("Failed to parse priority");
            assert_eq!(parsed, level);
        }
    }

    #[test]
    fn test_unknown_priority_is_rejected() {
        match LogLevel::try_from(9) {
            Err(LogError::InvalidLevel(9)) => {}
            other => panic!("Unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_assert_maps_to_error() {
        assert_eq!(LogLevel::A.to_log_level(), log::Level::Error);
        assert_eq!(LogLevel::V.to_log_level(), log::Level::Trace);
    }
}
