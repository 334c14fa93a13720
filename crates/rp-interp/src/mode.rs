use std::fmt;
use std::str::FromStr;

use crate::InterpError;

/// Lookup rule used when a query time falls between samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InterpMode {
    /// Linear between samples, zero at or before the first sample and after the last.
    Linear,
    /// Linear between samples, clamped to the end values outside the range.
    LinearVolume,
    /// Value of the first sample at or after the query.
    Backwards,
    /// Value of the last sample at or before the query.
    Forwards,
}

impl InterpMode {
    pub fn code(self) -> char {
        match self {
            InterpMode::Linear => 'L',
            InterpMode::LinearVolume => 'V',
            InterpMode::Backwards => 'B',
            InterpMode::Forwards => 'F',
        }
    }

    /// Step mode matching a rate representation.
    pub fn for_rates(backwards: bool) -> Self {
        if backwards {
            InterpMode::Backwards
        } else {
            InterpMode::Forwards
        }
    }
}

impl FromStr for InterpMode {
    type Err = InterpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "L" => Ok(InterpMode::Linear),
            "V" => Ok(InterpMode::LinearVolume),
            "B" => Ok(InterpMode::Backwards),
            "F" => Ok(InterpMode::Forwards),
            other => Err(InterpError::InvalidArgument {
                what: format!("unknown interpolation mode '{other}'"),
            }),
        }
    }
}

impl fmt::Display for InterpMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_codes() {
        for mode in [
            InterpMode::Linear,
            InterpMode::LinearVolume,
            InterpMode::Backwards,
            InterpMode::Forwards,
        ] {
            assert_eq!(mode.to_string().parse::<InterpMode>().unwrap(), mode);
        }
        assert!(matches!(
            "X".parse::<InterpMode>(),
            Err(InterpError::InvalidArgument { .. })
        ));
        assert!("l".parse::<InterpMode>().is_err());
    }
}
