//! Orientation of a transcript alignment relative to the reference.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Whether reference coordinates increase (forward) or decrease (reverse) as the
/// transcript is read left to right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Strand {
    #[default]
    Forward,
    Reverse,
}

impl Strand {
    /// Multiplier applied to reference advances: +1 or -1.
    #[must_use]
    pub fn sign(self) -> i64 {
        match self {
            Self::Forward => 1,
            Self::Reverse => -1,
        }
    }

    #[must_use]
    pub fn is_reverse(self) -> bool {
        self == Self::Reverse
    }
}

/// Parses the direction column of a mapping line, which must be the integer 1 or -1.
impl FromStr for Strand {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().parse::<i64>() {
            Ok(1) => Ok(Self::Forward),
            Ok(-1) => Ok(Self::Reverse),
            _ => Err(Error::InvalidDirection(s.to_string())),
        }
    }
}

impl fmt::Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.sign())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_direction_field() {
        assert_eq!("1".parse::<Strand>().unwrap(), Strand::Forward);
        assert_eq!("+1".parse::<Strand>().unwrap(), Strand::Forward);
        assert_eq!("-1".parse::<Strand>().unwrap(), Strand::Reverse);
    }

    #[test]
    fn invalid_direction() {
        for value in ["0", "2", "-2", "+", "-", "forward", ""] {
            let err = value.parse::<Strand>().unwrap_err();
            assert!(matches!(err, Error::InvalidDirection(ref v) if v == value));
        }
    }

    #[test]
    fn display_round_trip() {
        for strand in [Strand::Forward, Strand::Reverse] {
            let back: Strand = strand.to_string().parse().unwrap();
            assert_eq!(strand, back);
        }
    }

    #[test]
    fn sign_and_reverse() {
        assert_eq!(Strand::Forward.sign(), 1);
        assert_eq!(Strand::Reverse.sign(), -1);
        assert!(!Strand::Forward.is_reverse());
        assert!(Strand::Reverse.is_reverse());
        assert_eq!(Strand::default(), Strand::Forward);
    }
}
