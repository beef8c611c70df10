//! PSU count and PDU side definitions.

use crate::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of power supplies installed in each server.
///
/// Every PSU is cabled to its own PDU outlet; odd-numbered PSUs land on
/// side A and even-numbered PSUs on side B, so one outlet number is used
/// on both PDUs for each pair of PSUs.
///
/// # Examples
///
/// ```
/// use pdu_types::PsuCount;
///
/// let psu = PsuCount::try_from(4).unwrap();
/// assert_eq!(psu.ports_per_server(), 2);
///
/// assert!(PsuCount::try_from(3).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum PsuCount {
    Two,
    Four,
    Six,
}

impl PsuCount {
    /// Returns the number of PSUs.
    pub const fn as_u8(&self) -> u8 {
        match self {
            PsuCount::Two => 2,
            PsuCount::Four => 4,
            PsuCount::Six => 6,
        }
    }

    /// Outlet numbers consumed per server (one per A/B pair).
    pub const fn ports_per_server(&self) -> usize {
        (self.as_u8() / 2) as usize
    }

    /// Outlets assigned across both PDUs per server.
    pub const fn outlets_per_server(&self) -> u32 {
        self.as_u8() as u32
    }
}

impl fmt::Display for PsuCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}

impl FromStr for PsuCount {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let count: u8 = s
            .trim()
            .parse()
            .map_err(|_| ParseError::InvalidPsuCount(s.to_string()))?;
        PsuCount::try_from(count)
    }
}

impl TryFrom<u8> for PsuCount {
    type Error = ParseError;

    fn try_from(count: u8) -> Result<Self, Self::Error> {
        match count {
            2 => Ok(PsuCount::Two),
            4 => Ok(PsuCount::Four),
            6 => Ok(PsuCount::Six),
            other => Err(ParseError::InvalidPsuCount(other.to_string())),
        }
    }
}

impl From<PsuCount> for u8 {
    fn from(psu: PsuCount) -> u8 {
        psu.as_u8()
    }
}

/// One of the two redundant PDU units in a rack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Side {
    A,
    B,
}

impl Side {
    /// Outlet label prefix used by the PDU CLI (`AA1`, `BA1`, ...).
    pub const fn outlet_prefix(&self) -> &'static str {
        match self {
            Side::A => "AA",
            Side::B => "BA",
        }
    }

    /// PSU number carried by this side for the `pair`-th outlet pair
    /// (0-based): side A gets 1, 3, 5 and side B gets 2, 4, 6.
    pub const fn psu_number(&self, pair: u8) -> u8 {
        match self {
            Side::A => pair * 2 + 1,
            Side::B => pair * 2 + 2,
        }
    }

    /// Formats the outlet label for a port on this side.
    pub fn outlet(&self, port: &str) -> String {
        format!("{}{}", self.outlet_prefix(), port)
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::A => write!(f, "A"),
            Side::B => write!(f, "B"),
        }
    }
}

impl FromStr for Side {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A" => Ok(Side::A),
            "B" => Ok(Side::B),
            _ => Err(ParseError::InvalidSide(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_valid_psu_counts() {
        assert_eq!(PsuCount::try_from(2).unwrap(), PsuCount::Two);
        assert_eq!(PsuCount::try_from(4).unwrap(), PsuCount::Four);
        assert_eq!(PsuCount::try_from(6).unwrap(), PsuCount::Six);
    }

    #[test]
    fn test_invalid_psu_counts() {
        assert!(PsuCount::try_from(0).is_err());
        assert!(PsuCount::try_from(3).is_err());
        assert!(PsuCount::try_from(8).is_err());
        assert!("four".parse::<PsuCount>().is_err());
        assert!("".parse::<PsuCount>().is_err());
    }

    #[test]
    fn test_parse_psu_count() {
        let psu: PsuCount = " 6 ".parse().unwrap();
        assert_eq!(psu, PsuCount::Six);
        assert_eq!(psu.to_string(), "6");
    }

    #[test]
    fn test_ports_per_server() {
        assert_eq!(PsuCount::Two.ports_per_server(), 1);
        assert_eq!(PsuCount::Four.ports_per_server(), 2);
        assert_eq!(PsuCount::Six.ports_per_server(), 3);
        assert_eq!(PsuCount::Six.outlets_per_server(), 6);
    }

    #[test]
    fn test_side_psu_numbers() {
        assert_eq!(Side::A.psu_number(0), 1);
        assert_eq!(Side::B.psu_number(0), 2);
        assert_eq!(Side::A.psu_number(1), 3);
        assert_eq!(Side::B.psu_number(2), 6);
    }

    #[test]
    fn test_side_outlet() {
        assert_eq!(Side::A.outlet("12"), "AA12");
        assert_eq!(Side::B.outlet("3"), "BA3");
        assert_eq!("b".parse::<Side>().unwrap(), Side::B);
        assert!("C".parse::<Side>().is_err());
    }
}
