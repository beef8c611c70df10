//! Datacenter fabric version.

use crate::{Ipv4Netmask, ParseError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Network fabric generation the PDU management port is attached to.
///
/// The fabric determines the management subnet and whether the PDU is
/// pointed at the datacenter DNS resolvers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FabricVersion {
    V2,
    V3,
}

impl FabricVersion {
    /// Management subnet mask for this fabric.
    pub fn subnet(&self) -> Ipv4Netmask {
        match self {
            FabricVersion::V2 => Ipv4Netmask::new_unchecked(16),
            FabricVersion::V3 => Ipv4Netmask::new_unchecked(27),
        }
    }

    /// Returns true if DNS resolvers are configured on this fabric.
    pub const fn uses_dns(&self) -> bool {
        matches!(self, FabricVersion::V2)
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            FabricVersion::V2 => "v2",
            FabricVersion::V3 => "v3",
        }
    }
}

impl fmt::Display for FabricVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FabricVersion {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "v2" => Ok(FabricVersion::V2),
            "v3" => Ok(FabricVersion::V3),
            _ => Err(ParseError::InvalidFabricVersion(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_fabric_version() {
        assert_eq!("v2".parse::<FabricVersion>().unwrap(), FabricVersion::V2);
        assert_eq!(" V3 ".parse::<FabricVersion>().unwrap(), FabricVersion::V3);
        assert!("v4".parse::<FabricVersion>().is_err());
        assert!("3".parse::<FabricVersion>().is_err());
    }

    #[test]
    fn test_fabric_subnet() {
        assert_eq!(FabricVersion::V2.subnet().to_string(), "255.255.0.0");
        assert_eq!(FabricVersion::V3.subnet().to_string(), "255.255.255.224");
    }

    #[test]
    fn test_fabric_dns() {
        assert!(FabricVersion::V2.uses_dns());
        assert!(!FabricVersion::V3.uses_dns());
    }
}
