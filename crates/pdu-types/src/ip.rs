//! IPv4 address, netmask and network types with safe parsing.

use crate::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

/// An IPv4 address wrapper used for PDU management addressing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ipv4Address(Ipv4Addr);

impl Ipv4Address {
    pub const fn new(a: u8, b: u8, c: u8, d: u8) -> Self {
        Ipv4Address(Ipv4Addr::new(a, b, c, d))
    }

    pub const fn inner(&self) -> Ipv4Addr {
        self.0
    }

    pub const fn octets(&self) -> [u8; 4] {
        self.0.octets()
    }

    pub fn to_bits(&self) -> u32 {
        u32::from(self.0)
    }

    pub fn from_bits(bits: u32) -> Self {
        Ipv4Address(Ipv4Addr::from(bits))
    }
}

impl fmt::Display for Ipv4Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for Ipv4Address {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<Ipv4Addr>()
            .map(Ipv4Address)
            .map_err(|_| ParseError::InvalidIpAddress(s.to_string()))
    }
}

impl From<Ipv4Addr> for Ipv4Address {
    fn from(addr: Ipv4Addr) -> Self {
        Ipv4Address(addr)
    }
}

impl From<Ipv4Address> for Ipv4Addr {
    fn from(addr: Ipv4Address) -> Self {
        addr.0
    }
}

/// A dotted-quad IPv4 subnet mask (e.g. 255.255.255.0).
///
/// Only contiguous masks are accepted: all one-bits must precede all
/// zero-bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Ipv4Netmask {
    prefix_len: u8,
}

impl Ipv4Netmask {
    /// Creates a netmask from a prefix length (0-32).
    pub fn from_prefix_len(prefix_len: u8) -> Result<Self, ParseError> {
        if prefix_len > 32 {
            return Err(ParseError::InvalidNetmask(format!(
                "prefix length {} exceeds maximum 32",
                prefix_len
            )));
        }
        Ok(Ipv4Netmask { prefix_len })
    }

    /// Creates a netmask without range validation; `prefix_len` must be <= 32.
    pub(crate) const fn new_unchecked(prefix_len: u8) -> Self {
        Ipv4Netmask { prefix_len }
    }

    /// Returns the prefix length in bits.
    pub const fn prefix_len(&self) -> u8 {
        self.prefix_len
    }

    /// Returns the mask as a 32-bit value.
    pub fn to_bits(&self) -> u32 {
        match self.prefix_len {
            0 => 0,
            len => u32::MAX << (32 - u32::from(len)),
        }
    }
}

impl fmt::Display for Ipv4Netmask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Ipv4Addr::from(self.to_bits()).fmt(f)
    }
}

impl FromStr for Ipv4Netmask {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bits = u32::from(
            s.trim()
                .parse::<Ipv4Addr>()
                .map_err(|_| ParseError::InvalidNetmask(s.to_string()))?,
        );

        // Contiguous iff the inverted mask is of the form 0..01..1
        let host_bits = !bits;
        if host_bits & host_bits.wrapping_add(1) != 0 {
            return Err(ParseError::InvalidNetmask(format!(
                "{} is not a contiguous mask",
                s
            )));
        }

        Ok(Ipv4Netmask {
            prefix_len: bits.leading_ones() as u8,
        })
    }
}

impl TryFrom<String> for Ipv4Netmask {
    type Error = ParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Ipv4Netmask> for String {
    fn from(mask: Ipv4Netmask) -> String {
        mask.to_string()
    }
}

/// An IPv4 network derived from a host address and its subnet mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ipv4Network {
    network: Ipv4Address,
    mask: Ipv4Netmask,
}

impl Ipv4Network {
    /// Builds the network enclosing `address` (host bits are cleared).
    pub fn new(address: Ipv4Address, mask: Ipv4Netmask) -> Self {
        Ipv4Network {
            network: Ipv4Address::from_bits(address.to_bits() & mask.to_bits()),
            mask,
        }
    }

    /// Returns the network address.
    pub const fn network(&self) -> Ipv4Address {
        self.network
    }

    /// Returns the subnet mask.
    pub const fn mask(&self) -> Ipv4Netmask {
        self.mask
    }

    /// Returns the broadcast address.
    pub fn broadcast(&self) -> Ipv4Address {
        Ipv4Address::from_bits(self.network.to_bits() | !self.mask.to_bits())
    }

    /// Number of usable host addresses (network and broadcast excluded).
    ///
    /// /31 and /32 networks report zero usable hosts.
    pub fn usable_hosts(&self) -> u64 {
        let total = 1u64 << (32 - u32::from(self.mask.prefix_len()));
        total.saturating_sub(2)
    }

    /// Returns the first usable host address, or `None` when the network
    /// has fewer than two usable hosts.
    pub fn first_host(&self) -> Option<Ipv4Address> {
        if self.usable_hosts() < 2 {
            return None;
        }
        Some(Ipv4Address::from_bits(self.network.to_bits() + 1))
    }
}

impl fmt::Display for Ipv4Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.network, self.mask.prefix_len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_ipv4_parse() {
        let addr: Ipv4Address = "192.168.1.1".parse().unwrap();
        assert_eq!(addr.octets(), [192, 168, 1, 1]);
        assert!("192.168.1".parse::<Ipv4Address>().is_err());
        assert!("not-an-ip".parse::<Ipv4Address>().is_err());
    }

    #[test]
    fn test_netmask_parse() {
        let mask: Ipv4Netmask = "255.255.255.0".parse().unwrap();
        assert_eq!(mask.prefix_len(), 24);

        let mask: Ipv4Netmask = "255.255.255.224".parse().unwrap();
        assert_eq!(mask.prefix_len(), 27);

        let mask: Ipv4Netmask = "0.0.0.0".parse().unwrap();
        assert_eq!(mask.prefix_len(), 0);

        let mask: Ipv4Netmask = "255.255.255.255".parse().unwrap();
        assert_eq!(mask.prefix_len(), 32);
    }

    #[test]
    fn test_netmask_non_contiguous() {
        assert!("255.0.255.0".parse::<Ipv4Netmask>().is_err());
        assert!("0.255.255.255".parse::<Ipv4Netmask>().is_err());
    }

    #[test]
    fn test_netmask_display() {
        let mask = Ipv4Netmask::from_prefix_len(16).unwrap();
        assert_eq!(mask.to_string(), "255.255.0.0");
        assert!(Ipv4Netmask::from_prefix_len(33).is_err());
    }

    #[test]
    fn test_network_first_host() {
        let network = Ipv4Network::new(
            "10.0.0.5".parse().unwrap(),
            "255.255.255.0".parse().unwrap(),
        );
        assert_eq!(network.network().to_string(), "10.0.0.0");
        assert_eq!(network.broadcast().to_string(), "10.0.0.255");
        assert_eq!(network.usable_hosts(), 254);
        assert_eq!(network.first_host().unwrap().to_string(), "10.0.0.1");
    }

    #[test]
    fn test_network_fabric_v3_subnet() {
        let network = Ipv4Network::new(
            "10.20.30.77".parse().unwrap(),
            "255.255.255.224".parse().unwrap(),
        );
        assert_eq!(network.to_string(), "10.20.30.64/27");
        assert_eq!(network.first_host().unwrap().to_string(), "10.20.30.65");
    }

    #[test]
    fn test_network_too_small() {
        let slash31 = Ipv4Network::new(
            "10.0.0.4".parse().unwrap(),
            "255.255.255.254".parse().unwrap(),
        );
        assert_eq!(slash31.first_host(), None);

        let slash32 = Ipv4Network::new(
            "10.0.0.4".parse().unwrap(),
            "255.255.255.255".parse().unwrap(),
        );
        assert_eq!(slash32.first_host(), None);

        let slash30 = Ipv4Network::new(
            "10.0.0.6".parse().unwrap(),
            "255.255.255.252".parse().unwrap(),
        );
        assert_eq!(slash30.first_host().unwrap().to_string(), "10.0.0.5");
    }
}
