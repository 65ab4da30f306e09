// ABOUTME: CIDR subnet notation for overlay networks.
// ABOUTME: Parses <address>/<prefix> for IPv4 and IPv6 and checks prefix bounds.

use std::fmt;
use std::net::IpAddr;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SubnetError {
    #[error("invalid CIDR address: {0:?}")]
    MissingPrefix(String),

    #[error("invalid CIDR address: {0:?}")]
    InvalidAddress(String),

    #[error("invalid CIDR address: prefix length {prefix:?} out of range for {input:?}")]
    InvalidPrefix { input: String, prefix: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subnet {
    address: IpAddr,
    prefix_len: u8,
}

impl Subnet {
    pub fn parse(input: &str) -> Result<Self, SubnetError> {
        let (address, prefix) = input
            .split_once('/')
            .ok_or_else(|| SubnetError::MissingPrefix(input.to_string()))?;

        let address: IpAddr = address
            .parse()
            .map_err(|_| SubnetError::InvalidAddress(input.to_string()))?;

        let invalid_prefix = || SubnetError::InvalidPrefix {
            input: input.to_string(),
            prefix: prefix.to_string(),
        };

        if prefix.is_empty()
            || !prefix.bytes().all(|b| b.is_ascii_digit())
            || (prefix.len() > 1 && prefix.starts_with('0'))
        {
            return Err(invalid_prefix());
        }

        let prefix_len: u8 = prefix.parse().map_err(|_| invalid_prefix())?;
        let max = match address {
            IpAddr::V4(_) => 32,
            IpAddr::V6(_) => 128,
        };
        if prefix_len > max {
            return Err(invalid_prefix());
        }

        Ok(Self {
            address,
            prefix_len,
        })
    }

    pub fn address(&self) -> IpAddr {
        self.address
    }

    pub fn prefix_len(&self) -> u8 {
        self.prefix_len
    }
}

impl FromStr for Subnet {
    type Err = SubnetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Subnet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.address, self.prefix_len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_ipv4_subnet() {
        let subnet = Subnet::parse("10.0.9.0/24").unwrap();
        assert_eq!(subnet.prefix_len(), 24);
        assert_eq!(subnet.to_string(), "10.0.9.0/24");
    }

    #[test]
    fn parses_ipv6_subnet() {
        let subnet = Subnet::parse("fd00:dead:beef::/48").unwrap();
        assert!(subnet.address().is_ipv6());
        assert_eq!(subnet.prefix_len(), 48);
    }

    #[test]
    fn host_bits_are_accepted() {
        assert!(Subnet::parse("192.168.1.17/16").is_ok());
    }

    #[test]
    fn rejects_missing_prefix() {
        assert!(matches!(
            Subnet::parse("10.0.0.0"),
            Err(SubnetError::MissingPrefix(_))
        ));
    }

    #[test]
    fn rejects_out_of_range_prefix() {
        assert!(Subnet::parse("10.0.0.0/33").is_err());
        assert!(Subnet::parse("fd00::/129").is_err());
    }

    #[test]
    fn rejects_signed_or_padded_prefix() {
        assert!(Subnet::parse("10.0.0.0/+8").is_err());
        assert!(Subnet::parse("10.0.0.0/08").is_err());
        assert!(Subnet::parse("10.0.0.0/").is_err());
    }

    #[test]
    fn rejects_bad_address() {
        assert!(matches!(
            Subnet::parse("10.0.0.256/8"),
            Err(SubnetError::InvalidAddress(_))
        ));
        assert!(Subnet::parse("eth0/24").is_err());
    }
}
