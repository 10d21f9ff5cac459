//! Conversion between validated address literals and fixed-width bit strings

use std::net::{Ipv4Addr, Ipv6Addr};

use ipnet::{Ipv4Net, Ipv6Net};

use crate::{
    error::{Error, Result},
    grammar::{parse_embedded, parse_ipv4, parse_ipv6_groups, EMBEDDED_PREFIX_GROUPS, IPV6_GROUPS},
    AddressKind,
};

/// The binary form of an address, most significant bit first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BitString {
    /// 32 bits, for plain IPv4
    Ipv4(u32),
    /// 128 bits, for IPv6 and IPv4-embedded IPv6
    Ipv6(u128),
}

impl BitString {
    /// Number of bits in this string
    #[must_use]
    pub const fn width(self) -> u32 {
        match self {
            Self::Ipv4(_) => u32::BITS,
            Self::Ipv6(_) => u128::BITS,
        }
    }

    /// Keep the first `prefix_len` bits and zero the rest
    ///
    /// Lengths beyond the width of the string keep every bit.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn retain_prefix(self, prefix_len: u32) -> Self {
        // Never more than 128, so this always fits
        let prefix_len = prefix_len.min(self.width()) as u8;

        // Clamped above, so the network always builds
        match self {
            Self::Ipv4(bits) => Self::Ipv4(
                Ipv4Net::new(Ipv4Addr::from(bits), prefix_len)
                    .map_or(0, |net| net.network().into()),
            ),
            Self::Ipv6(bits) => Self::Ipv6(
                Ipv6Net::new(Ipv6Addr::from(bits), prefix_len)
                    .map_or(0, |net| net.network().into()),
            ),
        }
    }
}

/// Packs 16-bit groups into an integer, first group most significant
fn pack_groups(groups: &[u16]) -> u128 {
    groups
        .iter()
        .fold(0, |bits, group| (bits << 16) | u128::from(*group))
}

/// Encode a literal of the given kind into its bit string
///
/// IPv4-embedded literals produce the 96-bit prefix followed by the 32-bit IPv4 address.
#[profiling::function]
pub fn encode(literal: &str, kind: AddressKind) -> Result<BitString> {
    match kind {
        AddressKind::Ipv4 => {
            parse_ipv4(literal).map(|octets| BitString::Ipv4(u32::from_be_bytes(octets)))
        }
        AddressKind::Ipv6 => parse_ipv6_groups::<IPV6_GROUPS>(literal)
            .map(|groups| BitString::Ipv6(pack_groups(&groups))),
        AddressKind::Ipv4InIpv6(_) => parse_embedded(literal).map(|(prefix, octets)| {
            BitString::Ipv6((pack_groups(&prefix) << 32) | u128::from(u32::from_be_bytes(octets)))
        }),
        AddressKind::Invalid => None,
    }
    .ok_or_else(|| Error::invalid_address(literal))
}

/// Renders an IPv4-embedded address: canonical 6-group prefix, then the dotted quad
#[allow(clippy::cast_possible_truncation)]
fn render_embedded(bits: u128) -> String {
    let segments = Ipv6Addr::from(bits).segments();
    let prefix = rfc5952::compress_groups(&segments[..EMBEDDED_PREFIX_GROUPS]);
    let suffix = Ipv4Addr::from(bits as u32);

    // A prefix ending in `::` already carries its separator
    if prefix.ends_with(':') {
        format!("{prefix}{suffix}")
    } else {
        format!("{prefix}:{suffix}")
    }
}

/// Decode a bit string back into the canonical literal for the given kind
#[profiling::function]
pub fn decode(bits: BitString, kind: AddressKind) -> Result<String> {
    match (bits, kind) {
        (BitString::Ipv4(bits), AddressKind::Ipv4) => Ok(Ipv4Addr::from(bits).to_string()),
        (BitString::Ipv6(bits), AddressKind::Ipv6) => {
            Ok(rfc5952::compress_groups(&Ipv6Addr::from(bits).segments()))
        }
        (BitString::Ipv6(bits), AddressKind::Ipv4InIpv6(_)) => Ok(render_embedded(bits)),
        (bits, kind) => Err(Error::KindMismatch {
            kind,
            width: bits.width(),
        }),
    }
}
