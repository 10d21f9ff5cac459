//! Strict textual grammar for IPv4, IPv6, and IPv4-embedded IPv6 literals
//!
//! All functions here expect input that has already been trimmed and lowercased.

use std::borrow::Cow;

/// Number of 16-bit groups in a full IPv6 address
pub const IPV6_GROUPS: usize = 8;

/// Number of 16-bit groups that precede the dotted-quad suffix of an IPv4-embedded IPv6 address
pub const EMBEDDED_PREFIX_GROUPS: usize = 6;

/// The 96-bit prefix of an [RFC4291 Section 2.5.5.2](https://datatracker.ietf.org/doc/html/rfc4291#section-2.5.5.2)
/// IPv4-mapped IPv6 address, as groups
const MAPPED_PREFIX: [u16; EMBEDDED_PREFIX_GROUPS] = [0, 0, 0, 0, 0, 0xffff];

/// Describes how an IPv4 address is embedded in an IPv6 literal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Embedding {
    /// `::ffff:a.b.c.d`. 80 zero bits followed by 16 one bits
    Mapped,
    /// Any other 96-bit prefix. This includes the deprecated IPv4-compatible `::a.b.c.d` form
    Other,
}

impl Embedding {
    /// Determine the embedding type from a fully expanded 6-group prefix
    #[must_use]
    pub fn of_prefix(prefix: &[u16; EMBEDDED_PREFIX_GROUPS]) -> Self {
        if *prefix == MAPPED_PREFIX {
            Self::Mapped
        } else {
            Self::Other
        }
    }
}

/// The kind of address a literal represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressKind {
    /// Dotted-quad IPv4
    Ipv4,
    /// Plain IPv6, optionally `::` compressed
    Ipv6,
    /// A 6-group IPv6 prefix followed by a dotted-quad IPv4 suffix
    Ipv4InIpv6(Embedding),
    /// Not a recognized address literal
    Invalid,
}

/// Parses a dotted-quad IPv4 literal into its octets
///
/// Exactly four fields of one to three decimal digits are required. Leading zeros are
/// allowed and read as decimal.
#[must_use]
pub fn parse_ipv4(literal: &str) -> Option<[u8; 4]> {
    let mut octets = [0u8; 4];
    let mut fields = literal.split('.');
    for octet in &mut octets {
        let field = fields.next()?;
        if field.is_empty() || field.len() > 3 || !field.bytes().all(|byte| byte.is_ascii_digit()) {
            return None;
        }

        // Anything above 255 fails to fit
        *octet = field.parse().ok()?;
    }

    // There must not be a fifth field
    fields.next().is_none().then_some(octets)
}

/// Parses a single group of one to four hex digits
///
/// The first group of a literal may be left empty (`:1::2`), in which case it reads as zero.
fn parse_group(field: &str, leading: bool) -> Option<u16> {
    if field.is_empty() {
        return leading.then_some(0);
    }
    if field.len() > 4 {
        return None;
    }
    u16::from_str_radix(field, 16).ok()
}

/// Parses every colon-separated group on one side of a `::`
fn parse_side(side: &str, leading: bool) -> Option<Vec<u16>> {
    if side.is_empty() {
        return Some(Vec::new());
    }
    side.split(':')
        .enumerate()
        .map(|(index, field)| parse_group(field, leading && index == 0))
        .collect()
}

/// Parses an IPv6 literal (or the IPv6 prefix of an embedded literal) into exactly `N` groups
///
/// Without `::`, exactly `N` groups must be present. With a single `::`, at most `N - 1`
/// explicit groups may surround it and the gap is filled with zero groups. Apart from the
/// `::` itself, only the very first group may be empty. A trailing lone colon is rejected.
#[must_use]
pub fn parse_ipv6_groups<const N: usize>(literal: &str) -> Option<[u16; N]> {
    if !literal
        .bytes()
        .all(|byte| matches!(byte, b'0'..=b'9' | b'a'..=b'f' | b':'))
    {
        return None;
    }

    let mut groups = [0u16; N];
    match literal.split_once("::") {
        None => {
            let mut fields = literal.split(':');
            for (index, group) in groups.iter_mut().enumerate() {
                *group = parse_group(fields.next()?, index == 0)?;
            }
            fields.next().is_none().then_some(groups)
        }
        Some((head, tail)) => {
            // A second `::` in the tail shows up as an empty group and is rejected here
            let head = parse_side(head, true)?;
            let tail = parse_side(tail, false)?;

            // `::` must stand for at least one group
            if head.len() + tail.len() >= N {
                return None;
            }
            groups[..head.len()].copy_from_slice(&head);
            groups[N - tail.len()..].copy_from_slice(&tail);
            Some(groups)
        }
    }
}

/// Splits an embedded literal at its last colon into the IPv6 prefix and the IPv4 suffix
///
/// When the split lands inside a `::`, the colon is re-attached to the prefix so that it
/// still reads as `::`.
fn split_embedded(literal: &str) -> Option<(Cow<'_, str>, &str)> {
    let (prefix, suffix) = literal.rsplit_once(':')?;
    let prefix = if prefix.ends_with(':') {
        Cow::Owned(format!("{prefix}:"))
    } else {
        Cow::Borrowed(prefix)
    };
    Some((prefix, suffix))
}

/// Parses an IPv4-embedded IPv6 literal such as `::ffff:192.0.2.1` into its prefix groups and IPv4 octets
#[must_use]
pub fn parse_embedded(literal: &str) -> Option<([u16; EMBEDDED_PREFIX_GROUPS], [u8; 4])> {
    let (prefix, suffix) = split_embedded(literal)?;
    Some((parse_ipv6_groups(&prefix)?, parse_ipv4(suffix)?))
}

/// Determine what kind of address a literal represents
///
/// IPv4 is checked first, then IPv6, then IPv4-embedded IPv6.
#[must_use]
#[profiling::function]
pub fn classify(literal: &str) -> AddressKind {
    let kind = if parse_ipv4(literal).is_some() {
        AddressKind::Ipv4
    } else if parse_ipv6_groups::<IPV6_GROUPS>(literal).is_some() {
        AddressKind::Ipv6
    } else if let Some((prefix, _)) = parse_embedded(literal) {
        AddressKind::Ipv4InIpv6(Embedding::of_prefix(&prefix))
    } else {
        AddressKind::Invalid
    };

    log::trace!("Classified {}-byte literal as {:?}", literal.len(), kind);
    kind
}
