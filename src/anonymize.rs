//! Prefix-preserving address anonymization

use crate::{
    codec::{decode, encode, BitString},
    config::{Config, EmbeddedMaskPolicy, MaskLengths},
    error::{Error, Result},
    grammar::{classify, AddressKind, Embedding},
};

/// Number of prefix bits in front of the IPv4 part of an IPv4-embedded IPv6 address
const EMBEDDED_V4_OFFSET: u32 = 96;

/// Masks address literals down to a configured number of leading bits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Anonymizer {
    lengths: MaskLengths,
    policy: EmbeddedMaskPolicy,
}

impl Anonymizer {
    /// Construct a new `Anonymizer` using the default embedded-address policy
    #[must_use]
    pub const fn new(lengths: MaskLengths) -> Self {
        Self {
            lengths,
            policy: EmbeddedMaskPolicy::MappedAware,
        }
    }

    /// Replace the embedded-address policy
    #[must_use]
    pub const fn with_policy(mut self, policy: EmbeddedMaskPolicy) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub const fn lengths(&self) -> MaskLengths {
        self.lengths
    }

    #[must_use]
    pub const fn policy(&self) -> EmbeddedMaskPolicy {
        self.policy
    }

    /// Whether the IPv4 mask (offset past the 96-bit prefix) governs an embedded address
    fn masks_as_ipv4(&self, embedding: Embedding, bits: BitString) -> bool {
        match self.policy {
            EmbeddedMaskPolicy::MappedAware => embedding == Embedding::Mapped,
            // The compatible form has an all-zero 96-bit prefix
            EmbeddedMaskPolicy::MappedOrCompatible => {
                embedding == Embedding::Mapped
                    || matches!(bits, BitString::Ipv6(bits) if bits >> u32::BITS == 0)
            }
            EmbeddedMaskPolicy::AlwaysV6 => false,
        }
    }

    /// Anonymize a single address literal
    ///
    /// The input is trimmed and lowercased, then every bit past the configured prefix
    /// length is zeroed and the address is rendered in canonical form.
    #[profiling::function]
    pub fn anonymize(&self, input: &str) -> Result<String> {
        let literal = input.trim().to_ascii_lowercase();
        let kind = classify(&literal);
        let bits = encode(&literal, kind)?;

        // Pick the number of bits to keep
        let prefix_len = match kind {
            AddressKind::Ipv4 => self.lengths.v4,
            AddressKind::Ipv6 => self.lengths.v6,
            AddressKind::Ipv4InIpv6(embedding) if self.masks_as_ipv4(embedding, bits) => {
                self.lengths.v4.saturating_add(EMBEDDED_V4_OFFSET)
            }
            AddressKind::Ipv4InIpv6(_) => self.lengths.v6,
            AddressKind::Invalid => return Err(Error::invalid_address(&literal)),
        };
        log::debug!(
            "Keeping {} of {} bits of {:?} address",
            prefix_len.min(bits.width()),
            bits.width(),
            kind
        );

        decode(bits.retain_prefix(prefix_len), kind)
    }

    /// Anonymize a dynamically typed value. Anything other than a string is rejected
    #[must_use]
    pub fn anonymize_value(&self, value: &serde_json::Value) -> Option<String> {
        value.as_str().and_then(|ip| self.anonymize(ip).ok())
    }
}

impl From<Config> for Anonymizer {
    fn from(config: Config) -> Self {
        Self::new(config.mask_lengths).with_policy(config.embedded_policy)
    }
}

/// Anonymize an IP address literal, keeping `v4_mask_length` leading bits of IPv4 addresses
/// and `v6_mask_length` leading bits of IPv6 addresses
///
/// Returns `None` if `ip` is not a valid IPv4, IPv6, or IPv4-embedded IPv6 literal.
#[must_use]
pub fn anonymize_ip(ip: &str, v4_mask_length: u32, v6_mask_length: u32) -> Option<String> {
    Anonymizer::new(MaskLengths::new(v4_mask_length, v6_mask_length))
        .anonymize(ip)
        .ok()
}

/// Anonymize an IP address literal using the default 24-bit mask lengths
#[must_use]
pub fn anonymize_ip_default(ip: &str) -> Option<String> {
    Anonymizer::default().anonymize(ip).ok()
}

/// Anonymize a dynamically typed value such as a field of a JSON log record
///
/// Returns `None` for anything that is not a string holding a valid address literal.
#[must_use]
pub fn anonymize_value(
    value: &serde_json::Value,
    v4_mask_length: u32,
    v6_mask_length: u32,
) -> Option<String> {
    Anonymizer::new(MaskLengths::new(v4_mask_length, v6_mask_length)).anonymize_value(value)
}
