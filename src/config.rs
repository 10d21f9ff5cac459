use std::{path::Path, str::FromStr};

use crate::error::{Error, Result};

/// Mask length used for both address families when none is given
pub const DEFAULT_MASK_LENGTH: u32 = 24;

/// Number of leading bits to keep for each address family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct MaskLengths {
    /// Bits kept from IPv4 addresses, and from the IPv4 part of mapped addresses
    #[serde(rename = "v4_mask_length")]
    pub v4: u32,
    /// Bits kept from IPv6 addresses
    #[serde(rename = "v6_mask_length")]
    pub v6: u32,
}

impl MaskLengths {
    #[must_use]
    pub const fn new(v4: u32, v6: u32) -> Self {
        Self { v4, v6 }
    }
}

impl Default for MaskLengths {
    fn default() -> Self {
        Self::new(DEFAULT_MASK_LENGTH, DEFAULT_MASK_LENGTH)
    }
}

/// Decides which mask length governs an IPv4-embedded IPv6 address
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Deserialize, serde::Serialize,
)]
#[serde(rename_all = "snake_case")]
pub enum EmbeddedMaskPolicy {
    /// IPv4-mapped addresses (`::ffff:a.b.c.d`) are masked with the IPv4 length applied to
    /// their low 32 bits. Every other embedded form uses the IPv6 length.
    #[default]
    MappedAware,
    /// Like `MappedAware`, but the deprecated IPv4-compatible form (`::a.b.c.d`) is
    /// treated as mapped too
    MappedOrCompatible,
    /// Every embedded form uses the IPv6 length
    AlwaysV6,
}

/// Anonymizer configuration. Usually read from a JSON file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct Config {
    /// Mask lengths, stored as top-level `v4_mask_length` and `v6_mask_length` keys
    #[serde(flatten)]
    pub mask_lengths: MaskLengths,

    /// Policy for IPv4-embedded IPv6 addresses
    pub embedded_policy: EmbeddedMaskPolicy,
}

impl Config {
    /// Load the config from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|error| {
            log::error!("Failed to open config file {}: {}", path.display(), error);
            error
        })?;
        let config: Self = serde_json::from_reader(std::io::BufReader::new(file))?;
        log::debug!("Loaded config from {}: {:?}", path.display(), config);
        Ok(config)
    }
}

impl FromStr for Config {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let config = Config::default();
        assert_eq!(config.mask_lengths, MaskLengths::new(24, 24));
        assert_eq!(config.embedded_policy, EmbeddedMaskPolicy::MappedAware);
    }

    #[test]
    fn test_parse_full() {
        let config: Config = r#"{"v4_mask_length": 16, "v6_mask_length": 48, "embedded_policy": "always_v6"}"#
            .parse()
            .unwrap();
        assert_eq!(config.mask_lengths, MaskLengths::new(16, 48));
        assert_eq!(config.embedded_policy, EmbeddedMaskPolicy::AlwaysV6);
    }

    #[test]
    fn test_parse_partial() {
        let config: Config = r#"{"v6_mask_length": 56}"#.parse().unwrap();
        assert_eq!(config.mask_lengths, MaskLengths::new(24, 56));
        assert_eq!(config.embedded_policy, EmbeddedMaskPolicy::MappedAware);

        let config: Config = "{}".parse().unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_parse_policy_names() {
        let config: Config = r#"{"embedded_policy": "mapped_or_compatible"}"#.parse().unwrap();
        assert_eq!(config.embedded_policy, EmbeddedMaskPolicy::MappedOrCompatible);
    }

    #[test]
    fn test_parse_rejects_bad_values() {
        assert!(matches!(
            r#"{"v4_mask_length": -1}"#.parse::<Config>(),
            Err(Error::Json(_))
        ));
        assert!(r#"{"embedded_policy": "sometimes"}"#.parse::<Config>().is_err());
        assert!("not json".parse::<Config>().is_err());
    }

    #[test]
    fn test_serialize() {
        let config = Config {
            mask_lengths: MaskLengths::new(8, 32),
            embedded_policy: EmbeddedMaskPolicy::MappedOrCompatible,
        };
        let json = serde_json::to_value(config).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "v4_mask_length": 8,
                "v6_mask_length": 32,
                "embedded_policy": "mapped_or_compatible"
            })
        );
    }

    #[test]
    fn test_load_missing_file() {
        assert!(matches!(
            Config::load("/nonexistent/ipanon.json"),
            Err(Error::Io(_))
        ));
    }
}
