#![doc = include_str!("../README.md")]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

mod anonymize;
mod codec;
mod config;
mod error;
mod grammar;

pub use anonymize::{anonymize_ip, anonymize_ip_default, anonymize_value, Anonymizer};
pub use codec::{decode, encode, BitString};
pub use config::{Config, EmbeddedMaskPolicy, MaskLengths, DEFAULT_MASK_LENGTH};
pub use error::{Error, Result};
pub use grammar::{classify, AddressKind, Embedding};
