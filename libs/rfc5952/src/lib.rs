#![doc = include_str!("../README.md")]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

mod compress;
mod zero_run;
pub use compress::compress_groups;
pub use zero_run::longest_zero_run;

/// The shortest run of zero groups that may be replaced by `::`
///
/// [RFC5952 Section 4.2.2](https://datatracker.ietf.org/doc/html/rfc5952#section-4.2.2)
/// forbids shortening a single zero group, so only runs of two or more are eligible.
pub const MIN_ZERO_RUN: usize = 2;
