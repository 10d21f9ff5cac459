use crate::longest_zero_run;

/// Joins groups as lowercase, zero-stripped hex separated by colons
fn join_hex(groups: &[u16]) -> String {
    groups
        .iter()
        .map(|group| format!("{group:x}"))
        .collect::<Vec<_>>()
        .join(":")
}

/// Renders IPv6 groups in the canonical text form defined by
/// [RFC5952 Section 4](https://datatracker.ietf.org/doc/html/rfc5952#section-4)
///
/// Any number of groups is accepted. Eight groups render a full address, while six render
/// the prefix of an IPv4-embedded address (the caller appends the dotted-quad suffix).
#[must_use]
pub fn compress_groups(groups: &[u16]) -> String {
    match longest_zero_run(groups) {
        Some(run) => format!(
            "{}::{}",
            join_hex(&groups[..run.start]),
            join_hex(&groups[run.end..])
        ),
        None => join_hex(groups),
    }
}
