use std::ops::Range;

use crate::MIN_ZERO_RUN;

/// Finds the run of zero groups that should be replaced by `::`, following
/// [RFC5952 Section 4.2.3](https://datatracker.ietf.org/doc/html/rfc5952#section-4.2.3)
///
/// Returns the index range of the longest run of consecutive zero groups. Ties go to the
/// run that starts first. Runs shorter than [`MIN_ZERO_RUN`] are never returned.
#[must_use]
pub fn longest_zero_run(groups: &[u16]) -> Option<Range<usize>> {
    let mut best: Option<Range<usize>> = None;
    let mut current: Option<usize> = None;

    // Iterate one past the end so a run touching the last group is closed out like any other
    for (index, group) in groups
        .iter()
        .copied()
        .map(Some)
        .chain(std::iter::once(None))
        .enumerate()
    {
        match (group, current) {
            // Start of a new run
            (Some(0), None) => current = Some(index),
            // Still inside a run
            (Some(0), Some(_)) => {}
            // End of a run (a non-zero group, or the end of the list)
            (_, Some(start)) => {
                let run = start..index;
                if best.as_ref().map_or(true, |longest| run.len() > longest.len()) {
                    best = Some(run);
                }
                current = None;
            }
            (_, None) => {}
        }
    }

    best.filter(|run| run.len() >= MIN_ZERO_RUN)
}
