//! Sequential match numbering.

use crate::models::GameMatch;

/// Assign sequential match numbers to `matches` in their current order,
/// starting at `start`. Returns the next free number. Numbering is a separate
/// final step so that generated schedules stay renumberable after edits.
pub fn assign_match_numbers(matches: &mut [GameMatch], start: u32) -> u32 {
    let mut next = start;
    for m in matches.iter_mut() {
        m.match_number = next;
        next += 1;
    }
    next
}
