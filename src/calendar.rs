//! The fixed weekly calendar: five days of eight same-length slots each,
//! labeled `Mon1`..`Fri8`. Slots are handled as indices into this sequence
//! everywhere except the I/O boundary.

use itertools::Itertools;
use std::ops::Range;

/// Index into the fixed slot sequence, `0` = `Mon1`, `39` = `Fri8`.
pub type SlotId = usize;

pub const DAYS: [&str; 5] = ["Mon", "Tue", "Wed", "Thu", "Fri"];
pub const SLOTS_PER_DAY: usize = 8;
pub const TOTAL_SLOTS: usize = DAYS.len() * SLOTS_PER_DAY;

/// Day index (0 = Monday) of a slot.
pub fn day_of(slot: SlotId) -> usize {
    slot / SLOTS_PER_DAY
}

/// Human-readable label of a slot, e.g. `Tue3`.
pub fn label(slot: SlotId) -> String {
    format!("{}{}", DAYS[day_of(slot)], slot % SLOTS_PER_DAY + 1)
}

/// Parses a slot label back to its index. Returns `None` for anything that
/// is not `<Day><1..8>`.
pub fn parse_label(text: &str) -> Option<SlotId> {
    let day = DAYS.iter().position(|d| text.starts_with(d))?;
    let number: usize = text[DAYS[day].len()..].parse().ok()?;
    if (1..=SLOTS_PER_DAY).contains(&number) {
        Some(day * SLOTS_PER_DAY + number - 1)
    } else {
        None
    }
}

/// Builds the block of consecutive slots a course of the given duration
/// would occupy from `start`. Returns `None` when the block runs off the
/// calendar or when two adjacent slots in it fall on different days —
/// adjacency across a day boundary is not continuity.
pub fn slot_block(start: SlotId, duration: usize) -> Option<Range<SlotId>> {
    if duration == 0 || start + duration > TOTAL_SLOTS {
        return None;
    }
    let block = start..start + duration;
    if block.clone().tuple_windows().all(|(a, b)| day_of(a) == day_of(b)) {
        Some(block)
    } else {
        None
    }
}
