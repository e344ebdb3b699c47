use crate::models::SlotTimingMap;

/// Canonical slot name: the identifier with every ASCII digit removed ("A1" → "A").
pub fn normalize_slot(slot: &str) -> String {
    slot.chars().filter(|c| !c.is_ascii_digit()).collect()
}

/// Re-key a slot timing map by canonical slot name.
/// Colliding keys take the value of the last one in document order and the
/// position of the first.
pub fn normalize_slot_keys(map: SlotTimingMap) -> SlotTimingMap {
    map.into_iter()
        .map(|(k, v)| (normalize_slot(&k), v))
        .collect()
}
