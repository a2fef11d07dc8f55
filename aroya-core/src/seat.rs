/// Canonicalize a raw seat identifier: trimmed, uppercased.
/// Returns None when nothing is left after trimming.
pub fn normalize_seat_id(raw: &str) -> Option<String> {
    let text = raw.trim();
    if text.is_empty() {
        return None;
    }
    Some(text.to_uppercase())
}

/// Canonicalize a list of seat identifiers: trim, uppercase, drop empties,
/// deduplicate while preserving first-seen order.
pub fn normalize_seat_ids<I, S>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = std::collections::HashSet::new();
    let mut normalized = Vec::new();
    for value in values {
        let Some(seat_id) = normalize_seat_id(value.as_ref()) else {
            continue;
        };
        if seen.insert(seat_id.clone()) {
            normalized.push(seat_id);
        }
    }
    normalized
}
