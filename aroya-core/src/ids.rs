use uuid::Uuid;

/// Generate a reservation identifier: "AR-" plus 8 uppercase hex characters.
/// Collision odds are acceptable for a single-airline store of this size.
pub fn gen_reservation_id() -> String {
    let raw = Uuid::new_v4().simple().to_string();
    format!("AR-{}", raw[..8].to_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reservation_id_shape() {
        let id = gen_reservation_id();
        assert!(id.starts_with("AR-"));
        assert_eq!(id.len(), 11);
        assert!(id[3..].chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_lowercase()));
    }

    #[test]
    fn test_reservation_ids_differ() {
        assert_ne!(gen_reservation_id(), gen_reservation_id());
    }
}
