use aroya_core::reservation::Reservation;
use aroya_core::seat::normalize_seat_ids;
use chrono::Utc;
use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;
use std::sync::{RwLock, RwLockWriteGuard};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Reservation not found: {0}")]
    NotFound(String),
}

/// Confirmed reservations, kept in memory and mirrored to a JSON document
/// on disk so a restarted (or sibling) process picks up the same records.
/// Every read refreshes from disk first, matching the original
/// cross-process discipline
pub struct ReservationStore {
    path: Option<PathBuf>,
    cache: RwLock<HashMap<String, Reservation>>,
}

impl ReservationStore {
    /// A store without persistence, used by tests and ephemeral setups
    pub fn in_memory() -> Self {
        Self {
            path: None,
            cache: RwLock::new(HashMap::new()),
        }
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        let store = Self {
            path: Some(path.into()),
            cache: RwLock::new(HashMap::new()),
        };
        store.refresh();
        store
    }

    fn write_lock(&self) -> RwLockWriteGuard<'_, HashMap<String, Reservation>> {
        self.cache.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Reload reservations persisted on disk so cross-process access stays
    /// in sync. Invalid records are skipped, not fatal
    pub fn refresh(&self) {
        let Some(path) = &self.path else {
            return;
        };
        if !path.exists() {
            return;
        }
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!("Unable to load reservation store: {}", e);
                return;
            }
        };
        let parsed: serde_json::Value = match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("Unable to load reservation store: {}", e);
                return;
            }
        };
        let Some(entries) = parsed.as_object() else {
            tracing::warn!("Reservation store was not a JSON object; ignoring refresh.");
            return;
        };

        let mut cache = self.write_lock();
        cache.clear();
        for (reservation_id, payload) in entries {
            match serde_json::from_value::<Reservation>(payload.clone()) {
                Ok(reservation) => {
                    cache.insert(reservation_id.clone(), reservation);
                }
                Err(e) => {
                    tracing::warn!("Skipping invalid reservation entry {}: {}", reservation_id, e);
                }
            }
        }
    }

    fn persist(&self, cache: &HashMap<String, Reservation>) {
        let Some(path) = &self.path else {
            return;
        };
        // Sorted keys keep the document diffable between writes
        let ordered: BTreeMap<&String, &Reservation> = cache.iter().collect();
        let serialized = match serde_json::to_string_pretty(&ordered) {
            Ok(serialized) => serialized,
            Err(e) => {
                tracing::error!("Failed to serialize reservation store: {}", e);
                return;
            }
        };
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                if let Err(e) = std::fs::create_dir_all(parent) {
                    tracing::error!("Failed to prepare reservation store directory: {}", e);
                    return;
                }
            }
        }
        if let Err(e) = std::fs::write(path, serialized) {
            tracing::error!("Failed to persist reservation store: {}", e);
        }
    }

    pub fn get(&self, reservation_id: &str) -> Option<Reservation> {
        self.refresh();
        self.write_lock().get(reservation_id).cloned()
    }

    pub fn insert(&self, reservation: Reservation) {
        let mut cache = self.write_lock();
        cache.insert(reservation.reservation_id.clone(), reservation);
        self.persist(&cache);
    }

    /// Persist a seat selection: normalize, trim to the passenger limit,
    /// stamp the update time, and write through
    pub fn update_seats(
        &self,
        reservation_id: &str,
        seats: &[String],
    ) -> Result<Reservation, StoreError> {
        self.refresh();
        let mut cache = self.write_lock();
        let Some(reservation) = cache.get_mut(reservation_id) else {
            return Err(StoreError::NotFound(reservation_id.to_string()));
        };

        let mut normalized = normalize_seat_ids(seats.iter());
        let max_allowed = reservation.selection_limit();
        if normalized.len() > max_allowed {
            let trimmed: Vec<String> = normalized[..max_allowed].to_vec();
            tracing::info!(
                "Trimming seat selection for {} to passenger count ({:?} -> {:?}).",
                reservation_id,
                normalized,
                trimmed
            );
            normalized = trimmed;
        }

        reservation.seat_assignments = normalized;
        reservation.seat_assignments_updated_at = Some(Utc::now());
        let updated = reservation.clone();
        self.persist(&cache);
        Ok(updated)
    }
}
