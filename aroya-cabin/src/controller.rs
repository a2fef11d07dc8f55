use crate::gateway::{ReservationDetail, ReservationGateway};
use crate::seatmap::{SeatMap, SeatStatus};
use aroya_core::seat::{normalize_seat_id, normalize_seat_ids};
use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};

const GENERIC_SAVE_ERROR: &str = "We could not save your seat selection. Please try again.";

/// Where the controller stands with respect to the reservation service
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncState {
    Idle,
    Syncing,
    Error(String),
}

/// What a seat-click intent did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleEffect {
    Added,
    Removed,
    LimitRejected,
    Ignored,
}

/// What a confirm intent did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmEffect {
    Saved,
    Failed,
    AlreadySyncing,
    NoReservation,
}

/// What a load intent did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadEffect {
    Loaded,
    Failed,
    Superseded,
}

/// The cloneable read model handed to the presentation layer. Selection is
/// sorted here for display; the controller keeps insertion order internally
#[derive(Debug, Clone)]
pub struct SelectionSnapshot {
    pub reservation_id: Option<String>,
    pub seat_map: Option<SeatMap>,
    pub selected_seats: Vec<String>,
    pub selection_limit: usize,
    pub sync_state: SyncState,
    pub error: Option<String>,
    pub confirm_dialog_open: bool,
    pub last_saved_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Default)]
struct ControllerState {
    reservation_id: Option<String>,
    detail: Option<ReservationDetail>,
    selected: Vec<String>,
    syncing: bool,
    error: Option<String>,
    confirm_dialog_open: bool,
}

impl ControllerState {
    fn selection_limit(&self) -> usize {
        self.detail
            .as_ref()
            .map(|d| d.reservation.selection_limit())
            .unwrap_or(1)
    }

    fn seat_status(&self, seat_id: &str) -> Option<SeatStatus> {
        self.detail
            .as_ref()
            .and_then(|d| d.seat_map.seat_status(seat_id))
    }

    fn apply_detail(&mut self, detail: ReservationDetail) {
        self.reservation_id = Some(detail.reservation.reservation_id.clone());
        self.selected = detail.seat_selection.selected_seats.clone();
        self.detail = Some(detail);
        self.error = None;
    }

    fn clear_display(&mut self) {
        self.detail = None;
        self.selected.clear();
        self.confirm_dialog_open = false;
    }
}

fn limit_message(limit: usize) -> String {
    let noun = if limit == 1 { "seat" } else { "seats" };
    format!("You can select up to {} {}.", limit, noun)
}

/// Owns the seat selection for one reservation view: applies seat-click
/// intents against the selection-limit policy, and keeps the optimistic
/// local selection consistent with the reservation service under failure
pub struct SeatSelectionController<G> {
    gateway: G,
    state: Mutex<ControllerState>,
    load_epoch: AtomicU64,
}

impl<G: ReservationGateway> SeatSelectionController<G> {
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            state: Mutex::new(ControllerState::default()),
            load_epoch: AtomicU64::new(0),
        }
    }

    fn lock(&self) -> MutexGuard<'_, ControllerState> {
        // A panicked holder leaves consistent data; keep serving the view
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Load (or accept a preloaded) reservation and derive the seat map,
    /// selection, and confirmed record from it. A load started after this
    /// one supersedes it: the stale result is computed but never applied
    pub async fn load_reservation(
        &self,
        reservation_id: &str,
        preloaded: Option<ReservationDetail>,
    ) -> LoadEffect {
        let trimmed = reservation_id.trim().to_string();
        if trimmed.is_empty() {
            let mut state = self.lock();
            state.clear_display();
            state.reservation_id = None;
            state.error = Some("A reservation id is required.".to_string());
            return LoadEffect::Failed;
        }

        let epoch = self.load_epoch.fetch_add(1, Ordering::SeqCst) + 1;
        {
            let mut state = self.lock();
            state.reservation_id = Some(trimmed.clone());
        }

        let outcome = match preloaded {
            Some(detail) => Ok(detail),
            None => self.gateway.fetch_reservation(&trimmed).await,
        };

        let mut state = self.lock();
        if self.load_epoch.load(Ordering::SeqCst) != epoch {
            tracing::debug!("Discarding superseded load for {}", trimmed);
            return LoadEffect::Superseded;
        }
        match outcome {
            Ok(detail) => {
                state.apply_detail(detail);
                state.syncing = false;
                LoadEffect::Loaded
            }
            Err(e) => {
                tracing::warn!("Reservation load failed for {}: {}", trimmed, e);
                state.clear_display();
                state.error = Some(e.message);
                LoadEffect::Failed
            }
        }
    }

    /// Apply a seat-click intent. Synchronous and atomic with respect to
    /// the event loop; never touches the network
    pub fn toggle_seat(&self, raw_seat_id: &str) -> ToggleEffect {
        let mut state = self.lock();
        if state.syncing || state.detail.is_none() {
            return ToggleEffect::Ignored;
        }
        let Some(seat_id) = normalize_seat_id(raw_seat_id) else {
            return ToggleEffect::Ignored;
        };

        // Deselection always works, even when the map now reports the seat
        // as booked under this reservation's own hold
        if let Some(position) = state.selected.iter().position(|s| s == &seat_id) {
            state.selected.remove(position);
            state.error = None;
            return ToggleEffect::Removed;
        }

        match state.seat_status(&seat_id) {
            Some(SeatStatus::Available) => {}
            _ => return ToggleEffect::Ignored,
        }

        let limit = state.selection_limit();
        if state.selected.len() >= limit {
            state.error = Some(limit_message(limit));
            return ToggleEffect::LimitRejected;
        }

        state.selected.push(seat_id);
        state.error = None;
        ToggleEffect::Added
    }

    /// Persist the selection (defaulting to the current one). At most one
    /// confirmation is in flight at a time; on failure the optimistic
    /// selection is rolled back to its pre-call value
    pub async fn confirm_selection(&self, seats: Option<Vec<String>>) -> ConfirmEffect {
        let (reservation_id, submission, rollback) = {
            let mut state = self.lock();
            if state.syncing {
                return ConfirmEffect::AlreadySyncing;
            }
            if state.detail.is_none() {
                return ConfirmEffect::NoReservation;
            }
            let Some(reservation_id) = state.reservation_id.clone() else {
                return ConfirmEffect::NoReservation;
            };
            let requested = seats.unwrap_or_else(|| state.selected.clone());
            let mut submission = normalize_seat_ids(requested.iter());
            let limit = state.selection_limit();
            if submission.len() > limit {
                tracing::info!(
                    "Trimming seat submission for {} to the passenger limit ({} -> {})",
                    reservation_id,
                    submission.len(),
                    limit
                );
                submission.truncate(limit);
            }
            let rollback = state.selected.clone();
            state.syncing = true;
            state.error = None;
            (reservation_id, submission, rollback)
        };

        let result = self
            .gateway
            .update_seat_selection(&reservation_id, &submission)
            .await;

        let mut state = self.lock();
        state.syncing = false;
        match result {
            Ok(detail) => {
                // The server may have reconciled the list; its record wins
                state.apply_detail(detail);
                state.confirm_dialog_open = false;
                ConfirmEffect::Saved
            }
            Err(e) => {
                tracing::warn!(
                    "Seat selection update failed for {}; rolling back: {}",
                    reservation_id,
                    e
                );
                state.selected = rollback;
                state.error = Some(if e.message.trim().is_empty() {
                    GENERIC_SAVE_ERROR.to_string()
                } else {
                    e.message
                });
                ConfirmEffect::Failed
            }
        }
    }

    /// Tear down the view on unmount: discard all state and suppress the
    /// effect of any still-outstanding load
    pub fn reset(&self) {
        self.load_epoch.fetch_add(1, Ordering::SeqCst);
        let mut state = self.lock();
        *state = ControllerState::default();
    }

    pub fn open_confirm_dialog(&self) {
        let mut state = self.lock();
        if state.detail.is_some() {
            state.confirm_dialog_open = true;
        }
    }

    pub fn close_confirm_dialog(&self) {
        self.lock().confirm_dialog_open = false;
    }

    /// Current read model for the presentation layer
    pub fn snapshot(&self) -> SelectionSnapshot {
        let state = self.lock();
        let mut selected = state.selected.clone();
        selected.sort();
        let sync_state = if state.syncing {
            SyncState::Syncing
        } else if let Some(message) = &state.error {
            SyncState::Error(message.clone())
        } else {
            SyncState::Idle
        };
        SelectionSnapshot {
            reservation_id: state.reservation_id.clone(),
            seat_map: state.detail.as_ref().map(|d| d.seat_map.clone()),
            selected_seats: selected,
            selection_limit: state.selection_limit(),
            sync_state,
            error: state.error.clone(),
            confirm_dialog_open: state.confirm_dialog_open,
            last_saved_at: state
                .detail
                .as_ref()
                .and_then(|d| d.seat_selection.updated_at),
        }
    }
}
