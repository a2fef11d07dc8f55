use aroya_core::reservation::Reservation;
use aroya_core::seat::normalize_seat_ids;
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::collections::HashSet;
use std::hash::{Hash, Hasher};

const SEAT_COLUMNS: [char; 6] = ['A', 'B', 'C', 'D', 'E', 'F'];
const DEFAULT_SEAT_ROWS: usize = 18;
const SEAT_TYPE_PATTERN: [SeatType; 6] = [
    SeatType::Window,
    SeatType::Middle,
    SeatType::Aisle,
    SeatType::Aisle,
    SeatType::Middle,
    SeatType::Window,
];

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SeatType {
    Window,
    Middle,
    Aisle,
}

/// Server-authoritative seat occupancy. The client-side "selected" overlay
/// is a separate flag, not a status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SeatStatus {
    Available,
    Booked,
    Held,
    Pending,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeatTraits {
    pub legroom: bool,
    #[serde(rename = "exitRow")]
    pub exit_row: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Seat {
    pub id: String,
    pub display: String,
    pub status: SeatStatus,
    #[serde(rename = "type")]
    pub seat_type: SeatType,
    pub selected: bool,
    pub extra: SeatTraits,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeatRow {
    pub id: String,
    pub label: String,
    pub seats: Vec<Seat>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CabinSection {
    pub id: String,
    pub label: String,
    pub subtitle: String,
    pub rows: Vec<SeatRow>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryMeta {
    pub reported_available: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatMapMeta {
    pub total_seats: usize,
    pub available_seats: usize,
    pub booked_seats: usize,
    pub held_seats: usize,
    pub pending_seats: usize,
    pub selected_seats: usize,
    pub updated_at: Option<DateTime<Utc>>,
    pub layout: String,
    pub inventory: InventoryMeta,
}

/// The declarative cabin layout the seat picker renders
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeatMap {
    pub sections: Vec<CabinSection>,
    pub meta: SeatMapMeta,
}

impl SeatMap {
    pub fn find_seat(&self, seat_id: &str) -> Option<&Seat> {
        self.sections
            .iter()
            .flat_map(|section| section.rows.iter())
            .flat_map(|row| row.seats.iter())
            .find(|seat| seat.id == seat_id)
    }

    pub fn seat_status(&self, seat_id: &str) -> Option<SeatStatus> {
        self.find_seat(seat_id).map(|seat| seat.status)
    }
}

fn seat_type_for_column(index: usize) -> SeatType {
    SEAT_TYPE_PATTERN
        .get(index)
        .copied()
        .unwrap_or(SeatType::Middle)
}

fn build_base_rows(total_rows: usize) -> Vec<SeatRow> {
    let mut rows = Vec::with_capacity(total_rows);
    for row_number in 1..=total_rows {
        let seats = SEAT_COLUMNS
            .iter()
            .enumerate()
            .map(|(column_index, column_letter)| {
                let seat_id = format!("{}{}", row_number, column_letter);
                Seat {
                    display: seat_id.clone(),
                    id: seat_id,
                    status: SeatStatus::Available,
                    seat_type: seat_type_for_column(column_index),
                    selected: false,
                    extra: SeatTraits {
                        legroom: row_number <= 2,
                        exit_row: row_number == 9 || row_number == 10,
                    },
                }
            })
            .collect();
        rows.push(SeatRow {
            id: format!("row-{}", row_number),
            label: row_number.to_string(),
            seats,
        });
    }
    rows
}

/// Seed the cabin distribution from the flight and reservation identifiers
/// so the same reservation always renders the same cabin
fn distribution_seed(flight_id: &str, reservation_id: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    flight_id.hash(&mut hasher);
    reservation_id.hash(&mut hasher);
    hasher.finish()
}

/// Generate the cabin layout for a reservation: the flight's inventory sets
/// how full the cabin looks, the reservation's confirmed seats are overlaid
/// as selected, and the rest is distributed deterministically
pub fn build_seat_map(reservation: &Reservation) -> SeatMap {
    let flight = &reservation.flight_details;

    let estimated_rows = ((flight.seats_available as usize / SEAT_COLUMNS.len()) + 6).clamp(10, 24);
    let total_rows = DEFAULT_SEAT_ROWS.max(estimated_rows);
    let mut rows = build_base_rows(total_rows);

    let seat_ids: Vec<String> = rows
        .iter()
        .flat_map(|row| row.seats.iter().map(|seat| seat.id.clone()))
        .collect();
    let total_capacity = seat_ids.len();

    let selected: HashSet<String> = normalize_seat_ids(reservation.seat_assignments.iter())
        .into_iter()
        .collect();
    for row in &mut rows {
        for seat in &mut row.seats {
            seat.selected = selected.contains(&seat.id);
        }
    }

    let effective_available = selected
        .len()
        .max((flight.seats_available as usize).min(total_capacity));
    let booked_target = total_capacity.saturating_sub(effective_available);
    let held_target = (booked_target / 4).min(6);
    let pending_target = (effective_available / 10).min(4);

    let mut shuffled = seat_ids;
    let mut rng = StdRng::seed_from_u64(distribution_seed(
        &flight.flight_id,
        &reservation.reservation_id,
    ));
    shuffled.shuffle(&mut rng);

    let mut booked = HashSet::new();
    let mut held = HashSet::new();
    let mut pending = HashSet::new();
    for seat_id in shuffled {
        if selected.contains(&seat_id) {
            continue;
        }
        if booked.len() < booked_target {
            booked.insert(seat_id);
        } else if held.len() < held_target {
            held.insert(seat_id);
        } else if pending.len() < pending_target {
            pending.insert(seat_id);
        }
    }

    let mut available_count = 0;
    for row in &mut rows {
        for seat in &mut row.seats {
            seat.status = if booked.contains(&seat.id) {
                SeatStatus::Booked
            } else if held.contains(&seat.id) {
                SeatStatus::Held
            } else if pending.contains(&seat.id) {
                SeatStatus::Pending
            } else {
                if !seat.selected {
                    available_count += 1;
                }
                SeatStatus::Available
            };
        }
    }

    let layout = format!(
        "{}-{} configuration",
        SEAT_COLUMNS.len() / 2,
        SEAT_COLUMNS.len() / 2
    );
    let meta = SeatMapMeta {
        total_seats: total_capacity,
        available_seats: available_count,
        booked_seats: booked.len(),
        held_seats: held.len(),
        pending_seats: pending.len(),
        selected_seats: selected.len(),
        updated_at: reservation.selection_record().updated_at,
        layout: layout.clone(),
        inventory: InventoryMeta {
            reported_available: flight.seats_available,
        },
    };

    SeatMap {
        sections: vec![CabinSection {
            id: "main-cabin".to_string(),
            label: format!("{} cabin", flight.aircraft_type),
            subtitle: format!("Rows 1-{} · {}", total_rows, layout),
            rows,
        }],
        meta,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aroya_core::flight::{CabinClass, Flight, FlightStatus};
    use chrono::TimeZone;

    fn flight(seats_available: u32) -> Flight {
        Flight {
            flight_id: "AR-104".to_string(),
            airline: "Aroya Air".to_string(),
            flight_number: "RY104".to_string(),
            departure_city: "New York".to_string(),
            arrival_city: "Chicago".to_string(),
            departure_airport_code: "JFK".to_string(),
            arrival_airport_code: "ORD".to_string(),
            departure_time: "2026-08-10T08:30:00-04:00".parse().unwrap(),
            arrival_time: "2026-08-10T10:05:00-05:00".parse().unwrap(),
            status: FlightStatus::Scheduled,
            seats_available,
            price_usd: 189.0,
            available_classes: vec![CabinClass::Economy],
            aircraft_type: "A320neo".to_string(),
        }
    }

    fn reservation(seats_available: u32, assignments: &[&str]) -> Reservation {
        Reservation {
            reservation_id: "AR-DEADBEEF".to_string(),
            flight_id: "AR-104".to_string(),
            passengers: Vec::new(),
            passenger_count: 2,
            seat_class: CabinClass::Economy,
            total_price_usd: 378.0,
            booked_at: Utc.with_ymd_and_hms(2026, 8, 1, 12, 0, 0).unwrap(),
            flight_details: flight(seats_available),
            seat_assignments: assignments.iter().map(|s| s.to_string()).collect(),
            seat_assignments_updated_at: None,
        }
    }

    #[test]
    fn test_map_is_deterministic_per_reservation() {
        let reservation = reservation(40, &[]);
        let first = serde_json::to_value(build_seat_map(&reservation)).unwrap();
        let second = serde_json::to_value(build_seat_map(&reservation)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_small_inventory_still_renders_default_rows() {
        let map = build_seat_map(&reservation(0, &[]));
        let section = &map.sections[0];
        assert_eq!(section.rows.len(), DEFAULT_SEAT_ROWS);
        assert_eq!(map.meta.total_seats, DEFAULT_SEAT_ROWS * SEAT_COLUMNS.len());
    }

    #[test]
    fn test_large_inventory_grows_to_cap() {
        let map = build_seat_map(&reservation(600, &[]));
        assert_eq!(map.sections[0].rows.len(), 24);
    }

    #[test]
    fn test_status_counts_cover_cabin() {
        let map = build_seat_map(&reservation(40, &["12A", "12B"]));
        let meta = &map.meta;
        assert_eq!(meta.selected_seats, 2);
        assert_eq!(
            meta.available_seats + meta.booked_seats + meta.held_seats + meta.pending_seats
                + meta.selected_seats,
            meta.total_seats
        );
        assert_eq!(meta.inventory.reported_available, 40);
    }

    #[test]
    fn test_selected_seats_keep_available_status() {
        let map = build_seat_map(&reservation(40, &["12a"]));
        let seat = map.find_seat("12A").expect("seat exists");
        assert!(seat.selected);
        assert_eq!(seat.status, SeatStatus::Available);
    }

    #[test]
    fn test_row_traits() {
        let map = build_seat_map(&reservation(40, &[]));
        let front = map.find_seat("1A").unwrap();
        assert!(front.extra.legroom);
        assert!(!front.extra.exit_row);
        let exit = map.find_seat("9C").unwrap();
        assert!(exit.extra.exit_row);
        assert_eq!(exit.seat_type, SeatType::Aisle);
        let window = map.find_seat("14F").unwrap();
        assert_eq!(window.seat_type, SeatType::Window);
    }

    #[test]
    fn test_wire_shape_is_camel_case() {
        let map = build_seat_map(&reservation(40, &[]));
        let value = serde_json::to_value(&map).unwrap();
        assert!(value["meta"]["totalSeats"].is_number());
        assert!(value["meta"]["inventory"]["reportedAvailable"].is_number());
        let seat = &value["sections"][0]["rows"][0]["seats"][0];
        assert!(seat["type"].is_string());
        assert!(seat["extra"]["exitRow"].is_boolean());
    }
}
