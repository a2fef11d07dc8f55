use crate::flight::{CabinClass, Flight};
use crate::pii::MaskedEmail;
use crate::seat::normalize_seat_ids;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A traveler on a reservation. The email is masked in Debug output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Passenger {
    pub name: String,
    pub age: u32,
    pub gender: String,
    pub dob: NaiveDate,
    pub email: MaskedEmail,
}

/// A confirmed booking, the unit the seat-selection flow operates on
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reservation {
    pub reservation_id: String,
    pub flight_id: String,
    pub passengers: Vec<Passenger>,
    pub passenger_count: u32,
    pub seat_class: CabinClass,
    pub total_price_usd: f64,
    pub booked_at: DateTime<Utc>,
    pub flight_details: Flight,
    #[serde(default)]
    pub seat_assignments: Vec<String>,
    #[serde(default)]
    pub seat_assignments_updated_at: Option<DateTime<Utc>>,
}

impl Reservation {
    /// Upper bound on how many seats this reservation may hold
    pub fn selection_limit(&self) -> usize {
        self.passenger_count.max(1) as usize
    }

    /// The confirmed seat selection, normalized, with its last-change stamp
    pub fn selection_record(&self) -> SeatSelectionRecord {
        SeatSelectionRecord {
            selected_seats: normalize_seat_ids(self.seat_assignments.iter()),
            updated_at: self.seat_assignments_updated_at.or(Some(self.booked_at)),
        }
    }
}

/// Server-persisted seat selection outcome, the source of truth after a sync
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeatSelectionRecord {
    pub selected_seats: Vec<String>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl SeatSelectionRecord {
    pub fn empty() -> Self {
        Self {
            selected_seats: Vec::new(),
            updated_at: None,
        }
    }
}

/// Price breakdown shown at checkout. Payment itself is out of scope
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Bill {
    pub currency: String,
    pub unit_price: f64,
    pub passengers: u32,
    pub subtotal: f64,
    pub total: f64,
}

impl Bill {
    /// Split a reservation total evenly across its passengers
    pub fn of(total_usd: f64, passenger_count: u32) -> Self {
        let passengers = passenger_count.max(1);
        Self {
            currency: "USD".to_string(),
            unit_price: round_cents(total_usd / passengers as f64),
            passengers,
            subtotal: total_usd,
            total: total_usd,
        }
    }

    pub fn for_reservation(reservation: &Reservation) -> Self {
        Self::of(reservation.total_price_usd, reservation.passenger_count)
    }
}

/// Round a USD amount to whole cents
pub fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}
