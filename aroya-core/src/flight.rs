use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

/// Operational flight status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FlightStatus {
    Scheduled,
    Delayed,
    Cancelled,
    Landed,
}

impl std::fmt::Display for FlightStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            FlightStatus::Scheduled => "SCHEDULED",
            FlightStatus::Delayed => "DELAYED",
            FlightStatus::Cancelled => "CANCELLED",
            FlightStatus::Landed => "LANDED",
        };
        write!(f, "{}", label)
    }
}

/// Cabin classes sold on a flight
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum CabinClass {
    Economy,
    #[serde(rename = "Premium Economy")]
    PremiumEconomy,
    Business,
    First,
}

impl CabinClass {
    /// Per-passenger price multiplier over the flight's base (Economy) fare
    pub fn multiplier(&self) -> f64 {
        match self {
            CabinClass::Economy => 1.0,
            CabinClass::PremiumEconomy => 1.4,
            CabinClass::Business => 2.2,
            CabinClass::First => 3.5,
        }
    }
}

impl std::fmt::Display for CabinClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            CabinClass::Economy => "Economy",
            CabinClass::PremiumEconomy => "Premium Economy",
            CabinClass::Business => "Business",
            CabinClass::First => "First",
        };
        write!(f, "{}", label)
    }
}

/// A scheduled flight in the catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Flight {
    pub flight_id: String,
    pub airline: String,
    pub flight_number: String,
    pub departure_city: String,
    pub arrival_city: String,
    pub departure_airport_code: String,
    pub arrival_airport_code: String,
    pub departure_time: DateTime<FixedOffset>,
    pub arrival_time: DateTime<FixedOffset>,
    pub status: FlightStatus,
    pub seats_available: u32,
    pub price_usd: f64,
    pub available_classes: Vec<CabinClass>,
    pub aircraft_type: String,
}

impl Flight {
    /// A flight can take new reservations while it is still on the ground
    pub fn is_bookable(&self) -> bool {
        matches!(self.status, FlightStatus::Scheduled | FlightStatus::Delayed)
    }

    /// Local departure date, used for date-based search matching
    pub fn departure_date(&self) -> NaiveDate {
        self.departure_time.date_naive()
    }

    pub fn sells_class(&self, class: CabinClass) -> bool {
        self.available_classes.contains(&class)
    }
}
