use crate::dataset::FlightDataset;
use aroya_core::flight::{Flight, FlightStatus};
use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, Weekday};
use serde::Serialize;
use std::collections::BTreeMap;

/// One local timestamp broken into the pieces the calendar UI renders
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SplitDateTime {
    pub iso: String,
    pub date: NaiveDate,
    pub time: String,
    pub weekday: String,
    pub utc_offset: String,
}

/// A flight row on the arrivals board
#[derive(Debug, Clone, Serialize)]
pub struct ArrivalSummary {
    pub flight_id: String,
    pub airline: String,
    pub flight_number: String,
    pub departure_city: String,
    pub arrival_city: String,
    pub departure_airport_code: String,
    pub arrival_airport_code: String,
    pub status: FlightStatus,
    pub arrival: SplitDateTime,
    pub departure: SplitDateTime,
}

/// All arrivals sharing one local date
#[derive(Debug, Clone, Serialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub weekday: String,
    pub flights: Vec<ArrivalSummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CalendarMeta {
    pub total_flights: usize,
    pub first_arrival: NaiveDate,
    pub last_arrival: NaiveDate,
}

/// The arrivals board: day buckets in date order plus the flat flight list
#[derive(Debug, Clone, Serialize)]
pub struct ArrivalCalendar {
    pub calendar: Vec<CalendarDay>,
    pub flights: Vec<ArrivalSummary>,
    pub meta: Option<CalendarMeta>,
}

fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Render a fixed offset as `UTC±HH:MM` (plain "UTC" for zero offset)
pub fn format_utc_offset(dt: &DateTime<FixedOffset>) -> String {
    let total_minutes = dt.offset().local_minus_utc() / 60;
    if total_minutes == 0 {
        return "UTC".to_string();
    }
    let sign = if total_minutes >= 0 { '+' } else { '-' };
    let magnitude = total_minutes.abs();
    format!("UTC{}{:02}:{:02}", sign, magnitude / 60, magnitude % 60)
}

pub fn split_datetime(dt: &DateTime<FixedOffset>) -> SplitDateTime {
    let date = dt.date_naive();
    SplitDateTime {
        iso: dt.to_rfc3339(),
        date,
        time: dt.format("%H:%M").to_string(),
        weekday: weekday_name(date.weekday()).to_string(),
        utc_offset: format_utc_offset(dt),
    }
}

fn summarize(flight: &Flight) -> ArrivalSummary {
    ArrivalSummary {
        flight_id: flight.flight_id.clone(),
        airline: flight.airline.clone(),
        flight_number: flight.flight_number.clone(),
        departure_city: flight.departure_city.clone(),
        arrival_city: flight.arrival_city.clone(),
        departure_airport_code: flight.departure_airport_code.clone(),
        arrival_airport_code: flight.arrival_airport_code.clone(),
        status: flight.status,
        arrival: split_datetime(&flight.arrival_time),
        departure: split_datetime(&flight.departure_time),
    }
}

/// Project the dataset into the arrivals board, grouped by local arrival date
pub fn build_calendar(dataset: &FlightDataset) -> ArrivalCalendar {
    let mut by_date: BTreeMap<NaiveDate, Vec<ArrivalSummary>> = BTreeMap::new();
    let mut flights = Vec::new();

    for flight in dataset.flights() {
        let summary = summarize(flight);
        by_date
            .entry(summary.arrival.date)
            .or_default()
            .push(summary.clone());
        flights.push(summary);
    }

    let first = by_date.keys().next().copied();
    let last = by_date.keys().last().copied();
    let meta = match (first, last) {
        (Some(first_arrival), Some(last_arrival)) => Some(CalendarMeta {
            total_flights: flights.len(),
            first_arrival,
            last_arrival,
        }),
        _ => None,
    };

    let calendar = by_date
        .into_iter()
        .map(|(date, flights)| CalendarDay {
            weekday: weekday_name(date.weekday()).to_string(),
            date,
            flights,
        })
        .collect();

    ArrivalCalendar {
        calendar,
        flights,
        meta,
    }
}
