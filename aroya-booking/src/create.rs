use crate::intake::{parse_passengers, validate_passengers, PassengerInput, ValidationReport};
use aroya_catalog::dataset::FlightDataset;
use aroya_core::envelope::{ResponseCode, ResponseEnvelope};
use aroya_core::flight::CabinClass;
use aroya_core::ids::gen_reservation_id;
use aroya_core::reservation::{round_cents, Bill, Reservation};
use chrono::Utc;
use serde::Deserialize;

/// Everything the checkout flow may send when creating a reservation.
/// Multi-passenger input is preferred; the flattened single-passenger
/// fields are the fallback the chat assistant uses
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CreateReservationRequest {
    pub flight_id: String,
    pub seat_class: Option<String>,
    pub confirm: bool,
    pub passenger_count: Option<u32>,
    pub passengers: Option<Vec<PassengerInput>>,
    pub passengers_json: Option<String>,
    pub passenger_name: Option<String>,
    pub passenger_age: Option<u32>,
    pub passenger_gender: Option<String>,
    pub passenger_dob: Option<String>,
    pub passenger_email: Option<String>,
}

impl CreateReservationRequest {
    fn single_passenger(&self) -> PassengerInput {
        PassengerInput {
            name: self.passenger_name.clone(),
            age: self.passenger_age,
            gender: self.passenger_gender.clone(),
            dob: self.passenger_dob.clone(),
            email: self.passenger_email.clone(),
        }
    }
}

/// What `create_reservation` decided. Previews and rejections come back as
/// finished envelopes; a confirmed reservation is handed to the caller to
/// persist and wrap with the full detail payload
#[derive(Debug)]
pub enum CreateOutcome {
    Envelope(ResponseEnvelope),
    Confirmed(Reservation),
}

fn parse_seat_class(raw: Option<&str>) -> Result<CabinClass, String> {
    let Some(raw) = raw else {
        return Ok(CabinClass::Economy);
    };
    match raw.trim().to_lowercase().as_str() {
        "" | "economy" => Ok(CabinClass::Economy),
        "premium economy" | "premium_economy" => Ok(CabinClass::PremiumEconomy),
        "business" => Ok(CabinClass::Business),
        "first" => Ok(CabinClass::First),
        _ => Err(raw.to_string()),
    }
}

/// Run the preview/confirm reservation flow against the flight catalog.
/// Pure: persisting the confirmed reservation is the caller's job
pub fn create_reservation(dataset: &FlightDataset, req: CreateReservationRequest) -> CreateOutcome {
    let Some(flight) = dataset.find(&req.flight_id) else {
        return CreateOutcome::Envelope(ResponseEnvelope::failure(
            ResponseCode::ReservationFlightNotFound,
            "Flight not found.",
            serde_json::json!({"flight_id": req.flight_id}),
        ));
    };

    if !flight.is_bookable() {
        return CreateOutcome::Envelope(ResponseEnvelope::failure(
            ResponseCode::ReservationUnbookable,
            format!("Flight status is '{}'. Not bookable.", flight.status),
            serde_json::json!({"flight": flight}),
        ));
    }

    let seat_class = match parse_seat_class(req.seat_class.as_deref()) {
        Ok(class) if flight.sells_class(class) => class,
        Ok(class) => {
            return CreateOutcome::Envelope(ResponseEnvelope::failure(
                ResponseCode::ReservationClassNotAvailable,
                format!("Seat class '{}' not available for this flight.", class),
                serde_json::json!({"available": flight.available_classes}),
            ))
        }
        Err(raw) => {
            return CreateOutcome::Envelope(ResponseEnvelope::failure(
                ResponseCode::ReservationClassNotAvailable,
                format!("Seat class '{}' not available for this flight.", raw),
                serde_json::json!({"available": flight.available_classes}),
            ))
        }
    };

    let intake = parse_passengers(
        req.passenger_count,
        req.passengers.clone(),
        req.passengers_json.as_deref(),
        req.single_passenger(),
    );

    if flight.seats_available < intake.count {
        return CreateOutcome::Envelope(ResponseEnvelope::failure(
            ResponseCode::ReservationNoSeats,
            format!(
                "Only {} seat(s) left; requested {}.",
                flight.seats_available, intake.count
            ),
            serde_json::json!({
                "flight": flight,
                "requested_passengers": intake.count,
            }),
        ));
    }

    let (validated, issues) = validate_passengers(&intake);

    let billed_passengers = intake.count.max(1);
    let unit_price = round_cents(flight.price_usd * seat_class.multiplier());
    let total = round_cents(unit_price * billed_passengers as f64);
    let bill = Bill {
        currency: "USD".to_string(),
        unit_price,
        passengers: billed_passengers,
        subtotal: total,
        total,
    };

    let validation = ValidationReport {
        ok: issues.is_empty() && intake.parse_errors.is_empty(),
        issues: issues.clone(),
        parse_errors: intake.parse_errors.clone(),
    };

    if !req.confirm {
        let next_action = if validation.ok {
            "ask_confirmation"
        } else {
            "collect_missing_passenger_details"
        };
        return CreateOutcome::Envelope(ResponseEnvelope::success(
            ResponseCode::ReservationPreview,
            "Preview generated. Provide any missing/invalid passenger details, then confirm to book.",
            serde_json::json!({
                "flight": flight,
                "seat_class": seat_class,
                "passenger_count": intake.count,
                "passengers": validated,
                "pending_entries": intake.entries,
                "validation": validation,
                "bill": bill,
                "next_action": next_action,
            }),
        ));
    }

    if !validation.ok || validated.len() != intake.count as usize {
        return CreateOutcome::Envelope(ResponseEnvelope::failure(
            ResponseCode::ReservationValidationFailed,
            "Passenger details failed validation. Please correct before confirming.",
            serde_json::json!({
                "passenger_count": intake.count,
                "provided_valid": validated.len(),
                "validation": ValidationReport {
                    ok: false,
                    issues,
                    parse_errors: intake.parse_errors,
                },
            }),
        ));
    }

    let booked_at = Utc::now();
    let reservation = Reservation {
        reservation_id: gen_reservation_id(),
        flight_id: flight.flight_id.clone(),
        passengers: validated,
        passenger_count: intake.count,
        seat_class,
        total_price_usd: total,
        booked_at,
        flight_details: flight.clone(),
        seat_assignments: Vec::new(),
        seat_assignments_updated_at: Some(booked_at),
    };

    CreateOutcome::Confirmed(reservation)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_passenger() -> PassengerInput {
        PassengerInput {
            name: Some("Dana Reyes".to_string()),
            age: Some(34),
            gender: Some("female".to_string()),
            dob: Some("1992-03-14".to_string()),
            email: Some("dana@example.com".to_string()),
        }
    }

    fn request(flight_id: &str, confirm: bool) -> CreateReservationRequest {
        CreateReservationRequest {
            flight_id: flight_id.to_string(),
            confirm,
            passengers: Some(vec![valid_passenger()]),
            ..Default::default()
        }
    }

    fn envelope(outcome: CreateOutcome) -> ResponseEnvelope {
        match outcome {
            CreateOutcome::Envelope(envelope) => envelope,
            CreateOutcome::Confirmed(r) => panic!("expected envelope, got confirmation {}", r.reservation_id),
        }
    }

    #[test]
    fn test_unknown_flight() {
        let outcome = create_reservation(&FlightDataset::builtin(), request("AR-NOPE", false));
        let envelope = envelope(outcome);
        assert!(!envelope.ok);
        assert_eq!(envelope.code, ResponseCode::ReservationFlightNotFound);
    }

    #[test]
    fn test_cancelled_flight_is_unbookable() {
        let outcome = create_reservation(&FlightDataset::builtin(), request("AR-228", false));
        assert_eq!(envelope(outcome).code, ResponseCode::ReservationUnbookable);
    }

    #[test]
    fn test_class_not_available() {
        let mut req = request("AR-118", false);
        req.seat_class = Some("First".to_string());
        let outcome = create_reservation(&FlightDataset::builtin(), req);
        assert_eq!(envelope(outcome).code, ResponseCode::ReservationClassNotAvailable);
    }

    #[test]
    fn test_not_enough_seats() {
        let mut req = request("AR-410", false);
        req.passenger_count = Some(40);
        let outcome = create_reservation(&FlightDataset::builtin(), req);
        assert_eq!(envelope(outcome).code, ResponseCode::ReservationNoSeats);
    }

    #[test]
    fn test_preview_reports_validation_and_bill() {
        let mut req = request("AR-104", false);
        req.passenger_count = Some(2); // only one passenger supplied
        let outcome = create_reservation(&FlightDataset::builtin(), req);
        let envelope = envelope(outcome);
        assert!(envelope.ok);
        assert_eq!(envelope.code, ResponseCode::ReservationPreview);
        assert_eq!(envelope.data["validation"]["ok"], serde_json::json!(false));
        assert_eq!(
            envelope.data["next_action"],
            serde_json::json!("collect_missing_passenger_details")
        );
        // Two economy seats on a 189.00 base fare
        assert_eq!(envelope.data["bill"]["total"], serde_json::json!(378.0));
    }

    #[test]
    fn test_confirm_rejects_incomplete_details() {
        let mut req = request("AR-104", true);
        req.passenger_count = Some(2);
        let outcome = create_reservation(&FlightDataset::builtin(), req);
        let envelope = envelope(outcome);
        assert_eq!(envelope.code, ResponseCode::ReservationValidationFailed);
        assert_eq!(envelope.data["provided_valid"], serde_json::json!(1));
    }

    #[test]
    fn test_confirm_builds_reservation_with_class_pricing() {
        let mut req = request("AR-104", true);
        req.seat_class = Some("Business".to_string());
        let outcome = create_reservation(&FlightDataset::builtin(), req);
        let CreateOutcome::Confirmed(reservation) = outcome else {
            panic!("expected confirmation");
        };
        assert!(reservation.reservation_id.starts_with("AR-"));
        assert_eq!(reservation.passenger_count, 1);
        assert_eq!(reservation.seat_class, CabinClass::Business);
        // 189.00 * 2.2 = 415.80
        assert_eq!(reservation.total_price_usd, 415.8);
        assert!(reservation.seat_assignments.is_empty());
        assert_eq!(
            reservation.seat_assignments_updated_at,
            Some(reservation.booked_at)
        );
    }
}
