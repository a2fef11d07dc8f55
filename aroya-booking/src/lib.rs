pub mod create;
pub mod intake;

pub use create::{create_reservation, CreateOutcome, CreateReservationRequest};
pub use intake::{PassengerInput, ValidationIssue, ValidationReport};
