pub mod controller;
pub mod gateway;
pub mod seatmap;

pub use controller::{ConfirmEffect, LoadEffect, SeatSelectionController, SelectionSnapshot, SyncState, ToggleEffect};
pub use gateway::{GatewayError, ReservationDetail, ReservationGateway};
pub use seatmap::{build_seat_map, SeatMap, SeatStatus, SeatType};
