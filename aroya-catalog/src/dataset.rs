use aroya_core::flight::Flight;
use serde::Deserialize;
use std::path::Path;

const BUILTIN_FLIGHTS: &str = include_str!("../data/flights.json");

#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("Failed to read flight dataset: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse flight dataset: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Deserialize)]
struct DatasetFile {
    flights: Vec<Flight>,
}

/// The active flight inventory the search and calendar views project over
#[derive(Debug, Clone)]
pub struct FlightDataset {
    flights: Vec<Flight>,
}

impl FlightDataset {
    /// The dataset compiled into the binary, used when no path is configured
    pub fn builtin() -> Self {
        Self::from_json_str(BUILTIN_FLIGHTS)
            .unwrap_or_else(|e| {
                tracing::error!("Builtin flight dataset is invalid: {}", e);
                Self { flights: Vec::new() }
            })
    }

    pub fn from_json_str(raw: &str) -> Result<Self, DatasetError> {
        let file: DatasetFile = serde_json::from_str(raw)?;
        Ok(Self { flights: file.flights })
    }

    pub fn from_path(path: &Path) -> Result<Self, DatasetError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// Load from the configured path, falling back to the builtin inventory
    pub fn load(path: Option<&Path>) -> Self {
        match path {
            Some(path) => match Self::from_path(path) {
                Ok(dataset) => dataset,
                Err(e) => {
                    tracing::warn!("Unable to load flight dataset from {:?}: {}; using builtin", path, e);
                    Self::builtin()
                }
            },
            None => Self::builtin(),
        }
    }

    pub fn flights(&self) -> &[Flight] {
        &self.flights
    }

    pub fn find(&self, flight_id: &str) -> Option<&Flight> {
        self.flights.iter().find(|f| f.flight_id == flight_id)
    }
}
