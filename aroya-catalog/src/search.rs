use crate::dataset::FlightDataset;
use aroya_core::envelope::{ResponseCode, ResponseEnvelope};
use aroya_core::flight::{CabinClass, Flight};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("Unknown cabin class: {0}")]
    UnknownClass(String),
}

/// Validated search criteria
#[derive(Debug, Clone, Serialize, Default)]
pub struct SearchCriteria {
    pub departure_city: Option<String>,
    pub arrival_city: Option<String>,
    pub departure_date: Option<NaiveDate>,
    pub passengers: u32,
    pub class_preference: Option<CabinClass>,
}

/// Raw query input as it arrives from the caller. Date synonyms are
/// accepted the way the original assistant tolerated them
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchQuery {
    pub departure_city: Option<String>,
    pub arrival_city: Option<String>,
    pub departure_date: Option<String>,
    pub passengers: Option<u32>,
    pub class_preference: Option<String>,
    pub date: Option<String>,
    pub travel_date: Option<String>,
}

impl SearchQuery {
    pub fn into_criteria(self) -> Result<SearchCriteria, SearchError> {
        let raw_date = self
            .departure_date
            .or(self.travel_date)
            .or(self.date);
        let class_preference = match self.class_preference {
            Some(raw) => Some(parse_cabin_class(&raw).ok_or(SearchError::UnknownClass(raw))?),
            None => None,
        };
        Ok(SearchCriteria {
            departure_city: self.departure_city.filter(|c| !c.trim().is_empty()),
            arrival_city: self.arrival_city.filter(|c| !c.trim().is_empty()),
            departure_date: raw_date.as_deref().and_then(parse_date_flexible),
            passengers: self.passengers.unwrap_or(1).max(1),
            class_preference,
        })
    }
}

/// Facets offered when the criteria are too loose for exact results
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SearchFacets {
    pub destinations: Vec<String>,
    pub travel_dates: Vec<NaiveDate>,
}

/// The full result of a search, envelope-ready
#[derive(Debug, Clone, Serialize)]
pub struct SearchOutcome {
    pub criteria: SearchCriteria,
    pub flights: Vec<Flight>,
    pub facets: SearchFacets,
    pub needs: Vec<String>,
    #[serde(skip)]
    pub code: ResponseCode,
    #[serde(skip)]
    pub message: String,
}

impl SearchOutcome {
    pub fn into_envelope(self) -> ResponseEnvelope {
        let code = self.code;
        let message = self.message.clone();
        let data = serde_json::json!({
            "criteria": self.criteria,
            "flights": self.flights,
            "facets": self.facets,
            "needs": self.needs,
        });
        ResponseEnvelope::success(code, message, data)
    }
}

fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

fn parse_cabin_class(raw: &str) -> Option<CabinClass> {
    match normalize(raw).as_str() {
        "economy" => Some(CabinClass::Economy),
        "premium economy" | "premium_economy" => Some(CabinClass::PremiumEconomy),
        "business" => Some(CabinClass::Business),
        "first" => Some(CabinClass::First),
        _ => None,
    }
}

/// Accept the date shapes users (and upstream agents) actually send
pub fn parse_date_flexible(raw: &str) -> Option<NaiveDate> {
    let text = raw.trim();
    if text.is_empty() {
        return None;
    }
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(&text.replace('Z', "+00:00")) {
        return Some(dt.date_naive());
    }
    for format in ["%Y-%m-%d", "%m/%d/%Y", "%d %B %Y", "%B %d, %Y", "%B %d %Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(text, format) {
            return Some(date);
        }
    }
    None
}

fn city_matches(flight_city: &str, wanted: &Option<String>) -> bool {
    match wanted {
        Some(city) => normalize(flight_city) == normalize(city),
        None => true,
    }
}

fn seat_and_class_ok(flight: &Flight, criteria: &SearchCriteria) -> bool {
    flight.is_bookable()
        && flight.seats_available >= criteria.passengers
        && criteria
            .class_preference
            .map(|class| flight.sells_class(class))
            .unwrap_or(true)
}

fn facets_for(dataset: &FlightDataset, criteria: &SearchCriteria) -> SearchFacets {
    let mut destinations = Vec::new();
    let mut travel_dates = Vec::new();
    for flight in dataset.flights() {
        if !city_matches(&flight.departure_city, &criteria.departure_city) {
            continue;
        }
        if !seat_and_class_ok(flight, criteria) {
            continue;
        }
        if !destinations.contains(&flight.arrival_city) {
            destinations.push(flight.arrival_city.clone());
        }
        if city_matches(&flight.arrival_city, &criteria.arrival_city) {
            let date = flight.departure_date();
            if !travel_dates.contains(&date) {
                travel_dates.push(date);
            }
        }
    }
    destinations.sort();
    travel_dates.sort();
    SearchFacets {
        destinations,
        travel_dates,
    }
}

/// Search the dataset. Both-cities criteria filter strictly on the route;
/// looser criteria return whatever matches plus facets to explore with
pub fn search(dataset: &FlightDataset, criteria: SearchCriteria) -> SearchOutcome {
    let route_complete = criteria.departure_city.is_some() && criteria.arrival_city.is_some();

    let mut matched: Vec<Flight> = dataset
        .flights()
        .iter()
        .filter(|f| city_matches(&f.departure_city, &criteria.departure_city))
        .filter(|f| city_matches(&f.arrival_city, &criteria.arrival_city))
        .filter(|f| seat_and_class_ok(f, &criteria))
        .filter(|f| {
            criteria
                .departure_date
                .map(|date| f.departure_date() == date)
                .unwrap_or(true)
        })
        .cloned()
        .collect();

    matched.sort_by(|a, b| {
        a.price_usd
            .partial_cmp(&b.price_usd)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(b.seats_available.cmp(&a.seats_available))
    });

    let facets = facets_for(dataset, &criteria);

    let mut needs = Vec::new();
    if criteria.departure_city.is_none() {
        needs.push("departure_city".to_string());
    }
    if criteria.departure_city.is_some() && criteria.arrival_city.is_none() {
        needs.push("arrival_city".to_string());
    }
    if route_complete && criteria.departure_date.is_none() {
        needs.push("departure_date".to_string());
    }

    let (code, message) = if route_complete {
        let departure = criteria.departure_city.as_deref().unwrap_or_default();
        let arrival = criteria.arrival_city.as_deref().unwrap_or_default();
        if matched.is_empty() {
            (
                ResponseCode::FlightSearchPartialOk,
                format!(
                    "No exact-date results yet for {} → {}. Here are available dates you can pick.",
                    departure, arrival
                ),
            )
        } else {
            (
                ResponseCode::FlightSearchOk,
                format!(
                    "Found {} flight(s) from {} to {}.",
                    matched.len(),
                    departure,
                    arrival
                ),
            )
        }
    } else {
        (
            ResponseCode::FlightSearchExplore,
            "Select a destination and/or date from the available options.".to_string(),
        )
    };

    SearchOutcome {
        criteria,
        flights: matched,
        facets,
        needs,
        code,
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset() -> FlightDataset {
        FlightDataset::builtin()
    }

    fn criteria(departure: Option<&str>, arrival: Option<&str>) -> SearchCriteria {
        SearchCriteria {
            departure_city: departure.map(String::from),
            arrival_city: arrival.map(String::from),
            departure_date: None,
            passengers: 1,
            class_preference: None,
        }
    }

    #[test]
    fn test_route_search_sorted_by_price() {
        let outcome = search(&dataset(), criteria(Some("new york"), Some("Chicago")));
        assert_eq!(outcome.code, ResponseCode::FlightSearchOk);
        assert!(outcome.flights.len() >= 2);
        let prices: Vec<f64> = outcome.flights.iter().map(|f| f.price_usd).collect();
        let mut sorted = prices.clone();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(prices, sorted);
    }

    #[test]
    fn test_date_filter_misses_produce_partial_ok_with_facets() {
        let mut c = criteria(Some("New York"), Some("Chicago"));
        c.departure_date = parse_date_flexible("2026-12-24");
        let outcome = search(&dataset(), c);
        assert_eq!(outcome.code, ResponseCode::FlightSearchPartialOk);
        assert!(outcome.flights.is_empty());
        assert!(!outcome.facets.travel_dates.is_empty());
    }

    #[test]
    fn test_explore_when_route_incomplete() {
        let outcome = search(&dataset(), criteria(Some("New York"), None));
        assert_eq!(outcome.code, ResponseCode::FlightSearchExplore);
        assert_eq!(outcome.needs, vec!["arrival_city"]);
        assert!(outcome.facets.destinations.contains(&"Chicago".to_string()));
        assert!(outcome.facets.destinations.contains(&"Miami".to_string()));
    }

    #[test]
    fn test_cancelled_flights_never_match() {
        let outcome = search(&dataset(), criteria(Some("Chicago"), Some("Denver")));
        assert!(outcome.flights.iter().all(|f| f.flight_id != "AR-228"));
    }

    #[test]
    fn test_passenger_count_gates_small_flights() {
        let mut c = criteria(Some("Miami"), Some("Boston"));
        c.passengers = 20;
        let outcome = search(&dataset(), c);
        assert!(outcome.flights.is_empty());
    }

    #[test]
    fn test_class_preference_filters() {
        let mut c = criteria(Some("New York"), Some("Chicago"));
        c.class_preference = Some(CabinClass::Business);
        let outcome = search(&dataset(), c);
        assert!(!outcome.flights.is_empty());
        assert!(outcome
            .flights
            .iter()
            .all(|f| f.sells_class(CabinClass::Business)));
    }

    #[test]
    fn test_date_parsing_variants() {
        let expected = NaiveDate::from_ymd_opt(2026, 8, 10).unwrap();
        assert_eq!(parse_date_flexible("2026-08-10"), Some(expected));
        assert_eq!(parse_date_flexible("08/10/2026"), Some(expected));
        assert_eq!(parse_date_flexible("10 August 2026"), Some(expected));
        assert_eq!(parse_date_flexible("August 10, 2026"), Some(expected));
        assert_eq!(parse_date_flexible("2026-08-10T14:00:00Z"), Some(expected));
        assert_eq!(parse_date_flexible("soon"), None);
    }

    #[test]
    fn test_query_synonyms_and_class_validation() {
        let query = SearchQuery {
            travel_date: Some("2026-08-09".to_string()),
            class_preference: Some("premium economy".to_string()),
            ..Default::default()
        };
        let criteria = query.into_criteria().unwrap();
        assert_eq!(criteria.departure_date, NaiveDate::from_ymd_opt(2026, 8, 9));
        assert_eq!(criteria.class_preference, Some(CabinClass::PremiumEconomy));
        assert_eq!(criteria.passengers, 1);

        let bad = SearchQuery {
            class_preference: Some("steerage".to_string()),
            ..Default::default()
        };
        assert!(bad.into_criteria().is_err());
    }
}
