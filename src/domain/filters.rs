// Inbound query-string filters, one struct per resource family.
// Every field defaults to absent; nothing is substituted.

use crate::domain::model::{QueryValue, SessionKey, SessionType};
use crate::domain::resource::QueryFilters;
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SessionFilters {
    pub year: Option<i32>,
    pub session_type: Option<SessionType>,
    pub country_name: Option<String>,
}

impl QueryFilters for SessionFilters {
    fn pairs(&self) -> Vec<(&'static str, Option<QueryValue>)> {
        vec![
            ("year", self.year.map(QueryValue::from)),
            ("session_type", self.session_type.map(QueryValue::from)),
            ("country_name", self.country_name.clone().map(QueryValue::from)),
        ]
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DriverFilters {
    pub session_key: Option<SessionKey>,
}

impl QueryFilters for DriverFilters {
    fn pairs(&self) -> Vec<(&'static str, Option<QueryValue>)> {
        vec![("session_key", self.session_key.map(QueryValue::from))]
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LocationFilters {
    pub driver_number: Option<u32>,
    /// Upstream timestamp filter, forwarded verbatim.
    pub date: Option<String>,
}

impl QueryFilters for LocationFilters {
    fn pairs(&self) -> Vec<(&'static str, Option<QueryValue>)> {
        vec![
            ("driver_number", self.driver_number.map(QueryValue::from)),
            ("date", self.date.clone().map(QueryValue::from)),
        ]
    }
}

/// Car telemetry filters. Speed, throttle, brake and rpm are lower bounds;
/// drs and n_gear match exactly.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CarDataFilters {
    pub driver_number: Option<u32>,
    pub speed: Option<u32>,
    pub throttle: Option<u32>,
    pub brake: Option<u32>,
    pub drs: Option<u32>,
    pub rpm: Option<u32>,
    pub n_gear: Option<u32>,
}

fn at_least(value: Option<u32>) -> Option<QueryValue> {
    value.map(|v| QueryValue::AtLeast(v.into()))
}

impl QueryFilters for CarDataFilters {
    fn pairs(&self) -> Vec<(&'static str, Option<QueryValue>)> {
        vec![
            ("driver_number", self.driver_number.map(QueryValue::from)),
            ("speed", at_least(self.speed)),
            ("throttle", at_least(self.throttle)),
            ("brake", at_least(self.brake)),
            ("drs", self.drs.map(QueryValue::from)),
            ("rpm", at_least(self.rpm)),
            ("n_gear", self.n_gear.map(QueryValue::from)),
        ]
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LapFilters {
    pub driver_number: Option<u32>,
    pub lap_number: Option<u32>,
}

impl QueryFilters for LapFilters {
    fn pairs(&self) -> Vec<(&'static str, Option<QueryValue>)> {
        vec![
            ("driver_number", self.driver_number.map(QueryValue::from)),
            ("lap_number", self.lap_number.map(QueryValue::from)),
        ]
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PositionFilters {
    pub driver_number: Option<u32>,
    pub position: Option<u32>,
}

impl QueryFilters for PositionFilters {
    fn pairs(&self) -> Vec<(&'static str, Option<QueryValue>)> {
        vec![
            ("driver_number", self.driver_number.map(QueryValue::from)),
            ("position", self.position.map(QueryValue::from)),
        ]
    }
}

/// Shared by intervals, pit stops and stints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DriverNumberFilter {
    pub driver_number: Option<u32>,
}

impl QueryFilters for DriverNumberFilter {
    fn pairs(&self) -> Vec<(&'static str, Option<QueryValue>)> {
        vec![("driver_number", self.driver_number.map(QueryValue::from))]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_car_data_thresholds_use_lower_bound() {
        let filters = CarDataFilters {
            speed: Some(315),
            drs: Some(12),
            ..Default::default()
        };
        let pairs = filters.pairs();

        let speed = pairs.iter().find(|(k, _)| *k == "speed").unwrap();
        assert_eq!(speed.1, Some(QueryValue::AtLeast(315)));
        let drs = pairs.iter().find(|(k, _)| *k == "drs").unwrap();
        assert_eq!(drs.1, Some(QueryValue::Integer(12)));
    }

    #[test]
    fn test_zero_is_a_supplied_value() {
        let filters = LapFilters {
            driver_number: None,
            lap_number: Some(0),
        };
        let pairs = filters.pairs();
        assert_eq!(pairs[0].1, None);
        assert_eq!(pairs[1].1, Some(QueryValue::Integer(0)));
    }

    #[test]
    fn test_session_filters_deserialize_from_json() {
        let filters: SessionFilters =
            serde_json::from_value(serde_json::json!({"year": 2024, "session_type": "Race"}))
                .unwrap();
        assert_eq!(filters.year, Some(2024));
        assert_eq!(filters.session_type, Some(SessionType::Race));
        assert!(filters.country_name.is_none());
    }
}
