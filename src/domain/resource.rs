use crate::domain::model::{QueryEnvelope, QueryValue};
use crate::utils::error::{ProxyError, Result};

/// Optional filters carried by an inbound request.
///
/// Every declared filter is listed, including the ones the caller left out,
/// so the query builder can check names against the resource descriptor.
pub trait QueryFilters: Send + Sync {
    fn pairs(&self) -> Vec<(&'static str, Option<QueryValue>)>;
}

/// One upstream resource and the parameters it accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Sessions,
    Drivers,
    DriverByNumber,
    Location,
    Telemetry,
    Laps,
    Positions,
    Intervals,
    PitStops,
    Stints,
}

impl Resource {
    pub const ALL: [Resource; 10] = [
        Resource::Sessions,
        Resource::Drivers,
        Resource::DriverByNumber,
        Resource::Location,
        Resource::Telemetry,
        Resource::Laps,
        Resource::Positions,
        Resource::Intervals,
        Resource::PitStops,
        Resource::Stints,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Resource::Sessions => "sessions",
            Resource::Drivers => "drivers",
            Resource::DriverByNumber => "driver_by_number",
            Resource::Location => "location",
            Resource::Telemetry => "telemetry",
            Resource::Laps => "laps",
            Resource::Positions => "positions",
            Resource::Intervals => "intervals",
            Resource::PitStops => "pitstops",
            Resource::Stints => "stints",
        }
    }

    /// Path appended to the upstream base URL.
    pub fn upstream_path(&self) -> &'static str {
        match self {
            Resource::Sessions => "/sessions",
            Resource::Drivers | Resource::DriverByNumber => "/drivers",
            Resource::Location => "/location",
            Resource::Telemetry => "/car_data",
            Resource::Laps => "/laps",
            Resource::Positions => "/position",
            Resource::Intervals => "/intervals",
            Resource::PitStops => "/pit",
            Resource::Stints => "/stints",
        }
    }

    pub fn required_parameter(&self) -> Option<&'static str> {
        match self {
            Resource::Sessions | Resource::Drivers => None,
            Resource::DriverByNumber => Some("driver_number"),
            _ => Some("session_key"),
        }
    }

    pub fn optional_parameters(&self) -> &'static [&'static str] {
        match self {
            Resource::Sessions => &["year", "session_type", "country_name"],
            Resource::Drivers | Resource::DriverByNumber => &["session_key"],
            Resource::Location => &["driver_number", "date"],
            Resource::Telemetry => &[
                "driver_number",
                "speed",
                "throttle",
                "brake",
                "drs",
                "rpm",
                "n_gear",
            ],
            Resource::Laps => &["driver_number", "lap_number"],
            Resource::Positions => &["driver_number", "position"],
            Resource::Intervals | Resource::PitStops | Resource::Stints => &["driver_number"],
        }
    }

    /// Build the outbound query: the required parameter always, each filter
    /// only when it carries a value.
    pub fn build_query(
        &self,
        required: Option<QueryValue>,
        filters: &dyn QueryFilters,
    ) -> Result<QueryEnvelope> {
        let mut query = QueryEnvelope::new();

        match (self.required_parameter(), required) {
            (Some(name), Some(value)) => query.insert(name, value),
            (Some(name), None) => {
                return Err(ProxyError::MissingParameterError {
                    resource: self.name().to_string(),
                    parameter: name.to_string(),
                })
            }
            (None, Some(_)) => {
                return Err(ProxyError::UnknownParameterError {
                    resource: self.name().to_string(),
                    parameter: "<required>".to_string(),
                })
            }
            (None, None) => {}
        }

        let allowed = self.optional_parameters();
        for (name, value) in filters.pairs() {
            if !allowed.contains(&name) {
                return Err(ProxyError::UnknownParameterError {
                    resource: self.name().to_string(),
                    parameter: name.to_string(),
                });
            }
            query.insert_opt(name, value);
        }

        Ok(query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Filters(Vec<(&'static str, Option<QueryValue>)>);

    impl QueryFilters for Filters {
        fn pairs(&self) -> Vec<(&'static str, Option<QueryValue>)> {
            self.0.clone()
        }
    }

    #[test]
    fn test_sessions_without_filters_builds_empty_query() {
        let filters = Filters(vec![("year", None), ("session_type", None)]);
        let query = Resource::Sessions.build_query(None, &filters).unwrap();
        assert!(query.is_empty());
    }

    #[test]
    fn test_required_parameter_always_present() {
        for resource in Resource::ALL {
            let Some(name) = resource.required_parameter() else {
                continue;
            };
            let query = resource
                .build_query(Some(QueryValue::Integer(9158)), &Filters(vec![]))
                .unwrap();
            assert!(query.contains_key(name), "{} lost {}", resource.name(), name);
        }
    }

    #[test]
    fn test_missing_required_parameter_is_an_error() {
        let err = Resource::Laps.build_query(None, &Filters(vec![])).unwrap_err();
        assert!(matches!(err, ProxyError::MissingParameterError { .. }));
    }

    #[test]
    fn test_undeclared_filter_is_rejected() {
        let filters = Filters(vec![("speed", Some(QueryValue::AtLeast(300)))]);
        let err = Resource::Laps
            .build_query(Some(QueryValue::Integer(1)), &filters)
            .unwrap_err();
        assert!(matches!(err, ProxyError::UnknownParameterError { .. }));
    }

    #[test]
    fn test_omitted_filters_do_not_reach_query() {
        let filters = Filters(vec![
            ("driver_number", Some(QueryValue::Integer(1))),
            ("speed", None),
            ("n_gear", Some(QueryValue::Integer(8))),
        ]);
        let query = Resource::Telemetry
            .build_query(Some(QueryValue::Integer(9158)), &filters)
            .unwrap();

        let keys: Vec<_> = query.keys().collect();
        assert_eq!(keys, vec!["session_key", "driver_number", "n_gear"]);
    }

    #[test]
    fn test_upstream_paths() {
        assert_eq!(Resource::Telemetry.upstream_path(), "/car_data");
        assert_eq!(Resource::Positions.upstream_path(), "/position");
        assert_eq!(Resource::PitStops.upstream_path(), "/pit");
        assert_eq!(Resource::DriverByNumber.upstream_path(), "/drivers");
    }
}
