use crate::domain::filters::{
    CarDataFilters, DriverFilters, DriverNumberFilter, LapFilters, LocationFilters,
    PositionFilters, SessionFilters,
};
use crate::domain::model::{QueryEnvelope, QueryValue, Record, SessionKey};
use crate::domain::ports::UpstreamSource;
use crate::domain::resource::{QueryFilters, Resource};
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::Client;

pub const DEFAULT_BASE_URL: &str = "https://api.openf1.org/v1";
pub const DEFAULT_USER_AGENT: &str = "F1-Dashboard/1.0";

/// reqwest-backed client for the OpenF1 REST API.
///
/// One `Client` is reused for every call so connections are pooled. No
/// timeout or retry policy is layered on top of reqwest's defaults.
#[derive(Debug, Clone)]
pub struct OpenF1Client {
    client: Client,
    base_url: String,
}

impl OpenF1Client {
    pub fn new(base_url: &str, user_agent: &str) -> Result<Self> {
        let client = Client::builder().user_agent(user_agent).build()?;
        tracing::info!("OpenF1Client initialized for {}", base_url);
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url_for(&self, resource: Resource) -> String {
        format!("{}{}", self.base_url, resource.upstream_path())
    }
}

#[async_trait]
impl UpstreamSource for OpenF1Client {
    async fn fetch(&self, resource: Resource, query: QueryEnvelope) -> Option<Vec<Record>> {
        let url = self.url_for(resource);
        tracing::info!("Making request to: {} ({} params)", url, query.len());
        tracing::debug!("Query params: {:?}", query.to_pairs());

        let response = match self.client.get(&url).query(&query.to_pairs()).send().await {
            Ok(response) => response,
            Err(e) if e.is_timeout() => {
                tracing::error!("Request timeout for {}", url);
                return None;
            }
            Err(e) => {
                tracing::error!("Request failed: {}", e);
                return None;
            }
        };

        let status = response.status();
        if !status.is_success() {
            tracing::error!("Upstream {} responded with {}", url, status);
            return None;
        }

        match response.json::<Vec<Record>>().await {
            Ok(data) => {
                tracing::info!("Successfully retrieved {} records", data.len());
                Some(data)
            }
            Err(e) => {
                tracing::error!("Invalid JSON response from {}: {}", url, e);
                None
            }
        }
    }
}

/// Typed operations over any [`UpstreamSource`], one per resource.
///
/// `Err` means the query could not be built; `Ok(None)` is the upstream
/// absence signal.
#[async_trait]
pub trait OpenF1Api: UpstreamSource {
    async fn fetch_resource(
        &self,
        resource: Resource,
        required: Option<QueryValue>,
        filters: &(dyn QueryFilters + 'static),
    ) -> Result<Option<Vec<Record>>> {
        let query = resource.build_query(required, filters)?;
        Ok(self.fetch(resource, query).await)
    }

    async fn get_sessions(&self, filters: &SessionFilters) -> Result<Option<Vec<Record>>> {
        self.fetch_resource(Resource::Sessions, None, filters).await
    }

    async fn get_drivers(&self, filters: &DriverFilters) -> Result<Option<Vec<Record>>> {
        self.fetch_resource(Resource::Drivers, None, filters).await
    }

    async fn get_driver_by_number(
        &self,
        driver_number: u32,
        filters: &DriverFilters,
    ) -> Result<Option<Vec<Record>>> {
        self.fetch_resource(Resource::DriverByNumber, Some(driver_number.into()), filters)
            .await
    }

    /// Without a driver filter this can return 100k+ records.
    async fn get_location_data(
        &self,
        session_key: SessionKey,
        filters: &LocationFilters,
    ) -> Result<Option<Vec<Record>>> {
        self.fetch_resource(Resource::Location, Some(session_key.into()), filters)
            .await
    }

    async fn get_car_data(
        &self,
        session_key: SessionKey,
        filters: &CarDataFilters,
    ) -> Result<Option<Vec<Record>>> {
        self.fetch_resource(Resource::Telemetry, Some(session_key.into()), filters)
            .await
    }

    async fn get_laps(
        &self,
        session_key: SessionKey,
        filters: &LapFilters,
    ) -> Result<Option<Vec<Record>>> {
        self.fetch_resource(Resource::Laps, Some(session_key.into()), filters)
            .await
    }

    async fn get_positions(
        &self,
        session_key: SessionKey,
        filters: &PositionFilters,
    ) -> Result<Option<Vec<Record>>> {
        self.fetch_resource(Resource::Positions, Some(session_key.into()), filters)
            .await
    }

    async fn get_intervals(
        &self,
        session_key: SessionKey,
        filters: &DriverNumberFilter,
    ) -> Result<Option<Vec<Record>>> {
        self.fetch_resource(Resource::Intervals, Some(session_key.into()), filters)
            .await
    }

    async fn get_pit_stops(
        &self,
        session_key: SessionKey,
        filters: &DriverNumberFilter,
    ) -> Result<Option<Vec<Record>>> {
        self.fetch_resource(Resource::PitStops, Some(session_key.into()), filters)
            .await
    }

    async fn get_stints(
        &self,
        session_key: SessionKey,
        filters: &DriverNumberFilter,
    ) -> Result<Option<Vec<Record>>> {
        self.fetch_resource(Resource::Stints, Some(session_key.into()), filters)
            .await
    }
}

impl<T: UpstreamSource + ?Sized> OpenF1Api for T {}
