use async_trait::async_trait;
use chrono::Utc;

use crate::models::Forecast;

/// Location to report when the client names none.
pub const DEFAULT_LOCATION: &str = "Unknown Location";

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("could not produce a forecast: {0}")]
    Unavailable(String),
}

/// Produces the bite forecast for a named location.
#[async_trait]
pub trait ForecastProvider: Send + Sync {
    async fn forecast(&self, location: &str) -> Result<Forecast, Error>;
}

/// Fixed demo forecast: conditions are always excellent, only the location
/// and the date vary.
#[derive(Debug, Default, Clone, Copy)]
pub struct CannedForecast;

#[async_trait]
impl ForecastProvider for CannedForecast {
    async fn forecast(&self, location: &str) -> Result<Forecast, Error> {
        Ok(Forecast {
            location: location.to_string(),
            forecast_date: Utc::now().date_naive(),
            bite_score: 8.5,
            activity_level: "Excellent".to_string(),
            conditions: "Partly cloudy with light winds".to_string(),
            moon_phase: "Waxing Gibbous".to_string(),
            best_times: vec!["6:00-8:00 AM".to_string(), "6:30-8:30 PM".to_string()],
            recommendations: "Prime fishing conditions! Fish are likely to be very active."
                .to_string(),
            water_temp: "68°F".to_string(),
            barometric_pressure: "30.15 inHg".to_string(),
        })
    }
}
