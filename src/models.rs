use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

/// A logged catch: whatever fields the angler submitted plus the two
/// server-assigned ones.
///
/// Client fields are carried verbatim and flattened back into the same JSON
/// object on the wire, so a record round-trips whatever shape the caller
/// logged it with.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatchRecord {
    pub id: i64,
    #[serde(serialize_with = "iso8601_millis")]
    pub logged_at: DateTime<Utc>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl CatchRecord {
    /// Sort key for listings: the `date` field parsed as `YYYY-MM-DD`.
    /// Records without a usable date have no key and list after dated ones.
    pub fn date_key(&self) -> Option<NaiveDate> {
        self.fields
            .get("date")
            .and_then(Value::as_str)
            .and_then(parse_date)
    }

    pub fn species(&self) -> Option<&str> {
        self.fields.get("species").and_then(Value::as_str)
    }
}

/// Parse a `YYYY-MM-DD` date, tolerating surrounding whitespace.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d").ok()
}

// `2024-01-15T07:30:00.250Z`, the format javascript clients produce
fn iso8601_millis<S>(timestamp: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&timestamp.to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// A bite forecast for one location and day.
#[derive(Debug, Clone, Serialize)]
pub struct Forecast {
    pub location: String,
    pub forecast_date: NaiveDate,
    pub bite_score: f64,
    pub activity_level: String,
    pub conditions: String,
    pub moon_phase: String,
    pub best_times: Vec<String>,
    pub recommendations: String,
    pub water_temp: String,
    pub barometric_pressure: String,
}
