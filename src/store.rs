use std::sync::RwLock;

use chrono::Utc;
use log::debug;
use serde_json::{Map, Value};

use crate::models::CatchRecord;

const POISONED: &str = "a writer crashed while holding the log lock";

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Could not access the catch log: {0}")]
    Unavailable(&'static str),
}

/// A freshly appended record together with the log size after the append.
#[derive(Debug, Clone)]
pub struct Logged {
    pub record: CatchRecord,
    pub total: usize,
}

/// The in-memory catch log.
///
/// Records live for the lifetime of the process and are never removed or
/// rewritten. All mutation funnels through [`append`](CatchLog::append),
/// which serializes writers behind one lock: concurrent appends cannot
/// interleave, lose writes, or hand out the same id.
#[derive(Debug, Default)]
pub struct CatchLog {
    inner: RwLock<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    records: Vec<CatchRecord>,
    last_id: i64,
}

impl CatchLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a catch and hand back the stored record.
    ///
    /// `id` and `logged_at` are assigned here; client-supplied values for
    /// either are discarded. Ids are millisecond timestamps bumped past the
    /// previous id, so they stay unique and strictly increasing even when
    /// two appends land in the same millisecond.
    pub fn append(&self, mut fields: Map<String, Value>) -> Result<Logged, Error> {
        // a leftover client id or logged_at would duplicate the flattened
        // field on the wire
        fields.remove("id");
        fields.remove("logged_at");

        let logged_at = Utc::now();

        let mut inner = self.inner.write().map_err(|_| Error::Unavailable(POISONED))?;
        let id = logged_at.timestamp_millis().max(inner.last_id + 1);
        inner.last_id = id;

        let record = CatchRecord {
            id,
            logged_at,
            fields,
        };
        inner.records.push(record.clone());

        debug!("logged catch {id}, {} total", inner.records.len());

        Ok(Logged {
            record,
            total: inner.records.len(),
        })
    }

    /// All records, newest `date` first.
    ///
    /// The sort is stable: records sharing a date keep their insertion
    /// order, and records without a parseable date land after all dated
    /// ones, also in insertion order. The log itself is left untouched.
    pub fn list(&self) -> Result<Vec<CatchRecord>, Error> {
        let inner = self.inner.read().map_err(|_| Error::Unavailable(POISONED))?;

        let mut records = inner.records.clone();
        records.sort_by(|a, b| b.date_key().cmp(&a.date_key()));

        Ok(records)
    }

    pub fn len(&self) -> Result<usize, Error> {
        let inner = self.inner.read().map_err(|_| Error::Unavailable(POISONED))?;

        Ok(inner.records.len())
    }

    pub fn is_empty(&self) -> Result<bool, Error> {
        Ok(self.len()? == 0)
    }
}
