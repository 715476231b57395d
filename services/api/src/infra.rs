use chrono::{NaiveDate, NaiveTime};
use hirenova::screening::{MockAnalysisService, ScreeningSession};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) sessions: SessionStore,
    pub(crate) analysis: MockAnalysisService,
}

/// In-memory session registry. Sessions live for the process lifetime; there
/// is no persistence and no eviction in the demo.
#[derive(Default, Clone)]
pub(crate) struct SessionStore {
    sessions: Arc<Mutex<HashMap<String, ScreeningSession>>>,
}

static SESSION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_session_id() -> String {
    let id = SESSION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    format!("scr-{id:06}")
}

impl SessionStore {
    pub(crate) fn create(&self) -> String {
        let id = next_session_id();
        let mut guard = self.sessions.lock().expect("session mutex poisoned");
        guard.insert(id.clone(), ScreeningSession::new());
        id
    }

    /// Run `action` against one session under the store lock. The lock is
    /// never held across an await; async work happens between two calls.
    pub(crate) fn with_session<T>(
        &self,
        id: &str,
        action: impl FnOnce(&mut ScreeningSession) -> T,
    ) -> Option<T> {
        let mut guard = self.sessions.lock().expect("session mutex poisoned");
        guard.get_mut(id).map(action)
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn parse_time(raw: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(raw.trim(), "%H:%M")
        .map_err(|err| format!("failed to parse '{raw}' as HH:MM ({err})"))
}

pub(crate) fn deserialize_optional_date<'de, D>(
    deserializer: D,
) -> Result<Option<NaiveDate>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    opt.map(|value| parse_date(&value).map_err(serde::de::Error::custom))
        .transpose()
}

pub(crate) fn deserialize_optional_time<'de, D>(
    deserializer: D,
) -> Result<Option<NaiveTime>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    opt.map(|value| parse_time(&value).map_err(serde::de::Error::custom))
        .transpose()
}
