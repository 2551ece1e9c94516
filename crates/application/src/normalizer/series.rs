//! Ordered observation series and "current entry" selection

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use domain::CanonicalObservation;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{NormalizeError, NormalizeOptions, aliases, json_kind, normalize_map};

/// One normalized entry of a series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesEntry {
    /// Key of the entry in a day-keyed payload, `None` for array items
    pub key: Option<String>,
    /// The normalized observation
    pub observation: CanonicalObservation,
}

impl SeriesEntry {
    /// Parsed observation time, if the timestamp is recognizable
    pub fn time(&self) -> Option<DateTime<Utc>> {
        self.observation.timestamp.as_deref().and_then(parse_timestamp)
    }
}

/// Observations in display order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObservationSeries {
    entries: Vec<SeriesEntry>,
}

impl ObservationSeries {
    /// Read any supported payload shape with default options
    pub fn from_payload(payload: &Value) -> Result<Self, NormalizeError> {
        Self::from_payload_with(payload, &NormalizeOptions::default())
    }

    /// Read any supported payload shape
    ///
    /// Recognized, in this order: a `time_series` member, an
    /// `observation` / `observations` envelope, a day-keyed map, a flat
    /// observation. Arrays keep their order; day-keyed maps are sorted by
    /// key.
    pub fn from_payload_with(
        payload: &Value,
        options: &NormalizeOptions,
    ) -> Result<Self, NormalizeError> {
        match payload {
            Value::Array(items) => Self::from_array(items, options),
            Value::Object(map) => Self::from_object(map, options),
            other => Err(NormalizeError::Malformed(format!(
                "expected an object or array, got {}",
                json_kind(other)
            ))),
        }
    }

    /// Build from already-unwrapped observation maps
    pub fn from_observations<'a>(
        observations: impl IntoIterator<Item = &'a Map<String, Value>>,
        options: &NormalizeOptions,
    ) -> Self {
        let entries = observations
            .into_iter()
            .map(|raw| SeriesEntry {
                key: None,
                observation: normalize_map(raw, options),
            })
            .collect();
        Self { entries }
    }

    fn from_array(items: &[Value], options: &NormalizeOptions) -> Result<Self, NormalizeError> {
        let entries = items
            .iter()
            .enumerate()
            .map(|(i, item)| match item {
                Value::Object(raw) => Ok(SeriesEntry {
                    key: None,
                    observation: normalize_map(raw, options),
                }),
                other => Err(NormalizeError::Malformed(format!(
                    "series item {i} is {}",
                    json_kind(other)
                ))),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { entries })
    }

    fn from_object(
        map: &Map<String, Value>,
        options: &NormalizeOptions,
    ) -> Result<Self, NormalizeError> {
        if let Some(inner) = map.get("time_series") {
            return Self::from_payload_with(inner, options);
        }
        if let Some(Value::Object(raw)) = map.get("observation") {
            return Ok(Self::from_observations([raw], options));
        }
        if let Some(Value::Array(items)) = map.get("observations") {
            return Self::from_array(items, options);
        }
        if map.is_empty() {
            return Ok(Self::default());
        }
        if is_day_keyed(map) {
            return Ok(Self::from_day_keyed(map, options));
        }
        Ok(Self::from_observations([map], options))
    }

    fn from_day_keyed(map: &Map<String, Value>, options: &NormalizeOptions) -> Self {
        let mut keyed: Vec<(&String, &Map<String, Value>)> = map
            .iter()
            .filter_map(|(k, v)| v.as_object().map(|o| (k, o)))
            .collect();
        keyed.sort_by(|a, b| a.0.cmp(b.0));

        let entries = keyed
            .into_iter()
            .map(|(key, raw)| {
                let mut observation = normalize_map(raw, options);
                if aliases::lookup_value(raw, aliases::TIMESTAMP).is_none() {
                    observation.timestamp = Some(key.clone());
                }
                SeriesEntry {
                    key: Some(key.clone()),
                    observation,
                }
            })
            .collect();
        Self { entries }
    }

    /// All entries in order
    pub fn entries(&self) -> &[SeriesEntry] {
        &self.entries
    }

    /// Consume into the entries
    pub fn into_entries(self) -> Vec<SeriesEntry> {
        self.entries
    }

    /// Observations in order
    pub fn observations(&self) -> impl Iterator<Item = &CanonicalObservation> {
        self.entries.iter().map(|e| &e.observation)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the series has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First entry in series order
    pub fn first(&self) -> Option<&SeriesEntry> {
        self.entries.first()
    }

    /// Entry nearest to `now`
    ///
    /// Ties go to the earlier entry. Entries without a parseable timestamp
    /// are skipped; if none parses, the first entry is returned.
    pub fn current_at(&self, now: DateTime<Utc>) -> Option<&SeriesEntry> {
        let mut best: Option<(&SeriesEntry, DateTime<Utc>, i64)> = None;

        for entry in &self.entries {
            let Some(time) = entry.time() else {
                continue;
            };
            let distance = (time - now).num_milliseconds().abs();
            let better = match best {
                None => true,
                Some((_, best_time, best_distance)) => {
                    distance < best_distance || (distance == best_distance && time < best_time)
                },
            };
            if better {
                best = Some((entry, time, distance));
            }
        }

        best.map(|(entry, ..)| entry).or_else(|| self.first())
    }
}

/// Keys like `2024-01-01T00:00` or `2024-01-01`
fn is_day_keyed(map: &Map<String, Value>) -> bool {
    map.iter()
        .all(|(key, value)| value.is_object() && starts_with_date(key))
}

fn starts_with_date(key: &str) -> bool {
    key.get(..10)
        .is_some_and(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").is_ok())
}

/// Parse the timestamp formats seen upstream
///
/// Strings without an offset are taken as UTC.
pub(crate) fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    const NAIVE_FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
    ];
    if let Some(naive) = NAIVE_FORMATS
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(s, f).ok())
    {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
