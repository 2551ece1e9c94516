//! Text rendering for command output

use std::fmt::Write;

use application::{ConditionsSnapshot, SeriesEntry};
use domain::{ActivityPlace, Bearing, CanonicalObservation};

/// One-line place description
pub fn place_line(place: &ActivityPlace) -> String {
    let mut out = format!("{:>6}  {}", place.id.value(), place.name);
    match (&place.municipality, &place.state) {
        (Some(m), Some(s)) => {
            let _ = write!(out, " ({m}, {s})");
        },
        (Some(x), None) | (None, Some(x)) => {
            let _ = write!(out, " ({x})");
        },
        (None, None) => {},
    }
    out
}

/// Multi-line observation block
pub fn observation(obs: &CanonicalObservation) -> String {
    let mut out = String::new();
    let bearing = obs.wind_bearing();

    if let Some(ts) = &obs.timestamp {
        let _ = writeln!(out, "  time      {ts}");
    }
    let _ = writeln!(
        out,
        "  wind      {:.1} m/s ({:.1} kn, {}) from {} {:.0}°",
        obs.wind_speed_ms,
        obs.wind_speed_knots(),
        obs.wind_band(),
        bearing.compass_point(),
        bearing.degrees()
    );
    let _ = writeln!(
        out,
        "  gust      {:.1} m/s ({:.1} kn)",
        obs.gust_speed_ms,
        obs.gust_speed_knots()
    );
    optional_line(&mut out, "temp", obs.temperature_c, "°C");
    optional_line(&mut out, "humidity", obs.humidity_pct, "%");
    optional_line(&mut out, "pressure", obs.pressure_hpa, " hPa");
    let _ = writeln!(out, "  rain      {:.1} mm", obs.precipitation_mm);
    if let Some(hs) = obs.wave_height_m {
        let _ = writeln!(out, "  waves     {hs:.1} m ({})", obs.wave_band());
    }
    optional_line(&mut out, "period", obs.wave_period_s, " s");
    if let Some(dp) = obs.wave_direction_deg {
        let _ = writeln!(out, "  swell dir {}", Bearing::new(dp));
    }
    optional_line(&mut out, "tide", obs.tide_m, " m");
    optional_line(&mut out, "water", obs.water_temperature_c, "°C");
    optional_line(&mut out, "uv", obs.uv_index, "");
    optional_line(&mut out, "solar", obs.solar_radiation_wm2, " W/m²");
    out
}

fn optional_line(out: &mut String, label: &str, value: Option<f64>, unit: &str) {
    if let Some(v) = value {
        let _ = writeln!(out, "  {label:<9} {v:.1}{unit}");
    }
}

/// Snapshot header plus the current entry
pub fn snapshot(snapshot: &ConditionsSnapshot) -> String {
    let mut out = match &snapshot.place {
        Some(place) => format!("{}\n", place_line(place)),
        None => format!("Location {}\n", snapshot.location_id),
    };
    let _ = writeln!(out, "  source    {}", snapshot.source_url);
    let _ = writeln!(out, "  entries   {}", snapshot.series.len());
    out.push_str(&observation(&snapshot.current));
    out
}

/// One line per series entry
pub fn series(entries: &[SeriesEntry]) -> String {
    let mut out = String::new();
    for entry in entries {
        let time = entry
            .observation
            .timestamp
            .as_deref()
            .or(entry.key.as_deref())
            .unwrap_or("-");
        let _ = writeln!(out, "{time:<20} {}", entry.observation.summary());
    }
    out
}

#[cfg(test)]
mod tests {
    use domain::LocationId;

    use super::*;

    #[test]
    fn place_line_includes_region() {
        let mut place = ActivityPlace::new(LocationId::new(2535), "Joaquina");
        place.municipality = Some("Florianópolis".into());
        place.state = Some("SC".into());
        assert_eq!(place_line(&place), "  2535  Joaquina (Florianópolis, SC)");
    }

    #[test]
    fn observation_skips_missing_fields() {
        let obs = CanonicalObservation {
            wind_speed_ms: 5.0,
            wind_direction_deg: 90.0,
            ..CanonicalObservation::default()
        };
        let text = observation(&obs);
        assert!(text.contains("from E 90°"));
        assert!(!text.contains("waves"));
        assert!(!text.contains("temp"));
    }

    #[test]
    fn series_falls_back_to_key() {
        let entries = vec![SeriesEntry {
            key: Some("2024-01-01".into()),
            observation: CanonicalObservation::default(),
        }];
        assert!(series(&entries).starts_with("2024-01-01"));
    }
}
