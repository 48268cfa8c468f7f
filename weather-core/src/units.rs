use std::{fmt, str::FromStr};

use chrono::{DateTime, Local, TimeZone};

const KELVIN_OFFSET: f64 = 273.15;

const COMPASS_POINTS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

const SECTOR_WIDTH: f64 = 22.5;

/// Date format used for forecast day headings, e.g. "Monday, 19 Oct 2026".
pub const DAY_FORMAT: &str = "%A, %d %b %Y";

/// Timestamp format used in the report header.
pub const HEADER_TIMESTAMP_FORMAT: &str = "%d %b %Y | %I:%M:%S %p";

/// Temperature scale applied to every value of a single report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemperatureUnit {
    Celsius,
    Fahrenheit,
}

impl TemperatureUnit {
    pub fn symbol(&self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "°C",
            TemperatureUnit::Fahrenheit => "°F",
        }
    }
}

impl fmt::Display for TemperatureUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Returned when the selected unit is neither `C` nor `F`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown temperature unit '{0}'. Expected 'C' or 'F'.")]
pub struct ParseUnitError(pub String);

impl FromStr for TemperatureUnit {
    type Err = ParseUnitError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "C" => Ok(TemperatureUnit::Celsius),
            "F" => Ok(TemperatureUnit::Fahrenheit),
            _ => Err(ParseUnitError(value.to_string())),
        }
    }
}

/// Convert a Kelvin reading into a display string such as `"21.9°C"`.
pub fn convert_temperature(kelvin: f64, unit: TemperatureUnit) -> String {
    let celsius = kelvin - KELVIN_OFFSET;
    let value = match unit {
        TemperatureUnit::Celsius => celsius,
        TemperatureUnit::Fahrenheit => celsius * 9.0 / 5.0 + 32.0,
    };

    format!("{value:.1}{}", unit.symbol())
}

/// Map a meteorological wind bearing onto one of the 16 compass points.
///
/// Each sector is centred on a multiple of 22.5°, so `N` covers (348.75, 11.25).
/// Values outside `[0, 360)` are wrapped rather than rejected.
pub fn wind_degree_to_direction(degrees: f64) -> &'static str {
    let normalized = degrees.rem_euclid(360.0);
    let index = ((normalized + SECTOR_WIDTH / 2.0) / SECTOR_WIDTH) as usize % COMPASS_POINTS.len();
    COMPASS_POINTS[index]
}

/// Render epoch seconds as a calendar day in the host time zone.
pub fn unix_timestamp_to_local_time(epoch_seconds: i64) -> String {
    match Local.timestamp_opt(epoch_seconds, 0).single() {
        Some(dt) => dt.format(DAY_FORMAT).to_string(),
        None => epoch_seconds.to_string(),
    }
}

pub fn local_timestamp(now: DateTime<Local>) -> String {
    now.format(HEADER_TIMESTAMP_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numeric_part(rendered: &str) -> f64 {
        rendered
            .trim_end_matches("°C")
            .trim_end_matches("°F")
            .parse()
            .expect("rendered temperature must start with a number")
    }

    #[test]
    fn parses_unit_case_insensitively() {
        assert_eq!("c".parse::<TemperatureUnit>(), Ok(TemperatureUnit::Celsius));
        assert_eq!("F".parse::<TemperatureUnit>(), Ok(TemperatureUnit::Fahrenheit));
        assert_eq!(" f ".parse::<TemperatureUnit>(), Ok(TemperatureUnit::Fahrenheit));
    }

    #[test]
    fn rejects_unknown_units() {
        for input in ["K", "", "celsius", "CF"] {
            let err = input.parse::<TemperatureUnit>().unwrap_err();
            assert_eq!(err.0, input);
        }
    }

    #[test]
    fn converts_known_points() {
        assert_eq!(convert_temperature(273.15, TemperatureUnit::Celsius), "0.0°C");
        assert_eq!(convert_temperature(273.15, TemperatureUnit::Fahrenheit), "32.0°F");
        assert_eq!(convert_temperature(373.15, TemperatureUnit::Fahrenheit), "212.0°F");
        assert_eq!(convert_temperature(0.0, TemperatureUnit::Celsius), "-273.1°C");
    }

    #[test]
    fn fahrenheit_tracks_celsius_linearly() {
        for kelvin in [0.0, 100.0, 250.37, 273.15, 295.5, 310.98, 1000.0] {
            let c = numeric_part(&convert_temperature(kelvin, TemperatureUnit::Celsius));
            let f = numeric_part(&convert_temperature(kelvin, TemperatureUnit::Fahrenheit));
            let expected = c * 9.0 / 5.0 + 32.0;
            assert!((f - expected).abs() <= 0.2, "kelvin={kelvin} c={c} f={f}");
        }
    }

    #[test]
    fn cardinal_directions() {
        assert_eq!(wind_degree_to_direction(0.0), "N");
        assert_eq!(wind_degree_to_direction(90.0), "E");
        assert_eq!(wind_degree_to_direction(180.0), "S");
        assert_eq!(wind_degree_to_direction(270.0), "W");
    }

    #[test]
    fn sector_boundaries() {
        assert_eq!(wind_degree_to_direction(11.0), "N");
        assert_eq!(wind_degree_to_direction(12.0), "NNE");
        assert_eq!(wind_degree_to_direction(349.0), "N");
        assert_eq!(wind_degree_to_direction(348.0), "NNW");
        assert_eq!(wind_degree_to_direction(225.0), "SW");
    }

    #[test]
    fn directions_are_periodic() {
        for step in 0..32_u32 {
            let degrees = f64::from(step) * 11.0;
            let expected = wind_degree_to_direction(degrees);
            for n in [-2.0, -1.0, 1.0, 3.0] {
                assert_eq!(wind_degree_to_direction(degrees + 360.0 * n), expected);
            }
        }
    }

    #[test]
    fn local_day_matches_chrono_rendering() {
        let epoch = 1_700_000_000;
        let expected = Local
            .timestamp_opt(epoch, 0)
            .single()
            .expect("valid epoch")
            .format(DAY_FORMAT)
            .to_string();

        assert_eq!(unix_timestamp_to_local_time(epoch), expected);
        assert!(expected.contains("2023"));
    }

    #[test]
    fn unrepresentable_epoch_falls_back_to_number() {
        assert_eq!(unix_timestamp_to_local_time(i64::MAX), i64::MAX.to_string());
    }
}
