use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use std::str::FromStr;

/// A raw JSON scalar the way brokers actually send them: sometimes a number,
/// sometimes a decimal string, occasionally junk.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawScalar {
    Num(f64),
    Str(String),
    Other(serde_json::Value),
}

/// Signed decimal that may arrive as a number or a numeric string.
/// Non-numeric input coerces to `None` — one bad amount must not
/// fail the whole payload.
pub(crate) fn flexible_amount<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawScalar>::deserialize(deserializer)?;
    Ok(match raw {
        Some(RawScalar::Num(n)) => Decimal::from_f64_retain(n),
        Some(RawScalar::Str(s)) => Decimal::from_str(s.trim()).ok(),
        _ => None,
    })
}

/// Epoch seconds that may arrive as a number, a numeric string, or an
/// RFC 3339 timestamp. Unparseable input coerces to `None`.
pub(crate) fn flexible_epoch_seconds<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawScalar>::deserialize(deserializer)?;
    Ok(match raw {
        Some(RawScalar::Num(n)) => Some(n as i64),
        Some(RawScalar::Str(s)) => parse_time_str(s.trim()).map(|dt| dt.timestamp()),
        _ => None,
    })
}

/// Timestamp that may arrive as RFC 3339 or numeric epoch seconds
/// (possibly fractional). Unparseable input coerces to `None`.
pub(crate) fn flexible_datetime<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawScalar>::deserialize(deserializer)?;
    Ok(match raw {
        Some(RawScalar::Num(n)) => epoch_seconds_to_datetime(n),
        Some(RawScalar::Str(s)) => parse_time_str(s.trim()),
        _ => None,
    })
}

fn parse_time_str(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    // Some feeds send epoch seconds as a string ("1700000000.000000")
    s.parse::<f64>().ok().and_then(epoch_seconds_to_datetime)
}

fn epoch_seconds_to_datetime(secs: f64) -> Option<DateTime<Utc>> {
    if !secs.is_finite() {
        return None;
    }
    DateTime::<Utc>::from_timestamp_millis((secs * 1000.0).round() as i64)
}
