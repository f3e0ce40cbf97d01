//! Timestamp codec: wire timestamps <-> native time <-> stored datetimes.
//!
//! The wire type mirrors the protobuf well-known `Timestamp` and shares its
//! valid range (years 0001 through 9999). Stored datetimes have millisecond
//! precision, so sub-millisecond nanos do not survive a storage round trip.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// Seconds of `0001-01-01T00:00:00Z`.
const MIN_SECONDS: i64 = -62_135_596_800;
/// Seconds of `9999-12-31T23:59:59Z`.
const MAX_SECONDS: i64 = 253_402_300_799;
const NANOS_PER_SECOND: i32 = 1_000_000_000;

/// Wire timestamp: seconds since the Unix epoch plus non-negative nanos.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WireTimestamp {
    pub seconds: i64,
    pub nanos: i32,
}

impl WireTimestamp {
    pub fn new(seconds: i64, nanos: i32) -> Self {
        Self { seconds, nanos }
    }

    /// Current time as a wire timestamp.
    pub fn now() -> Self {
        Self::from(Utc::now())
    }

    fn validate(&self) -> DomainResult<()> {
        if self.seconds < MIN_SECONDS || self.seconds > MAX_SECONDS {
            return Err(DomainError::time_conversion(format!(
                "seconds {} out of range",
                self.seconds
            )));
        }
        if !(0..NANOS_PER_SECOND).contains(&self.nanos) {
            return Err(DomainError::time_conversion(format!(
                "nanos {} out of range",
                self.nanos
            )));
        }
        Ok(())
    }
}

/// Unchecked conversion, suitable for ordering comparisons. Use [`encode`]
/// when the result must be a valid wire value.
impl From<DateTime<Utc>> for WireTimestamp {
    fn from(time: DateTime<Utc>) -> Self {
        Self {
            seconds: time.timestamp(),
            nanos: time.timestamp_subsec_nanos() as i32,
        }
    }
}

/// Native time -> wire timestamp.
pub fn encode(time: DateTime<Utc>) -> DomainResult<WireTimestamp> {
    let ts = WireTimestamp::from(time);
    ts.validate()?;
    Ok(ts)
}

/// Wire timestamp -> native time.
pub fn decode(ts: &WireTimestamp) -> DomainResult<DateTime<Utc>> {
    ts.validate()?;
    DateTime::from_timestamp(ts.seconds, ts.nanos as u32)
        .ok_or_else(|| DomainError::time_conversion(format!("{ts:?} is not representable")))
}

/// Wire timestamp -> stored datetime.
pub fn to_storage(ts: &WireTimestamp) -> DomainResult<bson::DateTime> {
    decode(ts).map(bson::DateTime::from_chrono)
}

/// Wire timestamp -> stored datetime, substituting the current time when absent.
///
/// An explicitly set timestamp is always kept.
pub fn to_storage_or_now(field: &str, ts: Option<&WireTimestamp>) -> DomainResult<bson::DateTime> {
    match ts {
        Some(ts) => to_storage(ts),
        None => {
            tracing::debug!(field, "timestamp absent, defaulting to now");
            Ok(bson::DateTime::from_chrono(Utc::now()))
        }
    }
}

/// Stored datetime -> wire timestamp.
pub fn from_storage(dt: bson::DateTime) -> DomainResult<WireTimestamp> {
    encode(dt.to_chrono())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn encode_decode_round_trip_keeps_nanos() {
        let time = Utc.with_ymd_and_hms(2019, 11, 5, 14, 30, 0).unwrap()
            + chrono::Duration::nanoseconds(123_456_789);
        let ts = encode(time).unwrap();
        assert_eq!(ts.nanos, 123_456_789);
        assert_eq!(decode(&ts).unwrap(), time);
    }

    #[test]
    fn decode_rejects_out_of_range() {
        assert!(matches!(
            decode(&WireTimestamp::new(MAX_SECONDS + 1, 0)),
            Err(DomainError::TimeConversion(_))
        ));
        assert!(matches!(
            decode(&WireTimestamp::new(MIN_SECONDS - 1, 0)),
            Err(DomainError::TimeConversion(_))
        ));
        assert!(matches!(
            decode(&WireTimestamp::new(0, -1)),
            Err(DomainError::TimeConversion(_))
        ));
        assert!(matches!(
            decode(&WireTimestamp::new(0, NANOS_PER_SECOND)),
            Err(DomainError::TimeConversion(_))
        ));
        assert!(decode(&WireTimestamp::new(MAX_SECONDS, NANOS_PER_SECOND - 1)).is_ok());
    }

    #[test]
    fn encode_rejects_years_past_9999() {
        let time = Utc.with_ymd_and_hms(10_000, 1, 1, 0, 0, 0).unwrap();
        assert!(matches!(encode(time), Err(DomainError::TimeConversion(_))));
    }

    #[test]
    fn from_storage_rejects_unrepresentable_dates() {
        assert!(matches!(
            from_storage(bson::DateTime::MAX),
            Err(DomainError::TimeConversion(_))
        ));
    }

    #[test]
    fn storage_round_trip_truncates_to_millis() {
        let ts = WireTimestamp::new(1_573_000_000, 987_654_321);
        let stored = to_storage(&ts).unwrap();
        let back = from_storage(stored).unwrap();
        assert_eq!(back, WireTimestamp::new(1_573_000_000, 987_000_000));
    }

    #[test]
    fn absent_timestamp_defaults_to_now() {
        let before = Utc::now().timestamp_millis();
        let stored = to_storage_or_now("created_at", None).unwrap();
        let after = Utc::now().timestamp_millis();
        assert!(stored.timestamp_millis() >= before);
        assert!(stored.timestamp_millis() <= after);
    }

    #[test]
    fn explicit_timestamp_is_not_overwritten() {
        let ts = WireTimestamp::new(1_000_000_000, 0);
        let stored = to_storage_or_now("created_at", Some(&ts)).unwrap();
        assert_eq!(stored.timestamp_millis(), 1_000_000_000_000);
    }
}
