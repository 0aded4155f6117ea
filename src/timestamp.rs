//! Timestamps as f64 seconds relative to 1970-01-01T00:00:00Z.
//!
//! Both `SystemTime` and `chrono::DateTime<Utc>` use the same encoding and the
//! same graph schema, so a value written as one decodes as the other.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use chrono::{DateTime, Utc};

use crate::codec::reader::Reader;
use crate::codec::schema::Schema;
use crate::codec::wire::put_le;
use crate::error::{DecodeError, GraphError};
use crate::traits::{Convertible, Element};

const NANOS_PER_SEC: f64 = 1_000_000_000.0;

/// Conversion between a timestamp type and its epoch offset in seconds.
pub trait EpochOffset: Sized {
    /// Seconds since the epoch, negative before it.
    fn epoch_seconds(&self) -> f64;

    /// `None` if `secs` is not finite or outside the type's range.
    fn from_epoch_seconds(secs: f64) -> Option<Self>;
}

impl EpochOffset for SystemTime {
    fn epoch_seconds(&self) -> f64 {
        match self.duration_since(UNIX_EPOCH) {
            Ok(after) => after.as_secs_f64(),
            Err(before) => -before.duration().as_secs_f64(),
        }
    }

    fn from_epoch_seconds(secs: f64) -> Option<Self> {
        let offset = Duration::try_from_secs_f64(secs.abs()).ok()?;
        if secs.is_sign_negative() {
            UNIX_EPOCH.checked_sub(offset)
        } else {
            UNIX_EPOCH.checked_add(offset)
        }
    }
}

impl EpochOffset for DateTime<Utc> {
    fn epoch_seconds(&self) -> f64 {
        self.timestamp() as f64 + self.timestamp_subsec_nanos() as f64 / NANOS_PER_SEC
    }

    fn from_epoch_seconds(secs: f64) -> Option<Self> {
        if !secs.is_finite() {
            return None;
        }
        let whole = secs.floor();
        if whole < i64::MIN as f64 || whole >= i64::MAX as f64 {
            return None;
        }
        let mut whole = whole as i64;
        let mut nanos = ((secs - secs.floor()) * NANOS_PER_SEC).round() as u32;
        if nanos >= 1_000_000_000 {
            whole = whole.checked_add(1)?;
            nanos -= 1_000_000_000;
        }
        DateTime::from_timestamp(whole, nanos)
    }
}

macro_rules! impl_timestamp {
    ($($ty:ty => $name:literal),* $(,)?) => {$(
        impl Convertible for $ty {
            fn to_bytes(&self) -> Vec<u8> {
                self.epoch_seconds().to_bytes()
            }

            fn from_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
                let secs = f64::from_bytes(bytes)?;
                <$ty>::from_epoch_seconds(secs)
                    .ok_or(DecodeError::OutOfRange { type_name: $name })
            }
        }

        impl Element for $ty {
            fn schema() -> Schema {
                Schema::Timestamp
            }

            fn encode_payload(&self, out: &mut Vec<u8>) {
                put_le(out, self.epoch_seconds().to_bits().to_le_bytes());
            }

            fn decode_payload(r: &mut Reader<'_>, _encoded: &Schema) -> Result<Self, GraphError> {
                let secs = f64::from_bits(u64::from_le_bytes(r.read_array()?));
                <$ty>::from_epoch_seconds(secs).ok_or(GraphError::OutOfRange($name))
            }
        }
    )*};
}

impl_timestamp! {
    SystemTime => "SystemTime",
    DateTime<Utc> => "DateTime<Utc>",
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_epoch_is_zero() {
        assert_eq!(UNIX_EPOCH.to_bytes(), 0f64.to_bytes());
        let epoch = DateTime::from_timestamp(0, 0).unwrap();
        assert_eq!(epoch.to_bytes(), 0f64.to_bytes());
    }

    #[test]
    fn test_before_epoch() {
        let before = UNIX_EPOCH - Duration::from_millis(1500);
        assert_eq!(before.epoch_seconds(), -1.5);
        assert_eq!(SystemTime::from_bytes(&before.to_bytes()).unwrap(), before);
    }

    #[test]
    fn test_chrono_negative_fraction() {
        let dt = DateTime::<Utc>::from_epoch_seconds(-0.25).unwrap();
        assert_eq!(dt.timestamp(), -1);
        assert_eq!(dt.timestamp_subsec_nanos(), 750_000_000);
        assert_eq!(dt.epoch_seconds(), -0.25);
    }

    #[test]
    fn test_non_finite_rejected() {
        assert_eq!(
            SystemTime::from_bytes(&f64::NAN.to_bytes()),
            Err(DecodeError::OutOfRange {
                type_name: "SystemTime"
            })
        );
        assert_eq!(
            DateTime::<Utc>::from_bytes(&f64::INFINITY.to_bytes()),
            Err(DecodeError::OutOfRange {
                type_name: "DateTime<Utc>"
            })
        );
    }

    #[test]
    fn test_wrong_size() {
        assert_eq!(
            SystemTime::from_bytes(&[0u8; 4]),
            Err(DecodeError::SizeMismatch {
                expected: 8,
                actual: 4
            })
        );
    }
}
