//! Validated rating value.

use serde::{Deserialize, Serialize};

/// Error for rating values outside the accepted range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("rating value must be an integer between 1 and 5, got {0}")]
pub struct RatingValueError(pub i64);

/// A star rating, guaranteed to be an integer in `1..=5`.
///
/// Construction goes through [`RatingValue::new`] (or serde, which uses
/// the same check via `TryFrom`), so an out-of-range value cannot exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct RatingValue(i64);

impl RatingValue {
    pub const MIN: i64 = 1;
    pub const MAX: i64 = 5;

    /// Create a rating value, checking the `1..=5` range.
    ///
    /// # Errors
    ///
    /// Returns `RatingValueError` if `value` is outside `1..=5`.
    pub const fn new(value: i64) -> Result<Self, RatingValueError> {
        if value >= Self::MIN && value <= Self::MAX {
            Ok(Self(value))
        } else {
            Err(RatingValueError(value))
        }
    }

    /// Get the underlying integer value.
    #[must_use]
    pub const fn get(&self) -> i64 {
        self.0
    }
}

impl TryFrom<i64> for RatingValue {
    type Error = RatingValueError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RatingValue> for i64 {
    fn from(value: RatingValue) -> Self {
        value.0
    }
}

impl std::fmt::Display for RatingValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_full_range() {
        for v in 1..=5 {
            assert_eq!(RatingValue::new(v).unwrap().get(), v);
        }
    }

    #[test]
    fn test_rejects_out_of_range() {
        assert_eq!(RatingValue::new(0), Err(RatingValueError(0)));
        assert_eq!(RatingValue::new(6), Err(RatingValueError(6)));
        assert_eq!(RatingValue::new(-3), Err(RatingValueError(-3)));
    }

    #[test]
    fn test_serde_validates() {
        let ok: RatingValue = serde_json::from_str("4").unwrap();
        assert_eq!(ok.get(), 4);
        assert!(serde_json::from_str::<RatingValue>("6").is_err());
        assert!(serde_json::from_str::<RatingValue>("0").is_err());
    }
}
