/// Rejected tuning values in a shading configuration.
///
/// Shading itself never fails; these errors only come out of `validate()` on
/// configuration objects, before any fragment is evaluated.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: f32 },
    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f32 },
    #[error("{field} must be finite")]
    NotFinite { field: &'static str },
    #[error("{field} must be a non-zero direction")]
    ZeroDirection { field: &'static str },
    #[error("{field} range is empty: min {min} >= max {max}")]
    EmptyRange {
        field: &'static str,
        min: f32,
        max: f32,
    },
}

impl ConfigError {
    pub fn ensure_positive(field: &'static str, value: f32) -> Result<(), Self> {
        Self::ensure_finite(field, value)?;
        if value > 0.0 {
            Ok(())
        } else {
            Err(Self::NotPositive { field, value })
        }
    }

    pub fn ensure_non_negative(field: &'static str, value: f32) -> Result<(), Self> {
        Self::ensure_finite(field, value)?;
        if value >= 0.0 {
            Ok(())
        } else {
            Err(Self::Negative { field, value })
        }
    }

    pub fn ensure_finite(field: &'static str, value: f32) -> Result<(), Self> {
        if value.is_finite() {
            Ok(())
        } else {
            Err(Self::NotFinite { field })
        }
    }

    pub fn ensure_range(field: &'static str, min: f32, max: f32) -> Result<(), Self> {
        Self::ensure_finite(field, min)?;
        Self::ensure_finite(field, max)?;
        if min < max {
            Ok(())
        } else {
            Err(Self::EmptyRange { field, min, max })
        }
    }
}
