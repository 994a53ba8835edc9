use thiserror::Error;

/// Problems found while validating a scene tree loaded from outside.
///
/// The distance functions themselves are total; these checks exist so bad
/// parameters are rejected once at load time instead of producing NaNs in
/// the march loop.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    #[error("{op}: {field} must be finite")]
    NonFinite { op: &'static str, field: &'static str },
    #[error("{op}: {field} must be positive, got {value}")]
    NonPositive {
        op: &'static str,
        field: &'static str,
        value: f32,
    },
    #[error("{op}: smooth radius must be zero (hard) or positive, got {value}")]
    NegativeSmoothing { op: &'static str, value: f32 },
}
