/// Lower bound of the comparison scale shared by profiles and fingerprints.
pub const SCALE_MIN: f64 = -100.0;

/// Upper bound of the comparison scale.
pub const SCALE_MAX: f64 = 100.0;

/// Value reported for a trait whose achievable range has no width.
pub const SCALE_NEUTRAL: f64 = 0.0;

/// Midpoint of a 1..5 fingerprint scale.
pub const LIKERT_NEUTRAL: f64 = 3.0;

/// Multiplier taking a centered 1..5 value onto the comparison scale.
pub const LIKERT_STEP: f64 = 50.0;

/// Default spread the balancer rescales every trait towards.
pub const DEFAULT_TARGET_STD_DEV: f64 = 2.2;

/// Default symmetric clamp applied to rescaled answer scores.
pub const DEFAULT_CLAMP_LIMIT: i32 = 5;

pub const DEFAULT_TIE_RATIO: f64 = 0.95;
pub const DEFAULT_SKEW_WEIGHT: f64 = 0.05;
pub const DEFAULT_SECONDARY_COUNT: usize = 3;

pub const DEFAULT_DELIMITER: char = '_';
pub const DEFAULT_PAD_WIDTH: usize = 2;

/// Decimal places kept by the audit's per-question mean report.
pub const AUDIT_MEAN_DECIMALS: u32 = 3;

/// Decimal places kept on summed score ranges.
pub const RANGE_DECIMALS: u32 = 2;
