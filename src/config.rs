use crate::consts::*;
use crate::error::{TfResult, TraitForgeError};
use clap::{parser::ValueSource, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use strum_macros::{Display, EnumIter, EnumString};

#[derive(Args, Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    #[command(flatten)]
    pub balance: BalanceParams,
    #[command(flatten)]
    pub matching: MatchParams,
    #[command(flatten)]
    pub codec: CodecParams,
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BalanceParams {
    #[arg(long, default_value_t = DEFAULT_TARGET_STD_DEV)]
    pub target_std_dev: f64,
    #[arg(long, default_value_t = DEFAULT_CLAMP_LIMIT)]
    pub clamp_limit: i32,
    // Rounding after the first centering pass
    #[arg(long, default_value_t = 2)]
    pub center_decimals: u32,
    // Rounding after the final re-centering pass
    #[arg(long, default_value_t = 1)]
    pub final_decimals: u32,
}

impl BalanceParams {
    pub fn validate(&self) -> TfResult<()> {
        if !(self.target_std_dev > 0.0) {
            return Err(TraitForgeError::Config(format!(
                "target_std_dev must be positive, got {}",
                self.target_std_dev
            )));
        }
        if self.clamp_limit < 0 {
            return Err(TraitForgeError::Config(format!(
                "clamp_limit must not be negative, got {}",
                self.clamp_limit
            )));
        }
        Ok(())
    }
}

impl Default for BalanceParams {
    fn default() -> Self {
        Self {
            target_std_dev: DEFAULT_TARGET_STD_DEV,
            clamp_limit: DEFAULT_CLAMP_LIMIT,
            center_decimals: 2,
            final_decimals: 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumIter, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Metric {
    /// Lower is better.
    Euclidean,
    /// Higher is better. Enables tie detection.
    Cosine,
}

/// Scale the archetype fingerprints are authored on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumIter, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum FingerprintScale {
    /// -100..100, compared as-is.
    Signed,
    /// 1..5, mapped through `(v - 3) * 50`.
    Likert,
}

impl FingerprintScale {
    /// Maps an authored fingerprint value onto the comparison scale.
    #[inline]
    pub fn to_comparison(self, value: f64) -> f64 {
        match self {
            Self::Signed => value,
            Self::Likert => (value - LIKERT_NEUTRAL) * LIKERT_STEP,
        }
    }
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchParams {
    #[arg(long, default_value_t = Metric::Cosine)]
    pub metric: Metric,
    #[arg(long, default_value_t = FingerprintScale::Signed)]
    pub fingerprint_scale: FingerprintScale,
    #[arg(long, default_value_t = DEFAULT_TIE_RATIO)]
    pub tie_ratio: f64,
    #[arg(long, default_value_t = DEFAULT_SKEW_WEIGHT)]
    pub skew_weight: f64,
    #[arg(long, default_value_t = DEFAULT_SECONDARY_COUNT)]
    pub secondary_count: usize,
}

impl Default for MatchParams {
    fn default() -> Self {
        Self {
            metric: Metric::Cosine,
            fingerprint_scale: FingerprintScale::Signed,
            tie_ratio: DEFAULT_TIE_RATIO,
            skew_weight: DEFAULT_SKEW_WEIGHT,
            secondary_count: DEFAULT_SECONDARY_COUNT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumIter, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum CodecKind {
    Delimited,
    FixedWidth,
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecParams {
    #[arg(long, default_value_t = CodecKind::Delimited)]
    pub codec: CodecKind,
    #[arg(long, default_value_t = DEFAULT_DELIMITER)]
    pub delimiter: char,
    #[arg(long, default_value_t = DEFAULT_PAD_WIDTH)]
    pub pad_width: usize,
}

impl Default for CodecParams {
    fn default() -> Self {
        Self {
            codec: CodecKind::Delimited,
            delimiter: DEFAULT_DELIMITER,
            pad_width: DEFAULT_PAD_WIDTH,
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> TfResult<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects values the engine cannot work with.
    pub fn validate(&self) -> TfResult<()> {
        self.balance.validate()?;
        if !(0.0..=1.0).contains(&self.matching.tie_ratio) {
            return Err(TraitForgeError::Config(format!(
                "tie_ratio must lie in [0, 1], got {}",
                self.matching.tie_ratio
            )));
        }
        let d = self.codec.delimiter;
        if d.is_ascii_digit() || d == '-' || d == '.' || d == '+' || d == 'e' || d == 'E' {
            return Err(TraitForgeError::Config(format!(
                "delimiter '{}' collides with number formatting",
                d
            )));
        }
        if self.codec.pad_width == 0 {
            return Err(TraitForgeError::Config("pad_width must be at least 1".to_string()));
        }
        Ok(())
    }

    /// Copies every flag the user typed explicitly onto `self`, leaving
    /// file-provided values alone for flags that only carry their default.
    pub fn merge_from_cli(&mut self, cli: &Config, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($section:ident . $field:ident, $arg_name:expr) => {
                if matches.value_source($arg_name) == Some(ValueSource::CommandLine) {
                    self.$section.$field = cli.$section.$field.clone();
                }
            };
        }

        update_if_present!(balance.target_std_dev, "target_std_dev");
        update_if_present!(balance.clamp_limit, "clamp_limit");
        update_if_present!(balance.center_decimals, "center_decimals");
        update_if_present!(balance.final_decimals, "final_decimals");

        update_if_present!(matching.metric, "metric");
        update_if_present!(matching.fingerprint_scale, "fingerprint_scale");
        update_if_present!(matching.tie_ratio, "tie_ratio");
        update_if_present!(matching.skew_weight, "skew_weight");
        update_if_present!(matching.secondary_count, "secondary_count");

        update_if_present!(codec.codec, "codec");
        update_if_present!(codec.delimiter, "delimiter");
        update_if_present!(codec.pad_width, "pad_width");
    }
}
