use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;
use tetra_generator::IntersectionClass;
use tracing::{debug, warn};

use crate::errors::ConfigError;

/// Largest volume a tetrahedron in the unit cube can enclose.
pub const MAX_VOLUME: f64 = 1.0 / 3.0;

/// Distribution sums closer than this to 100 are taken as exact.
const SUM_EPSILON: f64 = 1e-6;

/// Largest distribution error that is corrected instead of rejected.
const MAX_SUM_DEVIATION: f64 = 0.5;

/// Default bound on consecutive out-of-range polyhedron volumes.
pub const DEFAULT_MAX_VOLUME_REJECTIONS: usize = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    Csv,
    Json,
    Obj,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Obj => "obj",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            "obj" => Ok(Self::Obj),
            _ => Err(ConfigError::UnknownFormat(s.to_string())),
        }
    }
}

/// Accepted range of polyhedron intersection volumes.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct VolumeRange {
    pub min: f64,
    pub max: f64,
}

impl VolumeRange {
    pub fn contains(&self, volume: f64) -> bool {
        volume >= self.min && volume <= self.max
    }

    pub fn width(&self) -> f64 {
        self.max - self.min
    }
}

/// Validated dataset settings.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetConfig {
    pub output_format: OutputFormat,
    /// Decimal places written for coordinates and volumes.
    pub precision: usize,
    pub dataset_size: usize,
    /// Percentage of the dataset per class, in label order.
    pub intersection_distribution: [f64; 5],
    pub volume_range: VolumeRange,
    /// Bins of the polyhedron volume histogram in the run summary.
    pub num_bins: usize,
    pub max_volume_rejections: usize,
    /// Also write the vertices of each pair's intersection.
    pub export_shape: bool,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            output_format: OutputFormat::Csv,
            precision: 6,
            dataset_size: 1000,
            intersection_distribution: [20.0; 5],
            volume_range: VolumeRange {
                min: 0.0,
                max: MAX_VOLUME,
            },
            num_bins: 10,
            max_volume_rejections: DEFAULT_MAX_VOLUME_REJECTIONS,
            export_shape: false,
        }
    }
}

/// One `{"value": ...}` entry of the config file.
#[derive(Debug, Deserialize)]
struct Setting<T> {
    value: T,
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    output_format: Setting<String>,
    precision: Setting<i64>,
    dataset_size: Setting<i64>,
    intersection_distribution: Setting<Vec<f64>>,
    volume_range: Setting<VolumeRange>,
    num_bins: Setting<i64>,
    #[serde(default)]
    max_volume_rejections: Option<Setting<i64>>,
    #[serde(default)]
    export_shape: Option<Setting<bool>>,
}

impl DatasetConfig {
    /// Read and validate a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loading dataset config");
        Self::from_json(&json)
    }

    /// Parse and validate a config document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = serde_json::from_str(json)?;

        let output_format = raw.output_format.value.parse()?;

        let precision = raw.precision.value;
        if !(1..=16).contains(&precision) {
            return Err(ConfigError::InvalidPrecision(precision));
        }

        let dataset_size = raw.dataset_size.value;
        if dataset_size <= 0 {
            return Err(ConfigError::InvalidDatasetSize(dataset_size));
        }

        let shares = raw.intersection_distribution.value;
        let intersection_distribution: [f64; 5] = shares
            .as_slice()
            .try_into()
            .map_err(|_| ConfigError::DistributionLength(shares.len()))?;

        let volume_range = raw.volume_range.value;
        if !(volume_range.min >= 0.0
            && volume_range.max <= MAX_VOLUME
            && volume_range.min < volume_range.max)
        {
            return Err(ConfigError::InvalidVolumeRange {
                min: volume_range.min,
                max: volume_range.max,
            });
        }

        let num_bins = raw.num_bins.value;
        if num_bins <= 0 {
            return Err(ConfigError::InvalidBins(num_bins));
        }

        let max_volume_rejections = match raw.max_volume_rejections {
            Some(Setting { value }) if value <= 0 => {
                return Err(ConfigError::InvalidVolumeRejections(value));
            }
            Some(Setting { value }) => value as usize,
            None => DEFAULT_MAX_VOLUME_REJECTIONS,
        };

        Ok(Self {
            output_format,
            precision: precision as usize,
            dataset_size: dataset_size as usize,
            intersection_distribution: normalize_distribution(intersection_distribution)?,
            volume_range,
            num_bins: num_bins as usize,
            max_volume_rejections,
            export_shape: raw.export_shape.is_some_and(|s| s.value),
        })
    }

    /// Percentage configured for `class`.
    pub fn share(&self, class: IntersectionClass) -> f64 {
        self.intersection_distribution[class.label() as usize]
    }
}

/// Accept sums within 0.5 of 100 by moving the difference onto the first
/// class; reject anything further off.
fn normalize_distribution(mut shares: [f64; 5]) -> Result<[f64; 5], ConfigError> {
    let sum: f64 = shares.iter().sum();
    let difference = 100.0 - sum;

    if difference.abs() > SUM_EPSILON {
        if difference.abs() > MAX_SUM_DEVIATION {
            return Err(ConfigError::DistributionSum(sum));
        }
        shares[0] += difference;
        warn!(
            sum,
            adjustment = difference,
            "distribution does not sum to 100, adjusted the first class"
        );
    }

    for (index, &value) in shares.iter().enumerate() {
        if value < 0.0 || value.is_nan() {
            return Err(ConfigError::NegativeShare { index, value });
        }
    }
    Ok(shares)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn document(format: &str, precision: i64, shares: &str, min: f64, max: f64) -> String {
        format!(
            r#"{{
                "output_format": {{"value": "{format}", "description": "csv, json or obj"}},
                "precision": {{"value": {precision}}},
                "dataset_size": {{"value": 250}},
                "intersection_distribution": {{"value": {shares}}},
                "volume_range": {{"value": {{"min": {min}, "max": {max}}}}},
                "num_bins": {{"value": 8}}
            }}"#
        )
    }

    #[test]
    fn test_parses_value_wrapped_settings() {
        let json = document("json", 8, "[10, 20, 30, 20, 20]", 0.01, 0.2);
        let config = DatasetConfig::from_json(&json).unwrap();
        assert_eq!(config.output_format, OutputFormat::Json);
        assert_eq!(config.precision, 8);
        assert_eq!(config.dataset_size, 250);
        assert_eq!(config.intersection_distribution, [10.0, 20.0, 30.0, 20.0, 20.0]);
        assert_eq!(config.volume_range, VolumeRange { min: 0.01, max: 0.2 });
        assert_eq!(config.num_bins, 8);
        assert_eq!(config.max_volume_rejections, DEFAULT_MAX_VOLUME_REJECTIONS);
        assert!(!config.export_shape);
        assert_eq!(config.share(IntersectionClass::Segment), 30.0);
    }

    #[test]
    fn test_small_sum_deviation_is_corrected_on_first_class() {
        let json = document("csv", 6, "[20, 20, 20, 20, 20.3]", 0.0, 0.3);
        let config = DatasetConfig::from_json(&json).unwrap();
        assert_relative_eq!(config.intersection_distribution[0], 19.7, epsilon = 1e-9);
        assert_relative_eq!(
            config.intersection_distribution.iter().sum::<f64>(),
            100.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_large_sum_deviation_is_rejected() {
        let json = document("csv", 6, "[20, 20, 20, 20, 21]", 0.0, 0.3);
        assert!(matches!(
            DatasetConfig::from_json(&json),
            Err(ConfigError::DistributionSum(sum)) if (sum - 101.0).abs() < 1e-9
        ));
    }

    #[test]
    fn test_distribution_needs_five_entries() {
        let json = document("csv", 6, "[50, 50]", 0.0, 0.3);
        assert!(matches!(
            DatasetConfig::from_json(&json),
            Err(ConfigError::DistributionLength(2))
        ));
    }

    #[test]
    fn test_negative_share_is_rejected() {
        let json = document("csv", 6, "[-10, 50, 20, 20, 20]", 0.0, 0.3);
        assert!(matches!(
            DatasetConfig::from_json(&json),
            Err(ConfigError::NegativeShare { index: 0, .. })
        ));
    }

    #[test]
    fn test_precision_bounds() {
        for bad in [0, 17] {
            let json = document("csv", bad, "[20, 20, 20, 20, 20]", 0.0, 0.3);
            assert!(matches!(
                DatasetConfig::from_json(&json),
                Err(ConfigError::InvalidPrecision(p)) if p == bad
            ));
        }
    }

    #[test]
    fn test_volume_range_bounds() {
        for (min, max) in [(-0.1, 0.2), (0.2, 0.1), (0.1, 0.1), (0.0, 0.5)] {
            let json = document("csv", 6, "[20, 20, 20, 20, 20]", min, max);
            assert!(matches!(
                DatasetConfig::from_json(&json),
                Err(ConfigError::InvalidVolumeRange { .. })
            ));
        }
    }

    #[test]
    fn test_volume_rejection_bound_must_be_positive() {
        for bad in [0, -4] {
            let json = document("csv", 6, "[20, 20, 20, 20, 20]", 0.0, 0.3).replacen(
                '{',
                &format!(r#"{{"max_volume_rejections": {{"value": {bad}}},"#),
                1,
            );
            assert!(matches!(
                DatasetConfig::from_json(&json),
                Err(ConfigError::InvalidVolumeRejections(v)) if v == bad
            ));
        }
    }

    #[test]
    fn test_shape_export_is_opt_in() {
        let json = document("json", 6, "[20, 20, 20, 20, 20]", 0.0, 0.3)
            .replacen('{', r#"{"export_shape": {"value": true},"#, 1);
        assert!(DatasetConfig::from_json(&json).unwrap().export_shape);
    }

    #[test]
    fn test_unknown_format() {
        let json = document("xml", 6, "[20, 20, 20, 20, 20]", 0.0, 0.3);
        assert!(matches!(
            DatasetConfig::from_json(&json),
            Err(ConfigError::UnknownFormat(f)) if f == "xml"
        ));
    }

    #[test]
    fn test_malformed_document() {
        assert!(matches!(
            DatasetConfig::from_json("{\"precision\": 6}"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_format_parsing_is_case_insensitive() {
        assert_eq!("OBJ".parse::<OutputFormat>().unwrap(), OutputFormat::Obj);
        assert_eq!(OutputFormat::Csv.to_string(), "csv");
    }
}
