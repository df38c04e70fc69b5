//! Configuration for the hotspot detection core

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Main hotspot detection configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HotspotConfig {
    /// Clustering parameters
    #[serde(default)]
    pub clustering: ClusteringConfig,
    /// Enrichment parameters
    #[serde(default)]
    pub enrichment: EnrichmentConfig,
    /// Batch parameters
    #[serde(default)]
    pub batch: BatchConfig,
}

impl HotspotConfig {
    /// Load configuration from a TOML file
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let config: Self = toml::from_str(&raw)
            .map_err(|e| Error::config(format!("failed to parse config file: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate all parameter ranges
    pub fn validate(&self) -> Result<()> {
        self.clustering.validate()?;
        self.enrichment.validate()?;
        Ok(())
    }
}

/// Density clustering parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusteringConfig {
    /// Neighborhood radius in coordinate-distance units
    /// (default: 0.002 degrees, roughly 200 m at mid-latitudes)
    #[serde(default = "default_epsilon")]
    pub epsilon: f64,
    /// Minimum neighborhood size for a core point (default: 5)
    #[serde(default = "default_min_points")]
    pub min_points: usize,
}

fn default_epsilon() -> f64 {
    0.002
}

fn default_min_points() -> usize {
    5
}

impl Default for ClusteringConfig {
    fn default() -> Self {
        Self {
            epsilon: 0.002,
            min_points: 5,
        }
    }
}

impl ClusteringConfig {
    fn validate(&self) -> Result<()> {
        if !self.epsilon.is_finite() || self.epsilon < 0.0 {
            return Err(Error::config(format!(
                "epsilon must be finite and non-negative, got {}",
                self.epsilon
            )));
        }
        if self.min_points < 1 {
            return Err(Error::config("min_points must be at least 1"));
        }
        Ok(())
    }
}

/// Enrichment parameters applied when a finished cluster becomes a hotspot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichmentConfig {
    /// Polarity band treated as neutral sentiment (default: 0.0)
    ///
    /// A corpus polarity above the band is Positive, below its negation
    /// Negative, anything in between Neutral.
    #[serde(default)]
    pub neutral_band: f64,
    /// Minimum classifier confidence for a category to be reported
    /// (default: 0.50)
    #[serde(default = "default_confidence_floor")]
    pub confidence_floor: f64,
}

fn default_confidence_floor() -> f64 {
    0.50
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            neutral_band: 0.0,
            confidence_floor: 0.50,
        }
    }
}

impl EnrichmentConfig {
    fn validate(&self) -> Result<()> {
        if !self.neutral_band.is_finite() || self.neutral_band < 0.0 {
            return Err(Error::config(format!(
                "neutral_band must be finite and non-negative, got {}",
                self.neutral_band
            )));
        }
        if !self.confidence_floor.is_finite()
            || !(0.0..=1.0).contains(&self.confidence_floor)
        {
            return Err(Error::config(format!(
                "confidence_floor must be in [0, 1], got {}",
                self.confidence_floor
            )));
        }
        Ok(())
    }
}

/// Batch store parameters
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Maximum post age in minutes for the recency filter (reference: 60)
    ///
    /// When unset, batches are clustered as given and no posts are dropped
    /// by age.
    #[serde(default)]
    pub max_post_age_mins: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_reference_values() {
        let config = HotspotConfig::default();
        assert_eq!(config.clustering.epsilon, 0.002);
        assert_eq!(config.clustering.min_points, 5);
        assert_eq!(config.enrichment.neutral_band, 0.0);
        assert_eq!(config.enrichment.confidence_floor, 0.50);
        assert!(config.batch.max_post_age_mins.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: HotspotConfig = toml::from_str(
            r#"
            [clustering]
            epsilon = 0.01
            "#,
        )
        .unwrap();

        assert_eq!(config.clustering.epsilon, 0.01);
        assert_eq!(config.clustering.min_points, 5);
        assert_eq!(config.enrichment.confidence_floor, 0.50);
    }

    #[test]
    fn test_from_toml_file_validates() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[clustering]\nepsilon = 0.004\nmin_points = 3").unwrap();
        let config = HotspotConfig::from_toml_file(file.path()).unwrap();
        assert_eq!(config.clustering.epsilon, 0.004);
        assert_eq!(config.clustering.min_points, 3);

        let mut bad = tempfile::NamedTempFile::new().unwrap();
        writeln!(bad, "[clustering]\nmin_points = 0").unwrap();
        assert!(HotspotConfig::from_toml_file(bad.path()).is_err());
    }

    #[test]
    fn test_rejects_zero_min_points() {
        let config = HotspotConfig {
            clustering: ClusteringConfig {
                epsilon: 0.002,
                min_points: 0,
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_non_finite_epsilon() {
        let config = HotspotConfig {
            clustering: ClusteringConfig {
                epsilon: f64::NAN,
                min_points: 5,
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_out_of_range_confidence_floor() {
        let config = HotspotConfig {
            enrichment: EnrichmentConfig {
                neutral_band: 0.0,
                confidence_floor: 1.5,
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
