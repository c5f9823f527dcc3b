//! Scoring configuration.

/// Parameters of the gamified scoring.
///
/// The qualitative weight is always `1 - productivity_weight`.
///
/// # Examples
///
/// ```
/// use u_assign::leaderboard::ScoringConfig;
///
/// let config = ScoringConfig::default()
///     .with_points_per_star(10.0)
///     .with_qualitative_range(0, 20)
///     .with_productivity_weight(0.7)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// assert!((config.qualitative_weight() - 0.3).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoringConfig {
    /// Points distributed per difficulty star of a task.
    pub points_per_star: f64,
    /// Lowest qualitative value (inclusive).
    pub min_qualitative: i64,
    /// Highest qualitative value (exclusive).
    pub max_qualitative: i64,
    /// Weight of the productivity total in the combined score, in `[0, 1]`.
    pub productivity_weight: f64,
    /// Random seed for the qualitative draw.
    pub seed: Option<u64>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            points_per_star: 10.0,
            min_qualitative: 0,
            max_qualitative: 10,
            productivity_weight: 0.5,
            seed: None,
        }
    }
}

impl ScoringConfig {
    pub fn with_points_per_star(mut self, points: f64) -> Self {
        self.points_per_star = points;
        self
    }

    pub fn with_qualitative_range(mut self, min: i64, max: i64) -> Self {
        self.min_qualitative = min;
        self.max_qualitative = max;
        self
    }

    pub fn with_productivity_weight(mut self, weight: f64) -> Self {
        self.productivity_weight = weight;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Weight of the qualitative total in the combined score.
    pub fn qualitative_weight(&self) -> f64 {
        1.0 - self.productivity_weight
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if !(self.points_per_star.is_finite() && self.points_per_star > 0.0) {
            return Err(format!(
                "points_per_star must be positive, got {}",
                self.points_per_star
            ));
        }
        if self.min_qualitative >= self.max_qualitative {
            return Err(format!(
                "qualitative range must satisfy min < max, got {}..{}",
                self.min_qualitative, self.max_qualitative
            ));
        }
        if !(0.0..=1.0).contains(&self.productivity_weight) {
            return Err(format!(
                "productivity_weight must be in [0, 1], got {}",
                self.productivity_weight
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ScoringConfig::default();
        assert!(config.validate().is_ok());
        assert!((config.productivity_weight + config.qualitative_weight() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_validate_bad_points() {
        assert!(ScoringConfig::default()
            .with_points_per_star(0.0)
            .validate()
            .is_err());
    }

    #[test]
    fn test_validate_empty_range() {
        assert!(ScoringConfig::default()
            .with_qualitative_range(5, 5)
            .validate()
            .is_err());
    }

    #[test]
    fn test_validate_weight_bounds() {
        assert!(ScoringConfig::default()
            .with_productivity_weight(1.0)
            .validate()
            .is_ok());
        assert!(ScoringConfig::default()
            .with_productivity_weight(1.2)
            .validate()
            .is_err());
        assert!(ScoringConfig::default()
            .with_productivity_weight(f64::NAN)
            .validate()
            .is_err());
    }
}
