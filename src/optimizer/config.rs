//! Optimizer configuration.

/// Configuration for the assignment optimizer.
///
/// `min_hours_worked > max_hours_worked` is accepted: the resulting model is
/// simply infeasible.
///
/// # Examples
///
/// ```
/// use u_assign::optimizer::OptimizerConfig;
///
/// let config = OptimizerConfig::default()
///     .with_min_hours_worked(20.0)
///     .with_max_hours_worked(40.0);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptimizerConfig {
    /// Hours every worker must at least work.
    pub min_hours_worked: f64,
    /// Hours no worker may exceed.
    pub max_hours_worked: f64,
    /// Name given to the built model.
    pub model_name: String,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            min_hours_worked: 1.0,
            max_hours_worked: 160.0,
            model_name: "Maximize_Production".into(),
        }
    }
}

impl OptimizerConfig {
    pub fn with_min_hours_worked(mut self, hours: f64) -> Self {
        self.min_hours_worked = hours;
        self
    }

    pub fn with_max_hours_worked(mut self, hours: f64) -> Self {
        self.max_hours_worked = hours;
        self
    }

    pub fn with_model_name(mut self, name: impl Into<String>) -> Self {
        self.model_name = name.into();
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if !(self.min_hours_worked.is_finite() && self.min_hours_worked > 0.0) {
            return Err(format!(
                "min_hours_worked must be positive, got {}",
                self.min_hours_worked
            ));
        }
        if !(self.max_hours_worked.is_finite() && self.max_hours_worked > 0.0) {
            return Err(format!(
                "max_hours_worked must be positive, got {}",
                self.max_hours_worked
            ));
        }
        Ok(())
    }
}
