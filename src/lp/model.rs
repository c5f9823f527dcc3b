//! LP model definition.

use super::variables::{DecisionVar, VarKey};

/// Semantic family of a constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConstraintFamily {
    /// Every task is completed as often as the first task.
    Equality,
    /// Hours spent on a task stay within its capacity.
    Capacity,
    /// A worker works at least the minimum hours.
    MinHours,
    /// A worker works at most the maximum hours.
    MaxHours,
}

impl ConstraintFamily {
    /// All families in construction order.
    pub const ALL: [ConstraintFamily; 4] = [
        ConstraintFamily::Equality,
        ConstraintFamily::Capacity,
        ConstraintFamily::MinHours,
        ConstraintFamily::MaxHours,
    ];

    /// Short identifier used in labels and messages.
    pub fn as_str(self) -> &'static str {
        match self {
            ConstraintFamily::Equality => "equality",
            ConstraintFamily::Capacity => "capacity",
            ConstraintFamily::MinHours => "min_hours",
            ConstraintFamily::MaxHours => "max_hours",
        }
    }
}

/// Comparison operator of a linear constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Relation {
    /// `lhs <= rhs`
    LessEq,
    /// `lhs >= rhs`
    GreaterEq,
    /// `lhs == rhs`
    Equal,
}

/// A labeled linear constraint `sum(coef * var) <relation> rhs`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LinearConstraint {
    /// Family this constraint belongs to.
    pub family: ConstraintFamily,
    /// Human-readable label, e.g. `capacity[printing]`.
    pub label: String,
    /// (variable index, coefficient) pairs.
    pub terms: Vec<(usize, f64)>,
    /// Comparison operator.
    pub relation: Relation,
    /// Right-hand side constant.
    pub rhs: f64,
}

impl LinearConstraint {
    /// Evaluates the left-hand side for the given variable values.
    pub fn lhs_value(&self, values: &[f64]) -> f64 {
        self.terms.iter().map(|&(i, coef)| coef * values[i]).sum()
    }

    /// Whether `values` satisfy the constraint within `tolerance`.
    pub fn is_satisfied(&self, values: &[f64], tolerance: f64) -> bool {
        let lhs = self.lhs_value(values);
        match self.relation {
            Relation::LessEq => lhs <= self.rhs + tolerance,
            Relation::GreaterEq => lhs >= self.rhs - tolerance,
            Relation::Equal => (lhs - self.rhs).abs() <= tolerance,
        }
    }
}

/// Objective function of the LP model.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Objective {
    /// Maximize a linear combination of variables.
    Maximize {
        /// (variable index, coefficient) pairs.
        terms: Vec<(usize, f64)>,
    },
    /// Minimize a linear combination of variables.
    Minimize {
        /// (variable index, coefficient) pairs.
        terms: Vec<(usize, f64)>,
    },
}

impl Objective {
    /// The (variable index, coefficient) pairs of the objective.
    pub fn terms(&self) -> &[(usize, f64)] {
        match self {
            Objective::Maximize { terms } | Objective::Minimize { terms } => terms,
        }
    }

    /// Evaluates the objective for the given variable values.
    pub fn value(&self, values: &[f64]) -> f64 {
        self.terms().iter().map(|&(i, coef)| coef * values[i]).sum()
    }
}

/// An integer linear program over non-negative integer variables.
///
/// Constraints keep their insertion order and carry their family tag.
///
/// # Examples
///
/// ```
/// use u_assign::lp::{
///     ConstraintFamily, DecisionVar, LinearConstraint, LpModel, Objective, Relation,
/// };
///
/// let mut model = LpModel::new("example");
/// let x = model.add_variable(DecisionVar::new(0, "cutting", 0));
/// model.add_constraint(LinearConstraint {
///     family: ConstraintFamily::Capacity,
///     label: "capacity[cutting]".into(),
///     terms: vec![(x, 2.0)],
///     relation: Relation::LessEq,
///     rhs: 10.0,
/// });
/// model.set_objective(Objective::Maximize { terms: vec![(x, 1.0)] });
/// assert!(model.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LpModel {
    /// Model name.
    pub name: String,
    /// Decision variables, indexed by position.
    pub variables: Vec<DecisionVar>,
    /// Constraints in construction order.
    pub constraints: Vec<LinearConstraint>,
    /// Objective function.
    pub objective: Option<Objective>,
}

impl LpModel {
    /// Creates a new empty model.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            variables: Vec::new(),
            constraints: Vec::new(),
            objective: None,
        }
    }

    /// Adds a variable and returns its index.
    pub fn add_variable(&mut self, var: DecisionVar) -> usize {
        self.variables.push(var);
        self.variables.len() - 1
    }

    /// Adds a constraint.
    pub fn add_constraint(&mut self, constraint: LinearConstraint) {
        self.constraints.push(constraint);
    }

    /// Sets the objective function.
    pub fn set_objective(&mut self, objective: Objective) {
        self.objective = Some(objective);
    }

    /// Index of the variable with the given key.
    pub fn variable_index(&self, key: VarKey) -> Option<usize> {
        self.variables.iter().position(|v| v.key == key)
    }

    /// Constraints of one family, in construction order.
    pub fn constraints_of(
        &self,
        family: ConstraintFamily,
    ) -> impl Iterator<Item = &LinearConstraint> {
        self.constraints.iter().filter(move |c| c.family == family)
    }

    /// Validates the model for consistency.
    ///
    /// Checks that an objective is set, every referenced variable exists and
    /// all coefficients and constants are finite.
    pub fn validate(&self) -> Result<(), String> {
        let n = self.variables.len();
        let objective = self.objective.as_ref().ok_or("objective not set")?;
        for &(i, coef) in objective.terms() {
            if i >= n {
                return Err(format!("objective: undefined variable index {i}"));
            }
            if !coef.is_finite() {
                return Err(format!("objective: non-finite coefficient {coef}"));
            }
        }
        for c in &self.constraints {
            for &(i, coef) in &c.terms {
                if i >= n {
                    return Err(format!("{}: undefined variable index {i}", c.label));
                }
                if !coef.is_finite() {
                    return Err(format!("{}: non-finite coefficient {coef}", c.label));
                }
            }
            if !c.rhs.is_finite() {
                return Err(format!("{}: non-finite right-hand side {}", c.label, c.rhs));
            }
        }
        Ok(())
    }

    /// Returns the number of variables.
    pub fn variable_count(&self) -> usize {
        self.variables.len()
    }

    /// Returns the number of constraints.
    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }
}
