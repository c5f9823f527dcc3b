//! Decision variables.

/// Structured identity of an assignment variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VarKey {
    /// Task row index.
    pub task: usize,
    /// Worker index.
    pub worker: usize,
}

/// A non-negative integer decision variable: units of a task completed by a worker.
///
/// Identity lives in [`key`](Self::key); [`name`](Self::name) is only for
/// display (`X<task><worker>`, e.g. `Xprinting0`).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DecisionVar {
    /// Task and worker this variable counts units for.
    pub key: VarKey,
    /// Display name.
    pub name: String,
}

impl DecisionVar {
    /// Creates the variable for `worker` on the task named `task_name` at row `task`.
    pub fn new(task: usize, task_name: &str, worker: usize) -> Self {
        Self {
            key: VarKey { task, worker },
            name: format!("X{task_name}{worker}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name() {
        let v = DecisionVar::new(1, "printing", 12);
        assert_eq!(v.name, "Xprinting12");
        assert_eq!(v.key, VarKey { task: 1, worker: 12 });
    }

    #[test]
    fn test_key_ordering_is_task_major() {
        let mut keys = vec![
            VarKey { task: 1, worker: 0 },
            VarKey { task: 0, worker: 2 },
            VarKey { task: 0, worker: 1 },
        ];
        keys.sort();
        assert_eq!(
            keys,
            vec![
                VarKey { task: 0, worker: 1 },
                VarKey { task: 0, worker: 2 },
                VarKey { task: 1, worker: 0 },
            ]
        );
    }
}
