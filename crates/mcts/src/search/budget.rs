use std::time::Duration;

/// When a search stops.
///
/// Any limit that is set ends the search once reached. Limits are checked
/// only between iterations, so at least one iteration always completes and
/// the last one may overshoot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Budget {
    pub iterations: Option<usize>,
    /// Forward-model transitions across all iterations.
    pub calls: Option<usize>,
    pub time: Option<Duration>,
}

impl Default for Budget {
    fn default() -> Self {
        Self::iterations(tabletop_core::BUDGET_ITERATIONS)
    }
}

impl Budget {
    pub fn iterations(n: usize) -> Self {
        Self {
            iterations: Some(n),
            ..Self::unlimited()
        }
    }
    pub fn calls(n: usize) -> Self {
        Self {
            calls: Some(n),
            ..Self::unlimited()
        }
    }
    pub fn time(duration: Duration) -> Self {
        Self {
            time: Some(duration),
            ..Self::unlimited()
        }
    }
    /// No limit at all. Only useful as a base for struct update syntax.
    pub fn unlimited() -> Self {
        Self {
            iterations: None,
            calls: None,
            time: None,
        }
    }
    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.iterations.is_some() || self.calls.is_some() || self.time.is_some(),
            "search budget sets no iteration, call, or time limit"
        );
        Ok(())
    }
    pub fn exhausted(&self, iterations: usize, calls: usize, elapsed: Duration) -> bool {
        self.iterations.is_some_and(|n| iterations >= n)
            || self.calls.is_some_and(|n| calls >= n)
            || self.time.is_some_and(|t| elapsed >= t)
    }
}

impl std::fmt::Display for Budget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut limits = vec![];
        if let Some(n) = self.iterations {
            limits.push(format!("{} iterations", n));
        }
        if let Some(n) = self.calls {
            limits.push(format!("{} calls", n));
        }
        if let Some(t) = self.time {
            limits.push(format!("{:?}", t));
        }
        write!(f, "{}", limits.join(" | "))
    }
}
