use std::time::Duration;

/// Counters for one finished search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Completed iterations (root visits, in single-tree modes).
    pub iterations: usize,
    /// Vertices across every tree of the search.
    pub nodes: usize,
    /// Forward-model transitions.
    pub calls: usize,
    pub elapsed: Duration,
}

impl SearchStats {
    /// Iterations per second, over at least one millisecond.
    pub fn rate(&self) -> f64 {
        self.iterations as f64 / self.elapsed.as_secs_f64().max(1e-3)
    }
}

impl std::fmt::Display for SearchStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:<20}{:<20}{:<20}{:<20}",
            format!("iters {}", self.iterations),
            format!("nodes {}", self.nodes),
            format!("calls {}", self.calls),
            format!("I/sec {:.1}", self.rate()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns() {
        let stats = SearchStats {
            iterations: 500,
            nodes: 120,
            calls: 4000,
            elapsed: Duration::from_millis(250),
        };
        let text = stats.to_string();
        assert!(text.starts_with("iters 500"));
        assert!(text.contains("I/sec 2000.0"));
    }
}
