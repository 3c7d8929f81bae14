/// Search budget and exploration weight of the MCTS player.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MctsParams {
    iterations: usize,
    exploration: f64,
}

impl MctsParams {
    pub const DEFAULT_ITERATIONS: usize = 10_000;
    pub const MIN_ITERATIONS: usize = 9;
    pub const DEFAULT_EXPLORATION: f64 = 40.0;

    /// # Panics
    /// When `iterations` is below [`MctsParams::MIN_ITERATIONS`].
    pub fn new(iterations: usize) -> Self {
        assert!(
            iterations >= Self::MIN_ITERATIONS,
            "at least {} iterations are needed, got {iterations}",
            Self::MIN_ITERATIONS
        );
        Self {
            iterations,
            exploration: Self::DEFAULT_EXPLORATION,
        }
    }

    pub fn with_exploration(mut self, exploration: f64) -> Self {
        assert!(
            exploration.is_finite() && exploration >= 0.0,
            "exploration must be a non-negative number"
        );
        self.exploration = exploration;
        self
    }

    pub const fn iterations(self) -> usize {
        self.iterations
    }

    pub const fn exploration(self) -> f64 {
        self.exploration
    }

    /// Reads `JASS_MCTS_ITERATIONS` and `JASS_MCTS_EXPLORATION`, keeping
    /// the defaults for missing or unusable values.
    pub fn from_env() -> Self {
        Self::from_reader(|key| std::env::var(key).ok())
    }

    pub fn from_reader<F>(mut read: F) -> Self
    where
        F: FnMut(&str) -> Option<String>,
    {
        let iterations = read("JASS_MCTS_ITERATIONS")
            .and_then(|raw| raw.trim().replace('_', "").parse::<usize>().ok())
            .filter(|value| *value >= Self::MIN_ITERATIONS)
            .unwrap_or(Self::DEFAULT_ITERATIONS);

        let exploration = read("JASS_MCTS_EXPLORATION")
            .and_then(|raw| raw.trim().parse::<f64>().ok())
            .filter(|value| value.is_finite() && *value >= 0.0)
            .unwrap_or(Self::DEFAULT_EXPLORATION);

        Self {
            iterations,
            exploration,
        }
    }
}

impl Default for MctsParams {
    fn default() -> Self {
        Self {
            iterations: Self::DEFAULT_ITERATIONS,
            exploration: Self::DEFAULT_EXPLORATION,
        }
    }
}
