// Copyright (C) 2020-2026 Andy Kurnia.

use super::{error, evaluator, swap};

fn default_max_depth() -> u8 {
    4
}

fn default_start_depth() -> u8 {
    2
}

fn default_max_execution_time_ms() -> u64 {
    120_000
}

fn default_min_execution_time_ms() -> u64 {
    10_000
}

fn default_min_score() -> i32 {
    10
}

fn default_branching_factor_limit() -> usize {
    20
}

fn default_poll_interval_ms() -> u64 {
    10
}

// every knob of the robot. missing fields take their defaults.
#[derive(Clone, Debug, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct SearchConfig {
    #[serde(default = "default_max_depth")]
    pub max_depth: u8,
    #[serde(default = "default_start_depth")]
    pub start_depth: u8,
    #[serde(default = "default_max_execution_time_ms")]
    pub max_execution_time_ms: u64,
    // once the caller asks to wrap up, no deeper search starts after this.
    #[serde(default = "default_min_execution_time_ms")]
    pub min_execution_time_ms: u64,
    // candidates scoring below this are dropped, except the best one.
    #[serde(default = "default_min_score")]
    pub min_score: i32,
    #[serde(default = "default_branching_factor_limit")]
    pub branching_factor_limit: usize,
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    #[serde(default)]
    pub swap_strategy: swap::SwapStrategy,
    // how the greedy picker ranks its candidates.
    #[serde(default)]
    pub evaluator: evaluator::Evaluator,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            start_depth: default_start_depth(),
            max_execution_time_ms: default_max_execution_time_ms(),
            min_execution_time_ms: default_min_execution_time_ms(),
            min_score: default_min_score(),
            branching_factor_limit: default_branching_factor_limit(),
            poll_interval_ms: default_poll_interval_ms(),
            swap_strategy: swap::SwapStrategy::default(),
            evaluator: evaluator::Evaluator::default(),
        }
    }
}

impl SearchConfig {
    pub fn load<P: AsRef<std::path::Path>>(path: P) -> error::Returns<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    pub fn from_json(s: &str) -> error::Returns<Self> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> error::Returns<()> {
        if self.start_depth == 0 || self.max_depth == 0 {
            return Err(error::Error::Config("depths must be positive".into()));
        }
        if self.start_depth > self.max_depth {
            return Err(error::Error::Config(format!(
                "start_depth {} exceeds max_depth {}",
                self.start_depth, self.max_depth
            )));
        }
        if self.min_execution_time_ms > self.max_execution_time_ms {
            return Err(error::Error::Config(format!(
                "min_execution_time_ms {} exceeds max_execution_time_ms {}",
                self.min_execution_time_ms, self.max_execution_time_ms
            )));
        }
        if self.branching_factor_limit == 0 {
            return Err(error::Error::Config("branching_factor_limit must be positive".into()));
        }
        if self.poll_interval_ms == 0 {
            return Err(error::Error::Config("poll_interval_ms must be positive".into()));
        }
        Ok(())
    }

    #[inline(always)]
    pub fn max_execution_time(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.max_execution_time_ms)
    }

    #[inline(always)]
    pub fn min_execution_time(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.min_execution_time_ms)
    }

    #[inline(always)]
    pub fn poll_interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.poll_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_is_default() {
        let config = SearchConfig::from_json("{}").unwrap();
        assert_eq!(config, SearchConfig::default());
        assert_eq!(config.max_depth, 4);
        assert_eq!(config.start_depth, 2);
        assert_eq!(config.max_execution_time_ms, 120_000);
        assert_eq!(config.min_execution_time_ms, 10_000);
        assert_eq!(config.min_score, 10);
        assert_eq!(config.branching_factor_limit, 20);
        assert_eq!(config.swap_strategy, swap::SwapStrategy::NoAlternatives);
        assert_eq!(config.evaluator, evaluator::Evaluator::Score);
    }

    #[test]
    fn partial_override() {
        let config = SearchConfig::from_json(
            r#"{"max_depth": 6, "swap_strategy": {"kind": "min_score_threshold", "threshold": 8}}"#,
        )
        .unwrap();
        assert_eq!(config.max_depth, 6);
        assert_eq!(config.start_depth, 2);
        assert_eq!(
            config.swap_strategy,
            swap::SwapStrategy::MinScoreThreshold { threshold: 8 }
        );
        let config = SearchConfig::from_json(r#"{"evaluator": {"kind": "new_tiles"}}"#).unwrap();
        assert_eq!(config.evaluator, evaluator::Evaluator::NewTiles);
        assert_eq!(config.max_depth, 4);
    }

    #[test]
    fn rejects_nonsense() {
        assert!(matches!(
            SearchConfig::from_json(r#"{"start_depth": 5, "max_depth": 3}"#),
            Err(error::Error::Config(_))
        ));
        assert!(SearchConfig::from_json(r#"{"max_depth": 0}"#).is_err());
        assert!(SearchConfig::from_json(r#"{"min_execution_time_ms": 200000}"#).is_err());
        assert!(SearchConfig::from_json(r#"{"branching_factor_limit": 0}"#).is_err());
        assert!(SearchConfig::from_json(r#"{"poll_interval_ms": 0}"#).is_err());
        assert!(matches!(
            SearchConfig::from_json("[1]"),
            Err(error::Error::Json(_))
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        assert!(matches!(
            SearchConfig::load("/nonexistent/wordrobot.json"),
            Err(error::Error::Io(_))
        ));
    }
}
