use std::time::{SystemTime, UNIX_EPOCH};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// Hyperparameters for a `train_loop` run.
///
/// # Fields
/// - `iterations`    — number of gradient-estimate + update rounds; there is
///                     no early stopping
/// - `epsilon`       — finite-difference step
/// - `learning_rate` — scale applied to the gradient on each update
/// - `seed`          — seed for parameter initialisation; `None` lets the
///                     driver derive one from the clock
/// - `log_every`     — emit a debug cost line every this many iterations
///                     (`0` disables it)
/// - `parallel`      — estimate partials on the rayon pool, one model replica
///                     per worker
///
/// Missing JSON fields take their [`Default`] values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainConfig {
    pub iterations: usize,
    pub epsilon: f32,
    pub learning_rate: f32,
    pub seed: Option<u64>,
    pub log_every: usize,
    pub parallel: bool,
}

impl Default for TrainConfig {
    fn default() -> Self {
        TrainConfig {
            iterations: 100_000,
            epsilon: 0.1,
            learning_rate: 0.1,
            seed: None,
            log_every: 10_000,
            parallel: false,
        }
    }
}

impl TrainConfig {
    /// Creates a serial, unseeded config.
    pub fn new(iterations: usize, epsilon: f32, learning_rate: f32) -> Self {
        TrainConfig {
            iterations,
            epsilon,
            learning_rate,
            ..TrainConfig::default()
        }
    }

    /// `seed`, or a value derived from the wall clock when unset.
    pub fn effective_seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(0)
        })
    }

    /// RNG for parameter initialisation, seeded with [`Self::effective_seed`].
    pub fn rng(&self) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(self.effective_seed())
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if !self.epsilon.is_finite() || self.epsilon <= 0.0 {
            return Err(ConfigError::InvalidEpsilon(self.epsilon));
        }
        if !self.learning_rate.is_finite() || self.learning_rate <= 0.0 {
            return Err(ConfigError::InvalidLearningRate(self.learning_rate));
        }
        Ok(())
    }

    /// Serializes the config to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> ConfigResult<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Reads and validates a config written by `save_json` (or by hand).
    pub fn load_json(path: &str) -> ConfigResult<TrainConfig> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        let config: TrainConfig = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }
}
