#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

/// Thresholds for deciding that a die has come to rest
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct SettleConfig {
    /// Linear speed below which the die counts as still
    pub linear_threshold: f32,

    /// Angular speed below which the die counts as still
    pub angular_threshold: f32,

    /// How long the die must stay still, in seconds
    pub debounce: f32,
}

impl Default for SettleConfig {
    fn default() -> Self {
        Self {
            linear_threshold: 0.1,
            angular_threshold: 0.1,
            debounce: 3.0,
        }
    }
}

/// The die of a launch has stayed still for the whole debounce window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settled {
    pub generation: u64,
}

/// Debounced stillness detector
///
/// Both speeds must stay strictly below their thresholds for `debounce`
/// seconds in a row. The window opens at zero on the first still frame and
/// grows by each later frame's `dt`; any fast frame closes it again. Fires at
/// most once per armed generation.
#[derive(Debug, Clone)]
pub struct SettleDetector {
    config: SettleConfig,
    armed: Option<u64>,
    quiet_time: Option<f32>,
    fired: bool,
}

impl SettleDetector {
    /// Creates a detector that is not armed for any launch
    pub fn new(config: SettleConfig) -> Self {
        Self {
            config,
            armed: None,
            quiet_time: None,
            fired: false,
        }
    }

    /// Returns the detector's thresholds
    pub fn config(&self) -> &SettleConfig {
        &self.config
    }

    /// Starts watching a new launch, dropping any progress on the previous one
    pub fn rearm(&mut self, generation: u64) {
        self.armed = Some(generation);
        self.quiet_time = None;
        self.fired = false;
    }

    /// Stops watching
    pub fn disarm(&mut self) {
        self.armed = None;
        self.quiet_time = None;
    }

    /// Returns whether the detector can still fire
    pub fn is_armed(&self) -> bool {
        self.armed.is_some() && !self.fired
    }

    /// Returns how long the die has been still, if it is
    pub fn quiet_time(&self) -> Option<f32> {
        self.quiet_time
    }

    /// Feeds one frame's speeds for the launch `generation`
    pub fn observe(
        &mut self,
        generation: u64,
        linear_speed: f32,
        angular_speed: f32,
        dt: f32,
    ) -> Option<Settled> {
        if self.armed != Some(generation) || self.fired {
            return None;
        }

        let still = linear_speed < self.config.linear_threshold
            && angular_speed < self.config.angular_threshold;

        if !still {
            if self.quiet_time.take().is_some() {
                tracing::trace!(generation, linear_speed, angular_speed, "die moved, settle timer reset");
            }
            return None;
        }

        let quiet = match self.quiet_time {
            Some(t) => t + dt,
            None => 0.0,
        };
        self.quiet_time = Some(quiet);

        if quiet >= self.config.debounce {
            self.fired = true;
            return Some(Settled { generation });
        }

        None
    }
}

impl Default for SettleDetector {
    fn default() -> Self {
        Self::new(SettleConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // exactly representable, so 24 frames add up to exactly 3 s
    const FRAME: f32 = 0.125;

    fn feed(detector: &mut SettleDetector, generation: u64, frames: usize, speed: f32) -> Vec<Settled> {
        (0..frames)
            .filter_map(|_| detector.observe(generation, speed, speed, FRAME))
            .collect()
    }

    #[test]
    fn fires_once_after_the_debounce() {
        let mut detector = SettleDetector::default();
        detector.rearm(1);

        // first still frame opens the window at zero, 24 more reach 3 s
        assert!(feed(&mut detector, 1, 24, 0.0).is_empty());
        assert_eq!(feed(&mut detector, 1, 1, 0.0), vec![Settled { generation: 1 }]);
        assert!(feed(&mut detector, 1, 50, 0.0).is_empty());
        assert!(!detector.is_armed());
    }

    #[test]
    fn movement_restarts_the_window() {
        let mut detector = SettleDetector::default();
        detector.rearm(1);

        feed(&mut detector, 1, 20, 0.05);
        assert_relative_eq!(detector.quiet_time().unwrap(), 2.375);

        feed(&mut detector, 1, 1, 0.1);
        assert_eq!(detector.quiet_time(), None);

        assert!(feed(&mut detector, 1, 24, 0.0).is_empty());
        assert_eq!(feed(&mut detector, 1, 1, 0.0).len(), 1);
    }

    #[test]
    fn either_speed_at_threshold_counts_as_moving() {
        let mut detector = SettleDetector::default();
        detector.rearm(1);

        for _ in 0..100 {
            assert!(detector.observe(1, 0.0, 0.1, FRAME).is_none());
            assert!(detector.observe(1, 0.1, 0.0, FRAME).is_none());
        }
        assert_eq!(detector.quiet_time(), None);
    }

    #[test]
    fn stale_generations_are_ignored() {
        let mut detector = SettleDetector::default();
        detector.rearm(1);
        feed(&mut detector, 1, 20, 0.0);

        detector.rearm(2);
        assert_eq!(detector.quiet_time(), None);
        assert!(feed(&mut detector, 1, 100, 0.0).is_empty());
        assert_eq!(detector.quiet_time(), None);

        assert!(feed(&mut detector, 2, 24, 0.0).is_empty());
        assert_eq!(feed(&mut detector, 2, 1, 0.0), vec![Settled { generation: 2 }]);
    }

    #[test]
    fn unarmed_detector_never_fires() {
        let mut detector = SettleDetector::default();
        assert!(feed(&mut detector, 0, 100, 0.0).is_empty());
    }
}
