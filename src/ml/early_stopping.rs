// ============================================================
// Layer 5 - Early Stopping
// ============================================================
// Tracks a monitored metric where higher is better (validation
// accuracy). An epoch improves only if its value is strictly
// greater than the best so far. After `patience` consecutive
// epochs without improvement, training should stop; the caller
// then restores the weights from `best_epoch`.

#[derive(Debug, Clone)]
pub struct EarlyStopping {
    patience:   usize,
    best:       f64,
    best_epoch: Option<usize>,
    wait:       usize,
}

/// What the training loop should do after an epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopDecision {
    /// New best; snapshot the weights and keep going
    Improved,
    /// No improvement yet, still within patience
    Continue,
    /// Patience exhausted
    Stop,
}

impl EarlyStopping {
    pub fn new(patience: usize) -> Self {
        Self { patience, best: f64::NEG_INFINITY, best_epoch: None, wait: 0 }
    }

    pub fn update(&mut self, epoch: usize, value: f64) -> StopDecision {
        if value > self.best {
            self.best       = value;
            self.best_epoch = Some(epoch);
            self.wait       = 0;
            return StopDecision::Improved;
        }
        self.wait += 1;
        if self.wait >= self.patience {
            StopDecision::Stop
        } else {
            StopDecision::Continue
        }
    }

    pub fn best(&self) -> f64 {
        self.best
    }

    pub fn best_epoch(&self) -> Option<usize> {
        self.best_epoch
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stops_after_patience_epochs_without_improvement() {
        let mut es = EarlyStopping::new(3);
        assert_eq!(es.update(1, 0.70), StopDecision::Improved);
        assert_eq!(es.update(2, 0.80), StopDecision::Improved);
        assert_eq!(es.update(3, 0.75), StopDecision::Continue);
        assert_eq!(es.update(4, 0.80), StopDecision::Continue);
        assert_eq!(es.update(5, 0.79), StopDecision::Stop);
        assert_eq!(es.best_epoch(), Some(2));
        assert_eq!(es.best(), 0.80);
    }

    #[test]
    fn test_improvement_resets_wait() {
        let mut es = EarlyStopping::new(2);
        es.update(1, 0.5);
        assert_eq!(es.update(2, 0.4), StopDecision::Continue);
        assert_eq!(es.update(3, 0.6), StopDecision::Improved);
        assert_eq!(es.update(4, 0.6), StopDecision::Continue);
        assert_eq!(es.update(5, 0.1), StopDecision::Stop);
        assert_eq!(es.best_epoch(), Some(3));
    }

    #[test]
    fn test_first_epoch_always_improves() {
        let mut es = EarlyStopping::new(10);
        assert_eq!(es.update(1, 0.0), StopDecision::Improved);
        assert_eq!(es.best_epoch(), Some(1));
    }
}
