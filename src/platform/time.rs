//! Frame timing

use crate::consts::MAX_FRAME_DT;

/// Turns host timestamps into per-frame delta time
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameClock {
    last: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds since the previous sample, clamped to avoid huge steps after
    /// a stall. The first sample returns 0.
    pub fn tick(&mut self, now: f64) -> f32 {
        let dt = match self.last {
            Some(last) => (now - last).max(0.0) as f32,
            None => 0.0,
        };
        self.last = Some(now);
        dt.min(MAX_FRAME_DT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_sample_is_zero() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.tick(12.0), 0.0);
        assert!((clock.tick(12.016) - 0.016).abs() < 1e-5);
    }

    #[test]
    fn test_stall_is_clamped() {
        let mut clock = FrameClock::new();
        clock.tick(1.0);
        assert_eq!(clock.tick(5.0), MAX_FRAME_DT);
        // Clock going backwards never yields negative time
        assert_eq!(clock.tick(4.0), 0.0);
    }
}
