use crate::config::RotatorConfig;

/// Looping card carousel: both directions wrap and autoplay advances on a
/// fixed interval.
#[derive(Debug, Clone)]
pub struct Rotator {
    len: usize,
    active: usize,
    playing: bool,
    interval_ms: u64,
    next_at_ms: Option<u64>,
}

impl Rotator {
    pub fn new(len: usize, config: &RotatorConfig, now_ms: u64) -> Self {
        let playing = config.autoplay && len > 0;
        Rotator {
            len,
            active: 0,
            playing,
            interval_ms: config.interval_ms,
            next_at_ms: playing.then(|| now_ms.saturating_add(config.interval_ms)),
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn active(&self) -> usize {
        self.active
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn next(&mut self) {
        if self.len > 0 {
            self.active = (self.active + 1) % self.len;
        }
    }

    pub fn prev(&mut self) {
        if self.len > 0 {
            self.active = (self.active + self.len - 1) % self.len;
        }
    }

    pub fn toggle(&mut self, now_ms: u64) -> bool {
        self.playing = !self.playing && self.len > 0;
        self.next_at_ms = self.playing.then(|| now_ms.saturating_add(self.interval_ms));
        self.playing
    }

    /// Advance once per elapsed interval. Returns true when the card changed.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        match self.next_at_ms {
            Some(due) if self.playing && now_ms >= due => {
                self.next();
                self.next_at_ms = Some(now_ms.saturating_add(self.interval_ms));
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_in_both_directions() {
        let mut r = Rotator::new(4, &RotatorConfig::default(), 0);
        r.prev();
        assert_eq!(r.active(), 3);
        r.next();
        r.next();
        assert_eq!(r.active(), 1);
    }

    #[test]
    fn autoplay_steps_on_interval() {
        let mut r = Rotator::new(4, &RotatorConfig::default(), 0);
        assert!(r.is_playing());
        assert!(!r.tick(6_999));
        assert!(r.tick(7_000));
        assert_eq!(r.active(), 1);
        assert!(!r.tick(13_999));
        assert!(r.tick(14_000));
        assert_eq!(r.active(), 2);
    }

    #[test]
    fn paused_rotator_stays_put() {
        let mut r = Rotator::new(4, &RotatorConfig::default(), 0);
        assert!(!r.toggle(100));
        assert!(!r.tick(60_000));
        assert_eq!(r.active(), 0);
        assert!(r.toggle(60_000));
        assert!(r.tick(67_000));
    }

    #[test]
    fn empty_rotator_is_inert() {
        let mut r = Rotator::new(0, &RotatorConfig::default(), 0);
        r.next();
        r.prev();
        assert!(!r.toggle(0));
        assert!(!r.tick(100_000));
        assert_eq!(r.active(), 0);
    }

    #[test]
    fn huge_interval_saturates() {
        let config = RotatorConfig {
            interval_ms: u64::MAX,
            autoplay: true,
        };
        let mut r = Rotator::new(2, &config, 10);
        assert!(!r.tick(u64::MAX - 1));
        assert!(r.tick(u64::MAX));
        assert_eq!(r.active(), 1);
        assert!(!r.toggle(u64::MAX));
        assert!(r.toggle(u64::MAX));
    }
}
