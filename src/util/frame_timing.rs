use web_time::{Duration, Instant};

/// Windowed FPS estimate: counts frames and, once at least `window` of wall
/// time has elapsed, publishes `frames / elapsed` and starts a new window.
pub struct FpsCounter {
    window: Duration,
    window_start: Instant,
    frames: u32,
    fps: f32,
}

impl FpsCounter {
    /// Counter whose first window starts now.
    #[must_use]
    pub fn new(window: Duration) -> Self {
        Self::starting_at(window, Instant::now())
    }

    /// Counter whose first window starts at `start`.
    #[must_use]
    pub fn starting_at(window: Duration, start: Instant) -> Self {
        Self {
            window,
            window_start: start,
            frames: 0,
            fps: 0.0,
        }
    }

    /// Count a frame rendered now.
    pub fn tick(&mut self) {
        let _ = self.tick_at(Instant::now());
    }

    /// Count a frame rendered at `now`. Returns `true` when the estimate
    /// was refreshed.
    pub fn tick_at(&mut self, now: Instant) -> bool {
        self.frames += 1;
        let elapsed = now.saturating_duration_since(self.window_start);
        if elapsed < self.window || elapsed.is_zero() {
            return false;
        }
        self.fps = self.frames as f32 / elapsed.as_secs_f32();
        self.frames = 0;
        self.window_start = now;
        true
    }

    /// Most recent estimate; 0 until the first window closes.
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.fps
    }
}

/// Fixed-interval tick source for hosts that drive frames from a timer.
pub struct FrameTicker {
    interval: Duration,
    next: Instant,
}

impl FrameTicker {
    /// Ticker whose first tick is due one interval after `start`.
    #[must_use]
    pub fn new(interval: Duration, start: Instant) -> Self {
        Self {
            interval,
            next: start + interval,
        }
    }

    /// Whether a tick is due at `now`.
    #[must_use]
    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.next
    }

    /// Consume a due tick. Ticks missed by more than one interval are
    /// dropped rather than replayed.
    pub fn advance(&mut self, now: Instant) {
        self.next += self.interval;
        if self.next <= now {
            self.next = now + self.interval;
        }
    }

    /// When the next tick is due.
    #[must_use]
    pub fn deadline(&self) -> Instant {
        self.next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Duration = Duration::from_millis(500);

    #[test]
    fn no_estimate_before_window_closes() {
        let start = Instant::now();
        let mut fps = FpsCounter::starting_at(WINDOW, start);
        for i in 1..10 {
            assert!(!fps.tick_at(start + Duration::from_millis(i * 16)));
        }
        assert_eq!(fps.fps(), 0.0);
    }

    #[test]
    fn estimate_is_frames_over_elapsed() {
        let start = Instant::now();
        let mut fps = FpsCounter::starting_at(WINDOW, start);
        for i in 1..30 {
            let _ = fps.tick_at(start + Duration::from_millis(i * 10));
        }
        // 30th frame lands exactly on the window boundary
        assert!(fps.tick_at(start + Duration::from_millis(500)));
        assert!((fps.fps() - 60.0).abs() < 1e-3);
    }

    #[test]
    fn window_restarts_after_estimate() {
        let start = Instant::now();
        let mut fps = FpsCounter::starting_at(WINDOW, start);
        assert!(fps.tick_at(start + Duration::from_millis(1000)));
        assert!((fps.fps() - 1.0).abs() < 1e-3);

        let second = start + Duration::from_millis(1000);
        for i in 1..=10 {
            let _ = fps.tick_at(second + Duration::from_millis(i * 50));
        }
        assert!((fps.fps() - 20.0).abs() < 1e-3);
    }

    #[test]
    fn wall_clock_ticks_publish_an_estimate() {
        let mut fps = FpsCounter::new(Duration::from_millis(1));
        std::thread::sleep(std::time::Duration::from_millis(5));
        fps.tick();
        assert!(fps.fps() > 0.0);
    }

    #[test]
    fn ticker_fires_on_interval() {
        let start = Instant::now();
        let interval = Duration::from_millis(16);
        let mut ticker = FrameTicker::new(interval, start);
        assert!(!ticker.is_due(start));
        assert!(ticker.is_due(start + interval));

        ticker.advance(start + interval);
        assert_eq!(ticker.deadline(), start + interval * 2);
    }

    #[test]
    fn ticker_drops_missed_ticks() {
        let start = Instant::now();
        let interval = Duration::from_millis(16);
        let mut ticker = FrameTicker::new(interval, start);
        let late = start + Duration::from_millis(200);
        ticker.advance(late);
        assert_eq!(ticker.deadline(), late + interval);
    }
}
