//! Frame pacing: decides which display callbacks turn into rendered ticks and
//! measures the throughput actually achieved.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameRate {
    Capped(u32),
    Unlimited,
}

impl FrameRate {
    pub const PRESETS: [FrameRate; 4] = [
        FrameRate::Capped(30),
        FrameRate::Capped(60),
        FrameRate::Capped(120),
        FrameRate::Unlimited,
    ];

    /// `None` and a zero cap both mean unlimited.
    pub fn from_fps(fps: Option<u32>) -> Self {
        match fps {
            Some(fps) if fps > 0 => FrameRate::Capped(fps),
            _ => FrameRate::Unlimited,
        }
    }

    /// Milliseconds between rendered frames; 0 means unlimited.
    pub fn interval_ms(self) -> f64 {
        match self {
            FrameRate::Capped(fps) if fps > 0 => 1000.0 / fps as f64,
            _ => 0.0,
        }
    }
}

impl fmt::Display for FrameRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameRate::Capped(fps) => write!(f, "{fps}"),
            FrameRate::Unlimited => f.write_str("Unlimited"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    pub now_ms: f64,
    /// Seconds since the previous rendered tick; 0 on the first one.
    pub delta_seconds: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameDecision {
    Skip,
    Render(Tick),
}

/// Rolling one-second frame counter.
#[derive(Debug, Clone, Copy, Default)]
pub struct FpsCounter {
    frame_count: u32,
    window_start_s: f64,
    last_fps: Option<f64>,
}

impl FpsCounter {
    /// Counts one frame. Returns the achieved rate once at least a second has
    /// passed since the previous report.
    pub fn record(&mut self, now_s: f64) -> Option<f64> {
        self.frame_count += 1;
        let elapsed = now_s - self.window_start_s;
        if elapsed < 1.0 {
            return None;
        }
        let fps = self.frame_count as f64 / elapsed;
        self.frame_count = 0;
        self.window_start_s = now_s;
        self.last_fps = Some(fps);
        Some(fps)
    }

    pub fn last_fps(&self) -> Option<f64> {
        self.last_fps
    }
}

#[derive(Debug, Clone)]
pub struct FrameScheduler {
    rate: FrameRate,
    frame_interval_ms: f64,
    last_frame_ms: f64,
    last_tick_ms: Option<f64>,
    fps: FpsCounter,
}

impl FrameScheduler {
    pub fn new(rate: FrameRate) -> Self {
        Self {
            rate,
            frame_interval_ms: rate.interval_ms(),
            last_frame_ms: 0.0,
            last_tick_ms: None,
            fps: FpsCounter::default(),
        }
    }

    pub fn rate(&self) -> FrameRate {
        self.rate
    }

    pub fn frame_interval_ms(&self) -> f64 {
        self.frame_interval_ms
    }

    pub fn is_unlimited(&self) -> bool {
        self.frame_interval_ms <= 0.0
    }

    /// Only the interval changes; the drift-correction baseline is kept so
    /// the next frame lands on the first boundary of the new interval.
    pub fn set_rate(&mut self, rate: FrameRate) {
        if rate != self.rate {
            log::info!("target frame rate {} -> {}", self.rate, rate);
        }
        self.rate = rate;
        self.frame_interval_ms = rate.interval_ms();
    }

    /// Decides whether the callback at `now_ms` renders. A skip leaves all
    /// state untouched.
    pub fn poll(&mut self, now_ms: f64) -> FrameDecision {
        if self.is_unlimited() {
            self.last_frame_ms = now_ms;
        } else {
            let elapsed = now_ms - self.last_frame_ms;
            if elapsed < self.frame_interval_ms {
                return FrameDecision::Skip;
            }
            self.last_frame_ms = now_ms - (elapsed % self.frame_interval_ms);
        }

        let delta_seconds = self
            .last_tick_ms
            .map_or(0.0, |previous| ((now_ms - previous) / 1000.0).max(0.0) as f32);
        self.last_tick_ms = Some(now_ms);
        FrameDecision::Render(Tick {
            now_ms,
            delta_seconds,
        })
    }

    /// Feeds a rendered frame into the throughput counter.
    pub fn record_frame(&mut self, now_ms: f64) -> Option<f64> {
        self.fps.record(now_ms / 1000.0)
    }

    pub fn last_fps(&self) -> Option<f64> {
        self.fps.last_fps()
    }

    /// Drift-corrected time of the last rendered frame.
    pub fn last_frame_ms(&self) -> f64 {
        self.last_frame_ms
    }
}
