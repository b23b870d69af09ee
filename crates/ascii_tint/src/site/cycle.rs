use std::time::{Duration, Instant};

use log::{debug, trace};

use super::accent::apply_accent;
use super::document::Document;
use super::store::KeyValueStore;
use crate::ascii::{grid::GlyphGrid, markup, palette::Palette, tint::TintedGrid};

pub const DEFAULT_CYCLE_INTERVAL: Duration = Duration::from_millis(7500);

/// Recurring deadline polled from the host event loop.
#[derive(Clone, Debug)]
pub struct CycleTimer {
    interval: Duration,
    enabled: bool,
    next_deadline: Option<Instant>,
}

impl CycleTimer {
    pub fn new(interval: Duration, enabled: bool) -> Self {
        Self { interval, enabled, next_deadline: None }
    }

    pub fn disabled() -> Self {
        Self::new(DEFAULT_CYCLE_INTERVAL, false)
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_running(&self) -> bool {
        self.next_deadline.is_some()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.next_deadline
    }

    /// Arm the timer. No-op when disabled, already running or zero-length.
    pub fn start(&mut self, now: Instant) {
        if !self.enabled || self.interval.is_zero() || self.is_running() {
            return;
        }
        self.next_deadline = Some(now + self.interval);
    }

    pub fn stop(&mut self) {
        self.next_deadline = None;
    }

    /// Returns true at most once per call when a deadline has passed. Missed
    /// deadlines are skipped rather than replayed.
    pub fn poll(&mut self, now: Instant) -> bool {
        let Some(deadline) = self.next_deadline else {
            return false;
        };

        if now < deadline {
            return false;
        }

        let interval = self.interval.as_nanos();
        let periods = (now - deadline).as_nanos() / interval + 1;
        self.next_deadline = Some(deadline + nanos_to_duration(periods * interval));
        true
    }
}

fn nanos_to_duration(nanos: u128) -> Duration {
    const NANOS_PER_SEC: u128 = 1_000_000_000;
    Duration::new((nanos / NANOS_PER_SEC) as u64, (nanos % NANOS_PER_SEC) as u32)
}

impl Default for CycleTimer {
    fn default() -> Self {
        Self::new(DEFAULT_CYCLE_INTERVAL, true)
    }
}

/// Owns the accent offset, the cycle timer and the tinted logo.
#[derive(Debug)]
pub struct LogoController {
    palette: Palette,
    offset: usize,
    timer: CycleTimer,
    logo: Option<TintedGrid>,
}

impl LogoController {
    pub fn new(palette: Palette, timer: CycleTimer) -> Self {
        Self { palette, offset: 0, timer, logo: None }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn logo(&self) -> Option<&TintedGrid> {
        self.logo.as_ref()
    }

    pub fn is_running(&self) -> bool {
        self.timer.is_running()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.timer.next_deadline()
    }

    /// Segment the logo text once and publish its markup at the current offset.
    pub fn attach_logo<D: Document + ?Sized>(&mut self, text: &str, document: &mut D) {
        let grid = GlyphGrid::from_text(text);
        let tinted = TintedGrid::new(&grid, &self.palette, self.offset as i64);
        document.set_logo_markup(&markup::to_html(&tinted));
        self.logo = Some(tinted);
    }

    /// Normalize, persist and publish a new offset, then recolor the logo.
    pub fn set_offset<S, D>(&mut self, index: i64, store: &mut S, document: &mut D) -> usize
    where
        S: KeyValueStore + ?Sized,
        D: Document + ?Sized,
    {
        self.offset = apply_accent(index, &self.palette, store, document);

        if let Some(logo) = self.logo.as_mut() {
            logo.recolor(&self.palette, self.offset as i64);
            document.set_logo_markup(&markup::to_html(logo));
        }

        self.offset
    }

    /// Advance the offset by one step.
    pub fn tick<S, D>(&mut self, store: &mut S, document: &mut D) -> usize
    where
        S: KeyValueStore + ?Sized,
        D: Document + ?Sized,
    {
        let next = self.offset as i64 + 1;
        let offset = self.set_offset(next, store, document);
        trace!("accent cycled to {offset}");
        offset
    }

    pub fn start(&mut self, now: Instant) {
        if !self.timer.is_running() {
            self.timer.start(now);
            if self.timer.is_running() {
                debug!("accent cycling started every {:?}", self.timer.interval());
            }
        }
    }

    pub fn stop(&mut self) {
        if self.timer.is_running() {
            self.timer.stop();
            debug!("accent cycling stopped");
        }
    }

    /// Pause cycling while hidden and resume once visible again.
    pub fn set_visibility(&mut self, hidden: bool, now: Instant) {
        if hidden {
            self.stop();
        } else {
            self.start(now);
        }
    }

    /// Fire a tick if the timer is due. Returns whether a tick happened.
    pub fn update<S, D>(&mut self, now: Instant, store: &mut S, document: &mut D) -> bool
    where
        S: KeyValueStore + ?Sized,
        D: Document + ?Sized,
    {
        if !self.timer.poll(now) {
            return false;
        }
        self.tick(store, document);
        true
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::{CycleTimer, LogoController};
    use crate::ascii::palette::Palette;
    use crate::site::document::StaticDocument;
    use crate::site::store::{KeyValueStore, MemoryStore, ACCENT_KEY};

    const INTERVAL: Duration = Duration::from_millis(100);

    #[test]
    fn timer_start_is_idempotent() {
        let now = Instant::now();
        let mut timer = CycleTimer::new(INTERVAL, true);
        timer.start(now);
        timer.start(now + Duration::from_millis(60));
        assert_eq!(timer.next_deadline(), Some(now + INTERVAL));
    }

    #[test]
    fn disabled_timer_never_runs() {
        let now = Instant::now();
        let mut timer = CycleTimer::new(INTERVAL, false);
        timer.start(now);
        assert!(!timer.is_running());
        assert!(!timer.poll(now + INTERVAL * 10));
    }

    #[test]
    fn timer_fires_once_per_deadline_and_skips_missed_ones() {
        let now = Instant::now();
        let mut timer = CycleTimer::new(INTERVAL, true);
        timer.start(now);

        assert!(!timer.poll(now + Duration::from_millis(99)));
        assert!(timer.poll(now + INTERVAL));
        assert!(!timer.poll(now + Duration::from_millis(150)));

        // Late by several intervals: one tick, next deadline on the grid.
        assert!(timer.poll(now + Duration::from_millis(430)));
        assert_eq!(timer.next_deadline(), Some(now + Duration::from_millis(500)));
    }

    #[test]
    fn long_stall_resumes_on_the_interval_grid() {
        let now = Instant::now();
        let interval = Duration::from_micros(1);
        let mut timer = CycleTimer::new(interval, true);
        timer.start(now);

        // A day of missed microsecond deadlines, plus half a period.
        let stall = Duration::from_secs(86_400) + Duration::from_nanos(500);
        assert!(timer.poll(now + stall));
        let expected = now + Duration::from_secs(86_400) + interval;
        assert_eq!(timer.next_deadline(), Some(expected));

        // Polling exactly on a deadline moves to the following one.
        assert!(timer.poll(expected));
        assert_eq!(timer.next_deadline(), Some(expected + interval));
    }

    #[test]
    fn stop_then_start_rearms_from_now() {
        let now = Instant::now();
        let mut timer = CycleTimer::new(INTERVAL, true);
        timer.start(now);
        timer.stop();
        assert!(!timer.poll(now + INTERVAL));

        let later = now + Duration::from_secs(5);
        timer.start(later);
        assert_eq!(timer.next_deadline(), Some(later + INTERVAL));
    }

    #[test]
    fn ticks_advance_offset_and_recolor_logo() {
        let palette = Palette::site();
        let mut store = MemoryStore::new();
        let mut doc = StaticDocument::new();
        let mut controller = LogoController::new(palette.clone(), CycleTimer::disabled());

        controller.attach_logo("A B", &mut doc);
        assert_eq!(doc.logo_writes, 1);
        let first = doc.logo_markup.clone().unwrap();
        assert!(first.contains("data-seg=\"0\" style=\"color:#ff4d4d\""));

        assert_eq!(controller.tick(&mut store, &mut doc), 1);
        let second = doc.logo_markup.clone().unwrap();
        assert!(second.contains("data-seg=\"0\" style=\"color:#ff9f1c\""));
        assert!(second.contains("data-seg=\"1\" style=\"color:#ffd60a\""));
        assert_eq!(store.get(ACCENT_KEY).as_deref(), Some("1"));
        assert_eq!(doc.style_property("--accent"), Some("#ff9f1c"));
    }

    #[test]
    fn offset_wraps_after_full_cycle() {
        let mut store = MemoryStore::new();
        let mut doc = StaticDocument::new();
        let mut controller = LogoController::new(Palette::site(), CycleTimer::disabled());
        controller.set_offset(5, &mut store, &mut doc);
        controller.tick(&mut store, &mut doc);
        assert_eq!(controller.tick(&mut store, &mut doc), 0);
    }

    #[test]
    fn update_ticks_only_when_due_and_visible() {
        let now = Instant::now();
        let mut store = MemoryStore::new();
        let mut doc = StaticDocument::new();
        let mut controller = LogoController::new(Palette::site(), CycleTimer::new(INTERVAL, true));

        controller.start(now);
        assert!(!controller.update(now, &mut store, &mut doc));
        assert!(controller.update(now + INTERVAL, &mut store, &mut doc));
        assert_eq!(controller.offset(), 1);

        controller.set_visibility(true, now + INTERVAL);
        assert!(!controller.update(now + INTERVAL * 5, &mut store, &mut doc));
        assert_eq!(controller.offset(), 1);

        let resumed = now + INTERVAL * 5;
        controller.set_visibility(false, resumed);
        assert!(!controller.update(resumed + Duration::from_millis(50), &mut store, &mut doc));
        assert!(controller.update(resumed + INTERVAL, &mut store, &mut doc));
        assert_eq!(controller.offset(), 2);
    }
}
