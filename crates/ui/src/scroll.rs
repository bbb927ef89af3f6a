//! Scrolling text — one timing automaton per on-screen text field.
//!
//! A field whose text is wider than its clip rectangle cycles through
//! four phases:
//!
//! ```text
//! InitialPause --(initial dwell)--> Scrolling --(offset == max)--> EndPause
//!      ^                                                              |
//!      +------------------------- Reset <-------(end dwell)-----------+
//! ```
//!
//! While scrolling the offset advances by `scroll_step_px` once per
//! `scroll_step_ms`. The offset always stays in `0..=max_offset`.

use platform::{elapsed_ms, TextMeasure, TimingConfig};

/// Concurrent scroll fields per screen.
pub const MAX_SCROLL_SLOTS: usize = 4;

/// Phase of a scroll field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScrollPhase {
    /// Holding at offset 0.
    #[default]
    InitialPause,
    /// Advancing toward `max_offset`.
    Scrolling,
    /// Holding at `max_offset`.
    EndPause,
    /// Snap back to 0 on the next tick.
    Reset,
}

/// Animation state of one text field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollSlot {
    offset: u32,
    max_offset: u32,
    last_step_ms: u32,
    phase: ScrollPhase,
    active: bool,
}

impl ScrollSlot {
    /// Current pixel offset.
    pub fn offset(&self) -> u32 {
        self.offset
    }

    /// Text width minus clip width, 0 when the text fits.
    pub fn max_offset(&self) -> u32 {
        self.max_offset
    }

    /// Current phase.
    pub fn phase(&self) -> ScrollPhase {
        self.phase
    }

    /// Whether the field overflows and is animating.
    pub fn is_active(&self) -> bool {
        self.active
    }

    fn restart(&mut self, max_offset: u32, now: u32) {
        *self = Self {
            offset: 0,
            max_offset,
            last_step_ms: now,
            phase: ScrollPhase::InitialPause,
            active: true,
        };
    }

    fn tick(&mut self, timing: &TimingConfig, now: u32) {
        let elapsed = elapsed_ms(now, self.last_step_ms);
        match self.phase {
            ScrollPhase::InitialPause => {
                if elapsed >= timing.scroll_initial_pause_ms {
                    self.phase = ScrollPhase::Scrolling;
                    self.last_step_ms = now;
                }
            }
            ScrollPhase::Scrolling => {
                if elapsed >= timing.scroll_step_ms {
                    self.offset = self
                        .offset
                        .saturating_add(u32::from(timing.scroll_step_px))
                        .min(self.max_offset);
                    self.last_step_ms = now;
                    if self.offset >= self.max_offset {
                        self.phase = ScrollPhase::EndPause;
                    }
                }
            }
            ScrollPhase::EndPause => {
                if elapsed >= timing.scroll_end_pause_ms {
                    self.phase = ScrollPhase::Reset;
                    self.last_step_ms = now;
                }
            }
            ScrollPhase::Reset => {
                self.offset = 0;
                self.phase = ScrollPhase::InitialPause;
                self.last_step_ms = now;
            }
        }
    }
}

/// Fixed set of scroll slots sharing one timing configuration.
#[derive(Debug, Clone)]
pub struct ScrollAnimator<const N: usize = MAX_SCROLL_SLOTS> {
    slots: [ScrollSlot; N],
    timing: TimingConfig,
}

impl<const N: usize> ScrollAnimator<N> {
    /// All slots static.
    pub fn new(timing: TimingConfig) -> Self {
        Self { slots: [ScrollSlot::default(); N], timing }
    }

    /// Advance `slot` for one render tick and return its offset.
    ///
    /// A field that fits is forced static at 0. A change in overflow
    /// (new text or new clip width) restarts the cycle. Out-of-range slots
    /// always render at 0.
    pub fn update(&mut self, slot: usize, text_width: u32, clip_width: u32, now: u32) -> u32 {
        let timing = self.timing;
        let Some(s) = self.slots.get_mut(slot) else {
            return 0;
        };
        let overflow = text_width.saturating_sub(clip_width);
        if overflow == 0 {
            *s = ScrollSlot::default();
            return 0;
        }
        if !s.active || overflow != s.max_offset {
            s.restart(overflow, now);
            return 0;
        }
        s.tick(&timing, now);
        s.offset
    }

    /// [`update`](Self::update) with the width measured from `text`.
    pub fn update_text<M: TextMeasure + ?Sized>(
        &mut self,
        slot: usize,
        measure: &M,
        text: &str,
        clip_width: u32,
        now: u32,
    ) -> u32 {
        self.update(slot, measure.text_width(text), clip_width, now)
    }

    /// Make every slot static (screen change).
    pub fn reset_all(&mut self) {
        self.slots = [ScrollSlot::default(); N];
    }

    /// Inspect a slot.
    pub fn slot(&self, slot: usize) -> Option<&ScrollSlot> {
        self.slots.get(slot)
    }

    /// Whether any slot still needs redrawing each frame.
    pub fn any_active(&self) -> bool {
        self.slots.iter().any(|s| s.active)
    }
}

impl<const N: usize> Default for ScrollAnimator<N> {
    fn default() -> Self {
        Self::new(TimingConfig::DEFAULT)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use platform::FixedAdvance;

    const T: TimingConfig = TimingConfig::DEFAULT;

    /// Start a 140/100 field at `t0` and run it into the scrolling phase.
    fn scrolling_field(anim: &mut ScrollAnimator, t0: u32) -> u32 {
        assert_eq!(anim.update(0, 140, 100, t0), 0);
        let t = t0.wrapping_add(T.scroll_initial_pause_ms);
        assert_eq!(anim.update(0, 140, 100, t), 0);
        assert_eq!(anim.slot(0).unwrap().phase(), ScrollPhase::Scrolling);
        t
    }

    #[test]
    fn text_that_fits_is_static() {
        let mut anim: ScrollAnimator = ScrollAnimator::default();
        assert_eq!(anim.update(0, 80, 100, 0), 0);
        assert_eq!(anim.update(0, 100, 100, 10_000), 0);
        assert!(!anim.slot(0).unwrap().is_active());
        assert!(!anim.any_active());
    }

    #[test]
    fn overflow_starts_in_initial_pause() {
        let mut anim: ScrollAnimator = ScrollAnimator::default();
        anim.update(1, 140, 100, 0);
        let slot = anim.slot(1).unwrap();
        assert!(slot.is_active());
        assert_eq!(slot.max_offset(), 40);
        assert_eq!(slot.phase(), ScrollPhase::InitialPause);
        assert_eq!(anim.update(1, 140, 100, T.scroll_initial_pause_ms - 1), 0);
        assert_eq!(anim.slot(1).unwrap().phase(), ScrollPhase::InitialPause);
    }

    #[test]
    fn scroll_offset_is_two_k_capped_at_forty() {
        let mut anim: ScrollAnimator = ScrollAnimator::default();
        let mut t = scrolling_field(&mut anim, 0);
        for k in 1..=20u32 {
            t += T.scroll_step_ms;
            assert_eq!(anim.update(0, 140, 100, t), (2 * k).min(40));
        }
        assert_eq!(anim.slot(0).unwrap().phase(), ScrollPhase::EndPause);
    }

    #[test]
    fn end_pause_then_reset_to_initial_pause() {
        let mut anim: ScrollAnimator = ScrollAnimator::default();
        let mut t = scrolling_field(&mut anim, 0);
        for _ in 0..20 {
            t += T.scroll_step_ms;
            anim.update(0, 140, 100, t);
        }
        t += T.scroll_end_pause_ms - 1;
        assert_eq!(anim.update(0, 140, 100, t), 40);
        t += 1;
        assert_eq!(anim.update(0, 140, 100, t), 40);
        assert_eq!(anim.slot(0).unwrap().phase(), ScrollPhase::Reset);
        t += 1;
        assert_eq!(anim.update(0, 140, 100, t), 0);
        assert_eq!(anim.slot(0).unwrap().phase(), ScrollPhase::InitialPause);
    }

    #[test]
    fn steps_wait_for_full_interval() {
        let mut anim: ScrollAnimator = ScrollAnimator::default();
        let t = scrolling_field(&mut anim, 0);
        assert_eq!(anim.update(0, 140, 100, t + T.scroll_step_ms - 1), 0);
        assert_eq!(anim.update(0, 140, 100, t + T.scroll_step_ms), 2);
    }

    #[test]
    fn changed_text_restarts_cycle() {
        let mut anim: ScrollAnimator = ScrollAnimator::default();
        let mut t = scrolling_field(&mut anim, 0);
        t += T.scroll_step_ms;
        assert_eq!(anim.update(0, 140, 100, t), 2);
        assert_eq!(anim.update(0, 160, 100, t + 1), 0);
        let slot = anim.slot(0).unwrap();
        assert_eq!(slot.max_offset(), 60);
        assert_eq!(slot.phase(), ScrollPhase::InitialPause);
    }

    #[test]
    fn fitting_text_stops_mid_scroll() {
        let mut anim: ScrollAnimator = ScrollAnimator::default();
        let t = scrolling_field(&mut anim, 0);
        anim.update(0, 140, 100, t + T.scroll_step_ms);
        assert_eq!(anim.update(0, 90, 100, t + 2 * T.scroll_step_ms), 0);
        assert!(!anim.slot(0).unwrap().is_active());
    }

    #[test]
    fn survives_clock_wrap() {
        let mut anim: ScrollAnimator = ScrollAnimator::default();
        let t0 = u32::MAX - 100;
        let t = scrolling_field(&mut anim, t0);
        assert_eq!(anim.update(0, 140, 100, t.wrapping_add(T.scroll_step_ms)), 2);
    }

    #[test]
    fn reset_all_makes_slots_static() {
        let mut anim: ScrollAnimator = ScrollAnimator::default();
        anim.update(0, 140, 100, 0);
        anim.update(3, 300, 100, 0);
        assert!(anim.any_active());
        anim.reset_all();
        assert!(!anim.any_active());
    }

    #[test]
    fn out_of_range_slot_is_static() {
        let mut anim: ScrollAnimator = ScrollAnimator::default();
        assert_eq!(anim.update(MAX_SCROLL_SLOTS, 500, 10, 0), 0);
        assert!(anim.slot(MAX_SCROLL_SLOTS).is_none());
    }

    #[test]
    fn measures_text_through_capability() {
        let mut anim: ScrollAnimator = ScrollAnimator::default();
        // 20 chars × 8 px = 160 px in a 100 px clip.
        anim.update_text(0, &FixedAdvance::DEVICE_FONT, "The Parking Garage!!", 100, 0);
        assert_eq!(anim.slot(0).unwrap().max_offset(), 60);
    }
}
