//! Roll, settle and hold animation.
//!
//! ```text
//! Idle ──press──▶ Rolling ──last delay──▶ Settling ──blinks done──▶ Steady ──hold──▶ Idle
//!                    ▲                        │                        │
//!                    └──────────press─────────┴────────────────────────┘
//! ```
//!
//! While rolling, the face advances each time the current delay elapses and
//! the delays get longer, so the die visibly slows down before the result is
//! drawn. Holding the button keeps forcing the first (shortest) delay, which
//! makes the faces spin quickly until release.

use crate::config::Config;
use crate::face::Face;
use crate::phase::{Blink, PhaseTimer};
use crate::rng::Rng;
use crate::tick::{Tick, Ticks};

/// Where the roll animation is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RollPhase {
    #[default]
    Idle,
    Rolling,
    /// Blinking the freshly drawn result.
    Settling,
    /// Holding the result before blanking.
    Steady,
}

/// Roll animation state machine.
#[derive(Debug)]
pub struct DieAnimator {
    phase: RollPhase,
    /// Index into `delays` of the delay currently being waited out.
    step: usize,
    face: Face,
    delays: [Ticks; 4],
    settle_lit: Ticks,
    settle_dark: Ticks,
    settle_cycles: u8,
    hold: Ticks,
}

impl DieAnimator {
    /// Idle animator using the roll and settle timings of `config`.
    pub const fn new(config: &Config) -> Self {
        Self {
            phase: RollPhase::Idle,
            step: 0,
            // The first roll animation starts from one.
            face: Face::SIX,
            delays: config.roll_delays,
            settle_lit: config.settle_lit,
            settle_dark: config.settle_dark,
            settle_cycles: config.settle_cycles,
            hold: config.hold,
        }
    }

    /// Current phase.
    pub const fn phase(&self) -> RollPhase {
        self.phase
    }

    /// `true` when nothing is animating.
    pub const fn is_idle(&self) -> bool {
        matches!(self.phase, RollPhase::Idle)
    }

    /// Index into the roll delays.
    pub const fn step(&self) -> usize {
        self.step
    }

    /// Last face animated or rolled; never blank.
    pub const fn face(&self) -> Face {
        self.face
    }

    /// (Re)starts the roll from the first delay, dropping any settle or hold
    /// in progress.
    pub fn press(&mut self) {
        if self.phase != RollPhase::Rolling {
            debug!("rolling");
        }
        self.phase = RollPhase::Rolling;
        self.step = 0;
    }

    /// Advances the animation. Returns the face to show when the display has
    /// to change.
    pub fn advance(&mut self, now: Tick, timer: &mut PhaseTimer, rng: &mut Rng) -> Option<Face> {
        let elapsed = now.since(timer.mark);

        match self.phase {
            RollPhase::Idle => None,
            RollPhase::Rolling => {
                if elapsed < self.delays[self.step] {
                    return None;
                }
                timer.mark = now;
                self.step += 1;

                if self.step >= self.delays.len() {
                    self.face = rng.roll_face();
                    self.phase = RollPhase::Settling;
                    info!("rolled {}", self.face.value());
                } else {
                    self.face = self.face.next();
                }
                Some(self.face)
            }
            RollPhase::Settling => {
                let due = match timer.blink {
                    Blink::Start => true,
                    Blink::Lit => elapsed >= self.settle_lit,
                    Blink::Dark => elapsed >= self.settle_dark,
                };
                if !due {
                    return None;
                }
                timer.mark = now;

                if timer.blink == Blink::Lit {
                    timer.blink = Blink::Dark;
                    return Some(Face::BLANK);
                }

                timer.blink = Blink::Lit;
                timer.cycles += 1;
                if timer.cycles > self.settle_cycles {
                    timer.clear_blinks();
                    self.phase = RollPhase::Steady;
                    debug!("holding result");
                }
                Some(self.face)
            }
            RollPhase::Steady => {
                if elapsed < self.hold {
                    return None;
                }
                self.phase = RollPhase::Idle;
                debug!("idle");
                Some(Face::BLANK)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Harness {
        animator: DieAnimator,
        timer: PhaseTimer,
        rng: Rng,
        now: Tick,
        shown: Option<Face>,
    }

    impl Harness {
        fn new() -> Self {
            Self {
                animator: DieAnimator::new(&Config::new()),
                timer: PhaseTimer::default(),
                rng: Rng::new(),
                now: Tick::from_raw(0),
                shown: None,
            }
        }

        fn press(&mut self) {
            self.timer.restart(self.now);
            self.animator.press();
        }

        fn tick(&mut self) -> Option<Face> {
            self.now = self.now.wrapping_add(1);
            let face = self.animator.advance(self.now, &mut self.timer, &mut self.rng);
            if face.is_some() {
                self.shown = face;
            }
            face
        }

        fn run_until(&mut self, phase: RollPhase, limit: usize) -> usize {
            for ticks in 1..=limit {
                self.tick();
                if self.animator.phase() == phase {
                    return ticks;
                }
            }
            panic!("never reached {phase:?}");
        }
    }

    #[test]
    fn idle_does_nothing() {
        let mut h = Harness::new();
        for _ in 0..300 {
            assert_eq!(h.tick(), None);
        }
    }

    #[test]
    fn roll_decelerates_then_draws_a_result() {
        let mut h = Harness::new();
        h.press();

        let mut changes = Vec::new();
        for t in 1..=46u8 {
            if let Some(face) = h.tick() {
                changes.push((t, face));
            }
        }

        // Faces advance at 3, 3+6, 3+6+12 ticks; the result lands at 3+6+12+25.
        let times: Vec<u8> = changes.iter().map(|(t, _)| *t).collect();
        assert_eq!(times, [3, 9, 21, 46]);
        assert_eq!(changes[0].1, Face::ONE);
        assert_eq!(changes[1].1.value(), 2);
        assert_eq!(changes[2].1.value(), 3);
        assert_eq!(h.animator.phase(), RollPhase::Settling);
        assert_eq!(changes[3].1, Rng::new().roll_face());
    }

    #[test]
    fn settle_blinks_four_times_then_holds() {
        let mut h = Harness::new();
        h.press();
        h.run_until(RollPhase::Settling, 100);
        let result = h.animator.face();

        let mut writes = Vec::new();
        while h.animator.phase() == RollPhase::Settling {
            if let Some(face) = h.tick() {
                writes.push(face);
            }
        }

        let blank = Face::BLANK;
        assert_eq!(writes, [result, blank, result, blank, result, blank, result]);
        assert_eq!(h.animator.phase(), RollPhase::Steady);
        assert_eq!(h.timer.cycles, 0);
        assert_eq!(h.shown, Some(result));
    }

    #[test]
    fn steady_holds_then_blanks() {
        let mut h = Harness::new();
        h.press();
        h.run_until(RollPhase::Steady, 200);

        let held = h.run_until(RollPhase::Idle, 200);
        assert_eq!(held, 125);
        assert_eq!(h.shown, Some(Face::BLANK));
    }

    #[test]
    fn faces_stay_valid_outside_idle() {
        let mut h = Harness::new();
        for _ in 0..5 {
            h.press();
            while !h.animator.is_idle() {
                let face = h.tick();
                match h.animator.phase() {
                    RollPhase::Rolling | RollPhase::Steady => {
                        assert!(face.is_none_or(|f| !f.is_blank()));
                    }
                    RollPhase::Settling | RollPhase::Idle => {}
                }
                if !h.animator.is_idle() {
                    assert!((1..=6).contains(&h.animator.face().value()));
                }
            }
        }
    }

    #[test]
    fn press_interrupts_settle_and_hold() {
        let mut h = Harness::new();
        h.press();
        h.run_until(RollPhase::Settling, 100);
        h.tick();
        h.press();
        assert_eq!(h.animator.phase(), RollPhase::Rolling);
        assert_eq!(h.animator.step(), 0);

        h.run_until(RollPhase::Steady, 300);
        h.press();
        assert_eq!(h.animator.phase(), RollPhase::Rolling);
        assert_eq!(h.animator.step(), 0);
    }

    #[test]
    fn holding_spins_on_the_first_delay() {
        let mut h = Harness::new();
        h.press();
        let mut changes = 0;
        for _ in 0..30 {
            h.animator.press();
            if h.tick().is_some() {
                changes += 1;
            }
        }
        assert_eq!(changes, 10);
        assert_eq!(h.animator.phase(), RollPhase::Rolling);
        assert_eq!(h.animator.face().value(), 4);
    }
}
