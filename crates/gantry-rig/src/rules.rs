//! Held-key rules that deform and turn the rig.
//!
//! At most one rule fires per frame. Directions are checked in the order
//! Up, Down, Right, Left; within a direction Shift wins over Control, and Control
//! wins over the unmodified rule. A rule that would break a size constraint is
//! refused and leaves the rig untouched.

use std::collections::HashSet;

use crate::config::RigConfig;
use crate::rig::{Part, Rig};

/// Logical keys the rules understand. Anything else is never asked for.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum RigKey {
    Up,
    Down,
    Left,
    Right,
    Shift,
    Control,
    /// Releasing this asks the loop to close.
    Exit,
}

/// Key state supplied by the platform layer.
pub trait KeySource {
    fn is_held(&self, key: RigKey) -> bool;

    /// Whether `key` went up this frame.
    fn was_released(&self, key: RigKey) -> bool;
}

/// Owned key state for one frame: keys held down and keys released since the last frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeySnapshot {
    pub held: HashSet<RigKey>,
    pub released: HashSet<RigKey>,
}

impl KeySnapshot {
    pub fn holding(keys: impl IntoIterator<Item = RigKey>) -> Self {
        Self {
            held: keys.into_iter().collect(),
            released: HashSet::new(),
        }
    }

    pub fn releasing(keys: impl IntoIterator<Item = RigKey>) -> Self {
        Self {
            held: HashSet::new(),
            released: keys.into_iter().collect(),
        }
    }
}

impl KeySource for KeySnapshot {
    fn is_held(&self, key: RigKey) -> bool {
        self.held.contains(&key)
    }

    fn was_released(&self, key: RigKey) -> bool {
        self.released.contains(&key)
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Direction {
    Increase,
    Decrease,
}

impl Direction {
    #[inline]
    fn sign(self) -> f32 {
        match self {
            Direction::Increase => 1.0,
            Direction::Decrease => -1.0,
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Rule {
    /// Column height.
    ResizePrimary(Direction),
    /// Arm length.
    ResizeSecondary(Direction),
    /// Hanger length.
    ResizeTertiary(Direction),
    /// Whole assembly about the vertical axis through the pivot.
    Yaw(Direction),
    /// Arm and hanger about the pivot's X axis.
    Swing(Direction),
    /// Hanger about its own center.
    Spin(Direction),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Outcome {
    Applied(Rule),
    /// Constraint would be violated; nothing changed.
    Refused(Rule),
}

/// Picks the rule for the current key state.
pub fn select_rule(keys: &(impl KeySource + ?Sized)) -> Option<Rule> {
    let shift = keys.is_held(RigKey::Shift);
    let control = keys.is_held(RigKey::Control);

    let vertical = |dir| {
        if shift {
            Rule::ResizeSecondary(dir)
        } else if control {
            Rule::ResizeTertiary(dir)
        } else {
            Rule::ResizePrimary(dir)
        }
    };
    let horizontal = |dir| {
        if shift {
            Rule::Swing(dir)
        } else if control {
            Rule::Spin(dir)
        } else {
            Rule::Yaw(dir)
        }
    };

    if keys.is_held(RigKey::Up) {
        Some(vertical(Direction::Increase))
    } else if keys.is_held(RigKey::Down) {
        Some(vertical(Direction::Decrease))
    } else if keys.is_held(RigKey::Right) {
        Some(horizontal(Direction::Increase))
    } else if keys.is_held(RigKey::Left) {
        Some(horizontal(Direction::Decrease))
    } else {
        None
    }
}

/// Stateless per-frame rule evaluator.
#[derive(Debug, Clone, Default)]
pub struct InputRuleEngine {
    config: RigConfig,
}

impl InputRuleEngine {
    pub fn new(config: RigConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RigConfig {
        &self.config
    }

    /// Reads `keys` and applies at most one rule to `rig`.
    pub fn step(&self, keys: &(impl KeySource + ?Sized), rig: &mut Rig) -> Option<Outcome> {
        select_rule(keys).map(|rule| self.apply(rule, rig))
    }

    pub fn apply(&self, rule: Rule, rig: &mut Rig) -> Outcome {
        let applied = match rule {
            Rule::ResizePrimary(dir) => self.resize_primary(dir, rig),
            Rule::ResizeSecondary(dir) => self.resize_secondary(dir, rig),
            Rule::ResizeTertiary(dir) => self.resize_tertiary(dir, rig),
            Rule::Yaw(dir) => {
                self.yaw(dir, rig);
                true
            }
            Rule::Swing(dir) => {
                self.swing(dir, rig);
                true
            }
            Rule::Spin(dir) => {
                self.spin(dir, rig);
                true
            }
        };

        if applied {
            Outcome::Applied(rule)
        } else {
            Outcome::Refused(rule)
        }
    }

    /// Largest total height the hanger may have while the column is `primary_stretch_y` tall.
    pub fn tertiary_ceiling(rig: &Rig, primary_stretch_y: f32) -> f32 {
        rig.primary().size() * primary_stretch_y - rig.secondary().size()
    }

    fn resize_primary(&self, dir: Direction, rig: &mut Rig) -> bool {
        let step = self.config.stretch_step * dir.sign();
        let next = rig.primary().stretch_y() + step;

        if dir == Direction::Decrease {
            let min = rig.secondary().size() / self.config.primary_min_divisor
                + rig.tertiary().stretch_y();
            if next < min {
                return false;
            }
            let hanger = rig.tertiary().size() * rig.tertiary().stretch_y();
            if hanger > Self::tertiary_ceiling(rig, next) {
                return false;
            }
        }

        let before = rig.shared_pivot();
        rig.shape_mut(Part::Primary).set_stretch_y(next);
        let dy = rig.shared_pivot().y - before.y;

        for part in [Part::Secondary, Part::Tertiary] {
            let shape = rig.shape_mut(part);
            let y = shape.y();
            shape.set_y(y + dy);
        }
        rig.sync_pivots();
        true
    }

    fn resize_secondary(&self, dir: Direction, rig: &mut Rig) -> bool {
        let step = self.config.stretch_step * dir.sign();
        let next = rig.secondary().stretch_x() + step;

        if dir == Direction::Decrease && next < self.config.secondary_min_stretch {
            return false;
        }

        // The near end stays on the column, so the center moves by half the growth
        // and the far end (where the hanger is) by all of it.
        let growth = rig.secondary().size() * step;

        let secondary = rig.shape_mut(Part::Secondary);
        let x = secondary.x();
        secondary.set_stretch_x(next).set_x(x + growth * 0.5);

        let tertiary = rig.shape_mut(Part::Tertiary);
        let x = tertiary.x();
        tertiary.set_x(x + growth);
        true
    }

    fn resize_tertiary(&self, dir: Direction, rig: &mut Rig) -> bool {
        let step = self.config.stretch_step * dir.sign();
        let next = rig.tertiary().stretch_y() + step;

        match dir {
            Direction::Decrease if next < self.config.tertiary_min_stretch => return false,
            Direction::Increase
                if rig.tertiary().size() * next
                    > Self::tertiary_ceiling(rig, rig.primary().stretch_y()) =>
            {
                return false;
            }
            _ => {}
        }

        // Top stays under the arm; the center moves opposite to the growth.
        let tertiary = rig.shape_mut(Part::Tertiary);
        let y = tertiary.y();
        let growth = tertiary.size() * step;
        tertiary.set_stretch_y(next).set_y(y - growth * 0.5);
        true
    }

    fn yaw(&self, dir: Direction, rig: &mut Rig) {
        let delta = self.config.rotation_step * dir.sign();
        rig.sync_pivots();
        for part in [Part::Primary, Part::Secondary, Part::Tertiary] {
            let shape = rig.shape_mut(part);
            let r = shape.rotate_y();
            shape.set_rotate_y(r + delta);
        }
    }

    fn swing(&self, dir: Direction, rig: &mut Rig) {
        let delta = self.config.rotation_step * dir.sign();
        rig.sync_pivots();
        for part in [Part::Secondary, Part::Tertiary] {
            let shape = rig.shape_mut(part);
            let r = shape.rotate_x();
            shape.set_rotate_x(r + delta);
        }
    }

    fn spin(&self, dir: Direction, rig: &mut Rig) {
        let delta = self.config.rotation_step * dir.sign();
        let tertiary = rig.shape_mut(Part::Tertiary);
        let r = tertiary.local_rotate_y();
        tertiary.set_local_rotate_y(r + delta);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(held: &[RigKey]) -> KeySnapshot {
        KeySnapshot::holding(held.iter().copied())
    }

    fn setup() -> (InputRuleEngine, Rig) {
        (InputRuleEngine::default(), Rig::default())
    }

    // ── selection ─────────────────────────────────────────────────────────

    #[test]
    fn no_keys_no_rule() {
        assert_eq!(select_rule(&keys(&[])), None);
        assert_eq!(select_rule(&keys(&[RigKey::Shift, RigKey::Control])), None);
    }

    #[test]
    fn modifiers_pick_the_target() {
        use Direction::*;
        assert_eq!(select_rule(&keys(&[RigKey::Up])), Some(Rule::ResizePrimary(Increase)));
        assert_eq!(
            select_rule(&keys(&[RigKey::Down, RigKey::Shift])),
            Some(Rule::ResizeSecondary(Decrease))
        );
        assert_eq!(
            select_rule(&keys(&[RigKey::Up, RigKey::Control])),
            Some(Rule::ResizeTertiary(Increase))
        );
        assert_eq!(select_rule(&keys(&[RigKey::Left])), Some(Rule::Yaw(Decrease)));
        assert_eq!(
            select_rule(&keys(&[RigKey::Right, RigKey::Shift])),
            Some(Rule::Swing(Increase))
        );
        assert_eq!(
            select_rule(&keys(&[RigKey::Right, RigKey::Control])),
            Some(Rule::Spin(Increase))
        );
    }

    #[test]
    fn first_direction_wins() {
        let held = keys(&[RigKey::Left, RigKey::Down, RigKey::Right]);
        assert_eq!(select_rule(&held), Some(Rule::ResizePrimary(Direction::Decrease)));
    }

    #[test]
    fn shift_wins_over_control() {
        let held = keys(&[RigKey::Up, RigKey::Shift, RigKey::Control]);
        assert_eq!(select_rule(&held), Some(Rule::ResizeSecondary(Direction::Increase)));
    }

    // ── primary ───────────────────────────────────────────────────────────

    #[test]
    fn primary_grow_moves_pivot_by_half_size_per_step() {
        let (engine, mut rig) = setup();
        let pivot = rig.shared_pivot().y;
        let secondary_y = rig.secondary().y();
        let tertiary_y = rig.tertiary().y();

        let out = engine.step(&keys(&[RigKey::Up]), &mut rig);
        assert_eq!(out, Some(Outcome::Applied(Rule::ResizePrimary(Direction::Increase))));

        assert_eq!(rig.primary().stretch_y(), 9.0);
        let dy = rig.primary().size() / 2.0 * 1.0;
        assert_eq!(rig.shared_pivot().y, pivot + dy);
        assert_eq!(rig.secondary().y(), secondary_y + dy);
        assert_eq!(rig.tertiary().y(), tertiary_y + dy);
        for part in [Part::Primary, Part::Secondary, Part::Tertiary] {
            assert_eq!(rig.shape(part).pivot(), rig.shared_pivot());
        }
    }

    #[test]
    fn primary_shrink_stops_at_hierarchy_minimum() {
        let (engine, mut rig) = setup();
        let down = keys(&[RigKey::Down]);

        // 2 / 1.5 + 4 = 5.33..., so 8 -> 7 -> 6 then refuse.
        for _ in 0..10 {
            engine.step(&down, &mut rig);
        }
        assert_eq!(rig.primary().stretch_y(), 6.0);

        let before = rig.clone();
        let out = engine.step(&down, &mut rig);
        assert_eq!(out, Some(Outcome::Refused(Rule::ResizePrimary(Direction::Decrease))));
        assert_eq!(rig, before);
    }

    // ── secondary ─────────────────────────────────────────────────────────

    #[test]
    fn secondary_grow_keeps_ends_attached() {
        let (engine, mut rig) = setup();
        let hanger_offset = {
            let (s, t) = (rig.secondary(), rig.tertiary());
            (s.x() + s.half_extents().x) - (t.x() + t.half_extents().x)
        };

        engine.step(&keys(&[RigKey::Up, RigKey::Shift]), &mut rig);

        let (p, s, t) = (rig.primary(), rig.secondary(), rig.tertiary());
        assert_eq!(s.stretch_x(), 5.0);
        assert_eq!(s.x() - s.half_extents().x, p.x() + p.half_extents().x);
        assert_eq!(
            (s.x() + s.half_extents().x) - (t.x() + t.half_extents().x),
            hanger_offset
        );
        assert_eq!(t.x(), 10.0);
    }

    #[test]
    fn secondary_shrink_refused_at_floor() {
        let (engine, mut rig) = setup();
        rig.shape_mut(Part::Secondary).set_stretch_x(1.0);
        let before = rig.clone();

        let out = engine.step(&keys(&[RigKey::Down, RigKey::Shift]), &mut rig);
        assert_eq!(out, Some(Outcome::Refused(Rule::ResizeSecondary(Direction::Decrease))));
        assert_eq!(rig, before);
    }

    #[test]
    fn secondary_never_below_floor() {
        let (engine, mut rig) = setup();
        let down = keys(&[RigKey::Down, RigKey::Shift]);
        for _ in 0..20 {
            engine.step(&down, &mut rig);
            assert!(rig.secondary().stretch_x() >= engine.config().secondary_min_stretch);
        }
        assert_eq!(rig.secondary().stretch_x(), 1.0);
    }

    // ── tertiary ──────────────────────────────────────────────────────────

    #[test]
    fn tertiary_grow_keeps_top_attached() {
        let (engine, mut rig) = setup();
        let top = rig.tertiary().y() + rig.tertiary().half_extents().y;

        engine.step(&keys(&[RigKey::Up, RigKey::Control]), &mut rig);

        assert_eq!(rig.tertiary().stretch_y(), 5.0);
        assert_eq!(rig.tertiary().y() + rig.tertiary().half_extents().y, top);
        assert_eq!(rig.tertiary().y(), 1.0);
    }

    #[test]
    fn tertiary_never_exceeds_ceiling() {
        let (engine, mut rig) = setup();
        let up = keys(&[RigKey::Up, RigKey::Control]);
        for _ in 0..20 {
            engine.step(&up, &mut rig);
            let ceiling = InputRuleEngine::tertiary_ceiling(&rig, rig.primary().stretch_y());
            assert!(rig.tertiary().size() * rig.tertiary().stretch_y() <= ceiling);
            assert!(rig.tertiary().stretch_y() <= ceiling);
        }
        // 2 * 8 - 2 = 14 -> stretch 7.
        assert_eq!(rig.tertiary().stretch_y(), 7.0);
    }

    #[test]
    fn tertiary_shrink_refused_at_floor() {
        let (engine, mut rig) = setup();
        let down = keys(&[RigKey::Down, RigKey::Control]);
        for _ in 0..10 {
            engine.step(&down, &mut rig);
        }
        assert_eq!(rig.tertiary().stretch_y(), 1.0);
    }

    #[test]
    fn mixed_resizes_keep_constraints() {
        let (engine, mut rig) = setup();
        let script = [
            keys(&[RigKey::Up, RigKey::Control]),
            keys(&[RigKey::Down]),
            keys(&[RigKey::Down, RigKey::Shift]),
            keys(&[RigKey::Up, RigKey::Control]),
            keys(&[RigKey::Down]),
        ];
        for _ in 0..8 {
            for held in &script {
                engine.step(held, &mut rig);
                let ceiling = InputRuleEngine::tertiary_ceiling(&rig, rig.primary().stretch_y());
                assert!(rig.tertiary().size() * rig.tertiary().stretch_y() <= ceiling);
                assert!(rig.secondary().stretch_x() >= 1.0);
                assert!(rig.tertiary().stretch_y() >= 1.0);
            }
        }
    }

    // ── rotation ──────────────────────────────────────────────────────────

    #[test]
    fn yaw_turns_assembly_together_and_round_trips() {
        let (engine, mut rig) = setup();
        let start = rig.clone();

        engine.step(&keys(&[RigKey::Right]), &mut rig);
        for part in [Part::Primary, Part::Secondary, Part::Tertiary] {
            assert_eq!(rig.shape(part).rotate_y(), 2.0);
        }
        assert_eq!(rig.floor().rotate_y(), 0.0);

        engine.step(&keys(&[RigKey::Left]), &mut rig);
        assert_eq!(rig, start);
    }

    #[test]
    fn swing_leaves_column_alone() {
        let (engine, mut rig) = setup();
        engine.step(&keys(&[RigKey::Right, RigKey::Shift]), &mut rig);

        assert_eq!(rig.primary().rotate_x(), 0.0);
        assert_eq!(rig.secondary().rotate_x(), 2.0);
        assert_eq!(rig.tertiary().rotate_x(), 2.0);
    }

    #[test]
    fn spin_only_turns_hanger_locally() {
        let (engine, mut rig) = setup();
        engine.step(&keys(&[RigKey::Left, RigKey::Control]), &mut rig);

        assert_eq!(rig.tertiary().local_rotate_y(), -2.0);
        assert_eq!(rig.tertiary().rotate_y(), 0.0);
        assert_eq!(rig.secondary().local_rotate_y(), 0.0);
        assert_eq!(rig.secondary().rotate_x(), 0.0);
    }

    // ── key snapshot ──────────────────────────────────────────────────────

    #[test]
    fn snapshot_reports_releases_separately_from_held_keys() {
        let snap = KeySnapshot::releasing([RigKey::Exit]);
        assert!(snap.was_released(RigKey::Exit));
        assert!(!snap.is_held(RigKey::Exit));

        let snap = KeySnapshot::holding([RigKey::Exit]);
        assert!(snap.is_held(RigKey::Exit));
        assert!(!snap.was_released(RigKey::Exit));
    }
}
