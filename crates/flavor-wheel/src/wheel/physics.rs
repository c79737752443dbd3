use super::geometry::{Point, PointerId, pointer_angle, shortest_delta};
use cupping::config::WheelSettings;
use strum::Display as StrumDisplay;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum PhysicsError {
    #[error("Decay must be strictly between 0 and 1, got {0}")]
    InvalidDecay(f64),
    #[error("Threshold must be positive, got {0}")]
    InvalidThreshold(f64),
    #[error("Disc radius must be positive, got {0}")]
    InvalidRadius(f64),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicsParams {
    decay: f64,
    threshold: f64,
}

impl PhysicsParams {
    pub const DEFAULT_DECAY: f64 = 0.92;
    pub const DEFAULT_THRESHOLD: f64 = 0.05;

    pub fn new(decay: f64, threshold: f64) -> Result<Self, PhysicsError> {
        if !(decay > 0.0 && decay < 1.0) {
            return Err(PhysicsError::InvalidDecay(decay));
        }
        if !(threshold > 0.0 && threshold.is_finite()) {
            return Err(PhysicsError::InvalidThreshold(threshold));
        }
        Ok(Self { decay, threshold })
    }

    pub fn decay(&self) -> f64 {
        self.decay
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }
}

impl Default for PhysicsParams {
    fn default() -> Self {
        Self {
            decay: Self::DEFAULT_DECAY,
            threshold: Self::DEFAULT_THRESHOLD,
        }
    }
}

impl TryFrom<&WheelSettings> for PhysicsParams {
    type Error = PhysicsError;

    fn try_from(settings: &WheelSettings) -> Result<Self, Self::Error> {
        Self::new(settings.decay, settings.threshold)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, StrumDisplay)]
pub enum Phase {
    Idle,
    Dragging,
    Coasting,
}

/// Snapshot of the disc's motion.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RotationState {
    /// Unbounded; only normalized when resolving.
    pub rotation_degrees: f64,
    pub is_dragging: bool,
    /// Degrees per frame.
    pub angular_velocity: f64,
}

#[derive(Debug, Clone, Copy)]
struct Capture {
    pointer: PointerId,
    last_angle: f64,
}

/// Pointer-driven rotation with decaying momentum after release.
///
/// Only one pointer is captured at a time; events from any other pointer are
/// ignored until it is released.
#[derive(Debug, Clone)]
pub struct RotationEngine {
    rotation: f64,
    velocity: f64,
    phase: Phase,
    capture: Option<Capture>,
    pivot: Point,
    radius: f64,
    params: PhysicsParams,
}

impl RotationEngine {
    pub fn new(pivot: Point, radius: f64, params: PhysicsParams) -> Result<Self, PhysicsError> {
        check_radius(radius)?;
        Ok(Self {
            rotation: 0.0,
            velocity: 0.0,
            phase: Phase::Idle,
            capture: None,
            pivot,
            radius,
            params,
        })
    }

    pub fn from_settings(settings: &WheelSettings) -> Result<Self, PhysicsError> {
        Self::new(
            Point::new(settings.pivot_x, settings.pivot_y),
            settings.radius,
            PhysicsParams::try_from(settings)?,
        )
    }

    /// Takes new pivot, radius and physics. A gesture in progress keeps going.
    pub fn apply_settings(&mut self, settings: &WheelSettings) -> Result<(), PhysicsError> {
        let params = PhysicsParams::try_from(settings)?;
        check_radius(settings.radius)?;
        self.params = params;
        self.radius = settings.radius;
        self.pivot = Point::new(settings.pivot_x, settings.pivot_y);
        Ok(())
    }

    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn params(&self) -> PhysicsParams {
        self.params
    }

    pub fn pivot(&self) -> Point {
        self.pivot
    }

    pub fn state(&self) -> RotationState {
        RotationState {
            rotation_degrees: self.rotation,
            is_dragging: self.phase == Phase::Dragging,
            angular_velocity: self.velocity,
        }
    }

    pub fn captured_pointer(&self) -> Option<PointerId> {
        self.capture.map(|c| c.pointer)
    }

    /// Starts a drag. Returns false when the press misses the disc or another
    /// pointer already holds it. Grabbing a coasting disc stops it dead.
    pub fn pointer_down(&mut self, pointer: PointerId, at: Point) -> bool {
        if let Some(capture) = self.capture {
            log::debug!(
                "Pointer {} ignored, pointer {} holds the wheel",
                pointer,
                capture.pointer
            );
            return false;
        }
        if !at.is_finite() || self.pivot.distance_to(at) > self.radius {
            return false;
        }

        self.capture = Some(Capture {
            pointer,
            last_angle: pointer_angle(self.pivot, at),
        });
        self.velocity = 0.0;
        self.phase = Phase::Dragging;
        true
    }

    /// Follows the captured pointer. Returns true when the rotation changed.
    pub fn pointer_move(&mut self, pointer: PointerId, at: Point) -> bool {
        let Some(capture) = self.capture.as_mut().filter(|c| c.pointer == pointer) else {
            return false;
        };
        if !at.is_finite() {
            return false;
        }

        let angle = pointer_angle(self.pivot, at);
        let delta = shortest_delta(capture.last_angle, angle);
        capture.last_angle = angle;

        self.rotation += delta;
        self.velocity = delta;
        delta != 0.0
    }

    /// Ends the drag of the captured pointer. Up, cancel and leave all land here.
    pub fn pointer_up(&mut self, pointer: PointerId) -> bool {
        if self.captured_pointer() != Some(pointer) {
            return false;
        }
        self.capture = None;
        if self.velocity.abs() > self.params.threshold {
            self.phase = Phase::Coasting;
        } else {
            self.settle();
        }
        true
    }

    /// Advances one frame of coasting. Returns true when the rotation changed.
    pub fn tick(&mut self) -> bool {
        if self.phase != Phase::Coasting {
            return false;
        }
        if !(self.velocity.abs() > self.params.threshold) {
            self.settle();
            return false;
        }

        self.rotation += self.velocity;
        self.velocity *= self.params.decay;
        if !(self.velocity.abs() > self.params.threshold) {
            self.settle();
        }
        true
    }

    pub fn is_coasting(&self) -> bool {
        self.phase == Phase::Coasting
    }

    fn settle(&mut self) {
        self.velocity = 0.0;
        self.phase = Phase::Idle;
    }
}

fn check_radius(radius: f64) -> Result<(), PhysicsError> {
    if radius > 0.0 {
        Ok(())
    } else {
        Err(PhysicsError::InvalidRadius(radius))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PIVOT: Point = Point { x: 0.0, y: 360.0 };

    fn engine() -> RotationEngine {
        RotationEngine::new(PIVOT, 360.0, PhysicsParams::default()).unwrap()
    }

    /// Point at `degrees` on a circle of radius 100 around the pivot.
    fn at(degrees: f64) -> Point {
        let r = degrees.to_radians();
        Point::new(PIVOT.x + 100.0 * r.cos(), PIVOT.y + 100.0 * r.sin())
    }

    fn id(n: u32) -> PointerId {
        PointerId::from(n)
    }

    /// Presses at `from`, drags to `to` in `steps` moves, and releases.
    fn fling(engine: &mut RotationEngine, from: f64, to: f64, steps: usize) {
        assert!(engine.pointer_down(id(1), at(from)));
        for i in 1..=steps {
            engine.pointer_move(id(1), at(from + (to - from) * i as f64 / steps as f64));
        }
        engine.pointer_up(id(1));
    }

    #[test]
    fn test_params_validation() {
        assert!(PhysicsParams::new(0.92, 0.05).is_ok());
        let cases = vec![
            (1.0, 0.05, PhysicsError::InvalidDecay(1.0)),
            (0.0, 0.05, PhysicsError::InvalidDecay(0.0)),
            (1.5, 0.05, PhysicsError::InvalidDecay(1.5)),
            (0.9, 0.0, PhysicsError::InvalidThreshold(0.0)),
            (0.9, -1.0, PhysicsError::InvalidThreshold(-1.0)),
        ];
        for (decay, threshold, expected) in cases {
            assert_eq!(PhysicsParams::new(decay, threshold), Err(expected));
        }
        assert!(PhysicsParams::new(f64::NAN, 0.05).is_err());
        assert!(RotationEngine::new(PIVOT, 0.0, PhysicsParams::default()).is_err());
    }

    #[test]
    fn test_from_default_settings() {
        let engine = RotationEngine::from_settings(&WheelSettings::default()).unwrap();
        assert_eq!(engine.params(), PhysicsParams::default());
        assert_eq!(engine.pivot(), PIVOT);
        assert_eq!(engine.phase(), Phase::Idle);
    }

    #[test]
    fn test_drag_accumulates_rotation() {
        let mut engine = engine();
        assert!(engine.pointer_down(id(1), at(0.0)));
        assert_eq!(engine.phase(), Phase::Dragging);
        assert!(engine.state().is_dragging);

        for step in 1..=10 {
            assert!(engine.pointer_move(id(1), at(step as f64 * 3.0)));
        }
        assert!((engine.rotation() - 30.0).abs() < 1e-9);
        assert!((engine.velocity() - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_drag_across_wraparound() {
        let mut engine = engine();
        engine.pointer_down(id(1), at(170.0));
        engine.pointer_move(id(1), at(-170.0));
        assert!((engine.rotation() - 20.0).abs() < 1e-9);
        engine.pointer_move(id(1), at(170.0));
        assert!(engine.rotation().abs() < 1e-9);
    }

    #[test]
    fn test_rotation_is_unbounded() {
        let mut engine = engine();
        engine.pointer_down(id(1), at(0.0));
        for step in 1..=100 {
            engine.pointer_move(id(1), at(step as f64 * 10.0));
        }
        assert!((engine.rotation() - 1000.0).abs() < 1e-6);
    }

    #[test]
    fn test_press_outside_disc_ignored() {
        let mut engine = engine();
        assert!(!engine.pointer_down(id(1), Point::new(1000.0, 360.0)));
        assert_eq!(engine.phase(), Phase::Idle);
        assert!(!engine.pointer_down(id(1), Point::new(f64::NAN, 0.0)));
    }

    #[test]
    fn test_second_pointer_ignored() {
        let mut engine = engine();
        engine.pointer_down(id(1), at(0.0));
        assert!(!engine.pointer_down(id(2), at(90.0)));
        assert!(!engine.pointer_move(id(2), at(45.0)));
        assert!(!engine.pointer_up(id(2)));
        assert_eq!(engine.rotation(), 0.0);
        assert_eq!(engine.captured_pointer(), Some(id(1)));

        engine.pointer_move(id(1), at(5.0));
        assert!((engine.rotation() - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_release_with_momentum_coasts() {
        let mut engine = engine();
        fling(&mut engine, 0.0, 40.0, 4);
        assert_eq!(engine.phase(), Phase::Coasting);
        assert_eq!(engine.captured_pointer(), None);

        let before = engine.rotation();
        assert!(engine.tick());
        assert!((engine.rotation() - before - 10.0).abs() < 1e-9);
        assert!((engine.velocity() - 9.2).abs() < 1e-9);
    }

    #[test]
    fn test_slow_release_settles_immediately() {
        let mut engine = engine();
        engine.pointer_down(id(1), at(0.0));
        engine.pointer_move(id(1), at(0.01));
        engine.pointer_up(id(1));
        assert_eq!(engine.phase(), Phase::Idle);
        assert_eq!(engine.velocity(), 0.0);
        assert!(!engine.tick());
    }

    #[test]
    fn test_coasting_converges() {
        for v0 in [0.06, 0.5, 3.0, -7.5, 45.0, -179.0, 1e6] {
            let mut engine = engine();
            engine.velocity = v0;
            engine.phase = Phase::Coasting;

            let params = engine.params();
            let bound = ((params.threshold() / v0.abs()).ln() / params.decay().ln()).ceil() as usize + 2;

            let mut last_increment = f64::INFINITY;
            let mut frames = 0;
            while engine.is_coasting() {
                let before = engine.rotation();
                assert!(engine.tick());
                let increment = (engine.rotation() - before).abs();
                assert!(increment < last_increment, "v0={v0}");
                assert!(increment.is_finite());
                last_increment = increment;
                frames += 1;
                assert!(frames <= bound, "v0={v0} did not settle");
            }
            assert_eq!(engine.phase(), Phase::Idle);
            assert_eq!(engine.velocity(), 0.0);
            assert!(!engine.tick());
        }
    }

    #[test]
    fn test_coasting_direction_follows_fling() {
        let mut engine = engine();
        fling(&mut engine, 90.0, 30.0, 3);
        let start = engine.rotation();
        while engine.tick() {}
        assert!(engine.rotation() < start);
    }

    #[test]
    fn test_regrab_stops_coasting() {
        let mut engine = engine();
        fling(&mut engine, 0.0, 60.0, 2);
        engine.tick();
        assert!(engine.is_coasting());

        let held = engine.rotation();
        assert!(engine.pointer_down(id(7), at(10.0)));
        assert_eq!(engine.phase(), Phase::Dragging);
        assert_eq!(engine.velocity(), 0.0);
        assert!(!engine.tick());
        assert_eq!(engine.rotation(), held);

        engine.pointer_up(id(7));
        assert_eq!(engine.phase(), Phase::Idle);
    }

    #[test]
    fn test_apply_settings() {
        let mut engine = engine();
        let settings = WheelSettings {
            decay: 0.5,
            pivot_y: 0.0,
            ..WheelSettings::default()
        };
        engine.apply_settings(&settings).unwrap();
        assert_eq!(engine.params().decay(), 0.5);
        assert_eq!(engine.pivot(), Point::new(0.0, 0.0));

        let bad = WheelSettings {
            threshold: -1.0,
            ..WheelSettings::default()
        };
        assert_eq!(
            engine.apply_settings(&bad),
            Err(PhysicsError::InvalidThreshold(-1.0))
        );
        assert_eq!(engine.params().decay(), 0.5);
    }
}
