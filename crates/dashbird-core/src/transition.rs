//! Camera transition driver.
//!
//! One animated scalar drives every camera parameter. Two phases write it:
//! the intro (once, -1 → 0) and the focus phase (0 ⇄ 1, restarted on every
//! focus change). Each transition request claims a new generation on the
//! scalar; a transition may only write while its generation is current, so
//! a newer request silently retires whatever was in flight.

use crate::config::CameraConfig;
use crate::focus::FocusState;
use crate::spring::{Spring, SpringConfig};

/// Mutable camera surface the driver writes to.
///
/// `update_projection` must be called after zoom or focal changes for the
/// rendered view to reflect them.
pub trait CameraHandle {
    fn set_zoom(&mut self, zoom: f32);
    fn set_focal(&mut self, focal: f32);
    fn set_position_x(&mut self, x: f32);
    fn set_position_y(&mut self, y: f32);
    fn update_projection(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IntroPhase {
    #[default]
    NotStarted,
    Running,
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusPhase {
    #[default]
    AtUnfocused,
    TransitioningToFocused,
    AtFocused,
    TransitioningToUnfocused,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionKind {
    Intro,
    Focus { focused: bool },
}

/// The shared scalar plus the generation allowed to write it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimatedScalar {
    value: f32,
    velocity: f32,
    generation: u64,
}

impl AnimatedScalar {
    pub fn new(value: f32) -> Self {
        Self {
            value,
            velocity: 0.0,
            generation: 0,
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Starts a new generation, retiring every earlier writer.
    fn claim(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }
}

/// Result of ticking one transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransitionTick {
    /// A newer transition owns the scalar; this one wrote nothing.
    Superseded,
    Running(f32),
    Settled(f32),
}

/// One in-flight spring animation of the scalar.
#[derive(Debug, Clone)]
pub struct Transition {
    generation: u64,
    kind: TransitionKind,
    spring: Spring,
}

impl Transition {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn kind(&self) -> TransitionKind {
        self.kind
    }

    pub fn tick(&mut self, scalar: &mut AnimatedScalar, dt: f32) -> TransitionTick {
        if scalar.generation != self.generation {
            return TransitionTick::Superseded;
        }
        let sample = self.spring.advance(dt);
        scalar.value = sample.value;
        scalar.velocity = sample.velocity;
        if sample.settled {
            TransitionTick::Settled(sample.value)
        } else {
            TransitionTick::Running(sample.value)
        }
    }
}

/// Camera values for a focus-phase scalar value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FocusParams {
    pub zoom: f32,
    pub focal: f32,
    pub x: f32,
    pub y: f32,
}

/// Intro-phase zoom for a scalar value.
pub fn intro_zoom(camera: &CameraConfig, value: f32) -> f32 {
    camera.intro_zoom().apply_clamped(value)
}

/// Focus-phase camera values for a scalar value.
pub fn focus_params(camera: &CameraConfig, value: f32) -> FocusParams {
    FocusParams {
        zoom: camera.focus_zoom().apply_clamped(value),
        focal: camera.focus_focal().apply_clamped(value),
        x: camera.focus_x().apply_clamped(value),
        y: camera.focus_y().apply_clamped(value),
    }
}

/// Owns the animated scalar and runs the intro and focus transitions.
#[derive(Debug, Clone)]
pub struct CameraTransitionDriver {
    scalar: AnimatedScalar,
    in_flight: Vec<Transition>,
    intro: IntroPhase,
    focus: FocusPhase,
    spring: SpringConfig,
    camera: CameraConfig,
}

impl CameraTransitionDriver {
    /// Creates a driver with the scalar at -1 (before the intro).
    pub fn new(spring: SpringConfig, camera: CameraConfig) -> Self {
        Self {
            scalar: AnimatedScalar::new(-1.0),
            in_flight: Vec::new(),
            intro: IntroPhase::NotStarted,
            focus: FocusPhase::AtUnfocused,
            spring,
            camera,
        }
    }

    pub fn scalar(&self) -> AnimatedScalar {
        self.scalar
    }

    pub fn intro_phase(&self) -> IntroPhase {
        self.intro
    }

    pub fn focus_phase(&self) -> FocusPhase {
        self.focus
    }

    /// Transitions not yet retired, including superseded ones that have
    /// not been ticked since they lost the scalar.
    pub fn in_flight(&self) -> &[Transition] {
        &self.in_flight
    }

    pub fn is_animating(&self) -> bool {
        !self.in_flight.is_empty()
    }

    /// Starts the intro animation. Only the first call has an effect.
    pub fn start_intro(&mut self) -> bool {
        if self.intro != IntroPhase::NotStarted {
            return false;
        }
        self.intro = IntroPhase::Running;
        self.push_transition(TransitionKind::Intro, 0.0);
        tracing::debug!("[camera] intro transition started");
        true
    }

    /// Restarts the focus transition toward the state's target,
    /// superseding anything in flight.
    pub fn retarget_focus(&mut self, state: FocusState) {
        let focused = state.is_focused();
        self.focus = if focused {
            FocusPhase::TransitioningToFocused
        } else {
            FocusPhase::TransitioningToUnfocused
        };
        let target = state.transition_target();
        self.push_transition(TransitionKind::Focus { focused }, target);
        tracing::debug!(
            "[camera] focus transition -> {} from {:.4} (generation {})",
            target,
            self.scalar.value,
            self.scalar.generation
        );
    }

    fn push_transition(&mut self, kind: TransitionKind, target: f32) {
        let generation = self.scalar.claim();
        let spring = Spring::new(self.spring, self.scalar.value, target, self.scalar.velocity);
        self.in_flight.push(Transition {
            generation,
            kind,
            spring,
        });
    }

    /// Advances every in-flight transition by `dt` seconds and writes the
    /// current generation's values to the camera.
    pub fn tick<C: CameraHandle + ?Sized>(&mut self, dt: f32, camera: &mut C) {
        let mut transitions = std::mem::take(&mut self.in_flight);

        transitions.retain_mut(|transition| match transition.tick(&mut self.scalar, dt) {
            TransitionTick::Superseded => {
                if transition.kind == TransitionKind::Intro && self.intro == IntroPhase::Running {
                    // Interrupted intros never resume
                    self.intro = IntroPhase::Done;
                }
                tracing::debug!(
                    "[camera] generation {} superseded, dropping",
                    transition.generation
                );
                false
            }
            TransitionTick::Running(value) => {
                self.apply(transition.kind, value, camera);
                true
            }
            TransitionTick::Settled(value) => {
                self.apply(transition.kind, value, camera);
                self.finish(transition.kind);
                false
            }
        });

        self.in_flight = transitions;
    }

    fn apply<C: CameraHandle + ?Sized>(&self, kind: TransitionKind, value: f32, camera: &mut C) {
        match kind {
            TransitionKind::Intro => {
                camera.set_zoom(intro_zoom(&self.camera, value));
                camera.update_projection();
            }
            TransitionKind::Focus { .. } => {
                let params = focus_params(&self.camera, value);
                camera.set_zoom(params.zoom);
                camera.update_projection();
                camera.set_focal(params.focal);
                camera.update_projection();
                camera.set_position_y(params.y);
                camera.update_projection();
                camera.set_position_x(params.x);
                camera.update_projection();
            }
        }
    }

    fn finish(&mut self, kind: TransitionKind) {
        match kind {
            TransitionKind::Intro => {
                self.intro = IntroPhase::Done;
                tracing::debug!("[camera] intro transition settled");
            }
            TransitionKind::Focus { focused } => {
                self.focus = if focused {
                    FocusPhase::AtFocused
                } else {
                    FocusPhase::AtUnfocused
                };
                tracing::debug!("[camera] focus transition settled (focused={})", focused);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;
    const FOCUSED: FocusState = FocusState::Focused(bevy::math::Vec3::ZERO);

    #[derive(Debug, Default)]
    struct RecordingCamera {
        zoom: f32,
        focal: f32,
        x: f32,
        y: f32,
        projection_updates: usize,
        writes: Vec<&'static str>,
    }

    impl CameraHandle for RecordingCamera {
        fn set_zoom(&mut self, zoom: f32) {
            self.zoom = zoom;
            self.writes.push("zoom");
        }
        fn set_focal(&mut self, focal: f32) {
            self.focal = focal;
            self.writes.push("focal");
        }
        fn set_position_x(&mut self, x: f32) {
            self.x = x;
            self.writes.push("x");
        }
        fn set_position_y(&mut self, y: f32) {
            self.y = y;
            self.writes.push("y");
        }
        fn update_projection(&mut self) {
            self.projection_updates += 1;
            self.writes.push("projection");
        }
    }

    fn driver() -> CameraTransitionDriver {
        CameraTransitionDriver::new(SpringConfig::default(), CameraConfig::default())
    }

    fn run(driver: &mut CameraTransitionDriver, camera: &mut RecordingCamera, frames: usize) {
        for _ in 0..frames {
            driver.tick(DT, camera);
        }
    }

    #[test]
    fn test_intro_zoom_from_start_to_settle() {
        let mut driver = driver();
        let mut camera = RecordingCamera::default();

        assert!(driver.start_intro());
        driver.tick(0.0, &mut camera);
        assert!((camera.zoom - 1.0).abs() < 1e-4, "start zoom {}", camera.zoom);
        assert_eq!(driver.intro_phase(), IntroPhase::Running);

        run(&mut driver, &mut camera, 120);
        assert_eq!(driver.intro_phase(), IntroPhase::Done);
        assert_eq!(camera.zoom, 3.0);
        assert_eq!(driver.scalar().value(), 0.0);
        assert!(!driver.is_animating());

        // Intro only writes zoom
        assert!(camera.writes.iter().all(|w| *w == "zoom" || *w == "projection"));
    }

    #[test]
    fn test_intro_starts_once() {
        let mut driver = driver();
        assert!(driver.start_intro());
        assert!(!driver.start_intro());

        let mut camera = RecordingCamera::default();
        run(&mut driver, &mut camera, 120);
        assert!(!driver.start_intro());
        assert_eq!(driver.intro_phase(), IntroPhase::Done);
    }

    #[test]
    fn test_no_intro_without_start() {
        let mut driver = driver();
        let mut camera = RecordingCamera::default();
        run(&mut driver, &mut camera, 10);
        assert_eq!(driver.intro_phase(), IntroPhase::NotStarted);
        assert_eq!(camera.projection_updates, 0);
        assert_eq!(driver.scalar().value(), -1.0);
    }

    #[test]
    fn test_focused_settles_on_focused_params() {
        let mut driver = driver();
        let mut camera = RecordingCamera::default();
        driver.start_intro();
        run(&mut driver, &mut camera, 120);

        driver.retarget_focus(FOCUSED);
        assert_eq!(driver.focus_phase(), FocusPhase::TransitioningToFocused);
        run(&mut driver, &mut camera, 120);

        assert_eq!(driver.focus_phase(), FocusPhase::AtFocused);
        assert_eq!(camera.zoom, 20.0);
        assert_eq!(camera.focal, 10.0);
        assert_eq!(camera.x, 30.0);
        assert_eq!(camera.y, 10.0);
    }

    #[test]
    fn test_scalar_settles_on_state_target() {
        let mut camera = RecordingCamera::default();
        for state in [FOCUSED, FocusState::Unfocused] {
            let mut driver = driver();
            driver.retarget_focus(state);
            assert_eq!(
                driver.in_flight().last().map(Transition::kind),
                Some(TransitionKind::Focus {
                    focused: state.is_focused()
                })
            );
            run(&mut driver, &mut camera, 200);
            assert_eq!(driver.scalar().value(), state.transition_target());
        }
    }

    #[test]
    fn test_unfocused_settles_on_default_params() {
        let mut driver = driver();
        let mut camera = RecordingCamera::default();
        driver.retarget_focus(FOCUSED);
        run(&mut driver, &mut camera, 120);
        driver.retarget_focus(FocusState::Unfocused);
        run(&mut driver, &mut camera, 120);

        assert_eq!(driver.focus_phase(), FocusPhase::AtUnfocused);
        assert_eq!(camera.zoom, 3.0);
        assert_eq!(camera.focal, 100_000_000.0);
        assert_eq!(camera.x, 20.0);
        assert_eq!(camera.y, 20.0);
    }

    #[test]
    fn test_projection_updated_after_every_focus_write() {
        let mut driver = driver();
        let mut camera = RecordingCamera::default();
        driver.retarget_focus(FOCUSED);
        driver.tick(DT, &mut camera);

        assert_eq!(
            camera.writes,
            vec!["zoom", "projection", "focal", "projection", "y", "projection", "x", "projection"]
        );
    }

    #[test]
    fn test_retarget_midflight_starts_from_current_value() {
        let mut driver = driver();
        let mut camera = RecordingCamera::default();
        driver.start_intro();
        run(&mut driver, &mut camera, 120);

        driver.retarget_focus(FOCUSED);
        run(&mut driver, &mut camera, 4);
        let midway = driver.scalar();
        assert!(midway.value() > 0.0 && midway.value() < 1.0);

        driver.retarget_focus(FocusState::Unfocused);
        assert_eq!(driver.in_flight().len(), 2);
        driver.tick(DT, &mut camera);

        // The stale transition noticed and left; only one spring remains
        assert_eq!(driver.in_flight().len(), 1);
        assert_eq!(
            driver.in_flight()[0].kind(),
            TransitionKind::Focus { focused: false }
        );

        let mut previous = driver.scalar().value();
        assert!(previous <= midway.value() + 0.05);
        for _ in 0..120 {
            driver.tick(DT, &mut camera);
            let value = driver.scalar().value();
            assert!(value >= -1e-6, "overshoot below zero: {}", value);
            assert!(value <= previous + 1e-6, "not monotonic toward 0");
            previous = value;
        }
        assert_eq!(driver.scalar().value(), 0.0);
        assert_eq!(driver.focus_phase(), FocusPhase::AtUnfocused);
        assert!(!driver.is_animating());
    }

    #[test]
    fn test_only_latest_generation_writes() {
        let mut driver = driver();
        let start = driver.scalar().generation();
        driver.retarget_focus(FOCUSED);
        driver.retarget_focus(FocusState::Unfocused);
        driver.retarget_focus(FOCUSED);
        assert_eq!(driver.scalar().generation(), start + 3);

        let mut camera = RecordingCamera::default();
        driver.tick(DT, &mut camera);
        // One focus write sequence is 8 entries; three live writers would make 24
        assert_eq!(camera.writes.len(), 8);
        assert_eq!(driver.in_flight().len(), 1);
        assert_eq!(driver.in_flight()[0].generation(), start + 3);
        assert!(driver.scalar().value() > -1.0);
    }

    #[test]
    fn test_focus_supersedes_running_intro() {
        let mut driver = driver();
        let mut camera = RecordingCamera::default();
        driver.start_intro();
        run(&mut driver, &mut camera, 3);
        let during_intro = driver.scalar().value();
        assert!(during_intro < 0.0);

        driver.retarget_focus(FOCUSED);
        driver.tick(DT, &mut camera);
        assert_eq!(driver.intro_phase(), IntroPhase::Done);
        assert_eq!(driver.in_flight().len(), 1);

        // Clamped mapping keeps the zoom at its unfocused floor while v < 0
        if driver.scalar().value() < 0.0 {
            assert_eq!(camera.zoom, 3.0);
        }
        run(&mut driver, &mut camera, 120);
        assert_eq!(camera.zoom, 20.0);
    }

    #[test]
    fn test_param_derivation() {
        let camera = CameraConfig::default();
        let settled = focus_params(&camera, 1.0);
        assert_eq!(
            settled,
            FocusParams {
                zoom: 20.0,
                focal: 10.0,
                x: 30.0,
                y: 10.0
            }
        );
        let rest = focus_params(&camera, 0.0);
        assert_eq!(rest.zoom, 3.0);
        assert_eq!(rest.focal, 1e8);
        assert_eq!((rest.x, rest.y), (20.0, 20.0));
        assert!((focus_params(&camera, 0.5).zoom - 11.5).abs() < 1e-5);

        assert_eq!(intro_zoom(&camera, -1.0), 1.0);
        assert_eq!(intro_zoom(&camera, 0.0), 3.0);
    }
}
