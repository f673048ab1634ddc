//! Animation specs - how a reflow progresses from 0 to 1 over time.
//!
//! Every moving item animates a single scalar progress from 0 (old position)
//! to 1 (new target). The [`AnimationSpec`] decides how that scalar evolves per tick; the
//! [`PositionEvaluator`] turns it into an offset.
//!
//! # Pattern
//!
//! - [`FlowAnimation`] is the strategy a layout is configured with
//! - [`DefaultFlowAnimation`] is a critically damped spring
//! - [`TweenFlowAnimation`] is a fixed-duration eased tween
//! - No animation at all is expressed by not passing a strategy
//!
//! Time is supplied from outside: [`AnimationProgress::step`] is advanced by
//! whatever frame clock the host runs.

use std::time::Duration;

use crate::error::LayoutError;

use super::evaluator::{IntOffsetEvaluator, PositionEvaluator};

// =============================================================================
// SPRING
// =============================================================================

/// Damped spring parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringSpec {
    pub damping_ratio: f32,
    pub stiffness: f32,
}

impl SpringSpec {
    pub const DAMPING_RATIO_HIGH_BOUNCY: f32 = 0.2;
    pub const DAMPING_RATIO_MEDIUM_BOUNCY: f32 = 0.5;
    pub const DAMPING_RATIO_LOW_BOUNCY: f32 = 0.75;
    pub const DAMPING_RATIO_NO_BOUNCY: f32 = 1.0;

    pub const STIFFNESS_HIGH: f32 = 10_000.0;
    pub const STIFFNESS_MEDIUM: f32 = 1_500.0;
    pub const STIFFNESS_MEDIUM_LOW: f32 = 400.0;
    pub const STIFFNESS_LOW: f32 = 200.0;
    pub const STIFFNESS_VERY_LOW: f32 = 50.0;

    pub fn new(damping_ratio: f32, stiffness: f32) -> Result<Self, LayoutError> {
        if !damping_ratio.is_finite() || damping_ratio <= 0.0 {
            return Err(LayoutError::InvalidAnimation {
                name: "damping_ratio",
                value: damping_ratio,
            });
        }
        if !stiffness.is_finite() || stiffness <= 0.0 {
            return Err(LayoutError::InvalidAnimation {
                name: "stiffness",
                value: stiffness,
            });
        }
        Ok(Self {
            damping_ratio,
            stiffness,
        })
    }

    /// Advance a spring with unit mass from `(displacement, velocity)` by `dt` seconds.
    ///
    /// Closed-form solution, so any step size is exact.
    fn advance(&self, displacement: f32, velocity: f32, dt: f32) -> (f32, f32) {
        let x0 = displacement as f64;
        let v0 = velocity as f64;
        let t = dt as f64;
        let zeta = self.damping_ratio as f64;
        let omega = (self.stiffness as f64).sqrt();

        let (x, v) = if zeta > 1.0 {
            let root = omega * (zeta * zeta - 1.0).sqrt();
            let gamma_plus = -zeta * omega + root;
            let gamma_minus = -zeta * omega - root;
            let coeff_b = (gamma_minus * x0 - v0) / (gamma_minus - gamma_plus);
            let coeff_a = x0 - coeff_b;
            let e_minus = (gamma_minus * t).exp();
            let e_plus = (gamma_plus * t).exp();
            (
                coeff_a * e_minus + coeff_b * e_plus,
                coeff_a * gamma_minus * e_minus + coeff_b * gamma_plus * e_plus,
            )
        } else if zeta == 1.0 {
            let coeff_a = x0;
            let coeff_b = v0 + omega * x0;
            let decay = (-omega * t).exp();
            let x = (coeff_a + coeff_b * t) * decay;
            (x, x * -omega + coeff_b * decay)
        } else {
            let damped = omega * (1.0 - zeta * zeta).sqrt();
            let cos_coeff = x0;
            let sin_coeff = (zeta * omega * x0 + v0) / damped;
            let decay = (-zeta * omega * t).exp();
            let (sin, cos) = (damped * t).sin_cos();
            let x = decay * (cos_coeff * cos + sin_coeff * sin);
            (
                x,
                x * -zeta * omega + decay * (-damped * cos_coeff * sin + damped * sin_coeff * cos),
            )
        };

        (x as f32, v as f32)
    }
}

impl Default for SpringSpec {
    fn default() -> Self {
        Self {
            damping_ratio: Self::DAMPING_RATIO_NO_BOUNCY,
            stiffness: Self::STIFFNESS_MEDIUM,
        }
    }
}

// =============================================================================
// TWEEN
// =============================================================================

/// Cubic bezier easing curve through (0,0), (a,b), (c,d), (1,1).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezierEasing {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
}

impl CubicBezierEasing {
    pub const FAST_OUT_SLOW_IN: Self = Self::new(0.4, 0.0, 0.2, 1.0);
    pub const LINEAR_OUT_SLOW_IN: Self = Self::new(0.0, 0.0, 0.2, 1.0);
    pub const FAST_OUT_LINEAR_IN: Self = Self::new(0.4, 0.0, 1.0, 1.0);

    pub const fn new(a: f32, b: f32, c: f32, d: f32) -> Self {
        Self { a, b, c, d }
    }

    fn bezier(p1: f32, p2: f32, t: f32) -> f32 {
        let u = 1.0 - t;
        3.0 * p1 * u * u * t + 3.0 * p2 * u * t * t + t * t * t
    }

    /// Map linear time `fraction` to eased progress.
    pub fn transform(&self, fraction: f32) -> f32 {
        if fraction <= 0.0 {
            return 0.0;
        }
        if fraction >= 1.0 {
            return 1.0;
        }
        // x(t) is monotonic for control points inside [0, 1]; bisect for t
        let mut low = 0.0f32;
        let mut high = 1.0f32;
        let mut t = fraction;
        for _ in 0..32 {
            let x = Self::bezier(self.a, self.c, t);
            if (x - fraction).abs() < 1e-5 {
                break;
            }
            if x < fraction {
                low = t;
            } else {
                high = t;
            }
            t = (low + high) / 2.0;
        }
        Self::bezier(self.b, self.d, t)
    }
}

/// Time → progress curve for a tween.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Easing {
    Linear,
    #[default]
    FastOutSlowIn,
    CubicBezier(CubicBezierEasing),
}

impl Easing {
    pub fn transform(&self, fraction: f32) -> f32 {
        match self {
            Self::Linear => fraction.clamp(0.0, 1.0),
            Self::FastOutSlowIn => CubicBezierEasing::FAST_OUT_SLOW_IN.transform(fraction),
            Self::CubicBezier(curve) => curve.transform(fraction),
        }
    }
}

/// Fixed-duration tween.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TweenSpec {
    pub duration: Duration,
    pub easing: Easing,
}

impl TweenSpec {
    pub const DEFAULT_DURATION: Duration = Duration::from_millis(300);

    pub fn new(duration: Duration, easing: Easing) -> Self {
        Self { duration, easing }
    }
}

impl Default for TweenSpec {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DURATION, Easing::FastOutSlowIn)
    }
}

// =============================================================================
// ANIMATION SPEC
// =============================================================================

/// How progress evolves over time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimationSpec {
    Spring(SpringSpec),
    Tween(TweenSpec),
    /// Jump to the end on the first tick.
    Snap,
}

impl Default for AnimationSpec {
    fn default() -> Self {
        Self::Spring(SpringSpec::default())
    }
}

/// In-flight progress of one animation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AnimationProgress {
    /// Current fraction; 0 at start, 1 at target.
    pub value: f32,
    /// Fraction per second.
    pub velocity: f32,
    pub elapsed: Duration,
}

impl AnimationProgress {
    /// Frame rate the velocity half of [`is_settled`](Self::is_settled) is judged at.
    pub const SETTLE_FRAME_RATE: f32 = 60.0;

    pub fn new() -> Self {
        Self::default()
    }

    /// Remaining distance to the target, in fraction units.
    pub fn displacement(&self) -> f32 {
        (1.0 - self.value).abs()
    }

    /// Whether the animation is at rest within `threshold`.
    ///
    /// Both the remaining displacement and the distance covered per 60 Hz
    /// frame must be within `threshold`, so a spring swinging through the
    /// target at speed keeps running. A progress sitting exactly on the
    /// target is settled even for a zero threshold.
    pub fn is_settled(&self, threshold: f32) -> bool {
        self.displacement() <= threshold
            && self.velocity.abs() <= threshold * Self::SETTLE_FRAME_RATE
    }

    /// Advance by `dt` under `spec`.
    pub fn step(&mut self, spec: &AnimationSpec, dt: Duration) {
        self.elapsed += dt;
        match spec {
            AnimationSpec::Spring(spring) => {
                let (x, v) = spring.advance(self.value - 1.0, self.velocity, dt.as_secs_f32());
                self.value = 1.0 + x;
                self.velocity = v;
            }
            AnimationSpec::Tween(tween) => {
                let fraction = if tween.duration.is_zero() {
                    1.0
                } else {
                    (self.elapsed.as_nanos() as f64 / tween.duration.as_nanos() as f64) as f32
                };
                self.value = tween.easing.transform(fraction.min(1.0));
            }
            AnimationSpec::Snap => {
                self.value = 1.0;
                self.velocity = 0.0;
            }
        }
    }
}

// =============================================================================
// STRATEGIES
// =============================================================================

/// Animation strategy for item movement in a flow layout.
///
/// Whenever an insertion or removal moves items to a new line or slot, the
/// move is animated according to this strategy instead of snapping.
pub trait FlowAnimation {
    /// Displacement (in fraction units) below which the animation may round
    /// off to its target.
    fn visibility_threshold(&self) -> f32;

    /// Progression of the fraction over time.
    fn animation_spec(&self) -> AnimationSpec;

    /// Turns a fraction into an offset. Linear by default.
    fn position_evaluator(&self) -> &dyn PositionEvaluator {
        &IntOffsetEvaluator
    }
}

/// Spring movement with the default displacement threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DefaultFlowAnimation {
    spring: SpringSpec,
}

impl DefaultFlowAnimation {
    /// Default cutoff for rounding off physics based animations.
    pub const DEFAULT_DISPLACEMENT_THRESHOLD: f32 = 0.01;

    pub fn new() -> Self {
        Self {
            spring: SpringSpec::default(),
        }
    }

    pub fn with_spring(spring: SpringSpec) -> Self {
        Self { spring }
    }
}

impl Default for DefaultFlowAnimation {
    fn default() -> Self {
        Self::new()
    }
}

impl FlowAnimation for DefaultFlowAnimation {
    fn visibility_threshold(&self) -> f32 {
        Self::DEFAULT_DISPLACEMENT_THRESHOLD
    }

    fn animation_spec(&self) -> AnimationSpec {
        AnimationSpec::Spring(self.spring)
    }
}

/// Fixed-duration tween, optionally with a custom evaluator.
pub struct TweenFlowAnimation {
    tween: TweenSpec,
    threshold: f32,
    evaluator: Box<dyn PositionEvaluator>,
}

impl TweenFlowAnimation {
    pub fn new(tween: TweenSpec) -> Self {
        Self {
            tween,
            threshold: DefaultFlowAnimation::DEFAULT_DISPLACEMENT_THRESHOLD,
            evaluator: Box::new(IntOffsetEvaluator),
        }
    }

    /// Linear easing over `duration`.
    pub fn linear(duration: Duration) -> Self {
        Self::new(TweenSpec::new(duration, Easing::Linear))
    }

    pub fn with_threshold(mut self, threshold: f32) -> Result<Self, LayoutError> {
        if !threshold.is_finite() || threshold <= 0.0 {
            return Err(LayoutError::InvalidAnimation {
                name: "visibility_threshold",
                value: threshold,
            });
        }
        self.threshold = threshold;
        Ok(self)
    }

    pub fn with_evaluator(mut self, evaluator: impl PositionEvaluator + 'static) -> Self {
        self.evaluator = Box::new(evaluator);
        self
    }
}

impl FlowAnimation for TweenFlowAnimation {
    fn visibility_threshold(&self) -> f32 {
        self.threshold
    }

    fn animation_spec(&self) -> AnimationSpec {
        AnimationSpec::Tween(self.tween)
    }

    fn position_evaluator(&self) -> &dyn PositionEvaluator {
        self.evaluator.as_ref()
    }
}

// =============================================================================
// TESTS
// =============================================================================
