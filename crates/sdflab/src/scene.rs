//! Distance-field scene state: parameters, radius animation and the CPU
//! field. GPU resources live in [`crate::renderer`], which follows
//! [`SdfScene::generation`].

use sdflab_field::{DistanceField, FieldError, Shape};
use sdflab_ui::tweak::{Tweak, TweakBar, TweakChange};

use crate::config::SceneConfig;

/// Texture radius in samples per GUI radius unit per texture sample.
const RADIUS_SCALE: f32 = 0.01;

// ── animation constants ───────────────────────────────────────────────────

const STEP_THRESHOLD: f64 = 0.016;
const STEP_COST: f64 = 0.1;
const GROW_BELOW: f32 = 0.8;
const SHRINK_ABOVE: f32 = 4.0;
const GROW: f32 = 1.01;
const SHRINK: f32 = 0.99;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FilterMode {
    Nearest,
    Bilinear,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ShadingMode {
    /// Sample shown as grey.
    Raw,
    /// Six colored bands around the edge.
    Banded,
}

/// Oscillates the radius between roughly 0.8 and 4.0.
#[derive(Debug, Clone, PartialEq)]
struct RadiusAnimation {
    /// Seconds not yet spent on steps. Kept in `f64` so long runs do not drift.
    accumulator: f64,
    factor: f32,
}

impl Default for RadiusAnimation {
    fn default() -> Self {
        Self { accumulator: 0.0, factor: SHRINK }
    }
}

impl RadiusAnimation {
    /// Advances by `elapsed` seconds starting from `radius`; returns the new
    /// radius when at least one step ran.
    fn advance(&mut self, elapsed: f32, mut radius: f32) -> Option<f32> {
        self.accumulator += f64::from(elapsed);
        let mut stepped = false;
        while self.accumulator > STEP_THRESHOLD {
            if radius < GROW_BELOW {
                self.factor = GROW;
            } else if radius > SHRINK_ABOVE {
                self.factor = SHRINK;
            }
            radius *= self.factor;
            self.accumulator -= STEP_COST;
            stepped = true;
        }
        stepped.then_some(radius)
    }
}

/// The tunable parameters, each bound to a panel control.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneParams {
    pub circle: Tweak<bool>,
    pub bilinear: Tweak<bool>,
    pub banded: Tweak<bool>,
    pub tex_pow: Tweak<i32>,
    pub radius: Tweak<f32>,
}

impl SceneParams {
    pub fn new(config: &SceneConfig) -> Self {
        let (pow_lo, pow_hi) = config.tex_pow_range;
        let (r_lo, r_hi) = config.radius_range;
        Self {
            circle: Tweak::new("Draw Circle", config.shape == Shape::Circle),
            bilinear: Tweak::new("Bilinear Filter", config.bilinear),
            banded: Tweak::new("SDF Shader", config.banded),
            tex_pow: Tweak::new("Tex Pow", config.tex_pow).range(pow_lo, pow_hi).step(1),
            radius: Tweak::new("Radius", config.radius).range(r_lo, r_hi).step(config.radius_step),
        }
    }
}

/// Owns the field and everything that decides its contents.
pub struct SdfScene {
    params: SceneParams,
    field: DistanceField,
    generation: u64,
    animation: RadiusAnimation,
}

impl SdfScene {
    pub fn new(config: &SceneConfig) -> Result<Self, FieldError> {
        let params = SceneParams::new(config);
        let field = DistanceField::generate(
            shape_of(&params),
            tex_size_of(&params),
            texture_radius_of(&params),
        )?;
        log::info!("scene ready: {}×{} field", field.size(), field.size());
        Ok(Self { params, field, generation: 0, animation: RadiusAnimation::default() })
    }

    // ── queries ───────────────────────────────────────────────────────────

    pub fn shape(&self) -> Shape {
        shape_of(&self.params)
    }

    pub fn filter(&self) -> FilterMode {
        if self.params.bilinear.get() { FilterMode::Bilinear } else { FilterMode::Nearest }
    }

    pub fn shading(&self) -> ShadingMode {
        if self.params.banded.get() { ShadingMode::Banded } else { ShadingMode::Raw }
    }

    /// Texture side in samples.
    pub fn tex_size(&self) -> u32 {
        tex_size_of(&self.params)
    }

    pub fn radius(&self) -> f32 {
        self.params.radius.get()
    }

    /// Radius in texture samples.
    pub fn texture_radius(&self) -> f32 {
        texture_radius_of(&self.params)
    }

    pub fn field(&self) -> &DistanceField {
        &self.field
    }

    /// Bumped on every regeneration; the renderer re-uploads when it moves.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    // ── panel ─────────────────────────────────────────────────────────────

    /// Lists the controls on `bar` in panel order.
    pub fn bind(&self, bar: &mut TweakBar) {
        bar.add(&self.params.circle);
        bar.add(&self.params.bilinear);
        bar.add(&self.params.banded);
        bar.add(&self.params.tex_pow);
        bar.add(&self.params.radius);
    }

    /// Applies one panel edit. Shape, size and radius edits regenerate the
    /// field; filter and shading edits only change render state.
    pub fn apply(&mut self, change: &TweakChange) -> Result<(), FieldError> {
        let p = &mut self.params;
        if p.circle.apply(change) || p.tex_pow.apply(change) || p.radius.apply(change) {
            log::debug!("{} -> {}", change.name, change.value);
            return self.regenerate();
        }
        if p.bilinear.apply(change) || p.banded.apply(change) {
            log::debug!("{} -> {}", change.name, change.value);
        }
        Ok(())
    }

    // ── per frame ─────────────────────────────────────────────────────────

    /// Advances the radius animation by `elapsed` seconds, regenerating once
    /// if the radius moved.
    pub fn update(&mut self, elapsed: f32) -> Result<(), FieldError> {
        match self.animation.advance(elapsed, self.params.radius.get()) {
            Some(r) => {
                self.params.radius.set(r);
                self.regenerate()
            }
            None => Ok(()),
        }
    }

    /// Rebuilds the field from the current parameters.
    pub fn regenerate(&mut self) -> Result<(), FieldError> {
        let (shape, size, radius) = (self.shape(), self.tex_size(), self.texture_radius());
        self.field.regenerate(shape, size, radius)?;
        self.generation += 1;
        log::debug!(
            "regenerated {shape:?} {size}×{size} radius {:.3} ({radius:.3} samples, gen {})",
            self.radius(),
            self.generation
        );
        Ok(())
    }
}

fn shape_of(p: &SceneParams) -> Shape {
    if p.circle.get() { Shape::Circle } else { Shape::Square }
}

fn tex_size_of(p: &SceneParams) -> u32 {
    1u32 << p.tex_pow.get().clamp(0, 16)
}

fn texture_radius_of(p: &SceneParams) -> f32 {
    p.radius.get() * tex_size_of(p) as f32 * RADIUS_SCALE
}

#[cfg(test)]
mod tests {
    use sdflab_ui::tweak::TweakValue;

    use super::*;

    fn scene() -> SdfScene {
        match SdfScene::new(&SceneConfig::default()) {
            Ok(s) => s,
            Err(e) => panic!("default scene: {e}"),
        }
    }

    fn change(name: &'static str, value: TweakValue) -> TweakChange {
        TweakChange { name, value }
    }

    // ── setup ──

    #[test]
    fn defaults() {
        let s = scene();
        assert_eq!(s.shape(), Shape::Circle);
        assert_eq!(s.filter(), FilterMode::Bilinear);
        assert_eq!(s.shading(), ShadingMode::Banded);
        assert_eq!(s.tex_size(), 32);
        assert_eq!(s.field().size(), 32);
        assert!((s.texture_radius() - 1.28).abs() < 1e-6);
        assert_eq!(s.generation(), 0);
    }

    #[test]
    fn binds_controls_in_panel_order() {
        let s = scene();
        let mut bar = TweakBar::new("TweakBar");
        s.bind(&mut bar);
        assert_eq!(bar.len(), 5);
    }

    // ── animation ──

    #[test]
    fn one_second_runs_ten_steps_and_one_regeneration() {
        let mut s = scene();
        s.update(1.0).unwrap();
        let expected = 4.0 * 0.99f32.powi(10);
        assert!((s.radius() - expected).abs() < 1e-4, "radius {}", s.radius());
        assert!((s.radius() - 3.62).abs() < 0.01);
        assert_eq!(s.generation(), 1);
    }

    #[test]
    fn short_frames_accumulate_before_stepping() {
        let mut s = scene();
        s.update(0.01).unwrap();
        assert_eq!(s.radius(), 4.0);
        assert_eq!(s.generation(), 0);

        s.update(0.01).unwrap();
        assert!(s.radius() < 4.0);
        assert_eq!(s.generation(), 1);
    }

    #[test]
    fn factor_flips_on_the_step_after_crossing() {
        let mut anim = RadiusAnimation::default();
        // 0.805 > 0.8 keeps shrinking; the result is below 0.8.
        let r = anim.advance(0.05, 0.805).unwrap_or(f32::NAN);
        assert!((r - 0.805 * 0.99).abs() < 1e-6);
        assert_eq!(anim.factor, SHRINK);

        anim.accumulator = 0.0;
        let r2 = anim.advance(0.05, r).unwrap_or(f32::NAN);
        assert!((r2 - r * 1.01).abs() < 1e-6);
        assert_eq!(anim.factor, GROW);
    }

    #[test]
    fn factor_flips_back_above_the_upper_threshold() {
        let mut anim = RadiusAnimation { accumulator: 0.0, factor: GROW };
        let r = anim.advance(0.05, 4.01).unwrap_or(f32::NAN);
        assert!((r - 4.01 * 0.99).abs() < 1e-5, "radius {r}");
        assert_eq!(anim.factor, SHRINK);
    }

    #[test]
    fn upper_threshold_is_exclusive() {
        let mut anim = RadiusAnimation { accumulator: 0.0, factor: GROW };
        let r = anim.advance(0.05, 4.0).unwrap_or(f32::NAN);
        assert!((r - 4.04).abs() < 1e-5, "radius {r}");
        assert_eq!(anim.factor, GROW);
    }

    #[test]
    fn long_runs_keep_ten_steps_per_second() {
        let mut anim = RadiusAnimation::default();
        let mut steps = 0;
        for _ in 0..3600 {
            let before = anim.accumulator;
            anim.advance(1.0, 2.0);
            steps += ((before + 1.0 - anim.accumulator) / STEP_COST).round() as u32;
        }
        assert_eq!(steps, 36_000);
        assert!(anim.accumulator <= STEP_THRESHOLD && anim.accumulator > STEP_THRESHOLD - STEP_COST);
    }

    #[test]
    fn factor_holds_between_thresholds() {
        let mut anim = RadiusAnimation { accumulator: 0.0, factor: GROW };
        let r = anim.advance(0.05, 2.0).unwrap_or(f32::NAN);
        assert!((r - 2.02).abs() < 1e-6);
        assert_eq!(anim.factor, GROW);
    }

    // ── panel edits ──

    #[test]
    fn shape_size_and_radius_edits_regenerate() {
        let mut s = scene();
        s.apply(&change("Draw Circle", TweakValue::Bool(false))).unwrap();
        assert_eq!(s.shape(), Shape::Square);
        s.apply(&change("Tex Pow", TweakValue::Int(6))).unwrap();
        assert_eq!(s.field().size(), 64);
        s.apply(&change("Radius", TweakValue::Float(10.0))).unwrap();
        assert!((s.texture_radius() - 6.4).abs() < 1e-5);
        assert_eq!(s.generation(), 3);
    }

    #[test]
    fn filter_and_shading_edits_leave_the_field() {
        let mut s = scene();
        let before = s.field().clone();
        s.apply(&change("Bilinear Filter", TweakValue::Bool(false))).unwrap();
        s.apply(&change("SDF Shader", TweakValue::Bool(false))).unwrap();
        assert_eq!(s.filter(), FilterMode::Nearest);
        assert_eq!(s.shading(), ShadingMode::Raw);
        assert_eq!(s.generation(), 0);
        assert_eq!(s.field(), &before);
    }

    #[test]
    fn out_of_range_edits_are_clamped() {
        let mut s = scene();
        s.apply(&change("Tex Pow", TweakValue::Int(12))).unwrap();
        assert_eq!(s.tex_size(), 64);
        s.apply(&change("Radius", TweakValue::Float(-5.0))).unwrap();
        assert_eq!(s.radius(), 0.1);
    }

    #[test]
    fn unchanged_values_do_not_regenerate() {
        let mut s = scene();
        s.apply(&change("Tex Pow", TweakValue::Int(5))).unwrap();
        s.apply(&change("Unknown", TweakValue::Int(5))).unwrap();
        assert_eq!(s.generation(), 0);
    }
}
