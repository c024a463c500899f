//! Named, ranged scalar bindings and the panel that edits them.
//!
//! A [`Tweak`] owns its value. Each frame the owner lists its tweaks on a
//! [`TweakBar`], which builds widgets from their current values. Edits come
//! back as [`TweakChange`]s that the owner drains with
//! [`TweakBar::take_changes`] and applies with [`Tweak::apply`], so widget
//! callbacks never touch the owner's state directly.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use sdflab_engine::paint::Color;
use sdflab_engine::scene::Border;
use sdflab_engine::text::FontId;

use crate::constraints::Insets;
use crate::widget::Element;
use crate::widgets::checkbox::Checkbox;
use crate::widgets::container::Container;
use crate::widgets::flex::Column;
use crate::widgets::slider::Slider;
use crate::widgets::stepper::Stepper;
use crate::widgets::text::Text;

// ── values ────────────────────────────────────────────────────────────────

/// A scalar as seen by the panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TweakValue {
    Bool(bool),
    Int(i64),
    Float(f64),
}

impl fmt::Display for TweakValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TweakValue::Bool(v) => write!(f, "{v}"),
            TweakValue::Int(v) => write!(f, "{v}"),
            TweakValue::Float(v) => write!(f, "{v:.3}"),
        }
    }
}

/// Types a [`Tweak`] can hold.
pub trait TweakScalar: Copy + PartialOrd + fmt::Debug + 'static {
    fn to_value(self) -> TweakValue;

    /// Converts back; `None` when the kind does not match.
    fn from_value(v: TweakValue) -> Option<Self>;
}

impl TweakScalar for bool {
    fn to_value(self) -> TweakValue {
        TweakValue::Bool(self)
    }

    fn from_value(v: TweakValue) -> Option<Self> {
        match v {
            TweakValue::Bool(b) => Some(b),
            _ => None,
        }
    }
}

macro_rules! int_scalar {
    ($($t:ty),*) => {$(
        impl TweakScalar for $t {
            fn to_value(self) -> TweakValue {
                TweakValue::Int(i64::from(self))
            }

            fn from_value(v: TweakValue) -> Option<Self> {
                match v {
                    TweakValue::Int(i) => <$t>::try_from(i).ok(),
                    _ => None,
                }
            }
        }
    )*};
}

int_scalar!(i32, u32);

impl TweakScalar for f32 {
    fn to_value(self) -> TweakValue {
        TweakValue::Float(f64::from(self))
    }

    fn from_value(v: TweakValue) -> Option<Self> {
        match v {
            TweakValue::Float(x) => Some(x as f32),
            _ => None,
        }
    }
}

impl TweakScalar for f64 {
    fn to_value(self) -> TweakValue {
        TweakValue::Float(self)
    }

    fn from_value(v: TweakValue) -> Option<Self> {
        match v {
            TweakValue::Float(x) => Some(x),
            _ => None,
        }
    }
}

// ── Tweak ─────────────────────────────────────────────────────────────────

/// A named value with an optional inclusive range and step.
#[derive(Debug, Clone, PartialEq)]
pub struct Tweak<T> {
    name: &'static str,
    value: T,
    range: Option<(T, T)>,
    step: Option<T>,
}

impl<T: TweakScalar> Tweak<T> {
    pub fn new(name: &'static str, value: T) -> Self {
        Self { name, value, range: None, step: None }
    }

    /// Inclusive bounds; the current value is clamped into them.
    pub fn range(mut self, min: T, max: T) -> Self {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        self.range = Some((min, max));
        self.value = self.clamp(self.value);
        self
    }

    pub fn step(mut self, step: T) -> Self {
        self.step = Some(step);
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn get(&self) -> T {
        self.value
    }

    pub fn bounds(&self) -> Option<(T, T)> {
        self.range
    }

    /// Stores `v` clamped to the range; returns whether the value changed.
    pub fn set(&mut self, v: T) -> bool {
        let v = self.clamp(v);
        if v == self.value {
            return false;
        }
        self.value = v;
        true
    }

    /// Takes `change` if it names this tweak and carries the right kind.
    /// Returns whether the value changed.
    pub fn apply(&mut self, change: &TweakChange) -> bool {
        if change.name != self.name {
            return false;
        }
        match T::from_value(change.value) {
            Some(v) => self.set(v),
            None => {
                log::warn!("tweak {:?}: ignoring {:?} of the wrong kind", self.name, change.value);
                false
            }
        }
    }

    fn clamp(&self, v: T) -> T {
        match self.range {
            Some((min, _)) if v < min => min,
            Some((_, max)) if v > max => max,
            _ => v,
        }
    }
}

/// An edit reported by the panel.
#[derive(Debug, Clone, PartialEq)]
pub struct TweakChange {
    pub name: &'static str,
    pub value: TweakValue,
}

// ── TweakBar ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
struct TweakRow {
    name: &'static str,
    value: TweakValue,
    range: Option<(TweakValue, TweakValue)>,
    step: Option<TweakValue>,
}

type ChangeQueue = Rc<RefCell<Vec<TweakChange>>>;

/// A titled, fixed-width panel of tweak controls.
///
/// Booleans become checkboxes, integers steppers and floats sliders.
pub struct TweakBar {
    name: String,
    width: f32,
    tint: Color,
    font: Option<FontId>,
    font_size: f32,
    rows: Vec<TweakRow>,
    changes: ChangeQueue,
}

impl TweakBar {
    pub const DEFAULT_WIDTH: f32 = 150.0;

    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            width: Self::DEFAULT_WIDTH,
            tint: Color::from_rgba_u8(96, 216, 224, 255),
            font: None,
            font_size: 12.0,
            rows: Vec::new(),
            changes: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn width(mut self, w: f32) -> Self {
        self.width = w.max(1.0);
        self
    }

    /// Accent color of the title strip and active controls.
    pub fn tint(mut self, c: Color) -> Self {
        self.tint = c;
        self
    }

    pub fn set_font(&mut self, font: Option<FontId>) {
        self.font = font;
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn panel_width(&self) -> f32 {
        self.width
    }

    /// Forgets last frame's rows. Pending changes are kept.
    pub fn clear(&mut self) {
        self.rows.clear();
    }

    /// Lists `tweak` as the next row, showing its current value.
    pub fn add<T: TweakScalar>(&mut self, tweak: &Tweak<T>) {
        self.rows.push(TweakRow {
            name: tweak.name(),
            value: tweak.get().to_value(),
            range: tweak.bounds().map(|(lo, hi)| (lo.to_value(), hi.to_value())),
            step: tweak.step.map(TweakScalar::to_value),
        });
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Edits made since the last call, oldest first.
    pub fn take_changes(&mut self) -> Vec<TweakChange> {
        std::mem::take(&mut *self.changes.borrow_mut())
    }

    /// The panel as a widget tree for this frame.
    pub fn build(&self) -> Element {
        let text_color = Color::from_straight(0.08, 0.1, 0.12, 1.0);
        let title: Element = match self.font {
            Some(font) => Text::new(self.name.as_str(), font, self.font_size, text_color).into(),
            None => Container::new().padding(Insets::uniform(self.font_size * 0.6)).into(),
        };
        let title = Container::new()
            .background(self.tint)
            .corner_radius(3.0)
            .padding(Insets::axes(3.0, 6.0))
            .child(title);

        let body = Column::new()
            .spacing(6.0)
            .padding(Insets::uniform(6.0))
            .children(self.rows.iter().map(|row| self.control(row)));

        Container::new()
            .width(self.width)
            .background(Color::from_straight(0.05, 0.06, 0.08, 0.85))
            .border(Border::new(1.0, self.tint.with_alpha(0.6)))
            .corner_radius(4.0)
            .padding(Insets::uniform(2.0))
            .child(Column::new().child(title).child(body))
            .into()
    }

    fn control(&self, row: &TweakRow) -> Element {
        let name = row.name;
        let queue = Rc::clone(&self.changes);
        let push = move |value| queue.borrow_mut().push(TweakChange { name, value });

        match row.value {
            TweakValue::Bool(v) => Checkbox::new()
                .label(name)
                .font(self.font)
                .font_size(self.font_size)
                .checked(v)
                .checked_color(self.tint.darken(0.2))
                .on_change(move |b| push(TweakValue::Bool(b)))
                .into(),
            TweakValue::Int(v) => {
                let (lo, hi) = match row.range {
                    Some((TweakValue::Int(lo), TweakValue::Int(hi))) => (saturate(lo), saturate(hi)),
                    _ => (i32::MIN, i32::MAX),
                };
                let step = match row.step {
                    Some(TweakValue::Int(s)) => saturate(s),
                    _ => 1,
                };
                Stepper::new()
                    .label(name)
                    .font(self.font)
                    .range(lo, hi)
                    .step(step)
                    .value(saturate(v))
                    .on_change(move |i| push(TweakValue::Int(i64::from(i))))
                    .into()
            }
            TweakValue::Float(v) => {
                let (lo, hi) = match row.range {
                    Some((TweakValue::Float(lo), TweakValue::Float(hi))) => (lo as f32, hi as f32),
                    _ => (0.0, 1.0),
                };
                let step = match row.step {
                    Some(TweakValue::Float(s)) => s as f32,
                    _ => 0.0,
                };
                Slider::new()
                    .label(name)
                    .font(self.font)
                    .range(lo, hi)
                    .step(step)
                    .precision(if step > 0.0 && step < 1.0 { 2 } else { 1 })
                    .value(v as f32)
                    .fill_color(self.tint.darken(0.2))
                    .on_change(move |x| push(TweakValue::Float(f64::from(x))))
                    .into()
            }
        }
    }
}

fn saturate(v: i64) -> i32 {
    v.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}
