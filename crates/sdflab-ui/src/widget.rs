use sdflab_engine::coords::{Rect, Vec2};

use crate::constraints::{Constraints, LayoutCtx};
use crate::event::{EventResult, UiEvent};
use crate::painter::Painter;

/// A node in the overlay's widget tree.
///
/// Trees are rebuilt every frame from the bound values, so widgets hold no
/// state beyond what they were constructed with.
pub trait Widget: 'static {
    /// Size this widget wants within `constraints`. Must be deterministic;
    /// parents call it again while painting and routing events.
    fn measure(&self, constraints: Constraints, ctx: &LayoutCtx<'_>) -> Vec2;

    /// Draw into `painter` inside `rect`.
    fn paint(&self, painter: &mut Painter<'_>, rect: Rect);

    /// Route an event. Return [`EventResult::Consumed`] to stop propagation.
    fn on_event(&mut self, _event: &UiEvent, _rect: Rect, _ctx: &LayoutCtx<'_>) -> EventResult {
        EventResult::Ignored
    }
}

/// A type-erased widget; the child type of every container.
pub struct Element(Box<dyn Widget>);

impl Element {
    pub fn new<W: Widget>(w: W) -> Self {
        Self(Box::new(w))
    }

    #[inline]
    pub fn measure(&self, constraints: Constraints, ctx: &LayoutCtx<'_>) -> Vec2 {
        self.0.measure(constraints, ctx)
    }

    #[inline]
    pub fn paint(&self, painter: &mut Painter<'_>, rect: Rect) {
        self.0.paint(painter, rect)
    }

    #[inline]
    pub fn on_event(&mut self, event: &UiEvent, rect: Rect, ctx: &LayoutCtx<'_>) -> EventResult {
        self.0.on_event(event, rect, ctx)
    }
}

impl<W: Widget> From<W> for Element {
    fn from(w: W) -> Self {
        Self::new(w)
    }
}
