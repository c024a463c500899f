//! Immediate-mode tuning overlay on top of `sdflab-engine`.
//!
//! The widget tree is rebuilt every frame from the values it shows. Input is
//! routed before painting, and the overlay reports which input it consumed so
//! the host can fall back to its own handling for the rest.
//!
//! ```rust,ignore
//! use sdflab_ui::prelude::*;
//!
//! let mut radius = Tweak::new("Radius", 4.0f32).range(0.1, 100.0).step(0.1);
//! let mut bar = TweakBar::new("TweakBar");
//!
//! // each frame:
//! bar.clear();
//! bar.add(&radius);
//! let response = overlay.frame(bar.build(), viewport, &UiInput::from_engine(input, input_frame));
//! for change in bar.take_changes() {
//!     radius.apply(&change);
//! }
//! ```

pub mod constraints;
pub mod event;
pub mod overlay;
pub mod painter;
pub mod scene;
pub mod tweak;
pub mod widget;
pub mod widgets;

pub mod prelude {
    pub use crate::constraints::{Constraints, Insets, LayoutCtx};
    pub use crate::event::{EventResult, UiEvent};
    pub use crate::overlay::Overlay;
    pub use crate::painter::Painter;
    pub use crate::scene::{UiInput, UiResponse, UiScene};
    pub use crate::tweak::{Tweak, TweakBar, TweakChange, TweakScalar, TweakValue};
    pub use crate::widget::{Element, Widget};
    pub use crate::widgets::{
        checkbox::Checkbox, container::Container, flex::Column, slider::Slider, stepper::Stepper,
        text::Text,
    };

    pub use sdflab_engine::coords::{Rect, Vec2};
    pub use sdflab_engine::paint::Color;
    pub use sdflab_engine::text::FontId;
}
