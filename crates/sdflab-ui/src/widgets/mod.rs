pub mod checkbox;
pub mod container;
pub mod flex;
pub mod slider;
pub mod stepper;
pub mod text;

/// Nudge direction for a hovered value widget, from arrow keys.
pub(crate) fn arrow_direction(key: sdflab_engine::input::Key) -> Option<f32> {
    use sdflab_engine::input::Key;
    match key {
        Key::ArrowUp | Key::ArrowRight => Some(1.0),
        Key::ArrowDown | Key::ArrowLeft => Some(-1.0),
        _ => None,
    }
}
