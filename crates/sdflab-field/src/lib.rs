//! Signed distance field rasterization for the **sdflab** viewer.
//!
//! The generator is pure math with no window or GPU code, so it can be tested
//! headless.
//!
//! # Structure
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`shape`] | `Shape`, per-point `circle_sample` / `square_sample` |
//! | [`field`] | `DistanceField`, the `N × N` grid of signed 8-bit samples |
//! | [`error`] | `FieldError` |
//!
//! # Quick start
//!
//! ```rust
//! use sdflab_field::{DistanceField, Shape};
//!
//! let field = DistanceField::generate(Shape::Circle, 32, 8.0).unwrap();
//! assert_eq!(field.size(), 32);
//! assert_eq!(field.get(0, 0), Some(-127));
//! ```

pub mod error;
pub mod field;
pub mod shape;

pub use error::FieldError;
pub use field::DistanceField;
pub use shape::{SAMPLE_MAX, Shape, circle_sample, square_sample};
