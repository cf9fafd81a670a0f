#![forbid(unsafe_code)]

//! Core primitives for the plan-diagram layout engine.
//!
//! This crate holds the pieces every other `planviz` crate builds on:
//!
//! - [`Point`] / [`Extent`] - minimal pixel-space geometry value types
//! - [`consts`] - the visual constants of the diagram (operator box size,
//!   margins, scale bounds, relaxation defaults)
//! - [`format_thousands`] - thousands-separated integer formatting for
//!   numeric detail lines
//!
//! # Example
//! ```
//! use planviz_core::{Point, format_thousands};
//!
//! let p = Point::new(10.0, -68.0);
//! assert_eq!(p.x, 10.0);
//!
//! assert_eq!(format_thousands(1234567.0), "1,234,567");
//! ```

pub mod consts;
pub mod geometry;

pub use geometry::{Extent, Point};

/// Format a non-negative count with `,` thousands separators.
///
/// The value is rounded to the nearest integer first. Negative or
/// non-finite inputs format as `0` (counts are never negative upstream).
///
/// # Example
/// ```
/// use planviz_core::format_thousands;
///
/// assert_eq!(format_thousands(0.0), "0");
/// assert_eq!(format_thousands(999.0), "999");
/// assert_eq!(format_thousands(1000.0), "1,000");
/// assert_eq!(format_thousands(2000000.0), "2,000,000");
/// ```
#[must_use]
pub fn format_thousands(value: f64) -> String {
    let n = if value.is_finite() && value > 0.0 {
        value.round() as u64
    } else {
        0
    };
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i).is_multiple_of(3) {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
