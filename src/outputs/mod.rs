//! Output generation for the kiosk document.
//!
//! One submodule, one artifact: [`slideshow`] turns the extracted items into
//! a single self-contained HTML file (markup, styling, and rotation script
//! inlined) that a wall-mounted browser can display with no further assets.

pub mod slideshow;
