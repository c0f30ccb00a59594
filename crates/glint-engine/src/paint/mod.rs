//! Colors used for clearing and vertex attributes.

mod color;

pub use color::Color;
