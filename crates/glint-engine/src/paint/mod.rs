//! Flat color model shared between the engine state and shapes.

pub mod color;

pub use color::Rgb;
