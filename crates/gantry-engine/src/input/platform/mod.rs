//! Window-system event translation.

pub(crate) mod winit;
