//! Scene (draw stream) types.
//!
//! Responsibilities:
//! - store renderer-agnostic quad commands in world space
//! - carry the projection they are drawn under
//! - keep per-frame recording allocation-free once warmed

mod cmd;
mod list;

pub use cmd::QuadCmd;
pub use list::DrawList;
