//! Rendering boundary
//!
//! The simulation never draws. Front ends receive an immutable `Snapshot`
//! each tick; `TextFrame` turns one into character rows for cell-based
//! backends.

pub mod frame;
pub mod snapshot;

pub use frame::TextFrame;
pub use snapshot::{Snapshot, build_snapshot};

/// Anything that can present a snapshot
pub trait RenderAdapter {
    fn render(&mut self, snapshot: &Snapshot) -> anyhow::Result<()>;
}
