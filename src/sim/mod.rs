//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No terminal or platform dependencies

pub mod arena;
pub mod collision;
pub mod entity;
pub mod layout;
pub mod simulation;
pub mod state;
pub mod store;
pub mod tick;

pub use arena::Arena;
pub use collision::{
    Axis, Collision, CollisionClass, Wall, bounce, bounce_axis, first_collision,
    paddle_deflection, reflect_off_wall, wall_contacts,
};
pub use entity::{Aabb, Entity, EntityId, EntityKind, Movement};
pub use simulation::Simulation;
pub use state::{GameState, Outcome};
pub use store::EntityStore;
pub use tick::tick;
