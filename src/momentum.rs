// ------------------------------------------------------------------------------- MODULES

pub mod bc;
mod collision;
pub mod constitutive;
mod equilibrium;
mod force;
pub mod lattice;
mod multiscale;
pub mod node;
pub mod post;

// ------------------------------------------------------------------------------- IMPORTS

pub use collision::CollisionManager;
pub use constitutive::{Bingham, Constitutive};
pub use equilibrium::Equilibrium;
pub use force::Force;
pub use lattice::{BoundsPolicy, Lattice, Region};
pub use multiscale::MultiscaleMap;
pub use node::{NodeBehavior, NodeBehaviorPool, NodeHandle, PeriodicRelay, max_node_behavior_size};
pub use post::{Callback, DisplayTimeStep, PostFunction, PostResult};
