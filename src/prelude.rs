pub use crate::constants::*;
pub use crate::error::{LbError, LbResult};
pub use crate::momentum::{
    self, CollisionManager, Constitutive, DisplayTimeStep, Equilibrium, Force, Lattice,
    MultiscaleMap, NodeBehavior, NodeBehaviorPool, NodeHandle, PeriodicRelay, PostFunction,
    PostResult, Region, bc::Orientation, lattice::BoundsPolicy,
};
pub use crate::setup;
pub use crate::simulation::{Parameters, Simulation};
pub use crate::timer::Stopwatch;
pub use crate::velocity_set::DirectionSet;
