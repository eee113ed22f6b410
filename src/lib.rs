pub mod cli;
pub mod constants;
pub mod error;
pub mod io;
pub mod kernel;
pub mod momentum;
pub mod prelude;
mod prelude_crate;
pub mod setup;
pub mod simulation;
pub mod timer;
pub mod velocity_set;

pub use error::{LbError, LbResult};
pub use momentum::bc::Orientation;
pub use simulation::{Parameters, Simulation};
