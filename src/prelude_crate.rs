pub(crate) use crate::constants::*;
pub(crate) use crate::error::{LbError, LbResult};
pub(crate) use crate::kernel;
pub(crate) use crate::momentum::bc::Orientation;
pub(crate) use crate::velocity_set::d2q9::{C, Q, Q_BAR, W};
pub(crate) use crate::velocity_set::{self, DirectionSet};
