use thiserror::Error;

/// Errors raised while configuring or running a simulation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LbError {
    /// The node behavior pool has no slot left.
    #[error("node behavior pool exhausted: all {capacity} slots are in use")]
    PoolExhausted { capacity: usize },

    #[error("node ({i}, {j}) is outside the {ni}x{nj} grid")]
    NodeOutOfGrid {
        i: usize,
        j: usize,
        ni: usize,
        nj: usize,
    },

    /// Node behaviors are assigned once per cell.
    #[error("node ({i}, {j}) already has a behavior assigned")]
    BehaviorAlreadyAssigned { i: usize, j: usize },

    #[error("periodic node ({i}, {j}) relays to ({}, {}), which is outside the grid", target.0, target.1)]
    RelayTargetOutOfGrid {
        i: usize,
        j: usize,
        target: (usize, usize),
    },

    /// A population was sent to a node outside the grid. Indicates a boundary misconfiguration.
    #[error("direction {k} of node ({i}, {j}) streams to ({}, {}), outside the grid", target.0, target.1)]
    StreamOutOfBounds {
        i: usize,
        j: usize,
        k: usize,
        target: (isize, isize),
    },
}

pub type LbResult<T> = Result<T, LbError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stream_out_of_bounds_message() {
        let error = LbError::StreamOutOfBounds {
            i: 0,
            j: 3,
            k: 3,
            target: (-1, 3),
        };

        assert_eq!(
            error.to_string(),
            "direction 3 of node (0, 3) streams to (-1, 3), outside the grid"
        );
    }
}
