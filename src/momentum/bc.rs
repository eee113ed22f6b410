use crate::prelude_crate::*;
use crate::velocity_set::d2q9::{Q_EAST, Q_NORTH, Q_SOUTH, Q_WEST};

pub use Orientation::*;

/// Side a wall's fluid face looks toward. A north-facing wall has solid to its south.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Orientation {
    North,
    South,
    East,
    West,
}

impl Orientation {
    /// Directions that would carry mass into the solid behind the wall.
    ///
    /// # Examples
    /// ```
    /// # use lbflow2d::Orientation;
    /// assert_eq!(Orientation::West.get_solid_directions(), [1, 5, 8]);
    /// assert_eq!(Orientation::North.get_solid_directions(), [4, 7, 8]);
    /// ```
    pub fn get_solid_directions(&self) -> [usize; 3] {
        match self {
            North => Q_SOUTH,
            South => Q_NORTH,
            East => Q_WEST,
            West => Q_EAST,
        }
    }

    /// Directions that would arrive from the solid side, filled by bounce-back.
    pub fn get_corrected_directions(&self) -> [usize; 3] {
        self.get_solid_directions().map(|i| Q_BAR[i])
    }

    pub fn get_streamed_directions(&self) -> DirectionSet {
        DirectionSet::ALL.difference(DirectionSet::from_slice(&self.get_solid_directions()))
    }
}

/// Writes the mirror of every solid-side population into the node's incoming slots.
pub(crate) fn compute_bounce_back(f_star: &[Float], incoming: &mut [Float], orientation: Orientation) {
    orientation.get_solid_directions().iter().for_each(|&i| {
        let i_bar = Q_BAR[i];
        incoming[i_bar] = f_star[i];
    });
}

/// Destination of a relayed population. Along an axis where the plain neighbor falls
/// outside the grid the target's coordinate is taken, otherwise the plain step.
pub(crate) fn relay_destination(
    index: (usize, usize),
    i: usize,
    target: (usize, usize),
    n: (usize, usize),
) -> (usize, usize) {
    let wrap = |x: usize, c_x: i32, target_x: usize, n_x: usize| {
        let x = x as isize + c_x as isize;
        if x < 0 || x >= n_x as isize {
            target_x
        } else {
            x as usize
        }
    };
    (
        wrap(index.0, C[i][0], target.0, n.0),
        wrap(index.1, C[i][1], target.1, n.1),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const F_STAR: [Float; Q] = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0];

    const INCOMING: [Float; Q] = [0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8, 0.9];

    #[test]
    fn test_compute_bounce_back_north_facing() {
        let mut incoming = INCOMING;

        compute_bounce_back(&F_STAR, &mut incoming, North);

        assert_eq!(incoming, [0.1, 0.2, 5.0, 0.4, 0.5, 8.0, 9.0, 0.8, 0.9]);
    }

    #[test]
    fn test_compute_bounce_back_south_facing() {
        let mut incoming = INCOMING;

        compute_bounce_back(&F_STAR, &mut incoming, South);

        assert_eq!(incoming, [0.1, 0.2, 0.3, 0.4, 3.0, 0.6, 0.7, 6.0, 7.0]);
    }

    #[test]
    fn test_compute_bounce_back_east_facing() {
        let mut incoming = INCOMING;

        compute_bounce_back(&F_STAR, &mut incoming, East);

        assert_eq!(incoming, [0.1, 4.0, 0.3, 0.4, 0.5, 8.0, 0.7, 0.8, 7.0]);
    }

    #[test]
    fn test_compute_bounce_back_west_facing() {
        let mut incoming = INCOMING;

        compute_bounce_back(&F_STAR, &mut incoming, West);

        assert_eq!(incoming, [0.1, 0.2, 0.3, 2.0, 0.5, 0.6, 9.0, 6.0, 0.9]);
    }

    #[test]
    fn test_streamed_directions_keep_rest_population() {
        [North, South, East, West].iter().for_each(|orientation| {
            let streamed = orientation.get_streamed_directions();
            assert_eq!(streamed.len(), 6);
            assert!(streamed.contains(0));
            orientation
                .get_solid_directions()
                .iter()
                .for_each(|&i| assert!(!streamed.contains(i)));
        });
    }

    #[test]
    fn test_relay_destination_wraps_only_leaving_axis() {
        let n = (40, 12);

        assert_eq!(relay_destination((0, 5), 3, (39, 5), n), (39, 5));
        assert_eq!(relay_destination((0, 5), 6, (39, 5), n), (39, 6));
        assert_eq!(relay_destination((0, 5), 7, (39, 5), n), (39, 4));
        assert_eq!(relay_destination((39, 5), 5, (0, 5), n), (0, 6));
    }

    #[test]
    fn test_relay_destination_at_corner() {
        let n = (8, 6);
        let target = (7, 5);

        assert_eq!(relay_destination((0, 0), 3, target, n), (7, 0));
        assert_eq!(relay_destination((0, 0), 4, target, n), (0, 5));
        assert_eq!(relay_destination((0, 0), 7, target, n), (7, 5));
        assert_eq!(relay_destination((0, 0), 8, target, n), (1, 5));
    }
}
