// ------------------------------------------------------------------------------- MODULES

pub mod d2q9;

// ------------------------------------------------------------------------------- IMPORTS

use crate::constants::Float;
use d2q9::{C, D, Q, Q_BAR};

// ---------------------------------------------------------------------- FUNCTIONS: D2Q9

pub fn opposite_direction(i: usize) -> usize {
    Q_BAR[i]
}

/// Zeroth moment of the populations of one node.
pub fn density(f: &[Float]) -> Float {
    d2q9::density_computation(f)
}

/// First moment of the populations of one node.
pub fn momentum(f: &[Float]) -> [Float; D] {
    d2q9::momentum_computation(f)
}

pub fn c_dot(i: usize, vector: [Float; D]) -> Float {
    C[i][0] as Float * vector[0] + C[i][1] as Float * vector[1]
}

// ---------------------------------------------------------------- STRUCT: DirectionSet

/// A subset of the nine lattice directions stored as a bit mask.
///
/// # Examples
/// ```
/// # use lbflow2d::velocity_set::DirectionSet;
/// let set = DirectionSet::from_slice(&[3, 6, 7]);
///
/// assert!(set.contains(6));
/// assert!(!set.contains(1));
/// assert_eq!(set.len(), 3);
/// assert_eq!(set.iter().collect::<Vec<usize>>(), vec![3, 6, 7]);
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DirectionSet(u16);

impl DirectionSet {
    pub const EMPTY: DirectionSet = DirectionSet(0);

    pub const ALL: DirectionSet = DirectionSet((1 << Q) - 1);

    pub fn from_slice(directions: &[usize]) -> Self {
        directions
            .iter()
            .filter(|&&i| i < Q)
            .fold(DirectionSet::EMPTY, |set, &i| set.with(i))
    }

    pub fn with(self, i: usize) -> Self {
        DirectionSet(self.0 | (1 << i))
    }

    pub fn without(self, i: usize) -> Self {
        DirectionSet(self.0 & !(1 << i))
    }

    pub fn contains(&self, i: usize) -> bool {
        i < Q && self.0 & (1 << i) != 0
    }

    pub fn union(self, other: DirectionSet) -> Self {
        DirectionSet(self.0 | other.0)
    }

    pub fn difference(self, other: DirectionSet) -> Self {
        DirectionSet(self.0 & !other.0)
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        (0..Q).filter(|&i| self.contains(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_set_algebra() {
        let all = DirectionSet::ALL;
        let west = DirectionSet::from_slice(&d2q9::Q_WEST);

        let rest = all.difference(west);

        assert_eq!(all.len(), Q);
        assert_eq!(rest.len(), 6);
        assert!(west.iter().all(|i| !rest.contains(i)));
        assert_eq!(rest.union(west), all);
        assert!(DirectionSet::EMPTY.is_empty());
        assert_eq!(west.without(6).iter().collect::<Vec<usize>>(), vec![3, 7]);
    }

    #[test]
    fn test_direction_set_ignores_invalid_directions() {
        let set = DirectionSet::from_slice(&[1, 9, 12]);

        assert_eq!(set.len(), 1);
        assert!(!set.contains(9));
    }

    #[test]
    fn test_c_dot() {
        let u = [0.1, -0.2];
        assert!((c_dot(0, u)).abs() < 1e-12);
        assert!((c_dot(1, u) - 0.1).abs() < 1e-12);
        assert!((c_dot(6, u) + 0.3).abs() < 1e-12);
        assert!((c_dot(8, u) - 0.3).abs() < 1e-12);
        (0..Q).for_each(|i| {
            assert!((c_dot(i, u) + c_dot(opposite_direction(i), u)).abs() < 1e-12);
        });
    }
}
