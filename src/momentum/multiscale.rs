use super::{Lattice, Region};
use crate::prelude_crate::*;
use rayon::prelude::*;

/// Macroscale fields projected from the populations: density, velocity and the relaxation
/// frequency last used by collision.
#[derive(Debug, Clone)]
pub struct MultiscaleMap {
    ni: usize,
    nj: usize,
    density: Vec<Float>,
    velocity: Vec<[Float; 2]>,
    omega: Vec<Float>,
}

impl MultiscaleMap {
    /// # Examples
    /// ```
    /// # use lbflow2d::prelude::*;
    /// let map = MultiscaleMap::new(4, 3, 1.0, 1.2);
    ///
    /// assert_eq!(map.get_density(3, 2), 1.0);
    /// assert_eq!(map.get_velocity(0, 0), [0.0, 0.0]);
    /// assert_eq!(map.get_omega(1, 1), 1.2);
    /// ```
    pub fn new(ni: usize, nj: usize, density: Float, omega: Float) -> Self {
        let num_nodes = ni * nj;
        MultiscaleMap {
            ni,
            nj,
            density: vec![density; num_nodes],
            velocity: vec![[0.0, 0.0]; num_nodes],
            omega: vec![omega; num_nodes],
        }
    }

    fn index(&self, i: usize, j: usize) -> usize {
        i * self.nj + j
    }

    pub fn get_n(&self) -> (usize, usize) {
        (self.ni, self.nj)
    }

    pub fn get_density(&self, i: usize, j: usize) -> Float {
        self.density[self.index(i, j)]
    }

    pub fn get_velocity(&self, i: usize, j: usize) -> [Float; 2] {
        self.velocity[self.index(i, j)]
    }

    pub fn get_omega(&self, i: usize, j: usize) -> Float {
        self.omega[self.index(i, j)]
    }

    pub(crate) fn get_omega_mut(&mut self, i: usize, j: usize) -> &mut Float {
        let n = self.index(i, j);
        &mut self.omega[n]
    }

    pub(crate) fn get_fields_mut(&mut self) -> (&[Float], &[[Float; 2]], &mut [Float]) {
        (&self.density, &self.velocity, &mut self.omega)
    }

    pub fn get_densities(&self) -> &[Float] {
        &self.density
    }

    pub fn get_velocities(&self) -> &[[Float; 2]] {
        &self.velocity
    }

    pub fn project_node(&mut self, lattice: &Lattice, i: usize, j: usize) {
        let n = self.index(i, j);
        let (density, velocity) = compute_moments(lattice.get_populations(i, j));
        self.density[n] = density;
        self.velocity[n] = velocity;
    }

    pub fn project_region(&mut self, lattice: &Lattice, region: &Region) {
        region
            .clip(self.ni, self.nj)
            .iter()
            .filter(|&(i, j)| !lattice.get_node_behavior(i, j).is_inactive())
            .for_each(|(i, j)| self.project_node(lattice, i, j));
    }

    /// Refreshes density and velocity of every non-inactive node.
    pub fn project(&mut self, lattice: &Lattice) {
        lattice
            .get_all_populations()
            .par_chunks(Q)
            .zip(self.density.par_iter_mut().zip(self.velocity.par_iter_mut()))
            .enumerate()
            .filter(|(n, _)| !lattice.get_node_behavior_at(*n).is_inactive())
            .for_each(|(_, (f, (density, velocity)))| {
                (*density, *velocity) = compute_moments(f);
            });
    }
}

fn compute_moments(f: &[Float]) -> (Float, [Float; 2]) {
    let density = velocity_set::density(f);
    let momentum = velocity_set::momentum(f);
    (density, [momentum[0] / density, momentum[1] / density])
}
