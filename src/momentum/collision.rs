use super::{Constitutive, Equilibrium, Force, Lattice, MultiscaleMap};
use crate::prelude_crate::*;

/// BGK collision composed from an equilibrium, a constitutive law and an optional force.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionManager {
    equilibrium: Equilibrium,
    constitutive: Constitutive,
    force: Option<Force>,
}

impl CollisionManager {
    pub fn new(equilibrium: Equilibrium, constitutive: Constitutive, force: Option<Force>) -> Self {
        CollisionManager {
            equilibrium,
            constitutive,
            force,
        }
    }

    pub fn get_equilibrium(&self) -> &Equilibrium {
        &self.equilibrium
    }

    pub fn get_constitutive(&self) -> &Constitutive {
        &self.constitutive
    }

    pub fn get_force(&self) -> Option<&Force> {
        self.force.as_ref()
    }

    /// Collides node `(i, j)` using the density and velocity held by the map, and records
    /// the relaxation frequency it used.
    pub fn collide(&self, lattice: &mut Lattice, multiscale_map: &mut MultiscaleMap, i: usize, j: usize) {
        let density = multiscale_map.get_density(i, j);
        let velocity = multiscale_map.get_velocity(i, j);
        let f = lattice.get_populations_mut(i, j);
        self.collide_populations(f, density, velocity, multiscale_map.get_omega_mut(i, j));
    }

    pub(crate) fn collide_populations(
        &self,
        f: &mut [Float],
        density: Float,
        velocity: [Float; 2],
        omega: &mut Float,
    ) {
        let velocity = match &self.force {
            Some(force) => force.u_trans(velocity),
            None => velocity,
        };
        let f_eq = self.equilibrium.compute(density, velocity);
        let f_neq: [Float; Q] = std::array::from_fn(|k| f[k] - f_eq[k]);
        let mu = self.constitutive.mu(&f_neq, density, *omega);
        let omega_new = kernel::mu_to_omega(mu);
        kernel::bgk_collision(f, &f_eq, omega_new);
        if let Some(force) = &self.force {
            f.iter_mut()
                .enumerate()
                .for_each(|(k, f_k)| *f_k += force.f_col(omega_new, velocity, k));
        }
        *omega = omega_new;
    }
}
