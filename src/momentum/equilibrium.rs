use crate::prelude_crate::*;

/// Equilibrium distribution used by collision.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Equilibrium {
    /// `w_i rho (1 + c.u/cs^2 + (c.u)^2/(2 cs^4) - u.u/(2 cs^2))`.
    #[default]
    Incompressible,
    /// He-Luo form: density fluctuation `rho - rho_0` plus the expansion taken at `rho_0`.
    HeLuo { reference_density: Float },
}

impl Equilibrium {
    /// # Examples
    /// ```
    /// # use lbflow2d::prelude::*;
    /// let equilibrium = Equilibrium::Incompressible;
    ///
    /// assert!((equilibrium.f(1.2, [0.0, 0.0], 0) - 1.2 * 4.0 / 9.0).abs() < 1e-12);
    /// ```
    pub fn f(&self, density: Float, velocity: [Float; 2], i: usize) -> Float {
        let bracket = kernel::equilibrium_bracket(i, velocity);
        match self {
            Equilibrium::Incompressible => W[i] * density * bracket,
            Equilibrium::HeLuo { reference_density } => {
                W[i] * (density - reference_density) + W[i] * reference_density * bracket
            }
        }
    }

    pub fn compute(&self, density: Float, velocity: [Float; 2]) -> [Float; Q] {
        std::array::from_fn(|i| self.f(density, velocity, i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rest_equilibrium() {
        let density = 1.3;
        let f_eq = Equilibrium::Incompressible.compute(density, [0.0, 0.0]);

        f_eq.iter()
            .zip(W.iter())
            .for_each(|(f_eq_i, w_i)| assert!((f_eq_i - w_i * density).abs() < 1e-12));
    }

    #[test]
    fn test_equilibrium_moments() {
        let density = 1.05;
        let velocity = [0.03, -0.02];
        [
            Equilibrium::Incompressible,
            Equilibrium::HeLuo {
                reference_density: 1.0,
            },
        ]
        .iter()
        .for_each(|equilibrium| {
            let f_eq = equilibrium.compute(density, velocity);
            assert!((velocity_set::density(&f_eq) - density).abs() < 1e-12);
            let momentum = velocity_set::momentum(&f_eq);
            let scale = match equilibrium {
                Equilibrium::Incompressible => density,
                Equilibrium::HeLuo { reference_density } => *reference_density,
            };
            assert!((momentum[0] - scale * velocity[0]).abs() < 1e-12);
            assert!((momentum[1] - scale * velocity[1]).abs() < 1e-12);
        });
    }

    #[test]
    fn test_he_luo_matches_standard_at_reference_density() {
        let velocity = [0.04, 0.01];
        let standard = Equilibrium::Incompressible.compute(1.0, velocity);
        let he_luo = Equilibrium::HeLuo {
            reference_density: 1.0,
        }
        .compute(1.0, velocity);

        standard
            .iter()
            .zip(he_luo.iter())
            .for_each(|(a, b)| assert!((a - b).abs() < 1e-12));
    }
}
