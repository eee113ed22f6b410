use crate::prelude_crate::*;
use nalgebra::Matrix2;

/// Relaxation time for a kinematic viscosity, `mu / (cs^2 dt) + 1/2`.
///
/// # Examples
/// ```
/// # use lbflow2d::kernel::mu_to_relax;
/// assert!((mu_to_relax(1.0 / 6.0) - 1.0).abs() < 1e-12);
/// ```
pub fn mu_to_relax(mu: Float) -> Float {
    mu / (CS_2 * DELTA_T) + 0.5
}

/// Relaxation frequency for a kinematic viscosity.
pub fn mu_to_omega(mu: Float) -> Float {
    1.0 / mu_to_relax(mu)
}

pub fn omega_to_mu(omega: Float) -> Float {
    (1.0 / omega - 0.5) * CS_2 * DELTA_T
}

/// The second order expansion shared by the incompressible equilibria.
pub(crate) fn equilibrium_bracket(i: usize, velocity: [Float; 2]) -> Float {
    let u_dot_c = velocity_set::c_dot(i, velocity);
    let u_dot_u = velocity[0] * velocity[0] + velocity[1] * velocity[1];
    1.0 + u_dot_c * CS_2_INV + 0.5 * u_dot_c * u_dot_c * CS_4_INV - 0.5 * u_dot_u * CS_2_INV
}

pub(crate) fn bgk_collision(f: &mut [Float], f_eq: &[Float; Q], omega: Float) {
    let omega_prime = 1.0 - omega;
    f.iter_mut()
        .zip(f_eq.iter())
        .for_each(|(f_i, f_eq_i)| *f_i = omega * f_eq_i + omega_prime * *f_i);
}

/// Rate of strain estimated from the non-equilibrium populations,
/// `S = -omega / (2 rho cs^2 dt) sum_i c_i c_i f_neq_i`.
pub fn strain_rate_tensor(f_neq: &[Float; Q], density: Float, omega: Float) -> Matrix2<Float> {
    let pi_neq = (0..Q).fold(Matrix2::zeros(), |acc: Matrix2<Float>, i| {
        let c_x = C[i][0] as Float;
        let c_y = C[i][1] as Float;
        acc + Matrix2::new(c_x * c_x, c_x * c_y, c_y * c_x, c_y * c_y) * f_neq[i]
    });
    pi_neq * (-omega / (2.0 * density * CS_2 * DELTA_T))
}

/// Second invariant based magnitude, `sqrt(2 S:S)`.
pub fn strain_rate_magnitude(f_neq: &[Float; Q], density: Float, omega: Float) -> Float {
    let s = strain_rate_tensor(f_neq, density, omega);
    (2.0 * s.component_mul(&s).sum()).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mu_omega_round_trip() {
        let mu = 0.05;
        let omega = mu_to_omega(mu);
        assert!((omega_to_mu(omega) - mu).abs() < 1e-12);
        assert!((mu_to_omega(1.0 / 6.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_bgk_collision_with_unit_omega_returns_equilibrium() {
        let mut f = [0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8, 0.9];
        let f_eq = W;

        bgk_collision(&mut f, &f_eq, 1.0);

        f.iter()
            .zip(W.iter())
            .for_each(|(a, b)| assert!((a - b).abs() < 1e-12));
    }

    #[test]
    fn test_strain_rate_of_simple_shear() {
        // Non-equilibrium part of a simple shear du_x/dy = g:
        // f_neq_i = -w_i rho / (cs^2 omega) c_ix c_iy g.
        let density = 1.0;
        let omega = 1.2;
        let g = 1e-3;
        let mut f_neq = [0.0; Q];
        (0..Q).for_each(|i| {
            let c_xy = (C[i][0] * C[i][1]) as Float;
            f_neq[i] = -W[i] * density * CS_2_INV / omega * c_xy * g;
        });

        let s = strain_rate_tensor(&f_neq, density, omega);

        assert!((s[(0, 1)] - 0.5 * g).abs() < 1e-12);
        assert!((s[(1, 0)] - 0.5 * g).abs() < 1e-12);
        assert!(s[(0, 0)].abs() < 1e-12);
        assert!((strain_rate_magnitude(&f_neq, density, omega) - g).abs() < 1e-12);
    }

    #[test]
    fn test_equilibrium_bracket_at_rest() {
        (0..Q).for_each(|i| assert!((equilibrium_bracket(i, [0.0, 0.0]) - 1.0).abs() < 1e-12));
    }
}
