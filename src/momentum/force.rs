use crate::prelude_crate::*;

/// Constant body force and the way it enters collision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Force {
    SukopThorne { force: [Float; 2] },
    Guo { force: [Float; 2] },
}

impl Force {
    pub fn sukop_thorne(force: [Float; 2]) -> Self {
        Force::SukopThorne { force }
    }

    pub fn guo(force: [Float; 2]) -> Self {
        Force::Guo { force }
    }

    pub fn get_force(&self) -> [Float; 2] {
        match self {
            Force::SukopThorne { force } | Force::Guo { force } => *force,
        }
    }

    /// Velocity handed to the equilibrium.
    ///
    /// # Examples
    /// ```
    /// # use lbflow2d::prelude::*;
    /// let guo = Force::guo([1e-3, 0.0]);
    /// assert_eq!(guo.u_trans([0.1, 0.0]), [0.1 + 5e-4, 0.0]);
    ///
    /// let sukop_thorne = Force::sukop_thorne([1e-3, 0.0]);
    /// assert_eq!(sukop_thorne.u_trans([0.1, 0.0]), [0.1, 0.0]);
    /// ```
    pub fn u_trans(&self, velocity: [Float; 2]) -> [Float; 2] {
        match self {
            Force::SukopThorne { .. } => velocity,
            Force::Guo { force } => [
                velocity[0] + 0.5 * DELTA_T * force[0],
                velocity[1] + 0.5 * DELTA_T * force[1],
            ],
        }
    }

    /// Source added to population `i` after relaxation.
    pub fn f_col(&self, omega: Float, velocity: [Float; 2], i: usize) -> Float {
        match self {
            Force::SukopThorne { force } => {
                W[i] * DELTA_T * CS_2_INV * velocity_set::c_dot(i, *force)
            }
            Force::Guo { force } => {
                let u_dot_c = velocity_set::c_dot(i, velocity);
                let term = |x: usize| {
                    let c_x = C[i][x] as Float;
                    ((c_x - velocity[x]) * CS_2_INV + u_dot_c * CS_4_INV * c_x) * force[x]
                };
                (1.0 - 0.5 * omega) * W[i] * (term(0) + term(1))
            }
        }
    }
}
