use crate::prelude_crate::*;

/// Law giving the kinematic viscosity of a node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Constitutive {
    Newtonian { mu: Float },
    Bingham(Bingham),
}

impl Constitutive {
    /// Viscosity from the non-equilibrium populations. `omega` is the relaxation frequency
    /// the node used on the previous step.
    pub fn mu(&self, f_neq: &[Float; Q], density: Float, omega: Float) -> Float {
        match self {
            Constitutive::Newtonian { mu } => *mu,
            Constitutive::Bingham(bingham) => bingham.mu(f_neq, density, omega),
        }
    }
}

/// Regularised Bingham plastic (Papanastasiou).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bingham {
    mu_p: Float,
    tau_y: Float,
    m: Float,
    gamma_min: Float,
}

impl Bingham {
    pub fn new(mu_p: Float, tau_y: Float, m: Float) -> Self {
        Bingham {
            mu_p,
            tau_y,
            m,
            gamma_min: Float::EPSILON,
        }
    }

    pub fn with_gamma_min(self, gamma_min: Float) -> Self {
        Bingham { gamma_min, ..self }
    }

    pub fn get_plastic_viscosity(&self) -> Float {
        self.mu_p
    }

    pub fn get_yield_stress(&self) -> Float {
        self.tau_y
    }

    pub fn get_regularization_exponent(&self) -> Float {
        self.m
    }

    pub fn get_gamma_min(&self) -> Float {
        self.gamma_min
    }

    /// `mu_p + tau_y (1 - exp(-m gamma)) / (rho gamma)` with `gamma >= gamma_min`.
    pub fn mu(&self, f_neq: &[Float; Q], density: Float, omega: Float) -> Float {
        let gamma = kernel::strain_rate_magnitude(f_neq, density, omega).max(self.gamma_min);
        self.mu_p - self.tau_y * (-self.m * gamma).exp_m1() / (density * gamma)
    }
}
