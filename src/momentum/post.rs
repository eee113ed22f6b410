use crate::prelude_crate::*;
use crate::simulation::Simulation;
use colored::*;
use rayon::prelude::*;

/// Hook run after every time step, in registration order.
pub trait Callback {
    fn call(&mut self, simulation: &Simulation);
}

impl<F> Callback for F
where
    F: FnMut(&Simulation),
{
    fn call(&mut self, simulation: &Simulation) {
        self(simulation)
    }
}

pub type PostComputation = fn(&Simulation) -> Vec<PostResult>;

#[derive(Debug, Clone, PartialEq)]
pub struct PostResult {
    pub name: String,
    pub label: String,
    pub value: Float,
    pub unit: Option<String>,
}

impl PostResult {
    pub fn new(name: String, label: String, value: Float, unit: Option<String>) -> Self {
        Self {
            name,
            label,
            value,
            unit,
        }
    }
}

/// Prints the results of `function` every `interval` steps.
#[derive(Debug)]
pub struct PostFunction {
    pub name: String,
    pub interval: usize,
    pub function: PostComputation,
}

impl PostFunction {
    pub fn new(name: String, interval: usize, function: PostComputation) -> Self {
        Self {
            name,
            interval,
            function,
        }
    }
}

impl Callback for PostFunction {
    fn call(&mut self, simulation: &Simulation) {
        let step = simulation.get_step() + 1;
        if self.interval == 0 || step % self.interval != 0 {
            return;
        }
        (self.function)(simulation).iter().for_each(|result| {
            let unit = result.unit.as_deref().unwrap_or("");
            println!(
                "[{}] {}: {:.8e} {unit}",
                self.name.yellow(),
                result.label.bold(),
                result.value
            );
        });
    }
}

#[derive(Debug, Clone, Copy)]
pub struct DisplayTimeStep {
    pub interval: usize,
}

impl DisplayTimeStep {
    pub fn new(interval: usize) -> Self {
        Self { interval }
    }
}

impl Callback for DisplayTimeStep {
    fn call(&mut self, simulation: &Simulation) {
        let step = simulation.get_step() + 1;
        if self.interval != 0 && step % self.interval == 0 {
            println!("Time step: {}", step.to_string().green().bold());
        }
    }
}

fn active_nodes(simulation: &Simulation) -> Vec<usize> {
    let lattice = simulation.get_lattice();
    let (ni, nj) = lattice.get_n();
    (0..ni * nj)
        .into_par_iter()
        .filter(|&n| !lattice.get_node_behavior_at(n).is_inactive())
        .collect()
}

pub fn compute_mean_density(simulation: &Simulation) -> Vec<PostResult> {
    let nodes = active_nodes(simulation);
    let density = simulation.multiscale_map().get_densities();
    let density_sum = nodes.par_iter().map(|&n| density[n]).sum::<Float>();
    let density_mean = density_sum / nodes.len().max(1) as Float;
    vec![PostResult::new(
        "mean_density".to_string(),
        "mean density".to_string(),
        density_mean,
        None,
    )]
}

pub fn compute_total_mass(simulation: &Simulation) -> Vec<PostResult> {
    vec![PostResult::new(
        "total_mass".to_string(),
        "total mass".to_string(),
        simulation.get_lattice().compute_total_mass(),
        None,
    )]
}

pub fn compute_max_speed(simulation: &Simulation) -> Vec<PostResult> {
    let nodes = active_nodes(simulation);
    let velocity = simulation.multiscale_map().get_velocities();
    let max_speed = nodes
        .par_iter()
        .map(|&n| (velocity[n][0] * velocity[n][0] + velocity[n][1] * velocity[n][1]).sqrt())
        .reduce(|| 0.0, Float::max);
    vec![PostResult::new(
        "max_speed".to_string(),
        "max speed".to_string(),
        max_speed,
        None,
    )]
}
