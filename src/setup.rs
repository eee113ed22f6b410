use crate::momentum::bc::{North, South};
use crate::momentum::node::{Active, Periodic, PeriodicRelay, Wall};
use crate::prelude_crate::*;
use crate::simulation::Simulation;
use crate::velocity_set::d2q9::{Q_EAST, Q_WEST};
use colored::*;

/// Channel periodic along `i` with bounce-back walls on rows `0` and `nj - 1`.
///
/// # Examples
/// ```
/// # use lbflow2d::prelude::*;
/// let mut simulation = Simulation::new(Parameters::test_default());
/// setup::periodic_channel(&mut simulation).unwrap();
///
/// let lattice = simulation.get_lattice();
/// assert_eq!(lattice.get_node_behavior(4, 0), NodeBehavior::Wall(Orientation::North));
/// assert_eq!(lattice.get_node_behavior(4, 9), NodeBehavior::Wall(Orientation::South));
/// assert_eq!(lattice.get_node_behavior(4, 4), NodeBehavior::Active);
/// ```
pub fn periodic_channel(simulation: &mut Simulation) -> LbResult<()> {
    let (ni, nj) = simulation.get_lattice().get_n();
    println!(
        "Setting up a periodic channel with walls at rows {} and {}...\n",
        "0".yellow().bold(),
        (nj - 1).to_string().yellow().bold()
    );
    for i in 0..ni {
        for j in 0..nj {
            let wall = match j {
                0 => Some(North),
                _ if j == nj - 1 => Some(South),
                _ => None,
            };
            let behavior = match (i, wall) {
                (0, _) => {
                    let relay = PeriodicRelay::new((ni - 1, j), &Q_WEST);
                    Periodic(wall.map_or(relay, |orientation| relay.with_wall(orientation)))
                }
                (_, _) if i == ni - 1 => {
                    let relay = PeriodicRelay::new((0, j), &Q_EAST);
                    Periodic(wall.map_or(relay, |orientation| relay.with_wall(orientation)))
                }
                (_, Some(orientation)) => Wall(orientation),
                (_, None) => Active,
            };
            simulation.set_node_behavior(i, j, behavior)?;
        }
    }
    Ok(())
}

/// Every edge node relays the directions that leave the grid to the opposite edge.
pub fn fully_periodic(simulation: &mut Simulation) -> LbResult<()> {
    let (ni, nj) = simulation.get_lattice().get_n();
    println!("Setting up a fully periodic domain...\n");
    let opposite = |x: usize, n: usize| {
        if x == 0 {
            n - 1
        } else if x == n - 1 {
            0
        } else {
            x
        }
    };
    for i in 0..ni {
        for j in 0..nj {
            let leaving = (1..Q)
                .filter(|&k| {
                    let target_i = i as isize + C[k][0] as isize;
                    let target_j = j as isize + C[k][1] as isize;
                    target_i < 0 || target_j < 0 || target_i >= ni as isize || target_j >= nj as isize
                })
                .collect::<Vec<usize>>();
            let behavior = if leaving.is_empty() {
                Active
            } else {
                Periodic(PeriodicRelay::new((opposite(i, ni), opposite(j, nj)), &leaving))
            };
            simulation.set_node_behavior(i, j, behavior)?;
        }
    }
    Ok(())
}

/// Steady profile of a body-force driven channel built by [`periodic_channel`]. The no-slip
/// planes sit half a link outside the wall rows, so the half-width is `nj / 2`.
///
/// # Examples
/// ```
/// # use lbflow2d::setup::poiseuille_profile;
/// let profile = poiseuille_profile(12, 1.0 / 6.0, -1.102e-3);
///
/// assert_eq!(profile.len(), 12);
/// assert!((profile[5] - profile[6]).abs() < 1e-15);
/// assert!(profile[5] < profile[0]);
/// ```
pub fn poiseuille_profile(nj: usize, mu: Float, force_x: Float) -> Vec<Float> {
    let h = nj as Float / 2.0;
    let center = (nj as Float - 1.0) / 2.0;
    (0..nj)
        .map(|j| {
            let x = j as Float - center;
            force_x / (2.0 * mu) * (h * h - x * x)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::momentum::NodeBehavior;
    use crate::simulation::Parameters;

    #[test]
    fn test_periodic_channel_corners() {
        let mut simulation = Simulation::new(Parameters {
            ni: 8,
            nj: 5,
            ..Parameters::test_default()
        });

        periodic_channel(&mut simulation).unwrap();

        let lattice = simulation.get_lattice();
        assert_eq!(
            lattice.get_node_behavior(0, 0),
            Periodic(PeriodicRelay::new((7, 0), &Q_WEST).with_wall(North))
        );
        assert_eq!(
            lattice.get_node_behavior(7, 4),
            Periodic(PeriodicRelay::new((0, 4), &Q_EAST).with_wall(South))
        );
        assert_eq!(
            lattice.get_node_behavior(0, 2),
            Periodic(PeriodicRelay::new((7, 2), &Q_WEST))
        );
        assert_eq!(lattice.get_pool().get_remaining(), 0);
    }

    #[test]
    fn test_fully_periodic_layout() {
        let mut simulation = Simulation::new(Parameters {
            ni: 5,
            nj: 4,
            ..Parameters::test_default()
        });

        fully_periodic(&mut simulation).unwrap();

        let lattice = simulation.get_lattice();
        assert_eq!(
            lattice.get_node_behavior(0, 0),
            Periodic(PeriodicRelay::new((4, 3), &[3, 4, 6, 7, 8]))
        );
        assert_eq!(
            lattice.get_node_behavior(2, 3),
            Periodic(PeriodicRelay::new((2, 0), &[2, 5, 6]))
        );
        assert_eq!(lattice.get_node_behavior(2, 2), NodeBehavior::Active);
    }

    #[test]
    fn test_setup_twice_is_rejected() {
        let mut simulation = Simulation::new(Parameters::test_default());
        periodic_channel(&mut simulation).unwrap();

        assert_eq!(
            fully_periodic(&mut simulation),
            Err(LbError::BehaviorAlreadyAssigned { i: 0, j: 0 })
        );
    }

    #[test]
    fn test_poiseuille_profile_peak() {
        let mu = 0.1;
        let force_x = 2e-4;
        let profile = poiseuille_profile(11, mu, force_x);

        assert!((profile[5] - force_x / (2.0 * mu) * 5.5 * 5.5).abs() < 1e-15);
        assert!((profile[0] - profile[10]).abs() < 1e-15);
    }
}
