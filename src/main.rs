use colored::*;
use lbflow2d::cli::{self, Config, Mode};
use lbflow2d::prelude::*;
use lbflow2d::velocity_set::d2q9::{C, Q, Q_BAR, W};
use lbflow2d::{io, timer};

fn main() {
    if let Err(e) = run() {
        eprintln!("{} {e}", "ERROR:".red().bold());
        std::process::exit(1);
    }
}

fn run() -> cli::CliResult<()> {
    let matches = cli::get_args()?;
    let config = cli::parse_matches(&matches)?;
    cli::init_global_pool(config.get_number_of_threads(), config.core_affinity)?;
    match config.mode {
        Mode::Run => run_channel(&config),
        Mode::Info => {
            print_info();
            Ok(())
        }
    }
}

fn run_channel(config: &Config) -> cli::CliResult<()> {
    println!(
        "Running on {} thread(s)\n",
        config.get_number_of_threads().to_string().yellow().bold()
    );
    let force = config.get_force();
    let params = Parameters {
        ni: config.ni,
        nj: config.nj,
        reference_viscosity: config.viscosity,
        equilibrium: config.get_equilibrium(),
        constitutive: Constitutive::Newtonian {
            mu: config.viscosity,
        },
        force: Some(force),
        bounds_policy: config.bounds_policy,
        ..Default::default()
    };
    let mut simulation = Simulation::new(params);
    setup::periodic_channel(&mut simulation)?;
    simulation.add_callback(Box::new(DisplayTimeStep::new(config.display)));
    if config.display > 0 {
        simulation.add_callback(Box::new(PostFunction::new(
            "mass".to_string(),
            config.display,
            momentum::post::compute_total_mass,
        )));
        simulation.add_callback(Box::new(PostFunction::new(
            "speed".to_string(),
            config.display,
            momentum::post::compute_max_speed,
        )));
    } else {
        let total = config.steps;
        simulation.add_callback(Box::new(move |sim: &Simulation| {
            io::progress_bar(sim.get_step(), total)
        }));
    }

    let (completed, elapsed) = timer::profile(|| simulation.simulate(config.steps));
    io::report_elapsed("Elapsed time", elapsed);
    if completed > 0 {
        let mlups = (config.ni * config.nj * completed) as Float / elapsed.as_secs_f64() / 1e6;
        println!("Performance: {} MLUPS\n", format!("{mlups:.2}").yellow().bold());
    }
    if completed < config.steps {
        return Err(format!("only {completed} of {} steps completed", config.steps).into());
    }

    let i_mid = config.ni / 2;
    let map = simulation.multiscale_map();
    let computed = (0..config.nj)
        .map(|j| map.get_velocity(i_mid, j)[0])
        .collect::<Vec<Float>>();
    let analytic = setup::poiseuille_profile(config.nj, config.viscosity, force.get_force()[0]);
    println!("Velocity profile at column {}\n", i_mid.to_string().yellow().bold());
    let max_error = io::print_profile(&computed, &analytic);
    println!(
        "Maximum relative error away from the walls: {}\n",
        format!("{max_error:.4} %").yellow().bold()
    );
    Ok(())
}

fn print_info() {
    println!("{}\n", "D2Q9 lattice".bold());
    println!("{:>3} {:>8} {:>12} {:>4}", "k", "c", "w", "bar");
    for k in 0..Q {
        let c = format!("({}, {})", C[k][0], C[k][1]);
        println!("{k:>3} {c:>8} {:>12.8} {:>4}", W[k], Q_BAR[k]);
    }
    println!();
    println!(
        "Largest node behavior: {} bytes\n",
        momentum::max_node_behavior_size().to_string().yellow().bold()
    );
}
