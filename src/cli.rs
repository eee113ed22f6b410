use crate::momentum::{BoundsPolicy, Equilibrium, Force};
use crate::prelude_crate::*;
use clap::{Arg, Command};
use core_affinity::{get_core_ids, set_for_current};
use std::num::{NonZero, NonZeroUsize};

pub type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForceModel {
    SukopThorne,
    Guo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EquilibriumModel {
    Incompressible,
    HeLuo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Run,
    Info,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub mode: Mode,
    pub number_of_threads: NonZeroUsize,
    pub core_affinity: bool,
    pub steps: usize,
    pub ni: usize,
    pub nj: usize,
    pub viscosity: Float,
    pub force: Float,
    pub force_model: ForceModel,
    pub equilibrium: EquilibriumModel,
    pub display: usize,
    pub bounds_policy: BoundsPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            mode: Mode::Run,
            number_of_threads: NonZero::<usize>::MIN,
            core_affinity: false,
            steps: 5000,
            ni: 40,
            nj: 12,
            viscosity: 1.0 / 6.0,
            force: -1.102e-3,
            force_model: ForceModel::SukopThorne,
            equilibrium: EquilibriumModel::Incompressible,
            display: 1000,
            bounds_policy: BoundsPolicy::Checked,
        }
    }
}

impl Config {
    pub fn get_number_of_threads(&self) -> usize {
        usize::from(self.number_of_threads)
    }

    pub fn get_force(&self) -> Force {
        let force = [self.force, 0.0];
        match self.force_model {
            ForceModel::SukopThorne => Force::sukop_thorne(force),
            ForceModel::Guo => Force::guo(force),
        }
    }

    pub fn get_equilibrium(&self) -> Equilibrium {
        match self.equilibrium {
            EquilibriumModel::Incompressible => Equilibrium::Incompressible,
            EquilibriumModel::HeLuo => Equilibrium::HeLuo {
                reference_density: LATTICE_DENSITY,
            },
        }
    }
}

pub fn build_command() -> Command {
    clap::command!()
        .propagate_version(true)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("number_of_threads")
                .short('n')
                .long("num-threads")
                .value_name("NTHREADS")
                .help("The number of threads used (min = 1)")
                .value_parser(clap::value_parser!(NonZeroUsize))
                .default_value("1")
                .global(true),
        )
        .arg(
            Arg::new("core_affinity")
                .long("affinity")
                .help("Set the core affinity")
                .action(clap::ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("run")
                .about("Run the body-force driven channel flow")
                .arg(
                    Arg::new("steps")
                        .short('s')
                        .long("steps")
                        .value_name("STEPS")
                        .help("The number of time steps")
                        .value_parser(clap::value_parser!(usize))
                        .default_value("5000"),
                )
                .arg(
                    Arg::new("ni")
                        .long("ni")
                        .value_name("NI")
                        .help("The number of nodes along the channel (min = 3)")
                        .value_parser(clap::value_parser!(usize))
                        .default_value("40"),
                )
                .arg(
                    Arg::new("nj")
                        .long("nj")
                        .value_name("NJ")
                        .help("The number of nodes across the channel (min = 3)")
                        .value_parser(clap::value_parser!(usize))
                        .default_value("12"),
                )
                .arg(
                    Arg::new("viscosity")
                        .long("viscosity")
                        .value_name("MU")
                        .help("The kinematic viscosity in lattice units")
                        .value_parser(clap::value_parser!(Float))
                        .default_value("0.16666666666666666"),
                )
                .arg(
                    Arg::new("force")
                        .short('f')
                        .long("force")
                        .value_name("FX")
                        .help("The body force along the channel")
                        .value_parser(clap::value_parser!(Float))
                        .allow_negative_numbers(true)
                        .default_value("-1.102e-3"),
                )
                .arg(
                    Arg::new("force_model")
                        .long("force-model")
                        .value_name("MODEL")
                        .help("The body force model")
                        .value_parser(["sukop-thorne", "guo"])
                        .default_value("sukop-thorne"),
                )
                .arg(
                    Arg::new("equilibrium")
                        .long("equilibrium")
                        .value_name("MODEL")
                        .help("The equilibrium distribution")
                        .value_parser(["incompressible", "he-luo"])
                        .default_value("incompressible"),
                )
                .arg(
                    Arg::new("display")
                        .short('d')
                        .long("display")
                        .value_name("INTERVAL")
                        .help("The interval between time step reports (0 disables them)")
                        .value_parser(clap::value_parser!(usize))
                        .default_value("1000"),
                )
                .arg(
                    Arg::new("checked")
                        .long("checked")
                        .help("Return an error when streaming leaves the grid (default)")
                        .action(clap::ArgAction::SetTrue)
                        .conflicts_with("unchecked"),
                )
                .arg(
                    Arg::new("unchecked")
                        .long("unchecked")
                        .help("Only debug-assert that streaming stays inside the grid")
                        .action(clap::ArgAction::SetTrue),
                ),
        )
        .subcommand(Command::new("info").about("Print the D2Q9 lattice and node sizes"))
}

pub fn get_args() -> CliResult<clap::ArgMatches> {
    Ok(build_command().get_matches())
}

pub fn parse_matches(matches: &clap::ArgMatches) -> CliResult<Config> {
    let number_of_threads = matches
        .get_one::<NonZeroUsize>("number_of_threads")
        .copied()
        .unwrap_or(NonZero::<usize>::MIN);
    let core_affinity = matches.get_flag("core_affinity");
    match matches.subcommand() {
        Some(("run", sub_m)) => {
            let defaults = Config::default();
            let force_model = match sub_m.get_one::<String>("force_model").map(String::as_str) {
                Some("guo") => ForceModel::Guo,
                _ => ForceModel::SukopThorne,
            };
            let equilibrium = match sub_m.get_one::<String>("equilibrium").map(String::as_str) {
                Some("he-luo") => EquilibriumModel::HeLuo,
                _ => EquilibriumModel::Incompressible,
            };
            let bounds_policy = if sub_m.get_flag("unchecked") {
                BoundsPolicy::Assert
            } else {
                BoundsPolicy::Checked
            };
            let viscosity = sub_m
                .get_one::<Float>("viscosity")
                .copied()
                .unwrap_or(defaults.viscosity);
            let ni = sub_m.get_one::<usize>("ni").copied().unwrap_or(defaults.ni);
            let nj = sub_m.get_one::<usize>("nj").copied().unwrap_or(defaults.nj);
            if ni < 3 || nj < 3 {
                return Err(format!("the grid must be at least 3x3, got {ni}x{nj}").into());
            }
            if viscosity <= 0.0 {
                return Err(format!("the viscosity must be positive, got {viscosity}").into());
            }
            let cfg = Config {
                mode: Mode::Run,
                number_of_threads,
                core_affinity,
                steps: sub_m.get_one::<usize>("steps").copied().unwrap_or(defaults.steps),
                ni,
                nj,
                viscosity,
                force: sub_m.get_one::<Float>("force").copied().unwrap_or(defaults.force),
                force_model,
                equilibrium,
                display: sub_m
                    .get_one::<usize>("display")
                    .copied()
                    .unwrap_or(defaults.display),
                bounds_policy,
            };
            Ok(cfg)
        }
        Some(("info", _)) => Ok(Config {
            mode: Mode::Info,
            number_of_threads,
            core_affinity,
            ..Default::default()
        }),
        _ => Err("a subcommand is required".into()),
    }
}

pub fn init_global_pool(num_threads: usize, pin_all_cores: bool) -> CliResult<()> {
    if pin_all_cores {
        let cores = get_core_ids().ok_or("could not list the system cores")?;
        if cores.is_empty() {
            return Err("no cores available for pinning".into());
        }
        rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .start_handler(move |idx| {
                let core = cores[idx % cores.len()];
                let _ = set_for_current(core);
            })
            .build_global()?;
    } else {
        rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()?;
    };
    Ok(())
}
