use burst_scheduler::{
    Algorithm, Burst, ProcessSpec, Scheduler, SchedulerConfig, TimelinePrinter, Workload,
};
use crossterm::{
    execute,
    terminal::{Clear, ClearType},
};
use log::error;
use std::{env, error::Error, io, path::PathBuf, process::ExitCode};

const USAGE: &str = "usage: burst-scheduler [WORKLOAD.json] [--algorithm TAG] [--cpus N] [--ios N] \
                     [--json PATH] [--csv PATH] [--quiet]";

#[derive(Debug, Default)]
struct Options {
    workload: Option<PathBuf>,
    algorithm: Option<Algorithm>,
    cpus: Option<usize>,
    ios: Option<usize>,
    json: Option<PathBuf>,
    csv: Option<PathBuf>,
    quiet: bool,
}

fn parse_args() -> Result<Options, String> {
    let mut options = Options::default();
    let mut args = env::args().skip(1);

    while let Some(arg) = args.next() {
        let mut value = |name: &str| {
            args.next()
                .ok_or_else(|| format!("{name} expects a value\n{USAGE}"))
        };
        match arg.as_str() {
            "--algorithm" | "-a" => {
                options.algorithm = Some(Algorithm::from_tag(&value("--algorithm")?))
            }
            "--cpus" => {
                let cpus = value("--cpus")?;
                options.cpus = Some(cpus.parse().map_err(|e| format!("--cpus: {e}"))?)
            }
            "--ios" => {
                let ios = value("--ios")?;
                options.ios = Some(ios.parse().map_err(|e| format!("--ios: {e}"))?)
            }
            "--json" => options.json = Some(value("--json")?.into()),
            "--csv" => options.csv = Some(value("--csv")?.into()),
            "--quiet" | "-q" => options.quiet = true,
            "--help" | "-h" => return Err(USAGE.to_owned()),
            flag if flag.starts_with('-') => return Err(format!("unknown flag {flag}\n{USAGE}")),
            path => options.workload = Some(path.into()),
        }
    }
    Ok(options)
}

fn demo_workload() -> Workload {
    let spec = |pid, arrival_time, priority, bursts: Vec<Burst>| ProcessSpec {
        pid,
        arrival_time,
        priority,
        quantum: 3,
        bursts,
    };

    Workload {
        config: SchedulerConfig::with_algorithm(Algorithm::RoundRobin),
        processes: vec![
            spec(1, 0, 2, vec![Burst::Cpu(5), Burst::Io(3), Burst::Cpu(2)]),
            spec(2, 0, 1, vec![Burst::Cpu(3)]),
            spec(3, 2, 0, vec![Burst::Cpu(2), Burst::Io(4), Burst::Cpu(4)]),
            spec(4, 4, 3, vec![Burst::Cpu(6), Burst::Io(1), Burst::Cpu(1)]),
        ],
    }
}

fn run(options: Options) -> Result<(), Box<dyn Error>> {
    let mut workload = match &options.workload {
        Some(path) => Workload::from_file(path)?,
        None => demo_workload(),
    };
    if let Some(algorithm) = options.algorithm {
        workload.config.algorithm = algorithm;
    }
    if let Some(cpus) = options.cpus {
        workload.config.num_cpus = cpus;
    }
    if let Some(ios) = options.ios {
        workload.config.num_io_devices = ios;
    }

    let Workload { config, processes } = workload;
    let mut scheduler = Scheduler::new(config);
    if !options.quiet {
        execute!(io::stdout(), Clear(ClearType::All))?;
        scheduler.set_observer(TimelinePrinter::stdout());
    }
    for spec in processes {
        scheduler.add_process(spec.into())?;
    }
    scheduler.run()?;
    scheduler.clear_observer();

    if !options.quiet {
        TimelinePrinter::stdout().print_stats(
            scheduler.policy_name(),
            &scheduler.stats(),
            &scheduler.summary(),
        )?;
    }
    if let Some(path) = &options.json {
        scheduler.export_json(path)?;
    }
    if let Some(path) = &options.csv {
        scheduler.export_csv(path)?;
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let options = match parse_args() {
        Ok(options) => options,
        Err(message) => {
            eprintln!("{message}");
            return ExitCode::from(2);
        }
    };

    match run(options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}
