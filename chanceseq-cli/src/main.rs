mod host;

use std::fs::File;
use std::path::PathBuf;

use chanceseq_core::{config::Config, persistence, registry};
use chanceseq_engine::Lcg;

use host::{apply_mode_switches, describe, describe_modes, fill_demo_pattern, HeadlessHost};

fn init_logging(verbose: bool) {
    use simplelog::*;

    let log_level = if verbose { LevelFilter::Debug } else { LevelFilter::Warn };

    let log_path = dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("chanceseq")
        .join("chanceseq.log");

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let log_file = match File::create(&log_path).or_else(|_| File::create("/tmp/chanceseq.log")) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("chanceseq: cannot create log file: {}", e);
            return;
        }
    };

    if WriteLogger::init(log_level, simplelog::Config::default(), log_file).is_err() {
        eprintln!("chanceseq: logger already initialized");
        return;
    }

    log::info!("chanceseq starting (log level: {:?})", log_level);
}

fn arg_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .map(String::as_str)
}

fn usage() {
    println!("usage: chanceseq [--model SLUG] [--ticks N] [--seed N] [--clock PERIOD]");
    println!("                 [--modes 0,1,2,..] [--state PATH] [--demo] [--list] [--verbose]");
}

fn main() -> std::io::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.iter().any(|a| a == "--help" || a == "-h") {
        usage();
        return Ok(());
    }
    let verbose = args.iter().any(|a| a == "--verbose" || a == "-v");
    init_logging(verbose);

    if args.iter().any(|a| a == "--list") {
        for model in registry::models() {
            println!(
                "{:<12} {} ({} rows x {} steps)",
                model.slug,
                model.name,
                model.layout.row_count(),
                model.layout.step_capacity()
            );
        }
        return Ok(());
    }

    let config = Config::load();
    let slug = arg_value(&args, "--model").unwrap_or(config.model());
    let Some(module) = registry::create(slug) else {
        eprintln!("chanceseq: unknown model '{}' (try --list)", slug);
        std::process::exit(2);
    };

    let seed = arg_value(&args, "--seed")
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| config.seed());
    let sample_rate = config.sample_rate();
    // Default: four seconds of audio
    let ticks: u64 = arg_value(&args, "--ticks")
        .and_then(|s| s.parse().ok())
        .unwrap_or(u64::from(sample_rate) * 4);
    let ext_clock = arg_value(&args, "--clock").and_then(|s| s.parse().ok());
    let state_path = arg_value(&args, "--state").map(PathBuf::from);

    let mut host = HeadlessHost::new(
        module,
        Lcg::new(seed),
        sample_rate as f32,
        config.tick_budget_us(),
        ext_clock,
    );
    config.apply_defaults(&mut host.module_mut().config);
    if args.iter().any(|a| a == "--demo") {
        fill_demo_pattern(&mut host.module_mut().config);
    }
    if let Some(switches) = arg_value(&args, "--modes") {
        let config = &mut host.module_mut().config;
        let set = apply_mode_switches(config, switches);
        log::debug!(target: "host", "set {} step modes from '{}'", set, switches);
        println!("modes: {}", describe_modes(config, config.step_count(0.0)));
    }

    if let Some(path) = state_path.as_deref() {
        if path.exists() {
            if let Err(e) = persistence::load_from_path(&mut host.module_mut().engine, path) {
                eprintln!("chanceseq: could not load {}: {}", path.display(), e);
            }
        }
    }

    log::info!(
        target: "host",
        "running {} for {} ticks at {} Hz (seed {})",
        host.module().model.slug,
        ticks,
        sample_rate,
        seed
    );

    let summary = host.run(ticks, |tick, frame| println!("{}", describe(tick, frame)));

    println!(
        "ticks: {}  avg {}us  max {}us  overruns {}",
        summary.ticks, summary.avg_us, summary.max_us, summary.overruns
    );
    println!(
        "triggers: {}  step changes {}  draws {}",
        summary.triggers, summary.step_changes, summary.draws
    );
    if summary.overruns > 0 {
        log::warn!(target: "host", "{} ticks exceeded the budget", summary.overruns);
    }
    if summary.draw_mismatches > 0 {
        log::error!(
            target: "host",
            "{} ticks drew a different number of times than they triggered",
            summary.draw_mismatches
        );
    }

    if let Some(path) = state_path.as_deref() {
        if let Err(e) = persistence::save_to_path(&host.module().engine, path) {
            eprintln!("chanceseq: could not save {}: {}", path.display(), e);
            std::process::exit(1);
        }
    }

    Ok(())
}
