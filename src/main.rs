use std::{
    fs,
    io::{self, Read},
    path::{Path, PathBuf},
    time::Instant,
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::{error, info};

use sweet_board::{
    boot::on_boot_completed,
    config::{CONFIG_PATH, DC_DIMMING_NODE, MEMINFO},
    mem::read_mem_total_bytes,
    overrides::vendor_load_properties,
    props::{DryRunStore, SetpropStore},
    replay::{parse_trace, replay},
    user_config::load_or_init,
    LoggingBackend, PowerHintRouter,
};

#[derive(Parser)]
#[command(name = "sweet-board", about = "sweet board property overrides and power hint tools")]
struct Cli {
    /// Board config (created with defaults when missing)
    #[arg(long, default_value = CONFIG_PATH)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Apply build/product property overrides
    Init {
        /// Print the resulting properties instead of calling setprop
        #[arg(long)]
        dry_run: bool,
    },
    /// Run the boot-completed hook
    BootCompleted {
        #[arg(long, default_value = DC_DIMMING_NODE)]
        node: PathBuf,
    },
    /// Replay a hint trace through the router with a logging backend
    Replay {
        /// Trace file; stdin when omitted
        file: Option<PathBuf>,
    },
}

fn init_logging() {
    #[cfg(target_os = "android")]
    android_logger::init_once(
        android_logger::Config::default()
            .with_tag(sweet_board::config::LOG_TAG)
            .with_max_level(log::LevelFilter::Info),
    );

    #[cfg(not(target_os = "android"))]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}

fn run_init(dry_run: bool) {
    let total_ram = read_mem_total_bytes(Path::new(MEMINFO));

    if dry_run {
        let mut store = DryRunStore::new(SetpropStore);
        vendor_load_properties(&mut store, total_ram);
        for (k, v) in store.writes() {
            println!("{}={}", k, v);
        }
    } else {
        vendor_load_properties(&mut SetpropStore, total_ram);
    }
}

fn run_replay(config: &Path, file: Option<PathBuf>) -> Result<()> {
    let text = match &file {
        Some(p) => fs::read_to_string(p).with_context(|| format!("reading {}", p.display()))?,
        None => {
            let mut s = String::new();
            io::stdin().read_to_string(&mut s).context("reading stdin")?;
            s
        }
    };
    let events = parse_trace(&text)?;

    let cfg = load_or_init(config).context("loading board config")?;
    let router = PowerHintRouter::new(LoggingBackend::new(), cfg.power);

    for (ev, status) in replay(&router, &events, Instant::now()) {
        println!("{:>6}ms {:?} -> {:?} ({})", ev.offset.as_millis(), ev.hint, status, status.code());
    }
    let st = router.snapshot();
    info!(
        "HINT: {} events, {} requests outstanding, launch {}",
        events.len(),
        st.outstanding(),
        if st.launch.is_active() { "active" } else { "idle" }
    );
    Ok(())
}

fn try_main() -> Result<()> {
    let cli = Cli::parse();
    init_logging();

    match cli.command {
        Command::Init { dry_run } => run_init(dry_run),
        Command::BootCompleted { node } => {
            let cfg = load_or_init(&cli.config).context("loading board config")?;
            on_boot_completed(&cfg, &node)?;
        }
        Command::Replay { file } => run_replay(&cli.config, file)?,
    }
    Ok(())
}

fn main() {
    if let Err(e) = try_main() {
        error!("{:?}", e);
        eprintln!("sweet-board: {:#}", e);
        std::process::exit(1)
    }
}
