use anyhow::Result;
use clap::Parser;
use simkit_source::NormalizerConfig;
use simkit_toolchain::ToolchainConfig;
use std::env;
use std::path::PathBuf;

use crate::app::App;
use crate::flags::MarkerPolicyFlag;
use crate::router::VerbTable;

mod app;
mod flags;
mod router;

#[derive(Parser)]
#[command(name = "simkit")]
#[command(about = "Build, run and tidy the machine simulator and linker", long_about = None)]
#[command(version)]
struct Cli {
    /// Verb (build, run, debug, memcheck, clean, count, format) or a target key,
    /// followed by its argument. Verbs may be abbreviated to any prefix; options
    /// may appear before or after them.
    #[arg(value_name = "VERB [TARGET]")]
    args: Vec<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors
    #[arg(long)]
    quiet: bool,

    /// Project root (defaults to current directory)
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// C compiler used for build steps
    #[arg(long)]
    cc: Option<PathBuf>,

    /// Debugger used by `debug`
    #[arg(long)]
    gdb: Option<PathBuf>,

    /// Memory analyzer used by `memcheck`
    #[arg(long)]
    valgrind: Option<PathBuf>,

    /// Whether `format` keeps the `headers/` segment in rewritten includes
    #[arg(long, value_enum, default_value_t = MarkerPolicyFlag::Retain)]
    marker_policy: MarkerPolicyFlag,

    /// Output JSON format (count)
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn toolchain_config(&self) -> ToolchainConfig {
        let mut config = ToolchainConfig::with_root(&self.root);
        if let Some(cc) = &self.cc {
            config.compiler = cc.clone();
        }
        if let Some(gdb) = &self.gdb {
            config.debugger = gdb.clone();
        }
        if let Some(valgrind) = &self.valgrind {
            config.memchecker = valgrind.clone();
        }
        config
    }

    fn normalizer_config(&self) -> NormalizerConfig {
        NormalizerConfig {
            marker_policy: self.marker_policy.as_domain(),
            ..NormalizerConfig::default()
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    for (index, arg) in env::args_os().enumerate() {
        log::debug!("argv[{index}] = {}", arg.to_string_lossy());
    }

    let app = App::new(cli.toolchain_config(), cli.normalizer_config(), cli.json)?;
    let table = VerbTable::new(&app.registries.primary_keys());
    let Some(command) = table.parse(&cli.args)? else {
        return Ok(());
    };
    app.execute(&command)
}
