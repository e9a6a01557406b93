//! vcx2cmake - convert a Visual Studio `.vcxproj` into `CMakeLists.txt`.

use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use vcx2cmake::{ConfigurationIdentity, ConvertOptions, VisualStudioProject};

#[derive(Parser, Debug)]
#[command(name = "vcx2cmake", version, about = "Convert a .vcxproj into CMakeLists.txt")]
struct Cli {
    /// Path to the .vcxproj file
    project: PathBuf,

    /// Apply conditioned groups whose condition contains this text
    #[arg(long, env = "VCX2CMAKE_MARKER", default_value = vcx2cmake::condition::DEFAULT_MARKER)]
    marker: String,

    /// Apply conditioned groups naming this configuration, e.g. "Release|x64"
    #[arg(long, value_name = "BUILD|PLATFORM")]
    configuration: Option<ConfigurationIdentity>,

    /// Evaluate conditions as MSBuild expressions (requires --configuration)
    #[arg(long, requires = "configuration")]
    exact: bool,

    /// Print the per-configuration summary instead of CMake output
    #[arg(long)]
    summary: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> vcx2cmake::Result<String> {
    if cli.summary {
        return VisualStudioProject::from_file(&cli.project).map(|p| p.to_string());
    }

    let mut options = ConvertOptions::new().marker(cli.marker).exact(cli.exact);
    if let Some(identity) = cli.configuration {
        options = options.configuration(identity);
    }
    options.convert_file(&cli.project)
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let project = cli.project.clone();
    match run(cli) {
        Ok(output) => print!("{output}"),
        Err(e) => {
            tracing::error!("Failed to load project: {}", project.display());
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}
