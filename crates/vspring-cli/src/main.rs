//! vspring CLI - helical spring generator
//!
//! Collects the spring parameters from flags or a TOML file, builds the
//! wire mesh and writes it out.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use vspring::{generate_path, generate_spring_with, CancelToken, MeshStats, SpringConfig};

mod args;

use args::SpringArgs;

#[derive(Parser)]
#[command(name = "vspring")]
#[command(about = "Generate helical spring meshes", long_about = None)]
struct Cli {
    /// More log output (-v debug, -vv trace). RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a spring and write it to a mesh file
    Generate {
        #[command(flatten)]
        spring: SpringArgs,
        /// Output file (format determined by extension: .stl, .obj)
        #[arg(short, long)]
        output: PathBuf,
        /// Give up after this many seconds
        #[arg(long)]
        timeout: Option<f64>,
    },
    /// Build a spring and print mesh statistics as JSON
    Info {
        #[command(flatten)]
        spring: SpringArgs,
    },
    /// Print the helix centerline points as JSON
    Path {
        #[command(flatten)]
        spring: SpringArgs,
    },
    /// Print a configuration file with the default spring
    InitConfig,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Generate {
            spring,
            output,
            timeout,
        } => generate(&spring, &output, timeout)?,
        Commands::Info { spring } => show_info(&spring)?,
        Commands::Path { spring } => show_path(&spring)?,
        Commands::InitConfig => {
            print!("{}", SpringConfig::default().to_toml_string()?);
        }
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn timeout_duration(secs: f64) -> Result<Duration> {
    let duration = Duration::try_from_secs_f64(secs).ok().filter(|d| !d.is_zero());
    duration.with_context(|| format!("timeout must be a positive number of seconds, got {secs}"))
}

fn generate(spring: &SpringArgs, output: &Path, timeout: Option<f64>) -> Result<()> {
    let mut request = spring.request()?;

    if let Some(secs) = timeout {
        let duration = timeout_duration(secs)?;
        let token = CancelToken::new();
        request = request.with_cancel(token.clone());
        std::thread::spawn(move || {
            std::thread::sleep(duration);
            log::warn!("timeout of {secs}s reached, cancelling");
            token.cancel();
        });
    }

    let mesh = generate_spring_with(&request).context("failed to generate spring")?;
    vspring::export::write_mesh(&mesh, output)
        .with_context(|| format!("failed to write {}", output.display()))?;
    println!(
        "Exported {} vertices, {} faces to {}",
        mesh.num_vertices(),
        mesh.num_faces(),
        output.display()
    );
    Ok(())
}

fn show_info(spring: &SpringArgs) -> Result<()> {
    let request = spring.request()?;
    let mesh = generate_spring_with(&request).context("failed to generate spring")?;
    let stats = MeshStats::from_mesh(&mesh);
    println!("{}", serde_json::to_string_pretty(&stats)?);
    Ok(())
}

fn show_path(spring: &SpringArgs) -> Result<()> {
    let request = spring.request()?;
    let path = generate_path(&request).context("failed to sample helix")?;
    let points: Vec<[f64; 3]> = path.points().iter().map(|p| [p.x, p.y, p.z]).collect();
    println!("{}", serde_json::to_string_pretty(&points)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_duration() {
        assert_eq!(timeout_duration(1.5).unwrap(), Duration::from_millis(1500));
        for secs in [0.0, -1.0, f64::NAN, f64::INFINITY, 1e30] {
            assert!(timeout_duration(secs).is_err(), "secs={secs}");
        }
    }

    #[test]
    fn test_path_command_respects_limits() {
        let spring = SpringArgs {
            turns: Some(1e9),
            ..Default::default()
        };
        let err = show_path(&spring).unwrap_err();
        assert!(format!("{err:#}").contains("limit is 5000000"), "{err:#}");
    }
}
