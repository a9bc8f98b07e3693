//! Spring parameters from the command line, layered over a config file.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use vspring::{SpringConfig, SpringRequest};

/// Spring shape and generation flags shared by every subcommand.
///
/// Precedence: flags, then the config file, then the built-in defaults.
#[derive(Args, Debug, Default)]
pub struct SpringArgs {
    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Total number of rotations of the spring
    #[arg(long)]
    pub turns: Option<f64>,

    /// Tip-to-tip height of the wire centerline along Z
    #[arg(long)]
    pub height: Option<f64>,

    /// Radius of the spring
    #[arg(long)]
    pub spring_radius: Option<f64>,

    /// Radius of the wire
    #[arg(long)]
    pub wire_radius: Option<f64>,

    /// Straight segments per turn of the centerline
    #[arg(long)]
    pub segments_per_turn: Option<u32>,

    /// Polygon sides around the wire (default 24)
    #[arg(long)]
    pub circle_segments: Option<u32>,

    /// Close the trailing end of the wire as well
    #[arg(long)]
    pub cap_end: bool,

    /// Refuse to build meshes with more vertices than this
    #[arg(long)]
    pub max_vertices: Option<usize>,
}

impl SpringArgs {
    /// Resolve the effective configuration.
    pub fn resolve(&self) -> Result<SpringConfig> {
        let mut config = match &self.config {
            Some(path) => SpringConfig::from_path(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => SpringConfig::default(),
        };

        let spring = &mut config.spring;
        if let Some(v) = self.turns {
            spring.turns = v;
        }
        if let Some(v) = self.height {
            spring.height = v;
        }
        if let Some(v) = self.spring_radius {
            spring.spring_radius = v;
        }
        if let Some(v) = self.wire_radius {
            spring.wire_radius = v;
        }
        if let Some(v) = self.segments_per_turn {
            spring.segments_per_turn = v;
        }
        if let Some(v) = self.circle_segments {
            spring.circle_segments = v;
        }
        if self.cap_end {
            config.cap_end = true;
        }
        if let Some(v) = self.max_vertices {
            config.limits.max_vertices = v;
        }

        log::debug!("resolved spring config: {config:?}");
        Ok(config)
    }

    /// Resolve straight into a generation request.
    pub fn request(&self) -> Result<SpringRequest> {
        Ok(self.resolve()?.request())
    }
}
