use std::env;
use std::fs;
use std::path::PathBuf;

use log::{debug, warn};
use serde::Deserialize;
use sysinfo::System;

use crate::data::{Addressing, Snapshot, TopologySpec, UniformTopology};
use crate::error::{PlacementError, Result};
use crate::report::ReportOptions;
use crate::ui::Palette;
use crate::utils::parse_cpu_list;

/// Runtime configuration
#[derive(Debug)]
pub struct Config {
    pub snapshot: PathBuf,
    pub cores: Option<Vec<usize>>,
    pub color: bool,
    pub show_memory: bool,
    pub show_gpus: bool,
    pub only_my_gpus: bool,
    pub topology: Option<TopologySpec>,
}

/// File-based configuration (TOML)
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileConfig {
    display: DisplayConfig,
    topology: Option<TopologySpec>,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct DisplayConfig {
    color: bool,
    show_memory: bool,
    show_gpus: bool,
    only_my_gpus: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            color: true,
            show_memory: true,
            show_gpus: true,
            only_my_gpus: false,
        }
    }
}

impl Config {
    pub fn from_args() -> std::result::Result<Self, String> {
        let file_config = load_config_file().unwrap_or_default();
        Self::parse(env::args().skip(1), file_config)
    }

    fn parse(
        mut args: impl Iterator<Item = String>,
        file_config: FileConfig,
    ) -> std::result::Result<Self, String> {
        // Start with file config values
        let mut snapshot = None;
        let mut cores = None;
        let mut color = file_config.display.color;
        let mut show_memory = file_config.display.show_memory;
        let mut show_gpus = file_config.display.show_gpus;
        let mut only_my_gpus = file_config.display.only_my_gpus;

        // Override with CLI args
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--help" | "-h" => return Err(usage()),
                "--cores" => {
                    let value = args
                        .next()
                        .ok_or_else(|| "Missing value for --cores\n\n".to_string() + &usage())?;
                    let list = parse_cpu_list(&value)
                        .map_err(|err| format!("{err}\n\n{}", usage()))?;
                    if list.is_empty() {
                        return Err(format!("Empty core list: {value:?}\n\n{}", usage()));
                    }
                    cores = Some(list);
                }
                "--only-my-gpus" => only_my_gpus = true,
                "--no-color" => color = false,
                "--no-memory" => show_memory = false,
                "--no-gpus" => show_gpus = false,
                _ if arg.starts_with('-') => {
                    return Err(format!("Unknown argument: {arg}\n\n{}", usage()));
                }
                _ => {
                    if snapshot.is_some() {
                        return Err(format!("Unexpected argument: {arg}\n\n{}", usage()));
                    }
                    snapshot = Some(PathBuf::from(&arg));
                }
            }
        }

        let snapshot = snapshot.ok_or_else(|| "Missing snapshot file\n\n".to_string() + &usage())?;

        Ok(Self {
            snapshot,
            cores,
            color,
            show_memory,
            show_gpus,
            only_my_gpus,
            topology: file_config.topology,
        })
    }

    pub fn report_options(&self) -> ReportOptions {
        ReportOptions {
            cores: self.cores.clone(),
            only_my_gpus: self.only_my_gpus,
            show_memory: self.show_memory,
            show_gpus: self.show_gpus,
            palette: Palette::new(self.color),
        }
    }

    /// Topology of the snapshot, else of the config file, else one socket
    /// holding every physical core of this host.
    pub fn topology(&self, snapshot: &Snapshot) -> Result<UniformTopology> {
        if let Some(spec) = snapshot.topology.as_ref().or(self.topology.as_ref()) {
            return spec.build();
        }
        let cores = System::physical_core_count().ok_or_else(|| {
            PlacementError::topology("no topology given and core count unavailable")
        })?;
        debug!("no topology given, assuming one socket of {cores} cores");
        UniformTopology::new(1, cores, Addressing::Contiguous)
    }
}

fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("placement").join("config.toml"))
}

fn load_config_file() -> Option<FileConfig> {
    let path = config_path()?;
    let content = fs::read_to_string(&path).ok()?;
    match toml::from_str(&content) {
        Ok(config) => Some(config),
        Err(err) => {
            warn!("{}", PlacementError::config_invalid(path, err.to_string()));
            None
        }
    }
}

fn usage() -> String {
    let config_location = config_path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "~/.config/placement/config.toml".to_string());

    [
        "Usage: placement-matrix [options] <snapshot.json|snapshot.yaml>",
        "",
        "Options:",
        "  --cores <list>     Processors to keep in view, e.g. 0-7,16 (default: threads' span)",
        "  --only-my-gpus     Do not detail GPUs that run none of the job's processes",
        "  --no-color         Plain text output",
        "  --no-memory        Hide the memory distribution",
        "  --no-gpus          Hide the GPU status",
        "  -h, --help         Show this help",
        "",
        &format!("Config file: {config_location}"),
        "",
        "Example config.toml:",
        "  [display]",
        "  color = true",
        "  show_memory = true",
        "  show_gpus = true",
        "  only_my_gpus = false",
        "",
        "  [topology]",
        "  sockets = 2",
        "  cores_per_socket = 18",
        "  addressing = \"contiguous\"",
    ]
    .join("\n")
}
