use std::fs;
use std::path::Path;

use serde::Deserialize;

use super::gpu::GpuRecord;
use super::jobs::{JobAssignment, JobLookup, JobTable, ThreadOwner, ThreadOwnership};
use super::memory::SocketMemory;
use super::topology::TopologySpec;
use crate::error::{PlacementError, Result};
use crate::utils::task_letter;

/// A whole-node picture taken by the collectors, rendered in one pass.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    pub topology: Option<TopologySpec>,
    pub tasks: Vec<TaskSnapshot>,
    pub jobs: Vec<JobAssignment>,
    /// One entry per socket, in socket order
    pub memory: Vec<SocketMemory>,
    /// GPUs attached to each socket, in socket order
    pub gpus: Vec<Vec<GpuRecord>>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct TaskSnapshot {
    pub pid: u32,
    #[serde(default)]
    pub sid: u32,
    /// Display tag, defaults to the task letter
    #[serde(default)]
    pub tag: Option<String>,
    #[serde(default)]
    pub job: Option<String>,
    #[serde(default)]
    pub threads: Vec<ThreadSnapshot>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ThreadSnapshot {
    pub tid: u32,
    /// Processor address the thread last ran on
    pub psr: usize,
    #[serde(default)]
    pub state: Option<char>,
    #[serde(default)]
    pub cpu: f32,
    #[serde(default)]
    pub mem: Option<f32>,
}

impl Snapshot {
    /// Load a snapshot from a `.json`, `.yaml` or `.yml` file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        let parsed: std::result::Result<Self, String> = match extension.as_deref() {
            Some("json") => serde_json::from_str(&content).map_err(|e| e.to_string()),
            Some("yaml") | Some("yml") => {
                serde_yaml_ng::from_str(&content).map_err(|e| e.to_string())
            }
            _ => Err("expected a .json, .yaml or .yml file".to_string()),
        };
        parsed.map_err(|reason| PlacementError::snapshot(path.to_path_buf(), reason))
    }

    /// Display tag of the task at `index`.
    pub fn task_tag(&self, index: usize) -> Result<String> {
        match self.tasks.get(index).and_then(|task| task.tag.clone()) {
            Some(tag) => Ok(tag),
            None => task_letter(index).map(String::from),
        }
    }

    /// Every task pid of the snapshot, tagged and colored by its job.
    pub fn ownership(&self, jobs: &JobTable) -> Result<ThreadOwnership> {
        let mut ownership = ThreadOwnership::default();
        for (index, task) in self.tasks.iter().enumerate() {
            let color_tag = task
                .job
                .as_deref()
                .and_then(|job| jobs.tag_of_job(job))
                .unwrap_or(0);
            ownership.insert(
                task.pid,
                ThreadOwner {
                    display_tag: self.task_tag(index)?,
                    color_tag,
                },
            );
        }
        Ok(ownership)
    }
}
