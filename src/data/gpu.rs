use serde::Deserialize;

use super::jobs::ThreadOwnership;

/// A process seen by a GPU, with its share of the GPU memory in percent.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct GpuProcess {
    pub pid: u32,
    pub memory_pct: f32,
}

/// Status of one GPU at snapshot time.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct GpuRecord {
    pub id: u32,
    pub utilization_pct: f32,
    pub memory_pct: f32,
    pub power_pct: f32,
    #[serde(default)]
    pub processes: Vec<GpuProcess>,
}

impl GpuRecord {
    /// True when at least one process on this GPU belongs to me
    pub fn is_used_by(&self, ownership: &ThreadOwnership) -> bool {
        self.processes.iter().any(|p| ownership.owns(p.pid))
    }
}
