use std::collections::{BTreeMap, HashMap};

use log::warn;
use serde::Deserialize;

use super::topology::Topology;
use crate::error::Result;
use crate::utils::{format_cpu_list, parse_cpu_list};

/// Scheduler view of which job owns which core.
pub trait JobLookup {
    fn job_of_core(&self, core: usize) -> Option<&str>;

    /// Display tag of a job, `None` when the job is not tagged
    fn tag_of_job(&self, job: &str) -> Option<u32>;
}

/// One job allocation as listed in a snapshot.
#[derive(Clone, Debug, Deserialize)]
pub struct JobAssignment {
    pub job: String,
    /// Processor addresses in cpu-list form, e.g. `0-7,16`
    pub cores: String,
}

/// Core ownership built from the allocations in a snapshot.
///
/// Jobs are tagged `1, 2, ...` in the order they are first listed.
#[derive(Clone, Debug, Default)]
pub struct JobTable {
    cores: BTreeMap<usize, String>,
    tags: HashMap<String, u32>,
}

impl JobTable {
    pub fn from_assignments(
        assignments: &[JobAssignment],
        topology: &dyn Topology,
    ) -> Result<Self> {
        let mut table = Self::default();
        for assignment in assignments {
            let next_tag = table.tags.len() as u32 + 1;
            table
                .tags
                .entry(assignment.job.clone())
                .or_insert(next_tag);

            let mut off_node = Vec::new();
            for address in parse_cpu_list(&assignment.cores)? {
                match topology.core_of_address(address) {
                    Some(core) => {
                        table.cores.insert(core, assignment.job.clone());
                    }
                    None => off_node.push(address),
                }
            }
            if !off_node.is_empty() {
                warn!(
                    "job {} claims processors {}, which are not on this node",
                    assignment.job,
                    format_cpu_list(&off_node)
                );
            }
        }
        Ok(table)
    }

    pub fn is_empty(&self) -> bool {
        self.cores.is_empty()
    }
}

impl JobLookup for JobTable {
    fn job_of_core(&self, core: usize) -> Option<&str> {
        self.cores.get(&core).map(String::as_str)
    }

    fn tag_of_job(&self, job: &str) -> Option<u32> {
        self.tags.get(job).copied()
    }
}

/// How one of my threads is labelled in the report.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ThreadOwner {
    pub display_tag: String,
    /// Job tag selecting the color, 0 when the job is untagged
    pub color_tag: u32,
}

/// The threads belonging to the invoking job, keyed by pid.
#[derive(Clone, Debug, Default)]
pub struct ThreadOwnership {
    owners: HashMap<u32, ThreadOwner>,
}

impl ThreadOwnership {
    pub fn insert(&mut self, pid: u32, owner: ThreadOwner) {
        self.owners.insert(pid, owner);
    }

    pub fn get(&self, pid: u32) -> Option<&ThreadOwner> {
        self.owners.get(&pid)
    }

    pub fn owns(&self, pid: u32) -> bool {
        self.owners.contains_key(&pid)
    }

    pub fn len(&self) -> usize {
        self.owners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }
}

impl FromIterator<(u32, ThreadOwner)> for ThreadOwnership {
    fn from_iter<I: IntoIterator<Item = (u32, ThreadOwner)>>(iter: I) -> Self {
        Self {
            owners: iter.into_iter().collect(),
        }
    }
}
