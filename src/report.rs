use log::debug;

use crate::data::{JobLookup, JobTable, Snapshot, Topology};
use crate::error::{PlacementError, Result};
use crate::ui::{Matrix, Palette, ThreadRow};

/// What a report shows besides the matrix itself.
#[derive(Clone, Debug)]
pub struct ReportOptions {
    /// Processor addresses to keep in view; the whole window is derived from
    /// the running threads when absent
    pub cores: Option<Vec<usize>>,
    pub only_my_gpus: bool,
    pub show_memory: bool,
    pub show_gpus: bool,
    pub palette: Palette,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            cores: None,
            only_my_gpus: false,
            show_memory: true,
            show_gpus: true,
            palette: Palette::ansi(),
        }
    }
}

/// Render the full placement report of a snapshot: headers, one row per
/// thread, then the memory distribution and the GPU status.
pub fn render_report(
    snapshot: &Snapshot,
    topology: &dyn Topology,
    options: &ReportOptions,
) -> Result<String> {
    let jobs = JobTable::from_assignments(&snapshot.jobs, topology)?;
    let ownership = snapshot.ownership(&jobs)?;
    let rows = thread_rows(snapshot, topology, &jobs)?;

    // The requested cores are widened so that every running thread stays in view
    let cores = rows.iter().map(|row| row.core);
    let threads = cores.clone().min().zip(cores.max());
    let requested = match &options.cores {
        Some(addresses) => {
            let span = core_span(topology, addresses)?;
            match (span, threads) {
                (Some((lo, hi)), Some((first, last))) => {
                    if first < lo || last > hi {
                        debug!("threads run on cores {first}-{last}, widening view {lo}-{hi}");
                    }
                    Some((lo.min(first), hi.max(last)))
                }
                (span, threads) => span.or(threads),
            }
        }
        None => threads,
    };

    let mut matrix = Matrix::new(topology, requested, options.palette);
    debug!(
        "rendering {} rows, {} jobs, {} sockets with gpus",
        rows.len(),
        snapshot.jobs.len(),
        snapshot.gpus.len()
    );

    let mut out = matrix.address_header();
    let scheduler = (!jobs.is_empty()).then_some(&jobs as &dyn JobLookup);
    out.push_str(&matrix.ownership_header(scheduler));
    out.push_str(&matrix.label_header());
    for row in &rows {
        out.push_str(&matrix.row(row)?);
    }
    out.push('\n');

    if options.show_memory {
        out.push_str(&matrix.memory_distribution(&snapshot.memory));
        out.push('\n');
    }
    if options.show_gpus && !snapshot.gpus.is_empty() {
        let window = matrix.window();
        let end = (window.max_socket + 1).min(snapshot.gpus.len());
        let start = window.min_socket.min(end);
        out.push_str(&matrix.gpu_status(
            &snapshot.gpus[start..end],
            &ownership,
            options.only_my_gpus,
        ));
    }
    Ok(out)
}

fn thread_rows(
    snapshot: &Snapshot,
    topology: &dyn Topology,
    jobs: &JobTable,
) -> Result<Vec<ThreadRow>> {
    let mut rows = Vec::new();
    for (index, task) in snapshot.tasks.iter().enumerate() {
        let marker = snapshot.task_tag(index)?.chars().next().unwrap_or('?');
        let color_tag = task
            .job
            .as_deref()
            .and_then(|job| jobs.tag_of_job(job))
            .unwrap_or(0);

        for thread in &task.threads {
            let core = topology.core_of_address(thread.psr).ok_or_else(|| {
                PlacementError::topology(format!(
                    "thread {} runs on processor {}, which is not on this node",
                    thread.tid, thread.psr
                ))
            })?;
            rows.push(ThreadRow {
                pid: task.pid,
                tid: thread.tid,
                core,
                marker,
                color_tag,
                label: thread.state.unwrap_or(' '),
                cpu: thread.cpu,
                mem: thread.mem,
                sid: task.sid,
            });
        }
    }
    Ok(rows)
}

fn core_span(topology: &dyn Topology, addresses: &[usize]) -> Result<Option<(usize, usize)>> {
    let mut cores = Vec::with_capacity(addresses.len());
    for &address in addresses {
        let core = topology.core_of_address(address).ok_or_else(|| {
            PlacementError::invalid_argument(format!("processor {address} is not on this node"))
        })?;
        cores.push(core);
    }
    Ok(cores.iter().copied().min().zip(cores.iter().copied().max()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{
        Addressing, GpuProcess, GpuRecord, JobAssignment, SocketMemory, TaskSnapshot,
        ThreadSnapshot, UniformTopology,
    };

    fn thread(tid: u32, psr: usize) -> ThreadSnapshot {
        ThreadSnapshot {
            tid,
            psr,
            state: Some('R'),
            cpu: 100.0,
            mem: Some(0.5),
        }
    }

    fn snapshot() -> Snapshot {
        let mut memory = vec![SocketMemory::default(), SocketMemory::default()];
        memory[0].push("A", 300);
        memory[1].push("A", 100);
        Snapshot {
            topology: None,
            tasks: vec![TaskSnapshot {
                pid: 4242,
                sid: 4000,
                tag: None,
                job: Some("77".to_string()),
                threads: vec![thread(4242, 4), thread(4243, 5)],
            }],
            jobs: vec![JobAssignment {
                job: "77".to_string(),
                cores: "4-7".to_string(),
            }],
            memory,
            gpus: vec![
                vec![GpuRecord {
                    id: 0,
                    utilization_pct: 10.0,
                    memory_pct: 10.0,
                    power_pct: 10.0,
                    processes: vec![],
                }],
                vec![GpuRecord {
                    id: 1,
                    utilization_pct: 90.0,
                    memory_pct: 60.0,
                    power_pct: 70.0,
                    processes: vec![GpuProcess {
                        pid: 4242,
                        memory_pct: 50.0,
                    }],
                }],
            ],
        }
    }

    fn plain() -> ReportOptions {
        ReportOptions {
            palette: Palette::plain(),
            ..ReportOptions::default()
        }
    }

    #[test]
    fn report_sections_in_order() {
        let topo = UniformTopology::new(2, 4, Addressing::Contiguous).unwrap();
        let text = render_report(&snapshot(), &topo, &plain()).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        // window snapped to socket 1 only
        assert_eq!(lines[2], format!("{} 4567", " ".repeat(15)));
        assert_eq!(lines[3], format!("{} ●●●●", " ".repeat(15)));
        assert!(lines[4].starts_with("     PID    TID"));
        assert_eq!(lines[5], "R   4242   4242 A... 100.0  0.5  4000");
        assert_eq!(lines[6], "R          4243 .A.. 100.0  0.5");

        let memory = text.find("DISTRIBUTION").unwrap();
        let gpu = text.find("GPU 1").unwrap();
        assert!(memory < gpu);
        // socket 0 is out of view, so is its GPU
        assert!(!text.contains("GPU 0"));
        assert!(text.contains("A  400.0Mb"));
        assert!(text.contains("75%  25%"));
    }

    #[test]
    fn only_my_gpus_hides_foreign_ones() {
        let topo = UniformTopology::new(2, 4, Addressing::Contiguous).unwrap();
        let options = ReportOptions {
            cores: Some(vec![0, 7]),
            only_my_gpus: true,
            ..plain()
        };
        let text = render_report(&snapshot(), &topo, &options).unwrap();
        assert_eq!(text.matches("NOT USED BY THIS JOB").count(), 1);
        // under the first column of socket 1
        assert!(text.contains(&format!("PROCESSES{}A\n", " ".repeat(7 + 5))));
    }

    #[test]
    fn explicit_cores_widen_the_window() {
        let topo = UniformTopology::new(2, 4, Addressing::Contiguous).unwrap();
        let options = ReportOptions {
            cores: Some(vec![0, 5]),
            show_memory: false,
            show_gpus: false,
            ..plain()
        };
        let text = render_report(&snapshot(), &topo, &options).unwrap();
        assert_eq!(text.lines().next().unwrap().trim_start(), "0000 0000");
        assert!(!text.contains("DISTRIBUTION"));
        assert!(!text.contains("GPU"));
    }

    #[test]
    fn narrow_cores_keep_running_threads_in_view() {
        let topo = UniformTopology::new(2, 4, Addressing::Contiguous).unwrap();
        let mut snapshot = snapshot();
        snapshot.tasks[0].threads = vec![thread(4242, 1), thread(4243, 5)];
        let options = ReportOptions {
            cores: Some(vec![0, 1, 2, 3]),
            show_memory: false,
            show_gpus: false,
            ..plain()
        };

        let text = render_report(&snapshot, &topo, &options).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[2].trim_start(), "0123 4567");
        assert!(lines[5].contains(" .A.. .... "));
        assert!(lines[6].contains(" .... .A.. "));
    }

    #[test]
    fn threads_off_the_node_are_reported() {
        let topo = UniformTopology::new(1, 4, Addressing::Contiguous).unwrap();
        let err = render_report(&snapshot(), &topo, &plain()).unwrap_err();
        assert!(matches!(err, PlacementError::Topology { .. }));
    }

    #[test]
    fn empty_snapshot_renders_whole_node() {
        let topo = UniformTopology::new(2, 2, Addressing::Contiguous).unwrap();
        let text = render_report(&Snapshot::default(), &topo, &plain()).unwrap();
        assert_eq!(text.lines().nth(2).unwrap().trim_start(), "01 23");
        assert!(text.contains("NO INFORMATION COLLECTED"));
    }
}
