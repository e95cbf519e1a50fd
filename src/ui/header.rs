use std::fmt::Write;

use super::theme::Palette;
use super::window::CoreWindow;
use crate::data::{JobLookup, Topology};

/// Width of the `PID TID` label block on the left of every line.
pub const LEFT_MARGIN: usize = 15;

const LEFT_LABELS: &str = "     PID    TID";
const RIGHT_LABELS: &str = "  %CPU %MEM  SESS";
const JOB_GLYPH: char = '●';

/// Column label of every core, one digit per line (hundreds, tens, units).
pub fn address_header(topology: &dyn Topology, window: &CoreWindow) -> String {
    let margin = " ".repeat(LEFT_MARGIN);
    let mut out = String::with_capacity(3 * (LEFT_MARGIN + window.columns() + 1));

    for divisor in [100, 10, 1] {
        out.push_str(&margin);
        for core in window.cores() {
            if topology.pos_in_socket(core) == 0 {
                out.push(' ');
            }
            let digit = (topology.address_of(core) / divisor) % 10;
            let _ = write!(out, "{digit}");
        }
        out.push('\n');
    }
    out
}

/// Fixed labels above the row fields, blank over the matrix columns.
pub fn label_header(window: &CoreWindow) -> String {
    let mut out =
        String::with_capacity(LEFT_LABELS.len() + window.columns() + RIGHT_LABELS.len() + 1);
    out.push_str(LEFT_LABELS);
    out.push_str(&" ".repeat(window.columns()));
    out.push_str(RIGHT_LABELS);
    out.push('\n');
    out
}

/// One colored dot per core showing the job that owns it.
///
/// Without a scheduler there is nothing to show and the header is empty.
pub fn ownership_header(
    topology: &dyn Topology,
    window: &CoreWindow,
    jobs: Option<&dyn JobLookup>,
    palette: Palette,
) -> String {
    let Some(jobs) = jobs else {
        return String::new();
    };

    let mut out = " ".repeat(LEFT_MARGIN);
    for core in window.cores() {
        if topology.pos_in_socket(core) == 0 {
            out.push(' ');
        }
        let tag = jobs.job_of_core(core).and_then(|job| jobs.tag_of_job(job));
        match tag {
            Some(tag) if tag != 0 => {
                out.push_str(&palette.job(tag));
                out.push(JOB_GLYPH);
            }
            _ => out.push(' '),
        }
    }
    out.push_str(&palette.reset());
    out.push('\n');
    out
}
