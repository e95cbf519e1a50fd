use std::fmt::Write;

use log::debug;

use super::gauge::{gauge, gauge1};
use super::header::LEFT_MARGIN;
use super::theme::Palette;
use crate::data::{GpuRecord, ThreadOwnership};

const NOT_MINE: &str = "NOT USED BY THIS JOB";
const UNKNOWN_PROCESS: char = '.';

/// Status blocks of the GPUs attached to each socket.
///
/// Gauges of the GPUs of socket `n` are shifted right by the width of the
/// `n` sockets before it, so that they sit under that socket's columns.
pub fn render_gpus(
    gpus_per_socket: &[Vec<GpuRecord>],
    ownership: &ThreadOwnership,
    only_mine: bool,
    cores_per_socket: usize,
    palette: Palette,
) -> String {
    let mut out = String::new();
    let mut skip_prefix = String::new();

    for gpus in gpus_per_socket {
        for gpu in gpus {
            let _ = writeln!(out, "  GPU {}", gpu.id);
            if only_mine && !gpu.is_used_by(ownership) {
                debug!("gpu {} has none of my {} processes", gpu.id, ownership.len());
                let _ = writeln!(
                    out,
                    "{}{}{NOT_MINE}{}",
                    palette.red(),
                    palette.reverse(),
                    palette.reset()
                );
                out.push('\n');
                continue;
            }
            render_details(&mut out, gpu, ownership, &skip_prefix, cores_per_socket, palette);
        }
        skip_prefix.push_str(&" ".repeat(cores_per_socket + 1));
    }
    out
}

fn render_details(
    out: &mut String,
    gpu: &GpuRecord,
    ownership: &ThreadOwnership,
    skip_prefix: &str,
    cores_per_socket: usize,
    palette: Palette,
) {
    let rows = [
        ("USE", gpu.utilization_pct),
        ("MEMORY", gpu.memory_pct),
        ("POWER", gpu.power_pct),
    ];
    for (label, pct) in rows {
        let bar = palette.paint(&palette.load(pct), &gauge(pct, cores_per_socket));
        let _ = writeln!(out, "{}{skip_prefix}{bar} {pct:.0}%", margin_label(label));
    }

    out.push_str(&margin_label("PROCESSES"));
    out.push_str(skip_prefix);
    for process in &gpu.processes {
        match ownership.get(process.pid) {
            Some(owner) => {
                out.push_str(&palette.paint(&palette.job(owner.color_tag), &owner.display_tag))
            }
            None => out.push(UNKNOWN_PROCESS),
        }
    }
    out.push('\n');

    out.push_str(&margin_label("USED MEMORY"));
    out.push_str(skip_prefix);
    for process in &gpu.processes {
        match ownership.get(process.pid) {
            Some(owner) => {
                let glyph = gauge1(process.memory_pct).to_string();
                out.push_str(&palette.paint(&palette.job(owner.color_tag), &glyph));
            }
            None => out.push(' '),
        }
    }
    out.push_str("\n\n");
}

/// Left label padded to the first core column of the matrix.
fn margin_label(label: &str) -> String {
    format!("{label:<width$}", width = LEFT_MARGIN + 1)
}
