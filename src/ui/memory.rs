use std::collections::BTreeMap;
use std::fmt::Write;

use log::warn;

use super::gauge::gauge;
use crate::data::SocketMemory;
use crate::utils::{format_memory_mb, pad_to_width, text_width};

const TITLE: &str = "   DISTRIBUTION of the MEMORY among the sockets ";
const NO_DATA: &str = "    WARNING - NO INFORMATION COLLECTED - May be a PERMISSION problem ?";

/// Where the memory of one task lives.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TagDistribution {
    /// Raw value per socket, `None` when the socket reported nothing for the tag
    pub values: Vec<Option<u64>>,
    pub total: u64,
    /// Share of `total` per socket, floored; all zero when `total` is zero
    pub percents: Vec<u32>,
}

/// Per-tag distribution of the memory across sockets, sorted by tag.
pub fn distribute(samples: &[SocketMemory]) -> BTreeMap<String, TagDistribution> {
    let mut values: BTreeMap<String, Vec<Option<u64>>> = BTreeMap::new();
    for (socket, sample) in samples.iter().enumerate() {
        for entry in &sample.entries {
            let per_socket = values
                .entry(entry.tag.clone())
                .or_insert_with(|| vec![None; samples.len()]);
            let slot = &mut per_socket[socket];
            *slot = Some(slot.unwrap_or(0) + entry.value);
        }
    }

    values
        .into_iter()
        .map(|(tag, values)| {
            let total: u64 = values.iter().flatten().sum();
            let percents = values
                .iter()
                .map(|value| share(value.unwrap_or(0), total))
                .collect();
            (
                tag,
                TagDistribution {
                    values,
                    total,
                    percents,
                },
            )
        })
        .collect()
}

fn share(value: u64, total: u64) -> u32 {
    if total == 0 {
        0
    } else {
        (u128::from(value) * 100 / u128::from(total)) as u32
    }
}

/// Text block with one line per tag: total memory, a gauge per socket and
/// the raw percentages.
pub fn render_distribution(samples: &[SocketMemory], cores_per_socket: usize) -> String {
    let distribution = distribute(samples);

    let mut out = String::from(TITLE);
    out.push('\n');

    if distribution.is_empty() {
        warn!("no memory sample collected, {} sockets reported", samples.len());
        out.push_str(NO_DATA);
        out.push('\n');
        return out;
    }

    let tag_width = distribution.keys().map(|tag| text_width(tag)).max().unwrap_or(0);
    for (tag, dist) in &distribution {
        out.push_str(&pad_to_width(tag, tag_width));
        out.push_str("  ");
        out.push_str(&format_memory_mb(dist.total as f64));
        out.push_str(&" ".repeat(6));
        for pct in &dist.percents {
            out.push_str(&gauge(*pct as f32, cores_per_socket));
            out.push(' ');
        }
        out.push_str("  ");
        for pct in &dist.percents {
            let _ = write!(out, "{pct}%  ");
        }
        out.push('\n');
    }
    out
}
