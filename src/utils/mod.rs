mod cpulist;
mod format;

pub use cpulist::{format_cpu_list, parse_cpu_list, task_letter};
pub use format::{format_memory_mb, pad_to_width, text_width};

#[cfg(test)]
pub use format::strip_ansi;
