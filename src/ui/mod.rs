//! Text rendering of the occupancy matrix: one column per core, one row per
//! thread, with per-socket memory and GPU summaries underneath.

pub mod gauge;
pub mod gpu;
pub mod header;
pub mod memory;
pub mod rows;
pub mod theme;
pub mod window;

pub use rows::{RowRenderer, RowState, ThreadRow};
pub use theme::Palette;
pub use window::CoreWindow;

use crate::data::{GpuRecord, JobLookup, SocketMemory, ThreadOwnership, Topology};
use crate::error::Result;

/// All renderers of one table, sharing the same window.
///
/// Build one per table: the row cursor is reset by the headers, but rows
/// from two tables must never be interleaved on the same instance.
pub struct Matrix<'a> {
    topology: &'a dyn Topology,
    window: CoreWindow,
    palette: Palette,
    rows: RowRenderer<'a>,
}

impl<'a> Matrix<'a> {
    pub fn new(
        topology: &'a dyn Topology,
        requested: Option<(usize, usize)>,
        palette: Palette,
    ) -> Self {
        let window = CoreWindow::normalize(topology, requested);
        Self {
            topology,
            window,
            palette,
            rows: RowRenderer::new(topology, window, palette),
        }
    }

    pub fn window(&self) -> CoreWindow {
        self.window
    }

    pub fn address_header(&mut self) -> String {
        self.rows.reset();
        header::address_header(self.topology, &self.window)
    }

    pub fn label_header(&mut self) -> String {
        self.rows.reset();
        header::label_header(&self.window)
    }

    pub fn ownership_header(&self, jobs: Option<&dyn JobLookup>) -> String {
        header::ownership_header(self.topology, &self.window, jobs, self.palette)
    }

    pub fn row(&mut self, row: &ThreadRow) -> Result<String> {
        self.rows.render(row)
    }

    pub fn memory_distribution(&self, samples: &[SocketMemory]) -> String {
        memory::render_distribution(samples, self.topology.cores_per_socket())
    }

    pub fn gpu_status(
        &self,
        gpus_per_socket: &[Vec<GpuRecord>],
        ownership: &ThreadOwnership,
        only_mine: bool,
    ) -> String {
        gpu::render_gpus(
            gpus_per_socket,
            ownership,
            only_mine,
            self.topology.cores_per_socket(),
            self.palette,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Addressing, JobAssignment, JobTable, UniformTopology};
    use crate::ui::header::LEFT_MARGIN;
    use crate::utils::{strip_ansi, text_width};
    use proptest::prelude::*;

    fn matrix_width(line: &str) -> usize {
        let visible = strip_ansi(line);
        text_width(&visible.chars().skip(LEFT_MARGIN).collect::<String>())
    }

    #[test]
    fn headers_reset_the_row_cursor() {
        let topo = UniformTopology::new(2, 4, Addressing::Contiguous).unwrap();
        let mut matrix = Matrix::new(&topo, None, Palette::plain());
        let first = matrix.row(&ThreadRow::new(9, 9, 0, 'A')).unwrap();
        let _ = matrix.address_header();
        let again = matrix.row(&ThreadRow::new(9, 10, 1, 'A')).unwrap();
        assert_eq!(&first[2..8], "     9");
        assert_eq!(&again[2..8], "     9");
    }

    proptest! {
        #[test]
        fn prop_lines_share_column_count(
            sockets in 1usize..5,
            cps in 1usize..10,
            lo in 0usize..60,
            hi in 0usize..60,
            pick in 0usize..1000,
            whole in any::<bool>(),
        ) {
            let topo = UniformTopology::new(sockets, cps, Addressing::Contiguous).unwrap();
            let requested = if whole { None } else { Some((lo, hi)) };
            let mut matrix = Matrix::new(&topo, requested, Palette::ansi());
            let window = matrix.window();
            let expected = (window.max_core - window.min_core + 1)
                + (window.max_socket - window.min_socket + 1);

            for line in matrix.address_header().lines() {
                prop_assert_eq!(matrix_width(line), expected);
            }

            let jobs = JobTable::from_assignments(
                &[JobAssignment {
                    job: "1".to_string(),
                    cores: format!("{}-{}", window.min_core, window.max_core),
                }],
                &topo,
            )
            .unwrap();
            let owners = matrix.ownership_header(Some(&jobs));
            prop_assert_eq!(matrix_width(owners.trim_end_matches('\n')), expected);
            prop_assert_eq!(owners.matches('●').count(), window.num_cores());

            let labels = matrix.label_header();
            let labels = labels.trim_end_matches('\n');
            let body = labels.len() - LEFT_MARGIN - "  %CPU %MEM  SESS".len();
            prop_assert_eq!(body, expected);

            let core = window.min_core + pick % window.num_cores();
            let row = matrix
                .row(&ThreadRow {
                    color_tag: 1,
                    ..ThreadRow::new(1, 1, core, 'A')
                })
                .unwrap();
            let visible = strip_ansi(&row);
            let columns: String = visible.chars().skip(LEFT_MARGIN).take(expected).collect();
            prop_assert!(columns.chars().all(|c| c == '.' || c == ' ' || c == 'A'));
            prop_assert_eq!(columns.matches('A').count(), 1);
            // the next cell opens the right-hand fields
            prop_assert_eq!(visible.chars().nth(LEFT_MARGIN + expected), Some(' '));
        }

        #[test]
        fn prop_window_edges_are_rejected(
            sockets in 2usize..5,
            cps in 1usize..10,
        ) {
            let topo = UniformTopology::new(sockets, cps, Addressing::Contiguous).unwrap();
            let mut matrix = Matrix::new(&topo, Some((cps, cps)), Palette::plain());
            let window = matrix.window();
            prop_assert!(matrix.row(&ThreadRow::new(1, 1, window.min_core - 1, 'A')).is_err());
            prop_assert!(matrix.row(&ThreadRow::new(1, 1, window.max_core + 1, 'A')).is_err());
        }
    }
}
