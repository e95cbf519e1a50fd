use std::fmt::Write;

use super::theme::Palette;
use super::window::CoreWindow;
use crate::data::Topology;
use crate::error::{PlacementError, Result};

const FILLER: char = '.';

/// Labels printed by the previous row, used to blank repeated ones.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RowState {
    pub last_pid: u32,
    pub last_sid: u32,
}

/// One thread to place in the matrix.
#[derive(Clone, Debug, PartialEq)]
pub struct ThreadRow {
    /// 0 draws an idle core
    pub pid: u32,
    pub tid: u32,
    pub core: usize,
    pub marker: char,
    /// Job tag coloring the marker, 0 leaves it uncolored
    pub color_tag: u32,
    /// First character of the line
    pub label: char,
    pub cpu: f32,
    pub mem: Option<f32>,
    pub sid: u32,
}

impl ThreadRow {
    pub fn new(pid: u32, tid: u32, core: usize, marker: char) -> Self {
        Self {
            pid,
            tid,
            core,
            marker,
            color_tag: 0,
            label: ' ',
            cpu: 0.0,
            mem: None,
            sid: 0,
        }
    }

    pub fn idle(core: usize) -> Self {
        Self::new(0, 0, core, FILLER)
    }
}

/// Renders the thread rows of one table.
///
/// Rows must arrive grouped by pid: a pid (and a session id) is only printed
/// when it differs from the previous row.
pub struct RowRenderer<'a> {
    topology: &'a dyn Topology,
    window: CoreWindow,
    palette: Palette,
    state: RowState,
}

impl<'a> RowRenderer<'a> {
    pub fn new(topology: &'a dyn Topology, window: CoreWindow, palette: Palette) -> Self {
        Self {
            topology,
            window,
            palette,
            state: RowState::default(),
        }
    }

    /// Forget the previous row, for a new table.
    pub fn reset(&mut self) {
        self.state = RowState::default();
    }

    pub fn state(&self) -> RowState {
        self.state
    }

    pub fn render(&mut self, row: &ThreadRow) -> Result<String> {
        if !self.window.contains(row.core) {
            return Err(PlacementError::core_out_of_window(
                row.core,
                self.window.min_core,
                self.window.max_core,
            ));
        }

        let mut line = String::with_capacity(64 + self.window.columns());
        line.push(row.label);
        line.push(' ');

        let mut session = String::new();
        if row.pid == 0 || row.pid != self.state.last_pid {
            self.state.last_pid = row.pid;
            let _ = write!(line, "{:6} {:6}", row.pid, row.tid);
            if row.sid != self.state.last_sid {
                self.state.last_sid = row.sid;
                session = format!("{:6}", row.sid);
            }
        } else {
            let _ = write!(line, "{:7}{:6}", "", row.tid);
        }

        self.push_columns(&mut line, row);

        line.push(' ');
        let _ = write!(line, "{:5.1}", row.cpu);
        match row.mem {
            Some(mem) => {
                let _ = write!(line, "{mem:5.1}");
            }
            None => line.push_str("    -"),
        }
        line.push_str(&session);
        line.push('\n');
        Ok(line)
    }

    fn push_columns(&self, line: &mut String, row: &ThreadRow) {
        let cps = self.topology.cores_per_socket();
        let socket = self.topology.socket_of(row.core);
        let pos = self.topology.pos_in_socket(row.core);
        let filler = |n: usize| FILLER.to_string().repeat(n);

        for _ in self.window.min_socket..socket {
            line.push(' ');
            line.push_str(&filler(cps));
        }
        line.push(' ');
        line.push_str(&filler(pos));

        if row.pid == 0 {
            line.push(FILLER);
        } else {
            let marker = row.marker.to_string();
            line.push_str(&self.palette.paint(&self.palette.job(row.color_tag), &marker));
        }

        line.push_str(&filler(cps - pos - 1));
        for _ in socket + 1..=self.window.max_socket {
            line.push(' ');
            line.push_str(&filler(cps));
        }
    }
}
