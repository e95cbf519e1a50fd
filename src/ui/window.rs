use std::ops::RangeInclusive;

use log::debug;

use crate::data::Topology;

/// The range of cores shown by a table, always whole sockets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CoreWindow {
    pub min_core: usize,
    pub max_core: usize,
    pub min_socket: usize,
    pub max_socket: usize,
}

impl CoreWindow {
    /// Snap a requested `[lo, hi]` core range outward to socket boundaries.
    ///
    /// `None` selects the whole node. Bounds beyond the last core are
    /// clamped to it, and reversed bounds are swapped.
    pub fn normalize(topology: &dyn Topology, requested: Option<(usize, usize)>) -> Self {
        let last_core = topology.total_cores().saturating_sub(1);
        let window = match requested {
            None => Self {
                min_core: 0,
                max_core: last_core,
                min_socket: 0,
                max_socket: topology.sockets().saturating_sub(1),
            },
            Some((lo, hi)) => {
                let (lo, hi) = if lo <= hi { (lo, hi) } else { (hi, lo) };
                let min_socket = topology.socket_of(lo.min(last_core));
                let max_socket = topology.socket_of(hi.min(last_core));
                Self {
                    min_core: topology.first_core_of_socket(min_socket),
                    max_core: topology.last_core_of_socket(max_socket),
                    min_socket,
                    max_socket,
                }
            }
        };
        debug!("core window {requested:?} normalized to {window:?}");
        window
    }

    pub fn cores(&self) -> RangeInclusive<usize> {
        self.min_core..=self.max_core
    }

    pub fn sockets(&self) -> RangeInclusive<usize> {
        self.min_socket..=self.max_socket
    }

    pub fn contains(&self, core: usize) -> bool {
        self.cores().contains(&core)
    }

    pub fn num_cores(&self) -> usize {
        self.max_core - self.min_core + 1
    }

    pub fn num_sockets(&self) -> usize {
        self.max_socket - self.min_socket + 1
    }

    /// Number of matrix columns: one per core plus one separator per socket
    pub fn columns(&self) -> usize {
        self.num_cores() + self.num_sockets()
    }
}
