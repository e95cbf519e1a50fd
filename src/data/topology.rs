use serde::Deserialize;

use crate::error::{PlacementError, Result};

/// How the OS numbers the cores of a node.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Addressing {
    /// Socket 0 holds addresses `0..cps`, socket 1 the next block, and so on
    #[default]
    Contiguous,
    /// Consecutive addresses alternate between sockets
    Interleaved,
}

impl Addressing {
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "contiguous" | "linear" => Some(Addressing::Contiguous),
            "interleaved" | "round-robin" => Some(Addressing::Interleaved),
            _ => None,
        }
    }
}

/// Lookup from a physical core index to its place in the node.
///
/// Core indices are dense: socket `s` owns indices
/// `s * cores_per_socket ..= (s + 1) * cores_per_socket - 1`. The address is
/// the processor number the OS reports for that core, which is what the
/// column header prints.
pub trait Topology {
    fn sockets(&self) -> usize;

    fn cores_per_socket(&self) -> usize;

    fn address_of(&self, core: usize) -> usize;

    /// Inverse of [`Topology::address_of`], `None` for unknown addresses
    fn core_of_address(&self, address: usize) -> Option<usize>;

    fn total_cores(&self) -> usize {
        self.sockets() * self.cores_per_socket()
    }

    fn socket_of(&self, core: usize) -> usize {
        core / self.cores_per_socket()
    }

    fn pos_in_socket(&self, core: usize) -> usize {
        core % self.cores_per_socket()
    }

    fn first_core_of_socket(&self, socket: usize) -> usize {
        socket * self.cores_per_socket()
    }

    fn last_core_of_socket(&self, socket: usize) -> usize {
        self.first_core_of_socket(socket) + self.cores_per_socket() - 1
    }
}

/// A node where every socket holds the same number of cores.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UniformTopology {
    sockets: usize,
    cores_per_socket: usize,
    addressing: Addressing,
}

impl UniformTopology {
    pub fn new(sockets: usize, cores_per_socket: usize, addressing: Addressing) -> Result<Self> {
        if sockets == 0 || cores_per_socket == 0 {
            return Err(PlacementError::topology(format!(
                "a node needs at least one core ({sockets} sockets x {cores_per_socket} cores)"
            )));
        }
        Ok(Self {
            sockets,
            cores_per_socket,
            addressing,
        })
    }

    pub fn addressing(&self) -> Addressing {
        self.addressing
    }
}

impl Topology for UniformTopology {
    fn sockets(&self) -> usize {
        self.sockets
    }

    fn cores_per_socket(&self) -> usize {
        self.cores_per_socket
    }

    fn address_of(&self, core: usize) -> usize {
        match self.addressing {
            Addressing::Contiguous => core,
            Addressing::Interleaved => {
                self.pos_in_socket(core) * self.sockets + self.socket_of(core)
            }
        }
    }

    fn core_of_address(&self, address: usize) -> Option<usize> {
        if address >= self.total_cores() {
            return None;
        }
        let core = match self.addressing {
            Addressing::Contiguous => address,
            Addressing::Interleaved => {
                let socket = address % self.sockets;
                let pos = address / self.sockets;
                self.first_core_of_socket(socket) + pos
            }
        };
        Some(core)
    }
}

/// Topology section of a snapshot or config file.
#[derive(Clone, Debug, Deserialize)]
pub struct TopologySpec {
    pub sockets: usize,
    pub cores_per_socket: usize,
    #[serde(default)]
    pub addressing: Addressing,
}

impl TopologySpec {
    pub fn build(&self) -> Result<UniformTopology> {
        UniformTopology::new(self.sockets, self.cores_per_socket, self.addressing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contiguous_socket_bounds() {
        let topo = UniformTopology::new(2, 4, Addressing::Contiguous).unwrap();
        assert_eq!(topo.total_cores(), 8);
        assert_eq!(topo.socket_of(5), 1);
        assert_eq!(topo.pos_in_socket(5), 1);
        assert_eq!(topo.first_core_of_socket(1), 4);
        assert_eq!(topo.last_core_of_socket(1), 7);
        assert_eq!(topo.address_of(6), 6);
        assert_eq!(topo.core_of_address(6), Some(6));
        assert_eq!(topo.core_of_address(8), None);
    }

    #[test]
    fn interleaved_addresses_round_trip() {
        let topo = UniformTopology::new(2, 4, Addressing::Interleaved).unwrap();
        // socket 0 holds even addresses, socket 1 odd ones
        assert_eq!(topo.address_of(0), 0);
        assert_eq!(topo.address_of(1), 2);
        assert_eq!(topo.address_of(4), 1);
        assert_eq!(topo.address_of(7), 7);
        for core in 0..topo.total_cores() {
            assert_eq!(topo.core_of_address(topo.address_of(core)), Some(core));
        }
    }

    #[test]
    fn empty_topology_is_rejected() {
        assert!(matches!(
            UniformTopology::new(0, 4, Addressing::Contiguous),
            Err(PlacementError::Topology { .. })
        ));
        assert!(UniformTopology::new(2, 0, Addressing::Contiguous).is_err());
    }

    #[test]
    fn addressing_parse() {
        assert_eq!(Addressing::parse("Interleaved"), Some(Addressing::Interleaved));
        assert_eq!(Addressing::parse("linear"), Some(Addressing::Contiguous));
        assert_eq!(Addressing::parse("zigzag"), None);
    }
}
