pub mod gpu;
pub mod jobs;
pub mod memory;
pub mod snapshot;
pub mod topology;

pub use gpu::{GpuProcess, GpuRecord};
pub use jobs::{JobAssignment, JobLookup, JobTable, ThreadOwner, ThreadOwnership};
pub use memory::{MemoryEntry, SocketMemory};
pub use snapshot::{Snapshot, TaskSnapshot, ThreadSnapshot};
pub use topology::{Addressing, Topology, TopologySpec, UniformTopology};
