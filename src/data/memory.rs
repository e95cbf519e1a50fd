use serde::Deserialize;

/// Memory used by one task on one socket, in megabytes.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct MemoryEntry {
    pub tag: String,
    pub value: u64,
}

/// Memory sample of a single socket.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct SocketMemory {
    pub entries: Vec<MemoryEntry>,
}

impl SocketMemory {
    pub fn get(&self, tag: &str) -> Option<u64> {
        self.entries.iter().find(|e| e.tag == tag).map(|e| e.value)
    }

    pub fn push(&mut self, tag: impl Into<String>, value: u64) {
        self.entries.push(MemoryEntry {
            tag: tag.into(),
            value,
        });
    }
}
