use ahash::AHashMap;

/// Last issued sequence number per node type. Counters only ever grow.
#[derive(Debug, Clone, Default)]
pub struct NodeIdCounters {
    last_issued: AHashMap<String, u64>,
}

impl NodeIdCounters {
    /// Issues the next identifier for `type_id`, formatted `{type_id}-{sequence}`.
    /// Sequences start at 1 and are never reused.
    pub fn issue(&mut self, type_id: &str) -> String {
        let counter = self.last_issued.entry(type_id.to_string()).or_insert(0);
        *counter += 1;
        format!("{}-{}", type_id, counter)
    }

    pub fn last_issued(&self, type_id: &str) -> Option<u64> {
        self.last_issued.get(type_id).copied()
    }
}
