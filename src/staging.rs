use ahash::AHashMap;

use crate::chunk_array::ChunkArray;

// Suggestion list nodes are chained through chunk-array indices rather than
// pointers; -1 terminates a chain.
struct Node {
    suggestion: Box<str>,
    next: i32,
}

struct Entry {
    count: u32,
    first: i32,
}

/// Temporary staging area for dictionary data while adding many words.
///
/// During a bulk load, appending to a growable suggestion list per delete-hash
/// in the permanent map is far more expensive than prepending nodes to linked
/// lists chained through one shared [`ChunkArray`]. The staged lists are
/// materialized into the permanent map in a single [`commit_to`] pass.
///
/// Note that committed lists carry the staged suggestions in reverse insertion
/// order (each `add` prepends). Lookup only relies on list membership, never
/// on order.
///
/// [`commit_to`]: SuggestionStage::commit_to
pub struct SuggestionStage {
    deletes: AHashMap<u32, Entry>,
    nodes: ChunkArray<Node>,
}

impl SuggestionStage {
    /// Create a staging area expecting roughly `initial_capacity` words.
    pub fn new(initial_capacity: usize) -> Self {
        Self {
            deletes: AHashMap::with_capacity(initial_capacity),
            nodes: ChunkArray::with_capacity(initial_capacity * 2),
        }
    }

    /// Number of unique staged delete hashes.
    pub fn delete_count(&self) -> usize {
        self.deletes.len()
    }

    /// Total number of staged suggestions across all deletes.
    pub fn node_count(&self) -> usize {
        self.nodes.count()
    }

    pub fn clear(&mut self) {
        self.deletes.clear();
        self.nodes.clear();
    }

    pub(crate) fn add(&mut self, delete_hash: u32, suggestion: &str) {
        let next = match self.deletes.get(&delete_hash) {
            Some(entry) => entry.first,
            None => -1,
        };
        let first = self.nodes.add(Node {
            suggestion: suggestion.into(),
            next,
        }) as i32;
        let entry = self
            .deletes
            .entry(delete_hash)
            .or_insert(Entry { count: 0, first: -1 });
        entry.count += 1;
        entry.first = first;
    }

    pub(crate) fn commit_to(&mut self, permanent: &mut AHashMap<u32, Vec<Box<str>>>) {
        for (&delete_hash, entry) in &self.deletes {
            let suggestions = permanent.entry(delete_hash).or_default();
            suggestions.reserve(entry.count as usize);
            let mut next = entry.first;
            while next >= 0 {
                let node = self.nodes.at(next as usize);
                suggestions.push(node.suggestion.clone());
                next = node.next;
            }
        }
    }
}
