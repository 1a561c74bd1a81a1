// A growable list optimized for large numbers of appends, but no removals.
// Data is stored in fixed-size chunks, so growing never copies the elements
// already committed; only the small vector of chunk handles is reallocated.

const CHUNK_SIZE: usize = 4096; // must be a power of two for the shift/mask index math
const DIV_SHIFT: u32 = 12; // bit position of CHUNK_SIZE

/// Append-only sequence of `T` backed by a vector of fixed-size chunks.
pub struct ChunkArray<T> {
    values: Vec<Vec<T>>,
    count: usize,
}

impl<T> ChunkArray<T> {
    pub fn new() -> Self {
        Self {
            values: Vec::new(),
            count: 0,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let mut array = Self::new();
        array.reserve(capacity);
        array
    }

    #[inline]
    fn row(index: usize) -> usize {
        index >> DIV_SHIFT // same as index / CHUNK_SIZE
    }

    #[inline]
    fn col(index: usize) -> usize {
        index & (CHUNK_SIZE - 1) // same as index % CHUNK_SIZE
    }

    fn capacity(&self) -> usize {
        self.values.len() * CHUNK_SIZE
    }

    /// Pre-allocate chunks for at least `capacity` elements.
    pub fn reserve(&mut self, capacity: usize) {
        let chunks = capacity.div_ceil(CHUNK_SIZE);
        while self.values.len() < chunks {
            self.values.push(Vec::with_capacity(CHUNK_SIZE));
        }
    }

    /// Append a value, returning the index it was stored at.
    pub fn add(&mut self, value: T) -> usize {
        if self.count == self.capacity() {
            self.values.push(Vec::with_capacity(CHUNK_SIZE));
        }
        let index = self.count;
        self.values[Self::row(index)].push(value);
        self.count += 1;
        index
    }

    pub fn at(&self, index: usize) -> &T {
        &self.values[Self::row(index)][Self::col(index)]
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Drop all elements but keep the chunk allocations for reuse.
    pub fn clear(&mut self) {
        for chunk in &mut self.values {
            chunk.clear();
        }
        self.count = 0;
    }
}

impl<T> Default for ChunkArray<T> {
    fn default() -> Self {
        Self::new()
    }
}
