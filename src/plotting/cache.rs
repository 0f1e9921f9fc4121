use lru::LruCache;
use std::num::NonZeroUsize;

use super::ChartId;

/// Identifies one rendering of one chart.
///
/// The snapshot generation is part of the key, so a new snapshot never hits
/// bitmaps drawn from the previous one.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq)]
pub struct ChartKey {
    pub chart: ChartId,
    pub generation: u64,
    pub size: (u32, u32),
}

/// Bounded cache of rendered charts (or the textures made from them).
pub struct ChartCache<V> {
    entries: LruCache<ChartKey, V>,
}

impl<V: Clone> ChartCache<V> {
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: LruCache::new(capacity),
        }
    }

    /// Return the cached value for `key`, rendering and storing it on a miss.
    ///
    /// Failed renders are not cached, so the next frame tries again.
    pub fn get_or_render<E>(
        &mut self,
        key: ChartKey,
        render: impl FnOnce() -> Result<V, E>,
    ) -> Result<V, E> {
        if let Some(hit) = self.entries.get(&key) {
            return Ok(hit.clone());
        }

        tracing::debug!(chart = ?key.chart, generation = key.generation, "Rendering chart");
        let value = render()?;
        self.entries.put(key, value.clone());
        Ok(value)
    }

    /// Drop every entry rendered for an older snapshot.
    pub fn retain_generation(&mut self, generation: u64) {
        let stale: Vec<ChartKey> = self
            .entries
            .iter()
            .filter(|(key, _)| key.generation != generation)
            .map(|(key, _)| *key)
            .collect();
        for key in stale {
            self.entries.pop(&key);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
