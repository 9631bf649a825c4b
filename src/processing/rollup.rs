use std::collections::HashMap;

/// Grouped values keyed by a string attribute, iterated in first-seen key order.
#[derive(Debug, Clone, PartialEq)]
pub struct Rollup<V> {
    entries: Vec<(String, V)>,
    positions: HashMap<String, usize>
}

impl<V> Rollup<V> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            positions: HashMap::new()
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// The first `count` entries by insertion index.
    pub fn head(&self, count: usize) -> &[(String, V)] {
        &self.entries[..count.min(self.entries.len())]
    }

    pub fn map_values<U>(self, mut transform: impl FnMut(V) -> U) -> Rollup<U> {
        Rollup {
            entries: self.entries.into_iter().map(|(key, value)| (key, transform(value))).collect(),
            positions: self.positions
        }
    }

    pub fn into_entries(self) -> Vec<(String, V)> {
        self.entries
    }
}

impl<V: Default> Rollup<V> {
    /// Returns the slot for `key`, appending a default one the first time the key is seen.
    pub fn entry(&mut self, key: &str) -> &mut V {
        let position = match self.positions.get(key) {
            Some(&position) => position,
            None => {
                let position = self.entries.len();
                self.entries.push((key.to_string(), V::default()));
                self.positions.insert(key.to_string(), position);
                position
            }
        };

        &mut self.entries[position].1
    }
}

#[cfg(test)]
impl<V> Rollup<V> {
    pub fn get(&self, key: &str) -> Option<&V> {
        let position = *self.positions.get(key)?;
        self.entries.get(position).map(|(_, value)| value)
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.iter().map(|(_, value)| value)
    }
}

impl<V> Default for Rollup<V> {
    fn default() -> Self {
        Self::new()
    }
}
