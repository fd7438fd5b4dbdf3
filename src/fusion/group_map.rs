use super::Map;

/// Values keyed by group name, iterated in the order names were first inserted.
///
/// Replacing the value of a known name keeps its original position.
#[derive(Clone, Debug)]
pub struct GroupMap<V> {
    names: Vec<String>,
    values: Map<String, V>,
}

impl<V> Default for GroupMap<V> {
    fn default() -> Self {
        Self {
            names: Vec::new(),
            values: Map::new(),
        }
    }
}

impl<V> GroupMap<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&V> {
        self.values.get(name)
    }

    pub fn insert(&mut self, name: String, value: V) {
        if !self.values.contains_key(&name) {
            self.names.push(name.clone());
        }
        self.values.insert(name, value);
    }

    pub fn get_or_insert_with<F: FnOnce() -> V>(&mut self, name: &str, default: F) -> &mut V {
        if !self.values.contains_key(name) {
            self.names.push(name.to_string());
        }
        self.values.entry(name.to_string()).or_insert_with(default)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.names
            .iter()
            .filter_map(|name| self.values.get_key_value(name))
            .map(|(name, value)| (name.as_str(), value))
    }
}
