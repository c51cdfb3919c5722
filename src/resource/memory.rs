use crate::*;
use std::collections::HashMap;

/// Resources held in memory, typically a table of `include_bytes!` blobs
/// compiled into the binary.
#[derive(Debug, Clone, Default)]
pub struct MemoryProvider {
    resources: HashMap<ResourceId, Vec<u8>>,
}

impl MemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert (or overwrite) a resource.
    pub fn insert(&mut self, id: impl Into<ResourceId>, bytes: impl Into<Vec<u8>>) -> &mut Self {
        self.resources.insert(id.into(), bytes.into());
        self
    }

    pub fn contains(&self, id: &ResourceId) -> bool {
        self.resources.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &ResourceId> {
        self.resources.keys()
    }
}

impl ResourceProvider for MemoryProvider {
    fn load(&self, id: &ResourceId) -> Result<Option<Vec<u8>>> {
        Ok(self.resources.get(id).cloned())
    }
}

impl<K, V> FromIterator<(K, V)> for MemoryProvider
where
    K: Into<ResourceId>,
    V: Into<Vec<u8>>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            resources: iter
                .into_iter()
                .map(|(id, bytes)| (id.into(), bytes.into()))
                .collect(),
        }
    }
}

impl<K, V> Extend<(K, V)> for MemoryProvider
where
    K: Into<ResourceId>,
    V: Into<Vec<u8>>,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        self.resources
            .extend(iter.into_iter().map(|(id, bytes)| (id.into(), bytes.into())));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_overwrites() {
        let mut provider = MemoryProvider::new();
        provider.insert("A.sql", "one").insert("A.sql", "two");
        assert_eq!(provider.len(), 1);
        assert_eq!(provider.text(&"A.sql".into()).unwrap(), "two");
    }

    #[test]
    fn load_reports_absence_as_none() {
        let provider = MemoryProvider::from_iter([("A.sql", "a")]);
        assert!(provider.load(&"B.sql".into()).unwrap().is_none());
        assert!(provider.contains(&"A.sql".into()));
    }

    #[test]
    fn extend_adds_resources() {
        let mut provider = MemoryProvider::new();
        provider.extend([("A.sql", "a"), ("B.sql", "b")]);
        let mut ids = provider.ids().map(|id| id.as_str()).collect::<Vec<_>>();
        ids.sort();
        assert_eq!(ids, ["A.sql", "B.sql"]);
    }
}
