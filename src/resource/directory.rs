use crate::*;
use std::{
    collections::{HashMap, HashSet, hash_map::Entry},
    fs, io,
    path::{Path, PathBuf},
};

/// Extension of the files served as queries.
const QUERY_EXTENSION: &str = "sql";

/// Resources read from a directory tree.
///
/// Relative paths become identifiers by joining their components with `.`
/// under an optional namespace, so with namespace `Acme.Data` the file
/// `UsersQueries/All.sql` is served as `Acme.Data.UsersQueries.All.sql`.
/// The tree is indexed once at construction; file contents are read on demand.
///
/// Only `.sql` files are indexed. Symbolic links are followed, except those
/// leading back into a directory that is still being walked. Two files that
/// map onto the same identifier, such as `A/B.sql` and `A.B.sql`, are an
/// [`Error::DuplicateResource`].
#[derive(Debug, Clone)]
pub struct DirectoryProvider {
    root: PathBuf,
    index: HashMap<ResourceId, PathBuf>,
}

impl DirectoryProvider {
    pub fn new(root: impl Into<PathBuf>, namespace: Option<&str>) -> Result<Self> {
        let root = root.into();
        let mut index = HashMap::new();
        let prefix: Vec<String> = namespace
            .map(|ns| ns.split('.').filter(|s| !s.is_empty()).map(str::to_string).collect())
            .unwrap_or_default();
        Self::index_dir(&root, &prefix, &mut HashSet::new(), &mut index)?;
        debug!("Indexed {} queries under {}", index.len(), root.display());
        Ok(Self { root, index })
    }

    /// Provider for the directory named by `query_root`, under `query_namespace`.
    pub fn from_config(config: &Config) -> Result<Self> {
        let root = config
            .query_root
            .as_ref()
            .ok_or_else(|| Error::Config("UTILITRON_QUERY_ROOT is not set".to_string()))?;
        Self::new(root, config.query_namespace.as_deref())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn ids(&self) -> impl Iterator<Item = &ResourceId> {
        self.index.keys()
    }

    /// `walking` holds the canonical paths of `dir` and its ancestors.
    fn index_dir(
        dir: &Path,
        prefix: &[String],
        walking: &mut HashSet<PathBuf>,
        index: &mut HashMap<ResourceId, PathBuf>,
    ) -> Result {
        let canonical = fs::canonicalize(dir).map_err(|e| Error::io(dir, e))?;
        if !walking.insert(canonical.clone()) {
            warn!("Skipping {}, it links back to {}", dir.display(), canonical.display());
            return Ok(());
        }

        let entries = fs::read_dir(dir).map_err(|e| Error::io(dir, e))?;
        for entry in entries {
            let entry = entry.map_err(|e| Error::io(dir, e))?;
            let path = entry.path();
            let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                warn!("Skipping non UTF-8 path {}", path.display());
                continue;
            };
            // Follows links, unlike `DirEntry::file_type`.
            let metadata = match fs::metadata(&path) {
                Ok(metadata) => metadata,
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    warn!("Skipping dangling link {}", path.display());
                    continue;
                }
                Err(e) => return Err(Error::io(&path, e)),
            };

            let mut segments = prefix.to_vec();
            segments.push(name);
            if metadata.is_dir() {
                Self::index_dir(&path, &segments, walking, index)?;
                continue;
            }
            if path.extension().and_then(|e| e.to_str()) != Some(QUERY_EXTENSION) {
                trace!("Skipping {}, not a query file", path.display());
                continue;
            }

            match index.entry(ResourceId::from_segments(segments.iter().map(String::as_str))) {
                Entry::Occupied(existing) => {
                    return Err(Error::DuplicateResource {
                        id: existing.key().clone(),
                        first: existing.get().clone(),
                        second: path,
                    });
                }
                Entry::Vacant(slot) => {
                    trace!("Indexed {} -> {}", slot.key(), path.display());
                    slot.insert(path);
                }
            }
        }

        walking.remove(&canonical);
        Ok(())
    }
}

impl ResourceProvider for DirectoryProvider {
    fn load(&self, id: &ResourceId) -> Result<Option<Vec<u8>>> {
        let Some(path) = self.index.get(id) else {
            return Ok(None);
        };
        fs::read(path).map(Some).map_err(|e| Error::io(path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write(root: &Path, relative: &str, contents: &[u8]) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    #[test]
    fn nested_paths_become_dotted_identifiers() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "UsersQueries/All.sql", b"select * from users");
        write(dir.path(), "Shared/Columns.sql", b"id, name");

        let provider = DirectoryProvider::new(dir.path(), Some("Acme.Data")).unwrap();

        assert_eq!(
            provider.text(&"Acme.Data.UsersQueries.All.sql".into()).unwrap(),
            "select * from users"
        );
        assert_eq!(
            provider.text(&"Acme.Data.Shared.Columns.sql".into()).unwrap(),
            "id, name"
        );
        assert!(matches!(
            provider.text(&"Acme.Data.UsersQueries.None.sql".into()),
            Err(Error::NotFound(_))
        ));
    }

    #[test]
    fn without_namespace_identifiers_start_at_the_root() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "A/B.sql", b"\xEF\xBB\xBFb");
        let provider = DirectoryProvider::new(dir.path(), None).unwrap();
        assert_eq!(provider.ids().count(), 1);
        assert_eq!(provider.text(&"A.B.sql".into()).unwrap(), "b");
    }

    #[test]
    fn missing_root_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = DirectoryProvider::new(dir.path().join("missing"), None).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }

    #[test]
    fn from_config_requires_a_root() {
        let config = Config::default();
        assert!(matches!(
            DirectoryProvider::from_config(&config),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn from_config_uses_root_and_namespace() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "RepoQueries/Q.sql", b"q");
        let config = Config {
            query_root: Some(dir.path().to_path_buf()),
            query_namespace: Some("Ns".to_string()),
            ..Config::default()
        };
        let provider = DirectoryProvider::from_config(&config).unwrap();
        assert_eq!(provider.root(), dir.path());
        assert_eq!(provider.text(&"Ns.RepoQueries.Q.sql".into()).unwrap(), "q");
    }

    #[test]
    fn only_query_files_are_indexed() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "RQueries/Q.sql", b"q");
        write(dir.path(), "RQueries/README.md", b"notes");
        write(dir.path(), "RQueries/Q.sql.bak", b"old");
        let provider = DirectoryProvider::new(dir.path(), None).unwrap();
        assert_eq!(provider.ids().collect::<Vec<_>>(), [&ResourceId::from("RQueries.Q.sql")]);
    }

    #[test]
    fn colliding_identifiers_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "A/B.sql", b"nested");
        write(dir.path(), "A.B.sql", b"flat");
        let err = DirectoryProvider::new(dir.path(), None).unwrap_err();
        assert!(matches!(err, Error::DuplicateResource { ref id, .. } if id.as_str() == "A.B.sql"));
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_query_folder_is_walked() {
        use std::os::unix::fs::symlink;

        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "real/RQueries/Q.sql", b"q");
        fs::create_dir(dir.path().join("root")).unwrap();
        symlink(dir.path().join("real/RQueries"), dir.path().join("root/RQueries")).unwrap();

        let provider = DirectoryProvider::new(dir.path().join("root"), Some("A")).unwrap();

        assert_eq!(provider.ids().collect::<Vec<_>>(), [&ResourceId::from("A.RQueries.Q.sql")]);
        assert_eq!(provider.text(&"A.RQueries.Q.sql".into()).unwrap(), "q");
        assert!(matches!(
            provider.text(&"A.RQueries".into()),
            Err(Error::NotFound(_))
        ));
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_query_file_is_served() {
        use std::os::unix::fs::symlink;

        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "shared/Columns.sql", b"id");
        fs::create_dir_all(dir.path().join("root/RQueries")).unwrap();
        symlink(dir.path().join("shared/Columns.sql"), dir.path().join("root/RQueries/Columns.sql")).unwrap();
        symlink(dir.path().join("shared/Gone.sql"), dir.path().join("root/RQueries/Gone.sql")).unwrap();

        let provider = DirectoryProvider::new(dir.path().join("root"), None).unwrap();
        assert_eq!(provider.ids().count(), 1);
        assert_eq!(provider.text(&"RQueries.Columns.sql".into()).unwrap(), "id");
    }

    #[cfg(unix)]
    #[test]
    fn symlink_loops_are_not_followed() {
        use std::os::unix::fs::symlink;

        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "RQueries/Q.sql", b"q");
        symlink(dir.path(), dir.path().join("RQueries/Loop")).unwrap();

        let provider = DirectoryProvider::new(dir.path(), None).unwrap();
        assert_eq!(provider.ids().collect::<Vec<_>>(), [&ResourceId::from("RQueries.Q.sql")]);
    }
}
