use std::collections::{HashSet, VecDeque};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Breadth-first walk below `path`. Directory entries are visited in
/// sorted order so repeated runs see files in the same sequence.
pub fn visit<F, C>(path: &Path, excludes: &F, callback: &mut C) -> anyhow::Result<()>
where
    F: Fn(&Path) -> bool,
    C: FnMut(&Path) -> anyhow::Result<()>,
{
    let mut pending: VecDeque<PathBuf> = VecDeque::new();
    let mut visited: HashSet<PathBuf> = HashSet::new();
    pending.push_back(path.to_path_buf());

    while let Some(current) = pending.pop_front() {
        if !visited.insert(current.clone()) {
            continue;
        }
        if excludes(&current) {
            debug!(path = %current.display(), "Path excluded");
            continue;
        }
        let metadata = match fs::symlink_metadata(&current) {
            Ok(m) => m,
            Err(e) if e.kind() == io::ErrorKind::PermissionDenied => {
                debug!(path = %current.display(), "Permission denied");
                continue;
            }
            Err(e) => return Err(e.into()),
        };
        let file_type = metadata.file_type();
        if file_type.is_symlink() {
            debug!(path = %current.display(), "Symlink skipped");
            continue;
        }
        if file_type.is_file() {
            callback(&current)?;
        } else if file_type.is_dir() {
            let entries = match fs::read_dir(&current) {
                Ok(e) => e,
                Err(e) if e.kind() == io::ErrorKind::PermissionDenied => {
                    debug!(path = %current.display(), "Permission denied");
                    continue;
                }
                Err(e) => return Err(e.into()),
            };
            let mut children = Vec::new();
            for entry_res in entries {
                match entry_res {
                    Ok(e) => children.push(e.path()),
                    Err(e) if e.kind() == io::ErrorKind::PermissionDenied => {
                        debug!(path = %current.display(), "Permission denied");
                    }
                    Err(e) => return Err(e.into()),
                }
            }
            children.sort();
            pending.extend(children);
        }
    }

    Ok(())
}

/// Every `.java` file below `root` whose path relative to `root` is not
/// rejected by `excluded`.
pub fn collect_java_files<F>(root: &Path, excluded: F) -> anyhow::Result<Vec<PathBuf>>
where
    F: Fn(&Path) -> bool,
{
    let mut files = Vec::new();
    let excludes = |p: &Path| {
        let rel = p.strip_prefix(root).unwrap_or(p);
        excluded(rel)
    };
    visit(root, &excludes, &mut |p| {
        if p.extension().and_then(|e| e.to_str()) == Some("java") {
            debug!(path = %p.display(), "Java file discovered");
            files.push(p.to_path_buf());
        }
        Ok(())
    })?;
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::{collect_java_files, visit};
    use std::collections::BTreeSet;
    use std::fs::{self};
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    #[test]
    fn visits_nested_directories() {
        let tmp = TempDir::new().unwrap();
        let base = tmp.path();
        fs::create_dir_all(base.join("a/b")).unwrap();
        fs::write(base.join("root.txt"), b"").unwrap();
        fs::write(base.join("a/file.txt"), b"").unwrap();
        fs::write(base.join("a/b/leaf.txt"), b"").unwrap();

        let mut seen = BTreeSet::new();
        let mut cb = |p: &Path| {
            seen.insert(p.strip_prefix(base).unwrap().to_path_buf());
            Ok(())
        };
        visit(base, &|_| false, &mut cb).unwrap();

        let expected: BTreeSet<PathBuf> = [
            PathBuf::from("root.txt"),
            PathBuf::from("a/file.txt"),
            PathBuf::from("a/b/leaf.txt"),
        ]
        .into_iter()
        .collect();

        assert_eq!(seen, expected);
    }

    #[test]
    fn visit_order_is_sorted_breadth_first() {
        let tmp = TempDir::new().unwrap();
        let base = tmp.path();
        fs::create_dir_all(base.join("b")).unwrap();
        fs::write(base.join("z.txt"), b"").unwrap();
        fs::write(base.join("a.txt"), b"").unwrap();
        fs::write(base.join("b/c.txt"), b"").unwrap();

        let mut seen = Vec::new();
        visit(base, &|_| false, &mut |p: &Path| {
            seen.push(p.strip_prefix(base).unwrap().to_path_buf());
            Ok(())
        })
        .unwrap();
        assert_eq!(
            seen,
            vec![
                PathBuf::from("a.txt"),
                PathBuf::from("z.txt"),
                PathBuf::from("b/c.txt")
            ]
        );
    }

    #[test]
    fn collects_only_java_outside_exclusions() {
        let tmp = TempDir::new().unwrap();
        let base = tmp.path();
        fs::create_dir_all(base.join("src/main")).unwrap();
        fs::create_dir_all(base.join("src/test")).unwrap();
        fs::write(base.join("src/main/A.java"), b"class A {}").unwrap();
        fs::write(base.join("src/main/notes.md"), b"").unwrap();
        fs::write(base.join("src/test/ATest.java"), b"class ATest {}").unwrap();

        let files = collect_java_files(base, |rel| {
            rel.components().any(|c| c.as_os_str() == "test")
        })
        .unwrap();
        assert_eq!(files, vec![base.join("src/main/A.java")]);
    }

    #[cfg(unix)]
    #[test]
    fn terminates_on_symlink_loop() {
        use std::os::unix::fs as unix_fs;

        let tmp = TempDir::new().unwrap();
        let base = tmp.path();
        fs::create_dir_all(base.join("a")).unwrap();
        fs::write(base.join("root.txt"), b"").unwrap();
        fs::write(base.join("a/file.txt"), b"").unwrap();
        unix_fs::symlink(base, base.join("a/loop")).unwrap();

        let mut seen = BTreeSet::new();
        let mut cb = |p: &Path| {
            seen.insert(p.strip_prefix(base).unwrap().to_path_buf());
            Ok(())
        };
        visit(base, &|_| false, &mut cb).unwrap();

        let expected: BTreeSet<PathBuf> = [PathBuf::from("root.txt"), PathBuf::from("a/file.txt")]
            .into_iter()
            .collect();

        assert_eq!(seen, expected);
    }
}
