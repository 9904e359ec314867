// Memory directory creation and create-if-absent file writing

use crate::error::{SetupError, SetupResult};
use crate::templates::MemoryFile;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::Path;
use tracing::{debug, info, warn};

/// Outcome of one scaffold pass
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ScaffoldReport {
    pub created: Vec<String>,
    pub skipped: Vec<String>,
}

/// Create `dir` and any missing parents. Returns `true` if it did not exist before.
pub fn ensure_dir(dir: &Path) -> SetupResult<bool> {
    if dir.is_dir() {
        return Ok(false);
    }
    fs::create_dir_all(dir)
        .map_err(|e| SetupError::io(format!("Failed to create directory {}", dir.display()), e))?;
    Ok(true)
}

/// Write a file only if it does not exist yet.
///
/// Uses an exclusive-create open so the existence check and the create are one
/// filesystem operation. Returns `false` when the file was already there.
pub fn write_if_absent(path: &Path, contents: &str) -> SetupResult<bool> {
    let mut file = match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::AlreadyExists => return Ok(false),
        Err(e) => {
            return Err(SetupError::io(format!("Failed to create {}", path.display()), e));
        }
    };

    fill_new_file(path, &mut file, contents)?;
    Ok(true)
}

/// Write `contents` into a file this run just created. On failure the partial
/// file is removed so a later run does not skip it as already present.
fn fill_new_file<W: Write>(path: &Path, writer: &mut W, contents: &str) -> SetupResult<()> {
    if let Err(e) = writer.write_all(contents.as_bytes()).and_then(|_| writer.flush()) {
        if let Err(remove_err) = fs::remove_file(path) {
            warn!("Could not remove partial file {}: {}", path.display(), remove_err);
        }
        return Err(SetupError::io(format!("Failed to write {}", path.display()), e));
    }
    Ok(())
}

/// Write every file into `dir`, skipping the ones already present.
///
/// Stops at the first I/O error; files written before it stay on disk.
pub fn scaffold(dir: &Path, files: &[MemoryFile]) -> SetupResult<ScaffoldReport> {
    let mut report = ScaffoldReport::default();

    for file in files {
        let path = dir.join(file.name);
        if write_if_absent(&path, &file.contents)? {
            println!("✓ Created {}", file.name);
            info!("Created {}", path.display());
            report.created.push(file.name.to_string());
        } else {
            println!("⏭ Skipping {} (already exists)", file.name);
            debug!("Skipped existing {}", path.display());
            report.skipped.push(file.name.to_string());
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn files() -> Vec<MemoryFile> {
        vec![
            MemoryFile { name: "a.json", contents: "{\n  \"x\": 1\n}".to_string() },
            MemoryFile { name: "b.md", contents: "# B\n".to_string() },
        ]
    }

    #[test]
    fn ensure_dir_creates_parents_and_is_idempotent() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("nested").join("memory");
        assert!(ensure_dir(&dir).unwrap());
        assert!(dir.is_dir());
        assert!(!ensure_dir(&dir).unwrap());
    }

    #[test]
    fn ensure_dir_fails_when_path_is_a_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("memory");
        fs::write(&path, "not a dir").unwrap();
        assert!(matches!(ensure_dir(&path), Err(SetupError::Io { .. })));
    }

    #[test]
    fn second_run_writes_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let first = scaffold(tmp.path(), &files()).unwrap();
        assert_eq!(first.created, vec!["a.json", "b.md"]);
        assert!(first.skipped.is_empty());

        let before = fs::metadata(tmp.path().join("a.json")).unwrap().modified().unwrap();

        let changed: Vec<MemoryFile> = files()
            .into_iter()
            .map(|f| MemoryFile { contents: "changed".to_string(), ..f })
            .collect();
        let second = scaffold(tmp.path(), &changed).unwrap();
        assert!(second.created.is_empty());
        assert_eq!(second.skipped, vec!["a.json", "b.md"]);

        assert_eq!(fs::read_to_string(tmp.path().join("a.json")).unwrap(), "{\n  \"x\": 1\n}");
        assert_eq!(fs::read_to_string(tmp.path().join("b.md")).unwrap(), "# B\n");
        let after = fs::metadata(tmp.path().join("a.json")).unwrap().modified().unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn existing_file_is_left_alone() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("b.md"), "mine").unwrap();

        let report = scaffold(tmp.path(), &files()).unwrap();
        assert_eq!(report.created, vec!["a.json"]);
        assert_eq!(report.skipped, vec!["b.md"]);
        assert_eq!(fs::read_to_string(tmp.path().join("b.md")).unwrap(), "mine");
    }

    #[test]
    fn concurrent_writers_create_the_file_once() {
        use std::sync::{Arc, Barrier};
        use std::thread;

        const WRITERS: usize = 8;
        let tmp = tempfile::tempdir().unwrap();
        let path = Arc::new(tmp.path().join("race.json"));
        let barrier = Arc::new(Barrier::new(WRITERS));

        let handles: Vec<_> = (0..WRITERS)
            .map(|i| {
                let path = path.clone();
                let barrier = barrier.clone();
                thread::spawn(move || {
                    let contents = format!("writer {}", i);
                    barrier.wait();
                    (write_if_absent(&path, &contents).unwrap(), contents)
                })
            })
            .collect();

        let results: Vec<(bool, String)> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        let winners: Vec<&String> = results.iter().filter(|(won, _)| *won).map(|(_, c)| c).collect();
        assert_eq!(winners.len(), 1);
        assert_eq!(&fs::read_to_string(path.as_path()).unwrap(), winners[0]);
    }

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(ErrorKind::Other, "disk full"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn failed_write_removes_partial_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("partial.json");
        fs::write(&path, "{\n  \"bal").unwrap();

        let err = fill_new_file(&path, &mut FailingWriter, "{}").unwrap_err();
        assert!(matches!(err, SetupError::Io { .. }));
        assert!(!path.exists());

        // The next run creates the file instead of skipping it.
        assert!(write_if_absent(&path, "{}").unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), "{}");
    }

    #[test]
    fn missing_directory_is_an_io_error() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("absent");
        assert!(matches!(scaffold(&dir, &files()), Err(SetupError::Io { .. })));
    }
}
