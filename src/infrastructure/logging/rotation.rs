//! Size-rotated JSON lines sink
//!
//! Appends one serialized [`LogEvent`] per line to a single current file.
//! Once the current file grows past `max_file_size_bytes` it is renamed to
//! `<file>.<n>` (with `n` increasing for every rotation) and a fresh file takes
//! its place. At most `max_retained_files` archives are kept; the
//! lowest-numbered archive is deleted first.

use std::collections::VecDeque;
use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::{debug, info, warn};

use crate::domain::errors::SinkError;
use crate::domain::models::{LogEvent, SinkConfig};

/// Rotation thresholds for a [`RotatingFileSink`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationSettings {
    /// Maximum size in bytes the current file may exceed before rotation
    pub max_file_size_bytes: u64,
    /// Maximum number of archived files kept on disk
    pub max_retained_files: usize,
    /// Request `sync_data` after every line
    pub sync_on_write: bool,
}

impl Default for RotationSettings {
    fn default() -> Self {
        Self::from(&SinkConfig::default())
    }
}

impl From<&SinkConfig> for RotationSettings {
    fn from(config: &SinkConfig) -> Self {
        Self {
            max_file_size_bytes: config.max_file_size_bytes,
            max_retained_files: config.max_retained_files,
            sync_on_write: config.sync_on_write,
        }
    }
}

#[derive(Debug)]
struct RotationState {
    /// `None` after a failed rotation; the next write reopens.
    file: Option<File>,
    current_size: u64,
    /// Archive suffixes on disk, oldest first.
    archives: VecDeque<u64>,
    next_suffix: u64,
}

/// Append-only JSON lines writer with size rotation and bounded retention.
///
/// All bookkeeping lives behind one mutex, so the size check, the append and
/// any rotation it triggers happen atomically with respect to other writers.
#[derive(Debug)]
pub struct RotatingFileSink {
    path: PathBuf,
    settings: RotationSettings,
    state: Mutex<RotationState>,
}

impl RotatingFileSink {
    /// Open (or create) the sink at `path`.
    ///
    /// Creates the parent directory if needed, opens the file in append mode,
    /// and adopts any archives already next to it, pruning them to the
    /// retention limit.
    pub fn open(path: impl AsRef<Path>, settings: RotationSettings) -> Result<Self, SinkError> {
        let path = path.as_ref().to_path_buf();

        let (file, current_size) = open_current(&path)?;
        let mut archives = scan_archives(&path)?;
        let next_suffix = archives.back().map_or(1, |last| last + 1);
        prune_archives(&path, &mut archives, settings.max_retained_files)?;

        debug!(
            path = %path.display(),
            size = current_size,
            archives = archives.len(),
            max_size = settings.max_file_size_bytes,
            "opened rotating log sink"
        );

        Ok(Self {
            path,
            settings,
            state: Mutex::new(RotationState {
                file: Some(file),
                current_size,
                archives,
                next_suffix,
            }),
        })
    }

    /// Append `event` as one JSON line, rotating afterwards if the file grew
    /// past the size threshold.
    ///
    /// A failure during that rotation comes back as
    /// [`SinkError::RotationAfterWrite`]: the line itself is on disk.
    pub fn write(&self, event: &LogEvent) -> Result<(), SinkError> {
        let line = event.to_json_line()?;

        let mut state = self.state.lock().map_err(|_| SinkError::Poisoned)?;
        self.append(&mut state, line.as_bytes())?;

        if state.current_size > self.settings.max_file_size_bytes {
            self.rotate(&mut state)
                .map_err(|e| SinkError::RotationAfterWrite(Box::new(e)))?;
        }

        Ok(())
    }

    /// Path of the current (non-archived) file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Rotation thresholds this sink was opened with.
    pub const fn settings(&self) -> RotationSettings {
        self.settings
    }

    /// Bytes written to the current file so far.
    pub fn current_size(&self) -> Result<u64, SinkError> {
        let state = self.state.lock().map_err(|_| SinkError::Poisoned)?;
        Ok(state.current_size)
    }

    /// Paths of the retained archives, oldest first.
    pub fn archived_files(&self) -> Result<Vec<PathBuf>, SinkError> {
        let state = self.state.lock().map_err(|_| SinkError::Poisoned)?;
        Ok(state
            .archives
            .iter()
            .map(|suffix| archive_path(&self.path, *suffix))
            .collect())
    }

    fn append(&self, state: &mut RotationState, bytes: &[u8]) -> Result<(), SinkError> {
        let mut file = match state.file.take() {
            Some(file) => file,
            None => {
                let (file, size) = open_current(&self.path)?;
                warn!(path = %self.path.display(), "reopened log file after lost handle");
                state.current_size = size;
                file
            }
        };

        if let Err(source) = file.write_all(bytes).and_then(|()| file.flush()) {
            self.discard_partial(state, file);
            return Err(SinkError::Write {
                path: self.path.clone(),
                source,
            });
        }

        if self.settings.sync_on_write {
            if let Err(e) = file.sync_data() {
                warn!(error = %e, path = %self.path.display(), "failed to sync log file");
            }
        }
        state.file = Some(file);
        state.current_size += bytes.len() as u64;

        Ok(())
    }

    /// Cut a torn line off the end of the file so the next append starts on
    /// a line boundary. If truncation fails the handle is dropped and the
    /// next write reopens the file.
    fn discard_partial(&self, state: &mut RotationState, file: File) {
        match file.set_len(state.current_size) {
            Ok(()) => state.file = Some(file),
            Err(e) => warn!(
                error = %e,
                path = %self.path.display(),
                size = state.current_size,
                "failed to truncate partial line, reopening on next write"
            ),
        }
    }

    fn rotate(&self, state: &mut RotationState) -> Result<(), SinkError> {
        // Close before renaming so the rename also works where open files are locked.
        drop(state.file.take());

        let suffix = state.next_suffix;
        let archived = archive_path(&self.path, suffix);
        fs::rename(&self.path, &archived).map_err(|source| SinkError::Rotate {
            from: self.path.clone(),
            to: archived.clone(),
            source,
        })?;

        state.next_suffix += 1;
        state.archives.push_back(suffix);

        info!(
            old_path = %self.path.display(),
            new_path = %archived.display(),
            size = state.current_size,
            "rotated log file"
        );

        let (file, size) = open_current(&self.path)?;
        state.file = Some(file);
        state.current_size = size;

        prune_archives(&self.path, &mut state.archives, self.settings.max_retained_files)
    }
}

/// Archive name for rotation number `suffix`: `<path>.<suffix>`.
pub fn archive_path(path: &Path, suffix: u64) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(format!(".{suffix}"));
    PathBuf::from(name)
}

fn log_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

fn open_current(path: &Path) -> Result<(File, u64), SinkError> {
    let dir = log_dir(path);
    fs::create_dir_all(dir).map_err(|source| SinkError::CreateDirectory {
        path: dir.to_path_buf(),
        source,
    })?;

    let open_error = |source| SinkError::Open {
        path: path.to_path_buf(),
        source,
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(open_error)?;
    let size = file.metadata().map_err(open_error)?.len();

    Ok((file, size))
}

/// Find `<file>.<n>` archives next to `path`, sorted oldest first.
fn scan_archives(path: &Path) -> Result<VecDeque<u64>, SinkError> {
    let dir = log_dir(path);
    let scan_error = |source| SinkError::ScanArchives {
        dir: dir.to_path_buf(),
        source,
    };

    let Some(file_name) = path.file_name().and_then(|name| name.to_str()) else {
        return Ok(VecDeque::new());
    };
    let prefix = format!("{file_name}.");

    let mut suffixes = Vec::new();
    for entry in fs::read_dir(dir).map_err(scan_error)? {
        let entry = entry.map_err(scan_error)?;
        if !entry.file_type().map_err(scan_error)?.is_file() {
            continue;
        }

        let name = entry.file_name();
        // Only canonical suffixes: `.01` or `.+1` would map to a different file.
        let suffix = name
            .to_str()
            .and_then(|name| name.strip_prefix(&prefix))
            .and_then(|rest| {
                rest.parse::<u64>()
                    .ok()
                    .filter(|suffix| suffix.to_string() == rest)
            });
        if let Some(suffix) = suffix {
            suffixes.push(suffix);
        }
    }

    suffixes.sort_unstable();
    Ok(suffixes.into())
}

fn prune_archives(
    path: &Path,
    archives: &mut VecDeque<u64>,
    max_retained: usize,
) -> Result<(), SinkError> {
    while archives.len() > max_retained {
        let Some(oldest) = archives.pop_front() else {
            break;
        };
        let archived = archive_path(path, oldest);

        match fs::remove_file(&archived) {
            Ok(()) => info!(path = %archived.display(), "deleted archived log file"),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %archived.display(), "archived log file already gone");
            }
            Err(source) => {
                archives.push_front(oldest);
                return Err(SinkError::RemoveArchive {
                    path: archived,
                    source,
                });
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::ContextRecord;
    use tempfile::TempDir;

    fn settings(max_file_size_bytes: u64, max_retained_files: usize) -> RotationSettings {
        RotationSettings {
            max_file_size_bytes,
            max_retained_files,
            sync_on_write: false,
        }
    }

    fn event(message: &str) -> LogEvent {
        LogEvent::information(message, ContextRecord::default())
    }

    #[test]
    fn test_open_creates_directory_and_file() {
        let temp_dir = TempDir::new().unwrap();
        let log_path = temp_dir.path().join("logs/nested/full_log.log");

        let sink = RotatingFileSink::open(&log_path, RotationSettings::default()).unwrap();

        assert!(log_path.exists());
        assert_eq!(sink.path(), log_path);
        assert_eq!(sink.current_size().unwrap(), 0);
    }

    #[test]
    fn test_open_seeds_size_from_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let log_path = temp_dir.path().join("full_log.log");
        fs::write(&log_path, b"{\"existing\":true}\n").unwrap();

        let sink = RotatingFileSink::open(&log_path, RotationSettings::default()).unwrap();
        assert_eq!(sink.current_size().unwrap(), 18);
    }

    #[test]
    fn test_write_tracks_size() {
        let temp_dir = TempDir::new().unwrap();
        let log_path = temp_dir.path().join("full_log.log");
        let sink = RotatingFileSink::open(&log_path, RotationSettings::default()).unwrap();

        sink.write(&event("one")).unwrap();
        sink.write(&event("two")).unwrap();

        let on_disk = fs::metadata(&log_path).unwrap().len();
        assert_eq!(sink.current_size().unwrap(), on_disk);
        assert_eq!(fs::read_to_string(&log_path).unwrap().lines().count(), 2);
    }

    #[test]
    fn test_no_rotation_at_exact_threshold() {
        let temp_dir = TempDir::new().unwrap();
        let log_path = temp_dir.path().join("full_log.log");
        let event = event("x");
        let line_len = event.to_json_line().unwrap().len() as u64;

        let sink = RotatingFileSink::open(&log_path, settings(line_len, 20)).unwrap();
        sink.write(&event).unwrap();

        assert!(sink.archived_files().unwrap().is_empty());
        assert!(!archive_path(&log_path, 1).exists());
    }

    #[test]
    fn test_rotation_renames_with_increasing_suffix() {
        let temp_dir = TempDir::new().unwrap();
        let log_path = temp_dir.path().join("full_log.log");
        let sink = RotatingFileSink::open(&log_path, settings(1, 20)).unwrap();

        sink.write(&event("first")).unwrap();
        sink.write(&event("second")).unwrap();

        assert_eq!(
            sink.archived_files().unwrap(),
            vec![archive_path(&log_path, 1), archive_path(&log_path, 2)]
        );
        assert!(fs::read_to_string(archive_path(&log_path, 1))
            .unwrap()
            .contains("\"first\""));
        assert!(fs::read_to_string(archive_path(&log_path, 2))
            .unwrap()
            .contains("\"second\""));
        assert_eq!(fs::metadata(&log_path).unwrap().len(), 0);
        assert_eq!(sink.current_size().unwrap(), 0);
    }

    #[test]
    fn test_retention_deletes_oldest_archive() {
        let temp_dir = TempDir::new().unwrap();
        let log_path = temp_dir.path().join("full_log.log");
        let sink = RotatingFileSink::open(&log_path, settings(1, 2)).unwrap();

        for i in 0..3 {
            sink.write(&event(&format!("event {i}"))).unwrap();
        }

        assert!(!archive_path(&log_path, 1).exists());
        assert!(archive_path(&log_path, 2).exists());
        assert!(archive_path(&log_path, 3).exists());
        assert_eq!(sink.archived_files().unwrap().len(), 2);
    }

    #[test]
    fn test_zero_retention_keeps_no_archives() {
        let temp_dir = TempDir::new().unwrap();
        let log_path = temp_dir.path().join("full_log.log");
        let sink = RotatingFileSink::open(&log_path, settings(1, 0)).unwrap();

        sink.write(&event("gone")).unwrap();

        assert!(!archive_path(&log_path, 1).exists());
        assert!(log_path.exists());
    }

    #[test]
    fn test_reopen_adopts_existing_archives() {
        let temp_dir = TempDir::new().unwrap();
        let log_path = temp_dir.path().join("full_log.log");
        fs::write(archive_path(&log_path, 4), b"old\n").unwrap();
        fs::write(archive_path(&log_path, 7), b"older\n").unwrap();
        fs::write(temp_dir.path().join("full_log.log.bak"), b"ignored").unwrap();
        fs::write(temp_dir.path().join("other.log.1"), b"ignored").unwrap();

        let sink = RotatingFileSink::open(&log_path, settings(1, 20)).unwrap();
        assert_eq!(
            sink.archived_files().unwrap(),
            vec![archive_path(&log_path, 4), archive_path(&log_path, 7)]
        );

        sink.write(&event("next")).unwrap();
        assert!(archive_path(&log_path, 8).exists());
    }

    #[test]
    fn test_reopen_prunes_excess_archives() {
        let temp_dir = TempDir::new().unwrap();
        let log_path = temp_dir.path().join("full_log.log");
        for suffix in 1..=5 {
            fs::write(archive_path(&log_path, suffix), b"x\n").unwrap();
        }

        let sink = RotatingFileSink::open(&log_path, settings(1024, 3)).unwrap();

        assert!(!archive_path(&log_path, 1).exists());
        assert!(!archive_path(&log_path, 2).exists());
        assert_eq!(sink.archived_files().unwrap().len(), 3);
    }

    #[test]
    fn test_reopen_ignores_non_canonical_suffixes() {
        let temp_dir = TempDir::new().unwrap();
        let log_path = temp_dir.path().join("full_log.log");
        for name in ["full_log.log.01", "full_log.log.02", "full_log.log.+3"] {
            fs::write(temp_dir.path().join(name), b"x\n").unwrap();
        }

        let sink = RotatingFileSink::open(&log_path, settings(1, 1)).unwrap();
        assert!(sink.archived_files().unwrap().is_empty());

        sink.write(&event("first")).unwrap();
        assert_eq!(sink.archived_files().unwrap(), vec![archive_path(&log_path, 1)]);
        assert!(archive_path(&log_path, 1).exists());
        assert!(temp_dir.path().join("full_log.log.01").exists());
    }

    #[test]
    fn test_discard_partial_truncates_torn_line() {
        let temp_dir = TempDir::new().unwrap();
        let log_path = temp_dir.path().join("full_log.log");
        let sink = RotatingFileSink::open(&log_path, RotationSettings::default()).unwrap();
        sink.write(&event("whole")).unwrap();
        let whole = fs::read(&log_path).unwrap();

        // Bytes of a line whose write failed midway; never counted in the size.
        OpenOptions::new()
            .append(true)
            .open(&log_path)
            .unwrap()
            .write_all(b"{\"timestamp\":\"20")
            .unwrap();
        {
            let mut state = sink.state.lock().unwrap();
            let file = state.file.take().unwrap();
            sink.discard_partial(&mut state, file);
            assert!(state.file.is_some());
        }
        assert_eq!(fs::read(&log_path).unwrap(), whole);

        sink.write(&event("next")).unwrap();
        let contents = fs::read_to_string(&log_path).unwrap();
        for line in contents.lines() {
            assert!(serde_json::from_str::<serde_json::Value>(line).is_ok());
        }
        assert_eq!(contents.lines().count(), 2);
        assert_eq!(sink.current_size().unwrap(), fs::metadata(&log_path).unwrap().len());
    }

    #[test]
    fn test_sync_on_write_appends_and_counts() {
        let temp_dir = TempDir::new().unwrap();
        let log_path = temp_dir.path().join("full_log.log");
        let sink = RotatingFileSink::open(
            &log_path,
            RotationSettings {
                sync_on_write: true,
                ..settings(1024 * 1024, 20)
            },
        )
        .unwrap();

        for i in 0..3 {
            sink.write(&event(&format!("synced {i}"))).unwrap();
        }

        let contents = fs::read_to_string(&log_path).unwrap();
        assert_eq!(contents.lines().count(), 3);
        assert!(contents.contains("\"synced 2\""));
        assert_eq!(sink.current_size().unwrap(), contents.len() as u64);
    }

    #[cfg(unix)]
    #[test]
    fn test_failed_rotation_reports_persisted_event() {
        let temp_dir = TempDir::new().unwrap();
        let log_path = temp_dir.path().join("full_log.log");
        let blocker = archive_path(&log_path, 1);
        fs::create_dir_all(&blocker).unwrap();
        fs::write(blocker.join("keep"), b"x").unwrap();
        let sink = RotatingFileSink::open(&log_path, settings(1, 20)).unwrap();

        let err = sink.write(&event("kept")).unwrap_err();

        assert!(err.event_persisted());
        assert!(matches!(
            &err,
            SinkError::RotationAfterWrite(inner) if matches!(**inner, SinkError::Rotate { .. })
        ));
        assert!(fs::read_to_string(&log_path).unwrap().contains("\"kept\""));
    }

    #[test]
    fn test_archive_path_appends_suffix() {
        let path = Path::new("/diag/logs/full_log.log");
        assert_eq!(
            archive_path(path, 12),
            PathBuf::from("/diag/logs/full_log.log.12")
        );
    }

    #[test]
    fn test_settings_from_sink_config() {
        let config = SinkConfig {
            max_file_size_bytes: 4096,
            max_retained_files: 3,
            sync_on_write: true,
            ..SinkConfig::default()
        };
        let settings = RotationSettings::from(&config);
        assert_eq!(settings.max_file_size_bytes, 4096);
        assert_eq!(settings.max_retained_files, 3);
        assert!(settings.sync_on_write);
    }
}
