//! Size-rotated append-only log file.
//!
//! When writing a record would push the active file past `max_bytes`, the
//! file is renamed to `<name>.1`, older backups shift up by one, and anything
//! beyond `backup_count` is deleted. A `max_bytes` of 0 disables rotation.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tracing_subscriber::fmt::MakeWriter;

#[derive(Debug, Clone)]
pub struct RotationPolicy {
    pub max_bytes: u64,
    pub backup_count: usize,
}

#[derive(Debug)]
struct RotatingFile {
    path: PathBuf,
    policy: RotationPolicy,
    file: File,
    len: u64,
}

impl RotatingFile {
    fn open(path: PathBuf, policy: RotationPolicy) -> io::Result<Self> {
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let len = file.metadata()?.len();
        Ok(Self {
            path,
            policy,
            file,
            len,
        })
    }

    fn backup_path(&self, index: usize) -> PathBuf {
        let mut name = self.path.clone().into_os_string();
        name.push(format!(".{index}"));
        PathBuf::from(name)
    }

    fn should_rotate(&self, incoming: usize) -> bool {
        self.policy.max_bytes > 0
            && self.len > 0
            && self.len + incoming as u64 > self.policy.max_bytes
    }

    fn rotate(&mut self) -> io::Result<()> {
        self.file.flush()?;
        let count = self.policy.backup_count;
        if count > 0 {
            let oldest = self.backup_path(count);
            if oldest.exists() {
                fs::remove_file(&oldest)?;
            }
            for index in (1..count).rev() {
                let from = self.backup_path(index);
                if from.exists() {
                    fs::rename(&from, self.backup_path(index + 1))?;
                }
            }
            fs::rename(&self.path, self.backup_path(1))?;
            self.file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.path)?;
        } else {
            self.file = OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .open(&self.path)?;
        }
        self.len = 0;
        Ok(())
    }

    fn write_record(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.should_rotate(buf.len()) {
            self.rotate()?;
        }
        self.file.write_all(buf)?;
        self.len += buf.len() as u64;
        Ok(buf.len())
    }
}

/// Shareable handle to a rotating file; usable as a `tracing-subscriber`
/// writer.
#[derive(Debug, Clone)]
pub struct RotatingFileWriter {
    inner: Arc<Mutex<RotatingFile>>,
}

impl RotatingFileWriter {
    pub fn open(path: impl AsRef<Path>, policy: RotationPolicy) -> io::Result<Self> {
        let file = RotatingFile::open(path.as_ref().to_path_buf(), policy)?;
        Ok(Self {
            inner: Arc::new(Mutex::new(file)),
        })
    }

    fn lock(&self) -> io::Result<std::sync::MutexGuard<'_, RotatingFile>> {
        self.inner
            .lock()
            .map_err(|_| io::Error::other("rotating log file lock poisoned"))
    }
}

impl Write for RotatingFileWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.lock()?.write_record(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.lock()?.file.flush()
    }
}

impl<'a> MakeWriter<'a> for RotatingFileWriter {
    type Writer = RotatingFileWriter;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
