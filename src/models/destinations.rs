use camino::{Utf8Path, Utf8PathBuf};
use std::fs::{File, OpenOptions};
use std::io::{self, Write};

/// How a destination file is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenMode {
    /// Truncate any existing contents.
    Write,
    /// Keep existing contents and add to the end.
    Append,
}

impl OpenMode {
    fn open(self, path: &Utf8Path) -> io::Result<File> {
        match self {
            OpenMode::Write => File::create(path),
            OpenMode::Append => OpenOptions::new().create(true).append(true).open(path),
        }
    }
}

/// An opened file destination (game output, duplicates).
#[derive(Debug)]
pub struct OutputTarget {
    path: Utf8PathBuf,
    mode: OpenMode,
    file: File,
}

impl OutputTarget {
    pub fn open(path: &Utf8Path, mode: OpenMode) -> io::Result<Self> {
        let file = mode.open(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            mode,
            file,
        })
    }

    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Whether the file was truncated or appended to; read by the output stage.
    pub fn mode(&self) -> OpenMode {
        self.mode
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.file.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

/// Where user-facing diagnostics are written. Defaults to stderr.
#[derive(Debug, Default)]
pub enum LogTarget {
    #[default]
    Stderr,
    File(OutputTarget),
}

impl LogTarget {
    pub fn path(&self) -> Option<&Utf8Path> {
        match self {
            LogTarget::Stderr => None,
            LogTarget::File(target) => Some(target.path()),
        }
    }
}

impl Write for LogTarget {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            LogTarget::Stderr => io::stderr().write(buf),
            LogTarget::File(target) => target.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            LogTarget::Stderr => io::stderr().flush(),
            LogTarget::File(target) => target.flush(),
        }
    }
}

/// Destination for games that matched nothing (`-n`).
#[derive(Debug)]
pub enum NonMatchingTarget {
    Stdout,
    File(OutputTarget),
}

impl NonMatchingTarget {
    pub fn path(&self) -> Option<&Utf8Path> {
        match self {
            NonMatchingTarget::Stdout => None,
            NonMatchingTarget::File(target) => Some(target.path()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn temp_path(dir: &TempDir, name: &str) -> Utf8PathBuf {
        Utf8PathBuf::try_from(dir.path().join(name)).unwrap()
    }

    #[test]
    fn test_write_mode_truncates() {
        let dir = TempDir::new().unwrap();
        let path = temp_path(&dir, "out.pgn");
        fs::write(&path, "old contents").unwrap();

        let mut target = OutputTarget::open(&path, OpenMode::Write).unwrap();
        write!(target, "new").unwrap();
        drop(target);

        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
    }

    #[test]
    fn test_append_mode_keeps_contents() {
        let dir = TempDir::new().unwrap();
        let path = temp_path(&dir, "log.txt");
        fs::write(&path, "first\n").unwrap();

        let mut target = OutputTarget::open(&path, OpenMode::Append).unwrap();
        write!(target, "second\n").unwrap();
        drop(target);

        assert_eq!(fs::read_to_string(&path).unwrap(), "first\nsecond\n");
        assert_eq!(
            OutputTarget::open(&path, OpenMode::Append).unwrap().mode(),
            OpenMode::Append
        );
    }

    #[test]
    fn test_log_target_defaults_to_stderr() {
        let target = LogTarget::default();
        assert!(target.path().is_none());
    }
}
