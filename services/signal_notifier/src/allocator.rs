//! Collision-safe file allocation
//!
//! Every candidate name is created with create-new semantics, so two writers
//! racing for the same name can never both get it. On "already exists" the
//! next candidate is `<stem>-<N><extension>` for N = 1, 2, 3, ...; any other
//! creation error is returned immediately.

use std::ffi::OsString;
use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use tracing::trace;

/// A freshly created, previously non-existent file reserved for the caller
#[derive(Debug)]
pub struct AllocatedFile {
    pub path: PathBuf,
    pub file: File,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct UniqueFileAllocator;

impl UniqueFileAllocator {
    pub fn new() -> Self {
        Self
    }

    /// Create a new file at `base_path`, or at a `-N` variant of it if taken.
    ///
    /// The extension is everything from the last `.` of the file name, unless
    /// that dot is the first character of the name.
    pub fn allocate(&self, base_path: &Path) -> io::Result<AllocatedFile> {
        let (stem, extension) = split_extension(base_path);
        self.allocate_with_extension(&stem, &extension)
    }

    /// Create a new file named `stem + extension`, numbering the stem on collision
    pub fn allocate_with_extension(&self, stem: &Path, extension: &str) -> io::Result<AllocatedFile> {
        let mut candidate = candidate_path(stem, None, extension);
        let mut sequence: u64 = 0;

        loop {
            match OpenOptions::new().write(true).create_new(true).open(&candidate) {
                Ok(file) => {
                    return Ok(AllocatedFile {
                        path: candidate,
                        file,
                    })
                }
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                    sequence += 1;
                    trace!("{:?} already exists, trying sequence {}", candidate, sequence);
                    candidate = candidate_path(stem, Some(sequence), extension);
                }
                Err(e) => return Err(e),
            }
        }
    }
}

fn candidate_path(stem: &Path, sequence: Option<u64>, extension: &str) -> PathBuf {
    let mut name = OsString::from(stem.as_os_str());
    if let Some(sequence) = sequence {
        name.push(format!("-{}", sequence));
    }
    name.push(extension);
    PathBuf::from(name)
}

fn split_extension(path: &Path) -> (PathBuf, String) {
    let split = path
        .file_name()
        .and_then(|name| name.to_str())
        .and_then(|name| name.rfind('.').filter(|&dot| dot > 0).map(|dot| name.split_at(dot)));

    match split {
        Some((stem, extension)) => (path.with_file_name(stem), extension.to_string()),
        None => (path.to_path_buf(), String::new()),
    }
}

/// Make a message id usable as a file name: anything outside `[A-Za-z0-9.-]` becomes `_`
pub fn sanitize_message_id(message_id: &str) -> String {
    message_id
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
