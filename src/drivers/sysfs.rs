//! Locating Sense HAT devices by driver name.
//!
//! Device numbers (`fb1`, `event3`, `iio:device2`) depend on probe order, so
//! every driver looks its node up by the `name` attribute the kernel
//! publishes instead of hard-coding a path.
//!
//! | device     | directory                  | entry prefix  | name file      |
//! |------------|----------------------------|---------------|----------------|
//! | LED matrix | `sys/class/graphics`       | `fb`          | `name`         |
//! | joystick   | `sys/class/input`          | `event`       | `device/name`  |
//! | sensors    | `sys/bus/iio/devices`      | `iio:device`  | `name`         |

use std::fs;
use std::path::{Path, PathBuf};

use log::trace;

/// Filesystem root all device paths are resolved against. `/` on the Pi;
/// a scratch directory in tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SysfsRoot {
    root: PathBuf,
}

impl Default for SysfsRoot {
    fn default() -> Self {
        Self::new("/")
    }
}

impl SysfsRoot {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// `rel` resolved under the root. A leading `/` is ignored.
    pub fn path(&self, rel: &str) -> PathBuf {
        self.root.join(rel.trim_start_matches('/'))
    }

    /// First entry of `dir` whose name starts with `prefix` and whose
    /// `name_file` contains exactly `wanted`. Entries are tried in sorted
    /// order; unreadable ones are skipped.
    pub fn find_device(
        &self,
        dir: &str,
        prefix: &str,
        name_file: &str,
        wanted: &str,
    ) -> Option<PathBuf> {
        let dir = self.path(dir);
        let mut entries: Vec<PathBuf> = fs::read_dir(&dir)
            .ok()?
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().starts_with(prefix))
            .map(|e| e.path())
            .collect();
        entries.sort();

        entries.into_iter().find(|entry| {
            let name = read_trimmed(&entry.join(name_file));
            trace!("{} -> {name:?}", entry.display());
            name.as_deref() == Some(wanted)
        })
    }
}

/// Read a small text attribute, without surrounding whitespace.
pub fn read_trimmed(path: &Path) -> Option<String> {
    fs::read_to_string(path).ok().map(|s| s.trim().to_string())
}
