/*
This file is part of gdal_rename
Copyright (C) 2022 Novel-T

gdal_rename is free software: you can redistribute it and/or modify
it under the terms of the GNU General Public License as published by
the Free Software Foundation, either version 3 of the License, or
(at your option) any later version.

This program is distributed in the hope that it will be useful,
but WITHOUT ANY WARRANTY; without even the implied warranty of
MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
GNU General Public License for more details.

You should have received a copy of the GNU General Public License
along with this program.  If not, see <http://www.gnu.org/licenses/>.
*/
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::info;
use thiserror::Error;

pub const BACKUP_TAG: &str = "_OldOne";

#[derive(Debug, Error)]
pub enum RenameError {
    #[error("{target:?} and its backup {backup:?} both exist, not renaming")]
    Collision { target: PathBuf, backup: PathBuf },
    #[error("Could not move existing {target:?} to {backup:?}: {source}")]
    Backup {
        target: PathBuf,
        backup: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Could not rename {from:?} to {to:?}: {source}")]
    Rename {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Shell flavour of the commands printed instead of renaming
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellDialect {
    Windows,
    Unix,
}

impl ShellDialect {
    pub fn from_arg(s: &str) -> Option<ShellDialect> {
        match s.to_ascii_lowercase().as_str() {
            "win" | "windows" => Some(ShellDialect::Windows),
            "unix" => Some(ShellDialect::Unix),
            _ => None,
        }
    }

    pub fn command(&self, old: &Path, new: &Path) -> String {
        let program = match self {
            ShellDialect::Windows => "move",
            ShellDialect::Unix => "mv",
        };
        format!("{} \"{}\" \"{}\"", program, old.display(), new.display())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenameMode {
    Execute,
    Console(ShellDialect),
}

impl Default for RenameMode {
    fn default() -> Self {
        RenameMode::Execute
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenameOutcome {
    Renamed,
    /// The file already at the target was moved to this path first
    RenamedWithBackup(PathBuf),
    /// Source and target are the same file
    Unchanged,
    Command(String),
}

/// Replaces the last 4 chars of the file name (the ".ext") with "_OldOne.ext"
pub fn backup_path(target: &Path) -> PathBuf {
    let name = target
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let split = name
        .char_indices()
        .rev()
        .nth(3)
        .map(|(idx, _)| idx)
        .unwrap_or(0);

    let backup_name = format!("{}{}{}", &name[..split], BACKUP_TAG, &name[split..]);

    match target.parent() {
        Some(dir) => dir.join(backup_name),
        None => PathBuf::from(backup_name),
    }
}

fn is_same_file(a: &Path, b: &Path) -> bool {
    if a == b {
        return true;
    }
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(ca), Ok(cb)) => ca == cb,
        _ => false,
    }
}

/// Renames `old` to `new` without ever overwriting a file.
///
/// An existing `new` is moved aside to its [`backup_path`] first; if that slot is taken
/// too nothing is touched.  A failed backup leaves `old` where it is.  The two steps
/// are not atomic.
///
/// In console mode only the equivalent shell command is returned.
pub fn rename_no_overwrite(old: &Path, new: &Path, mode: RenameMode) -> Result<RenameOutcome, RenameError> {
    if let RenameMode::Console(dialect) = mode {
        return Ok(RenameOutcome::Command(dialect.command(old, new)));
    }

    if !new.exists() {
        fs::rename(old, new).map_err(|source| RenameError::Rename {
            from: old.to_path_buf(),
            to: new.to_path_buf(),
            source,
        })?;
        info!("Renamed {:?} to {:?}", old, new);
        return Ok(RenameOutcome::Renamed);
    }

    if is_same_file(old, new) {
        info!("{:?} already has the right name", old);
        return Ok(RenameOutcome::Unchanged);
    }

    let backup = backup_path(new);

    if backup.exists() {
        return Err(RenameError::Collision {
            target: new.to_path_buf(),
            backup,
        });
    }

    if let Err(source) = fs::rename(new, &backup) {
        return Err(RenameError::Backup {
            target: new.to_path_buf(),
            backup,
            source,
        });
    }
    info!("Moved existing {:?} to {:?}", new, backup);

    fs::rename(old, new).map_err(|source| RenameError::Rename {
        from: old.to_path_buf(),
        to: new.to_path_buf(),
        source,
    })?;
    info!("Renamed {:?} to {:?}", old, new);

    Ok(RenameOutcome::RenamedWithBackup(backup))
}

#[cfg(test)]
pub(crate) mod rename_tests {
    use std::fs::{create_dir_all, read_to_string, remove_dir_all, write};

    use uuid::Uuid;

    use super::*;

    /// Fresh scratch directory, removed on drop
    pub(crate) struct TempDir(pub PathBuf);

    impl TempDir {
        pub(crate) fn new() -> TempDir {
            let dir: PathBuf = [std::env::temp_dir(), PathBuf::from(format!("gdal_rename_{}", Uuid::new_v4()))]
                .iter()
                .collect();
            create_dir_all(&dir).unwrap();
            TempDir(dir)
        }

        pub(crate) fn file(&self, name: &str, content: &str) -> PathBuf {
            let p = self.0.join(name);
            write(&p, content).unwrap();
            p
        }

        pub(crate) fn path(&self, name: &str) -> PathBuf {
            self.0.join(name)
        }

        pub(crate) fn names(&self) -> Vec<String> {
            let mut names: Vec<String> = fs::read_dir(&self.0)
                .unwrap()
                .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
                .collect();
            names.sort();
            names
        }
    }

    impl Drop for TempDir {
        fn drop(&mut self) {
            let _ = remove_dir_all(&self.0);
        }
    }

    #[test]
    fn test_backup_path() {
        assert_eq!(backup_path(Path::new("/data/0621_4500.tif")), PathBuf::from("/data/0621_4500_OldOne.tif"));
        assert_eq!(backup_path(Path::new("a.prj")), PathBuf::from("a_OldOne.prj"));
        //only the last 4 chars are treated as the extension
        assert_eq!(backup_path(Path::new("a.tiff")), PathBuf::from("a._OldOnetiff"));
        assert_eq!(backup_path(Path::new("ab")), PathBuf::from("_OldOneab"));
    }

    #[test]
    fn test_rename_free_target() {
        let dir = TempDir::new();
        let old = dir.file("in.tif", "data");
        let new = dir.path("0621_4500.tif");

        let outcome = rename_no_overwrite(&old, &new, RenameMode::Execute).unwrap();

        assert_eq!(outcome, RenameOutcome::Renamed);
        assert_eq!(dir.names(), vec!["0621_4500.tif"]);
        assert_eq!(read_to_string(&new).unwrap(), "data");
    }

    #[test]
    fn test_rename_moves_existing_target_aside() {
        let dir = TempDir::new();
        let old = dir.file("in.tif", "new data");
        let new = dir.file("0621_4500.tif", "old data");

        let outcome = rename_no_overwrite(&old, &new, RenameMode::Execute).unwrap();

        let backup = dir.path("0621_4500_OldOne.tif");
        assert_eq!(outcome, RenameOutcome::RenamedWithBackup(backup.clone()));
        assert_eq!(dir.names(), vec!["0621_4500.tif", "0621_4500_OldOne.tif"]);
        assert_eq!(read_to_string(&new).unwrap(), "new data");
        assert_eq!(read_to_string(&backup).unwrap(), "old data");
    }

    #[test]
    fn test_rename_collision_touches_nothing() {
        let dir = TempDir::new();
        let old = dir.file("in.tif", "a");
        let new = dir.file("0621_4500.tif", "b");
        dir.file("0621_4500_OldOne.tif", "c");

        let err = rename_no_overwrite(&old, &new, RenameMode::Execute).unwrap_err();

        assert!(matches!(err, RenameError::Collision { .. }));
        assert_eq!(dir.names(), vec!["0621_4500.tif", "0621_4500_OldOne.tif", "in.tif"]);
        assert_eq!(read_to_string(&old).unwrap(), "a");
        assert_eq!(read_to_string(&new).unwrap(), "b");
        assert_eq!(read_to_string(dir.path("0621_4500_OldOne.tif")).unwrap(), "c");
    }

    #[cfg(unix)]
    #[test]
    fn test_failed_backup_leaves_source_in_place() {
        let dir = TempDir::new();
        let old = dir.file("in.tif", "a");
        //the backup name goes past the 255 byte file name limit
        let long_name = format!("{}.tif", "x".repeat(246));
        let new = dir.file(&long_name, "b");

        let err = rename_no_overwrite(&old, &new, RenameMode::Execute).unwrap_err();

        match err {
            RenameError::Backup { target, backup, .. } => {
                assert_eq!(target, new);
                assert_eq!(backup, backup_path(&new));
            }
            e => panic!("unexpected error {}", e),
        }
        let mut expected = vec!["in.tif".to_string(), long_name];
        expected.sort();
        assert_eq!(dir.names(), expected);
        assert_eq!(read_to_string(&old).unwrap(), "a");
        assert_eq!(read_to_string(&new).unwrap(), "b");
    }

    #[test]
    fn test_rename_missing_source() {
        let dir = TempDir::new();
        let old = dir.path("missing.prj");
        let new = dir.path("0621_4500.prj");

        let err = rename_no_overwrite(&old, &new, RenameMode::Execute).unwrap_err();

        match err {
            RenameError::Rename { from, to, .. } => {
                assert_eq!(from, old);
                assert_eq!(to, new);
            }
            e => panic!("unexpected error {}", e),
        }
        assert!(dir.names().is_empty());
    }

    #[test]
    fn test_rename_same_name() {
        let dir = TempDir::new();
        let old = dir.file("0621_4500.tif", "a");

        let outcome = rename_no_overwrite(&old, &old, RenameMode::Execute).unwrap();

        assert_eq!(outcome, RenameOutcome::Unchanged);
        assert_eq!(dir.names(), vec!["0621_4500.tif"]);
    }

    #[test]
    fn test_console_mode_never_touches_files() {
        let dir = TempDir::new();
        let old = dir.file("in.tif", "a");
        let new = dir.file("out.tif", "b");
        dir.file("out_OldOne.tif", "c");

        let unix = rename_no_overwrite(&old, &new, RenameMode::Console(ShellDialect::Unix)).unwrap();
        let win = rename_no_overwrite(&old, &new, RenameMode::Console(ShellDialect::Windows)).unwrap();

        assert_eq!(unix, RenameOutcome::Command(format!("mv \"{}\" \"{}\"", old.display(), new.display())));
        assert_eq!(win, RenameOutcome::Command(format!("move \"{}\" \"{}\"", old.display(), new.display())));
        assert_eq!(dir.names(), vec!["in.tif", "out.tif", "out_OldOne.tif"]);

        let missing = rename_no_overwrite(Path::new("a.tif"), Path::new("b.tif"), RenameMode::Console(ShellDialect::Unix)).unwrap();
        assert_eq!(missing, RenameOutcome::Command("mv \"a.tif\" \"b.tif\"".to_string()));
    }

    #[test]
    fn test_shell_dialect_from_arg() {
        assert_eq!(ShellDialect::from_arg("WIN"), Some(ShellDialect::Windows));
        assert_eq!(ShellDialect::from_arg("unix"), Some(ShellDialect::Unix));
        assert_eq!(ShellDialect::from_arg("dos"), None);
    }
}
