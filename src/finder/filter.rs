//! Predicate steps
//!
//! This module provides the boolean tests an entry's metadata is matched
//! against: owner, name pattern and entry type. Predicates are pure; the
//! arguments they close over are validated once at parse time.

use std::os::unix::fs::FileTypeExt;
use std::path::Path;

use glob::Pattern;

use super::metadata::{self, EntryMetadata};
use crate::errors::{FindError, FindResult};

/// Entry types selectable with -type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    /// Block device (b)
    BlockDevice,
    /// Character device (c)
    CharDevice,
    /// Directory (d)
    Directory,
    /// FIFO (p)
    Fifo,
    /// Regular file (f)
    Regular,
    /// Symbolic link (l)
    Symlink,
    /// Socket (s)
    Socket,
}

impl FileType {
    /// Parse a -type argument. Anything but a single character from the
    /// fixed set `b c d p f l s` is rejected.
    pub fn from_code(code: &str) -> FindResult<Self> {
        match code {
            "b" => Ok(FileType::BlockDevice),
            "c" => Ok(FileType::CharDevice),
            "d" => Ok(FileType::Directory),
            "p" => Ok(FileType::Fifo),
            "f" => Ok(FileType::Regular),
            "l" => Ok(FileType::Symlink),
            "s" => Ok(FileType::Socket),
            _ => Err(FindError::InvalidFileType(code.to_string())),
        }
    }

    /// Check the entry's (non-following) type against this code
    pub fn matches(&self, meta: &EntryMetadata) -> bool {
        let ft = &meta.file_type;
        match self {
            FileType::BlockDevice => ft.is_block_device(),
            FileType::CharDevice => ft.is_char_device(),
            FileType::Directory => ft.is_dir(),
            FileType::Fifo => ft.is_fifo(),
            FileType::Regular => ft.is_file(),
            FileType::Symlink => ft.is_symlink(),
            FileType::Socket => ft.is_socket(),
        }
    }
}

/// Resolve a -user argument to a uid.
///
/// A purely numeric argument is taken as a uid (including 0); anything else
/// is looked up in the user database, and an unknown name is fatal so the
/// run aborts before any traversal output.
pub fn resolve_user(arg: &str) -> FindResult<u32> {
    if !arg.is_empty() && arg.chars().all(|c| c.is_ascii_digit()) {
        return arg
            .parse::<u32>()
            .map_err(|_| FindError::InvalidUserId(arg.to_string()));
    }

    metadata::user_id(arg).ok_or_else(|| FindError::UnknownUser(arg.to_string()))
}

/// Check whether the entry is owned by the given uid
pub fn matches_owner(uid: u32, meta: &EntryMetadata) -> bool {
    meta.uid == uid
}

/// Match a glob pattern against the final path component only.
///
/// `*.txt` matches `a/b/note.txt` but not `note.txt/a`. Matching is
/// case-sensitive and backslash is an ordinary character.
pub fn matches_name(pattern: &Pattern, path: &Path) -> bool {
    let base = path.file_name().unwrap_or_else(|| path.as_os_str());
    pattern.matches(&base.to_string_lossy())
}
