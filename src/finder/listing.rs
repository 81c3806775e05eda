//! -ls output formatting
//!
//! Builds a detailed listing line per entry: inode, 1K block count,
//! permission string, link count, owner, group, size, mtime and path,
//! space-padded to the conventional ls field widths.

use std::path::Path;

use chrono::{Local, TimeZone};

use super::metadata::{self, EntryMetadata};

/// rwx bit table for owner, group and other
const MODE_BITS: [(u32, char); 9] = [
    (libc::S_IRUSR as u32, 'r'),
    (libc::S_IWUSR as u32, 'w'),
    (libc::S_IXUSR as u32, 'x'),
    (libc::S_IRGRP as u32, 'r'),
    (libc::S_IWGRP as u32, 'w'),
    (libc::S_IXGRP as u32, 'x'),
    (libc::S_IROTH as u32, 'r'),
    (libc::S_IWOTH as u32, 'w'),
    (libc::S_IXOTH as u32, 'x'),
];

/// 10-character type/permission string: `d` or `-`, then rwx for
/// owner/group/other. No special-bit indicators.
pub fn permission_string(mode: u32) -> String {
    let mut out = String::with_capacity(10);
    let is_dir = mode & (libc::S_IFMT as u32) == libc::S_IFDIR as u32;
    out.push(if is_dir { 'd' } else { '-' });

    for (bit, ch) in MODE_BITS {
        out.push(if mode & bit != 0 { ch } else { '-' });
    }
    out
}

/// Fixed-width mtime: month abbreviation, space-padded day, hour:minute
fn format_mtime(secs: i64) -> String {
    Local
        .timestamp_opt(secs, 0)
        .single()
        .map(|t| t.format("%b %e %H:%M").to_string())
        .unwrap_or_default()
}

/// Format one listing line for an entry.
///
/// Owner and group fall back to the numeric id when the system databases
/// have no entry for them. Block counts are halved to approximate 1K
/// blocks from the 512-byte units the snapshot carries.
pub fn format_entry(path: &Path, meta: &EntryMetadata) -> String {
    let user = metadata::user_name(meta.uid).unwrap_or_else(|| meta.uid.to_string());
    let group = metadata::group_name(meta.gid).unwrap_or_else(|| meta.gid.to_string());

    format!(
        "{:>10}{:>7}{:>11}{:>4}{:>11}{:>11}{:>10}{:>13} {}",
        meta.ino,
        meta.blocks / 2,
        permission_string(meta.mode),
        meta.nlink,
        user,
        group,
        meta.size,
        format_mtime(meta.mtime),
        path.display()
    )
}
