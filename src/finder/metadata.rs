//! Per-entry metadata access
//!
//! This module fetches a snapshot of a filesystem entry's attributes and
//! resolves user/group ids against the system databases.

use std::ffi::{CStr, CString};
use std::fs;
use std::io;
use std::os::unix::fs::MetadataExt;
use std::path::Path;
use std::ptr;

/// Snapshot of one filesystem entry's attributes.
///
/// Fetched fresh for every visited entry; a path may change between two
/// visits, which is an accepted race rather than a consistency guarantee.
#[derive(Debug, Clone)]
pub struct EntryMetadata {
    /// Entry type, taken without following symlinks
    pub file_type: fs::FileType,
    /// Inode number
    pub ino: u64,
    /// Allocated 512-byte blocks
    pub blocks: u64,
    /// Hard link count
    pub nlink: u64,
    /// Owner user id
    pub uid: u32,
    /// Owner group id
    pub gid: u32,
    /// Size in bytes
    pub size: u64,
    /// Raw mode bits (type and permissions)
    pub mode: u32,
    /// Last modification time, seconds since the epoch
    pub mtime: i64,
}

impl EntryMetadata {
    fn from_fs(meta: &fs::Metadata) -> Self {
        Self {
            file_type: meta.file_type(),
            ino: meta.ino(),
            blocks: meta.blocks(),
            nlink: meta.nlink(),
            uid: meta.uid(),
            gid: meta.gid(),
            size: meta.size(),
            mode: meta.mode(),
            mtime: meta.mtime(),
        }
    }

    /// Whether the entry itself is a directory (a symlink to one is not)
    pub fn is_dir(&self) -> bool {
        self.file_type.is_dir()
    }
}

/// Fetch the metadata snapshot for a single entry.
///
/// Uses a non-following status call so symbolic links report as links, not
/// as their targets. The caller decides which error kinds are recoverable.
pub fn fetch(path: &Path) -> io::Result<EntryMetadata> {
    let meta = fs::symlink_metadata(path)?;
    Ok(EntryMetadata::from_fs(&meta))
}

/// Buffer size for the reentrant passwd/group calls
fn db_buf_size(key: libc::c_int) -> usize {
    match unsafe { libc::sysconf(key) } {
        n if n > 0 => n as usize,
        _ => 1024,
    }
}

/// An ERANGE answer means the record is longer than the buffer, not that
/// the entry is absent; retry with a doubled buffer up to this ceiling.
const DB_BUF_LIMIT: usize = 1 << 20;

/// Look up the user name for a uid. None if the user database has no entry.
pub fn user_name(uid: u32) -> Option<String> {
    user_name_with_buf(uid, db_buf_size(libc::_SC_GETPW_R_SIZE_MAX))
}

fn user_name_with_buf(uid: u32, initial: usize) -> Option<String> {
    let mut buf = vec![0 as libc::c_char; initial.max(1)];

    loop {
        let mut pwd: libc::passwd = unsafe { std::mem::zeroed() };
        let mut result: *mut libc::passwd = ptr::null_mut();

        let ret = unsafe {
            libc::getpwuid_r(
                uid as libc::uid_t,
                &mut pwd,
                buf.as_mut_ptr(),
                buf.len(),
                &mut result,
            )
        };
        if ret == libc::ERANGE && buf.len() < DB_BUF_LIMIT {
            buf.resize(buf.len() * 2, 0);
            continue;
        }
        if ret != 0 || result.is_null() {
            return None;
        }
        let name = unsafe { CStr::from_ptr(pwd.pw_name) };
        return Some(name.to_string_lossy().into_owned());
    }
}

/// Look up the group name for a gid. None if the group database has no entry.
pub fn group_name(gid: u32) -> Option<String> {
    group_name_with_buf(gid, db_buf_size(libc::_SC_GETGR_R_SIZE_MAX))
}

fn group_name_with_buf(gid: u32, initial: usize) -> Option<String> {
    let mut buf = vec![0 as libc::c_char; initial.max(1)];

    loop {
        let mut grp: libc::group = unsafe { std::mem::zeroed() };
        let mut result: *mut libc::group = ptr::null_mut();

        let ret = unsafe {
            libc::getgrgid_r(
                gid as libc::gid_t,
                &mut grp,
                buf.as_mut_ptr(),
                buf.len(),
                &mut result,
            )
        };
        if ret == libc::ERANGE && buf.len() < DB_BUF_LIMIT {
            buf.resize(buf.len() * 2, 0);
            continue;
        }
        if ret != 0 || result.is_null() {
            return None;
        }
        let name = unsafe { CStr::from_ptr(grp.gr_name) };
        return Some(name.to_string_lossy().into_owned());
    }
}

/// Look up the uid for a user name. None if the user database has no entry.
pub fn user_id(name: &str) -> Option<u32> {
    user_id_with_buf(name, db_buf_size(libc::_SC_GETPW_R_SIZE_MAX))
}

fn user_id_with_buf(name: &str, initial: usize) -> Option<u32> {
    let cname = CString::new(name).ok()?;
    let mut buf = vec![0 as libc::c_char; initial.max(1)];

    loop {
        let mut pwd: libc::passwd = unsafe { std::mem::zeroed() };
        let mut result: *mut libc::passwd = ptr::null_mut();

        let ret = unsafe {
            libc::getpwnam_r(
                cname.as_ptr(),
                &mut pwd,
                buf.as_mut_ptr(),
                buf.len(),
                &mut result,
            )
        };
        if ret == libc::ERANGE && buf.len() < DB_BUF_LIMIT {
            buf.resize(buf.len() * 2, 0);
            continue;
        }
        if ret != 0 || result.is_null() {
            return None;
        }
        return Some(pwd.pw_uid as u32);
    }
}
