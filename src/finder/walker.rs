//! 文件系统遍历引擎
//!
//! 本模块实现两个互相递归的状态：visit_entry（对单个条目取元数据并
//! 运行管道）和 visit_directory（枚举子项并逐个递归）。过滤器只限制
//! 哪些条目触发动作，从不限制向哪些目录下降。

use std::ffi::OsStr;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use log::debug;

use super::metadata;
use super::pipeline::Pipeline;
use crate::errors::{FindError, FindResult};

/// 拼接后的条目路径允许的最大字节长度
pub const MAX_PATH_LENGTH: usize = libc::PATH_MAX as usize;

/// 拼接父路径和子项名，超出最大长度立即失败
pub(crate) fn join_path(parent: &Path, name: &OsStr) -> FindResult<PathBuf> {
    let child = parent.join(name);
    if child.as_os_str().len() >= MAX_PATH_LENGTH {
        return Err(FindError::PathTooLong(child));
    }
    Ok(child)
}

/// 深度优先、单线程的遍历器
///
/// 持有对只读管道的引用和输出目标。正常输出和可恢复错误的诊断行
/// 走同一个输出流，交错出现。
pub struct Walker<'a, W: Write> {
    pipeline: &'a Pipeline,
    out: W,
}

impl<'a, W: Write> Walker<'a, W> {
    pub fn new(pipeline: &'a Pipeline, out: W) -> Self {
        Self { pipeline, out }
    }

    /// 从起始路径开始遍历整个可达子树
    pub fn walk(&mut self, path: &Path) -> FindResult<()> {
        self.visit_entry(path)
    }

    /// 访问一个条目：取元数据、运行管道，目录则无条件下降。
    ///
    /// 元数据获取遇到权限不足时在输出流上报告并跳过该条目
    /// （不运行管道、不下降）；其余 stat 错误是致命的。
    fn visit_entry(&mut self, path: &Path) -> FindResult<()> {
        let meta = match metadata::fetch(path) {
            Ok(meta) => meta,
            Err(err) if err.kind() == io::ErrorKind::PermissionDenied => {
                writeln!(self.out, "stat(\"{}\") failed.", path.display())?;
                return Ok(());
            }
            Err(err) => {
                return Err(FindError::Stat {
                    path: path.to_path_buf(),
                    source: err,
                })
            }
        };

        self.pipeline.evaluate(path, &meta, &mut self.out)?;

        // 管道结果不影响递归：即使所有动作都被过滤掉也照样下降
        if meta.is_dir() {
            self.visit_directory(path)?;
        }

        Ok(())
    }

    /// 访问一个目录：按目录读取原语返回的顺序枚举子项并递归。
    ///
    /// 打开目录遇到权限不足时在输出流上报告并当作没有子项处理；
    /// 其余打开错误和枚举中途的错误是致命的。目录句柄（read_dir
    /// 迭代器）在本调用返回前的任何退出路径上都会被释放。
    fn visit_directory(&mut self, path: &Path) -> FindResult<()> {
        debug!("descending into {}", path.display());

        let entries = match fs::read_dir(path) {
            Ok(entries) => entries,
            Err(err) if err.kind() == io::ErrorKind::PermissionDenied => {
                writeln!(self.out, "opendir({}) failed.", path.display())?;
                return Ok(());
            }
            Err(err) => {
                return Err(FindError::OpenDir {
                    path: path.to_path_buf(),
                    source: err,
                })
            }
        };

        // read_dir 不会返回 . 和 ..，无需再过滤伪条目
        for entry in entries {
            let entry = entry.map_err(|err| FindError::ReadDir {
                path: path.to_path_buf(),
                source: err,
            })?;

            let child = join_path(path, &entry.file_name())?;
            self.visit_entry(&child)?;
        }

        Ok(())
    }
}
