//! 文件查找模块
//!
//! 这个模块提供了简化版 find 的核心功能：
//! 逐条目的元数据获取、谓词/动作管道求值，
//! 以及不受过滤结果影响的递归目录遍历。

pub mod filter;
pub mod listing;
pub mod metadata;
pub mod pipeline;
pub mod walker;

use std::io::{self, Write};
use std::path::Path;

use log::debug;

pub use self::filter::FileType;
pub use self::metadata::EntryMetadata;
pub use self::pipeline::{Pipeline, Step};
pub use self::walker::Walker;

/// 文件查找器
///
/// 持有构建好的管道并驱动遍历。管道在进程生命周期内只读，
/// 通过引用传给每一次递归调用。
#[derive(Debug)]
pub struct Finder {
    pipeline: Pipeline,
}

impl Finder {
    /// 用构建好的管道创建查找器实例
    pub fn new(pipeline: Pipeline) -> Self {
        Self { pipeline }
    }

    /// 从起始路径遍历并把结果写到标准输出
    pub fn run<P: AsRef<Path>>(&self, path: P) -> crate::errors::FindResult<()> {
        let stdout = io::stdout();
        self.run_with_output(path, stdout.lock())
    }

    /// 同 run，但写到任意输出目标（测试用）
    pub fn run_with_output<P: AsRef<Path>, W: Write>(
        &self,
        path: P,
        out: W,
    ) -> crate::errors::FindResult<()> {
        let path = path.as_ref();
        debug!(
            "starting traversal at {} with {} pipeline steps",
            path.display(),
            self.pipeline.len()
        );

        let mut walker = Walker::new(&self.pipeline, out);
        walker.walk(path)
    }
}
