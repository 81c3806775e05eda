//! 简化版 find 命令实现库
//!
//! 本库实现了 Unix find 的一个子集，支持：
//! - 递归目录遍历（过滤结果从不阻止向子目录下降）
//! - 按参数顺序求值的谓词/动作管道
//! - 按属主、名称模式和条目类型过滤
//! - -print 与 -ls 两种输出动作
//! - 详细的错误报告
//!
//! ## 使用场景
//!
//! - 在目录树中按条件列出条目
//! - 作为库嵌入其它工具，把结果写到任意输出目标
//!
//! # 示例
//!
//! 基本用法：
//! ```no_run
//! use rfind::finder::{Finder, Pipeline, Step, FileType};
//!
//! // 构建 -type f -print 管道
//! let mut pipeline = Pipeline::new();
//! pipeline.push(Step::Type(FileType::Regular));
//! pipeline.push(Step::Print);
//!
//! // 执行查找，结果写到标准输出
//! let finder = Finder::new(pipeline);
//! finder.run(".").unwrap();
//! ```
//!
//! 更多用法请参考各模块文档。

pub mod cli;
pub mod errors;
pub mod finder;

// Re-export main types for convenience
pub use errors::{FindError, FindResult};
pub use finder::Finder;
