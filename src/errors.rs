use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for operations that can produce FindError
pub type FindResult<T> = Result<T, FindError>;

/// rfind 的自定义错误类型
///
/// 只有两类失败：解析期的契约违反（未知参数、缺少参数值、
/// 非法类型码、不存在的用户）和遍历期的系统级错误。
/// 权限不足不在此列——它是可恢复的，由遍历器在标准输出上报告。
#[derive(Debug, Error)]
pub enum FindError {
    /// 获取文件状态失败（权限不足以外的 stat 错误）
    #[error("stat(\"{path}\") failed: {source}")]
    Stat {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// 打开目录失败（权限不足以外的 opendir 错误）
    #[error("opendir({path}) failed: {source}")]
    OpenDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// 枚举目录项失败
    #[error("readdir({path}) failed: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// 拼接后的路径超出最大长度
    #[error("Maximum path length exceeded: {}", .0.display())]
    PathTooLong(PathBuf),

    /// 用户数据库中不存在给定的用户名
    #[error("User does not exist: {0}")]
    UnknownUser(String),

    /// 数字形式的用户 ID 无法转换
    #[error("Failed converting user ID: {0}")]
    InvalidUserId(String),

    /// 无效的文件类型码（仅允许 b c d p f l s）
    #[error("Type does not exist: {0}")]
    InvalidFileType(String),

    /// 需要参数值的选项没有得到参数值
    #[error("No argument provided for {0}")]
    MissingArgument(String),

    /// 无法识别的参数，或位置不合法的路径参数
    #[error("{0} is not a valid command")]
    InvalidArgument(String),

    /// 模式匹配错误
    #[error("Invalid pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    /// 写标准输出失败
    #[error("write to stdout failed: {0}")]
    Output(#[from] io::Error),
}
