//! find 工具的命令行接口
//!
//! 本模块把封闭的参数词汇表机械地翻译成一条有序的管道：
//! 参数出现的顺序就是管道步骤求值的顺序。除第一个位置外的
//! 裸参数、未知选项和缺少参数值都是致命的解析错误。

use std::path::PathBuf;

use glob::Pattern;
use log::debug;

use crate::errors::{FindError, FindResult};
use crate::finder::filter::{self, FileType};
use crate::finder::pipeline::{Pipeline, Step};

/// 解析结果：起始路径加上构建好的管道
#[derive(Debug)]
pub struct ParsedArgs {
    /// 起始路径（默认 "."）
    pub path: PathBuf,
    /// 按参数顺序构建的管道，保证至少含一个动作步骤
    pub pipeline: Pipeline,
}

/// 把程序参数（不含程序名）翻译成起始路径和管道。
///
/// -user 的参数在此处解析成 uid，-name 的模式在此处编译，
/// -type 的类型码在此处校验；因此不存在的用户名、非法模式和
/// 非法类型码都在任何遍历输出产生之前让进程失败退出。
/// 如果用户没有给出 -print 或 -ls，则追加一个 -print，
/// 工具总是产生可见输出。
pub fn parse(args: &[String]) -> FindResult<ParsedArgs> {
    let mut path = PathBuf::from(".");
    let mut pipeline = Pipeline::new();

    let mut i = 0;
    while i < args.len() {
        let arg = args[i].as_str();

        if arg.starts_with('-') {
            match arg {
                "-user" => {
                    let value = flag_value(args, i, arg)?;
                    pipeline.push(Step::User(filter::resolve_user(value)?));
                    i += 1;
                }
                "-name" => {
                    let value = flag_value(args, i, arg)?;
                    let pattern = Pattern::new(value).map_err(|source| FindError::Pattern {
                        pattern: value.to_string(),
                        source,
                    })?;
                    pipeline.push(Step::Name(pattern));
                    i += 1;
                }
                "-type" => {
                    let value = flag_value(args, i, arg)?;
                    pipeline.push(Step::Type(FileType::from_code(value)?));
                    i += 1;
                }
                "-print" => pipeline.push(Step::Print),
                "-ls" => pipeline.push(Step::Ls),
                _ => return Err(FindError::InvalidArgument(arg.to_string())),
            }
        } else if i == 0 {
            // 位置参数只允许出现在最前面
            path = PathBuf::from(arg);
        } else {
            return Err(FindError::InvalidArgument(arg.to_string()));
        }

        i += 1;
    }

    if !pipeline.has_action() {
        pipeline.push(Step::Print);
    }

    debug!(
        "parsed pipeline with {} steps, starting at {}",
        pipeline.len(),
        path.display()
    );

    Ok(ParsedArgs { path, pipeline })
}

/// 取出需要参数值的选项的下一个参数，缺失则报错
fn flag_value<'a>(args: &'a [String], index: usize, flag: &str) -> FindResult<&'a str> {
    args.get(index + 1)
        .map(String::as_str)
        .ok_or_else(|| FindError::MissingArgument(flag.to_string()))
}
