use std::env;
use std::time::Instant;

use anyhow::{Context, Result};
use log::{debug, info};

use rfind::cli;
use rfind::finder::Finder;

fn main() -> Result<()> {
    // 初始化日志：参数词汇表是封闭的，日志级别走 RUST_LOG 环境变量
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let start_time = Instant::now();

    // 解析命令行参数并构建管道
    let args: Vec<String> = env::args().skip(1).collect();
    let parsed = cli::parse(&args).context("failed to parse arguments")?;

    debug!(
        "searching in {} with a {}-step pipeline",
        parsed.path.display(),
        parsed.pipeline.len()
    );

    // 执行遍历，致命错误带着失败路径和系统错误一路传播到这里
    let finder = Finder::new(parsed.pipeline);
    finder.run(&parsed.path)?;

    info!("traversal finished in {:.2?}", start_time.elapsed());

    Ok(())
}
