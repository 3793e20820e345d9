//! # debayer - 批量图像去马赛克工具
//!
//! 将目录中的 Bayer 原始传感器图像批量转换为彩色图像。
//!
//! ## 流程
//! 参数校验 → 目录收集 → 文件计数 → 逐文件顺序转换 → 进度/耗时汇报
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── batch/   (目录扫描与运行统计)
//!   │     └── imaging/ (颜色配置与单文件转换)
//!   ├── utils/      (工具函数)
//!   └── error.rs    (错误处理)
//! ```

mod batch;
mod cli;
mod commands;
mod error;
mod imaging;
mod utils;

use clap::Parser;
use cli::Cli;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();

    if let Err(e) = commands::run(cli) {
        utils::output::print_error_chain(&e);
        std::process::exit(1);
    }
}
