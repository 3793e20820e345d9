//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数。
//!
//! ## 参数
//! - `-i/--input_dir`: 待处理的输入目录（必填）
//! - `-I/--input_ext`: 输入扩展名，`-O/--output_ext`: 输出扩展名
//! - `-o/--output_dir`: 输出目录，缺省为原地转换
//! - `-c/--color_profile`: Bayer 颜色配置标识符
//! - 其余开关见各字段说明
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 参数传递给 `commands/debayer.rs`

use clap::Parser;
use std::path::PathBuf;

/// 命令行参数
#[derive(Parser, Debug)]
#[command(name = "debayer")]
#[command(version)]
#[command(about = "Debayers images in a directory", long_about = None)]
pub struct Cli {
    /// The directory to process
    #[arg(short = 'i', long = "input_dir")]
    pub input_dir: PathBuf,

    /// The extension to look for in the input directory (no dot)
    #[arg(short = 'I', long = "input_ext", default_value = "bmp")]
    pub input_ext: String,

    /// Whether to look for images recursively
    #[arg(short = 'r', long = "recursive", default_value_t = false)]
    pub recursive: bool,

    /// The directory to store the debayered images in; performs in-place
    /// debayering if not specified
    #[arg(short = 'o', long = "output_dir")]
    pub output_dir: Option<PathBuf>,

    /// The extension to use for the generated images (no dot)
    #[arg(short = 'O', long = "output_ext", default_value = "jpg")]
    pub output_ext: String,

    /// The color profile to use for debayering (COLOR_BAYER_*)
    #[arg(short = 'c', long = "color_profile", default_value = "COLOR_BAYER_BG2BGR")]
    pub color_profile: String,

    /// The interval of processed images to output progress information in
    /// the console
    #[arg(short = 'p', long = "progress_interval", default_value_t = 100)]
    pub progress_interval: usize,

    /// Whether to ignore any errors and keep debayering
    #[arg(short = 'e', long = "ignore_errors", default_value_t = false)]
    pub ignore_errors: bool,

    /// Whether to delete the input file after successfully debayering it
    #[arg(short = 'd', long = "delete", default_value_t = false)]
    pub delete: bool,

    /// Whether to output per-directory file counts
    #[arg(short = 'v', long = "verbose", default_value_t = false)]
    pub verbose: bool,

    /// Whether to perform a dry-run, i.e., not actually convert any images
    #[arg(short = 'n', long = "dry_run", default_value_t = false)]
    pub dry_run: bool,
}
