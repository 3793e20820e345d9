//! # 批量扫描模块
//!
//! 提供目录集合收集、按扩展名列举文件与运行统计。
//!
//! ## 功能
//! - 扁平或递归收集待处理目录
//! - 按扩展名后缀列举并统计文件
//! - 运行期处理计数与 ETA 估算
//!
//! ## 依赖关系
//! - 被 `commands/debayer.rs` 使用
//! - 使用 `walkdir` 遍历目录

pub mod scanner;
pub mod stats;

pub use scanner::FileScanner;
pub use stats::RunStats;
