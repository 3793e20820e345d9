//! # 统一错误处理模块
//!
//! 定义 debayer 的所有错误类型，使用 `thiserror` 派生。
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 无外部模块依赖

use thiserror::Error;

/// debayer 统一错误类型
#[derive(Error, Debug)]
pub enum DebayerError {
    // ─────────────────────────────────────────────────────────────
    // 配置错误（运行开始前即中止）
    // ─────────────────────────────────────────────────────────────
    #[error("Unknown color profile '{profile}', expected a COLOR_BAYER_* identifier")]
    UnknownColorProfile { profile: String },

    #[error("Input directory '{path}' does not exist or is not a directory")]
    InvalidInputDir { path: String },

    #[error("Output directory '{path}' does not exist or is not a directory")]
    InvalidOutputDir { path: String },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    // ─────────────────────────────────────────────────────────────
    // I/O 错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to list directory: {path}")]
    DirectoryRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    // ─────────────────────────────────────────────────────────────
    // 逐文件错误（--ignore_errors 模式下可恢复）
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to debayer image: {path}\nReason: {reason}")]
    Conversion { path: String, reason: String },

    #[error("Failed to delete file: {path}")]
    Deletion {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, DebayerError>;
