//! # 图像处理模块
//!
//! 颜色配置解析与单文件去马赛克转换。
//!
//! ## 依赖关系
//! - 被 `commands/debayer.rs` 使用
//! - 使用 `image` crate 读写图像
//! - 使用 `bayer` crate 执行去马赛克

pub mod convert;
pub mod profile;

pub use profile::ColorProfile;
