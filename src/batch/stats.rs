//! # 运行统计
//!
//! 单次运行范围内的处理计数与耗时统计，用于进度与 ETA 估算。
//! 在运行开始时创建，由调用方持有，运行结束后丢弃。
//!
//! ## 依赖关系
//! - 被 `commands/debayer.rs` 使用

use std::time::{Duration, Instant};

/// 单次运行的统计数据
pub struct RunStats {
    /// 运行开始时刻
    started: Instant,
    /// 已处理的文件数
    pub processed: usize,
}

impl RunStats {
    /// 在运行开始时创建
    pub fn start() -> Self {
        Self {
            started: Instant::now(),
            processed: 0,
        }
    }

    /// 记录一个文件处理完成
    pub fn record(&mut self) {
        self.processed += 1;
    }

    /// 运行至今的耗时
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// 估算剩余时间；尚未处理任何文件时返回 None
    pub fn eta(&self, total: usize) -> Option<Duration> {
        if self.processed == 0 {
            return None;
        }
        Some(remaining_time(self.elapsed(), self.processed, total))
    }
}

/// 按平均单张耗时估算剩余时间
pub fn remaining_time(elapsed: Duration, processed: usize, total: usize) -> Duration {
    let per_image = elapsed / processed as u32;
    per_image * total.saturating_sub(processed) as u32
}

/// 格式化为 h:mm:ss
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    format!("{}:{:02}:{:02}", secs / 3600, secs % 3600 / 60, secs % 60)
}
