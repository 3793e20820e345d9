//! # 目录扫描器
//!
//! 按输入目录和扩展名收集待处理的目录集合与文件列表。
//!
//! ## 功能
//! - 非递归模式只扫描输入目录本身
//! - 递归模式包含输入目录及全树遍历到的每个子目录
//! - 按文件名后缀匹配扩展名
//!
//! ## 依赖关系
//! - 被 `commands/debayer.rs` 调用
//! - 使用 `walkdir` 遍历目录

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::{DebayerError, Result};

/// 目录扫描器
pub struct FileScanner {
    /// 输入目录
    input: PathBuf,
    /// 匹配的扩展名（不含点）
    extension: String,
    /// 是否递归
    recursive: bool,
}

impl FileScanner {
    /// 创建新的目录扫描器
    pub fn new(input: &Path, extension: &str) -> Self {
        Self {
            input: input.to_path_buf(),
            extension: extension.to_string(),
            recursive: false,
        }
    }

    /// 设置是否递归搜索
    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// 收集待扫描的目录集合
    ///
    /// 递归模式返回输入目录加上遍历到的每个子目录，按文件名排序保证
    /// 单次运行内顺序确定；无法读取的子树被跳过。
    pub fn directories(&self) -> Vec<PathBuf> {
        if !self.recursive {
            return vec![self.input.clone()];
        }

        WalkDir::new(&self.input)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_dir())
            .map(|e| e.path().to_path_buf())
            .collect()
    }

    /// 列出目录中名称以 `.<extension>` 结尾的条目（已排序）
    ///
    /// 只按名称后缀匹配，不检查条目类型。
    pub fn matching_files(&self, dir: &Path) -> Result<Vec<String>> {
        let suffix = format!(".{}", self.extension);

        let entries = std::fs::read_dir(dir).map_err(|e| DebayerError::DirectoryRead {
            path: dir.display().to_string(),
            source: e,
        })?;

        let mut names: Vec<String> = entries
            .filter_map(|e| e.ok())
            .filter_map(|e| e.file_name().into_string().ok())
            .filter(|name| name.ends_with(&suffix))
            .collect();
        names.sort();

        Ok(names)
    }

    /// 统计目录集合中匹配文件的总数
    pub fn count_files(&self, directories: &[PathBuf]) -> Result<usize> {
        let mut total = 0;
        for dir in directories {
            total += self.matching_files(dir)?.len();
        }
        Ok(total)
    }
}
