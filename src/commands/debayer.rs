//! # debayer 命令实现
//!
//! 批量去马赛克转换的主流程。
//!
//! ## 功能
//! - 校验颜色配置与输入/输出目录
//! - 扁平或递归收集目录集合并统计文件总数
//! - 逐文件顺序转换，支持干跑、源文件删除与错误隔离
//! - 按间隔输出进度与 ETA，结束时汇报总耗时
//!
//! ## 依赖关系
//! - 使用 `cli/` 定义的参数
//! - 使用 `batch/scanner.rs`, `batch/stats.rs`
//! - 使用 `imaging/profile.rs`, `imaging/convert.rs`
//! - 使用 `utils/output.rs`, `utils/progress.rs`

use std::fs;
use std::path::{Path, PathBuf};

use indicatif::ProgressBar;

use crate::batch::stats::format_duration;
use crate::batch::{FileScanner, RunStats};
use crate::cli::Cli;
use crate::error::{DebayerError, Result};
use crate::imaging::{convert, ColorProfile};
use crate::utils::{output, progress};

/// 执行 debayer 命令
pub fn execute(args: Cli) -> Result<()> {
    let profile = validate(&args)?;

    output::print_header(&format!(
        "Debayering .{} -> .{} ({})",
        args.input_ext, args.output_ext, profile
    ));

    let scanner = FileScanner::new(&args.input_dir, &args.input_ext).recursive(args.recursive);
    let directories = scanner.directories();

    // 计数遍历，仅用于进度与 ETA
    let total = scanner.count_files(&directories)?;
    output::print_info(&format!("Total images to debayer: {}", total));

    if args.dry_run {
        output::print_warning("Dry-run mode: no files will be written or deleted");
    }

    let pb = progress::create_progress_bar(total as u64, "Debayering");
    let mut stats = RunStats::start();

    for dir in &directories {
        // 转换遍历重新列举目录；目录内容在两次遍历之间被外部修改时，
        // 计数与实际处理数可能不一致
        let files = match scanner.matching_files(dir) {
            Ok(files) => files,
            Err(e) => {
                pb.finish_and_clear();
                return Err(e);
            }
        };

        if args.verbose {
            pb.println(format!("{}: {}", dir.display(), files.len()));
        }

        for name in &files {
            let infile = dir.join(name);
            let outfile = destination_path(
                dir,
                name,
                args.output_dir.as_deref(),
                &args.input_ext,
                &args.output_ext,
            );

            if !args.dry_run {
                if let Err(e) = convert_one(&infile, &outfile, &profile, &args, &pb) {
                    pb.finish_and_clear();
                    return Err(e);
                }
            }

            stats.record();
            pb.inc(1);

            if stats.processed % args.progress_interval == 0 {
                let eta = stats
                    .eta(total)
                    .map(format_duration)
                    .unwrap_or_else(|| "-".to_string());
                pb.println(format!(
                    "Progress: {} / {} - ETA {}",
                    stats.processed, total, eta
                ));
            }
        }
    }

    pb.finish_and_clear();
    output::print_done(&format!(
        "Total processing time: {}",
        format_duration(stats.elapsed())
    ));

    Ok(())
}

/// 校验运行参数，返回解析后的颜色配置
///
/// 在任何文件系统枚举发生之前执行，无副作用。
fn validate(args: &Cli) -> Result<ColorProfile> {
    let profile = ColorProfile::parse(&args.color_profile)?;

    if !args.input_dir.is_dir() {
        return Err(DebayerError::InvalidInputDir {
            path: args.input_dir.display().to_string(),
        });
    }

    if let Some(out) = &args.output_dir {
        if !out.is_dir() {
            return Err(DebayerError::InvalidOutputDir {
                path: out.display().to_string(),
            });
        }
    }

    if args.progress_interval == 0 {
        return Err(DebayerError::InvalidArgument(
            "progress_interval must be a positive integer".to_string(),
        ));
    }

    Ok(profile)
}

/// 计算目标文件路径
///
/// 扩展名替换是对文件名中 `.<input_ext>` 子串的整体替换，而非只改写
/// 末尾；文件名前部出现的同一片段也会被替换。
fn destination_path(
    dir: &Path,
    file_name: &str,
    output_dir: Option<&Path>,
    input_ext: &str,
    output_ext: &str,
) -> PathBuf {
    let converted = file_name.replace(
        &format!(".{}", input_ext),
        &format!(".{}", output_ext),
    );

    match output_dir {
        Some(out) => out.join(converted),
        None => dir.join(converted),
    }
}

/// 转换单个文件并按配置处理失败与源文件删除
///
/// 返回 Err 表示需要中止整个运行。
fn convert_one(
    infile: &Path,
    outfile: &Path,
    profile: &ColorProfile,
    args: &Cli,
    pb: &ProgressBar,
) -> Result<()> {
    match convert::debayer_file(infile, outfile, profile) {
        Ok(()) => {
            if args.delete {
                if let Err(source) = fs::remove_file(infile) {
                    let err = DebayerError::Deletion {
                        path: infile.display().to_string(),
                        source,
                    };
                    if !args.ignore_errors {
                        return Err(err);
                    }
                    pb.suspend(|| output::print_error_chain(&err));
                }
            }
            Ok(())
        }
        Err(err) => {
            pb.suspend(|| {
                output::print_error(&format!("Error debayering file: {}", infile.display()));
                if args.delete {
                    output::print_warning(&format!(
                        "Skipping deletion of file: {}",
                        infile.display()
                    ));
                }
                if args.ignore_errors {
                    output::print_error_chain(&err);
                }
            });
            if args.ignore_errors {
                Ok(())
            } else {
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma};
    use tempfile::TempDir;

    fn write_raw_fixture(path: &Path) {
        let img = GrayImage::from_fn(8, 8, |x, y| Luma([((x + y) * 16) as u8]));
        img.save(path).unwrap();
    }

    fn test_args(input_dir: &Path) -> Cli {
        Cli {
            input_dir: input_dir.to_path_buf(),
            input_ext: "png".to_string(),
            recursive: false,
            output_dir: None,
            output_ext: "jpg".to_string(),
            color_profile: "COLOR_BAYER_BG2BGR".to_string(),
            progress_interval: 100,
            ignore_errors: false,
            delete: false,
            verbose: false,
            dry_run: false,
        }
    }

    #[test]
    fn test_destination_path_in_place() {
        let dest = destination_path(Path::new("/data"), "a.bmp", None, "bmp", "jpg");
        assert_eq!(dest, PathBuf::from("/data/a.jpg"));
    }

    #[test]
    fn test_destination_path_with_output_dir() {
        let dest = destination_path(
            Path::new("/data"),
            "a.bmp",
            Some(Path::new("/out")),
            "bmp",
            "jpg",
        );
        assert_eq!(dest, PathBuf::from("/out/a.jpg"));
    }

    #[test]
    fn test_destination_path_replaces_substring_occurrences() {
        // 文件名前部的 ".bmp" 片段同样被替换
        let dest = destination_path(Path::new("/data"), "x.bmp_scan.bmp", None, "bmp", "jpg");
        assert_eq!(dest, PathBuf::from("/data/x.jpg_scan.jpg"));
    }

    #[test]
    fn test_execute_converts_batch() {
        let tmp = TempDir::new().unwrap();
        write_raw_fixture(&tmp.path().join("a.png"));
        write_raw_fixture(&tmp.path().join("b.png"));

        let mut args = test_args(tmp.path());
        args.progress_interval = 1;
        execute(args).unwrap();

        assert!(tmp.path().join("a.jpg").exists());
        assert!(tmp.path().join("b.jpg").exists());
        // 未开启 --delete 时源文件保留
        assert!(tmp.path().join("a.png").exists());
        assert!(tmp.path().join("b.png").exists());
    }

    #[test]
    fn test_execute_with_output_dir() {
        let tmp = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        write_raw_fixture(&tmp.path().join("a.png"));

        let mut args = test_args(tmp.path());
        args.output_dir = Some(out.path().to_path_buf());
        execute(args).unwrap();

        assert!(out.path().join("a.jpg").exists());
        assert!(!tmp.path().join("a.jpg").exists());
    }

    #[test]
    fn test_execute_dry_run_writes_nothing() {
        let tmp = TempDir::new().unwrap();
        write_raw_fixture(&tmp.path().join("a.png"));
        write_raw_fixture(&tmp.path().join("b.png"));

        let mut args = test_args(tmp.path());
        args.dry_run = true;
        args.delete = true;
        execute(args).unwrap();

        assert!(!tmp.path().join("a.jpg").exists());
        assert!(!tmp.path().join("b.jpg").exists());
        assert!(tmp.path().join("a.png").exists());
        assert!(tmp.path().join("b.png").exists());
    }

    #[test]
    fn test_execute_deletes_source_on_success() {
        let tmp = TempDir::new().unwrap();
        write_raw_fixture(&tmp.path().join("a.png"));

        let mut args = test_args(tmp.path());
        args.delete = true;
        execute(args).unwrap();

        assert!(tmp.path().join("a.jpg").exists());
        assert!(!tmp.path().join("a.png").exists());
    }

    #[test]
    fn test_execute_isolates_errors_when_ignoring() {
        let tmp = TempDir::new().unwrap();
        write_raw_fixture(&tmp.path().join("a.png"));
        fs::write(tmp.path().join("b.png"), b"not an image").unwrap();
        write_raw_fixture(&tmp.path().join("c.png"));

        let mut args = test_args(tmp.path());
        args.ignore_errors = true;
        args.delete = true;
        execute(args).unwrap();

        assert!(tmp.path().join("a.jpg").exists());
        assert!(!tmp.path().join("b.jpg").exists());
        assert!(tmp.path().join("c.jpg").exists());
        // 转换失败的源文件不会被删除
        assert!(tmp.path().join("b.png").exists());
        assert!(!tmp.path().join("a.png").exists());
        assert!(!tmp.path().join("c.png").exists());
    }

    #[test]
    fn test_execute_aborts_on_first_error() {
        let tmp = TempDir::new().unwrap();
        write_raw_fixture(&tmp.path().join("a.png"));
        fs::write(tmp.path().join("b.png"), b"not an image").unwrap();
        write_raw_fixture(&tmp.path().join("c.png"));

        let args = test_args(tmp.path());
        let result = execute(args);

        assert!(matches!(result, Err(DebayerError::Conversion { .. })));
        assert!(tmp.path().join("a.jpg").exists());
        assert!(!tmp.path().join("c.jpg").exists());
    }

    #[test]
    fn test_execute_recursive() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("sub")).unwrap();
        write_raw_fixture(&tmp.path().join("a.png"));
        write_raw_fixture(&tmp.path().join("sub").join("b.png"));

        let flat = test_args(tmp.path());
        execute(flat).unwrap();
        assert!(tmp.path().join("a.jpg").exists());
        assert!(!tmp.path().join("sub").join("b.jpg").exists());

        let mut deep = test_args(tmp.path());
        deep.recursive = true;
        execute(deep).unwrap();
        assert!(tmp.path().join("sub").join("b.jpg").exists());
    }

    #[test]
    fn test_validate_rejects_unknown_profile_first() {
        // 颜色配置在目录检查之前校验
        let mut args = test_args(Path::new("/definitely/not/a/dir"));
        args.color_profile = "NOT_A_PATTERN".to_string();

        let result = validate(&args);
        assert!(matches!(
            result,
            Err(DebayerError::UnknownColorProfile { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_missing_input_dir() {
        let args = test_args(Path::new("/definitely/not/a/dir"));
        let result = validate(&args);
        assert!(matches!(result, Err(DebayerError::InvalidInputDir { .. })));
    }

    #[test]
    fn test_validate_rejects_missing_output_dir() {
        let tmp = TempDir::new().unwrap();
        let mut args = test_args(tmp.path());
        args.output_dir = Some(PathBuf::from("/definitely/not/a/dir"));

        let result = validate(&args);
        assert!(matches!(result, Err(DebayerError::InvalidOutputDir { .. })));
    }

    #[test]
    fn test_validate_rejects_zero_progress_interval() {
        let tmp = TempDir::new().unwrap();
        let mut args = test_args(tmp.path());
        args.progress_interval = 0;

        let result = validate(&args);
        assert!(matches!(result, Err(DebayerError::InvalidArgument(_))));
    }
}
