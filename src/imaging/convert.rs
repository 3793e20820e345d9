//! # 单文件转换
//!
//! 解码 → 去马赛克 → 编码，处理单个图像文件。
//!
//! ## 功能
//! - 以单通道读入源图像，保留 8/16 位源位深
//! - 按颜色配置执行去马赛克并调整输出通道
//! - 按目标扩展名推断格式写出，已存在的文件直接覆盖
//!
//! ## 依赖关系
//! - 被 `commands/debayer.rs` 逐文件调用
//! - 使用 `imaging/profile.rs` 的颜色配置
//! - 使用 `image` crate 读写图像
//! - 使用 `bayer` crate 执行去马赛克

use std::io::Cursor;
use std::path::Path;

use bayer::{BayerDepth, RasterDepth, RasterMut};
use image::{DynamicImage, GrayImage, ImageBuffer, Luma};

use crate::error::{DebayerError, Result};
use crate::imaging::profile::{ChannelOrder, ColorProfile};

/// 原始单通道图像
enum RawImage {
    Depth8(GrayImage),
    Depth16(ImageBuffer<Luma<u16>, Vec<u16>>),
}

/// 对单个文件执行去马赛克转换
///
/// 解码、转换或编码任一环节失败都会携带源文件路径与原因返回。
pub fn debayer_file(input: &Path, output: &Path, profile: &ColorProfile) -> Result<()> {
    let conversion_error = |reason: String| DebayerError::Conversion {
        path: input.display().to_string(),
        reason,
    };

    let raw = read_raw(input).map_err(&conversion_error)?;
    let color = demosaic(&raw, profile).map_err(&conversion_error)?;
    color.save(output).map_err(|e| {
        conversion_error(format!("failed to encode '{}': {}", output.display(), e))
    })?;

    Ok(())
}

/// 以单通道读入图像
///
/// 每通道超过 8 位的源降为 16 位灰度，其余降为 8 位灰度。
fn read_raw(path: &Path) -> std::result::Result<RawImage, String> {
    let img = image::open(path).map_err(|e| format!("failed to decode: {}", e))?;

    let raw = match img {
        DynamicImage::ImageLuma8(buf) => RawImage::Depth8(buf),
        DynamicImage::ImageLuma16(buf) => RawImage::Depth16(buf),
        other => {
            let color = other.color();
            let bytes_per_channel = color.bytes_per_pixel() / color.channel_count();
            if bytes_per_channel > 1 {
                RawImage::Depth16(other.to_luma16())
            } else {
                RawImage::Depth8(other.to_luma8())
            }
        }
    };

    Ok(raw)
}

/// 按颜色配置去马赛克
fn demosaic(raw: &RawImage, profile: &ColorProfile) -> std::result::Result<DynamicImage, String> {
    match raw {
        RawImage::Depth8(buf) => demosaic_8(buf, profile),
        RawImage::Depth16(buf) => demosaic_16(buf, profile),
    }
}

fn demosaic_8(
    src: &GrayImage,
    profile: &ColorProfile,
) -> std::result::Result<DynamicImage, String> {
    let (width, height) = src.dimensions();
    let mut rgb = vec![0u8; width as usize * height as usize * 3];

    {
        let mut raster = RasterMut::new(
            width as usize,
            height as usize,
            RasterDepth::Depth8,
            &mut rgb,
        );
        bayer::run_demosaic(
            &mut Cursor::new(src.as_raw().as_slice()),
            BayerDepth::Depth8,
            profile.cfa,
            profile.algorithm,
            &mut raster,
        )
        .map_err(|e| format!("demosaic failed: {:?}", e))?;
    }

    let out = match profile.order {
        ChannelOrder::Bgr => image_from_rgb8(width, height, rgb)?,
        ChannelOrder::Rgb => {
            for px in rgb.chunks_exact_mut(3) {
                px.swap(0, 2);
            }
            image_from_rgb8(width, height, rgb)?
        }
        ChannelOrder::Gray => {
            let gray: Vec<u8> = rgb
                .chunks_exact(3)
                .map(|px| luma(px[0] as u32, px[1] as u32, px[2] as u32) as u8)
                .collect();
            DynamicImage::ImageLuma8(
                ImageBuffer::from_raw(width, height, gray)
                    .ok_or_else(|| "gray buffer size mismatch".to_string())?,
            )
        }
    };

    Ok(out)
}

fn demosaic_16(
    src: &ImageBuffer<Luma<u16>, Vec<u16>>,
    profile: &ColorProfile,
) -> std::result::Result<DynamicImage, String> {
    let (width, height) = src.dimensions();
    let bytes: Vec<u8> = src.as_raw().iter().flat_map(|v| v.to_le_bytes()).collect();
    let mut buf = vec![0u8; width as usize * height as usize * 3 * 2];

    {
        let mut raster = RasterMut::new(
            width as usize,
            height as usize,
            RasterDepth::Depth16,
            &mut buf,
        );
        bayer::run_demosaic(
            &mut Cursor::new(bytes.as_slice()),
            BayerDepth::Depth16LE,
            profile.cfa,
            profile.algorithm,
            &mut raster,
        )
        .map_err(|e| format!("demosaic failed: {:?}", e))?;
    }

    // Depth16 栅格按本机字节序写入输出缓冲
    let mut rgb: Vec<u16> = buf
        .chunks_exact(2)
        .map(|b| u16::from_ne_bytes([b[0], b[1]]))
        .collect();

    let out = match profile.order {
        ChannelOrder::Bgr => image_from_rgb16(width, height, rgb)?,
        ChannelOrder::Rgb => {
            for px in rgb.chunks_exact_mut(3) {
                px.swap(0, 2);
            }
            image_from_rgb16(width, height, rgb)?
        }
        ChannelOrder::Gray => {
            let gray: Vec<u16> = rgb
                .chunks_exact(3)
                .map(|px| luma(px[0] as u32, px[1] as u32, px[2] as u32) as u16)
                .collect();
            DynamicImage::ImageLuma16(
                ImageBuffer::from_raw(width, height, gray)
                    .ok_or_else(|| "gray buffer size mismatch".to_string())?,
            )
        }
    };

    Ok(out)
}

fn image_from_rgb8(
    width: u32,
    height: u32,
    rgb: Vec<u8>,
) -> std::result::Result<DynamicImage, String> {
    ImageBuffer::from_raw(width, height, rgb)
        .map(DynamicImage::ImageRgb8)
        .ok_or_else(|| "rgb buffer size mismatch".to_string())
}

fn image_from_rgb16(
    width: u32,
    height: u32,
    rgb: Vec<u16>,
) -> std::result::Result<DynamicImage, String> {
    ImageBuffer::from_raw(width, height, rgb)
        .map(DynamicImage::ImageRgb16)
        .ok_or_else(|| "rgb buffer size mismatch".to_string())
}

/// BT.601 加权灰度
fn luma(r: u32, g: u32, b: u32) -> u32 {
    (r * 299 + g * 587 + b * 114) / 1000
}
