//! # 颜色配置解析
//!
//! 将 COLOR_BAYER_* 标识符静态映射为去马赛克参数。映射表是封闭的
//! 枚举集合，未收录的标识符一律作为配置错误拒绝。
//!
//! ## 依赖关系
//! - 被 `commands/debayer.rs` 在参数校验阶段使用
//! - 被 `imaging/convert.rs` 使用
//! - 使用 `bayer` crate 的 CFA 与算法枚举

use std::fmt;
use std::str::FromStr;

use bayer::{Demosaic, CFA};

use crate::error::DebayerError;

/// 输出通道顺序
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelOrder {
    /// 按编码器期望的顺序写出，文件中颜色正确
    Bgr,
    /// 写出前交换红蓝通道
    Rgb,
    /// 折叠为单通道灰度
    Gray,
}

/// 解析后的颜色配置
#[derive(Debug, Clone, Copy)]
pub struct ColorProfile {
    name: &'static str,
    /// 传感器滤色阵列
    pub cfa: CFA,
    /// 去马赛克算法
    pub algorithm: Demosaic,
    /// 输出通道顺序
    pub order: ChannelOrder,
}

/// 可接受的标识符与参数的静态映射表
///
/// 标识符沿用 OpenCV 的命名：两个字母取自图案第二行的第 2、3 个像素，
/// 因此 BG 对应左上角为 RGGB 的拼贴，GB 对应 GRBG，RG 对应 BGGR，
/// GR 对应 GBRG。VNG/EA 变体以 Cubic 算法近似。
const PROFILES: &[(&str, CFA, ChannelOrder, Demosaic)] = &[
    ("COLOR_BAYER_BG2BGR", CFA::RGGB, ChannelOrder::Bgr, Demosaic::Linear),
    ("COLOR_BAYER_BG2RGB", CFA::RGGB, ChannelOrder::Rgb, Demosaic::Linear),
    ("COLOR_BAYER_BG2GRAY", CFA::RGGB, ChannelOrder::Gray, Demosaic::Linear),
    ("COLOR_BAYER_BG2BGR_VNG", CFA::RGGB, ChannelOrder::Bgr, Demosaic::Cubic),
    ("COLOR_BAYER_BG2RGB_VNG", CFA::RGGB, ChannelOrder::Rgb, Demosaic::Cubic),
    ("COLOR_BAYER_BG2BGR_EA", CFA::RGGB, ChannelOrder::Bgr, Demosaic::Cubic),
    ("COLOR_BAYER_BG2RGB_EA", CFA::RGGB, ChannelOrder::Rgb, Demosaic::Cubic),
    ("COLOR_BAYER_GB2BGR", CFA::GRBG, ChannelOrder::Bgr, Demosaic::Linear),
    ("COLOR_BAYER_GB2RGB", CFA::GRBG, ChannelOrder::Rgb, Demosaic::Linear),
    ("COLOR_BAYER_GB2GRAY", CFA::GRBG, ChannelOrder::Gray, Demosaic::Linear),
    ("COLOR_BAYER_GB2BGR_VNG", CFA::GRBG, ChannelOrder::Bgr, Demosaic::Cubic),
    ("COLOR_BAYER_GB2RGB_VNG", CFA::GRBG, ChannelOrder::Rgb, Demosaic::Cubic),
    ("COLOR_BAYER_GB2BGR_EA", CFA::GRBG, ChannelOrder::Bgr, Demosaic::Cubic),
    ("COLOR_BAYER_GB2RGB_EA", CFA::GRBG, ChannelOrder::Rgb, Demosaic::Cubic),
    ("COLOR_BAYER_RG2BGR", CFA::BGGR, ChannelOrder::Bgr, Demosaic::Linear),
    ("COLOR_BAYER_RG2RGB", CFA::BGGR, ChannelOrder::Rgb, Demosaic::Linear),
    ("COLOR_BAYER_RG2GRAY", CFA::BGGR, ChannelOrder::Gray, Demosaic::Linear),
    ("COLOR_BAYER_RG2BGR_VNG", CFA::BGGR, ChannelOrder::Bgr, Demosaic::Cubic),
    ("COLOR_BAYER_RG2RGB_VNG", CFA::BGGR, ChannelOrder::Rgb, Demosaic::Cubic),
    ("COLOR_BAYER_RG2BGR_EA", CFA::BGGR, ChannelOrder::Bgr, Demosaic::Cubic),
    ("COLOR_BAYER_RG2RGB_EA", CFA::BGGR, ChannelOrder::Rgb, Demosaic::Cubic),
    ("COLOR_BAYER_GR2BGR", CFA::GBRG, ChannelOrder::Bgr, Demosaic::Linear),
    ("COLOR_BAYER_GR2RGB", CFA::GBRG, ChannelOrder::Rgb, Demosaic::Linear),
    ("COLOR_BAYER_GR2GRAY", CFA::GBRG, ChannelOrder::Gray, Demosaic::Linear),
    ("COLOR_BAYER_GR2BGR_VNG", CFA::GBRG, ChannelOrder::Bgr, Demosaic::Cubic),
    ("COLOR_BAYER_GR2RGB_VNG", CFA::GBRG, ChannelOrder::Rgb, Demosaic::Cubic),
    ("COLOR_BAYER_GR2BGR_EA", CFA::GBRG, ChannelOrder::Bgr, Demosaic::Cubic),
    ("COLOR_BAYER_GR2RGB_EA", CFA::GBRG, ChannelOrder::Rgb, Demosaic::Cubic),
];

impl ColorProfile {
    /// 按标识符查表解析
    pub fn parse(name: &str) -> Result<Self, DebayerError> {
        PROFILES
            .iter()
            .find(|(id, _, _, _)| *id == name)
            .map(|&(id, cfa, order, algorithm)| Self {
                name: id,
                cfa,
                algorithm,
                order,
            })
            .ok_or_else(|| DebayerError::UnknownColorProfile {
                profile: name.to_string(),
            })
    }
}

impl FromStr for ColorProfile {
    type Err = DebayerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ColorProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
