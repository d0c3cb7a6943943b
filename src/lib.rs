// 该文件是 CCTV Report （监控日报） 项目的一部分。
// src/lib.rs - 库主文件
//
// 本文件根据 Apache 许可证第 2.0 版（以下简称“许可证”）授权使用；
// 除非遵守该许可证条款，否则您不得使用本文件。
// 您可通过以下网址获取许可证副本：
// http://www.apache.org/licenses/LICENSE-2.0
// 除非适用法律要求或书面同意，根据本许可协议分发的软件均按“原样”提供，
// 不附带任何形式的明示或暗示的保证或条件。
// 有关许可权限与限制的具体条款，请参阅本许可协议。
//
// Copyright (C) 2026 Johann Li <me@qinka.pro>, Wareless Group

use std::path::Path;

pub mod aggregate;
pub mod dedup;
pub mod input;
pub mod model;
pub mod normalize;
pub mod output;
pub mod placeholder;
pub mod task;

/// 报表统一使用的时区
pub const REPORT_TIMEZONE: chrono_tz::Tz = chrono_tz::Europe::London;

/// 输入/输出时间戳格式，例如 `2023-03-26 00:30:00+0000`
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%z";

pub trait FromPath {
  type Error;
  fn from_path(path: &Path) -> Result<Self, Self::Error>
  where
    Self: Sized;
}
