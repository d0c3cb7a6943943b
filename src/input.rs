// 该文件是 CCTV Report （监控日报） 项目的一部分。
// src/input.rs - 原始检测记录输入
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

use serde::Deserialize;
use thiserror::Error;

mod csv_file;
pub use self::csv_file::CsvFileInput;

/// 输入文件必须包含的列；`score` 不参与处理，可以缺失
pub const REQUIRED_COLUMNS: [&str; 5] = [
  "image_proc",
  "image_capt",
  "camera_ref",
  "warnings",
  "class_name",
];

/// 视为空值的文本标记
const NA_MARKERS: [&str; 7] = ["NaN", "nan", "NA", "N/A", "null", "NULL", "None"];

#[derive(Error, Debug)]
pub enum InputError {
  #[error("I/O 错误: {0}")]
  IoError(#[from] std::io::Error),
  #[error("CSV 解析错误: {0}")]
  CsvError(#[from] csv::Error),
  #[error("输入文件缺少必需的列: {0}")]
  MissingColumn(&'static str),
}

/// 一行原始检测记录
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct RawRecord {
  pub image_proc: String,
  pub image_capt: String,
  pub camera_ref: Option<String>,
  pub warnings: Option<String>,
  pub class_name: Option<String>,
  #[serde(default)]
  pub score: Option<String>,
}

impl RawRecord {
  pub fn camera_ref(&self) -> Option<&str> {
    present(&self.camera_ref)
  }

  pub fn warnings(&self) -> Option<&str> {
    present(&self.warnings)
  }

  pub fn class_name(&self) -> Option<&str> {
    present(&self.class_name)
  }
}

/// 原始行：保留所有单元格原文，用于整行去重
#[derive(Debug, Clone)]
pub struct RawRow {
  pub line: u64,
  pub cells: Box<[String]>,
  pub record: RawRecord,
}

fn present(field: &Option<String>) -> Option<&str> {
  field
    .as_deref()
    .map(str::trim)
    .filter(|v| !v.is_empty() && !NA_MARKERS.contains(v))
}

#[cfg(test)]
mod tests {
  use super::*;

  fn record(class_name: Option<&str>) -> RawRecord {
    RawRecord {
      image_proc: "2023-05-10 10:00:05+0100".to_string(),
      image_capt: "2023-05-10 10:00:00+0100".to_string(),
      camera_ref: Some("A13".to_string()),
      warnings: Some("0".to_string()),
      class_name: class_name.map(str::to_string),
      score: None,
    }
  }

  #[test]
  fn na_markers_are_absent() {
    assert_eq!(record(Some("car")).class_name(), Some("car"));
    assert_eq!(record(None).class_name(), None);
    for marker in ["", " ", "NaN", "nan", "NA", "null", "None"] {
      assert_eq!(record(Some(marker)).class_name(), None, "marker = {marker:?}");
    }
  }
}
