// 该文件是 CCTV Report （监控日报） 项目的一部分。
// src/normalize.rs - 记录清洗与时区归一化
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

use std::collections::HashSet;

use chrono::DateTime;
use chrono_tz::Tz;
use thiserror::Error;
use tracing::{debug, info};

use crate::{REPORT_TIMEZONE, TIMESTAMP_FORMAT, input::RawRow};

/// 停车场预置位的摄像头不参与统计
const EXCLUDED_PRESET: &str = "Parking";

#[derive(Error, Debug)]
pub enum NormalizeError {
  #[error("第 {line} 行 {column} 时间戳格式错误 '{value}': {source}")]
  Timestamp {
    line: u64,
    column: &'static str,
    value: String,
    source: chrono::ParseError,
  },
  #[error("第 {line} 行缺少 camera_ref")]
  MissingCamera { line: u64 },
}

/// 一张图像上的观测结果
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Observation {
  /// 检测到一个目标
  Detected(String),
  /// 该图像没有检测到任何目标
  Empty,
}

/// warnings 列原文；分组与输出都使用原文，只在求和时取数值
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Warnings(String);

impl Warnings {
  pub fn new(value: impl Into<String>) -> Self {
    Warnings(value.into())
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }

  /// 数值与布尔计入总数，其余文本按 0 计
  pub fn value(&self) -> f64 {
    let text = self.0.trim();
    if let Ok(v) = text.parse::<i64>() {
      return v as f64;
    }
    if let Ok(v) = text.parse::<f64>()
      && v.is_finite()
    {
      return v;
    }
    match text {
      "True" | "true" | "TRUE" => 1.0,
      _ => 0.0,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedRecord {
  pub image_proc: DateTime<Tz>,
  pub image_capt: DateTime<Tz>,
  pub camera_ref: String,
  pub warnings: Option<Warnings>,
  pub observation: Observation,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NormalizeStats {
  pub rows_read: usize,
  pub exact_duplicates: usize,
  pub parking_rows: usize,
  pub rows_kept: usize,
}

/// 清洗原始记录：整行去重、剔除停车场预置位、时间戳转换为报表时区
pub fn normalize(
  rows: Vec<RawRow>,
) -> Result<(Vec<NormalizedRecord>, NormalizeStats), NormalizeError> {
  let mut stats = NormalizeStats {
    rows_read: rows.len(),
    ..Default::default()
  };

  let mut seen = HashSet::with_capacity(rows.len());
  let mut records = Vec::with_capacity(rows.len());

  for row in rows {
    if !seen.insert(row.cells.clone()) {
      stats.exact_duplicates += 1;
      continue;
    }

    let raw = &row.record;
    let camera_ref = raw
      .camera_ref()
      .ok_or(NormalizeError::MissingCamera { line: row.line })?;
    if camera_ref.contains(EXCLUDED_PRESET) {
      stats.parking_rows += 1;
      continue;
    }

    let image_proc = parse_timestamp(row.line, "image_proc", &raw.image_proc)?;
    let image_capt = parse_timestamp(row.line, "image_capt", &raw.image_capt)?;
    let warnings = raw.warnings().map(Warnings::new);
    let observation = match raw.class_name() {
      Some(class_name) => Observation::Detected(class_name.to_string()),
      None => Observation::Empty,
    };

    records.push(NormalizedRecord {
      image_proc,
      image_capt,
      camera_ref: camera_ref.to_string(),
      warnings,
      observation,
    });
  }

  stats.rows_kept = records.len();
  info!(
    "清洗完成: 读取 {} 行, 重复 {} 行, 停车场 {} 行, 保留 {} 行",
    stats.rows_read, stats.exact_duplicates, stats.parking_rows, stats.rows_kept
  );

  Ok((records, stats))
}

/// 解析带偏移量的时间戳并转换到报表时区
pub fn parse_timestamp(
  line: u64,
  column: &'static str,
  value: &str,
) -> Result<DateTime<Tz>, NormalizeError> {
  let value = value.trim();
  let parsed = DateTime::parse_from_str(value, TIMESTAMP_FORMAT).map_err(|source| {
    debug!("第 {} 行 {} 无法解析: {}", line, column, value);
    NormalizeError::Timestamp {
      line,
      column,
      value: value.to_string(),
      source,
    }
  })?;
  Ok(parsed.with_timezone(&REPORT_TIMEZONE))
}
