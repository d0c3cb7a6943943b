// 该文件是 CCTV Report （监控日报） 项目的一部分。
// src/input/csv_file.rs - CSV 文件输入
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

use std::{fs::File, io::Read, path::Path};

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::{debug, error, info};

use crate::{
  FromPath,
  input::{InputError, REQUIRED_COLUMNS, RawRecord, RawRow},
};

/// 逗号分隔、带表头的检测记录文件
#[derive(Debug)]
pub struct CsvFileInput {
  rows: Vec<RawRow>,
}

impl FromPath for CsvFileInput {
  type Error = InputError;

  fn from_path(path: &Path) -> Result<Self, Self::Error> {
    info!("读取输入文件: {}", path.display());
    let file = File::open(path)?;
    Self::from_reader(file)
  }
}

impl CsvFileInput {
  pub fn from_reader<R: Read>(reader: R) -> Result<Self, InputError> {
    let mut reader = ReaderBuilder::new()
      .has_headers(true)
      .trim(Trim::Headers)
      .from_reader(reader);

    let headers = reader.headers()?.clone();
    check_columns(&headers)?;
    debug!("输入表头: {:?}", headers);

    let mut rows = Vec::new();
    for result in reader.records() {
      let record = result?;
      let line = record.position().map(|p| p.line()).unwrap_or_default();
      let raw: RawRecord = record.deserialize(Some(&headers))?;
      rows.push(RawRow {
        line,
        cells: record.iter().map(str::to_string).collect(),
        record: raw,
      });
    }

    info!("共读取 {} 行记录", rows.len());
    Ok(CsvFileInput { rows })
  }

  pub fn len(&self) -> usize {
    self.rows.len()
  }

  pub fn is_empty(&self) -> bool {
    self.rows.is_empty()
  }

  pub fn into_rows(self) -> Vec<RawRow> {
    self.rows
  }
}

fn check_columns(headers: &StringRecord) -> Result<(), InputError> {
  for column in REQUIRED_COLUMNS {
    if !headers.iter().any(|h| h == column) {
      error!("输入文件缺少列 '{}'", column);
      return Err(InputError::MissingColumn(column));
    }
  }
  Ok(())
}
