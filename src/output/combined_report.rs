// 该文件是 CCTV Report （监控日报） 项目的一部分。
// src/output/combined_report.rs - 单文件汇总报表
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

use std::{
  fs::File,
  io::{BufWriter, Write},
  path::{Path, PathBuf},
};

use tracing::info;

use crate::{
  FromPath,
  aggregate::AggregatedRecord,
  model::ModelKind,
  output::{OutputError, Report, write_csv},
};

/// 所有日期写入同一个未压缩的 CSV 文件
#[derive(Debug, Clone)]
pub struct CombinedReportOutput {
  path: PathBuf,
}

impl FromPath for CombinedReportOutput {
  type Error = OutputError;

  fn from_path(path: &Path) -> Result<Self, Self::Error> {
    Ok(CombinedReportOutput {
      path: path.to_path_buf(),
    })
  }
}

impl Report for CombinedReportOutput {
  type Error = OutputError;

  fn write_report(
    &self,
    model: ModelKind,
    records: &[AggregatedRecord],
  ) -> Result<Vec<PathBuf>, Self::Error> {
    if let Some(parent) = self.path.parent()
      && !parent.as_os_str().is_empty()
    {
      std::fs::create_dir_all(parent)?;
    }

    let file = BufWriter::new(File::create(&self.path)?);
    write_csv(file, model, records)?.flush()?;

    info!("保存汇总报表到文件: {}", self.path.display());
    Ok(vec![self.path.clone()])
  }
}
