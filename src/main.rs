// 该文件是 CCTV Report （监控日报） 项目的一部分。
// src/main.rs - 项目主程序
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

mod args;

use anyhow::Result;
use clap::Parser;
use tracing::{info, warn};

use cctv_report::{
  FromPath,
  input::CsvFileInput,
  output::{CombinedReportOutput, DailyReportOutput, OutputWrapper},
  task::{DailyReportTask, Task},
};

fn main() -> Result<()> {
  tracing_subscriber::fmt::init();

  let args = args::Args::parse();
  let model = args.model_kind();

  info!("输入文件: {}", args.input.display());

  let input = CsvFileInput::from_path(&args.input)?;
  if input.is_empty() {
    warn!("输入文件没有数据行, 不会生成日报");
  }

  let daily = DailyReportOutput::from_path(&args.output_dir)?;
  info!("输出目录: {}", daily.directory().display());
  let mut outputs = vec![OutputWrapper::DailyReport(daily)];
  if let Some(path) = &args.combined {
    info!("汇总报表: {}", path.display());
    outputs.push(OutputWrapper::CombinedReport(
      CombinedReportOutput::from_path(path)?,
    ));
  }

  let task = DailyReportTask::new(model);
  info!("模型: {} ({} 个类别)", task.model(), task.model().classes().len());
  let summary = task.run_task(input, outputs)?;

  info!(
    "处理完成! 读取 {} 行, 检测 {} 条, 无检测 {} 条, 输出 {} 行, {} 个文件",
    summary.normalize.rows_read,
    summary.detections,
    summary.placeholders,
    summary.dedup.rows_kept,
    summary.files.len()
  );

  Ok(())
}
