// 该文件是 CCTV Report （监控日报） 项目的一部分。
// src/args.rs - 项目参数配置
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

use std::path::PathBuf;

use clap::Parser;

use cctv_report::model::ModelKind;

/// CCTV 日报生成参数
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
  /// 检测记录 CSV 文件路径
  /// 路径前 4 个字符为 `yolo` 时使用 YOLO 词表，否则使用 TF2 词表
  #[arg(value_name = "INPUT")]
  pub input: PathBuf,

  /// 日报输出目录
  #[arg(long, default_value = "daily_reports", value_name = "DIR")]
  pub output_dir: PathBuf,

  /// 指定模型标识，覆盖从输入路径推断的模型
  #[arg(long, value_name = "MODEL")]
  pub model: Option<String>,

  /// 额外写出一个包含所有日期的未压缩汇总报表
  #[arg(long, value_name = "FILE")]
  pub combined: Option<PathBuf>,
}

impl Args {
  pub fn model_kind(&self) -> ModelKind {
    match &self.model {
      Some(id) => ModelKind::resolve(id),
      None => ModelKind::from_input_path(&self.input),
    }
  }
}
