// 该文件是 CCTV Report （监控日报） 项目的一部分。
// src/model.rs - 检测模型与类别词表
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

use std::fmt;
use std::path::Path;

/// 新模型 (YOLO) 的类别词表
pub const YOLO_CLASSES: &[&str] = &[
  "car",
  "pedestrian",
  "cyclist",
  "motorcycle",
  "bus",
  "lorry",
  "van",
  "taxi",
];

/// 旧模型 (TensorFlow 2) 的类别词表
pub const TF2_CLASSES: &[&str] = &["car", "person", "bicycle", "motorcycle", "bus", "truck"];

const YOLO_ID: &str = "yolo";
const TF2_ID: &str = "tf2";

/// 产生检测记录的模型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelKind {
  Yolo,
  Tf2,
}

impl ModelKind {
  /// 根据模型标识解析模型；除 `yolo` 以外的任何标识都归为 `tf2`
  pub fn resolve(id: &str) -> Self {
    if id == YOLO_ID {
      ModelKind::Yolo
    } else {
      ModelKind::Tf2
    }
  }

  /// 输入文件路径的前 4 个字符即模型标识
  pub fn from_input_path(path: &Path) -> Self {
    let path = path.to_string_lossy();
    let prefix: String = path.chars().take(YOLO_ID.len()).collect();
    Self::resolve(&prefix)
  }

  pub fn name(&self) -> &'static str {
    match self {
      ModelKind::Yolo => YOLO_ID,
      ModelKind::Tf2 => TF2_ID,
    }
  }

  pub fn classes(&self) -> &'static [&'static str] {
    match self {
      ModelKind::Yolo => YOLO_CLASSES,
      ModelKind::Tf2 => TF2_CLASSES,
    }
  }
}

impl fmt::Display for ModelKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn yolo_identifier_uses_eight_classes() {
    let model = ModelKind::resolve("yolo");
    assert_eq!(model, ModelKind::Yolo);
    assert_eq!(model.name(), "yolo");
    assert_eq!(model.classes().len(), 8);
    assert_eq!(model.classes()[5], "lorry");
  }

  #[test]
  fn unknown_identifier_falls_back_to_tf2() {
    for id in ["tf2", "", "YOLO", "yol", "ssd-mobilenet"] {
      let model = ModelKind::resolve(id);
      assert_eq!(model, ModelKind::Tf2, "id = {id:?}");
      assert_eq!(model.name(), "tf2");
      assert_eq!(model.classes(), TF2_CLASSES);
    }
  }

  #[test]
  fn model_is_taken_from_path_prefix() {
    assert_eq!(
      ModelKind::from_input_path(Path::new("yolo-beta-20230509.csv")),
      ModelKind::Yolo
    );
    assert_eq!(
      ModelKind::from_input_path(Path::new("yolov8/detections.csv")),
      ModelKind::Yolo
    );
    assert_eq!(
      ModelKind::from_input_path(Path::new("tf2-beta-20230509.csv")),
      ModelKind::Tf2
    );
    assert_eq!(
      ModelKind::from_input_path(Path::new("data/yolo-beta.csv")),
      ModelKind::Tf2
    );
    assert_eq!(ModelKind::from_input_path(Path::new("yo")), ModelKind::Tf2);
  }
}
