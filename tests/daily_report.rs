// 该文件是 CCTV Report （监控日报） 项目的一部分。
// tests/daily_report.rs - 日报生成的端到端测试
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
  path::{Path, PathBuf},
  process::Command,
};

use cctv_report::{
  FromPath,
  input::CsvFileInput,
  model::ModelKind,
  output::DailyReportOutput,
  task::{DailyReportTask, Task},
};
use flate2::read::GzDecoder;

const HEADER: &str = "image_proc,image_capt,camera_ref,warnings,class_name,score\n";

fn write_input(dir: &Path, name: &str, body: &str) -> PathBuf {
  let path = dir.join(name);
  std::fs::write(&path, format!("{HEADER}{body}")).unwrap();
  path
}

fn read_report(path: &Path) -> Vec<Vec<String>> {
  let decoder = GzDecoder::new(File::open(path).unwrap());
  let mut reader = csv::ReaderBuilder::new()
    .has_headers(false)
    .from_reader(decoder);
  reader
    .records()
    .map(|r| r.unwrap().iter().map(str::to_string).collect())
    .collect()
}

#[test]
fn yolo_image_with_cars_and_pedestrian() {
  let dir = tempfile::tempdir().unwrap();
  let input = write_input(
    dir.path(),
    "detections.csv",
    "2023-05-10 10:00:05+0100,2023-05-10 10:00:00+0100,A13,0,car,0.91\n\
     2023-05-10 10:00:05+0100,2023-05-10 10:00:00+0100,A13,0,car,0.85\n\
     2023-05-10 10:00:05+0100,2023-05-10 10:00:00+0100,A13,0,pedestrian,0.77\n",
  );

  let output = DailyReportOutput::from_path(&dir.path().join("daily_reports")).unwrap();
  let summary = DailyReportTask::new(ModelKind::Yolo)
    .run_task(CsvFileInput::from_path(&input).unwrap(), output)
    .unwrap();

  let expected = dir
    .path()
    .join("daily_reports/yolo/cctv-report-v2-yolo-20230510.csv.gz");
  assert_eq!(summary.files, vec![expected.clone()]);

  let rows = read_report(&expected);
  assert_eq!(
    rows[0],
    [
      "image_proc",
      "image_capt",
      "camera_ref",
      "model_name",
      "car",
      "pedestrian",
      "cyclist",
      "motorcycle",
      "bus",
      "lorry",
      "van",
      "taxi",
      "warnings"
    ]
  );
  assert_eq!(rows.len(), 2);
  assert_eq!(
    rows[1],
    [
      "2023-05-10 10:00:05+0100",
      "2023-05-10 10:00:00+0100",
      "A13",
      "yolo",
      "2",
      "1",
      "0",
      "0",
      "0",
      "0",
      "0",
      "0",
      "0"
    ]
  );
}

#[test]
fn one_file_per_capture_day() {
  let dir = tempfile::tempdir().unwrap();
  let input = write_input(
    dir.path(),
    "detections.csv",
    "2023-03-26 00:30:10+0000,2023-03-26 00:30:00+0000,A13,0,car,0.9\n\
     2023-03-25 23:10:10+0000,2023-03-25 23:10:00+0000,A13,0,,\n\
     2023-03-25 12:00:10+0000,2023-03-25 12:00:00+0000,A20,0,truck,0.6\n\
     2023-03-25 12:00:10+0000,2023-03-25 12:00:00+0000,Parking A13,0,car,0.6\n",
  );

  let output = DailyReportOutput::from_path(dir.path()).unwrap();
  let summary = DailyReportTask::new(ModelKind::Tf2)
    .run_task(CsvFileInput::from_path(&input).unwrap(), output)
    .unwrap();

  assert_eq!(summary.normalize.parking_rows, 1);
  assert_eq!(
    summary.files,
    vec![
      dir.path().join("tf2/cctv-report-v2-tf2-20230325.csv.gz"),
      dir.path().join("tf2/cctv-report-v2-tf2-20230326.csv.gz"),
    ]
  );

  let first = read_report(&summary.files[0]);
  assert_eq!(first.len(), 3);
  assert_eq!(first[1][2], "A20");
  assert_eq!(first[1][9], "1");
  assert_eq!(first[2][1], "2023-03-25 23:10:00+0000");

  let second = read_report(&summary.files[1]);
  assert_eq!(second.len(), 2);
  assert_eq!(second[1][1], "2023-03-26 01:30:00+0100");
  assert_eq!(second[1][3], "tf2");
  assert_eq!(second[1][4], "1");
}

#[test]
fn binary_routes_model_from_input_path() {
  let dir = tempfile::tempdir().unwrap();
  write_input(
    dir.path(),
    "yolo-beta-20230510.csv",
    "2023-05-10 10:00:05+0100,2023-05-10 10:00:00+0100,A13,0,van,0.91\n",
  );
  write_input(
    dir.path(),
    "ssd-beta-20230510.csv",
    "2023-05-10 10:00:05+0100,2023-05-10 10:00:00+0100,A13,0,person,0.91\n",
  );

  for input in ["yolo-beta-20230510.csv", "ssd-beta-20230510.csv"] {
    let status = Command::new(env!("CARGO_BIN_EXE_cctv-report"))
      .current_dir(dir.path())
      .arg(input)
      .status()
      .unwrap();
    assert!(status.success(), "input = {input}");
  }

  let yolo = read_report(
    &dir
      .path()
      .join("daily_reports/yolo/cctv-report-v2-yolo-20230510.csv.gz"),
  );
  assert_eq!(yolo[0].len(), 13);
  assert_eq!(yolo[1][3], "yolo");
  assert_eq!(yolo[1][10], "1");

  let tf2 = read_report(
    &dir
      .path()
      .join("daily_reports/tf2/cctv-report-v2-tf2-20230510.csv.gz"),
  );
  assert_eq!(tf2[0].len(), 11);
  assert_eq!(tf2[1][3], "tf2");
  assert_eq!(tf2[1][5], "1");
}

#[test]
fn binary_fails_on_malformed_input_without_writing() {
  let dir = tempfile::tempdir().unwrap();
  write_input(
    dir.path(),
    "yolo-broken.csv",
    "2023-05-10T10:00:05Z,2023-05-10 10:00:00+0100,A13,0,car,0.91\n",
  );

  let status = Command::new(env!("CARGO_BIN_EXE_cctv-report"))
    .current_dir(dir.path())
    .arg("yolo-broken.csv")
    .status()
    .unwrap();
  assert!(!status.success());
  assert!(!dir.path().join("daily_reports").exists());
}

#[test]
fn binary_writes_combined_report() {
  let dir = tempfile::tempdir().unwrap();
  write_input(
    dir.path(),
    "yolo-beta.csv",
    "2023-05-10 10:00:05+0100,2023-05-10 10:00:00+0100,A13,0,car,0.91\n\
     2023-05-11 10:00:05+0100,2023-05-11 10:00:00+0100,A13,0,,\n",
  );

  let status = Command::new(env!("CARGO_BIN_EXE_cctv-report"))
    .current_dir(dir.path())
    .args(["yolo-beta.csv", "--combined", "combined.csv"])
    .status()
    .unwrap();
  assert!(status.success());

  let combined = std::fs::read_to_string(dir.path().join("combined.csv")).unwrap();
  assert_eq!(combined.lines().count(), 3);
  assert!(dir.path().join("daily_reports/yolo").read_dir().unwrap().count() == 2);
}

#[test]
fn warnings_cells_are_reported_as_read() {
  let dir = tempfile::tempdir().unwrap();
  let input = write_input(
    dir.path(),
    "detections.csv",
    "2023-05-10 10:00:05+0100,2023-05-10 10:00:00+0100,A13,0.0,car,0.91\n\
     2023-05-10 11:00:05+0100,2023-05-10 11:00:00+0100,A20,True,,\n\
     2023-05-10 12:00:05+0100,2023-05-10 12:00:00+0100,A31,blur,bus,0.66\n",
  );

  let output = DailyReportOutput::from_path(dir.path()).unwrap();
  let summary = DailyReportTask::new(ModelKind::Yolo)
    .run_task(CsvFileInput::from_path(&input).unwrap(), output)
    .unwrap();

  let rows = read_report(&summary.files[0]);
  assert_eq!(rows.len(), 4);
  let warnings: Vec<&str> = rows[1..].iter().map(|r| r[12].as_str()).collect();
  assert_eq!(warnings, ["0.0", "True", "blur"]);
}

#[test]
fn binary_fails_when_output_dir_is_a_file() {
  let dir = tempfile::tempdir().unwrap();
  write_input(
    dir.path(),
    "yolo-beta.csv",
    "2023-05-10 10:00:05+0100,2023-05-10 10:00:00+0100,A13,0,car,0.91\n",
  );
  std::fs::write(dir.path().join("not_a_dir"), "").unwrap();

  let status = Command::new(env!("CARGO_BIN_EXE_cctv-report"))
    .current_dir(dir.path())
    .args(["yolo-beta.csv", "--output-dir", "not_a_dir"])
    .status()
    .unwrap();
  assert!(!status.success());
  assert!(dir.path().join("not_a_dir").is_file());
}
