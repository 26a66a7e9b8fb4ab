// ==========================================
// 保管箱排布表转换工具 - 文件级端到端测试
// ==========================================
// 覆盖: 输入加载 → 参考表 → 转换 → 写出 → 回读
// ==========================================


use calamine::{open_workbook_auto, Reader};
use safe_layout_pivot::config::TransformConfig;
use safe_layout_pivot::domain::{HeaderLayout, HeaderTriple, TransformMode, TransformWarning};
use safe_layout_pivot::engine::ErrorKind;
use safe_layout_pivot::{TransformApi, TransformError, TransformRequest};
use test_helpers::*;

fn expected_enriched_rows() -> Vec<Vec<String>> {
    [
        ["1", "1", "30", "26", "39", "A"],
        ["2", "11", "25", "26", "39", "A"],
        ["3", "21", "40", "32", "45.5", "B"],
        ["3", "22", "20", "32", "45.5", "B"],
        ["3", "23", "50", "32", "45.5", "B"],
    ]
    .iter()
    .map(|row| row.iter().map(|s| s.to_string()).collect())
    .collect()
}

// ==========================================
// 正常流程
// ==========================================

#[test]
fn test_enriched_csv_to_csv() {
    let (dir, input) = create_standard_workspace().unwrap();
    let output = dir.path().join("out.csv");

    let mut request = TransformRequest::new(&input);
    request.output_path = Some(output.clone());

    let report = TransformApi::new(TransformConfig::default())
        .run(&request)
        .unwrap();

    assert_eq!(report.output_path, output);
    assert_eq!(report.rows_written, 5);
    assert_eq!(report.headers, vec![HeaderTriple { h0: 3, h1: 4, h2: 5 }]);
    let labels: Vec<(&str, i64)> = report
        .groups
        .iter()
        .map(|g| (g.label.as_str(), g.nst))
        .collect();
    assert_eq!(labels, vec![("Отсек 1", 1), ("Отсек 2", 2), ("Отсек 3", 3)]);
    assert!(report.warnings.is_empty());

    let (headers, rows) = read_csv_records(&output).unwrap();
    assert_eq!(headers, vec!["nst", "nsafe", "height", "Width", "Depth", "Type"]);
    assert_eq!(rows, expected_enriched_rows());
}

#[test]
fn test_default_output_path_next_to_input() {
    let (dir, input) = create_standard_workspace().unwrap();

    let report = TransformApi::new(TransformConfig::default())
        .run(&TransformRequest::new(&input))
        .unwrap();

    let expected = dir.path().join("1803_transformed.csv");
    assert_eq!(report.output_path, expected);
    assert!(expected.exists());
}

#[test]
fn test_xlsx_input_and_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_xlsx(dir.path(), "1803.xlsx", &standard_layout_rows()).unwrap();
    write_xlsx(dir.path(), "reference.xlsx", &standard_reference_rows()).unwrap();

    let report = TransformApi::new(TransformConfig::default())
        .run(&TransformRequest::new(&input))
        .unwrap();
    assert_eq!(report.rows_written, 5);

    let mut workbook = open_workbook_auto(&report.output_path).unwrap();
    let sheet_name = workbook.sheet_names()[0].clone();
    let range = workbook.worksheet_range(&sheet_name).unwrap();
    let rows: Vec<Vec<String>> = range
        .rows()
        .map(|row| row.iter().map(|c| c.to_string()).collect())
        .collect();

    assert_eq!(rows[0], vec!["nst", "nsafe", "height", "Width", "Depth", "Type"]);
    assert_eq!(rows[1..].to_vec(), expected_enriched_rows());
}

#[test]
fn test_raw_mode_keeps_size_text() {
    let (dir, input) = create_standard_workspace().unwrap();
    let output = dir.path().join("raw.csv");

    let config = TransformConfig {
        mode: TransformMode::Raw,
        ..TransformConfig::default()
    };
    let mut request = TransformRequest::new(&input);
    request.output_path = Some(output.clone());
    let report = TransformApi::new(config).run(&request).unwrap();
    assert_eq!(report.rows_written, 6);

    let (headers, rows) = read_csv_records(&output).unwrap();
    assert_eq!(headers, vec!["nst", "nsafe", "height", "Type"]);
    assert_eq!(rows[0], vec!["1", "1", "303", "A"]);
    // 原样保留非数字尺寸
    assert_eq!(rows[1], vec!["1", "2", "нет", "A"]);
    assert!(rows.iter().all(|r| r[1] != "0"));
}

#[test]
fn test_raw_mode_without_reference_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_csv(dir.path(), "1803.csv", &standard_layout_rows()).unwrap();

    let config = TransformConfig {
        mode: TransformMode::Raw,
        ..TransformConfig::default()
    };
    let report = TransformApi::new(config)
        .run(&TransformRequest::new(&input))
        .unwrap();
    assert_eq!(report.rows_written, 6);
}

#[test]
fn test_unmapped_type_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_csv(dir.path(), "1803.csv", &standard_layout_rows()).unwrap();
    let reference = write_csv(
        dir.path(),
        "types.csv",
        &[vec!["Type", "Width", "Depth"], vec!["A", "26", "39"]],
    )
    .unwrap();
    let output = dir.path().join("out.csv");

    let mut request = TransformRequest::new(&input);
    request.output_path = Some(output.clone());
    request.reference_path = Some(reference);
    let report = TransformApi::new(TransformConfig::default())
        .run(&request)
        .unwrap();

    let unmapped = report
        .warnings
        .iter()
        .filter(|w| matches!(w, TransformWarning::UnmappedType { .. }))
        .count();
    assert_eq!(unmapped, 3);

    let (_, rows) = read_csv_records(&output).unwrap();
    assert_eq!(rows[2], vec!["3", "21", "40", "26", "39", "B"]);
}

#[test]
fn test_header_override() {
    let (dir, input) = create_standard_workspace().unwrap();
    let output = dir.path().join("out.csv");

    let mut request = TransformRequest::new(&input);
    request.output_path = Some(output.clone());
    request.header_override = Some("3,4,5".parse().unwrap());
    let report = TransformApi::new(TransformConfig::default())
        .run(&request)
        .unwrap();

    assert_eq!(report.headers, vec![HeaderTriple { h0: 3, h1: 4, h2: 5 }]);
    let (_, rows) = read_csv_records(&output).unwrap();
    assert_eq!(rows, expected_enriched_rows());
}

#[test]
fn test_multi_block_layout() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_csv(
        dir.path(),
        "blocks.csv",
        &[
            vec!["A", "", "", ""],
            vec!["Отсек 1", "", "Отсек 2", ""],
            vec!["№", "размер", "№", "размер"],
            vec!["1", "253", "11", "303"],
            vec!["2", "303", "12", "353"],
            vec!["B", "", "", ""],
            vec!["Отсек 5", "", "", ""],
            vec!["№", "размер", "", ""],
            vec!["7", "503", "", ""],
        ],
    )
    .unwrap();
    write_xlsx(dir.path(), "reference.xlsx", &standard_reference_rows()).unwrap();
    let output = dir.path().join("out.csv");

    let config = TransformConfig {
        layout: HeaderLayout::MultiBlock,
        ..TransformConfig::default()
    };
    let mut request = TransformRequest::new(&input);
    request.output_path = Some(output.clone());
    let report = TransformApi::new(config).run(&request).unwrap();

    assert_eq!(
        report.headers,
        vec![
            HeaderTriple { h0: 0, h1: 1, h2: 2 },
            HeaderTriple { h0: 5, h1: 6, h2: 7 },
        ]
    );

    let (_, rows) = read_csv_records(&output).unwrap();
    let keys: Vec<(&str, &str, &str)> = rows
        .iter()
        .map(|r| (r[0].as_str(), r[1].as_str(), r[5].as_str()))
        .collect();
    assert_eq!(
        keys,
        vec![
            ("1", "1", "A"),
            ("1", "2", "A"),
            ("2", "11", "A"),
            ("2", "12", "A"),
            ("5", "7", "B"),
        ]
    );
}

// ==========================================
// 致命错误: 不写出任何文件
// ==========================================

#[test]
fn test_missing_reference_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_csv(dir.path(), "1803.csv", &standard_layout_rows()).unwrap();
    let output = dir.path().join("out.csv");

    let mut request = TransformRequest::new(&input);
    request.output_path = Some(output.clone());
    let err = TransformApi::new(TransformConfig::default())
        .run(&request)
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::MissingReferenceFile);
    assert!(!output.exists());
}

#[test]
fn test_reference_schema_violation() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_csv(dir.path(), "1803.csv", &standard_layout_rows()).unwrap();
    let reference = write_csv(
        dir.path(),
        "types.csv",
        &[vec!["Type", "Width"], vec!["A", "26"]],
    )
    .unwrap();
    let output = dir.path().join("out.csv");

    let mut request = TransformRequest::new(&input);
    request.output_path = Some(output.clone());
    request.reference_path = Some(reference);
    let err = TransformApi::new(TransformConfig::default())
        .run(&request)
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::SchemaViolation);
    assert!(err.to_string().contains("Depth"));
    assert!(!output.exists());
}

#[test]
fn test_header_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_csv(
        dir.path(),
        "plain.csv",
        &[vec!["a", "b", "c"], vec!["1", "2", "3"]],
    )
    .unwrap();
    write_xlsx(dir.path(), "reference.xlsx", &standard_reference_rows()).unwrap();
    let output = dir.path().join("out.csv");

    let mut request = TransformRequest::new(&input);
    request.output_path = Some(output.clone());
    let err = TransformApi::new(TransformConfig::default())
        .run(&request)
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::HeaderNotFound);
    assert!(!output.exists());
}

#[test]
fn test_no_groups_found() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_csv(
        dir.path(),
        "nogroups.csv",
        &[
            vec!["A", "A", "A", "A", "A", "A"],
            vec!["Итого", "", "Всего", "", "Сумма", ""],
            vec!["№", "размер", "№", "размер", "№", "размер"],
            vec!["1", "303", "2", "303", "3", "303"],
        ],
    )
    .unwrap();
    write_xlsx(dir.path(), "reference.xlsx", &standard_reference_rows()).unwrap();
    let output = dir.path().join("out.csv");

    let mut request = TransformRequest::new(&input);
    request.output_path = Some(output.clone());
    let err = TransformApi::new(TransformConfig::default())
        .run(&request)
        .unwrap_err();

    assert!(matches!(err, TransformError::NoGroupsFound));
    assert!(!output.exists());
}

#[test]
fn test_no_data_produced() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_csv(
        dir.path(),
        "empty.csv",
        &[
            vec!["A", "", "", "", "", ""],
            vec!["Отсек 1", "", "Отсек 2", "", "Отсек 3", ""],
            vec!["№", "размер", "№", "размер", "№", "размер"],
            vec!["0", "303", "", "", "x", "303"],
        ],
    )
    .unwrap();
    write_xlsx(dir.path(), "reference.xlsx", &standard_reference_rows()).unwrap();
    let output = dir.path().join("out.csv");

    let mut request = TransformRequest::new(&input);
    request.output_path = Some(output.clone());
    let err = TransformApi::new(TransformConfig::default())
        .run(&request)
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::NoDataProduced);
    assert!(!output.exists());
}

#[test]
fn test_missing_input_takes_priority() {
    let dir = tempfile::tempdir().unwrap();
    let request = TransformRequest::new(dir.path().join("absent.csv"));

    let err = TransformApi::new(TransformConfig::default())
        .run(&request)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Input);
}

#[test]
fn test_unsupported_output_format() {
    let (dir, input) = create_standard_workspace().unwrap();
    let output = dir.path().join("out.json");

    let mut request = TransformRequest::new(&input);
    request.output_path = Some(output.clone());
    let err = TransformApi::new(TransformConfig::default())
        .run(&request)
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Export);
    assert!(!output.exists());
}

#[test]
fn test_override_without_selected_columns() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_csv(
        dir.path(),
        "plain.csv",
        &[
            vec!["a", "b", "c"],
            vec!["d", "e", "f"],
            vec!["g", "h", "i"],
            vec!["1", "2", "3"],
        ],
    )
    .unwrap();
    write_xlsx(dir.path(), "reference.xlsx", &standard_reference_rows()).unwrap();
    let output = dir.path().join("out.csv");

    let mut request = TransformRequest::new(&input);
    request.output_path = Some(output.clone());
    request.header_override = Some(HeaderTriple { h0: 0, h1: 1, h2: 2 });
    let err = TransformApi::new(TransformConfig::default())
        .run(&request)
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::NoGroupsFound);
    assert!(!output.exists());
}

#[test]
fn test_xlsm_input_defaults_to_xlsx_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_xlsx(dir.path(), "1803.xlsm", &standard_layout_rows()).unwrap();
    write_xlsx(dir.path(), "reference.xlsx", &standard_reference_rows()).unwrap();

    let report = TransformApi::new(TransformConfig::default())
        .run(&TransformRequest::new(&input))
        .unwrap();

    let expected = dir.path().join("1803_transformed.xlsx");
    assert_eq!(report.output_path, expected);
    assert_eq!(report.rows_written, 5);
    assert!(expected.exists());
}
