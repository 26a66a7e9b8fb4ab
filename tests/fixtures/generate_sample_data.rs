// ==========================================
// 示例数据生成器
// ==========================================
// 用途: 生成排布表与参考表示例文件, 便于手动验证命令行
// 输出: tests/fixtures/datasets/
// ==========================================

use csv::Writer;
use std::error::Error;
use std::fs;

const OUTPUT_DIR: &str = "tests/fixtures/datasets";

// 类型 → (Width, Depth)
const REFERENCE_TYPES: &[(&str, f64, f64)] = &[
    ("A", 26.0, 39.0),
    ("B", 32.0, 39.0),
    ("C", 40.0, 45.5),
];

fn main() -> Result<(), Box<dyn Error>> {
    println!("开始生成示例数据...");
    fs::create_dir_all(OUTPUT_DIR)?;

    // 1. 参考表（xlsx + csv）
    generate_reference_xlsx()?;
    generate_reference_csv()?;

    // 2. 单表头排布表, 表头前有标题行
    generate_single_block()?;

    // 3. 多区块排布表
    generate_multi_block()?;

    // 4. 缺列参考表
    generate_broken_reference()?;

    println!("✓ 示例数据生成完成: {}", OUTPUT_DIR);
    Ok(())
}

/// 单表头排布: 3 个类型列块, 每块 2 个分组
fn single_block_rows() -> Vec<Vec<String>> {
    let mut rows = vec![
        vec!["Реестр сейфов, отделение 1803".to_string()],
        vec![String::new()],
        vec![String::new()],
    ];

    let mut type_row = vec![String::new()];
    let mut group_row = vec![String::new()];
    let mut leaf_row = vec!["Итого".to_string()];
    for (t_idx, (type_label, _, _)) in REFERENCE_TYPES.iter().enumerate() {
        for g in 0..2 {
            // 合并单元格只在起始列有值
            type_row.push(if g == 0 { type_label.to_string() } else { String::new() });
            type_row.push(String::new());
            group_row.push(format!("Отсек {}", t_idx * 2 + g + 1));
            group_row.push(String::new());
            leaf_row.push("№".to_string());
            leaf_row.push("размер".to_string());
        }
    }
    rows.push(type_row);
    rows.push(group_row);
    rows.push(leaf_row);

    for r in 0..12 {
        let mut row = vec![String::new()];
        for t_idx in 0..REFERENCE_TYPES.len() {
            for g in 0..2 {
                let base = (t_idx * 2 + g) * 100;
                row.push((base + r + 1).to_string());
                // 每 5 行一个空位
                if r % 5 == 4 {
                    row.push("нет".to_string());
                } else {
                    row.push(format!("{}", 203 + (r % 4) * 50));
                }
            }
        }
        rows.push(row);
    }
    rows
}

fn write_xlsx(path: &str, rows: &[Vec<String>]) -> Result<(), Box<dyn Error>> {
    let mut book = umya_spreadsheet::new_file();
    let sheet = book.get_sheet_mut(&0).ok_or("无法创建工作表")?;
    for (r, row) in rows.iter().enumerate() {
        for (c, value) in row.iter().enumerate() {
            if value.is_empty() {
                continue;
            }
            sheet
                .get_cell_mut((c as u32 + 1, r as u32 + 1))
                .set_value_string(value.clone());
        }
    }
    umya_spreadsheet::writer::xlsx::write(&book, path)?;
    Ok(())
}

fn write_csv(path: &str, rows: &[Vec<String>]) -> Result<(), Box<dyn Error>> {
    let mut wtr = Writer::from_path(path)?;
    let width = rows.iter().map(|r| r.len()).max().unwrap_or(0);
    for row in rows {
        let mut padded = row.clone();
        padded.resize(width, String::new());
        wtr.write_record(&padded)?;
    }
    wtr.flush()?;
    Ok(())
}

fn reference_rows() -> Vec<Vec<String>> {
    let mut rows = vec![vec![
        "Type".to_string(),
        "Width".to_string(),
        "Depth".to_string(),
    ]];
    for (type_label, width, depth) in REFERENCE_TYPES {
        rows.push(vec![
            type_label.to_string(),
            width.to_string(),
            depth.to_string(),
        ]);
    }
    rows
}

fn generate_reference_xlsx() -> Result<(), Box<dyn Error>> {
    let path = format!("{}/reference.xlsx", OUTPUT_DIR);
    write_xlsx(&path, &reference_rows())?;
    println!("  ✓ {}", path);
    Ok(())
}

fn generate_reference_csv() -> Result<(), Box<dyn Error>> {
    let path = format!("{}/reference.csv", OUTPUT_DIR);
    write_csv(&path, &reference_rows())?;
    println!("  ✓ {}", path);
    Ok(())
}

fn generate_single_block() -> Result<(), Box<dyn Error>> {
    let rows = single_block_rows();
    let xlsx = format!("{}/01_single_block.xlsx", OUTPUT_DIR);
    write_xlsx(&xlsx, &rows)?;
    let csv = format!("{}/01_single_block.csv", OUTPUT_DIR);
    write_csv(&csv, &rows)?;
    println!("  ✓ {} / {}", xlsx, csv);
    Ok(())
}

/// 多区块排布: 每个区块首行为参考表中的类型名
fn generate_multi_block() -> Result<(), Box<dyn Error>> {
    let mut rows = Vec::new();
    for (t_idx, (type_label, _, _)) in REFERENCE_TYPES.iter().enumerate() {
        rows.push(vec![type_label.to_string(), String::new(), String::new(), String::new()]);
        rows.push(vec![
            format!("Отсек {}", t_idx * 2 + 1),
            String::new(),
            format!("Отсек {}", t_idx * 2 + 2),
            String::new(),
        ]);
        rows.push(vec![
            "№".to_string(),
            "размер".to_string(),
            "№".to_string(),
            "размер".to_string(),
        ]);
        for r in 0..4 {
            rows.push(vec![
                (r + 1).to_string(),
                format!("{}", 253 + r * 50),
                (r + 11).to_string(),
                format!("{}", 303 + r * 50),
            ]);
        }
    }
    let path = format!("{}/02_multi_block.csv", OUTPUT_DIR);
    write_csv(&path, &rows)?;
    println!("  ✓ {}", path);
    Ok(())
}

fn generate_broken_reference() -> Result<(), Box<dyn Error>> {
    let path = format!("{}/03_reference_missing_depth.csv", OUTPUT_DIR);
    let rows = vec![
        vec!["Type".to_string(), "Width".to_string()],
        vec!["A".to_string(), "26".to_string()],
    ];
    write_csv(&path, &rows)?;
    println!("  ✓ {}", path);
    Ok(())
}
