//! CSV 导出工具
//! 表头 `ID,Name,Score,Date`，姓名字段加引号并将内部引号加倍

use chrono::NaiveDate;

use crate::storage::Record;

const CSV_HEADER: &str = "ID,Name,Score,Date";

/// 将成绩记录导出为 CSV 文本
pub fn records_to_csv(records: &[Record]) -> String {
    let mut csv = String::with_capacity(32 * (records.len() + 1));
    csv.push_str(CSV_HEADER);
    csv.push('\n');

    for record in records {
        csv.push_str(&format!(
            "{},\"{}\",{},\"{}\"\n",
            record.id,
            record.name.replace('"', "\"\""),
            record.total_score,
            record.timestamp.format("%Y-%m-%d")
        ));
    }
    csv
}

/// 默认导出文件名，如 `results_2024-05-01.csv`
pub fn export_file_name(date: NaiveDate) -> String {
    format!("results_{}.csv", date.format("%Y-%m-%d"))
}
