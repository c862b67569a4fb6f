// ==========================================
// 电子表格导入 - 文件解析器实现
// ==========================================
// 职责: 工作簿字节 / 文件 → GridSheet
// 支持: Excel (.xls 默认 / .xlsx) / CSV (.csv)
// 说明: 只取一个工作表；未指定名称时取第一个可读的工作表
// ==========================================

use crate::domain::cell::CellValue;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::sheet_source::GridSheet;
use calamine::{Data, DataType, Range, Reader, Xls, Xlsx};
use csv::ReaderBuilder;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{Cursor, Read, Seek};
use std::path::Path;
use tracing::{debug, warn};

// ==========================================
// WorkbookFormat - 工作簿格式
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkbookFormat {
    Xls,
    Xlsx,
    Csv,
}

impl WorkbookFormat {
    /// 根据扩展名识别（大小写不敏感）
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "xls" => Some(WorkbookFormat::Xls),
            "xlsx" | "xlsm" => Some(WorkbookFormat::Xlsx),
            "csv" => Some(WorkbookFormat::Csv),
            _ => None,
        }
    }
}

// ==========================================
// WorkbookParser Trait
// ==========================================
pub trait WorkbookParser {
    /// 解析内存中的工作簿
    ///
    /// # 参数
    /// - bytes: 文件内容
    /// - sheet: 指定工作表名称；None 取第一个可读工作表
    fn parse_bytes(&self, bytes: &[u8], sheet: Option<&str>) -> ImportResult<GridSheet>;

    /// 解析文件
    fn parse_file(&self, path: &Path, sheet: Option<&str>) -> ImportResult<GridSheet> {
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }
        let bytes = fs::read(path)?;
        self.parse_bytes(&bytes, sheet)
    }
}

// ==========================================
// Excel Parser 实现
// ==========================================
pub struct XlsParser;

impl WorkbookParser for XlsParser {
    fn parse_bytes(&self, bytes: &[u8], sheet: Option<&str>) -> ImportResult<GridSheet> {
        let mut workbook: Xls<_> = Xls::new(Cursor::new(bytes))
            .map_err(|e| ImportError::ExcelParseError(e.to_string()))?;
        read_sheet(&mut workbook, sheet)
    }
}

pub struct XlsxParser;

impl WorkbookParser for XlsxParser {
    fn parse_bytes(&self, bytes: &[u8], sheet: Option<&str>) -> ImportResult<GridSheet> {
        let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes))
            .map_err(|e| ImportError::ExcelParseError(e.to_string()))?;
        read_sheet(&mut workbook, sheet)
    }
}

/// 选取工作表并转换为 GridSheet
fn read_sheet<RS, R>(workbook: &mut R, sheet: Option<&str>) -> ImportResult<GridSheet>
where
    RS: Read + Seek,
    R: Reader<RS>,
    R::Error: std::fmt::Display,
{
    let sheet_names = workbook.sheet_names();

    if let Some(name) = sheet {
        if !sheet_names.iter().any(|n| n == name) {
            return Err(ImportError::SheetNotFound(name.to_string()));
        }
        let range = workbook
            .worksheet_range(name)
            .map_err(|e| ImportError::ExcelParseError(e.to_string()))?;
        return Ok(range_to_grid(name, &range));
    }

    for name in &sheet_names {
        match workbook.worksheet_range(name) {
            Ok(range) => {
                debug!(sheet = %name, "选中工作表");
                return Ok(range_to_grid(name, &range));
            }
            Err(e) => warn!(sheet = %name, error = %e, "工作表读取失败，尝试下一个"),
        }
    }
    Err(ImportError::NoSheet)
}

/// calamine 区域 → GridSheet（保留绝对行列位置）
pub fn range_to_grid(name: &str, range: &Range<Data>) -> GridSheet {
    let mut grid = GridSheet::new(name);
    let Some((start_row, start_col)) = range.start() else {
        return grid;
    };

    for (offset, row) in range.rows().enumerate() {
        let cells: Vec<CellValue> = std::iter::repeat(CellValue::Empty)
            .take(start_col as usize)
            .chain(row.iter().map(data_to_cell))
            .collect();
        grid.set_row(start_row + offset as u32, cells);
    }
    grid
}

/// calamine 单元格 → CellValue
pub fn data_to_cell(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Empty,
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::String(s) => CellValue::from(s.as_str()),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => data
            .as_datetime()
            .map_or(CellValue::Number(dt.as_f64()), CellValue::DateTime),
        Data::DateTimeIso(s) => data
            .as_datetime()
            .map_or_else(|| CellValue::Text(s.clone()), CellValue::DateTime),
        Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(e) => CellValue::Error(e.to_string()),
    }
}

// ==========================================
// CSV Parser 实现
// ==========================================
pub struct CsvParser;

impl WorkbookParser for CsvParser {
    fn parse_bytes(&self, bytes: &[u8], sheet: Option<&str>) -> ImportResult<GridSheet> {
        let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF".as_slice()).unwrap_or(bytes);
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true) // 允许行长度不一致
            .from_reader(bytes);

        let mut grid = GridSheet::new(sheet.unwrap_or("csv"));
        for result in reader.records() {
            let record = result?;
            grid.push_row(record.iter().map(CellValue::from).collect());
        }
        Ok(grid)
    }
}

// ==========================================
// 通用文件解析器（根据扩展名自动选择）
// ==========================================
pub struct UniversalFileParser;

impl UniversalFileParser {
    fn parser_for(format: WorkbookFormat) -> Box<dyn WorkbookParser> {
        match format {
            WorkbookFormat::Xls => Box::new(XlsParser),
            WorkbookFormat::Xlsx => Box::new(XlsxParser),
            WorkbookFormat::Csv => Box::new(CsvParser),
        }
    }

    pub fn parse_bytes(
        &self,
        bytes: &[u8],
        format: WorkbookFormat,
        sheet: Option<&str>,
    ) -> ImportResult<GridSheet> {
        Self::parser_for(format).parse_bytes(bytes, sheet)
    }

    pub fn parse_file_as(
        &self,
        path: &Path,
        format: WorkbookFormat,
        sheet: Option<&str>,
    ) -> ImportResult<GridSheet> {
        Self::parser_for(format).parse_file(path, sheet)
    }

    pub fn parse_file<P: AsRef<Path>>(&self, file_path: P, sheet: Option<&str>) -> ImportResult<GridSheet> {
        let path = file_path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        let format =
            WorkbookFormat::from_extension(&ext).ok_or_else(|| ImportError::UnsupportedFormat(ext))?;
        self.parse_file_as(path, format, sheet)
    }
}
