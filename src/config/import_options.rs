// ==========================================
// 电子表格导入 - 导入选项
// ==========================================
// 职责: 表头行 / 首个数据行 / 工作表 / 文件格式
// 来源: JSON 配置文件或命令行参数
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::WorkbookFormat;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportOptions {
    /// 表头行号（0 起始）
    pub header_row: u32,
    /// 首个数据行号（0 起始）
    pub first_data_row: u32,
    /// 工作表名称；None 取第一个可读工作表
    pub sheet: Option<String>,
    /// 文件格式；None 按扩展名判断（字节导入时为 .xls）
    pub format: Option<WorkbookFormat>,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            header_row: 0,
            first_data_row: 1,
            sheet: None,
            format: None,
        }
    }
}

impl ImportOptions {
    pub fn with_rows(mut self, header_row: u32, first_data_row: u32) -> Self {
        self.header_row = header_row;
        self.first_data_row = first_data_row;
        self
    }

    pub fn with_sheet(mut self, sheet: impl Into<String>) -> Self {
        self.sheet = Some(sheet.into());
        self
    }

    pub fn with_format(mut self, format: WorkbookFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> ImportResult<Self> {
        let path = path.as_ref();
        let config_error = |message: String| ImportError::ConfigReadError {
            path: path.display().to_string(),
            message,
        };
        let raw = fs::read_to_string(path).map_err(|e| config_error(e.to_string()))?;
        serde_json::from_str(&raw).map_err(|e| config_error(e.to_string()))
    }
}
