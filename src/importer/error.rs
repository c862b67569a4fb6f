// ==========================================
// 电子表格导入 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// 说明: 这里只描述"无法继续"的结构性失败
//       行级 / 字段级失败以 RowError 收集，不走 Err
// ==========================================

use thiserror::Error;

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文件相关错误 =====
    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("文件格式不支持: {0}（仅支持 .xls/.xlsx/.csv）")]
    UnsupportedFormat(String),

    #[error("文件读取失败: {0}")]
    FileReadError(String),

    #[error("Excel 解析失败: {0}")]
    ExcelParseError(String),

    #[error("CSV 解析失败: {0}")]
    CsvParseError(String),

    // ===== 工作表结构错误 =====
    #[error("工作簿中没有可用的工作表")]
    NoSheet,

    #[error("工作表不存在: {0}")]
    SheetNotFound(String),

    #[error("表头行不存在 (行 {0})")]
    HeaderRowMissing(u32),

    #[error("表头行没有非空列名 (行 {0})")]
    NoHeaderColumns(u32),

    #[error("目标类型没有声明任何列名")]
    NoDeclaredColumns,

    #[error("表头与字段声明没有匹配的列")]
    NoMatchedColumns,

    // ===== 配置错误 =====
    #[error("配置读取失败 ({path}): {message}")]
    ConfigReadError { path: String, message: String },

    #[error("字段声明无效 (字段 {field}): {message}")]
    InvalidSchema { field: String, message: String },

    // ===== 通用错误 =====
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ImportError {
    /// 是否为表头/列解析阶段的结构性失败
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            ImportError::NoSheet
                | ImportError::SheetNotFound(_)
                | ImportError::HeaderRowMissing(_)
                | ImportError::NoHeaderColumns(_)
                | ImportError::NoDeclaredColumns
                | ImportError::NoMatchedColumns
        )
    }
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

// 实现 From<csv::Error>
impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvParseError(err.to_string())
    }
}

// 实现 From<serde_json::Error>（内存中的 JSON 配置）
impl From<serde_json::Error> for ImportError {
    fn from(err: serde_json::Error) -> Self {
        ImportError::ConfigReadError {
            path: "<inline>".to_string(),
            message: err.to_string(),
        }
    }
}

// 实现 From<calamine::Error>
impl From<calamine::Error> for ImportError {
    fn from(err: calamine::Error) -> Self {
        ImportError::ExcelParseError(err.to_string())
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;
