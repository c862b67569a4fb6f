// ==========================================
// 电子表格导入 - 导入层
// ==========================================
// 职责: 工作表 → 类型化对象 + 行错误
// 支持: Excel (.xls/.xlsx), CSV
// 流程: 文件解析 → 列解析 → 逐行映射 → 汇总
// ==========================================

// 模块声明
pub mod column_resolver;
pub mod date_parser;
pub mod error;
pub mod file_parser;
pub mod option_table;
pub mod row_mapper;
pub mod sheet_importer;
pub mod sheet_source;
pub mod text_cleaner;
pub mod value_coercion;

// 重导出核心类型
pub use column_resolver::{column_label, FieldColumn, FieldColumnMap};
pub use date_parser::parse_date;
pub use error::{ImportError, ImportResult};
pub use file_parser::{CsvParser, UniversalFileParser, WorkbookFormat, XlsParser, XlsxParser};
pub use option_table::OptionTable;
pub use row_mapper::{RowMapper, RowOutcome};
pub use sheet_importer::SheetImporter;
pub use sheet_source::{GridSheet, SheetSource};
pub use text_cleaner::normalize_text;
pub use value_coercion::{coerce, CoercionError};

// 重导出 Trait 接口
pub use file_parser::WorkbookParser;
