// ==========================================
// 电子表格导入 - 核心库
// ==========================================
// 职责: 工作表行 → 类型化对象，收集行级错误
// 技术栈: calamine + csv + regex + rust_decimal
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "zh-CN");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 单元格、字段描述、导入结果
pub mod domain;

// 导入层 - 文件解析、列解析、行映射
pub mod importer;

// 配置层 - 导入选项、字段声明配置
pub mod config;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::{
    CellValue, DropdownMode, FieldDescriptor, FieldKind, FieldValue, ImportOutcome,
    ImportSummary, ParsedRecord, Record, RowError, RowErrorKind, Schema, SheetRecord,
};

// 导入器
pub use importer::{
    GridSheet, ImportError, ImportResult, OptionTable, SheetImporter, SheetSource,
    UniversalFileParser, WorkbookFormat,
};

// 配置
pub use config::{ImportOptions, SchemaConfig};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
