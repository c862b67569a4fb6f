// ==========================================
// 电子表格导入 - 领域层
// ==========================================
// 职责: 单元格模型、字段描述、导入结果
// ==========================================

pub mod cell;
pub mod field;
pub mod record;
pub mod report;

// 重导出核心类型
pub use cell::{CellValue, FormulaValue};
pub use field::{
    AssignError, Dropdown, DropdownMode, FieldDescriptor, FieldKind, FieldValue, FromFieldValue,
    Schema, SheetRecord,
};
pub use record::Record;
pub use report::{ImportOutcome, ImportSummary, ParsedRecord, RowError, RowErrorKind};
