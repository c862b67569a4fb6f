// ==========================================
// 电子表格导入 - 行映射
// ==========================================
// 职责: 一行数据 → 目标对象 或 字段错误列表
// 流程（逐字段，互不短路）:
// 1. 取单元格文本并清洗
// 2. 为空且必填 → required，不再做后续处理
// 3. 下拉框: translate 显示名 → 存储值 / validate 校验存储值（空值同样校验）
// 4. 正则完全匹配（非空时）
// 5. 类型转换并赋值（空值仅文本可通过）
// 空行（所有已映射列均为空）既不算成功也不算失败
// ==========================================

use crate::domain::cell::CellValue;
use crate::domain::field::{DropdownMode, FieldDescriptor, Schema};
use crate::domain::report::{ParsedRecord, RowError, RowErrorKind};
use crate::importer::column_resolver::{column_label, FieldColumnMap};
use crate::importer::option_table::OptionTable;
use crate::importer::sheet_source::SheetSource;
use crate::importer::text_cleaner::normalized_cell_text;
use crate::importer::value_coercion::coerce;
use tracing::trace;

// ==========================================
// RowOutcome - 单行映射结果
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub enum RowOutcome<T> {
    /// 空行，静默跳过
    Blank,
    /// 无任何字段错误
    Parsed(ParsedRecord<T>),
    /// 至少一个字段错误，对象被丢弃
    Failed(Vec<RowError>),
}

// ==========================================
// RowMapper - 行映射器
// ==========================================
pub struct RowMapper<'a, T> {
    schema: &'a Schema<T>,
    columns: &'a FieldColumnMap,
    options: &'a OptionTable,
}

impl<'a, T> RowMapper<'a, T> {
    pub fn new(schema: &'a Schema<T>, columns: &'a FieldColumnMap, options: &'a OptionTable) -> Self {
        Self {
            schema,
            columns,
            options,
        }
    }

    /// 行不存在，或所有已映射列清洗后均为空
    pub fn is_blank_row(&self, sheet: &dyn SheetSource, row: u32) -> bool {
        if !sheet.has_row(row) {
            return true;
        }
        self.columns
            .entries()
            .iter()
            .all(|entry| normalized_cell_text(sheet.cell(row, entry.column)).is_empty())
    }

    /// 映射一行（row 为 0 起始的绝对行号）
    pub fn map_row(&self, sheet: &dyn SheetSource, row: u32) -> RowOutcome<T> {
        if self.is_blank_row(sheet, row) {
            return RowOutcome::Blank;
        }

        let row_number = row + 1;
        let mut target = self.schema.new_target();
        let mut errors = Vec::new();

        for entry in self.columns.entries() {
            let Some(descriptor) = self.schema.fields().get(entry.field_index) else {
                continue;
            };
            let cell = sheet.cell(row, entry.column);

            if let Err(kind) = self.map_field(&mut target, descriptor, cell) {
                let error = RowError {
                    row: row_number,
                    column: column_label(entry.column + 1),
                    field: descriptor.field().to_string(),
                    kind,
                };
                trace!(row = row_number, column = %error.column, field = %error.field, kind = %kind, "字段校验失败");
                errors.push(error);
            }
        }

        if errors.is_empty() {
            RowOutcome::Parsed(ParsedRecord {
                row: row_number,
                object: target,
            })
        } else {
            RowOutcome::Failed(errors)
        }
    }

    /// 处理单个字段；返回第一个失败的错误类型
    fn map_field(
        &self,
        target: &mut T,
        descriptor: &FieldDescriptor<T>,
        cell: Option<&CellValue>,
    ) -> Result<(), RowErrorKind> {
        let text = normalized_cell_text(cell);

        // 只有必填校验会在空值时提前结束；可空的空值继续走下拉框与类型转换
        if text.is_empty() && descriptor.is_required() {
            return Err(RowErrorKind::Required);
        }

        let mut value = text;
        if let Some(dropdown) = descriptor.dropdown_spec() {
            match dropdown.mode {
                DropdownMode::Translate => match self.options.translate(&dropdown.name, &value) {
                    Some(stored) if !stored.is_empty() => value = stored.to_string(),
                    _ => return Err(RowErrorKind::IllegalValue),
                },
                DropdownMode::Validate => {
                    if !self.options.is_valid_value(&dropdown.name, &value) {
                        return Err(RowErrorKind::IllegalValue);
                    }
                }
            }
        }

        if !value.is_empty() && !descriptor.matches_pattern(&value) {
            return Err(RowErrorKind::Format);
        }

        let coerced = coerce(&value, descriptor.kind(), cell).map_err(|_| RowErrorKind::TypeIllegal)?;
        descriptor
            .assign(target, coerced)
            .map_err(|_| RowErrorKind::IllegalAccess)
    }
}
