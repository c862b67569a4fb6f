// ==========================================
// 电子表格导入 - 导入编排
// ==========================================
// 职责: 列解析一次 → 逐行映射 → 汇总结果
// 流程:
// 1. 解析表头与字段声明，得到字段 → 列下标映射
//    （失败则整体放弃，不产生任何行级结果）
// 2. 从首个数据行扫描到末行，空行静默跳过
// 3. 成功对象与行错误按行顺序收集，不因错误中断
// ==========================================

use crate::config::ImportOptions;
use crate::domain::field::{Schema, SheetRecord};
use crate::domain::report::ImportOutcome;
use crate::importer::column_resolver;
use crate::importer::error::ImportResult;
use crate::importer::file_parser::{UniversalFileParser, WorkbookFormat};
use crate::importer::option_table::OptionTable;
use crate::importer::row_mapper::{RowMapper, RowOutcome};
use crate::importer::sheet_source::SheetSource;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, info_span, warn};
use uuid::Uuid;

// ==========================================
// SheetImporter - 导入编排器
// ==========================================
// 选项表只读共享；其余状态每次导入独立创建
#[derive(Debug, Clone, Default)]
pub struct SheetImporter {
    options: Arc<OptionTable>,
}

impl SheetImporter {
    pub fn new(options: impl Into<Arc<OptionTable>>) -> Self {
        Self {
            options: options.into(),
        }
    }

    pub fn options(&self) -> &OptionTable {
        &self.options
    }

    /// 导入一个工作表
    ///
    /// # 参数
    /// - sheet: 工作表
    /// - schema: 目标类型的字段声明
    /// - header_row: 表头行号（0 起始）
    /// - first_data_row: 首个数据行号（0 起始）
    ///
    /// # 返回
    /// - Ok(ImportOutcome): 成功对象（含行号）+ 行错误列表
    /// - Err: 表头缺失 / 列映射为空等结构性失败
    pub fn import_rows<T>(
        &self,
        sheet: &dyn SheetSource,
        schema: &Schema<T>,
        header_row: u32,
        first_data_row: u32,
    ) -> ImportResult<ImportOutcome<T>> {
        let import_id = Uuid::new_v4().to_string();
        let span = info_span!("sheet_import", import_id = %import_id, sheet = %sheet.name());
        let _guard = span.enter();

        let start_time = Instant::now();
        info!(header_row, first_data_row, fields = schema.len(), "开始导入工作表");

        // === 步骤 1: 列解析 ===
        let columns = column_resolver::resolve(sheet, schema, header_row).map_err(|e| {
            warn!(error = %e, "列解析失败，放弃导入");
            e
        })?;

        // === 步骤 2: 逐行映射 ===
        let mapper = RowMapper::new(schema, &columns, &self.options);
        let mut records = Vec::new();
        let mut errors = Vec::new();
        let mut blank_rows = 0usize;

        if let Some(last_row) = sheet.last_row_index() {
            for row in first_data_row..=last_row {
                match mapper.map_row(sheet, row) {
                    RowOutcome::Blank => blank_rows += 1,
                    RowOutcome::Parsed(record) => records.push(record),
                    RowOutcome::Failed(row_errors) => errors.extend(row_errors),
                }
            }
        }
        debug!(blank_rows, "空行已跳过");

        // === 步骤 3: 汇总 ===
        let outcome = ImportOutcome::new(records, errors);
        info!(
            success = outcome.records().len(),
            errors = outcome.errors().len(),
            elapsed_ms = start_time.elapsed().as_millis() as u64,
            "工作表导入完成"
        );
        Ok(outcome)
    }

    /// 按目标类型注册的 Schema 导入
    pub fn import<T: SheetRecord>(
        &self,
        sheet: &dyn SheetSource,
        header_row: u32,
        first_data_row: u32,
    ) -> ImportResult<ImportOutcome<T>> {
        let schema = T::schema();
        self.import_rows(sheet, &schema, header_row, first_data_row)
    }

    /// 从内存中的工作簿字节导入（默认格式为 .xls）
    pub fn import_bytes<T>(
        &self,
        bytes: &[u8],
        schema: &Schema<T>,
        options: &ImportOptions,
    ) -> ImportResult<ImportOutcome<T>> {
        let format = options.format.unwrap_or(WorkbookFormat::Xls);
        let sheet = UniversalFileParser.parse_bytes(bytes, format, options.sheet.as_deref())?;
        self.import_rows(&sheet, schema, options.header_row, options.first_data_row)
    }

    /// 从文件导入（按扩展名或配置选择格式）
    pub fn import_file<T, P: AsRef<Path>>(
        &self,
        path: P,
        schema: &Schema<T>,
        options: &ImportOptions,
    ) -> ImportResult<ImportOutcome<T>> {
        let path = path.as_ref();
        let sheet = match options.format {
            Some(format) => UniversalFileParser.parse_file_as(path, format, options.sheet.as_deref())?,
            None => UniversalFileParser.parse_file(path, options.sheet.as_deref())?,
        };
        info!(file = %path.display(), "文件解析完成");
        self.import_rows(&sheet, schema, options.header_row, options.first_data_row)
    }
}
