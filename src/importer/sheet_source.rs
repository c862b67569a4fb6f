// ==========================================
// 电子表格导入 - 工作表访问接口
// ==========================================
// 职责: 定义映射引擎对表格解析器的最小依赖
//       行枚举 / 单元格访问 / 末行行号 / 行宽
// 实现者: GridSheet（内存表格，由 calamine / csv 适配器生成）
// ==========================================

use crate::domain::cell::CellValue;

// ==========================================
// SheetSource Trait
// ==========================================
// 行号、列号均为 0 起始的绝对位置
pub trait SheetSource {
    /// 工作表名称
    fn name(&self) -> &str;

    /// 最后一行的行号；空表返回 None
    fn last_row_index(&self) -> Option<u32>;

    /// 该行是否存在（不存在的行视为空行）
    fn has_row(&self, row: u32) -> bool;

    /// 读取单元格；行或列不存在时返回 None
    fn cell(&self, row: u32, column: u32) -> Option<&CellValue>;

    /// 行内单元格槽位数（最后一个已定义单元格的列号 + 1）
    fn row_len(&self, row: u32) -> u32;
}

// ==========================================
// GridSheet - 内存表格
// ==========================================
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GridSheet {
    name: String,
    rows: Vec<Option<Vec<CellValue>>>,
}

impl GridSheet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rows: Vec::new(),
        }
    }

    /// 由二维数据构造（第 0 行起连续存放）
    pub fn from_rows<R, C>(name: impl Into<String>, rows: impl IntoIterator<Item = R>) -> Self
    where
        R: IntoIterator<Item = C>,
        C: Into<CellValue>,
    {
        let mut sheet = Self::new(name);
        for row in rows {
            sheet.push_row(row.into_iter().map(Into::into).collect());
        }
        sheet
    }

    pub fn push_row(&mut self, cells: Vec<CellValue>) {
        self.rows.push(Some(cells));
    }

    /// 追加一个物理上不存在的行
    pub fn push_missing_row(&mut self) {
        self.rows.push(None);
    }

    /// 在指定行号放置一行，中间缺失的行补为不存在
    pub fn set_row(&mut self, row: u32, cells: Vec<CellValue>) {
        let idx = row as usize;
        if self.rows.len() <= idx {
            self.rows.resize(idx + 1, None);
        }
        self.rows[idx] = Some(cells);
    }

    /// 设置单个单元格，行 / 列不足时自动扩展
    pub fn set_cell(&mut self, row: u32, column: u32, value: CellValue) {
        let idx = row as usize;
        if self.rows.len() <= idx {
            self.rows.resize(idx + 1, None);
        }
        let cells = self.rows[idx].get_or_insert_with(Vec::new);
        let col = column as usize;
        if cells.len() <= col {
            cells.resize(col + 1, CellValue::Empty);
        }
        cells[col] = value;
    }

    fn row_cells(&self, row: u32) -> Option<&Vec<CellValue>> {
        self.rows.get(row as usize).and_then(Option::as_ref)
    }
}

impl SheetSource for GridSheet {
    fn name(&self) -> &str {
        &self.name
    }

    fn last_row_index(&self) -> Option<u32> {
        self.rows
            .iter()
            .rposition(Option::is_some)
            .map(|idx| idx as u32)
    }

    fn has_row(&self, row: u32) -> bool {
        self.row_cells(row).is_some()
    }

    fn cell(&self, row: u32, column: u32) -> Option<&CellValue> {
        self.row_cells(row)
            .and_then(|cells| cells.get(column as usize))
    }

    fn row_len(&self, row: u32) -> u32 {
        self.row_cells(row)
            .and_then(|cells| cells.iter().rposition(|c| !c.is_empty()))
            .map_or(0, |idx| idx as u32 + 1)
    }
}
