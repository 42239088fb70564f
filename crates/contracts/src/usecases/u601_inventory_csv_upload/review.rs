use serde::{Deserialize, Serialize};

use super::row::EnrichedRow;

/// Строка таблицы проверки: выбор пользователя и редактируемое количество
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectableRow {
    pub row: EnrichedRow,
    pub selected: bool,
    /// Содержимое поля ввода количества (только цифры, может быть пустым)
    pub quantity: String,
}

impl SelectableRow {
    pub fn new(row: EnrichedRow) -> Self {
        let quantity = row.row.stock.map(|s| s.to_string()).unwrap_or_default();
        Self {
            row,
            selected: false,
            quantity,
        }
    }

    /// Количество как число, если оно задано и больше нуля
    pub fn quantity_value(&self) -> Option<i64> {
        parse_quantity(&self.quantity)
    }
}

/// `^\d*$`: пустая строка допустима
pub fn is_digits_only(input: &str) -> bool {
    input.chars().all(|c| c.is_ascii_digit())
}

/// Пустое, "0", нечисловое или переполненное значение даёт `None`
pub fn parse_quantity(input: &str) -> Option<i64> {
    if input.is_empty() || !is_digits_only(input) {
        return None;
    }
    input.parse::<i64>().ok().filter(|v| *v > 0)
}

/// Единственная проверка строки перед отправкой.
/// Используется и кнопкой отправки, и сборщиком payload.
pub fn is_row_submittable(row: &SelectableRow) -> bool {
    row.selected && row.quantity_value().is_some()
}

/// Почему отправка сейчас недоступна
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitBlock {
    NothingSelected,
    InvalidQuantity { count: usize },
}

impl SubmitBlock {
    pub fn message(&self) -> String {
        match self {
            SubmitBlock::NothingSelected => "Seleccione al menos un producto".to_string(),
            SubmitBlock::InvalidQuantity { count } => format!(
                "{} producto(s) seleccionado(s) sin cantidad válida",
                count
            ),
        }
    }
}

/// Таблица проверки загруженного CSV
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewTable {
    rows: Vec<SelectableRow>,
}

impl ReviewTable {
    pub fn new(rows: Vec<EnrichedRow>) -> Self {
        Self {
            rows: rows.into_iter().map(SelectableRow::new).collect(),
        }
    }

    pub fn rows(&self) -> &[SelectableRow] {
        &self.rows
    }

    pub fn get(&self, index: usize) -> Option<&SelectableRow> {
        self.rows.get(index)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Переключить выбор строки. Возвращает новое состояние
    pub fn toggle(&mut self, index: usize) -> Option<bool> {
        let row = self.rows.get_mut(index)?;
        row.selected = !row.selected;
        Some(row.selected)
    }

    pub fn set_selected(&mut self, index: usize, selected: bool) {
        if let Some(row) = self.rows.get_mut(index) {
            row.selected = selected;
        }
    }

    pub fn select_all(&mut self, selected: bool) {
        for row in &mut self.rows {
            row.selected = selected;
        }
    }

    /// Применить ввод в поле количества.
    /// Ввод с нецифровыми символами отбрасывается без ошибки, строка не меняется.
    pub fn edit_quantity(&mut self, index: usize, input: &str) -> bool {
        if !is_digits_only(input) {
            return false;
        }
        match self.rows.get_mut(index) {
            Some(row) => {
                row.quantity = input.to_string();
                true
            }
            None => false,
        }
    }

    pub fn selected_count(&self) -> usize {
        self.rows.iter().filter(|r| r.selected).count()
    }

    /// Выбранные строки в порядке таблицы
    pub fn selected_rows(&self) -> impl Iterator<Item = (usize, &SelectableRow)> {
        self.rows.iter().enumerate().filter(|(_, r)| r.selected)
    }

    pub fn blocking_reason(&self) -> Option<SubmitBlock> {
        let mut selected = 0usize;
        let mut invalid = 0usize;
        for (_, row) in self.selected_rows() {
            selected += 1;
            if !is_row_submittable(row) {
                invalid += 1;
            }
        }

        if selected == 0 {
            Some(SubmitBlock::NothingSelected)
        } else if invalid > 0 {
            Some(SubmitBlock::InvalidQuantity { count: invalid })
        } else {
            None
        }
    }

    pub fn can_submit(&self) -> bool {
        self.blocking_reason().is_none()
    }

    /// После успешной отправки: снять выбор и очистить количество.
    /// Сами строки (uuid, названия, дата) остаются.
    pub fn reset_after_submit(&mut self) {
        for row in &mut self.rows {
            row.selected = false;
            row.quantity.clear();
        }
    }
}
