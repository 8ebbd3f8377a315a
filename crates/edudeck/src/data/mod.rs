pub mod classification;
pub mod tables;

use serde::Serialize;

/// Students enrolled in the region in 2021.
pub const TOTAL_STUDENTS: u32 = 5796;

/// One category of a frequency table.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Row {
    pub label: &'static str,
    /// One value per series, in the order of [`Dataset::value_headers`].
    pub values: &'static [u32],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percentage: Option<f32>,
}

/// A fixed frequency table backing one chart.
#[derive(Debug, Serialize)]
pub struct Dataset {
    pub id: &'static str,
    pub category_header: &'static str,
    pub value_headers: &'static [&'static str],
    pub rows: &'static [Row],
}

pub const PERCENTAGE_HEADER: &str = "Frecuencia Relativa (%)";

impl Dataset {
    pub fn series_count(&self) -> usize {
        self.value_headers.len()
    }

    pub fn has_percentages(&self) -> bool {
        self.rows.iter().any(|r| r.percentage.is_some())
    }

    pub fn total(&self, series: usize) -> u32 {
        self.rows
            .iter()
            .filter_map(|r| r.values.get(series))
            .sum()
    }

    /// Largest value across every series (chart axis extent).
    pub fn max_value(&self) -> u32 {
        self.rows
            .iter()
            .flat_map(|r| r.values.iter().copied())
            .max()
            .unwrap_or(0)
    }

    /// Column headers as shown in the frequency table.
    pub fn headers(&self) -> Vec<&'static str> {
        let mut headers = vec![self.category_header];
        headers.extend(self.value_headers.iter().copied());
        if self.has_percentages() {
            headers.push(PERCENTAGE_HEADER);
        }
        headers
    }

    /// Table cells for one row, aligned with [`Dataset::headers`].
    pub fn cells(&self, row: &Row) -> Vec<String> {
        let mut cells = vec![row.label.to_string()];
        cells.extend(row.values.iter().map(|v| format_count(*v)));
        if self.has_percentages() {
            cells.push(row.percentage.map(format_decimal).unwrap_or_default());
        }
        cells
    }
}

/// Format an integer with `.` as the thousands separator (es-CL).
pub fn format_count(value: u32) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(c);
    }
    out
}

/// Format a decimal with `,` as the decimal separator and at most two
/// fraction digits, dropping trailing zeros (es-CL).
pub fn format_decimal(value: f32) -> String {
    let fixed = format!("{value:.2}");
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    trimmed.replace('.', ",")
}
