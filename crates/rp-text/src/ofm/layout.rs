//! Column layout and directive state of an OFM file.

use chrono::{Datelike, NaiveDate};
use tracing::{debug, warn};

use crate::dates::DateFormat;
use crate::{TextError, TextResult};

/// Volume columns scaled by unit multipliers and normalized by period length.
pub(crate) const RATE_COLUMNS: [&str; 6] = ["GAS", "OIL", "WATER", "GINJ", "OINJ", "WINJ"];
const GAS_COLUMNS: [&str; 2] = ["GAS", "GINJ"];
const LIQUID_COLUMNS: [&str; 4] = ["OIL", "OINJ", "WATER", "WINJ"];
const UPTIME_DAY_COLUMNS: [&str; 4] = ["DAYS", "GIDAY", "OIDAY", "WIDAY"];
const WEFF_SOURCES: [&str; 5] = ["DAYS", "OIDAY", "GIDAY", "WIDAY", "UPTIME"];
const UNSUPPORTED: [&str; 3] = ["*FILE", "*TABLENAME", "*YY/MM"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Frequency {
    Daily,
    Monthly,
    Yearly,
}

#[derive(Debug, Clone, PartialEq)]
enum Column {
    Day,
    Month,
    Year,
    Date,
    Well,
    Value(usize),
}

/// One parsed data row.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Row {
    pub well: Option<String>,
    pub date: NaiveDate,
    pub values: Vec<f64>,
}

/// Directive flags plus the declared column order.
#[derive(Debug, Clone)]
pub(crate) struct Layout {
    pub frequency: Frequency,
    pub cumulative: bool,
    pub undef: Option<f64>,
    field_units: bool,
    gas_kilo: bool,
    liquid_kilo: bool,
    mstb: bool,
    mmscf: bool,
    ucrates: bool,
    uptime_fractions: bool,
    hours_in_days: bool,
    months_in_years: bool,
    order: Vec<Column>,
    names: Vec<String>,
    multipliers: Vec<f64>,
    tabs: Option<bool>,
}

fn canonical(term: &str) -> &str {
    match term {
        "GIDAYS" => "GIDAY",
        "OIDAYS" => "OIDAY",
        "WIDAYS" => "WIDAY",
        "WATR" | "WATE" => "WATER",
        t => t,
    }
}

impl Layout {
    pub fn new(undef: Option<f64>) -> Self {
        Self {
            frequency: Frequency::Monthly,
            cumulative: false,
            undef,
            field_units: false,
            gas_kilo: false,
            liquid_kilo: false,
            mstb: false,
            mmscf: false,
            ucrates: false,
            uptime_fractions: false,
            hours_in_days: false,
            months_in_years: false,
            order: Vec::new(),
            names: Vec::new(),
            multipliers: Vec::new(),
            tabs: None,
        }
    }

    /// Value column names, `WEFF` last when present.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn is_declared(&self) -> bool {
        !self.order.is_empty()
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    fn has(&self, name: &str) -> bool {
        self.index_of(name).is_some()
    }

    /// Apply one directive line (already upper case). Returns whether the
    /// line declared a new column layout.
    pub fn apply_directive(&mut self, line: &str, line_no: usize) -> TextResult<bool> {
        if let Some(key) = UNSUPPORTED.iter().find(|k| line.contains(*k)) {
            return Err(TextError::Unsupported {
                line: line_no,
                directive: key.to_string(),
            });
        }
        let declares = line.contains("*DAY") || line.contains("*DATE");
        if declares {
            self.declare_columns(line);
        }

        if line.contains("*METRIC") {
            self.field_units = false;
        } else if line.contains("*FIELD") {
            self.field_units = true;
        }
        if line.contains("*DAILY") {
            self.frequency = Frequency::Daily;
        } else if line.contains("*MONTHLY") {
            self.frequency = Frequency::Monthly;
        } else if line.contains("*YEARLY") {
            self.frequency = Frequency::Yearly;
        }
        if line.contains("*MSM3") {
            self.gas_kilo |= line.contains(" GAS");
            self.liquid_kilo |= line.contains(" LIQUID");
        }
        self.mstb |= line.contains("*MSTB");
        self.mmscf |= line.contains("*MMSCF");
        if line.contains("*UUCRATES") {
            self.ucrates = false;
        } else if line.contains("*UCRATES") {
            self.ucrates = true;
        }
        self.uptime_fractions |= line.contains("*UPTIME_FRACTIONS");
        self.hours_in_days |= line.contains("*HRS_IN_DAYS");
        self.months_in_years |= line.contains("*MNS_IN_YEARS");
        self.cumulative |= line.contains("*CUMULATIVE");
        if line.contains("*ZERO_MISSING") {
            self.undef = Some(0.0);
        }
        if line.contains("*IGNORE_MISSING") {
            self.undef = None;
        }
        Ok(declares)
    }

    /// A column line replaces any earlier declaration.
    fn declare_columns(&mut self, line: &str) {
        self.order.clear();
        self.names.clear();
        self.tabs = None;
        let mut has_weff = false;
        for term in line.split_whitespace() {
            let term = term.replace('*', "");
            let column = match canonical(&term) {
                "DAY" => Column::Day,
                "MONTH" => Column::Month,
                "YEAR" => Column::Year,
                "DATE" => Column::Date,
                "WELL" => Column::Well,
                name => {
                    has_weff |= WEFF_SOURCES.contains(&name);
                    self.names.push(name.to_string());
                    Column::Value(self.names.len() - 1)
                }
            };
            self.order.push(column);
        }
        if has_weff {
            self.names.push("WEFF".to_string());
        }

        let (gas, liquid) = if self.field_units {
            (self.mmscf, self.mstb)
        } else {
            (self.gas_kilo, self.liquid_kilo)
        };
        self.multipliers = self
            .names
            .iter()
            .map(|n| {
                let scaled = (gas && GAS_COLUMNS.contains(&n.as_str()))
                    || (liquid && LIQUID_COLUMNS.contains(&n.as_str()));
                if scaled { 1000.0 } else { 1.0 }
            })
            .collect();
        debug!(columns = ?self.names, "declared OFM columns");
    }

    /// Initial values for missing fields before any row was read.
    pub fn initial_values(&self) -> Vec<f64> {
        vec![self.undef.unwrap_or(0.0); self.names.len()]
    }

    /// Parse a data row. Missing fields keep the value from `previous`.
    pub fn parse_row(
        &mut self,
        text: &str,
        line_no: usize,
        date_format: DateFormat,
        previous: &[f64],
    ) -> TextResult<Row> {
        let tabs = *self.tabs.get_or_insert_with(|| {
            let tabs = text.split('\t').count() == self.order.len();
            debug!(tabs, "detected OFM row separator");
            tabs
        });
        let fields: Vec<&str> = if tabs {
            text.split('\t').map(str::trim).collect()
        } else {
            text.split_whitespace().collect()
        };
        if fields.len() > self.order.len() {
            warn!(
                line = line_no,
                found = fields.len(),
                expected = self.order.len(),
                "too many items in OFM row, extra items ignored"
            );
        } else if fields.len() < self.order.len() {
            return Err(TextError::parse(
                line_no,
                format!(
                    "expected {} items, found {}",
                    self.order.len(),
                    fields.len()
                ),
            ));
        }

        let mut values = previous.to_vec();
        values.resize(self.names.len(), self.undef.unwrap_or(0.0));
        let (mut day, mut month, mut year) = (1_u32, 1_u32, 1900_i32);
        let mut date = None;
        let mut well = None;

        let int = |field: &str| -> TextResult<i64> {
            field
                .parse()
                .map_err(|_| TextError::parse(line_no, format!("invalid integer '{field}'")))
        };
        for (column, field) in self.order.iter().zip(&fields) {
            if field.is_empty() {
                continue;
            }
            match column {
                Column::Day => day = int(*field)? as u32,
                Column::Month => month = int(*field)? as u32,
                Column::Year => year = int(*field)? as i32,
                Column::Date => {
                    let d = date_format
                        .parse(field)
                        .map_err(|e| TextError::parse(line_no, e.to_string()))?;
                    date = Some(d);
                }
                Column::Well => well = Some(field.to_string()),
                Column::Value(i) => {
                    let v: f64 = field.parse().map_err(|_| {
                        TextError::parse(line_no, format!("invalid number '{field}'"))
                    })?;
                    values[*i] = v * self.multipliers[*i];
                }
            }
        }
        let date = match date {
            Some(d) => d,
            None => NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
                TextError::parse(line_no, format!("invalid date {day}.{month}.{year}"))
            })?,
        };
        if let Some(i) = self.index_of("WEFF") {
            values[i] = 1.0;
        }
        Ok(Row { well, date, values })
    }

    /// Uptime processing followed by period normalization of the rates.
    pub fn normalize(&self, date: NaiveDate, values: &mut [f64]) {
        if let Some(iweff) = self.index_of("WEFF") {
            self.apply_uptime(date, iweff, values);
        }
        let days = match self.frequency {
            Frequency::Daily => return,
            Frequency::Monthly => rp_core::days_in_month(date.year(), date.month()),
            Frequency::Yearly => rp_core::days_in_year(date.year()),
        };
        for name in RATE_COLUMNS {
            if let Some(i) = self.index_of(name) {
                values[i] /= f64::from(days);
            }
        }
    }

    fn apply_uptime(&self, date: NaiveDate, iweff: usize, values: &mut [f64]) {
        if !self.uptime_fractions {
            let divisor = match self.frequency {
                Frequency::Daily if self.hours_in_days => Some(24.0),
                Frequency::Monthly => {
                    Some(f64::from(rp_core::days_in_month(date.year(), date.month())))
                }
                Frequency::Yearly if self.months_in_years => Some(12.0),
                _ => None,
            };
            if let Some(divisor) = divisor {
                for name in UPTIME_DAY_COLUMNS {
                    if let Some(i) = self.index_of(name) {
                        values[i] /= divisor;
                    }
                }
            }
        }

        let positive = |name: &str| self.index_of(name).is_some_and(|i| values[i] > 0.0);
        let source = if self.has("UPTIME") {
            Some("UPTIME")
        } else if self.has("GIDAY") && positive("GINJ") {
            Some("GIDAY")
        } else if self.has("OIDAY") && positive("OINJ") {
            Some("OIDAY")
        } else if self.has("WIDAY") && positive("WINJ") {
            Some("WIDAY")
        } else if self.has("DAYS") {
            Some("DAYS")
        } else {
            None
        };
        if let Some(i) = source.and_then(|s| self.index_of(s)) {
            values[iweff] = values[i];
        }

        let weff = values[iweff];
        if self.ucrates && weff > 0.0 {
            for name in RATE_COLUMNS {
                if let Some(i) = self.index_of(name) {
                    values[i] /= weff;
                }
            }
        }
    }
}
