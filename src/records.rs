use serde::Serialize;

use crate::error::ScrapeError;

/// One course entry on the index page: display name and the relative
/// link to the course's own page, in document order.
#[derive(Debug, Clone, PartialEq)]
pub struct CourseRef {
    pub name: String,
    pub href: String,
}

/// Raw HTML of one fetched course page, keyed by the display name of the
/// index entry it came from. Display names are not assumed unique; two
/// courses sharing a name stay two separate pages.
#[derive(Debug)]
pub struct CoursePage {
    pub course_name: String,
    pub body: String,
}

/// One offered session of a course: a single row of the final dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionRecord {
    #[serde(rename = "Course")]
    pub course: String,
    #[serde(rename = "Level")]
    pub level: String,
    #[serde(rename = "Day")]
    pub day: String,
    #[serde(rename = "Time")]
    pub time: String,
    #[serde(rename = "Period")]
    pub period: String,
    #[serde(rename = "Prices")]
    pub prices: String,
}

pub const DATASET_COLUMNS: [&str; 6] = ["Course", "Level", "Day", "Time", "Period", "Prices"];

/// A tabular batch of session records sharing one column set. One table
/// per course page; the final dataset is the concatenation of all of
/// them.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionTable {
    columns: Vec<String>,
    rows: Vec<SessionRecord>,
}

impl SessionTable {
    pub fn new(rows: Vec<SessionRecord>) -> Self {
        Self {
            columns: DATASET_COLUMNS.iter().map(|c| c.to_string()).collect(),
            rows,
        }
    }

    /// Table with an arbitrary column set. `concat` rejects any set
    /// that is not the canonical one.
    pub fn with_columns(columns: Vec<String>, rows: Vec<SessionRecord>) -> Self {
        Self { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[SessionRecord] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Order-preserving concatenation: tables in input order, rows within
    /// each table in their original order. Every input must carry the
    /// canonical column set; anything else indicates a bug upstream and
    /// fails the whole aggregation.
    pub fn concat(tables: Vec<SessionTable>) -> Result<SessionTable, ScrapeError> {
        let mut out = SessionTable::new(vec![]);
        for table in tables {
            if table.columns != out.columns {
                return Err(ScrapeError::ColumnMismatch {
                    expected: out.columns.clone(),
                    found: table.columns,
                });
            }
            out.rows.extend(table.rows);
        }
        Ok(out)
    }
}
