use rusqlite::types::Value;
use rusqlite::{Connection, params_from_iter};
use uuid::Uuid;

use super::Record;
use crate::error::Result;
use crate::types::SearchFilter;

/// Equality conditions joined with `AND`, bound positionally.
#[derive(Debug, Default)]
pub struct Conditions {
    clauses: Vec<String>,
    values: Vec<Value>,
}

impl Conditions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn eq(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.values.push(value.into());
        self.clauses
            .push(format!("{column} = ?{}", self.values.len()));
        self
    }

    #[must_use]
    pub fn eq_opt<V: Into<Value>>(self, column: &str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.eq(column, value),
            None => self,
        }
    }

    /// Restricts to one organization. `None` leaves every tenant visible.
    #[must_use]
    pub fn org(self, column: &str, org_uid: Option<Uuid>) -> Self {
        self.eq_opt(column, org_uid.map(|uid| uid.to_string()))
    }

    /// Applies the lifecycle flags of a search filter after preset expansion.
    #[must_use]
    pub fn lifecycle(self, search: &SearchFilter) -> Self {
        let search = search.resolved();
        self.eq_opt("is_final", search.is_final)
            .eq_opt("is_archived", search.is_archived)
    }

    fn where_sql(&self) -> String {
        if self.clauses.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", self.clauses.join(" AND "))
        }
    }

    pub fn count<T: Record>(&self, conn: &Connection) -> Result<i64> {
        let sql = format!("SELECT COUNT(*) FROM {}{}", T::TABLE, self.where_sql());
        let total = conn.query_row(&sql, params_from_iter(self.values.iter()), |row| row.get(0))?;
        Ok(total)
    }

    /// Returns one page of rows plus the unpaged total.
    pub fn page<T: Record>(&self, conn: &Connection, search: &SearchFilter) -> Result<(Vec<T>, i64)> {
        let total = self.count::<T>(conn)?;

        let direction = search.sort_dir.as_sql();
        let sql = format!(
            "SELECT {} FROM {}{} ORDER BY {} {direction}, id {direction} LIMIT {} OFFSET {}",
            T::COLUMNS,
            T::TABLE,
            self.where_sql(),
            T::sort_column(search.sort_by),
            search.effective_limit(),
            search.effective_offset(),
        );

        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(params_from_iter(self.values.iter()), T::from_row)?;
        let records = rows.collect::<std::result::Result<Vec<_>, _>>()?;
        Ok((records, total))
    }
}
