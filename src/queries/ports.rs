//! Port-of-discharge list backed by `pod_locations.csv` loaded into DuckDB.

use crate::config::POD_COLUMN;
use crate::connection::Connection;
use crate::error::Result;
use crate::sql_builder::{quote_ident, SqlBuilder};

const TABLE: &str = "pod_locations";

/// Query interface for the POD list.
pub struct PortQuery<'a> {
    conn: &'a Connection,
}

impl<'a> PortQuery<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Distinct, non-blank POD names, sorted.
    pub fn list(&self) -> Result<Vec<String>> {
        self.conn.ensure_tables(&[TABLE])?;

        let pod = quote_ident(POD_COLUMN);
        let order = format!("{} ASC", pod);
        let (sql, params) = SqlBuilder::new(TABLE)
            .select(&[pod.as_str()])
            .distinct()
            .where_not_null(&pod)
            .order_by(&[order.as_str()])
            .build();

        let rows = self.conn.execute(&sql, &params)?;
        let mut ports: Vec<String> = rows
            .iter()
            .filter_map(|r| r.get(POD_COLUMN).and_then(|v| v.as_str()))
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        // padded duplicates only collapse after trimming
        ports.sort();
        ports.dedup();
        Ok(ports)
    }

    pub fn contains(&self, name: &str) -> Result<bool> {
        self.conn.ensure_tables(&[TABLE])?;

        let pod = quote_ident(POD_COLUMN);
        let (sql, params) = SqlBuilder::new(TABLE)
            .select(&[pod.as_str()])
            .where_eq(&pod, name.trim())
            .limit(1)
            .build();

        Ok(self.conn.execute_scalar(&sql, &params)?.is_some())
    }

    /// Replace the stored POD list with `ports` and reload it.
    ///
    /// Names are trimmed, blanks dropped and duplicates collapsed; the CSV
    /// is rewritten atomically, sorted by name.
    pub fn replace_all(&self, ports: &[String]) -> Result<()> {
        let path = self.conn.store.data_file(TABLE)?;
        let pod = quote_ident(POD_COLUMN);

        let mut names: Vec<&str> = ports
            .iter()
            .map(|p| p.trim())
            .filter(|p| !p.is_empty())
            .collect();
        names.sort_unstable();
        names.dedup();

        let raw = self.conn.raw();
        raw.execute_batch(&format!(
            "CREATE OR REPLACE TEMP TABLE pod_locations_edit ({} VARCHAR)",
            pod
        ))?;
        for name in &names {
            raw.execute("INSERT INTO pod_locations_edit VALUES (?)", duckdb::params![*name])?;
        }

        self.conn.copy_to_csv(
            &format!("SELECT * FROM pod_locations_edit ORDER BY {}", pod),
            &path,
        )?;
        raw.execute_batch("DROP TABLE IF EXISTS pod_locations_edit")?;
        self.conn.register_table_from_csv(TABLE, &path)?;

        tracing::info!(ports = names.len(), path = %path.display(), "POD list saved");
        Ok(())
    }
}
