//! Read-only SQLite database access

use crate::types::{CellValue, DbStats, ForeignKey, Row, RowSet};
use crate::{ExplorerError, Result};
use rusqlite::{Connection, OpenFlags};
use std::path::{Path, PathBuf};

/// Quote an identifier for interpolation into SQL text. Table and column
/// names cannot be bound as parameters, so they are double-quoted with
/// embedded quotes doubled.
fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Escape LIKE wildcards in a user query. The pattern is used with
/// `ESCAPE '\'`.
fn escape_like(query: &str) -> String {
    query
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Handle to one SQLite database file, opened read-only.
#[derive(Debug)]
pub struct Database {
    path: PathBuf,
    conn: Connection,
}

impl Database {
    /// Open a database file for reading. Fails with [`ExplorerError::NotFound`]
    /// when the path is missing and [`ExplorerError::NotASqliteFile`] when the
    /// file exists but does not hold a SQLite schema.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if !path.is_file() {
            return Err(ExplorerError::NotFound(path));
        }

        let conn = Connection::open_with_flags(
            &path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;

        // SQLite reads the file lazily; probe the schema so that a bad file
        // fails here instead of on the first table query.
        let probe: std::result::Result<i64, _> =
            conn.query_row("SELECT count(*) FROM sqlite_master", [], |r| r.get(0));
        if probe.is_err() {
            return Err(ExplorerError::NotASqliteFile(path));
        }

        log::debug!("opened database {}", path.display());
        Ok(Self { path, conn })
    }

    /// Path of the open file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// User table names, sorted ascending. Internal `sqlite_*` tables are
    /// excluded.
    pub fn table_names(&self) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare(
            "SELECT name FROM sqlite_master \
             WHERE type = 'table' AND name NOT LIKE 'sqlite_%' \
             ORDER BY name",
        )?;
        let names = stmt
            .query_map([], |r| r.get(0))?
            .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(names)
    }

    /// Check that a user table exists, so queries against a bad name fail
    /// with [`ExplorerError::TableNotFound`] rather than a raw SQL error.
    fn ensure_table(&self, table: &str) -> Result<()> {
        let found: std::result::Result<String, _> = self.conn.query_row(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name = ?1",
            [table],
            |r| r.get(0),
        );
        match found {
            Ok(_) => Ok(()),
            Err(rusqlite::Error::QueryReturnedNoRows) => {
                Err(ExplorerError::TableNotFound(table.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Primary key column names of a table, in key order.
    fn primary_key_columns(&self, table: &str) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare(
            "SELECT name FROM pragma_table_info(?1) WHERE pk > 0 ORDER BY pk",
        )?;
        let cols = stmt
            .query_map([table], |r| r.get(0))?
            .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(cols)
    }

    /// Foreign-key descriptors of a table. A NULL target column (implicit
    /// primary-key reference) is resolved to the target table's primary key;
    /// descriptors that cannot be resolved are skipped.
    pub fn foreign_keys(&self, table: &str) -> Result<Vec<ForeignKey>> {
        let mut stmt = self.conn.prepare(
            "SELECT seq, \"table\", \"from\", \"to\" \
             FROM pragma_foreign_key_list(?1) ORDER BY id, seq",
        )?;
        let raw = stmt
            .query_map([table], |r| {
                Ok((
                    r.get::<_, i64>(0)?,
                    r.get::<_, String>(1)?,
                    r.get::<_, String>(2)?,
                    r.get::<_, Option<String>>(3)?,
                ))
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        let mut fks = Vec::with_capacity(raw.len());
        for (seq, target_table, from_column, to) in raw {
            let target_column = match to {
                Some(c) => c,
                None => {
                    let pk = self.primary_key_columns(&target_table)?;
                    match pk.into_iter().nth(seq as usize) {
                        Some(c) => c,
                        None => {
                            log::warn!(
                                "cannot resolve implicit FK target {}.{} -> {}",
                                table,
                                from_column,
                                target_table
                            );
                            continue;
                        }
                    }
                }
            };
            fks.push(ForeignKey {
                from_column,
                target_table,
                target_column,
            });
        }
        Ok(fks)
    }

    /// Load rows in natural order, up to `limit` if given, together with the
    /// table's column list and foreign keys.
    pub fn load_rows(&self, table: &str, limit: Option<usize>) -> Result<RowSet> {
        self.ensure_table(table)?;
        let mut sql = format!("SELECT * FROM {}", quote_ident(table));
        if limit.is_some() {
            sql.push_str(" LIMIT ?1");
        }

        match limit {
            Some(n) => self.run_query(table, &sql, rusqlite::params![n as i64]),
            None => self.run_query(table, &sql, []),
        }
    }

    /// Load rows where `column = value` (exact match). When `column` is
    /// omitted it resolves to the table's single-column primary key; a
    /// composite or missing primary key fails with
    /// [`ExplorerError::NoPrimaryKey`].
    pub fn load_rows_filtered(
        &self,
        table: &str,
        value: &CellValue,
        column: Option<&str>,
    ) -> Result<RowSet> {
        self.ensure_table(table)?;
        let column = match column {
            Some(c) => c.to_string(),
            None => {
                let pk = self.primary_key_columns(table)?;
                if pk.len() == 1 {
                    pk.into_iter().next().unwrap()
                } else {
                    return Err(ExplorerError::NoPrimaryKey(table.to_string()));
                }
            }
        };

        let sql = format!(
            "SELECT * FROM {} WHERE {} = ?1",
            quote_ident(table),
            quote_ident(&column)
        );
        self.run_query(table, &sql, rusqlite::params![value])
    }

    /// Rows where any column's text form contains `query` as a substring.
    /// Matching uses SQLite `LIKE`, which is case-insensitive for ASCII and
    /// byte-sensitive otherwise.
    pub fn search_rows(&self, table: &str, query: &str, limit: Option<usize>) -> Result<RowSet> {
        self.ensure_table(table)?;
        let mut stmt = self
            .conn
            .prepare("SELECT name FROM pragma_table_info(?1) ORDER BY cid")?;
        let columns = stmt
            .query_map([table], |r| r.get(0))?
            .collect::<rusqlite::Result<Vec<String>>>()?;
        drop(stmt);

        let clauses: Vec<String> = columns
            .iter()
            .map(|c| format!("CAST({} AS TEXT) LIKE ?1 ESCAPE '\\'", quote_ident(c)))
            .collect();
        let mut sql = format!(
            "SELECT * FROM {} WHERE {}",
            quote_ident(table),
            clauses.join(" OR ")
        );
        if limit.is_some() {
            sql.push_str(" LIMIT ?2");
        }

        let pattern = format!("%{}%", escape_like(query));
        match limit {
            Some(n) => self.run_query(table, &sql, rusqlite::params![pattern, n as i64]),
            None => self.run_query(table, &sql, rusqlite::params![pattern]),
        }
    }

    /// Database file statistics
    pub fn stats(&self) -> Result<DbStats> {
        let tables = self.table_names()?;
        let mut total_rows = 0usize;
        let mut largest_table = String::new();
        let mut largest_count = 0usize;

        for name in &tables {
            let count: i64 = self.conn.query_row(
                &format!("SELECT count(*) FROM {}", quote_ident(name)),
                [],
                |r| r.get(0),
            )?;
            let count = count as usize;
            total_rows += count;
            if count > largest_count {
                largest_count = count;
                largest_table = name.clone();
            }
        }

        let file_meta = std::fs::metadata(&self.path)?;
        Ok(DbStats {
            file_size: file_meta.len(),
            table_count: tables.len(),
            total_rows,
            largest_table,
            largest_table_rows: largest_count,
        })
    }

    fn run_query<P: rusqlite::Params>(&self, table: &str, sql: &str, params: P) -> Result<RowSet> {
        let mut stmt = self.conn.prepare(sql)?;
        let columns: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();
        let ncols = columns.len();

        let mut rows = Vec::new();
        let mut raw = stmt.query(params)?;
        while let Some(r) = raw.next()? {
            let values = (0..ncols)
                .map(|i| r.get_ref(i).map(CellValue::from))
                .collect::<rusqlite::Result<Vec<_>>>()?;
            rows.push(Row { values });
        }
        drop(raw);

        Ok(RowSet {
            table: table.to_string(),
            columns,
            rows,
            foreign_keys: self.foreign_keys(table)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    /// Build a small fixture database through a writable connection.
    fn fixture_db(dir: &TempDir) -> PathBuf {
        let path = dir.path().join("fixture.db");
        let conn = Connection::open(&path).unwrap();
        conn.execute_batch(
            "CREATE TABLE customers (id INTEGER PRIMARY KEY, name TEXT, avatar TEXT);
             CREATE TABLE orders (
                 id INTEGER PRIMARY KEY,
                 customer_id INTEGER REFERENCES customers(id),
                 item TEXT,
                 receipt BLOB
             );
             CREATE TABLE audit (ref INTEGER REFERENCES customers, note TEXT);
             CREATE TABLE tags (a TEXT, b TEXT, PRIMARY KEY (a, b));
             INSERT INTO customers VALUES (42, 'Ada', 'https://example.com/pics/ada.png');
             INSERT INTO customers VALUES (43, 'Grace', 'grace.jpg');
             INSERT INTO orders VALUES (1, 42, 'Keyboard', x'0102deadbeef');
             INSERT INTO orders VALUES (2, 43, 'Mouse', NULL);
             INSERT INTO orders VALUES (3, 42, 'Monitor', NULL);
             INSERT INTO tags VALUES ('x', 'y');",
        )
        .unwrap();
        path
    }

    #[test]
    fn open_missing_path_is_not_found() {
        let dir = TempDir::new().unwrap();
        let err = Database::open(dir.path().join("missing.db")).unwrap_err();
        assert!(matches!(err, ExplorerError::NotFound(_)));
    }

    #[test]
    fn open_garbage_file_is_not_a_sqlite_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("garbage.db");
        std::fs::write(&path, b"this is definitely not a database").unwrap();
        let err = Database::open(&path).unwrap_err();
        assert!(matches!(err, ExplorerError::NotASqliteFile(_)));
    }

    #[test]
    fn table_names_sorted_without_internal_tables() {
        let dir = TempDir::new().unwrap();
        let db = Database::open(fixture_db(&dir)).unwrap();
        let names = db.table_names().unwrap();
        assert_eq!(names, vec!["audit", "customers", "orders", "tags"]);
        assert!(!names.iter().any(|n| n.starts_with("sqlite_")));
    }

    #[test]
    fn load_rows_returns_columns_rows_and_fks() {
        let dir = TempDir::new().unwrap();
        let db = Database::open(fixture_db(&dir)).unwrap();
        let rs = db.load_rows("orders", None).unwrap();

        assert_eq!(rs.columns, vec!["id", "customer_id", "item", "receipt"]);
        assert_eq!(rs.row_count(), 3);
        assert_eq!(
            rs.foreign_keys,
            vec![ForeignKey {
                from_column: "customer_id".into(),
                target_table: "customers".into(),
                target_column: "id".into(),
            }]
        );
    }

    #[test]
    fn load_rows_honors_limit() {
        let dir = TempDir::new().unwrap();
        let db = Database::open(fixture_db(&dir)).unwrap();
        assert_eq!(db.load_rows("orders", Some(2)).unwrap().row_count(), 2);
        assert_eq!(db.load_rows("orders", Some(0)).unwrap().row_count(), 0);
    }

    #[test]
    fn empty_result_still_carries_column_list() {
        let dir = TempDir::new().unwrap();
        let db = Database::open(fixture_db(&dir)).unwrap();
        let rs = db.load_rows("audit", None).unwrap();
        assert_eq!(rs.columns, vec!["ref", "note"]);
        assert!(rs.rows.is_empty());
    }

    #[test]
    fn load_rows_unknown_table() {
        let dir = TempDir::new().unwrap();
        let db = Database::open(fixture_db(&dir)).unwrap();
        let err = db.load_rows("nope", None).unwrap_err();
        assert!(matches!(err, ExplorerError::TableNotFound(t) if t == "nope"));
    }

    #[test]
    fn filtered_load_defaults_to_primary_key() {
        let dir = TempDir::new().unwrap();
        let db = Database::open(fixture_db(&dir)).unwrap();
        let value = CellValue::Integer(42);

        let implicit = db.load_rows_filtered("customers", &value, None).unwrap();
        let explicit = db
            .load_rows_filtered("customers", &value, Some("id"))
            .unwrap();

        assert_eq!(implicit.row_count(), 1);
        assert_eq!(implicit.rows[0].values, explicit.rows[0].values);
        assert_eq!(implicit.rows[0].values[1], CellValue::Text("Ada".into()));
    }

    #[test]
    fn filtered_load_without_pk_fails() {
        let dir = TempDir::new().unwrap();
        let db = Database::open(fixture_db(&dir)).unwrap();
        let err = db
            .load_rows_filtered("tags", &CellValue::Text("x".into()), None)
            .unwrap_err();
        assert!(matches!(err, ExplorerError::NoPrimaryKey(t) if t == "tags"));
    }

    #[test]
    fn filtered_load_with_explicit_column() {
        let dir = TempDir::new().unwrap();
        let db = Database::open(fixture_db(&dir)).unwrap();
        let rs = db
            .load_rows_filtered("orders", &CellValue::Integer(42), Some("customer_id"))
            .unwrap();
        assert_eq!(rs.row_count(), 2);
    }

    #[test]
    fn implicit_fk_target_resolves_to_primary_key() {
        let dir = TempDir::new().unwrap();
        let db = Database::open(fixture_db(&dir)).unwrap();
        let fks = db.foreign_keys("audit").unwrap();
        assert_eq!(
            fks,
            vec![ForeignKey {
                from_column: "ref".into(),
                target_table: "customers".into(),
                target_column: "id".into(),
            }]
        );
    }

    #[test]
    fn search_matches_any_column_case_insensitively() {
        let dir = TempDir::new().unwrap();
        let db = Database::open(fixture_db(&dir)).unwrap();

        let by_item = db.search_rows("orders", "keyb", None).unwrap();
        assert_eq!(by_item.row_count(), 1);

        let by_number = db.search_rows("orders", "42", None).unwrap();
        assert_eq!(by_number.row_count(), 2);

        let upper = db.search_rows("customers", "ADA", None).unwrap();
        assert_eq!(upper.row_count(), 1);
    }

    #[test]
    fn search_escapes_like_wildcards() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("wild.db");
        let conn = Connection::open(&path).unwrap();
        conn.execute_batch(
            "CREATE TABLE notes (body TEXT);
             INSERT INTO notes VALUES ('100% done');
             INSERT INTO notes VALUES ('100 percent done');",
        )
        .unwrap();
        drop(conn);

        let db = Database::open(&path).unwrap();
        let rs = db.search_rows("notes", "100%", None).unwrap();
        assert_eq!(rs.row_count(), 1);
        assert_eq!(rs.rows[0].values[0], CellValue::Text("100% done".into()));
    }

    #[test]
    fn search_honors_limit() {
        let dir = TempDir::new().unwrap();
        let db = Database::open(fixture_db(&dir)).unwrap();
        let rs = db.search_rows("orders", "o", Some(1)).unwrap();
        assert_eq!(rs.row_count(), 1);
    }

    #[test]
    fn fk_click_navigates_to_referenced_row() {
        let dir = TempDir::new().unwrap();
        let db = Database::open(fixture_db(&dir)).unwrap();

        // Load orders, classify the customer_id cell of the first row, and
        // follow the resulting navigation the way the grid does.
        let orders = db.load_rows("orders", None).unwrap();
        let col = orders.column_index("customer_id").unwrap();
        let cell = &orders.rows[0].values[col];
        let action = crate::browse::classify_cell(cell, orders.foreign_key("customer_id"));

        match action {
            crate::browse::CellAction::Navigate {
                table,
                column,
                value,
            } => {
                assert_eq!(table, "customers");
                assert_eq!(column, "id");
                assert_eq!(value, CellValue::Integer(42));

                let target = db.load_rows_filtered(&table, &value, Some(&column)).unwrap();
                assert_eq!(target.row_count(), 1);
                assert_eq!(target.rows[0].values[1], CellValue::Text("Ada".into()));
            }
            other => panic!("expected navigation, got {other:?}"),
        }
    }

    #[test]
    fn blob_cells_come_back_as_blobs() {
        let dir = TempDir::new().unwrap();
        let db = Database::open(fixture_db(&dir)).unwrap();
        let rs = db.load_rows("orders", Some(1)).unwrap();
        let receipt = &rs.rows[0].values[3];
        assert!(matches!(receipt, CellValue::Blob(b) if b.len() == 6));
        assert_eq!(receipt.display(), "[6 bytes]");
    }

    #[test]
    fn stats_counts_tables_and_rows() {
        let dir = TempDir::new().unwrap();
        let db = Database::open(fixture_db(&dir)).unwrap();
        let stats = db.stats().unwrap();
        assert_eq!(stats.table_count, 4);
        assert_eq!(stats.total_rows, 6);
        assert_eq!(stats.largest_table, "orders");
        assert_eq!(stats.largest_table_rows, 3);
        assert!(stats.file_size > 0);
    }

    #[test]
    fn quoted_identifiers_survive_odd_names() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("odd.db");
        let conn = Connection::open(&path).unwrap();
        conn.execute_batch(
            "CREATE TABLE \"my table\" (\"the id\" INTEGER PRIMARY KEY, v TEXT);
             INSERT INTO \"my table\" VALUES (1, 'one');",
        )
        .unwrap();
        drop(conn);

        let db = Database::open(&path).unwrap();
        let rs = db
            .load_rows_filtered("my table", &CellValue::Integer(1), None)
            .unwrap();
        assert_eq!(rs.row_count(), 1);
        assert_eq!(rs.columns, vec!["the id", "v"]);
    }
}
