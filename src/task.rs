use crate::error::{Result, TaskError};
use crate::infer::{ColumnType, infer_column_types};
use crate::store::{Store, quote_ident};
use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use rusqlite::Connection;
use rusqlite::types::{Value, ValueRef};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// One unit of ETL or SQL work.
///
/// The set of task kinds is closed. Callers sequence tasks themselves and
/// call [`Task::run`] on each in order; there is no dependency graph and
/// no retry. Load and export tasks fail fast. The SQL-executing tasks log
/// execution errors and report success, so a batch keeps going past a bad
/// script. Callers rely on that asymmetry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Task {
    /// Append the rows of a delimited file to a table.
    FileLoad { table: String, source: PathBuf },

    /// Write a table's full contents to a delimited file.
    TableExport { table: String, dest: PathBuf },

    /// Execute a caller-supplied SQL script.
    SqlScript {
        script: String,
        #[serde(default)]
        title: Option<String>,
    },

    /// Create a table from a SELECT query (CTAS).
    CreateTableAs {
        table: String,
        select: String,
        #[serde(default)]
        title: Option<String>,
    },
}

impl Task {
    /// Perform this task's unit of work against `store`.
    ///
    /// A fresh connection is opened for the duration of the call and
    /// released before returning, on both success and failure paths.
    pub fn run(&self, store: &Store) -> Result<()> {
        match self {
            Task::FileLoad { table, source } => run_file_load(store, table, source),
            Task::TableExport { table, dest } => run_table_export(store, table, dest),
            Task::SqlScript { script, title } => run_sql_script(store, script, title.as_deref()),
            Task::CreateTableAs { table, select, .. } => run_create_table_as(store, table, select),
        }
    }

    /// Short human-readable summary of the task.
    pub fn describe(&self) -> String {
        match self {
            Task::FileLoad { table, source } => format!("{} -> {}", source.display(), table),
            Task::TableExport { table, dest } => format!("{} -> {}", table, dest.display()),
            Task::SqlScript { title, .. } => title.clone().unwrap_or_default(),
            Task::CreateTableAs { table, title, .. } => {
                title.clone().unwrap_or_else(|| table.clone())
            }
        }
    }

    fn variant_name(&self) -> &'static str {
        match self {
            Task::FileLoad { .. } => "FileLoad",
            Task::TableExport { .. } => "TableExport",
            Task::SqlScript { .. } => "SqlScript",
            Task::CreateTableAs { .. } => "CreateTableAs",
        }
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.variant_name(), self.describe())
    }
}

/// Read the whole file, infer column types, create the table if missing,
/// append every row. File and store errors propagate.
fn run_file_load(store: &Store, table: &str, source: &Path) -> Result<()> {
    let mut reader = ReaderBuilder::new().from_path(source)?;
    let headers = reader.headers()?.clone();
    if headers.is_empty() {
        return Err(TaskError::EmptyHeader {
            path: source.display().to_string(),
        });
    }
    let records = reader
        .records()
        .collect::<std::result::Result<Vec<_>, _>>()?;
    let types = infer_column_types(headers.len(), &records);

    let mut conn = store.connect()?;
    create_table_if_missing(&conn, table, &headers, &types)?;

    let tx = conn.transaction()?;
    {
        let columns = headers
            .iter()
            .map(quote_ident)
            .collect::<Vec<_>>()
            .join(", ");
        let placeholders = (1..=headers.len())
            .map(|i| format!("?{i}"))
            .collect::<Vec<_>>()
            .join(", ");
        let mut stmt = tx.prepare(&format!(
            "INSERT INTO {} ({columns}) VALUES ({placeholders})",
            quote_ident(table)
        ))?;
        for record in &records {
            let row: Vec<Value> = (0..headers.len())
                .map(|i| field_value(record.get(i).unwrap_or(""), types[i]))
                .collect();
            stmt.execute(rusqlite::params_from_iter(row))?;
        }
    }
    tx.commit()?;

    info!(
        rows = records.len(),
        "Load file `{}` to table `{}`",
        source.display(),
        table
    );
    Ok(())
}

fn create_table_if_missing(
    conn: &Connection,
    table: &str,
    headers: &StringRecord,
    types: &[ColumnType],
) -> Result<()> {
    let columns = headers
        .iter()
        .zip(types)
        .map(|(name, ty)| format!("{} {}", quote_ident(name), ty.as_sql()))
        .collect::<Vec<_>>()
        .join(", ");
    conn.execute(
        &format!("CREATE TABLE IF NOT EXISTS {} ({columns})", quote_ident(table)),
        [],
    )?;
    Ok(())
}

/// Empty fields load as NULL; everything else binds under the column's
/// inferred type.
fn field_value(raw: &str, ty: ColumnType) -> Value {
    if raw.is_empty() {
        return Value::Null;
    }
    match ty {
        ColumnType::Integer => raw
            .parse::<i64>()
            .map(Value::Integer)
            .unwrap_or_else(|_| Value::Text(raw.to_string())),
        ColumnType::Real => raw
            .parse::<f64>()
            .map(Value::Real)
            .unwrap_or_else(|_| Value::Text(raw.to_string())),
        ColumnType::Text => Value::Text(raw.to_string()),
    }
}

/// `SELECT *` the table into a delimited file with a header row,
/// overwriting whatever was at `dest`. Store and file errors propagate.
fn run_table_export(store: &Store, table: &str, dest: &Path) -> Result<()> {
    let conn = store.connect()?;
    let mut stmt = conn.prepare(&format!("SELECT * FROM {}", quote_ident(table)))?;
    let column_names: Vec<String> = stmt
        .column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();

    let mut writer = WriterBuilder::new().from_path(dest)?;
    writer.write_record(&column_names)?;

    let mut rows = stmt.query([])?;
    let mut count = 0usize;
    while let Some(row) = rows.next()? {
        let mut fields = Vec::with_capacity(column_names.len());
        for i in 0..column_names.len() {
            fields.push(render_field(row.get_ref(i)?));
        }
        writer.write_record(&fields)?;
        count += 1;
    }
    writer.flush()?;

    info!(
        rows = count,
        "Copy table `{}` to file `{}`",
        table,
        dest.display()
    );
    Ok(())
}

fn render_field(value: ValueRef<'_>) -> String {
    match value {
        ValueRef::Null => String::new(),
        ValueRef::Integer(i) => i.to_string(),
        ValueRef::Real(r) => r.to_string(),
        ValueRef::Text(t) => String::from_utf8_lossy(t).into_owned(),
        ValueRef::Blob(b) => String::from_utf8_lossy(b).into_owned(),
    }
}

/// Execute the script in one session with `domain_of_url` available.
/// Execution errors are logged, not propagated.
fn run_sql_script(store: &Store, script: &str, title: Option<&str>) -> Result<()> {
    let conn = store.connect_with_functions()?;
    match conn.execute_batch(script) {
        Ok(()) => {
            let title = title.unwrap_or_default();
            info!("Run SQL ({title}):\n{script}");
        }
        Err(_) => {
            error!("Error");
        }
    }
    Ok(())
}

/// Build and execute `CREATE TABLE <table> AS <select>` with the select
/// text unmodified. Execution errors (a pre-existing table included) are
/// logged with the full statement, not propagated.
fn run_create_table_as(store: &Store, table: &str, select: &str) -> Result<()> {
    let conn = store.connect_with_functions()?;
    let statement = format!("CREATE TABLE {} AS {}", quote_ident(table), select);
    match conn.execute_batch(&statement) {
        Ok(()) => {
            info!("Create table `{table}` as SELECT:\n{select}");
        }
        Err(e) => {
            error!("{statement}");
            error!("Error: `{e}`");
        }
    }
    Ok(())
}
