use crate::error::Result;
use crate::url;
use rusqlite::Connection;
use rusqlite::functions::FunctionFlags;
use std::path::{Path, PathBuf};

/// Locator for the shared SQLite store.
///
/// Holds only the database path. Each task run opens its own connection
/// through [`Store::connect`] and the handle is released on drop, so the
/// connection cannot outlive the run on either the success or the failure
/// path. Two sequential tasks are two independent sessions.
pub struct Store {
    path: PathBuf,
}

impl Store {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Store {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open a connection for one task run.
    pub fn connect(&self) -> Result<Connection> {
        Ok(Connection::open(&self.path)?)
    }

    /// Open a connection with the `domain_of_url` scalar function
    /// registered, for sessions that execute caller-supplied SQL.
    pub fn connect_with_functions(&self) -> Result<Connection> {
        let conn = self.connect()?;
        register_domain_of_url(&conn)?;
        Ok(conn)
    }
}

/// `domain_of_url(url)` returns the host segment between `//` and the
/// next `/`. A URL without that pattern fails the query.
fn register_domain_of_url(conn: &Connection) -> Result<()> {
    conn.create_scalar_function(
        "domain_of_url",
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            let value = ctx.get::<String>(0)?;
            match url::host_of(&value) {
                Some(host) => Ok(host.to_string()),
                None => Err(rusqlite::Error::UserFunctionError(
                    format!("no host in url: {value}").into(),
                )),
            }
        },
    )?;
    Ok(())
}

/// Quote an identifier for use in generated SQL. Table names are trusted
/// caller input; header-derived column names are not guaranteed to be
/// bare words, so everything goes through the same quoting.
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup() -> (Store, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = Store::new(temp_dir.path().join("test.db"));
        (store, temp_dir)
    }

    #[test]
    fn test_domain_of_url_registered() {
        let (store, _temp) = setup();
        let conn = store.connect_with_functions().unwrap();

        let host: String = conn
            .query_row(
                "SELECT domain_of_url('https://example.com/path')",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(host, "example.com");
    }

    #[test]
    fn test_domain_of_url_fails_without_pattern() {
        let (store, _temp) = setup();
        let conn = store.connect_with_functions().unwrap();

        let result: std::result::Result<String, _> =
            conn.query_row("SELECT domain_of_url('example.com')", [], |row| row.get(0));
        assert!(result.is_err());
    }

    #[test]
    fn test_plain_connection_has_no_function() {
        let (store, _temp) = setup();
        let conn = store.connect().unwrap();

        let result: std::result::Result<String, _> = conn.query_row(
            "SELECT domain_of_url('https://example.com/')",
            [],
            |row| row.get(0),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_quote_ident() {
        assert_eq!(quote_ident("sales"), "\"sales\"");
        assert_eq!(quote_ident("odd \"name\""), "\"odd \"\"name\"\"\"");
    }
}
