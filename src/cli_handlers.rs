use crate::error::Result;
use crate::store::Store;
use crate::task::Task;
use std::fs;
use std::path::{Path, PathBuf};

/// Handle the load command
pub fn handle_load(db: &Path, table: String, file: PathBuf) -> Result<()> {
    let store = Store::new(db);
    let task = Task::FileLoad {
        table,
        source: file,
    };
    task.run(&store)?;
    println!("{task}");
    Ok(())
}

/// Handle the export command
pub fn handle_export(db: &Path, table: String, file: PathBuf) -> Result<()> {
    let store = Store::new(db);
    let task = Task::TableExport { table, dest: file };
    task.run(&store)?;
    println!("{task}");
    Ok(())
}

/// Handle the sql command
pub fn handle_sql(
    db: &Path,
    script: Option<String>,
    file: Option<PathBuf>,
    title: Option<String>,
) -> Result<()> {
    let script = match file {
        Some(path) => fs::read_to_string(path)?,
        None => script.unwrap_or_default(),
    };

    let store = Store::new(db);
    let task = Task::SqlScript { script, title };
    task.run(&store)?;
    println!("{task}");
    Ok(())
}

/// Handle the ctas command
pub fn handle_ctas(
    db: &Path,
    table: String,
    select: String,
    title: Option<String>,
) -> Result<()> {
    let store = Store::new(db);
    let task = Task::CreateTableAs {
        table,
        select,
        title,
    };
    task.run(&store)?;
    println!("{task}");
    Ok(())
}

/// Handle the run command: execute a flat task list in file order.
/// The first propagated error stops the batch; the SQL-executing tasks
/// still swallow their own script errors.
pub fn handle_run(db: &Path, manifest: &Path) -> Result<()> {
    let text = fs::read_to_string(manifest)?;
    let tasks: Vec<Task> = serde_json::from_str(&text)?;
    let store = Store::new(db);

    for task in &tasks {
        println!("{task}");
        task.run(&store)?;
    }
    println!("Ran {} tasks", tasks.len());

    Ok(())
}
