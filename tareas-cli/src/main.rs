use anyhow::{Result, anyhow, bail};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tareas_core::{Stats, TaskStatus};
use tareas_ingest::{ExtractError, extract_workbook, read_workbook};
use tareas_store::{StoreClient, StoreError};

mod config;
mod review;
mod setup;
mod state;

#[derive(Parser, Debug)]
#[command(name = "tareas", version, about = "Spreadsheet-derived task tracker")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// One-time interactive setup: store URL/key, written to ~/.tareas/
    Setup,

    /// Import a workbook (xlsx/xls/ods): extract tasks and persist them
    Import {
        file: PathBuf,

        /// Display name for the imported file (default: the file name)
        #[arg(long)]
        name: Option<String>,
    },

    /// List imported files with their completion counters
    List,

    /// Show one file's tasks, grouped by sheet
    Show { file_id: String },

    /// Change one task's status (pendiente, en-proceso, completado, cancelado)
    Status {
        file_id: String,
        task_id: String,
        status: String,
    },

    /// Delete one task from a file
    DeleteTask { file_id: String, task_id: String },

    /// Delete a file and all of its tasks
    DeleteFile { file_id: String },

    /// Completion statistics for one file, or across all files
    Stats { file_id: Option<String> },

    /// Interactive status review of one file (debounced autosave)
    Review { file_id: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Setup => setup::run_setup().await?,
        Command::Import { file, name } => run_import(file, name).await?,
        Command::List => run_list().await?,
        Command::Show { file_id } => run_show(&file_id).await?,
        Command::Status {
            file_id,
            task_id,
            status,
        } => run_status(&file_id, &task_id, &status).await?,
        Command::DeleteTask { file_id, task_id } => run_delete_task(&file_id, &task_id).await?,
        Command::DeleteFile { file_id } => run_delete_file(&file_id).await?,
        Command::Stats { file_id } => run_stats(file_id.as_deref()).await?,
        Command::Review { file_id } => review::run_review(&file_id).await?,
    }

    Ok(())
}

/// Build a client from config + env; connection problems steer to setup.
pub(crate) fn connect() -> Result<StoreClient> {
    let cfg = config::store_config()?;
    StoreClient::new(cfg).map_err(store_error)
}

pub(crate) fn store_error(err: StoreError) -> anyhow::Error {
    if err.needs_setup() {
        anyhow!(
            "{err}\n\nThe task store is unreachable or not configured.\n\
             Run `tareas setup` to fix the connection settings."
        )
    } else {
        anyhow!(err)
    }
}

async fn run_import(file: PathBuf, name: Option<String>) -> Result<()> {
    let client = connect()?;
    // Surface connection problems before doing any parsing work.
    client.check_connection().await.map_err(store_error)?;

    let sheets = read_workbook(&file)?;
    println!("Read {} sheet(s) from {}", sheets.len(), file.display());

    let tasks = match extract_workbook(&sheets) {
        Ok(tasks) => tasks,
        Err(ExtractError::EmptyExtraction) => {
            bail!(
                "No tasks found in {}.\n\
                 Expected a header containing \"nombre\", or task names in the leftmost column.",
                file.display()
            );
        }
        Err(err) => return Err(err.into()),
    };

    for grid in &sheets {
        let n = tasks.iter().filter(|t| t.sheet == grid.name).count();
        println!("  {}: {} task(s)", grid.name, n);
    }

    let display_name = name.unwrap_or_else(|| {
        file.file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| file.display().to_string())
    });

    let saved = client
        .save_file(&display_name, &tasks)
        .await
        .map_err(store_error)?;
    let set = saved.into_task_set();

    println!(
        "\nSaved {} task(s) as file {}",
        set.len(),
        set.meta().id.as_deref().unwrap_or("?")
    );
    println!("{}", set.stats().summary());
    Ok(())
}

async fn run_list() -> Result<()> {
    let client = connect()?;
    let files = client.load_files().await.map_err(store_error)?;

    if files.is_empty() {
        println!("No files imported yet. Try: tareas import <workbook.xlsx>");
        return Ok(());
    }

    for f in &files {
        let pct = if f.file.total_tasks == 0 {
            0.0
        } else {
            100.0 * f64::from(f.file.completed_tasks) / f64::from(f.file.total_tasks)
        };
        println!(
            "{}  {}  {}/{} completado ({:.0}%)  updated {}",
            f.file.id,
            f.file.name,
            f.file.completed_tasks,
            f.file.total_tasks,
            pct,
            f.file.updated_at.format("%Y-%m-%d %H:%M")
        );
    }
    Ok(())
}

async fn run_show(file_id: &str) -> Result<()> {
    let client = connect()?;
    let set = client
        .load_file(file_id)
        .await
        .map_err(store_error)?
        .into_task_set();

    println!("{}: {}", set.meta().name, set.stats().summary());

    let mut current_sheet: Option<&str> = None;
    for (i, t) in set.tasks().iter().enumerate() {
        if current_sheet != Some(t.sheet.as_str()) {
            println!("\nHoja: {}", t.sheet);
            current_sheet = Some(t.sheet.as_str());
        }
        let quantity = t
            .quantity
            .as_deref()
            .map(|q| format!("  x{q}"))
            .unwrap_or_default();
        println!(
            "{:>4}. {} {}{}  ({})  {}",
            i + 1,
            t.status.glyph(),
            t.name,
            quantity,
            t.cell_ref,
            t.id.as_deref().unwrap_or("-")
        );
    }
    Ok(())
}

async fn run_status(file_id: &str, task_id: &str, status: &str) -> Result<()> {
    let status: TaskStatus = status.parse()?;
    let client = connect()?;

    let mut set = client
        .load_file(file_id)
        .await
        .map_err(store_error)?
        .into_task_set();
    if set.get(task_id).is_none() {
        bail!("no task {task_id} in file {file_id}");
    }

    // Store first; local state only moves on success.
    client
        .update_task_status(task_id, status)
        .await
        .map_err(store_error)?;
    set.set_status(task_id, status)?;

    let meta = set.meta();
    client
        .sync_counters(file_id, meta.total_tasks, meta.completed_tasks)
        .await
        .map_err(store_error)?;

    println!("{task_id} -> {status}");
    println!("{}", set.stats().summary());
    Ok(())
}

async fn run_delete_task(file_id: &str, task_id: &str) -> Result<()> {
    let client = connect()?;

    let mut set = client
        .load_file(file_id)
        .await
        .map_err(store_error)?
        .into_task_set();
    if set.get(task_id).is_none() {
        bail!("no task {task_id} in file {file_id}");
    }

    client.delete_task(task_id).await.map_err(store_error)?;
    let removed = set.remove_task(task_id)?;

    let meta = set.meta();
    client
        .sync_counters(file_id, meta.total_tasks, meta.completed_tasks)
        .await
        .map_err(store_error)?;

    println!("Deleted `{}`", removed.name);
    println!("{}", set.stats().summary());
    Ok(())
}

async fn run_delete_file(file_id: &str) -> Result<()> {
    let client = connect()?;
    let file = client.load_file(file_id).await.map_err(store_error)?;
    client.delete_file(file_id).await.map_err(store_error)?;
    println!(
        "Deleted {} and its {} task(s)",
        file.file.name, file.file.total_tasks
    );
    Ok(())
}

async fn run_stats(file_id: Option<&str>) -> Result<()> {
    let client = connect()?;

    match file_id {
        Some(id) => {
            let set = client
                .load_file(id)
                .await
                .map_err(store_error)?
                .into_task_set();
            println!("{}", set.meta().name);
            println!("{}", set.stats().summary());
        }
        None => {
            let files = client.load_files().await.map_err(store_error)?;
            let mut all = Stats::default();
            let count = files.len();
            for f in files {
                let set = f.into_task_set();
                all.merge(&set.stats());
            }
            println!("{count} file(s)");
            println!("{}", all.summary());
        }
    }
    Ok(())
}
