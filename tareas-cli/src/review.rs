//! Interactive status review of one file.
//!
//! Each accepted mutation updates the store row immediately, then schedules
//! a debounced counter sync for the file — a burst of status changes
//! produces one file-row update, not one per keystroke. Quitting flushes.

use anyhow::Result;
use std::io::{self, Write};
use tareas_core::{TaskSet, TaskStatus};
use tareas_store::{AutosaveScheduler, StoreClient};

use crate::{connect, store_error};

fn prompt() -> Result<Option<String>> {
    print!("> ");
    io::stdout().flush().ok();
    let mut s = String::new();
    let n = io::stdin().read_line(&mut s)?;
    if n == 0 {
        return Ok(None); // EOF
    }
    Ok(Some(s.trim().to_string()))
}

pub async fn run_review(file_id: &str) -> Result<()> {
    let client = connect()?;
    let mut set = client
        .load_file(file_id)
        .await
        .map_err(store_error)?
        .into_task_set();
    let mut autosave = AutosaveScheduler::new();

    println!("{}: {}", set.meta().name, set.stats().summary());
    println!();
    print_tasks(&set);
    println!();
    println!("Commands: <n> done|start|cancel|pend, rm <n>, list, quit");

    loop {
        let Some(line) = prompt()? else { break };
        if line.is_empty() {
            continue;
        }

        let words: Vec<&str> = line.split_whitespace().collect();
        match words.as_slice() {
            ["q"] | ["quit"] => break,
            ["l"] | ["list"] => print_tasks(&set),
            ["rm", idx] => {
                if let Some(task_id) = task_id_at(&set, idx) {
                    match client.delete_task(&task_id).await {
                        Ok(()) => {
                            let removed = set.remove_task(&task_id)?;
                            println!("Deleted `{}`", removed.name);
                            schedule_sync(&mut autosave, &client, &set, file_id);
                        }
                        Err(err) => eprintln!("delete failed: {err}"),
                    }
                }
            }
            [idx, verb] => {
                let Some(status) = status_for(verb) else {
                    println!("Unknown command `{verb}`");
                    continue;
                };
                if let Some(task_id) = task_id_at(&set, idx) {
                    // Store first; local state only moves on success.
                    match client.update_task_status(&task_id, status).await {
                        Ok(()) => {
                            set.set_status(&task_id, status)?;
                            println!("{}", set.stats().summary());
                            schedule_sync(&mut autosave, &client, &set, file_id);
                        }
                        Err(err) => eprintln!("update failed: {err}"),
                    }
                }
            }
            _ => println!("Commands: <n> done|start|cancel|pend, rm <n>, list, quit"),
        }
    }

    // Final flush: drop the pending debounced sync and write now.
    autosave.cancel_pending(file_id);
    let meta = set.meta();
    client
        .sync_counters(file_id, meta.total_tasks, meta.completed_tasks)
        .await
        .map_err(store_error)?;
    println!("{}", set.stats().summary());
    Ok(())
}

fn print_tasks(set: &TaskSet) {
    let mut current_sheet: Option<&str> = None;
    for (i, t) in set.tasks().iter().enumerate() {
        if current_sheet != Some(t.sheet.as_str()) {
            println!("Hoja: {}", t.sheet);
            current_sheet = Some(t.sheet.as_str());
        }
        let quantity = t
            .quantity
            .as_deref()
            .map(|q| format!("  x{q}"))
            .unwrap_or_default();
        println!("{:>4}. {} {}{}", i + 1, t.status.glyph(), t.name, quantity);
    }
}

fn status_for(verb: &str) -> Option<TaskStatus> {
    match verb {
        "done" => Some(TaskStatus::Completado),
        "start" => Some(TaskStatus::EnProceso),
        "cancel" => Some(TaskStatus::Cancelado),
        "pend" => Some(TaskStatus::Pendiente),
        _ => None,
    }
}

/// 1-based display index → task id; prints why when it can't resolve.
fn task_id_at(set: &TaskSet, idx: &str) -> Option<String> {
    let Ok(n) = idx.parse::<usize>() else {
        println!("`{idx}` is not a task number");
        return None;
    };
    let Some(task) = n.checked_sub(1).and_then(|i| set.tasks().get(i)) else {
        println!("No task {n} (1..{})", set.len());
        return None;
    };
    match &task.id {
        Some(id) => Some(id.clone()),
        None => {
            println!("Task {n} has no store id yet");
            None
        }
    }
}

fn schedule_sync(
    autosave: &mut AutosaveScheduler,
    client: &StoreClient,
    set: &TaskSet,
    file_id: &str,
) {
    let client = client.clone();
    let key = file_id.to_string();
    let (total, completed) = (set.meta().total_tasks, set.meta().completed_tasks);
    autosave.schedule(file_id, async move {
        if let Err(err) = client.sync_counters(&key, total, completed).await {
            eprintln!("autosave failed: {err}");
        }
    });
}
