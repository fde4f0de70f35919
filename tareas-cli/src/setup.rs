use anyhow::{Context, Result};
use std::io::{self, Write};
use tareas_store::{StoreClient, StoreConfig};

use crate::config::{Config, StoreSection, config_path, load_config, save_config};

fn prompt(label: &str) -> Result<String> {
    print!("{}: ", label);
    io::stdout().flush().ok();
    let mut s = String::new();
    io::stdin().read_line(&mut s)?;
    Ok(s.trim().to_string())
}

/// Interactive store setup: capture the project URL and API key, write
/// config.toml, then probe the connection. This is also where users land
/// when a command fails with a connectivity error.
pub async fn run_setup() -> Result<()> {
    println!("tareas setup\n");
    println!("You need a hosted store project (Supabase or compatible) with the");
    println!("`excel_files` and `todos` tables. Paste its connection settings:\n");

    let current = load_config().unwrap_or_default();

    let url = prompt("Project URL (e.g. https://myproject.supabase.co)")?;
    let api_key = prompt("API key (anon key)")?;

    let cfg = Config {
        store: StoreSection {
            url: if url.is_empty() { current.store.url } else { url },
            api_key: if api_key.is_empty() {
                current.store.api_key
            } else {
                api_key
            },
        },
    };
    save_config(&cfg).context("save config")?;
    println!("\nWrote {}", config_path()?.display());

    print!("Testing connection... ");
    io::stdout().flush().ok();
    let client = StoreClient::new(StoreConfig {
        url: cfg.store.url.clone(),
        api_key: cfg.store.api_key.clone(),
    });
    match client {
        Ok(client) => match client.check_connection().await {
            Ok(()) => println!("ok"),
            Err(err) => {
                println!("failed\n");
                println!("{err}");
                println!("\nCheck the URL/key and that the tables exist, then re-run: tareas setup");
            }
        },
        Err(err) => {
            println!("failed\n");
            println!("{err}");
        }
    }

    println!("\nNext recommended steps:");
    println!("- tareas import <workbook.xlsx>");
    println!("- tareas list");
    println!("- tareas review <file-id>");

    Ok(())
}
