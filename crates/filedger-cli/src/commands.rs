use std::path::Path;
use std::sync::Arc;

use colored::Colorize;
use filedger_dispatch::{Response, Router, DELETE_FILE, INIT_FILE};
use filedger_records::FileRegistry;
use filedger_types::CompositeKey;

use crate::cli::*;
use crate::config::FiledgerConfig;
use crate::state::{load_store, save_store};

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let mut config = FiledgerConfig::load_or_default(cli.config.as_deref())?;
    if let Some(state) = cli.state {
        config.state_file = state;
    }
    config.pretty |= cli.pretty;

    let router = Router::with_file_operations();
    match cli.command {
        Command::Init => cmd_init(&config, &router),
        Command::Invoke(args) => cmd_invoke(&config, &router, args).map(|_| ()),
        Command::Dump => cmd_dump(&config.state_file),
    }
}

fn cmd_init(config: &FiledgerConfig, router: &Router) -> anyhow::Result<()> {
    let store = Arc::new(load_store(&config.state_file)?);
    let registry = FileRegistry::new(store.clone());
    let response = router.init(&registry);
    if !response.is_ok() {
        anyhow::bail!("init failed: {}", response.message);
    }
    save_store(&store, &config.state_file)?;
    println!(
        "{} Initialized file ledger state in {}",
        "✓".green().bold(),
        config.state_file.display().to_string().bold()
    );
    Ok(())
}

fn cmd_invoke(
    config: &FiledgerConfig,
    router: &Router,
    args: InvokeArgs,
) -> anyhow::Result<Response> {
    let store = Arc::new(load_store(&config.state_file)?);
    let registry = FileRegistry::new(store.clone());

    let response = router.invoke(&registry, &args.function, &args.args);
    if !response.is_ok() {
        println!("{} {}", response.status.to_string().red().bold(), response.message);
        anyhow::bail!("{} failed: {}", args.function, response.message);
    }

    if args.function == INIT_FILE || args.function == DELETE_FILE {
        save_store(&store, &config.state_file)?;
    }

    println!("{}", response.status.to_string().green().bold());
    if !response.payload.is_empty() {
        println!("{}", render_payload(&response.payload, config.pretty));
    }
    Ok(response)
}

fn cmd_dump(state_file: &Path) -> anyhow::Result<()> {
    let store = load_store(state_file)?;
    let keys = store.keys()?;
    if keys.is_empty() {
        println!("World state is empty.");
        return Ok(());
    }
    for key in keys {
        match CompositeKey::parse(&key) {
            Ok(composite) => println!("  {} {}", "index:".cyan(), composite),
            Err(_) => println!("  {} {}", "record:".green(), key.yellow()),
        }
    }
    Ok(())
}

fn render_payload(payload: &[u8], pretty: bool) -> String {
    if pretty {
        if let Ok(value) = serde_json::from_slice::<serde_json::Value>(payload) {
            if let Ok(text) = serde_json::to_string_pretty(&value) {
                return text;
            }
        }
    }
    String::from_utf8_lossy(payload).into_owned()
}
