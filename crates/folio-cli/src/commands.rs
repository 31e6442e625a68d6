use anyhow::Context;
use colored::Colorize;
use folio_store::{Options, Store, TracingLogger};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let store = open_store(&cli)?;
    match cli.command {
        Command::Init => cmd_init(&store),
        Command::Put(args) => cmd_put(&store, args),
        Command::Get(args) => cmd_get(&store, args),
        Command::List(args) => cmd_list(&store, args, cli.format),
        Command::Rm(args) => cmd_rm(&store, args),
        Command::Seed(args) => cmd_seed(&store, args, cli.format),
    }
}

fn open_store(cli: &Cli) -> anyhow::Result<Store> {
    tracing::debug!(root = %cli.root.display(), level = %cli.log_level, "opening store");
    let logger = std::sync::Arc::new(TracingLogger::new(cli.log_level));
    Store::new(&cli.root, Options::with_logger(logger))
        .with_context(|| format!("cannot open store at {}", cli.root.display()))
}

fn cmd_init(store: &Store) -> anyhow::Result<()> {
    println!(
        "{} Store ready at {}",
        "✓".green().bold(),
        store.root().display().to_string().bold()
    );
    Ok(())
}

fn cmd_put(store: &Store, args: PutArgs) -> anyhow::Result<()> {
    let value: Value = serde_json::from_str(&args.json).context("record body is not valid JSON")?;
    store
        .write(&args.collection, &args.name, &value)
        .with_context(|| format!("cannot write {}/{}", args.collection, args.name))?;
    println!(
        "{} Wrote {}/{}",
        "✓".green(),
        args.collection.cyan(),
        args.name.yellow()
    );
    Ok(())
}

fn cmd_get(store: &Store, args: GetArgs) -> anyhow::Result<()> {
    let value: Value = store
        .read(&args.collection, &args.name)
        .with_context(|| format!("cannot read {}/{}", args.collection, args.name))?;
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

fn cmd_list(store: &Store, args: ListArgs, format: OutputFormat) -> anyhow::Result<()> {
    let records = store
        .read_all(&args.collection)
        .with_context(|| format!("cannot list {}", args.collection))?;
    print_records(&args.collection, &records, format)
}

fn cmd_rm(store: &Store, args: RmArgs) -> anyhow::Result<()> {
    let name = args.name.unwrap_or_default();
    store
        .delete(&args.collection, &name)
        .with_context(|| format!("cannot delete {}/{}", args.collection, name))?;
    if name.is_empty() {
        println!("{} Deleted collection {}", "✓".green(), args.collection.cyan());
    } else {
        println!(
            "{} Deleted {}/{}",
            "✓".green(),
            args.collection.cyan(),
            name.yellow()
        );
    }
    Ok(())
}

fn cmd_seed(store: &Store, args: SeedArgs, format: OutputFormat) -> anyhow::Result<()> {
    for user in sample_users() {
        store
            .write(&args.collection, &user.name, &user)
            .with_context(|| format!("cannot write {}/{}", args.collection, user.name))?;
    }

    let users: Vec<User> = store
        .read_all_as(&args.collection)
        .with_context(|| format!("cannot list {}", args.collection))?;
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&users)?),
        OutputFormat::Text => {
            println!(
                "{} Seeded {} records into {}",
                "✓".green().bold(),
                users.len().to_string().bold(),
                args.collection.cyan()
            );
            for user in &users {
                println!(
                    "  {} ({}), {}, {}, {}",
                    user.name.yellow(),
                    user.age,
                    user.company,
                    user.address.city,
                    user.address.country
                );
            }
        }
    }
    Ok(())
}

fn print_records(collection: &str, records: &[String], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            let parsed = records
                .iter()
                .map(|raw| serde_json::from_str::<Value>(raw))
                .collect::<Result<Vec<_>, _>>()
                .with_context(|| format!("collection {collection} holds a malformed record"))?;
            println!("{}", serde_json::to_string_pretty(&parsed)?);
        }
        OutputFormat::Text => {
            println!("{} records in {}", records.len().to_string().bold(), collection.cyan());
            for raw in records {
                print!("{raw}");
            }
        }
    }
    Ok(())
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub city: String,
    pub state: String,
    pub country: String,
    pub pincode: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    pub age: String,
    pub contact: String,
    pub company: String,
    pub address: Address,
}

fn sample_users() -> Vec<User> {
    ["John", "Paul", "Mohan", "James", "Jerry"]
        .into_iter()
        .map(|name| User {
            name: name.into(),
            age: "23".into(),
            contact: "2324243424".into(),
            company: "Murl Tech".into(),
            address: Address {
                city: "Banglore".into(),
                state: "Karnataka".into(),
                country: "India".into(),
                pincode: "274372".into(),
            },
        })
        .collect()
}
