use std::process::ExitCode;

use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use models::member::{Member, MemberPatch, MemberStatus};
use serde::Serialize;
use service::members::MemberService;
use service::runtime::StoreContext;
use tracing::{error, info};
use uuid::Uuid;

/// Member directory backed by the local entity store.
#[derive(Debug, Parser)]
#[command(name = "members", version)]
struct Cli {
    /// Emit logs (on stderr) as JSON instead of compact text
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List every member
    List,
    /// Show one member
    Get { id: String },
    /// Create a member from a JSON object with every camelCase field, no id
    Create { json: String },
    /// Merge a JSON object of fields into an existing member
    Update { id: String, json: String },
    /// Delete a member
    Delete { id: String },
    /// Number of members
    Count,
    /// Filter members by status and/or name
    Search {
        #[arg(long)]
        status: Option<MemberStatus>,
        #[arg(long)]
        name: Option<String>,
    },
    /// Clear the members slot and restore the default directory
    Reset,
}

fn init_logging(json: bool) {
    // 提前加载 .env，使得 RUST_LOG / CONFIG_PATH 等环境变量生效
    dotenv().ok();
    common::utils::logging::init_logging_stderr("warn", json);
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn run(command: Command) -> anyhow::Result<bool> {
    let cfg = configs::AppConfig::load_or_default()?;
    let ctx = StoreContext::from_config(&cfg.store).await?;
    let members: MemberService = ctx.members().await?;

    match command {
        Command::List => print_json(&members.list().await?)?,
        Command::Get { id } => match members.get(&id).await? {
            Some(m) => print_json(&m)?,
            None => {
                eprintln!("member {id} not found");
                return Ok(false);
            }
        },
        Command::Create { json } => {
            let member: Member = serde_json::from_str(&json)?;
            let created = members.create(member).await?;
            info!(id = %created.id(), "member created");
            print_json(&created)?;
        }
        Command::Update { id, json } => {
            let patch: MemberPatch = serde_json::from_str(&json)?;
            match members.update(&id, &patch).await? {
                Some(m) => print_json(&m)?,
                None => {
                    eprintln!("member {id} not found");
                    return Ok(false);
                }
            }
        }
        Command::Delete { id } => {
            if !members.delete(&id).await? {
                eprintln!("member {id} not found");
                return Ok(false);
            }
            info!(%id, "member deleted");
        }
        Command::Count => println!("{}", members.count().await?),
        Command::Search { status, name } => {
            let found = members.search(status, name.as_deref()).await?;
            print_json(&found)?;
        }
        Command::Reset => {
            members.reset().await?;
            info!("member directory reset");
        }
    }
    Ok(true)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.json_logs);

    let run_id = Uuid::new_v4();
    std::panic::set_hook(Box::new(move |info| {
        error!(service = "members", event = "panic", %run_id, message = %info, "unhandled panic occurred");
    }));

    let rt = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = "members", event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return ExitCode::FAILURE;
        }
    };

    match rt.block_on(run(cli.command)) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(2),
        Err(e) => {
            error!(service = "members", event = "command_failed", %run_id, error = %e, "command failed");
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
