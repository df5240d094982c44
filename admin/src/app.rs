use std::{error::Error, fmt::Write as _, process::ExitCode, time::Duration};

use clap::{Parser, Subcommand};
use lib::{
    constants::DEFAULT_COMMAND_PORT,
    protocol::{CommandRequest, CommandResponse, read_json_frame, write_json_frame},
    queue::QueueStatus,
};
use tokio::{net::TcpStream, time::timeout};
use tracing::{debug, info};

const RESPONSE_TIMEOUT: Duration = Duration::from_secs(5);

/// Operator console for the chat queue.
#[derive(Debug, Parser)]
#[command(name = "switchboard", version)]
pub struct Cli {
    /// Server command address, host:port.
    #[arg(long, env = "SWITCHBOARD_ADDR")]
    addr: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Add a new chat request.
    Add { customer_name: String },
    /// End the oldest chat.
    End,
    /// List all active chats.
    List,
    /// Print the queue status as JSON.
    Json,
}

pub async fn run(cli: Cli) -> Result<ExitCode, Box<dyn Error>> {
    let addr = cli
        .addr
        .unwrap_or_else(|| format!("127.0.0.1:{}", DEFAULT_COMMAND_PORT));

    let request = match &cli.command {
        Command::Add { customer_name } => CommandRequest::add(customer_name.as_str()),
        Command::End => CommandRequest::end(),
        Command::List | Command::Json => CommandRequest::status(),
    };

    let mut stream = TcpStream::connect(&addr).await?;
    info!("connected to {}", stream.peer_addr()?);
    debug!("sending {} command", request.kind());
    write_json_frame(&mut stream, &request).await?;
    let response = timeout(
        RESPONSE_TIMEOUT,
        read_json_frame::<_, CommandResponse>(&mut stream),
    )
    .await??
    .ok_or("server closed the connection without replying")?;

    match response {
        CommandResponse::Ok(accepted) => {
            println!("{}", accepted.message);
            Ok(ExitCode::SUCCESS)
        }
        CommandResponse::Snapshot(snapshot) => {
            if matches!(cli.command, Command::Json) {
                println!("{}", serde_json::to_string(&snapshot.queue)?);
            } else {
                print!("{}", render_table(&snapshot.queue));
            }
            Ok(ExitCode::SUCCESS)
        }
        CommandResponse::Rejected(rejected) => {
            debug!("command rejected with {:?}", rejected.code);
            println!("{}", rejected.message);
            Ok(ExitCode::FAILURE)
        }
    }
}

fn render_table(status: &QueueStatus) -> String {
    if status.chats.is_empty() {
        return "No active chats.\n".to_owned();
    }

    let mut out = String::from("Active Chats:\n");
    out.push_str("ID | Customer | Agent | Timestamp\n");
    out.push_str("---|----------|-------|----------\n");
    for chat in &status.chats {
        let _ = writeln!(
            out,
            "{} | {} | {} | {}",
            chat.id(),
            chat.customer_name(),
            chat.agent_name(),
            chat.timestamp()
        );
    }
    let _ = writeln!(out, "{}/{} slots in use", status.total_chats, status.capacity);
    if let Some(oldest) = status.next_to_end() {
        let _ = writeln!(out, "Next to end: #{} {}", oldest.id(), oldest.customer_name());
    }
    out
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use lib::queue::QueueStatus;

    use super::{Cli, Command, render_table};

    #[test]
    fn empty_queue_renders_placeholder() {
        let status = QueueStatus {
            total_chats: 0,
            capacity: 10,
            chats: Vec::new(),
            agents: Vec::new(),
        };
        assert_eq!(render_table(&status), "No active chats.\n");
    }

    #[test]
    fn table_lists_chats_oldest_first() {
        let status: QueueStatus = serde_json::from_value(serde_json::json!({
            "totalChats": 2,
            "capacity": 10,
            "chats": [
                {"id": 4, "customerName": "Ada", "agentName": "Agent Bob", "timestamp": "2024-01-02 03:04:05"},
                {"id": 5, "customerName": "Lin", "agentName": "Agent Eve", "timestamp": "2024-01-02 03:05:00"},
            ],
            "agents": ["Agent Bob", "Agent Eve"],
        }))
        .expect("valid status");

        let table = render_table(&status);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[0], "Active Chats:");
        assert_eq!(lines[3], "4 | Ada | Agent Bob | 2024-01-02 03:04:05");
        assert_eq!(lines[4], "5 | Lin | Agent Eve | 2024-01-02 03:05:00");
        assert_eq!(lines[5], "2/10 slots in use");
        assert_eq!(lines[6], "Next to end: #4 Ada");
    }

    #[test]
    fn parses_add_with_address() {
        let cli = Cli::try_parse_from(["switchboard", "--addr", "10.0.0.5:7410", "add", "Ada Lovelace"])
            .expect("valid args");
        assert_eq!(cli.addr.as_deref(), Some("10.0.0.5:7410"));
        assert!(matches!(cli.command, Command::Add { ref customer_name } if customer_name == "Ada Lovelace"));
    }

    #[test]
    fn add_requires_a_name() {
        assert!(Cli::try_parse_from(["switchboard", "add"]).is_err());
    }
}
