//! `chatbw` — terminal front end for the ChatBW assistant.
//!
//! The access gate, conversation store, and responder all live in the `chat`
//! crate; this binary only wires them to stdin/stdout. The login flag is kept
//! under `--state-dir` so a session survives between invocations.

mod render;

use std::io::Write as _;
use std::path::PathBuf;
use std::sync::{Arc, PoisonError};

use chat::{
    AccessGate, ChatSession, FileSessionStore, GateError, RequestContext, Responder, ResponderClient, ResponderError,
    Session, SessionContext, SharedConversation,
};
use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("missing access password; pass --access-password or set CHATBW_ACCESS_PASSWORD")]
    MissingPassword,
    #[error("not authenticated; run `chatbw login` first")]
    NotAuthenticated,
    #[error("responder setup failed: {0}")]
    Responder(#[from] ResponderError),
    #[error(transparent)]
    Gate(#[from] GateError),
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("background task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server unhealthy: status {0}")]
    Unhealthy(u16),
}

#[derive(Parser, Debug)]
#[command(name = "chatbw", about = "ChatBW support assistant in the terminal")]
struct Cli {
    #[arg(long, env = "CHATBW_ACCESS_PASSWORD", hide_env_values = true)]
    access_password: Option<String>,

    #[arg(long, env = "CHATBW_STATE_DIR", default_value = ".chatbw")]
    state_dir: PathBuf,

    #[arg(long, env = "CHATBW_USER_ID")]
    user_id: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Unlock the assistant; prompts when --password is omitted.
    Login {
        #[arg(long)]
        password: Option<String>,
    },
    /// Clear the persisted login.
    Logout,
    /// Interactive conversation. `/logout` ends the session, `/quit` leaves.
    Chat,
    /// Send one message and print the reply.
    Send { text: String },
    /// Check a running `chatbw-server`.
    Ping {
        #[arg(long, env = "CHATBW_SERVER_URL", default_value = "http://127.0.0.1:3000")]
        server_url: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match &cli.command {
        Command::Login { password } => run_login(&cli, password.clone()).await,
        Command::Logout => run_logout(&cli),
        Command::Chat => run_chat(&cli, build_responder()?).await,
        Command::Send { text } => run_send(&cli, build_responder()?, text).await,
        Command::Ping { server_url } => run_ping(server_url).await,
    }
}

fn build_responder() -> Result<Arc<dyn Responder>, CliError> {
    let client = ResponderClient::from_env()?;
    info!(kind = client.kind().as_str(), target = client.target(), "responder ready");
    Ok(Arc::new(client))
}

fn gate_context(cli: &Cli) -> Result<SessionContext<FileSessionStore>, CliError> {
    let password = cli.access_password.clone().ok_or(CliError::MissingPassword)?;
    Ok(SessionContext::new(AccessGate::new(password), FileSessionStore::in_dir(&cli.state_dir)))
}

fn request_context(cli: &Cli) -> RequestContext {
    cli.user_id.clone().map(RequestContext::for_user).unwrap_or_default()
}

// =============================================================================
// ACCESS
// =============================================================================

async fn run_login(cli: &Cli, password: Option<String>) -> Result<(), CliError> {
    let mut ctx = gate_context(cli)?;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    authenticate(&mut ctx, password, &mut lines).await?;
    println!("authenticated");
    Ok(())
}

fn run_logout(cli: &Cli) -> Result<(), CliError> {
    let mut ctx = gate_context(cli)?;
    match ctx.restore()? {
        Some(session) => {
            ctx.logout(session)?;
            println!("logged out");
        }
        None => println!("not logged in"),
    }
    Ok(())
}

async fn authenticate(
    ctx: &mut SessionContext<FileSessionStore>,
    password: Option<String>,
    lines: &mut Lines<BufReader<Stdin>>,
) -> Result<Session, CliError> {
    if let Some(password) = password {
        return Ok(ctx.login(&password)?);
    }
    loop {
        let Some(candidate) = prompt(lines, "password: ").await? else {
            return Err(CliError::NotAuthenticated);
        };
        match ctx.login(&candidate) {
            Ok(session) => return Ok(session),
            Err(GateError::IncorrectPassword) => eprintln!("{}", ctx.error().unwrap_or_default()),
            Err(err) => return Err(err.into()),
        }
    }
}

async fn prompt(lines: &mut Lines<BufReader<Stdin>>, label: &str) -> Result<Option<String>, CliError> {
    print!("{label}");
    std::io::stdout().flush()?;
    Ok(lines.next_line().await?)
}

// =============================================================================
// CONVERSATION
// =============================================================================

async fn run_chat(cli: &Cli, responder: Arc<dyn Responder>) -> Result<(), CliError> {
    let mut ctx = gate_context(cli)?;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let session = match ctx.restore()? {
        Some(session) => session,
        None => authenticate(&mut ctx, None, &mut lines).await?,
    };

    let chat = ChatSession::new(&session, responder, request_context(cli));
    let (stop, stopped) = oneshot::channel();
    let renderer = spawn_renderer(chat.conversation().clone(), stopped);

    let mut in_flight = Vec::new();
    let mut logout = false;
    while let Some(line) = lines.next_line().await? {
        match line.trim() {
            "/quit" => break,
            "/logout" => {
                logout = true;
                break;
            }
            _ => in_flight.extend(chat.submit(&line)),
        }
    }

    for handle in in_flight {
        handle.await?;
    }
    let _ = stop.send(());
    renderer.await?;

    if logout {
        ctx.logout(session)?;
        println!("logged out");
    }
    Ok(())
}

async fn run_send(cli: &Cli, responder: Arc<dyn Responder>, text: &str) -> Result<(), CliError> {
    let mut ctx = gate_context(cli)?;
    let Some(session) = ctx.restore()? else {
        return Err(CliError::NotAuthenticated);
    };
    let chat = ChatSession::new(&session, responder, request_context(cli));
    let Some(handle) = chat.submit(text) else {
        eprintln!("nothing to send");
        return Ok(());
    };
    handle.await?;
    if let Some(reply) = chat.messages().last() {
        print!("{}", render::message(reply));
    }
    Ok(())
}

/// Print every message appended to `conversation` until `stop` fires, then
/// flush whatever arrived in between.
fn spawn_renderer(conversation: SharedConversation, mut stop: oneshot::Receiver<()>) -> JoinHandle<()> {
    let mut changes = conversation.lock().unwrap_or_else(PoisonError::into_inner).subscribe();
    tokio::spawn(async move {
        let mut printed = 0;
        loop {
            printed = print_new(&conversation, printed);
            tokio::select! {
                changed = changes.changed() => {
                    if changed.is_err() {
                        break;
                    }
                }
                _ = &mut stop => {
                    print_new(&conversation, printed);
                    break;
                }
            }
        }
    })
}

fn print_new(conversation: &SharedConversation, printed: usize) -> usize {
    let (blocks, total) = {
        let conversation = conversation.lock().unwrap_or_else(PoisonError::into_inner);
        let messages = conversation.messages();
        let blocks: Vec<String> = messages.iter().skip(printed).map(render::message).collect();
        (blocks, messages.len())
    };
    for block in blocks {
        println!("{block}");
    }
    total
}

// =============================================================================
// HEALTH
// =============================================================================

async fn run_ping(server_url: &str) -> Result<(), CliError> {
    let url = format!("{}/healthz", server_url.trim_end_matches('/'));
    let response = reqwest::get(&url).await?;
    let status = response.status();
    if !status.is_success() {
        return Err(CliError::Unhealthy(status.as_u16()));
    }
    println!("{}", response.text().await?);
    Ok(())
}
