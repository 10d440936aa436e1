use std::borrow::Cow::{self, Borrowed, Owned};
use std::sync::Arc;

use anyhow::Result;
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};
use serde_json::Value;
use tracing_subscriber::EnvFilter;

use asesor_application::Orchestrator;
use asesor_core::AsesorError;
use asesor_core::response::is_error_reply;
use asesor_interaction::attachment::attachment_from_path;
use asesor_interaction::webhook_agent::WebhookAgent;

const COMMANDS: &[&str] = &[
    "/budget", "/expenses", "/summary", "/attach", "/detach", "/session", "/help", "/quit",
];

/// CLI helper for rustyline that provides completion, highlighting, and hints.
#[derive(Clone)]
struct CliHelper {
    commands: Vec<String>,
}

impl CliHelper {
    fn new() -> Self {
        Self {
            commands: COMMANDS.iter().map(|cmd| cmd.to_string()).collect(),
        }
    }
}

impl Helper for CliHelper {}

impl Completer for CliHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];

        if line.starts_with('/') {
            let candidates: Vec<Pair> = self
                .commands
                .iter()
                .filter(|cmd| cmd.starts_with(line))
                .map(|cmd| Pair {
                    display: cmd.clone(),
                    replacement: cmd.clone(),
                })
                .collect();
            Ok((0, candidates))
        } else {
            Ok((0, vec![]))
        }
    }
}

impl Highlighter for CliHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with('/') {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for CliHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];

        if line.starts_with('/') && !line.contains(' ') {
            self.commands
                .iter()
                .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
                .map(|cmd| cmd[line.len()..].to_string())
        } else {
            None
        }
    }
}

impl Validator for CliHelper {}

enum Flow {
    Continue,
    Quit,
}

/// The main entry point for the Asesor REPL.
///
/// Plays the role of the presentation layer: it only calls the
/// orchestrator's operations and renders the resulting state.
#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let agent = WebhookAgent::try_from_config()?;
    tracing::info!("[Main] Using webhook endpoint: {}", agent.endpoint());

    let orchestrator = Orchestrator::new(Arc::new(agent));
    let identity = orchestrator.session_identity();

    println!("{}", "Asesor Financiero".bold());
    println!(
        "Sesión {} — escribe tu consulta, o /help para los comandos.",
        identity.display_prefix().bright_green()
    );

    let mut editor: Editor<CliHelper, rustyline::history::DefaultHistory> = Editor::new()?;
    editor.set_helper(Some(CliHelper::new()));

    loop {
        match editor.readline("asesor> ") {
            Ok(line) => {
                let line = line.trim().to_string();
                if line.is_empty() {
                    continue;
                }
                let _ = editor.add_history_entry(&line);

                if line.starts_with('/') {
                    match handle_command(&orchestrator, &line).await {
                        Flow::Quit => break,
                        Flow::Continue => {}
                    }
                } else {
                    submit(&orchestrator, &line).await;
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(err) => {
                eprintln!("{} {}", "readline error:".red(), err);
                break;
            }
        }
    }

    println!("Hasta luego.");
    Ok(())
}

async fn handle_command(orchestrator: &Orchestrator, line: &str) -> Flow {
    let mut parts = line.splitn(2, ' ');
    let command = parts.next().unwrap_or(line);
    let argument = parts.next().map(str::trim).unwrap_or("");

    match command {
        "/quit" => return Flow::Quit,
        "/help" => print_help(),
        "/session" => {
            let identity = orchestrator.session_identity();
            println!("Sesión {} (creada {})", identity.id, identity.created_at);
        }
        "/attach" => {
            if argument.is_empty() {
                println!("{}", "Uso: /attach <ruta-al-archivo>".yellow());
            } else {
                match attachment_from_path(argument) {
                    Ok(source) => {
                        println!(
                            "Adjunto seleccionado: {} ({})",
                            source.name.bright_green(),
                            source.mime_type
                        );
                        orchestrator.select_attachment(source).await;
                    }
                    Err(err) => println!("{} {}", "No se pudo adjuntar:".red(), err),
                }
            }
        }
        "/detach" => {
            orchestrator.clear_attachment().await;
            println!("Adjunto descartado.");
        }
        "/budget" => quick_action(orchestrator, "show-budget").await,
        "/expenses" => quick_action(orchestrator, "list-expenses").await,
        "/summary" => quick_action(orchestrator, "financial-summary").await,
        _ => println!(
            "{}",
            format!("Comando desconocido: {command} — prueba /help").yellow()
        ),
    }

    Flow::Continue
}

async fn submit(orchestrator: &Orchestrator, text: &str) {
    match orchestrator.submit_query(text, None).await {
        Ok(reply) => print_reply(&reply),
        Err(err) => print_guard(&err),
    }
}

async fn quick_action(orchestrator: &Orchestrator, kind: &str) {
    match orchestrator.run_quick_action(kind).await {
        Ok(Some(reply)) => print_reply(&reply),
        Ok(None) => {}
        Err(err) => print_guard(&err),
    }
}

fn print_reply(reply: &Value) {
    if is_error_reply(reply) {
        let message = reply["error"].as_str().unwrap_or("error desconocido");
        println!("{} {}", "✗".red(), message.red());
        return;
    }

    match reply {
        Value::String(text) => println!("{}", text.bright_white()),
        other => match serde_json::to_string_pretty(other) {
            Ok(pretty) => println!("{}", pretty.bright_white()),
            Err(_) => println!("{other}"),
        },
    }
}

fn print_guard(err: &AsesorError) {
    println!("{}", err.to_string().yellow());
}

fn print_help() {
    println!("{}", "Comandos:".bold());
    println!("  /budget    Muestra el presupuesto actual");
    println!("  /expenses  Lista los gastos recientes");
    println!("  /summary   Resumen de la situación financiera");
    println!("  /attach    Selecciona un recibo o factura para la próxima consulta");
    println!("  /detach    Descarta el adjunto seleccionado");
    println!("  /session   Muestra el identificador de la sesión");
    println!("  /quit      Salir");
    println!("Cualquier otro texto se envía al asistente tal cual.");
}
