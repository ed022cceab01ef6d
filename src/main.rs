use chatline::app::{assistant_message_id, AppMessage, ChatApp, ConversationState};
use chatline::models::{MessageRole, MessageStatus};
use chatline::startup::{self, ClientConfig};

use color_eyre::Result;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

/// A line of user input.
#[derive(Debug, PartialEq, Eq)]
enum Command<'a> {
    New,
    Draft,
    Sessions,
    Switch(&'a str),
    Prompts,
    Prompt(&'a str),
    Token(Option<&'a str>),
    Help,
    Quit,
    Send(&'a str),
}

impl<'a> Command<'a> {
    fn parse(line: &'a str) -> Self {
        let line = line.trim();
        let (head, arg) = match line.split_once(char::is_whitespace) {
            Some((head, rest)) => (head, rest.trim()),
            None => (line, ""),
        };

        match head {
            "/new" => Command::New,
            "/draft" => Command::Draft,
            "/sessions" => Command::Sessions,
            "/switch" if !arg.is_empty() => Command::Switch(arg),
            "/prompts" => Command::Prompts,
            "/prompt" if !arg.is_empty() => Command::Prompt(arg),
            "/token" => Command::Token(Some(arg).filter(|t| !t.is_empty())),
            "/help" => Command::Help,
            "/quit" | "/exit" => Command::Quit,
            _ => Command::Send(line),
        }
    }
}

/// Tracks how much of the streaming reply is already on screen.
#[derive(Default)]
struct Printer {
    request_id: Option<String>,
    printed: usize,
}

impl Printer {
    fn start(&mut self, request_id: String) {
        self.request_id = Some(request_id);
        self.printed = 0;
        print!("assistant> ");
        let _ = std::io::stdout().flush();
    }

    fn show(&mut self, app: &ChatApp, msg: &AppMessage) {
        let (request_id, finished) = match msg {
            AppMessage::StreamUpdate { request_id, .. } => (request_id, false),
            AppMessage::StreamFinished { request_id, .. } => (request_id, true),
            AppMessage::StreamFailed { .. } => return,
            AppMessage::HistoryLoaded { .. } => {
                print_messages(app);
                return;
            }
            AppMessage::HistoryFailed { .. } => {
                print_error(app);
                return;
            }
        };
        if self.request_id.as_deref() != Some(request_id.as_str()) {
            return;
        }

        let id = assistant_message_id(request_id);
        if let Some(message) = app.messages.iter().find(|m| m.id == id) {
            if message.status == MessageStatus::Failed {
                if finished {
                    println!("[error] {}", message.content);
                }
            } else if let Some(fresh) = message.content.get(self.printed..) {
                print!("{}", fresh);
                self.printed = message.content.len();
            }
        }
        let _ = std::io::stdout().flush();

        if finished {
            println!();
            self.request_id = None;
        }
    }
}

fn print_messages(app: &ChatApp) {
    for message in &app.messages {
        let who = match message.role {
            MessageRole::User => "you",
            MessageRole::Assistant => "assistant",
            MessageRole::System => "system",
        };
        println!("{}> {}", who, message.content);
    }
}

fn print_sessions(app: &ChatApp) {
    if app.sessions.is_empty() {
        println!("No sessions yet.");
    }
    for session in &app.sessions {
        let marker = if app.active_session.as_resolved() == Some(session.id.as_str()) {
            "*"
        } else {
            " "
        };
        println!("{} {:>6}  {}", marker, session.id, session.name);
    }
}

fn print_prompts(app: &ChatApp) {
    for group in &app.prompt_groups {
        println!("{} - {}", group.title, group.description);
        for prompt in &group.prompts {
            println!("  {}  {}", prompt.key, prompt.text);
        }
    }
}

fn print_error(app: &ChatApp) {
    if let Some(error) = &app.last_error {
        eprintln!("[error] {}", error);
    }
}

fn print_help() {
    println!("/new             start a new conversation");
    println!("/draft           clear the conversation; the next message creates one");
    println!("/sessions        list sessions");
    println!("/switch <id>     open a session");
    println!("/prompts         list suggested prompts");
    println!("/prompt <key>    send a suggested prompt");
    println!("/token [value]   set or clear the access token");
    println!("/quit            exit");
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("chatline=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing();

    let config = ClientConfig::from_env()?;
    let mut app = startup::prepare(config).await?;

    if app.load_sessions().await.is_err() {
        print_error(&app);
    }
    println!("Connected as {}. Type /help for commands.", app.identity.user_id);

    let Some(mut message_rx) = app.message_rx.take() else {
        return Ok(());
    };
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut printer = Printer::default();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match Command::parse(&line) {
                    Command::Quit => break,
                    Command::Help => print_help(),
                    Command::New => match app.new_conversation().await {
                        Ok(session) => println!("Started session {}", session.id),
                        Err(_) => print_error(&app),
                    },
                    Command::Draft => {
                        app.start_draft();
                        println!("New conversation; your next message starts it.");
                    }
                    Command::Sessions => {
                        if app.load_sessions().await.is_err() {
                            print_error(&app);
                        }
                        print_sessions(&app);
                    }
                    Command::Switch(id) => {
                        if !app.switch_session(id) {
                            println!("Already in session {}", id);
                        }
                    }
                    Command::Prompts => print_prompts(&app),
                    Command::Prompt(key) => match app.select_prompt(key).await {
                        Ok(Some(request_id)) => printer.start(request_id),
                        Ok(None) => println!("Unknown prompt {}", key),
                        Err(_) => print_error(&app),
                    },
                    Command::Token(token) => {
                        if let Err(err) = app.set_access_token(token.map(str::to_string)).await {
                            eprintln!("[error] {}", err);
                        }
                    }
                    Command::Send(text) => match app.submit(text).await {
                        Ok(Some(request_id)) => printer.start(request_id),
                        Ok(None) => {}
                        Err(_) => print_error(&app),
                    },
                }
            }
            Some(msg) = message_rx.recv() => {
                let shown = msg.clone();
                app.handle_message(msg);
                printer.show(&app, &shown);
            }
        }
    }

    if app.state() == ConversationState::RequestInFlight {
        tracing::info!(streams = app.streams_in_flight(), "Exiting with streams in flight");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("/new"), Command::New);
        assert_eq!(Command::parse("  /switch 42 "), Command::Switch("42"));
        assert_eq!(Command::parse("/prompt 1-2"), Command::Prompt("1-2"));
        assert_eq!(Command::parse("/token abc"), Command::Token(Some("abc")));
        assert_eq!(Command::parse("/token"), Command::Token(None));
        assert_eq!(Command::parse("/exit"), Command::Quit);
    }

    #[test]
    fn test_plain_text_is_sent() {
        assert_eq!(Command::parse("hello there"), Command::Send("hello there"));
        // A command missing its argument goes out as text
        assert_eq!(Command::parse("/switch"), Command::Send("/switch"));
    }
}
