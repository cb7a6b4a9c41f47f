use crate::error::ChefError;
use crate::forms::{ ChatInput, RecipeForm, RecipeSuggestion, SubstitutionForm };
use crate::models::chat::{ format_transcript, Conversation, LocalMessage };
use crate::models::console::ConsoleCommand;
use crate::models::substitution::Substitution;
use crate::session::ChefSession;
use log::{ info, warn, error };
use std::error::Error;
use tokio::io::{ AsyncBufRead, AsyncBufReadExt, AsyncReadExt, AsyncWrite, AsyncWriteExt };

const MAX_LINE_LEN: usize = 8 * 1024;

const HELP: &str = "\
Type a cooking question to ask the chef, or:
  /new [title]                                  start a new chat
  /list                                         list saved chats
  /open <id>                                    reopen a chat
  /history                                      show this chat
  /sub ingredient | restrictions | available    find a substitute
  /recipes ingredients | cuisine | time | servings | restrictions
  /quit
";

pub fn render_messages(messages: &[LocalMessage]) -> String {
    if messages.is_empty() {
        return "Ask me anything about cooking!\n\
                I can help with recipes, techniques, and ingredient substitutions.\n".to_string();
    }
    format_transcript(messages)
}

pub fn render_conversations(conversations: &[Conversation], current: Option<i64>) -> String {
    if conversations.is_empty() {
        return "No saved chats yet.\n".to_string();
    }
    let mut out = String::new();
    for conversation in conversations {
        let marker = if Some(conversation.id) == current { "*" } else { " " };
        out.push_str(
            &format!(
                "{} {:>5}  {}  (updated {})\n",
                marker,
                conversation.id,
                conversation.title,
                conversation.updated_at.format("%Y-%m-%d %H:%M")
            )
        );
    }
    out
}

pub fn render_substitution(substitution: &Substitution) -> String {
    format!(
        "Substitution: {}\nRatio: {}\nNotes: {}\n",
        substitution.substitution,
        substitution.ratio,
        substitution.notes
    )
}

pub fn render_suggestions(suggestions: &[RecipeSuggestion]) -> String {
    let mut out = String::from("Suggested Recipes:\n");
    for suggestion in suggestions {
        out.push_str(
            &format!("  - {} [{} | serves {}]\n", suggestion.title, suggestion.time, suggestion.servings)
        );
    }
    out
}

fn field(fields: &[String], index: usize) -> String {
    fields.get(index).cloned().unwrap_or_default()
}

async fn chat(session: &ChefSession, content: String) -> Result<String, ChefError> {
    let mut input = ChatInput::new();
    input.text = content;
    let reply = input.submit(session).await?;
    Ok(match reply {
        Some(message) => format!("Chef: {}\n", message.content),
        None => "(still waiting on the last answer)\n".to_string(),
    })
}

async fn substitute(session: &ChefSession, fields: &[String]) -> Result<String, ChefError> {
    let mut form = SubstitutionForm::new();
    form.ingredient = field(fields, 0);
    form.dietary_restrictions = field(fields, 1);
    form.available_ingredients = field(fields, 2);
    let found = form.submit(session).await?;
    Ok(render_substitution(found))
}

fn recipes(fields: &[String]) -> Result<String, ChefError> {
    let mut form = RecipeForm::new();
    form.ingredients = field(fields, 0);
    form.cuisine = field(fields, 1);
    form.cooking_time = field(fields, 2);
    form.servings = field(fields, 3);
    form.dietary_restrictions = field(fields, 4);
    let suggestions = form.submit()?;
    Ok(render_suggestions(suggestions))
}

/// Runs one command against the session and returns what to show the user.
/// Failures are rendered into the output rather than ending the loop.
pub async fn handle_command(session: &ChefSession, command: ConsoleCommand) -> String {
    let outcome = match command {
        ConsoleCommand::Chat { content } => chat(session, content).await,
        ConsoleCommand::NewConversation { title } =>
            session
                .start_new_conversation(title.as_deref()).await
                .map(|c| format!("Started chat #{}: {}\n", c.id, c.title)),
        ConsoleCommand::ListConversations => {
            let current = session.current_conversation().await.map(|c| c.id);
            session
                .load_conversations().await
                .map(|list| render_conversations(&list, current))
        }
        ConsoleCommand::OpenConversation { id } =>
            match session.load_conversation(id).await {
                Ok(conversation) => {
                    let messages = session.messages().await;
                    Ok(format!("Opened chat #{}: {}\n{}", conversation.id, conversation.title, render_messages(&messages)))
                }
                Err(e) => Err(e),
            }
        ConsoleCommand::History => Ok(render_messages(&session.messages().await)),
        ConsoleCommand::Substitute { fields } => substitute(session, &fields).await,
        ConsoleCommand::Recipes { fields } => recipes(&fields),
        ConsoleCommand::Help => Ok(HELP.to_string()),
        ConsoleCommand::Quit => Ok(String::new()),
    };

    match outcome {
        Ok(text) => text,
        Err(e) => format!("Error: {}\n", e),
    }
}

/// Consumes the remainder of an oversized line, a bounded chunk at a time.
/// Returns how many further bytes were dropped.
async fn skip_rest_of_line<R: AsyncBufRead + Unpin>(reader: &mut R) -> std::io::Result<usize> {
    let mut chunk = Vec::new();
    let mut dropped = 0;
    loop {
        chunk.clear();
        let n = (&mut *reader).take(MAX_LINE_LEN as u64).read_until(b'\n', &mut chunk).await?;
        dropped += n;
        if n == 0 || chunk.ends_with(b"\n") {
            return Ok(dropped);
        }
    }
}

pub async fn run_chat<R, W>(
    session: &ChefSession,
    mut reader: R,
    mut writer: W
) -> Result<(), Box<dyn Error + Send + Sync>>
    where R: AsyncBufRead + Unpin, W: AsyncWrite + Unpin
{
    if let Err(e) = session.load_conversations().await {
        warn!("Could not load saved chats: {}", e);
    }

    writer.write_all(b"AI Chef Assistant (/help for commands)\n> ").await?;
    writer.flush().await?;

    let mut buf = Vec::new();
    loop {
        buf.clear();
        let n = (&mut reader).take(MAX_LINE_LEN as u64 + 1).read_until(b'\n', &mut buf).await?;
        if n == 0 {
            break;
        }
        if n > MAX_LINE_LEN && !buf.ends_with(b"\n") {
            let dropped = skip_rest_of_line(&mut reader).await? + n;
            warn!("Input line exceeds size limit ({} > {})", dropped, MAX_LINE_LEN);
            writer.write_all(b"Error: message too large\n> ").await?;
            writer.flush().await?;
            continue;
        }
        let line = String::from_utf8_lossy(&buf);
        let line = line.trim_end_matches(['\r', '\n']);
        if line.trim().is_empty() {
            writer.write_all(b"> ").await?;
            writer.flush().await?;
            continue;
        }

        let output = match line.parse::<ConsoleCommand>() {
            Ok(ConsoleCommand::Quit) => {
                info!("Quit requested");
                break;
            }
            Ok(command) => handle_command(session, command).await,
            Err(e) => {
                error!("Failed to parse input: {}", e);
                format!("Error: {}\n", e)
            }
        };

        writer.write_all(output.as_bytes()).await?;
        writer.write_all(b"> ").await?;
        writer.flush().await?;
    }

    if let Some(conversation) = session.current_conversation().await {
        info!("Chat session closed (conversation {})", conversation.id);
    }
    Ok(())
}
