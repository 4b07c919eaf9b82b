use std::io::Write;
use std::path::Path;

use anyhow::{bail, Context, Result};
use parley_types::{Conversation, SettingsPatch};
use tracing::info;

use crate::cli::Command;
use crate::context::AppContext;

/// Execute one command, writing user-facing output to `out`
pub async fn run(ctx: &AppContext, command: Command, out: &mut dyn Write) -> Result<()> {
    match command {
        Command::List => list(ctx, out),
        Command::Sync => sync(ctx, out).await,
        Command::Show { id } => show(ctx, id, out).await,
        Command::New => {
            let conversation = ctx.store.new_conversation();
            writeln!(out, "{}", conversation.id)?;
            Ok(())
        }
        Command::Use { id } => {
            if !ctx.store.read(|s| s.contains(&id)) {
                bail!("Unknown conversation '{}'", id);
            }
            ctx.store.set_current_conversation(id);
            Ok(())
        }
        Command::Send { conversation, text } => send(ctx, conversation, &text.join(" "), out).await,
        Command::Delete { id } => {
            if !ctx.store.delete_conversation(&id) {
                bail!("Unknown conversation '{}'", id);
            }
            Ok(())
        }
        Command::Clear => {
            let count = ctx.store.read(|s| s.conversations.len());
            ctx.store.clear_conversations();
            writeln!(out, "Removed {} conversations", count)?;
            Ok(())
        }
        Command::Export { path } => export(ctx, path.as_deref(), out),
        Command::Import { path } => import(ctx, &path, out),
        Command::Settings(args) => settings(ctx, args.into(), out),
    }
}

fn list(ctx: &AppContext, out: &mut dyn Write) -> Result<()> {
    let current = ctx.store.current_conversation_id();
    let conversations = ctx.store.conversations();
    if conversations.is_empty() {
        writeln!(out, "No conversations")?;
        return Ok(());
    }

    for conversation in &conversations {
        let marker = if current.as_deref() == Some(conversation.id.as_str()) {
            '*'
        } else {
            ' '
        };
        writeln!(out, "{} {}", marker, summary_line(conversation))?;
    }
    Ok(())
}

fn summary_line(conversation: &Conversation) -> String {
    let count = if conversation.is_empty() {
        "not loaded".to_string()
    } else {
        format!("{} messages", conversation.messages.len())
    };
    format!(
        "{}  {}  ({}, updated {})",
        conversation.id,
        conversation.title,
        count,
        conversation.updated_at.format("%Y-%m-%d %H:%M")
    )
}

async fn sync(ctx: &AppContext, out: &mut dyn Write) -> Result<()> {
    if !ctx.sync.sync_list().await {
        bail!("Sync failed, cached conversations left unchanged");
    }
    let count = ctx.store.read(|s| s.conversations.len());
    writeln!(out, "Synced, {} conversations cached", count)?;
    Ok(())
}

async fn show(ctx: &AppContext, id: Option<String>, out: &mut dyn Write) -> Result<()> {
    let Some(id) = id.or_else(|| ctx.store.current_conversation_id()) else {
        bail!("No conversation selected");
    };
    let Some(conversation) = ctx.store.conversation(&id) else {
        bail!("Unknown conversation '{}'", id);
    };

    let conversation = if conversation.is_empty() && ctx.sync.hydrate(&id).await {
        ctx.store.conversation(&id).unwrap_or(conversation)
    } else {
        conversation
    };

    writeln!(out, "# {}", conversation.title)?;
    for message in &conversation.messages {
        writeln!(out)?;
        writeln!(out, "[{}] {}", message.role, message.content)?;
    }
    Ok(())
}

async fn send(
    ctx: &AppContext,
    conversation: Option<String>,
    text: &str,
    out: &mut dyn Write,
) -> Result<()> {
    let id = match conversation {
        Some(id) if ctx.store.read(|s| s.contains(&id)) => id,
        Some(id) => bail!("Unknown conversation '{}'", id),
        None => match ctx.store.current_conversation() {
            Some(current) => current.id,
            None => ctx.store.new_conversation().id,
        },
    };

    let Some(reply) = ctx.chat.send_message(&id, text).await? else {
        bail!("Nothing to send");
    };

    writeln!(out, "{}", reply.content)?;
    for source in reply.attachments.iter().flatten() {
        writeln!(out, "  source: {}", source)?;
    }
    Ok(())
}

fn export(ctx: &AppContext, path: Option<&Path>, out: &mut dyn Write) -> Result<()> {
    let document = ctx.store.export()?;
    match path {
        Some(path) => {
            std::fs::write(path, &document)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!(path = %path.display(), "Exported conversations");
        }
        None => writeln!(out, "{}", document)?,
    }
    Ok(())
}

fn import(ctx: &AppContext, path: &Path, out: &mut dyn Write) -> Result<()> {
    let document = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    if !ctx.store.import(&document) {
        bail!("{} is not a valid export document", path.display());
    }
    let count = ctx.store.read(|s| s.conversations.len());
    writeln!(out, "Imported {} conversations", count)?;
    Ok(())
}

fn settings(ctx: &AppContext, patch: SettingsPatch, out: &mut dyn Write) -> Result<()> {
    ctx.store.update_settings(patch);

    let mut settings = ctx.store.settings();
    settings.auth_token = None;
    writeln!(out, "{}", serde_json::to_string_pretty(&settings)?)?;
    Ok(())
}
