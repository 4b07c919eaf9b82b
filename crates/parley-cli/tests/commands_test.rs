use mockito::{Matcher, Server};
use parley_cli::cli::{Command, SettingsArgs, ThemeArg};
use parley_cli::commands;
use parley_cli::config::Config;
use parley_cli::context::AppContext;
use parley_persist::SnapshotStore;
use tempfile::TempDir;

fn context(base_url: &str) -> AppContext {
    let mut config = Config::default();
    config.remote.base_url = base_url.to_string();
    let snapshots = SnapshotStore::builder().in_memory().build().unwrap();
    AppContext::with_snapshots(config, snapshots).unwrap()
}

async fn run(ctx: &AppContext, command: Command) -> anyhow::Result<String> {
    let mut out = Vec::new();
    commands::run(ctx, command, &mut out).await?;
    Ok(String::from_utf8(out).unwrap())
}

#[tokio::test]
async fn test_new_use_delete() {
    let ctx = context("http://127.0.0.1:9");

    let first = run(&ctx, Command::New).await.unwrap().trim().to_string();
    ctx.store
        .create_conversation(parley_types::Conversation::new("second"));

    run(&ctx, Command::Use { id: first.clone() }).await.unwrap();
    assert_eq!(ctx.store.current_conversation_id(), Some(first.clone()));

    let listing = run(&ctx, Command::List).await.unwrap();
    assert!(listing.contains(&format!("* {}", first)));
    assert!(listing.contains("  second"));

    run(&ctx, Command::Delete { id: first }).await.unwrap();
    assert_eq!(ctx.store.current_conversation_id().as_deref(), Some("second"));

    assert!(run(&ctx, Command::Use { id: "ghost".into() }).await.is_err());
    assert!(run(&ctx, Command::Delete { id: "ghost".into() }).await.is_err());
}

#[tokio::test]
async fn test_sync_and_show_hydrates() {
    let mut server = Server::new_async().await;
    let _list = server
        .mock("GET", "/api/conversations")
        .match_query(Matcher::UrlEncoded("limit".into(), "100".into()))
        .with_body(r#"{"success": true, "conversations": [{"id": "r1", "title": "From server"}]}"#)
        .create_async()
        .await;
    let _detail = server
        .mock("GET", "/api/conversations/r1")
        .with_body(r#"{"success": true, "messages": [{"role": "user", "content": "hello server"}]}"#)
        .create_async()
        .await;
    let ctx = context(&server.url());

    let synced = run(&ctx, Command::Sync).await.unwrap();
    assert!(synced.contains("1 conversations"));

    let shown = run(&ctx, Command::Show { id: Some("r1".into()) }).await.unwrap();
    assert!(shown.starts_with("# From server"));
    assert!(shown.contains("[user] hello server"));
}

#[tokio::test]
async fn test_sync_failure_is_reported() {
    let mut server = Server::new_async().await;
    let _list = server
        .mock("GET", "/api/conversations")
        .match_query(Matcher::Any)
        .with_status(500)
        .create_async()
        .await;
    let ctx = context(&server.url());
    ctx.store.new_conversation();
    let before = ctx.store.snapshot();

    assert!(run(&ctx, Command::Sync).await.is_err());
    assert_eq!(ctx.store.snapshot(), before);
}

#[tokio::test]
async fn test_send_creates_conversation_when_none_selected() {
    let mut server = Server::new_async().await;
    let _chat = server
        .mock("POST", "/api/chat/assistant")
        .with_body(r#"{"ok": true, "answer": "Hi there", "sources": [{"title": "docs"}]}"#)
        .create_async()
        .await;
    let ctx = context(&server.url());

    let output = run(
        &ctx,
        Command::Send {
            conversation: None,
            text: vec!["hello".into(), "world".into()],
        },
    )
    .await
    .unwrap();

    assert!(output.starts_with("Hi there"));
    assert!(output.contains("source:"));
    let current = ctx.store.current_conversation().unwrap();
    assert_eq!(current.title, "hello world");
    assert_eq!(current.messages.len(), 2);
}

#[tokio::test]
async fn test_send_failure_keeps_user_message() {
    let mut server = Server::new_async().await;
    let _chat = server
        .mock("POST", "/api/chat/assistant")
        .with_body(r#"{"ok": false}"#)
        .create_async()
        .await;
    let ctx = context(&server.url());
    let id = ctx.store.new_conversation().id;

    let result = run(
        &ctx,
        Command::Send {
            conversation: Some(id.clone()),
            text: vec!["question".into()],
        },
    )
    .await;

    assert!(result.is_err());
    assert_eq!(ctx.store.conversation(&id).unwrap().messages.len(), 1);
}

#[tokio::test]
async fn test_export_then_import() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("backup.json");

    let source = context("http://127.0.0.1:9");
    source.store.new_conversation();
    run(&source, Command::Export { path: Some(path.clone()) }).await.unwrap();

    let target = context("http://127.0.0.1:9");
    let output = run(&target, Command::Import { path: path.clone() }).await.unwrap();
    assert!(output.contains("Imported 1 conversations"));
    assert_eq!(target.store.conversations(), source.store.conversations());

    std::fs::write(&path, "garbage").unwrap();
    assert!(run(&target, Command::Import { path }).await.is_err());
    assert_eq!(target.store.conversations().len(), 1);
}

#[tokio::test]
async fn test_settings_update_and_show() {
    let ctx = context("http://127.0.0.1:9");

    let args = SettingsArgs {
        theme: Some(ThemeArg::Light),
        max_tokens: Some(900),
        ..Default::default()
    };
    let output = run(&ctx, Command::Settings(args)).await.unwrap();

    let printed: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(printed["theme"], "light");
    assert_eq!(printed["maxTokens"], 900);
    assert_eq!(ctx.store.settings().max_tokens, 900);
}
