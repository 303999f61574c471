//! Terminal front end: chat threads persisted under the configured data dir.

use anyhow::{Context, bail};
use reedline::{DefaultPrompt, DefaultPromptSegment, Reedline, Signal};

use buffet::chat::{ChatStore, FileStore, SubmitOutcome, render_thread, render_turn, submit_turn};
use buffet::client::BuffetClient;
use buffet::config::Config;

use crate::Selection;

async fn open_store(config: &Config) -> ChatStore {
    ChatStore::load(Box::new(FileStore::new(&config.client.data_dir))).await
}

fn selected_models(config: &Config, selection: &Selection) -> Vec<String> {
    if selection.models.is_empty() {
        config.default_selection()
    } else {
        selection.models.clone()
    }
}

fn client(config: &Config, selection: &Selection) -> BuffetClient {
    let url = selection
        .server
        .clone()
        .unwrap_or_else(|| config.client.server_url.clone());
    BuffetClient::new(url)
}

/// Submit `prompt` and print the resulting turn.
async fn send(
    store: &mut ChatStore,
    client: &BuffetClient,
    config: &Config,
    models: &[String],
    prompt: &str,
) -> anyhow::Result<()> {
    match submit_turn(store, client, prompt, models).await {
        SubmitOutcome::Ignored => {
            bail!("nothing to send: the prompt is empty or no models are selected")
        }
        SubmitOutcome::Answered {
            thread_id,
            turn_index,
        } => {
            let turn = store
                .thread(&thread_id)
                .and_then(|t| t.turns.get(turn_index))
                .context("turn disappeared from the store")?;
            print!("{}", render_turn(turn, models, &config.models));
            Ok(())
        }
        SubmitOutcome::Failed { error, .. } => {
            Err(error).context("request failed; the prompt was kept without responses")
        }
    }
}

pub async fn ask(config: &Config, selection: &Selection, prompt: &str) -> anyhow::Result<()> {
    let mut store = open_store(config).await;
    let client = client(config, selection);
    let models = selected_models(config, selection);
    send(&mut store, &client, config, &models, prompt).await
}

pub async fn chat(config: &Config, selection: &Selection) -> anyhow::Result<()> {
    let mut store = open_store(config).await;
    let client = client(config, selection);
    let mut models = selected_models(config, selection);

    println!("Chatting with: {}", models.join(", "));
    println!("Commands: /new, /threads, /open <id>, /models <id,id,...>, /quit");

    let mut line_editor = Reedline::create();
    let prompt = DefaultPrompt::new(
        DefaultPromptSegment::Basic("buffet".to_string()),
        DefaultPromptSegment::Empty,
    );

    loop {
        let line = match line_editor.read_line(&prompt)? {
            Signal::Success(buffer) => buffer,
            _ => break,
        };
        let line = line.trim();

        match line.split_once(' ').unwrap_or((line, "")) {
            ("", _) => continue,
            ("/quit" | "/exit", _) => break,
            ("/new", _) => {
                let id = store.start_new_thread().await;
                println!("Started chat {id}");
            }
            ("/threads", _) => print_threads(&store),
            ("/open", id) => {
                if !store.open_thread(id.trim()).await {
                    println!("No chat with id {}", id.trim());
                }
            }
            ("/models", ids) => {
                let picked: Vec<String> = ids
                    .split(',')
                    .map(str::trim)
                    .filter(|id| !id.is_empty())
                    .map(String::from)
                    .collect();
                if picked.is_empty() {
                    println!("Chatting with: {}", models.join(", "));
                } else {
                    models = picked;
                    println!("Now chatting with: {}", models.join(", "));
                }
            }
            _ => {
                if let Err(e) = send(&mut store, &client, config, &models, line).await {
                    eprintln!("Error: {e:#}");
                }
            }
        }
    }
    Ok(())
}

fn print_threads(store: &ChatStore) {
    let active = store.active_id();
    let mut any = false;
    for thread in store.history() {
        any = true;
        let marker = if Some(thread.id.as_str()) == active {
            "*"
        } else {
            " "
        };
        println!(
            "{marker} {}  {}  ({} turns)",
            thread.id,
            thread.title,
            thread.turns.len()
        );
    }
    if !any {
        println!("No chats yet.");
    }
}

pub async fn threads(config: &Config) -> anyhow::Result<()> {
    print_threads(&open_store(config).await);
    Ok(())
}

pub async fn show(
    config: &Config,
    selection: &Selection,
    id: Option<&str>,
) -> anyhow::Result<()> {
    let store = open_store(config).await;
    let thread = match id {
        Some(id) => store.thread(id),
        None => store.active_thread(),
    };
    let Some(thread) = thread else {
        bail!("no such chat");
    };
    let models = selected_models(config, selection);
    print!("{}", render_thread(thread, &models, &config.models));
    Ok(())
}

pub async fn open(config: &Config, id: &str) -> anyhow::Result<()> {
    let mut store = open_store(config).await;
    if !store.open_thread(id).await {
        bail!("no chat with id {id}");
    }
    println!("Opened chat {id}");
    Ok(())
}

pub async fn new_thread(config: &Config) -> anyhow::Result<()> {
    let mut store = open_store(config).await;
    let id = store.start_new_thread().await;
    println!("Started chat {id}");
    Ok(())
}

pub async fn models(config: &Config) -> anyhow::Result<()> {
    let catalog = client(config, &Selection::default()).models().await?;
    for model in &catalog.models {
        let marker = if catalog.default.contains(&model.id) {
            "*"
        } else {
            " "
        };
        println!("{marker} {}  {}", model.id, model.label);
    }
    Ok(())
}
