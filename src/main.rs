//! # docbind Main Entry Point
//!
//! Opens one document through the file backend, binds it to a text
//! editor widget, applies the requested edits, and prints the result.

use std::rc::Rc;

use anyhow::{Context as _, Result};
use tokio::task::LocalSet;
use tracing_subscriber::{filter::LevelFilter, fmt::time::ChronoLocal, EnvFilter};

use docbind::cmd_args::CommandLineArgs;
use docbind::config::{get_config_path, Settings, LOG_LEVEL_ENV_VAR};
use docbind::document::{
    CodeEditor, Context, DocumentContext, DocumentWidget, EditorServices, FileContentsManager,
    FileEditorFactory, TextModelFactory, UiEvent,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    init_tracing_subscriber();

    let args = CommandLineArgs::parse();
    let config_path = args
        .config()
        .map(str::to_string)
        .unwrap_or_else(get_config_path);
    let settings = Settings::load(&config_path)
        .with_context(|| format!("failed to load settings from {config_path}"))?;

    // Document state is Rc-based, so everything runs on one thread
    LocalSet::new().run_until(run(args, settings)).await
}

async fn run(args: CommandLineArgs, settings: Settings) -> Result<()> {
    let services = EditorServices::new().with_editor_config(settings.editor.clone());
    let factory = FileEditorFactory::new(settings.factory_options(), services)?;

    let context = Rc::new(Context::new(
        FileContentsManager::new(args.root()),
        &TextModelFactory::new(),
        args.path(),
        None,
    ));
    let widget = factory.create_new(Rc::clone(&context) as Rc<dyn DocumentContext>);
    let binding = tokio::task::spawn_local(widget.bind_when_ready());

    context
        .initialize(args.is_new())
        .await
        .with_context(|| format!("failed to open {}", args.path()))?;
    binding.await?;

    widget.on_after_attach();
    widget.handle_event(&UiEvent::ActivateRequest);

    if let Some(text) = args.append() {
        let editor = widget.content().editor();
        let current = editor.model().text();
        editor.replace_all(&format!("{current}{text}"));
    }
    if args.save() {
        context.save().await?;
    }
    if let Some(new_path) = args.rename() {
        context.rename(new_path).await?;
    }

    print_status(&widget, &**widget.content().editor());

    widget.on_before_detach();
    context.dispose();
    factory.dispose();
    Ok(())
}

fn print_status(widget: &DocumentWidget, editor: &dyn CodeEditor) {
    let marker = if widget.is_marked_dirty() { " *" } else { "" };
    println!("{}{}", widget.title().label(), marker);
    println!("path: {}", widget.context().path());
    println!("mime: {}", editor.model().mime_type());
    println!("---");
    print!("{}", editor.model().text());
}

fn init_tracing_subscriber() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::ERROR.into())
                .with_env_var(LOG_LEVEL_ENV_VAR)
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .with_timer(ChronoLocal::rfc_3339())
        .init();
}
