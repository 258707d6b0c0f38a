//! todos - session-authenticated todo list with a tag index over a key-value store

pub mod cli;
pub mod domain;
pub mod infra;
pub mod session;
pub mod store;
pub mod todos;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use std::io::Write;

use cli::{
    Cli, Command,
    config::{Config, Overrides},
    handlers::{
        AppContext, handle_by_tag, handle_create, handle_delete, handle_health, handle_list,
        handle_login, handle_logout, handle_show, handle_tag, handle_tags, handle_untag,
        handle_update, handle_whoami,
    },
};
use infra::telemetry;

/// Main entry point for the CLI application.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;
    let settings = config.resolve(&Overrides {
        data_dir: cli.data_dir.clone(),
        store: cli.store.clone(),
        namespace: cli.namespace.clone(),
    });
    telemetry::init(&telemetry::default_directive(cli.verbose, &settings.log))?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    if let Command::Completions(args) = &cli.command {
        clap_complete::generate(args.shell, &mut Cli::command(), "todos", &mut out);
        return Ok(());
    }

    tracing::debug!(store = %settings.store_path.display(), namespace = %settings.namespace, "opening store");
    let ctx = AppContext::open(settings)?;
    dispatch(&cli.command, &ctx, &mut out)?;
    out.flush()?;
    Ok(())
}

fn dispatch(command: &Command, ctx: &AppContext, out: &mut dyn Write) -> Result<()> {
    match command {
        Command::Health(args) => handle_health(args, ctx, out),
        Command::Login(args) => handle_login(args, ctx, out),
        Command::Whoami(args) => handle_whoami(args, ctx, out),
        Command::Logout => handle_logout(ctx, out),
        Command::Create(args) => handle_create(args, ctx, out),
        Command::Show(args) => handle_show(args, ctx, out),
        Command::Update(args) => handle_update(args, ctx, out),
        Command::Delete(args) => handle_delete(args, ctx, out),
        Command::List(args) => handle_list(args, ctx, out),
        Command::Tag(args) => handle_tag(args, ctx, out),
        Command::Untag(args) => handle_untag(args, ctx, out),
        Command::Tags(args) => handle_tags(args, ctx, out),
        Command::ByTag(args) => handle_by_tag(args, ctx, out),
        Command::Completions(_) => Ok(()),
    }
}
