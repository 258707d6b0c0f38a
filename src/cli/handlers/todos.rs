//! Todo CRUD command handlers.

use anyhow::{Context, Result};
use std::io::Write;

use super::{AppContext, NotFound, write_json, write_todos};
use crate::cli::output::{DeleteListing, OutputFormat, todo_line};
use crate::cli::{CreateArgs, DeleteArgs, ListArgs, ShowArgs, UpdateArgs};
use crate::domain::Todo;

fn write_todo(format: OutputFormat, out: &mut dyn Write, todo: &Todo) -> Result<()> {
    match format {
        OutputFormat::Human => writeln!(out, "{}", todo_line(todo))?,
        OutputFormat::Json => write_json(out, todo)?,
    }
    Ok(())
}

pub fn handle_create(args: &CreateArgs, ctx: &AppContext, out: &mut dyn Write) -> Result<()> {
    let user = ctx.require_user()?;
    let todo = ctx
        .service()
        .acting_as(&user)
        .create(&args.title, args.done)
        .context("failed to create todo")?;
    write_todo(args.output.format, out, &todo)
}

pub fn handle_show(args: &ShowArgs, ctx: &AppContext, out: &mut dyn Write) -> Result<()> {
    let user = ctx.require_user()?;
    let todo = ctx
        .service()
        .acting_as(&user)
        .get(&args.id)
        .with_context(|| format!("failed to read todo {}", args.id))?
        .ok_or_else(|| NotFound {
            id: args.id.clone(),
        })?;
    write_todo(args.output.format, out, &todo)
}

pub fn handle_update(args: &UpdateArgs, ctx: &AppContext, out: &mut dyn Write) -> Result<()> {
    let user = ctx.require_user()?;
    let todo = ctx
        .service()
        .acting_as(&user)
        .update(&args.id, &args.title, args.done)
        .with_context(|| format!("failed to update todo {}", args.id))?
        .ok_or_else(|| NotFound {
            id: args.id.clone(),
        })?;
    write_todo(args.output.format, out, &todo)
}

pub fn handle_delete(args: &DeleteArgs, ctx: &AppContext, out: &mut dyn Write) -> Result<()> {
    let user = ctx.require_user()?;
    let deleted = ctx
        .service()
        .acting_as(&user)
        .delete(&args.id)
        .with_context(|| format!("failed to delete todo {}", args.id))?;

    match args.output.format {
        OutputFormat::Human if deleted => writeln!(out, "Deleted {}", args.id)?,
        OutputFormat::Human => writeln!(out, "Nothing to delete for {}", args.id)?,
        OutputFormat::Json => write_json(
            out,
            &DeleteListing {
                id: args.id.clone(),
                deleted,
            },
        )?,
    }
    Ok(())
}

pub fn handle_list(args: &ListArgs, ctx: &AppContext, out: &mut dyn Write) -> Result<()> {
    let user = ctx.require_user()?;
    let todos = ctx
        .service()
        .acting_as(&user)
        .list(args.limit)
        .context("failed to list todos")?;

    match args.output.format {
        OutputFormat::Human => write_todos(out, &todos),
        OutputFormat::Json => write_json(out, &todos),
    }
}
