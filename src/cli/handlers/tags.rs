//! Tag command handlers (tag, untag, tags, by-tag).

use anyhow::{Context, Result};
use std::io::Write;

use super::{AppContext, NotFound, write_json, write_todos};
use crate::cli::output::{OutputFormat, todo_line};
use crate::cli::{ByTagArgs, ShowArgs, TagArgs};

pub fn handle_tag(args: &TagArgs, ctx: &AppContext, out: &mut dyn Write) -> Result<()> {
    let user = ctx.require_user()?;
    let todo = ctx
        .service()
        .acting_as(&user)
        .add_tag(&args.id, &args.tag)
        .with_context(|| format!("failed to tag todo {}", args.id))?
        .ok_or_else(|| NotFound {
            id: args.id.clone(),
        })?;

    match args.output.format {
        OutputFormat::Human => writeln!(out, "{}", todo_line(&todo))?,
        OutputFormat::Json => write_json(out, &todo)?,
    }
    Ok(())
}

pub fn handle_untag(args: &TagArgs, ctx: &AppContext, out: &mut dyn Write) -> Result<()> {
    let user = ctx.require_user()?;
    let todo = ctx
        .service()
        .acting_as(&user)
        .remove_tag(&args.id, &args.tag)
        .with_context(|| format!("failed to untag todo {}", args.id))?
        .ok_or_else(|| NotFound {
            id: args.id.clone(),
        })?;

    match args.output.format {
        OutputFormat::Human => writeln!(out, "{}", todo_line(&todo))?,
        OutputFormat::Json => write_json(out, &todo)?,
    }
    Ok(())
}

/// Lists tags of a todo. An unknown id prints an empty list, not an error.
pub fn handle_tags(args: &ShowArgs, ctx: &AppContext, out: &mut dyn Write) -> Result<()> {
    let user = ctx.require_user()?;
    let tags = ctx
        .service()
        .acting_as(&user)
        .tags_of(&args.id)
        .with_context(|| format!("failed to read tags of {}", args.id))?;

    match args.output.format {
        OutputFormat::Human => {
            if tags.is_empty() {
                writeln!(out, "No tags found.")?;
            }
            for tag in &tags {
                writeln!(out, "{}", tag)?;
            }
        }
        OutputFormat::Json => write_json(out, &tags)?,
    }
    Ok(())
}

pub fn handle_by_tag(args: &ByTagArgs, ctx: &AppContext, out: &mut dyn Write) -> Result<()> {
    let user = ctx.require_user()?;
    let todos = ctx
        .service()
        .acting_as(&user)
        .list_by_tag(&args.tag, args.limit)
        .with_context(|| format!("failed to list todos tagged {}", args.tag))?;

    match args.output.format {
        OutputFormat::Human => write_todos(out, &todos),
        OutputFormat::Json => write_json(out, &todos),
    }
}
