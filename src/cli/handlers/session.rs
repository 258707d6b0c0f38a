//! Session and health command handlers.

use anyhow::{Context, Result};
use std::io::Write;

use super::{AppContext, write_json};
use crate::cli::output::{HealthListing, OutputFormat, UserListing};
use crate::cli::{FormatArgs, LoginArgs};

pub fn handle_health(args: &FormatArgs, ctx: &AppContext, out: &mut dyn Write) -> Result<()> {
    let result = ctx.service().health();
    match args.format {
        OutputFormat::Human => {
            let status = if result.is_ok() { "ok" } else { "unavailable" };
            writeln!(out, "{}", status)?
        }
        OutputFormat::Json => write_json(out, &HealthListing { ok: result.is_ok() })?,
    }
    result.context("store did not answer")
}

pub fn handle_login(args: &LoginArgs, ctx: &AppContext, out: &mut dyn Write) -> Result<()> {
    let sessions = ctx.sessions();
    let file = ctx.session_file();

    // Replace rather than stack sessions.
    if let Some(previous) = file.load()? {
        sessions.logout(&previous)?;
    }

    let (id, user) = sessions.login(&args.name)?;
    file.save(&id)
        .with_context(|| format!("failed to save session to {}", file.path().display()))?;

    match args.output.format {
        OutputFormat::Human => writeln!(out, "Logged in as {}", user)?,
        OutputFormat::Json => write_json(
            out,
            &UserListing {
                name: user.to_string(),
            },
        )?,
    }
    Ok(())
}

pub fn handle_whoami(args: &FormatArgs, ctx: &AppContext, out: &mut dyn Write) -> Result<()> {
    let user = ctx.current_user()?;
    match args.format {
        OutputFormat::Human => match &user {
            Some(user) => writeln!(out, "{}", user)?,
            None => writeln!(out, "Not logged in.")?,
        },
        OutputFormat::Json => write_json(
            out,
            &UserListing {
                name: user.map(|u| u.to_string()).unwrap_or_default(),
            },
        )?,
    }
    Ok(())
}

pub fn handle_logout(ctx: &AppContext, out: &mut dyn Write) -> Result<()> {
    let file = ctx.session_file();
    let Some(id) = file.load()? else {
        writeln!(out, "Not logged in.")?;
        return Ok(());
    };
    ctx.sessions().logout(&id)?;
    file.clear()?;
    writeln!(out, "Logged out.")?;
    Ok(())
}
