use tracing::{debug, warn};

use crate::app::AppContext;
use crate::cli::{LoginArgs, SignupArgs};
use crate::errors::CliError;
use crate::helpers::{prompt_password, prompt_signup_password};
use crate::ui::{badge, print, receipt, Badge};

pub fn handle_signup(ctx: &AppContext, args: &SignupArgs) -> anyhow::Result<()> {
    let ledger = ctx.open_ledger()?;

    let username = args.username.trim();
    let email = args.email.trim();
    if email.is_empty() {
        return Err(CliError::invalid_input("--email cannot be empty").into());
    }
    let password = prompt_signup_password(args.password.as_deref())?;
    if password.is_empty() {
        return Err(CliError::invalid_input("Password cannot be empty").into());
    }

    let shared_email = ledger.find_user_by_email(email)?.is_some();
    if shared_email {
        warn!(email, "another user already signed up with this email");
    }
    let id = ledger.create_user(username, email, &password)?;

    // The first user becomes the default so later commands need no --user.
    let became_default = match ctx.config()? {
        Some(config) if config.user.default.is_some() => false,
        _ => {
            let config_path = ctx.remember_user(ctx.ledger_path()?, username)?;
            debug!(path = %config_path.display(), username, "default user recorded");
            true
        }
    };

    if !ctx.quiet() {
        let ui = ctx.ui_context(false, None);
        let default = if became_default { "yes" } else { "no" };
        print(
            &ui,
            &receipt(
                &ui,
                "Created user",
                &[
                    ("ID", id.to_string()),
                    ("Username", username.to_string()),
                    ("Default", default.to_string()),
                ],
            ),
        );
        if shared_email {
            print(
                &ui,
                &badge(
                    &ui,
                    Badge::Warn,
                    "Another user has the same email; `tally login` picks the oldest account",
                ),
            );
        }
    }
    Ok(())
}

pub fn handle_login(ctx: &AppContext, args: &LoginArgs) -> anyhow::Result<()> {
    let ledger = ctx.open_ledger()?;
    let password = prompt_password(args.password.as_deref())?;
    if args.email.trim().is_empty() || password.is_empty() {
        return Err(CliError::auth_failed("Invalid email or password").into());
    }

    let user = ledger
        .find_user_by_email(args.email.trim())?
        .filter(|user| user.password == password)
        .ok_or_else(|| CliError::auth_failed("Invalid email or password"))?;

    ctx.remember_user(ctx.ledger_path()?, &user.username)?;

    if !ctx.quiet() {
        let ui = ctx.ui_context(false, None);
        print(
            &ui,
            &receipt(
                &ui,
                "Logged in",
                &[
                    ("ID", user.id.to_string()),
                    ("Username", user.username.clone()),
                ],
            ),
        );
    }
    Ok(())
}
