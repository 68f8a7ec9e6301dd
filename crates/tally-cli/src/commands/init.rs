use std::path::PathBuf;

use tally_core::Ledger;
use tracing::info;

use crate::app::AppContext;
use crate::cli::InitArgs;
use crate::config::{default_ledger_path, write_config, TallyConfig};
use crate::ui::{hint, print, receipt};

pub fn handle_init(ctx: &AppContext, args: &InitArgs) -> anyhow::Result<()> {
    let target = match args.path.as_deref() {
        Some(path) => PathBuf::from(path),
        None => match ctx.configured_ledger_path()? {
            Some(path) => path,
            None => default_ledger_path()?,
        },
    };

    if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| {
            anyhow::anyhow!(
                "Failed to create ledger directory {}: {}",
                parent.display(),
                e
            )
        })?;
    }

    let existed = target.exists();
    let ledger = Ledger::open(&target)?;
    let version = ledger.schema_version()?;
    info!(path = %target.display(), version, existed, "ledger initialized");

    let config_path = ctx.config_path()?;
    let config = match ctx.config()? {
        Some(mut config) => {
            config.ledger.path = target.to_string_lossy().to_string();
            config
        }
        None => TallyConfig::new(&target, None),
    };
    write_config(&config_path, &config)?;

    if ctx.quiet() {
        return Ok(());
    }
    let ui = ctx.ui_context(false, None);
    let title = if existed {
        "Opened existing ledger"
    } else {
        "Initialized new ledger"
    };
    print(
        &ui,
        &receipt(
            &ui,
            title,
            &[
                ("Path", target.display().to_string()),
                ("Schema", format!("v{}", version)),
                ("Config", config_path.display().to_string()),
            ],
        ),
    );
    if config.user.default.is_none() {
        print(
            &ui,
            &hint(&ui, "Run `tally signup --username <name> --email <email>` next."),
        );
    }
    Ok(())
}
