use tally_core::storage::CURRENT_VERSION;
use tracing::warn;

use crate::app::AppContext;
use crate::ui::{badge, kv, print, Badge};

/// Report the schema version and run the storage integrity check.
pub fn handle_check(ctx: &AppContext) -> anyhow::Result<()> {
    let path = ctx.ledger_path()?;
    let ledger = ctx.open_ledger()?;
    let version = ledger.schema_version()?;

    if let Err(err) = ledger.check_integrity() {
        warn!(path = %path.display(), error = %err, "integrity check failed");
        return Err(err.into());
    }

    if ctx.quiet() {
        return Ok(());
    }
    let ui = ctx.ui_context(false, None);
    print(&ui, &kv(&ui, "Ledger", &path.display().to_string()));
    print(
        &ui,
        &kv(&ui, "Schema", &format!("v{} (current v{})", version, CURRENT_VERSION)),
    );
    print(&ui, &badge(&ui, Badge::Ok, "Integrity check passed"));
    Ok(())
}
