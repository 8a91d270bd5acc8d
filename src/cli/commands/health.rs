//! health command - Check whether the backend answers as healthy

use anyhow::{bail, Result};

use super::Context;
use crate::ui::output;

/// Check backend health.
///
/// Exits with an error when the backend is unreachable or reports any
/// status other than "healthy".
pub fn health(ctx: &Context) -> Result<()> {
    let rt = tokio::runtime::Runtime::new()?;
    let store = ctx.store()?;
    let healthy = rt.block_on(store.check_health());

    if ctx.json {
        println!("{}", serde_json::json!({ "healthy": healthy }));
    } else if healthy {
        output::print(format!("{} is healthy", ctx.api_base()), ctx.verbosity);
    }

    if !healthy {
        bail!("backend at {} is not healthy", ctx.api_base());
    }
    Ok(())
}
