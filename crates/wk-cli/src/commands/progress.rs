use anyhow::Context;

use crate::cli::root_commands::ProgressArgs;
use crate::commands::parse_key;
use crate::context::AppContext;
use crate::output;

/// Handle `wkcal progress`.
pub async fn handle(args: &ProgressArgs, ctx: &AppContext) -> anyhow::Result<()> {
    let service = ctx.service(parse_key(&args.key)?);
    let progress = service
        .level_progress()
        .await
        .context("failed to load level progress")?;
    println!("{}", output::render_progress(&progress, args.format)?);
    Ok(())
}
