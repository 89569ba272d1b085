use std::io::Write;

use anyhow::Context;

use crate::cli::root_commands::FeedArgs;
use crate::commands::parse_key;
use crate::context::AppContext;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Feed {
    Blockers,
    Reviews,
}

/// Handle `wkcal blockers` and `wkcal reviews`.
pub async fn handle(feed: Feed, args: &FeedArgs, ctx: &AppContext) -> anyhow::Result<()> {
    let service = ctx.service(parse_key(&args.key)?);
    let body = match feed {
        Feed::Blockers => service.blocker_calendar().await,
        Feed::Reviews => service.review_calendar().await,
    }
    .context("failed to build calendar")?;

    match &args.output {
        Some(path) => {
            std::fs::write(path, &body)
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), bytes = body.len(), "wrote calendar");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&body).context("failed to write calendar")?;
            stdout.flush()?;
        }
    }
    Ok(())
}
