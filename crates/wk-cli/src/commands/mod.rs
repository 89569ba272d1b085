pub mod feed;
pub mod progress;
pub mod serve;

use anyhow::Context;
use wk_core::ApiKey;

use crate::cli::Commands;
use crate::cli::root_commands::KeyArgs;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(command: Commands, ctx: AppContext) -> anyhow::Result<()> {
    match command {
        Commands::Blockers(args) => feed::handle(feed::Feed::Blockers, &args, &ctx).await,
        Commands::Reviews(args) => feed::handle(feed::Feed::Reviews, &args, &ctx).await,
        Commands::Progress(args) => progress::handle(&args, &ctx).await,
        Commands::Serve(args) => serve::handle(&args, ctx).await,
    }
}

pub(crate) fn parse_key(args: &KeyArgs) -> anyhow::Result<ApiKey> {
    ApiKey::parse(&args.api_key).context("invalid --api-key")
}
