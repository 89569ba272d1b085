use crate::cli::root_commands::ServeArgs;
use crate::context::AppContext;
use crate::server;

/// Handle `wkcal serve`. Flags override the `server` config section.
pub async fn handle(args: &ServeArgs, mut ctx: AppContext) -> anyhow::Result<()> {
    if let Some(host) = &args.host {
        ctx.config.server.host.clone_from(host);
    }
    if let Some(port) = args.port {
        ctx.config.server.port = port;
    }
    server::run(ctx).await
}
