//! `ccr code`: run the assistant against the router.

use crate::cli::CodeArgs;
use crate::config::Config;
use crate::context::RouterContext;
use crate::error::Result;
use crate::launcher::{LaunchRequest, launch};
use crate::refcount::FileReferenceCount;
use crate::service::PidFileService;
use tracing::debug;

/// Environment variable naming the assistant executable.
pub const CLAUDE_PATH_ENV: &str = "CLAUDE_PATH";

pub fn cmd_code(ctx: &RouterContext, args: CodeArgs) -> Result<i32> {
    let config = Config::load_or_default(&ctx.config_path)?;

    let env_claude_path = std::env::var(CLAUDE_PATH_ENV).ok();
    let request = LaunchRequest::from_config(&config, args.args, env_claude_path.as_deref())?;
    debug!(
        executable = %request.executable,
        base_url = %request.base_url,
        "launch request built"
    );

    let references = FileReferenceCount::new(&ctx.reference_count_file);
    let service = PidFileService::new(&ctx.pid_file);

    let outcome = launch(&request, &references, &service)?;
    Ok(outcome.process_exit_code())
}
