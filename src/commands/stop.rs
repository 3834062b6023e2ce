//! `ccr stop`: force the router service down.

use crate::context::RouterContext;
use crate::error::Result;
use crate::exit_codes;
use crate::refcount::FileReferenceCount;
use crate::service::{PidFileService, ServiceControl, ShutdownOutcome};

pub fn cmd_stop(ctx: &RouterContext) -> Result<i32> {
    let references = FileReferenceCount::new(&ctx.reference_count_file);
    let service = PidFileService::new(&ctx.pid_file);

    match service.shutdown(&references, true)? {
        ShutdownOutcome::Stopped { pid } => {
            println!("Router service (PID {}) has been stopped.", pid);
        }
        ShutdownOutcome::NotRunning | ShutdownOutcome::InUse(_) => {
            println!("No router service is currently running.");
        }
    }

    Ok(exit_codes::SUCCESS)
}
