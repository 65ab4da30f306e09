// ABOUTME: Swarm command implementation.
// ABOUTME: Initializes and leaves the swarm, deploys and removes swarm stacks.

use crate::cli::{StackNameArg, SwarmCommand};
use elastic_package::diagnostics::Diagnostics;
use elastic_package::error::Result;
use elastic_package::output::Output;
use elastic_package::stack::{SwarmInitPlan, SwarmLifecycle};
use elastic_package::types::StackName;

use super::Context;

pub async fn swarm(ctx: &Context, command: SwarmCommand, output: &Output) -> Result<()> {
    match command {
        SwarmCommand::Init {
            interface,
            subnet,
            network,
        } => {
            let plan = SwarmInitPlan::resolve(&interface, &subnet, &network)?;
            let mut diag = Diagnostics::default();
            let result = lifecycle(ctx).init(&plan, &mut diag).await;

            for warning in diag.warnings() {
                output.warning(&warning.message);
            }
            let initialized = result?;

            output.progress(&format!(
                "Swarm profile created at {}.",
                initialized.profile.path().display()
            ));
            output.success(initialized.join_token.trim_end());
            Ok(())
        }
        SwarmCommand::Leave => {
            lifecycle(ctx).leave().await?;
            output.success("Done");
            Ok(())
        }
        SwarmCommand::Up { stack, profile } => {
            output.progress("Boot up the Elastic stack (on swarm)");
            super::stack::boot_up(ctx, true, stack, &profile.profile, output).await
        }
        SwarmCommand::Down {
            name: StackNameArg { stack_name },
        } => {
            output.progress("Shutdown the Elastic stack (on swarm)");
            let stack = StackName::new(&stack_name)?;
            lifecycle(ctx).stack_down(&stack).await?;
            output.success("Done");
            Ok(())
        }
    }
}

fn lifecycle(ctx: &Context) -> SwarmLifecycle {
    SwarmLifecycle::new(ctx.docker(), ctx.profiles())
}
