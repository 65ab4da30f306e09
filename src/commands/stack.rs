// ABOUTME: Stack command implementation.
// ABOUTME: Boots up, takes down and updates the stack in compose mode.

use crate::cli::{StackArgs, StackCommand, StackNameArg};
use elastic_package::error::Result;
use elastic_package::output::Output;
use elastic_package::stack::{DeploySummary, DeploymentOptions, StackDeployer};
use elastic_package::types::StackName;
use std::env;

use super::Context;

pub async fn stack(ctx: &Context, command: StackCommand, output: &Output) -> Result<()> {
    match command {
        StackCommand::Up { stack, profile } => {
            output.progress("Boot up the Elastic stack");
            boot_up(ctx, false, stack, &profile.profile, output).await
        }
        StackCommand::Down { name, profile } => {
            output.progress("Take down the Elastic stack");
            tear_down(ctx, false, name, &profile.profile, output).await
        }
        StackCommand::Update { stack_version } => {
            output.progress(&format!("Update the Elastic stack images ({stack_version})"));
            let mut output = *output;
            output.start_timer();
            deployer(ctx)?.update_images(&stack_version).await?;
            output.success("Done");
            Ok(())
        }
        StackCommand::Swarm(command) => super::swarm::swarm(ctx, command, output).await,
    }
}

fn deployer(ctx: &Context) -> Result<StackDeployer> {
    Ok(StackDeployer::load(
        ctx.docker(),
        ctx.locations.clone(),
        env::current_dir()?,
    )?)
}

fn options(ctx: &Context, swarm_mode: bool, stack: StackArgs, profile: &str) -> Result<DeploymentOptions> {
    Ok(DeploymentOptions {
        swarm_mode,
        stack_name: StackName::new(&stack.name.stack_name)?,
        stack_version: stack.stack_version,
        profile: ctx.load_profile(profile)?,
    })
}

pub(super) async fn boot_up(
    ctx: &Context,
    swarm_mode: bool,
    stack: StackArgs,
    profile: &str,
    output: &Output,
) -> Result<()> {
    let options = options(ctx, swarm_mode, stack, profile)?;
    output.progress(&format!("Using profile {}.", options.profile.path().display()));

    let mut output = *output;
    output.start_timer();
    let DeploySummary { custom_packages } = deployer(ctx)?.boot_up(&options).await?;

    output.progress("Packages from the following directories will be loaded into the package-registry:");
    output.progress("- built-in packages (package-storage:snapshot Docker image)");
    if let Some(dir) = custom_packages {
        output.progress(&format!("- {}", dir.display()));
    }
    output.success("Done");
    Ok(())
}

pub(super) async fn tear_down(
    ctx: &Context,
    swarm_mode: bool,
    name: StackNameArg,
    profile: &str,
    output: &Output,
) -> Result<()> {
    // The version only selects image references for the compose environment.
    let stack = StackArgs {
        stack_version: elastic_package::stack::DEFAULT_STACK_VERSION.to_string(),
        name,
    };
    let options = options(ctx, swarm_mode, stack, profile)?;
    deployer(ctx)?.tear_down(&options).await?;
    output.success("Done");
    Ok(())
}
