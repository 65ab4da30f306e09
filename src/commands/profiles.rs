// ABOUTME: Profiles command implementation.
// ABOUTME: Creates profiles from existing ones and lists them.

use crate::cli::ProfilesCommand;
use elastic_package::error::Result;
use elastic_package::output::Output;
use elastic_package::profile::CreateProfileOptions;

use super::Context;

pub fn profiles(ctx: &Context, command: ProfilesCommand, output: &Output) -> Result<()> {
    let profiles = ctx.profiles();
    match command {
        ProfilesCommand::Create {
            name,
            from_profile,
            overwrite,
        } => {
            let profile = profiles.create(&CreateProfileOptions {
                name,
                from_profile,
                overwrite_existing: overwrite,
            })?;
            output.success(&format!(
                "Created profile {} at {}",
                profile.name(),
                profile.path().display()
            ));
            Ok(())
        }
        ProfilesCommand::List => {
            let list = profiles.list()?;
            let lines = list
                .iter()
                .map(|p| {
                    format!(
                        "{}\t{}\t{}\t{}",
                        p.name,
                        p.date_created.format("%Y-%m-%d %H:%M:%S"),
                        p.user,
                        p.version
                    )
                })
                .collect::<Vec<_>>();
            output.result(&lines, &list);
            Ok(())
        }
    }
}
