// ABOUTME: Command-line interface definition using clap derive macros.
// ABOUTME: Defines all subcommands and their arguments.

use clap::{Args, Parser, Subcommand};
use elastic_package::output::OutputMode;
use elastic_package::profile::DEFAULT_PROFILE;
use elastic_package::stack::{DEFAULT_OVERLAY_NETWORK, DEFAULT_STACK_NAME, DEFAULT_STACK_VERSION};

#[derive(Parser)]
#[command(name = "elastic-package")]
#[command(about = "Run a test stack and query integration packages")]
#[command(version)]
pub struct Cli {
    /// Log every docker invocation and mirror its output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output for CI
    #[arg(long, global = true, conflicts_with = "json")]
    pub quiet: bool,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn output_mode(&self) -> OutputMode {
        if self.json {
            OutputMode::Json
        } else if self.quiet {
            OutputMode::Quiet
        } else {
            OutputMode::Normal
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage the Elastic stack
    #[command(subcommand)]
    Stack(StackCommand),

    /// Manage stack config profiles
    #[command(subcommand)]
    Profiles(ProfilesCommand),

    /// Query packages in the integrations repository
    #[command(subcommand)]
    Query(QueryCommand),
}

#[derive(Subcommand)]
pub enum StackCommand {
    /// Boot up the stack with docker compose
    Up {
        #[command(flatten)]
        stack: StackArgs,

        #[command(flatten)]
        profile: ProfileArg,
    },

    /// Take down the stack
    Down {
        #[command(flatten)]
        name: StackNameArg,

        #[command(flatten)]
        profile: ProfileArg,
    },

    /// Pull the latest images of a stack version
    Update {
        /// Version of the Elastic stack
        #[arg(long = "version", default_value = DEFAULT_STACK_VERSION)]
        stack_version: String,
    },

    /// Setup stack with multi-host networking
    #[command(subcommand)]
    Swarm(SwarmCommand),
}

#[derive(Subcommand)]
pub enum SwarmCommand {
    /// Create and initialize docker swarm and profile
    Init {
        /// Network interface the swarm advertises on
        #[arg(long)]
        interface: String,

        /// IP subnet of the overlay network (CIDR)
        #[arg(long)]
        subnet: String,

        /// Name of the overlay network
        #[arg(long, default_value = DEFAULT_OVERLAY_NETWORK)]
        network: String,
    },

    /// Leave the docker swarm (deletes the swarm and all the associated data)
    Leave,

    /// Start the stack on the docker swarm
    Up {
        #[command(flatten)]
        stack: StackArgs,

        #[command(flatten)]
        profile: ProfileArg,
    },

    /// Stop the swarm services
    Down {
        #[command(flatten)]
        name: StackNameArg,
    },
}

#[derive(Args)]
pub struct StackArgs {
    /// Version of the Elastic stack
    #[arg(long = "version", default_value = DEFAULT_STACK_VERSION)]
    pub stack_version: String,

    #[command(flatten)]
    pub name: StackNameArg,
}

#[derive(Args)]
pub struct StackNameArg {
    /// Name of the stack (compose project or swarm stack)
    #[arg(long = "stack-name", default_value = DEFAULT_STACK_NAME)]
    pub stack_name: String,
}

#[derive(Args)]
pub struct ProfileArg {
    /// Profile to use for the stack
    #[arg(long, default_value = DEFAULT_PROFILE)]
    pub profile: String,
}

#[derive(Subcommand)]
pub enum ProfilesCommand {
    /// Create a new profile
    Create {
        name: String,

        /// Profile to copy from
        #[arg(long = "from", default_value = DEFAULT_PROFILE)]
        from_profile: String,

        /// Replace an existing profile
        #[arg(long)]
        overwrite: bool,
    },

    /// List available profiles
    List,
}

#[derive(Subcommand)]
pub enum QueryCommand {
    /// Find packages whose manifest has a key set to a value
    Manifest {
        /// Flattened manifest key, e.g. policy_templates.0.name
        #[arg(long)]
        key: String,

        /// Accepted values (comma separated)
        #[arg(long = "value", value_delimiter = ',', required = true)]
        values: Vec<String>,
    },
}
