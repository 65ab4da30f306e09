// ABOUTME: Validated domain types for stack, network and image inputs.
// ABOUTME: Parsing happens once at the edge so orchestration code never re-validates.

mod id;
mod image_ref;
mod interface_name;
mod stack_name;
mod subnet;

pub use id::{ContainerId, NetworkId};
pub use image_ref::{ImageRef, ParseImageRefError};
pub use interface_name::{InterfaceName, InterfaceNameError};
pub use stack_name::{StackName, StackNameError};
pub use subnet::{Subnet, SubnetError};
