mod approval;

pub use approval::{ActionArgs, ApprovalCommands};
