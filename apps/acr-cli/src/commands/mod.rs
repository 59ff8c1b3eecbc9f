// Command implementations, one module per subcommand.

pub mod classify;
pub mod conflicts;
pub mod explain;
pub mod resolve;
pub mod trail;
