//! Command handlers, one module per subcommand.
//!
//! Each handler is `handle_<name>_command(...) -> Result<(), CliError>` and
//! writes only to the streams it is given.

pub mod cfg;
pub mod deal;
pub mod eval;
pub mod sim;

pub use cfg::handle_cfg_command;
pub use deal::handle_deal_command;
pub use eval::handle_eval_command;
pub use sim::handle_sim_command;
