//! Learning agents
//!
//! Each agent keeps a playbook of move tables, one per board state it has
//! reached, and rescales the weights of the moves it played after every game.

pub mod agent;
pub mod move_table;
pub mod playbook;
pub mod reinforcement;

pub use agent::{Agent, AgentStats};
pub use move_table::MoveTable;
pub use playbook::Playbook;
pub use reinforcement::{Outcome, ReinforcementValues};
