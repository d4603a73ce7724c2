mod answers;
mod followers;
mod health_check;
mod helpers;

pub use answers::{find_answer, get_answer};
pub use followers::register_follower;
pub use health_check::health_check;
pub use helpers::error_chain_fmt;
