pub mod telegram;
pub mod utils;
