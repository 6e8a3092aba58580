pub mod board;
pub mod input;
pub mod layout;
pub mod terminal;
