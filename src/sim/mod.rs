pub mod chess;
pub mod command;
pub mod engine;
pub mod event;
pub mod login;
pub mod prompt;
pub mod screen;
pub mod tictactoe;
pub mod war;
