pub mod effects;
pub mod frame;
pub mod gamepad;
pub mod input;
pub mod renderer;
pub mod sound;
