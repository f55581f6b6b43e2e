// salvis\apps\sv_cli\src\commands/mod.rs

//! 子命令实现

pub mod animate;
pub mod layers;
pub mod validate;
