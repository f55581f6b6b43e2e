// salvis\crates\sv_foundation\src/lib.rs

//! SalVis 基础层
//!
//! 提供整个项目共用的错误类型与校验辅助函数。
//! 本层不依赖任何上层 crate。

pub mod error;

pub use error::{SvError, SvResult};
