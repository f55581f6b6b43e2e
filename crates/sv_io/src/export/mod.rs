// crates/sv_io/src/export/mod.rs

//! 场景导出
//!
//! 当前仅支持自包含 HTML 输出。

pub mod html;
