// crates/sv_io/src/import/mod.rs

//! 数据导入
//!
//! 当前仅支持 CSV 格式的盐度测量与岩层面数据。

pub mod survey_csv;
