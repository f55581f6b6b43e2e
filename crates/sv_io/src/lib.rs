// salvis\crates\sv_io\src/lib.rs

//! SalVis IO 层
//!
//! 提供测量数据的 CSV 导入与交互式场景的 HTML 导出。
//!
//! # 模块
//!
//! - `import`: 盐度测量与岩层面 CSV 导入
//! - `export`: 自包含 HTML 场景导出

pub mod export;
pub mod import;

pub use export::html::HtmlExporter;
pub use import::survey_csv::{
    load_rock_layer, load_salinity_survey, RockLayer, SalinitySurvey, SurveyCsvConfig,
};
