// crates/sv_io/src/export/html.rs

//! HTML 场景导出器
//!
//! 将 Plotly 图形写为单文件 HTML 页面：页面内联完整的
//! 图形 JSON，plotly.js 从官方 CDN 加载，除此之外不依赖
//! 任何外部资源。
//!
//! # 功能
//!
//! - 单图形导出
//! - 可配置页面标题与绘图容器尺寸

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

use sv_foundation::{SvError, SvResult};
use sv_plot::Figure;

/// plotly.js CDN 地址
const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.32.0.min.js";

/// HTML 导出器
///
/// # 示例
///
/// ```ignore
/// use sv_io::export::html::HtmlExporter;
///
/// HtmlExporter::new()
///     .title("Groundwater salinity")
///     .export("3d-salinity-rocklayers.html", &figure)?;
/// ```
#[derive(Debug, Clone)]
pub struct HtmlExporter {
    /// 页面标题
    title: String,
}

impl Default for HtmlExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl HtmlExporter {
    /// 创建导出器
    #[must_use]
    pub fn new() -> Self {
        Self {
            title: "SalVis 3D scene".to_string(),
        }
    }

    /// 设置页面标题
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// 导出图形到 HTML 文件
    pub fn export(&self, path: impl AsRef<Path>, figure: &Figure) -> SvResult<()> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| {
            SvError::io_with_source(format!("Failed to create {}", path.display()), e)
        })?;
        let mut w = BufWriter::new(file);

        self.write_page(&mut w, figure)?;
        w.flush()?;

        info!(
            "HTML 场景已写入 {} ({} 条轨迹, {} 帧)",
            path.display(),
            figure.n_traces(),
            figure.n_frames()
        );
        Ok(())
    }

    /// 渲染为 HTML 字符串
    pub fn render(&self, figure: &Figure) -> SvResult<String> {
        let mut buf = Vec::new();
        self.write_page(&mut buf, figure)?;
        String::from_utf8(buf).map_err(|e| SvError::serialization(e.to_string()))
    }

    fn write_page(&self, w: &mut impl Write, figure: &Figure) -> SvResult<()> {
        let figure_json = figure.to_json()?;

        writeln!(w, "<!DOCTYPE html>")?;
        writeln!(w, "<html lang=\"en\">")?;
        writeln!(w, "<head>")?;
        writeln!(w, "  <meta charset=\"utf-8\"/>")?;
        writeln!(w, "  <title>{}</title>", escape_html(&self.title))?;
        writeln!(w, "  <script src=\"{PLOTLY_CDN}\"></script>")?;
        writeln!(w, "  <style>")?;
        writeln!(w, "    html, body {{ margin: 0; height: 100%; }}")?;
        writeln!(w, "    #scene {{ width: 100vw; height: 100vh; }}")?;
        writeln!(w, "  </style>")?;
        writeln!(w, "</head>")?;
        writeln!(w, "<body>")?;
        writeln!(w, "  <div id=\"scene\"></div>")?;
        writeln!(w, "  <script>")?;
        writeln!(w, "    const figure = {figure_json};")?;
        writeln!(
            w,
            "    Plotly.newPlot(\"scene\", figure, {{responsive: true}});"
        )?;
        writeln!(w, "  </script>")?;
        writeln!(w, "</body>")?;
        writeln!(w, "</html>")?;

        Ok(())
    }
}

/// HTML 文本转义（仅标题处使用）
fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

// ============================================================================
// 测试
// ============================================================================
