//! 2D-canvas charts for service results: line, bars, scatter and a
//! spectrogram heatmap. Axes only carry end labels.

use eeg_core::api::{PcaPoint, Spectrogram};
use eeg_core::report::{axis_ticks, heat_color, normalize};
use wasm_bindgen::JsCast;
use web_sys as web;

const AXIS_COLOR: &str = "rgba(255,255,255,0.35)";
const LABEL_COLOR: &str = "rgba(255,255,255,0.7)";
const LINE_COLOR: &str = "#818cf8";
const FONT: &str = "11px sans-serif";

/// Min and max of the finite values.
pub fn extent(values: impl IntoIterator<Item = f64>) -> Option<(f64, f64)> {
    values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

/// Plot rectangle inside a canvas, with data-to-pixel mapping.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlotArea {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PlotArea {
    pub fn inset(canvas_w: f64, canvas_h: f64, pad: f64) -> Self {
        Self {
            left: pad,
            top: pad * 0.5,
            width: (canvas_w - pad * 1.5).max(1.0),
            height: (canvas_h - pad * 1.5).max(1.0),
        }
    }

    pub fn x(&self, v: f64, lo: f64, hi: f64) -> f64 {
        self.left + normalize(v, lo, hi) as f64 * self.width
    }

    /// Larger values are higher on screen.
    pub fn y(&self, v: f64, lo: f64, hi: f64) -> f64 {
        self.top + (1.0 - normalize(v, lo, hi) as f64) * self.height
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

pub fn context_2d(canvas: &web::HtmlCanvasElement) -> Option<web::CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .ok()
        .flatten()
        .and_then(|o| o.dyn_into::<web::CanvasRenderingContext2d>().ok())
}

fn begin(canvas: &web::HtmlCanvasElement, pad: f64) -> Option<(web::CanvasRenderingContext2d, PlotArea)> {
    let ctx = context_2d(canvas)?;
    let (w, h) = (canvas.width() as f64, canvas.height() as f64);
    ctx.clear_rect(0.0, 0.0, w, h);
    ctx.set_font(FONT);
    let area = PlotArea::inset(w, h, pad);
    ctx.set_stroke_style_str(AXIS_COLOR);
    ctx.set_line_width(1.0);
    ctx.begin_path();
    ctx.move_to(area.left, area.top);
    ctx.line_to(area.left, area.bottom());
    ctx.line_to(area.left + area.width, area.bottom());
    ctx.stroke();
    Some((ctx, area))
}

fn label(ctx: &web::CanvasRenderingContext2d, text: &str, x: f64, y: f64) {
    ctx.set_fill_style_str(LABEL_COLOR);
    _ = ctx.fill_text(text, x, y);
}

/// Draw a message in place of a chart with no data.
pub fn draw_empty(canvas: &web::HtmlCanvasElement, message: &str) {
    if let Some(ctx) = context_2d(canvas) {
        let (w, h) = (canvas.width() as f64, canvas.height() as f64);
        ctx.clear_rect(0.0, 0.0, w, h);
        ctx.set_font(FONT);
        label(&ctx, message, 12.0, h / 2.0);
    }
}

pub fn draw_line(canvas: &web::HtmlCanvasElement, points: &[(f64, f64)], x_label: &str, pad: f64) {
    let (Some((x0, x1)), Some((y0, y1))) = (
        extent(points.iter().map(|p| p.0)),
        extent(points.iter().map(|p| p.1)),
    ) else {
        draw_empty(canvas, "no data");
        return;
    };
    let Some((ctx, area)) = begin(canvas, pad) else {
        return;
    };
    ctx.set_stroke_style_str(LINE_COLOR);
    ctx.set_line_width(1.5);
    ctx.begin_path();
    for (i, (x, y)) in points.iter().filter(|p| p.0.is_finite() && p.1.is_finite()).enumerate() {
        let (px, py) = (area.x(*x, x0, x1), area.y(*y, y0, y1));
        if i == 0 {
            ctx.move_to(px, py);
        } else {
            ctx.line_to(px, py);
        }
    }
    ctx.stroke();
    label(&ctx, &format!("{y1:.2}"), 2.0, area.top + 10.0);
    label(&ctx, &format!("{y0:.2}"), 2.0, area.bottom());
    label(&ctx, &format!("{x0:.1}"), area.left, area.bottom() + 14.0);
    label(&ctx, &format!("{x1:.1} {x_label}"), area.left + area.width - 60.0, area.bottom() + 14.0);
}

pub fn draw_bars(canvas: &web::HtmlCanvasElement, bars: &[(String, f64, String)], pad: f64) {
    let Some((_, hi)) = extent(bars.iter().map(|b| b.1)) else {
        draw_empty(canvas, "no data");
        return;
    };
    let Some((ctx, area)) = begin(canvas, pad) else {
        return;
    };
    let hi = hi.max(0.0);
    let slot = area.width / bars.len() as f64;
    for (i, (name, value, color)) in bars.iter().enumerate() {
        let top = area.y(value.max(0.0), 0.0, hi);
        let x = area.left + slot * i as f64 + slot * 0.15;
        ctx.set_fill_style_str(color);
        ctx.fill_rect(x, top, slot * 0.7, area.bottom() - top);
        label(&ctx, name, x, area.bottom() + 14.0);
    }
    label(&ctx, &format!("{hi:.3}"), 2.0, area.top + 10.0);
}

/// PCA scatter coloured by split (`train` indigo, anything else pink).
pub fn draw_scatter(canvas: &web::HtmlCanvasElement, points: &[PcaPoint], pad: f64) {
    let (Some((x0, x1)), Some((y0, y1))) = (
        extent(points.iter().map(|p| p.x)),
        extent(points.iter().map(|p| p.y)),
    ) else {
        draw_empty(canvas, "no PCA points");
        return;
    };
    let Some((ctx, area)) = begin(canvas, pad) else {
        return;
    };
    for p in points.iter().filter(|p| p.x.is_finite() && p.y.is_finite()) {
        let [r, g, b] = heat_color(if p.split == "train" { 0.0 } else { 1.0 });
        ctx.set_fill_style_str(&format!("rgba({r},{g},{b},0.7)"));
        ctx.begin_path();
        _ = ctx.arc(area.x(p.x, x0, x1), area.y(p.y, y0, y1), 2.5, 0.0, std::f64::consts::TAU);
        ctx.fill();
    }
    label(&ctx, "PC1", area.left + area.width - 24.0, area.bottom() + 14.0);
    label(&ctx, "PC2", 2.0, area.top + 10.0);
}

/// Spectrogram grid: time left to right, frequency bottom to top.
pub fn draw_heatmap(canvas: &web::HtmlCanvasElement, grid: &Spectrogram, ticks: usize, pad: f64) {
    let rows = grid.z.len();
    let cols = grid.z.first().map_or(0, Vec::len);
    if rows == 0 || cols == 0 {
        draw_empty(canvas, "no spectrogram");
        return;
    }
    let (lo, hi) = if grid.max > grid.min {
        (grid.min, grid.max)
    } else {
        extent(grid.z.iter().flatten().copied()).unwrap_or((0.0, 0.0))
    };
    let Some((ctx, area)) = begin(canvas, pad) else {
        return;
    };
    let cw = area.width / cols as f64;
    let ch = area.height / rows as f64;
    for (fi, row) in grid.z.iter().enumerate() {
        let y = area.bottom() - ch * (fi + 1) as f64;
        for (ti, v) in row.iter().enumerate() {
            let [r, g, b] = heat_color(normalize(*v, lo, hi));
            ctx.set_fill_style_str(&format!("rgb({r},{g},{b})"));
            // Slight overdraw hides seams between cells.
            ctx.fill_rect(area.left + cw * ti as f64, y, cw + 0.5, ch + 0.5);
        }
    }
    for ti in axis_ticks(cols, ticks) {
        if let Some(t) = grid.t.get(ti) {
            label(&ctx, &format!("{t:.2}s"), area.left + cw * ti as f64, area.bottom() + 14.0);
        }
    }
    for fi in axis_ticks(rows, ticks) {
        if let Some(f) = grid.f.get(fi) {
            label(&ctx, &format!("{f:.0}"), 2.0, area.bottom() - ch * fi as f64);
        }
    }
}
