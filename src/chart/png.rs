//! Plotters-powered PNG rendering of `PaymentEquityChart`.
//!
//! Text (caption, axis descriptions, tick labels, legend) is rasterized with
//! the bundled DejaVu Sans, registered once as plotters' `sans-serif` family.

use std::path::Path;
use std::sync::OnceLock;

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::{FontStyle, register_font};

use super::PaymentEquityChart;
use crate::error::MortgageError;

const FONT_FAMILY: &str = "sans-serif";
static FONT_BYTES: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans.ttf");

const PRINCIPAL_COLOR: RGBColor = RGBColor(0, 128, 0);
const INTEREST_COLOR: RGBColor = RGBColor(255, 165, 0);
const TAX_COLOR: RGBColor = RGBColor(0, 0, 255);
const INSURANCE_COLOR: RGBColor = RGBColor(128, 0, 128);
const GRID_COLOR: RGBColor = RGBColor(160, 160, 160);
const BAR_ALPHA: f64 = 0.6;

/// Line colors, cycled per scenario. The first is the main scenario's red.
const EQUITY_PALETTE: [RGBColor; 6] = [
    RGBColor(220, 0, 0),
    RGBColor(0, 0, 255),
    RGBColor(128, 0, 128),
    RGBColor(0, 150, 150),
    RGBColor(200, 120, 0),
    RGBColor(90, 90, 90),
];

/// Draw `chart` to a raster image at `path` (format from the extension: png, bmp, jpg).
pub fn render_png(chart: &PaymentEquityChart, path: &Path, width: u32, height: u32) -> Result<(), MortgageError> {
    if width < 200 || height < 150 {
        return Err(MortgageError::output_write(
            path,
            format!("chart size {width}x{height} is too small (min 200x150)"),
        ));
    }
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();
    if !matches!(ext.as_str(), "png" | "bmp" | "jpg" | "jpeg") {
        return Err(MortgageError::output_write(
            path,
            "unsupported image format (use .png, .bmp or .jpg)",
        ));
    }

    if !chart_font_ready() {
        return Err(MortgageError::output_write(path, "bundled chart font failed to load"));
    }

    let root = BitMapBackend::new(path, (width, height)).into_drawing_area();
    draw_chart(chart, &root).map_err(|e| MortgageError::output_write(path, e))?;
    log::info!("wrote chart ({width}x{height}) to {}", path.display());
    Ok(())
}

/// Registers the bundled font on first use.
fn chart_font_ready() -> bool {
    static READY: OnceLock<bool> = OnceLock::new();
    *READY.get_or_init(|| register_font(FONT_FAMILY, FontStyle::Normal, FONT_BYTES).is_ok())
}

fn draw_chart<DB>(chart: &PaymentEquityChart, root: &DrawingArea<DB, Shift>) -> Result<(), Box<dyn std::error::Error>>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let [x0, x1] = chart.x_bounds;
    let [c0, c1] = chart.cost_bounds;
    let [e0, e1] = chart.equity_bounds;

    root.fill(&WHITE)?;

    let mut ctx = ChartBuilder::on(root)
        .margin(12)
        .caption(&chart.title, (FONT_FAMILY, 20).into_font())
        .set_label_area_size(LabelAreaPosition::Left, 70)
        .set_label_area_size(LabelAreaPosition::Right, 70)
        .set_label_area_size(LabelAreaPosition::Bottom, 45)
        .build_cartesian_2d(x0..x1, c0..c1)?
        .set_secondary_coord(x0..x1, e0..e1);

    let fmt_whole = |v: &f64| format!("{v:.0}");
    ctx.configure_mesh()
        .disable_x_mesh()
        .disable_y_mesh()
        .x_labels(10)
        .y_labels(10)
        .y_label_formatter(&fmt_whole)
        .x_desc("Year")
        .y_desc("Monthly Costs ($)")
        .draw()?;
    ctx.configure_secondary_axes()
        .y_labels(10)
        .y_label_formatter(&fmt_whole)
        .y_desc("Equity ($k)")
        .draw()?;

    // 1) Equity gridlines, behind everything else.
    ctx.draw_secondary_series(
        chart
            .equity_grid
            .iter()
            .map(|&y| PathElement::new(vec![(x0, y), (x1, y)], GRID_COLOR.mix(0.7).stroke_width(1))),
    )?;

    // 2) Stacked monthly bars.
    let half = chart.bar_width / 2.0;
    let layers = [
        ("Principal", PRINCIPAL_COLOR),
        ("Interest", INTEREST_COLOR),
        ("Property Tax", TAX_COLOR),
        ("Insurance", INSURANCE_COLOR),
    ];
    for (layer, (name, color)) in layers.into_iter().enumerate() {
        ctx.draw_series(chart.bars.iter().map(|bar| {
            let (lo, hi) = bar.layers()[layer];
            Rectangle::new([(bar.x - half, lo), (bar.x + half, hi)], color.mix(BAR_ALPHA).filled())
        }))?
        .label(name)
        .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.mix(BAR_ALPHA).filled()));
    }

    // 3) Equity lines.
    for (idx, line) in chart.equity.iter().enumerate() {
        let color = EQUITY_PALETTE[idx % EQUITY_PALETTE.len()];
        ctx.draw_secondary_series(LineSeries::new(line.points.iter().copied(), color.stroke_width(2)))?
            .label(line.label.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
    }

    ctx.configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::LoanParameters;
    use crate::engine::compute;

    fn tmp(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("mortgage-equity-{}-{name}", std::process::id()))
    }

    #[test]
    fn renders_png_file() {
        let projection = compute(&LoanParameters {
            term_years: 10,
            ..LoanParameters::default()
        })
        .unwrap();
        let chart = PaymentEquityChart::from_projection(&projection);
        let path = tmp("chart.png");

        render_png(&chart, &path, 640, 400).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn caption_text_is_drawn() {
        assert!(chart_font_ready());

        let projection = compute(&LoanParameters {
            term_years: 10,
            ..LoanParameters::default()
        })
        .unwrap();
        let chart = PaymentEquityChart::from_projection(&projection);

        let (w, h) = (640_usize, 400_usize);
        let mut buf = vec![0_u8; w * h * 3];
        {
            let root = BitMapBackend::with_buffer(&mut buf, (w as u32, h as u32)).into_drawing_area();
            draw_chart(&chart, &root).unwrap();
        }

        // Rows between the top margin and the plot area hold only the caption.
        let dark = |y: usize, x: usize| buf[(y * w + x) * 3..][..3].iter().all(|&c| c < 128);
        let margin_ink = (0..10).flat_map(|y| (0..w).map(move |x| (y, x))).filter(|&(y, x)| dark(y, x)).count();
        let caption_ink = (12..34).flat_map(|y| (0..w).map(move |x| (y, x))).filter(|&(y, x)| dark(y, x)).count();
        assert_eq!(margin_ink, 0);
        assert!(caption_ink > 100, "caption band has {caption_ink} dark pixels");
    }

    #[test]
    fn rejects_unknown_extension_and_tiny_canvas() {
        let projection = compute(&LoanParameters::default()).unwrap();
        let chart = PaymentEquityChart::from_projection(&projection);

        let err = render_png(&chart, &tmp("chart.pdf"), 640, 400).unwrap_err();
        assert!(matches!(err, MortgageError::OutputWrite { .. }));

        let err = render_png(&chart, &tmp("chart.png"), 50, 50).unwrap_err();
        assert!(matches!(err, MortgageError::OutputWrite { .. }));
    }
}
