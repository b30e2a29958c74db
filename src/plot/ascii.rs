//! ASCII plotting of equity trajectories for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! One glyph per scenario, in scenario order; where lines cross, the earlier
//! scenario wins. x = elapsed years, y = equity in $k.

use crate::domain::MortgageProjection;

const GLYPHS: [char; 6] = ['*', 'o', '+', 'x', '#', '@'];

/// Render every equity series of `projection` on one grid.
pub fn render_equity_plot(projection: &MortgageProjection, width: usize, height: usize) -> String {
    let series: Vec<(String, Vec<(f64, f64)>)> = projection
        .equity
        .iter()
        .map(|s| {
            let pts = s
                .points
                .iter()
                .map(|p| (p.month as f64 / 12.0, p.equity / 1000.0))
                .filter(|&(_, y)| y.is_finite())
                .collect();
            (s.scenario.name.clone(), pts)
        })
        .collect();

    render_plot(&series, width, height)
}

fn render_plot(series: &[(String, Vec<(f64, f64)>)], width: usize, height: usize) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let (t_min, t_max) = x_range(series).unwrap_or((0.0, 1.0));
    let (y_min, y_max) = y_range(series).unwrap_or((0.0, 1.0));
    let (y_min, y_max) = pad_range(y_min, y_max, 0.05);

    let mut grid = vec![vec![' '; width]; height];

    for (idx, (_, pts)) in series.iter().enumerate() {
        let glyph = GLYPHS[idx % GLYPHS.len()];
        draw_curve(&mut grid, pts, t_min, t_max, y_min, y_max, glyph);
    }

    // Build final string. We include a small header with ranges and a legend.
    let mut out = String::new();
    out.push_str(&format!(
        "Plot: years=[{t_min:.2}, {t_max:.2}] | equity=[{y_min:.1}, {y_max:.1}]$k\n"
    ));

    for row in grid {
        let line: String = row.into_iter().collect();
        out.push_str(line.trim_end());
        out.push('\n');
    }

    let legend: Vec<String> = series
        .iter()
        .enumerate()
        .map(|(idx, (name, _))| format!("{}={name}", GLYPHS[idx % GLYPHS.len()]))
        .collect();
    out.push_str(&legend.join("  "));
    out.push('\n');

    out
}

fn x_range(series: &[(String, Vec<(f64, f64)>)]) -> Option<(f64, f64)> {
    range(series.iter().flat_map(|(_, pts)| pts.iter().map(|&(t, _)| t)))
}

fn y_range(series: &[(String, Vec<(f64, f64)>)]) -> Option<(f64, f64)> {
    range(series.iter().flat_map(|(_, pts)| pts.iter().map(|&(_, y)| y)))
}

fn range(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for v in values {
        min = min.min(v);
        max = max.max(v);
    }
    if min.is_finite() && max.is_finite() && max > min {
        Some((min, max))
    } else {
        None
    }
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

fn map_x(t: f64, t_min: f64, t_max: f64, width: usize) -> usize {
    let width = width.max(2);
    let u = ((t - t_min) / (t_max - t_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

fn draw_curve(
    grid: &mut [Vec<char>],
    curve: &[(f64, f64)],
    t_min: f64,
    t_max: f64,
    y_min: f64,
    y_max: f64,
    glyph: char,
) {
    let height = grid.len();
    let width = grid[0].len();

    let mut prev = None;
    for &(t, y) in curve {
        let x = map_x(t, t_min, t_max, width);
        let yy = map_y(y, y_min, y_max, height);
        match prev {
            Some((x0, y0)) => draw_line(grid, x0, y0, x, yy, glyph),
            None => {
                if grid[yy][x] == ' ' {
                    grid[yy][x] = glyph;
                }
            }
        }
        prev = Some((x, yy));
    }
}

/// Integer line drawing (Bresenham-ish). Only fills empty cells.
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && grid[y0 as usize][x0 as usize] == ' '
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AppreciationScenario, LoanParameters};
    use crate::engine::compute;

    #[test]
    fn plot_golden_snapshot_small() {
        let series = vec![
            ("up".to_string(), vec![(0.0, 0.0), (9.0, 100.0)]),
            ("flat".to_string(), vec![(0.0, 0.0), (9.0, 0.0)]),
        ];
        let txt = render_plot(&series, 10, 5);
        let expected = concat!(
            "Plot: years=[0.00, 9.00] | equity=[-5.0, 105.0]$k\n",
            "        **\n",
            "      **\n",
            "    **\n",
            "  **\n",
            "**oooooooo\n",
            "*=up  o=flat\n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn plot_from_projection_has_legend_per_scenario() {
        let params = LoanParameters {
            term_years: 10,
            appreciation_scenarios: vec![
                AppreciationScenario::new("main", 0.04),
                AppreciationScenario::new("lower", 0.0),
            ],
            ..LoanParameters::default()
        };
        let txt = render_equity_plot(&compute(&params).unwrap(), 40, 12);
        let lines: Vec<&str> = txt.lines().collect();
        assert_eq!(lines.len(), 1 + 12 + 1);
        assert_eq!(lines[13], "*=main  o=lower");
        assert!(lines.iter().all(|l| l.chars().count() <= 40 || l.starts_with("Plot:")));
    }

    #[test]
    fn infinite_point_keeps_the_equity_range() {
        let params = LoanParameters {
            term_years: 10,
            ..LoanParameters::default()
        };
        let clean = render_equity_plot(&compute(&params).unwrap(), 40, 12);

        let mut projection = compute(&params).unwrap();
        projection.equity[0].points[5].equity = f64::INFINITY;
        let txt = render_equity_plot(&projection, 40, 12);

        assert_eq!(txt.lines().next(), clean.lines().next());
    }
}
