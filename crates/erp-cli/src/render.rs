use anyhow::Result;
use erp_lib::plot::{Figure, PlotBackend, Series};
use plotters::prelude::*;
use std::path::{Path, PathBuf};

/// Draws figures into a PNG with plotters.
pub struct PlottersBackend {
    path: PathBuf,
    size: (u32, u32),
}

impl PlottersBackend {
    pub fn new(path: &Path, size: (u32, u32)) -> Self {
        Self {
            path: path.to_path_buf(),
            size,
        }
    }
}

impl PlotBackend for PlottersBackend {
    fn draw(&mut self, fig: &Figure) -> Result<()> {
        draw_plotters_figure(&self.path, self.size, fig)
    }
}

/// Largest magnitude an axis bound may take; keeps the span finite.
const AXIS_LIMIT: f64 = f64::MAX / 4.0;

/// Pad a range so flat lines stay visible.
fn padded(min: f64, max: f64) -> (f64, f64) {
    if !(min.is_finite() && max.is_finite()) {
        return (0.0, 1.0);
    }
    let min = min.clamp(-AXIS_LIMIT, AXIS_LIMIT);
    let max = max.clamp(-AXIS_LIMIT, AXIS_LIMIT);
    let span = max - min;
    let pad = if span.abs() < 1e-9 {
        (min.abs() * 0.05).max(1.0)
    } else {
        span * 0.05
    };
    (min - pad, max + pad)
}

/// Runs of consecutive finite points; lines break at NaN and infinities.
fn finite_runs(points: &[[f64; 2]]) -> Vec<Vec<(f64, f64)>> {
    points
        .split(|p| !(p[0].is_finite() && p[1].is_finite()))
        .filter(|run| !run.is_empty())
        .map(|run| run.iter().map(|p| (p[0], p[1])).collect())
        .collect()
}

fn draw_plotters_figure(path: &Path, size: (u32, u32), fig: &Figure) -> Result<()> {
    let ((x_min, x_max), (y_min, y_max)) = fig.bounds().unwrap_or(((0.0, 1.0), (0.0, 1.0)));
    let (y_min, y_max) = padded(y_min, y_max);
    let root = BitMapBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .margin(10)
        .caption(
            fig.title.clone().unwrap_or_else(|| "Plot".into()),
            ("sans-serif", 24),
        )
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)?;
    chart
        .configure_mesh()
        .x_desc(fig.x.label.clone().unwrap_or_default())
        .y_desc(fig.y.label.clone().unwrap_or_default())
        .draw()?;
    for series in &fig.series {
        match series {
            Series::Line(line) => {
                let (r, g, b) = line.style.color.rgb();
                let color = RGBColor(r, g, b);
                let stroke = (line.style.width.round() as u32).max(1);
                chart
                    .draw_series(
                        finite_runs(&line.points)
                            .into_iter()
                            .map(|run| PathElement::new(run, color.stroke_width(stroke))),
                    )?
                    .label(line.name.clone())
                    .legend(move |(x, y)| {
                        PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
                    });
            }
        }
    }
    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;
    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_ranges_get_padding() {
        assert_eq!(padded(0.0, 0.0), (-1.0, 1.0));
        let (lo, hi) = padded(0.0, 100.0);
        assert!(lo < 0.0 && hi > 100.0);
    }

    #[test]
    fn extreme_ranges_stay_finite() {
        let (lo, hi) = padded(-1e308, 1e308);
        assert!(lo.is_finite() && hi.is_finite() && lo < hi);
        let (lo, hi) = padded(f64::MAX, f64::MAX);
        assert!(lo.is_finite() && hi.is_finite() && lo < hi);
        assert_eq!(padded(f64::NAN, 1.0), (0.0, 1.0));
    }

    #[test]
    fn runs_split_at_non_finite_points() {
        let points = [
            [0.0, 1.0],
            [1.0, 2.0],
            [2.0, f64::INFINITY],
            [3.0, 4.0],
            [4.0, f64::NAN],
            [5.0, f64::NAN],
            [6.0, 7.0],
            [7.0, 8.0],
        ];
        let runs = finite_runs(&points);
        assert_eq!(
            runs,
            vec![
                vec![(0.0, 1.0), (1.0, 2.0)],
                vec![(3.0, 4.0)],
                vec![(6.0, 7.0), (7.0, 8.0)],
            ]
        );
        assert!(finite_runs(&[[0.0, f64::NAN]]).is_empty());
    }
}
