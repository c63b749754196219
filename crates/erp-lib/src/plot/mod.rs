use crate::erp::{time_axis, ErpMatrix};
use crate::signal::Finger;
use serde::{Deserialize, Serialize};

pub const ERP_TITLE: &str = "Average Event Related Potential (ERP) for each finger";
pub const TIME_LABEL: &str = "Time (ms)";
pub const AMPLITUDE_LABEL: &str = "ECOG Signal Amplitude (μV)";

/// Line colours, one per finger.
const FINGER_COLORS: [u32; Finger::COUNT] = [0x1F77B4, 0xFF7F0E, 0x2CA02C, 0xD62728, 0x9467BD];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Axis {
    pub label: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Style {
    pub width: f32,
    pub color: Color,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color(pub u32);

impl Color {
    pub fn rgb(self) -> (u8, u8, u8) {
        (
            ((self.0 >> 16) & 0xFF) as u8,
            ((self.0 >> 8) & 0xFF) as u8,
            (self.0 & 0xFF) as u8,
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineSeries {
    /// Legend entry
    pub name: String,
    pub points: Vec<[f64; 2]>,
    pub style: Style,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Series {
    Line(LineSeries),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Figure {
    pub title: Option<String>,
    pub x: Axis,
    pub y: Axis,
    pub series: Vec<Series>,
}

impl Figure {
    pub fn new(title: impl Into<Option<String>>) -> Self {
        Self {
            title: title.into(),
            x: Axis { label: None },
            y: Axis { label: None },
            series: Vec::new(),
        }
    }

    pub fn add_series(&mut self, series: Series) {
        self.series.push(series);
    }

    /// Bounding box of the finite points as `((x_min, x_max), (y_min, y_max))`.
    ///
    /// NaN and infinite samples are skipped; `None` when nothing finite is left.
    pub fn bounds(&self) -> Option<((f64, f64), (f64, f64))> {
        let mut points = self
            .series
            .iter()
            .flat_map(|series| match series {
                Series::Line(line) => line.points.iter(),
            })
            .filter(|p| p[0].is_finite() && p[1].is_finite());
        let first = points.next()?;
        let init = ((first[0], first[0]), (first[1], first[1]));
        Some(points.fold(init, |((x0, x1), (y0, y1)), p| {
            ((x0.min(p[0]), x1.max(p[0])), (y0.min(p[1]), y1.max(p[1])))
        }))
    }
}

/// Anything that can turn a [`Figure`] into an artifact.
pub trait PlotBackend {
    fn draw(&mut self, fig: &Figure) -> anyhow::Result<()>;
}

/// One labelled line per finger over the -200..=1000 time axis.
pub fn figure_from_erp(matrix: &ErpMatrix) -> Figure {
    let mut fig = Figure::new(Some(ERP_TITLE.into()));
    fig.x.label = Some(TIME_LABEL.into());
    fig.y.label = Some(AMPLITUDE_LABEL.into());
    let axis = time_axis();
    for (finger, color) in Finger::ALL.into_iter().zip(FINGER_COLORS) {
        let points = axis
            .iter()
            .zip(matrix.row(finger))
            .map(|(t, value)| [*t as f64, *value])
            .collect();
        fig.add_series(Series::Line(LineSeries {
            name: finger.to_string(),
            points,
            style: Style {
                width: 1.5,
                color: Color(color),
            },
        }));
    }
    fig
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::erp::SEGMENT_LEN;

    #[test]
    fn erp_figure_has_one_labelled_line_per_finger() {
        let fig = figure_from_erp(&ErpMatrix::zeros());
        assert_eq!(fig.series.len(), 5);
        assert_eq!(fig.x.label.as_deref(), Some("Time (ms)"));
        assert_eq!(fig.y.label.as_deref(), Some("ECOG Signal Amplitude (μV)"));
        let names: Vec<&str> = fig
            .series
            .iter()
            .map(|Series::Line(line)| line.name.as_str())
            .collect();
        assert_eq!(
            names,
            vec!["Finger 1", "Finger 2", "Finger 3", "Finger 4", "Finger 5"]
        );
        let Series::Line(first) = &fig.series[0];
        assert_eq!(first.points.len(), SEGMENT_LEN);
        assert_eq!(first.points[0][0], -200.0);
        assert_eq!(first.points[SEGMENT_LEN - 1][0], 1000.0);
    }

    #[test]
    fn bounds_cover_all_series() {
        let mut fig = Figure::new(None);
        assert!(fig.bounds().is_none());
        fig.add_series(Series::Line(LineSeries {
            name: "a".into(),
            points: vec![[0.0, 1.0], [2.0, -3.0]],
            style: Style {
                width: 1.0,
                color: Color(0),
            },
        }));
        fig.add_series(Series::Line(LineSeries {
            name: "b".into(),
            points: vec![[-1.0, 5.0]],
            style: Style {
                width: 1.0,
                color: Color(0),
            },
        }));
        assert_eq!(fig.bounds(), Some(((-1.0, 2.0), (-3.0, 5.0))));
    }

    #[test]
    fn bounds_skip_non_finite_points() {
        let mut fig = Figure::new(None);
        fig.add_series(Series::Line(LineSeries {
            name: "a".into(),
            points: vec![[0.0, f64::INFINITY], [1.0, 2.0], [2.0, f64::NAN], [3.0, -4.0]],
            style: Style {
                width: 1.0,
                color: Color(0),
            },
        }));
        assert_eq!(fig.bounds(), Some(((1.0, 3.0), (-4.0, 2.0))));
    }

    #[test]
    fn bounds_are_none_without_finite_points() {
        let mut fig = Figure::new(None);
        fig.add_series(Series::Line(LineSeries {
            name: "a".into(),
            points: vec![[0.0, f64::NAN], [1.0, f64::NEG_INFINITY]],
            style: Style {
                width: 1.0,
                color: Color(0),
            },
        }));
        assert!(fig.bounds().is_none());
    }

    #[test]
    fn color_splits_channels() {
        assert_eq!(Color(0x1F77B4).rgb(), (0x1F, 0x77, 0xB4));
    }
}
