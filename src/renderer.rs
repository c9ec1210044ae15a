//! # Day Chart Rendering
//!
//! Draws a [`TideCurve`] as a text chart for terminals. One column per
//! sample, heights in metres on the Y axis, midnight to midnight on the X
//! axis.

use crate::TideCurve;

/// Width reserved for the Y-axis labels and the axis line.
const Y_AXIS_WIDTH: usize = 8;

/// Render the chart into lines of text.
///
/// `rows` is the plot height (at least 2). Returns no lines for an empty
/// curve.
pub fn render_ascii(curve: &TideCurve, rows: usize) -> Vec<String> {
    let rows = rows.max(2);
    let Some((min_mm, max_mm)) = curve.range_mm() else {
        return Vec::new();
    };
    let span = (max_mm - min_mm).max(1.0);
    let sample_count = curve.samples.len();

    let height_to_row = |height_mm: f64| {
        let normalized = (height_mm - min_mm) / span;
        ((1.0 - normalized) * (rows as f64 - 1.0)).round() as usize
    };

    let mut grid = vec![vec![' '; sample_count + Y_AXIS_WIDTH]; rows];

    // Y-axis: label the top, middle and bottom rows
    for (row, height_mm) in [
        (0, max_mm),
        (height_to_row((min_mm + max_mm) / 2.0), (min_mm + max_mm) / 2.0),
        (rows - 1, min_mm),
    ] {
        let label = format!("{:>6.1}", height_mm / 1000.0);
        for (i, ch) in label.chars().take(Y_AXIS_WIDTH - 2).enumerate() {
            grid[row][i] = ch;
        }
    }
    for line in grid.iter_mut() {
        line[Y_AXIS_WIDTH - 1] = '│';
    }

    for (column, sample) in curve.samples.iter().enumerate() {
        let row = height_to_row(sample.height_mm).min(rows - 1);
        grid[row][column + Y_AXIS_WIDTH] = '•';
    }

    let mut lines: Vec<String> = grid
        .into_iter()
        .map(|row| row.into_iter().collect::<String>().trim_end().to_string())
        .collect();

    // Hour ticks below the chart, on the first sample at or past each hour
    let padding = " ".repeat(Y_AXIS_WIDTH);
    let mut previous_hour = None;
    let ticks: String = curve
        .samples
        .iter()
        .map(|sample| {
            let hour = sample.minute / 60;
            let tick = previous_hour.map_or(true, |previous| hour > previous);
            previous_hour = Some(hour);
            if tick {
                '|'
            } else {
                ' '
            }
        })
        .collect();
    lines.push(format!("{padding}{ticks}"));

    let labels = format!(
        "{:<half$}{:<rest$}{}",
        "00h",
        "12h",
        "24h",
        half = sample_count / 2,
        rest = sample_count.saturating_sub(sample_count / 2 + 3),
    );
    lines.push(format!("{padding}{labels}"));

    lines
}

/// Print the chart to stdout.
pub fn draw_ascii(curve: &TideCurve, rows: usize) {
    for line in render_ascii(curve, rows) {
        println!("{line}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Sample;

    fn test_curve() -> TideCurve {
        TideCurve {
            samples: (0..=24)
                .map(|hour| Sample {
                    minute: hour * 60,
                    height_mm: 3000.0 + 2000.0 * (f64::from(hour) * 0.5).cos(),
                })
                .collect(),
            step_minutes: 60,
        }
    }

    #[test]
    fn test_render_dimensions() {
        let lines = render_ascii(&test_curve(), 10);
        // Plot rows plus tick and label lines
        assert_eq!(lines.len(), 12);
        assert!(lines[0].starts_with("   5.0 │"));
        assert!(lines[9].starts_with("   1.0 │"));
    }

    #[test]
    fn test_every_sample_is_plotted() {
        let lines = render_ascii(&test_curve(), 10);
        let points: usize = lines[..10]
            .iter()
            .map(|line| line.chars().filter(|&c| c == '•').count())
            .sum();
        assert_eq!(points, 25);
    }

    #[test]
    fn test_hour_ticks() {
        let lines = render_ascii(&test_curve(), 10);
        let ticks = &lines[10];
        assert_eq!(ticks.chars().filter(|&c| c == '|').count(), 25);
    }

    #[test]
    fn test_wide_labels_are_kept_whole() {
        let curve = TideCurve {
            samples: vec![
                Sample { minute: 0, height_mm: -10_000.0 },
                Sample { minute: 720, height_mm: 12_500.0 },
                Sample { minute: 1440, height_mm: -10_000.0 },
            ],
            step_minutes: 720,
        };
        let lines = render_ascii(&curve, 5);
        assert!(lines[0].starts_with("  12.5 │"), "{:?}", lines[0]);
        assert!(lines[4].starts_with(" -10.0 │"), "{:?}", lines[4]);
    }

    #[test]
    fn test_hour_ticks_with_uneven_step() {
        let curve = TideCurve {
            samples: (0..=32)
                .map(|i| Sample {
                    minute: i * 45,
                    height_mm: 3000.0,
                })
                .collect(),
            step_minutes: 45,
        };
        let lines = render_ascii(&curve, 4);
        let ticks: Vec<usize> = lines[4]
            .char_indices()
            .filter(|&(_, c)| c == '|')
            .map(|(i, _)| i - Y_AXIS_WIDTH)
            .collect();
        // Midnight plus one tick per hour: 01:30, 02:15, 03:00, 04:30, ...
        assert_eq!(ticks.len(), 25);
        assert_eq!(&ticks[..5], &[0, 2, 3, 4, 6]);
    }

    #[test]
    fn test_flat_and_empty_curves() {
        let flat = TideCurve {
            samples: vec![
                Sample { minute: 0, height_mm: 1000.0 },
                Sample { minute: 720, height_mm: 1000.0 },
            ],
            step_minutes: 720,
        };
        assert!(!render_ascii(&flat, 5).is_empty());

        let empty = TideCurve {
            samples: vec![],
            step_minutes: 30,
        };
        assert!(render_ascii(&empty, 5).is_empty());
    }
}
