// src/plotting/mod.rs

//! PNG rendering of ground-state sweeps and Wigner functions.
//!
//! Text is rasterised with the bundled DejaVu Sans face through plotters'
//! `ab_glyph` backend, so no system font libraries are needed.

use crate::core::QprimerError;
use crate::optics::SweepResult;
use nalgebra::DMatrix;
use plotters::coord::Shift;
use plotters::coord::cartesian::Cartesian3d;
use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;
use plotters::style::{FontStyle, register_font};
use std::cmp::Reverse;
use std::f64::consts::TAU;
use std::path::Path;
use std::sync::OnceLock;
use tracing::info;

/// File name of the occupation-number plot.
pub const OCCUPATION_PLOT_FILE: &str = "photons in the groundstate.png";

/// File name of the Wigner surface plot.
pub const WIGNER_PLOT_FILE: &str = "Wigner function for the cavity groundstate (ultra-strong coupling to a qubit).png";

/// Values beyond `±WIGNER_COLOR_LIMIT` saturate the colour map.
pub const WIGNER_COLOR_LIMIT: f64 = 0.25;

const OCCUPATION_TITLE: &str = "# photons in the groundstate";
const WIGNER_TITLE: &str = "Wigner function for the cavity groundstate (ultra-strong coupling to a qubit)";

const OCCUPATION_SIZE: (u32, u32) = (800, 600);
const WIGNER_SIZE: (u32, u32) = (900, 600);
const COLOR_BAR_WIDTH: u32 = 110;
const COLOR_BAR_STEPS: usize = 64;

const FONT_FAMILY: &str = "sans-serif";
static DEJAVU_SANS: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans.ttf");

type WignerCoord = Cartesian3d<RangedCoordf64, RangedCoordf64, RangedCoordf64>;

fn plot_error<E: std::fmt::Display>(err: E) -> QprimerError {
    QprimerError::Plot {
        message: err.to_string(),
    }
}

/// Registers the bundled face under `sans-serif`, once per process.
fn ensure_font() -> Result<(), QprimerError> {
    static REGISTERED: OnceLock<bool> = OnceLock::new();
    let registered = *REGISTERED.get_or_init(|| register_font(FONT_FAMILY, FontStyle::Normal, DEJAVU_SANS).is_ok());
    if registered {
        Ok(())
    } else {
        Err(QprimerError::Plot {
            message: "bundled DejaVu Sans font could not be parsed".to_string(),
        })
    }
}

/// Padded `(min, max)` of `values`; a flat or empty series gets a unit span.
fn padded_range<'a>(values: impl IntoIterator<Item = &'a f64>) -> (f64, f64) {
    let (lo, hi) = values
        .into_iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
    if !lo.is_finite() || !hi.is_finite() {
        return (0.0, 1.0);
    }
    let span = hi - lo;
    if span <= f64::EPSILON {
        return (lo - 0.5, hi + 0.5);
    }
    (lo - 0.05 * span, hi + 0.05 * span)
}

/// Diverging red/white/blue map over `[-limit, limit]`: negative values red,
/// zero white, positive values blue.
pub fn diverging_color(value: f64, limit: f64) -> RGBColor {
    const RED: (f64, f64, f64) = (103.0, 0.0, 31.0);
    const WHITE_MID: (f64, f64, f64) = (247.0, 247.0, 247.0);
    const BLUE_END: (f64, f64, f64) = (5.0, 48.0, 97.0);

    let t = if limit > 0.0 {
        ((value / limit).clamp(-1.0, 1.0) + 1.0) / 2.0
    } else {
        0.5
    };
    let (from, to, s) = if t < 0.5 {
        (RED, WHITE_MID, t * 2.0)
    } else {
        (WHITE_MID, BLUE_END, (t - 0.5) * 2.0)
    };
    let lerp = |a: f64, b: f64| (a + (b - a) * s).round() as u8;
    RGBColor(lerp(from.0, to.0), lerp(from.1, to.1), lerp(from.2, to.2))
}

/// Draws cavity and atom occupation against `g / 2π` and saves it to `path`.
pub fn plot_occupations(path: &Path, sweep: &SweepResult) -> Result<(), QprimerError> {
    let root = BitMapBackend::new(path, OCCUPATION_SIZE).into_drawing_area();
    draw_occupations(&root, sweep)?;
    root.present().map_err(plot_error)?;
    info!(path = %path.display(), "wrote occupation plot");
    Ok(())
}

fn draw_occupations<DB: DrawingBackend>(root: &DrawingArea<DB, Shift>, sweep: &SweepResult) -> Result<(), QprimerError> {
    ensure_font()?;
    let xs: Vec<f64> = sweep.couplings().iter().map(|g| g / TAU).collect();
    let (x_min, x_max) = match (xs.first(), xs.last()) {
        (Some(&first), Some(&last)) if last > first => (first, last),
        (Some(&first), _) => (first - 0.5, first + 0.5),
        _ => return Err(QprimerError::invalid_parameter("sweep", "nothing to plot")),
    };
    let (_, y_max) = padded_range(sweep.cavity_occupation().iter().chain(sweep.atom_excitation()));

    root.fill(&WHITE).map_err(plot_error)?;
    let mut chart = ChartBuilder::on(root)
        .margin(20)
        .caption(OCCUPATION_TITLE, (FONT_FAMILY, 24))
        .x_label_area_size(45)
        .y_label_area_size(60)
        .build_cartesian_2d(x_min..x_max, 0.0..y_max.max(1e-3))
        .map_err(plot_error)?;

    chart
        .configure_mesh()
        .x_desc("g - coupling strength")
        .y_desc("Occupation probability")
        .draw()
        .map_err(plot_error)?;

    let series = [
        ("Cavity", sweep.cavity_occupation(), BLUE),
        ("Atom excited state", sweep.atom_excitation(), GREEN),
    ];
    for (label, values, color) in series {
        chart
            .draw_series(LineSeries::new(
                xs.iter().copied().zip(values.iter().copied()),
                color.stroke_width(2),
            ))
            .map_err(plot_error)?
            .label(label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(plot_error)?;
    Ok(())
}

/// Renders `w` (rows along `yvec`, columns along `xvec`) as a 3-D surface
/// with a colour bar and saves it to `path`.
pub fn plot_wigner_surface(path: &Path, xvec: &[f64], yvec: &[f64], w: &DMatrix<f64>) -> Result<(), QprimerError> {
    let root = BitMapBackend::new(path, WIGNER_SIZE).into_drawing_area();
    draw_wigner(&root, xvec, yvec, w)?;
    root.present().map_err(plot_error)?;
    info!(path = %path.display(), points = w.len(), "wrote Wigner surface");
    Ok(())
}

/// One grid cell of the surface: its `(x, W, p)` corners and the value
/// that picks its colour.
#[derive(Debug, Clone, PartialEq)]
struct SurfaceCell {
    corners: [(f64, f64, f64); 4],
    value: f64,
}

fn surface_cells(xvec: &[f64], yvec: &[f64], w: &DMatrix<f64>) -> Vec<SurfaceCell> {
    let corner = |row: usize, col: usize| (xvec[col], w[(row, col)], yvec[row]);
    let mut cells = Vec::with_capacity((xvec.len() - 1) * (yvec.len() - 1));
    for row in 0..yvec.len() - 1 {
        for col in 0..xvec.len() - 1 {
            let corners = [
                corner(row, col),
                corner(row, col + 1),
                corner(row + 1, col + 1),
                corner(row + 1, col),
            ];
            let value = corners.iter().map(|c| c.1).sum::<f64>() / 4.0;
            cells.push(SurfaceCell { corners, value });
        }
    }
    cells
}

/// Orders cells from the farthest to the nearest under `depth`, so that
/// painting them in sequence leaves the nearest surface on top.
fn sort_far_to_near(cells: &mut [SurfaceCell], depth: impl Fn(&(f64, f64, f64)) -> i32) {
    cells.sort_by_cached_key(|cell| Reverse(cell.corners.iter().map(|c| i64::from(depth(c))).sum::<i64>()));
}

fn draw_wigner<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    xvec: &[f64],
    yvec: &[f64],
    w: &DMatrix<f64>,
) -> Result<WignerCoord, QprimerError> {
    if w.nrows() != yvec.len() {
        return Err(QprimerError::dimension_mismatch(yvec.len(), w.nrows()));
    }
    if w.ncols() != xvec.len() {
        return Err(QprimerError::dimension_mismatch(xvec.len(), w.ncols()));
    }
    if xvec.len() < 2 || yvec.len() < 2 {
        return Err(QprimerError::invalid_parameter("grid", "surface needs at least 2 points per axis"));
    }
    ensure_font()?;
    let (x_lo, x_hi) = (xvec[0], xvec[xvec.len() - 1]);
    let (y_lo, y_hi) = (yvec[0], yvec[yvec.len() - 1]);
    let (w_lo, w_hi) = padded_range(w.iter());

    root.fill(&WHITE).map_err(plot_error)?;
    let body = root.titled(WIGNER_TITLE, (FONT_FAMILY, 20)).map_err(plot_error)?;
    let (surface_area, bar_area) = body.split_horizontally(body.dim_in_pixel().0.saturating_sub(COLOR_BAR_WIDTH));

    let mut chart = ChartBuilder::on(&surface_area)
        .margin(20)
        .build_cartesian_3d(x_lo..x_hi, w_lo..w_hi, y_lo..y_hi)
        .map_err(plot_error)?;

    chart.with_projection(|mut pb| {
        pb.yaw = -0.3;
        pb.pitch = 0.85;
        pb.scale = 0.8;
        pb.into_matrix()
    });

    chart
        .configure_axes()
        .light_grid_style(&BLACK.mix(0.15))
        .max_light_lines(3)
        .draw()
        .map_err(plot_error)?;

    // Polygons are painted in sequence without a depth buffer.
    let coord = chart.as_coord_spec().clone();
    let mut cells = surface_cells(xvec, yvec, w);
    sort_far_to_near(&mut cells, |(x, value, p)| coord.projected_depth(x, value, p));
    chart
        .draw_series(cells.into_iter().map(|cell| {
            Polygon::new(
                cell.corners.to_vec(),
                diverging_color(cell.value, WIGNER_COLOR_LIMIT).filled(),
            )
        }))
        .map_err(plot_error)?;

    draw_color_bar(&bar_area)?;
    Ok(coord)
}

fn draw_color_bar<DB: DrawingBackend>(area: &DrawingArea<DB, Shift>) -> Result<(), QprimerError> {
    let mut bar = ChartBuilder::on(area)
        .margin_top(60)
        .margin_bottom(60)
        .margin_right(20)
        .y_label_area_size(50)
        .build_cartesian_2d(0.0..1.0, -WIGNER_COLOR_LIMIT..WIGNER_COLOR_LIMIT)
        .map_err(plot_error)?;

    bar.configure_mesh()
        .disable_mesh()
        .disable_x_axis()
        .y_labels(5)
        .y_label_formatter(&|v| format!("{v:.2}"))
        .draw()
        .map_err(plot_error)?;

    let step = 2.0 * WIGNER_COLOR_LIMIT / COLOR_BAR_STEPS as f64;
    bar.draw_series((0..COLOR_BAR_STEPS).map(|i| {
        let lo = -WIGNER_COLOR_LIMIT + step * i as f64;
        Rectangle::new(
            [(0.0, lo), (1.0, lo + step)],
            diverging_color(lo + step / 2.0, WIGNER_COLOR_LIMIT).filled(),
        )
    }))
    .map_err(plot_error)?;
    Ok(())
}
