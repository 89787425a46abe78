use plotters::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing_subscriber::EnvFilter;

use curvelab::{CurveInput, Point2, DEFAULT_BEZIER_SAMPLES, DEFAULT_CURVE_SAMPLES};

fn tuples(points: &[Point2<f64>]) -> Vec<(f64, f64)> {
    points.iter().map(|&p| p.into()).collect()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // pass a seed to get a different curve
    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(3u64);
    let input = CurveInput::random(&mut ChaCha8Rng::seed_from_u64(seed))?;
    tracing::info!(
        points = input.points.len(),
        degree = ?input.degree,
        "plotting random curve"
    );

    let plot = input.plot(DEFAULT_CURVE_SAMPLES, true)?;
    let bezier = input.bezier()?;
    let construction = bezier.construction(0.5);

    let root = BitMapBackend::new("curves.png", (800, 600)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("B-spline of degree {:?} and its Bezier curve", input.degree),
            ("sans-serif", 21).into_font(),
        )
        .margin(5)
        .x_label_area_size(30)
        .y_label_area_size(30)
        .build_cartesian_2d(-1f64..11f64, -1f64..11f64)?;

    chart.configure_mesh().draw()?;

    // control polygon
    chart
        .draw_series(LineSeries::new(tuples(&input.points), &BLUE))?
        .label("Control Polygon")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE));
    chart.draw_series(PointSeries::of_element(
        tuples(&input.points),
        4,
        &BLUE,
        &|coord, size, style| EmptyElement::at(coord) + Circle::new((0, 0), size, style.filled()),
    ))?;

    chart
        .draw_series(LineSeries::new(tuples(&plot.curve), &RED))?
        .label("B-spline")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED));

    if let Some(markers) = &plot.knot_markers {
        chart
            .draw_series(PointSeries::of_element(
                tuples(markers),
                5,
                &BLACK,
                &|coord, size, style| EmptyElement::at(coord) + Cross::new((0, 0), size, style),
            ))?
            .label("Knots")
            .legend(|(x, y)| Cross::new((x + 10, y), 5, BLACK));
    }

    chart
        .draw_series(LineSeries::new(
            tuples(&bezier.sample(DEFAULT_BEZIER_SAMPLES)),
            &MAGENTA,
        ))?
        .label("Bezier")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], MAGENTA));

    // de Casteljau levels at t = 0.5
    for level in construction.levels() {
        chart.draw_series(LineSeries::new(tuples(level), &GREEN.mix(0.6)))?;
    }
    let (cx, cy): (f64, f64) = construction.point().into();
    chart.draw_series(std::iter::once(Circle::new((cx, cy), 5, GREEN.filled())))?;

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}
