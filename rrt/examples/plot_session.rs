use plotters::prelude::*;
use tracing::info;
use tracing_subscriber::EnvFilter;

use rrt::{Point, RRTBuilder, Step};

fn px(p: &Point) -> (i32, i32) {
    (p.x.round() as i32, p.y.round() as i32)
}

/// Runs a default session one step at a time, drawing each edge as it is added like an animation
/// frame would, and writes the final frame to `session.png`.
///
/// Usage: `cargo run --example plot_session [seed]`. Set `RUST_LOG=rrt=debug` to follow along.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let seed: Option<u64> = std::env::args().nth(1).map(|s| s.parse()).transpose()?;

    let mut builder = RRTBuilder::new_kd();
    if let Some(seed) = seed {
        builder = builder.with_seed(seed);
    }
    let mut planner = builder.build()?;

    let workspace = *planner.workspace();
    let root = BitMapBackend::new("session.png", (workspace.width() as u32, workspace.height() as u32))
        .into_drawing_area();
    root.fill(&WHITE)?;

    let soft_red = RGBColor(200, 50, 50);
    for obstacle in planner.obstacles() {
        root.draw(&Circle::new(
            px(&obstacle.center),
            obstacle.radius.round() as i32,
            ShapeStyle::from(&soft_red).filled(),
        ))?;
    }

    let goal = planner.goal();
    root.draw(&Circle::new(
        px(&goal.center),
        goal.radius.round() as i32,
        ShapeStyle::from(&GREEN.mix(0.4)).filled(),
    ))?;
    root.draw(&Circle::new(
        px(&planner.config().start),
        5,
        ShapeStyle::from(&MAGENTA).filled(),
    ))?;

    let edge_color = RGBColor(0, 0, 0).mix(0.5);
    let mut drawn = planner.tree().size();

    loop {
        let step = match planner.step() {
            Ok(step) => step,
            Err(err) => {
                eprintln!("{}", err);
                break;
            }
        };

        for (parent, child) in planner.tree().edges_since(drawn) {
            root.draw(&PathElement::new(vec![px(&parent), px(&child)], ShapeStyle::from(&edge_color)))?;
        }
        drawn = planner.tree().size();

        if let Step::GoalReached { .. } | Step::Idle = step {
            break;
        }
    }

    if let Some(path) = planner.path() {
        info!(waypoints = path.len(), length = path.length, "drawing path");

        let series: Vec<_> = path.waypoints.iter().map(px).collect();
        root.draw(&PathElement::new(series.clone(), ShapeStyle::from(&BLUE).stroke_width(3)))?;

        for coord in series {
            root.draw(&Circle::new(coord, 3, ShapeStyle::from(&BLUE).filled()))?;
        }
    } else {
        eprintln!("No solution was found!");
    }

    root.present()?;
    Ok(())
}
