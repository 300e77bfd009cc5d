use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use graphcalc::{evaluator, parse, Graph, ParameterSet, PixelBounds};
use serde_json::json;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Evaluate an expression at a single x
  Eval {
    /// The function expression, e.g. "a*sin(b*x + c)"
    expression: String,
    #[arg(short, long, default_value_t = 0.0, allow_hyphen_values = true)]
    x: f64,
    #[arg(short, long, allow_hyphen_values = true)]
    a: Option<f64>,
    #[arg(short, long, allow_hyphen_values = true)]
    b: Option<f64>,
    #[arg(short, long, allow_hyphen_values = true)]
    c: Option<f64>,
  },
  /// Sample an expression over a viewport and print the frame as JSON
  Sample {
    expression: String,
    #[arg(long, default_value_t = -10.0, allow_hyphen_values = true)]
    x_min: f64,
    #[arg(long, default_value_t = 10.0, allow_hyphen_values = true)]
    x_max: f64,
    #[arg(long, default_value_t = -5.0, allow_hyphen_values = true)]
    y_min: f64,
    #[arg(long, default_value_t = 5.0, allow_hyphen_values = true)]
    y_max: f64,
    /// Drawing surface size in pixels
    #[arg(long, default_value_t = 800.0)]
    width: f64,
    #[arg(long, default_value_t = 400.0)]
    height: f64,
  },
}

fn main() -> Result<()> {
  let cli = Cli::parse();

  match cli.command {
    Commands::Eval {
      expression,
      x,
      a,
      b,
      c,
    } => {
      let ast = parse(&expression)?
        .ok_or_else(|| anyhow!("empty expression"))?;
      let mut params = ParameterSet::default();
      params.set(a, b, c);
      let value = evaluator::evaluate(&ast, x, &params)
        .with_context(|| format!("cannot evaluate at x = {x}"))?;
      println!("{value}");
    }
    Commands::Sample {
      expression,
      x_min,
      x_max,
      y_min,
      y_max,
      width,
      height,
    } => {
      let mut graph = Graph::new();
      graph.set_viewport(x_min, x_max, y_min, y_max)?;
      let id = graph.add_function(&expression, None);
      let frame = graph.render(&PixelBounds::new(0.0, 0.0, width, height));
      let (_, validation) = &frame.validity[0];
      if !validation.ok {
        return Err(anyhow!(
          validation.message.clone().unwrap_or_default()
        ));
      }
      let curves: Vec<_> = frame
        .curves
        .iter()
        .map(|c| {
          json!({
            "id": c.id,
            "polylines": c.polylines,
          })
        })
        .collect();
      let ticks = |ticks: &[graphcalc::Tick]| -> Vec<serde_json::Value> {
        ticks
          .iter()
          .map(|t| json!({ "value": t.value, "pixel": t.pixel, "label": t.label }))
          .collect()
      };
      let output = json!({
        "function": { "id": id, "expression": expression },
        "curves": curves,
        "axes": {
          "x_ticks": ticks(&frame.axes.x_ticks),
          "y_ticks": ticks(&frame.axes.y_ticks),
          "x_axis": frame.axes.x_axis,
          "y_axis": frame.axes.y_axis,
        },
      });
      println!("{}", serde_json::to_string_pretty(&output)?);
    }
  }

  Ok(())
}
