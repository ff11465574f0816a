use std::time::Instant;

use clap::Parser;
use log::info;

use fractal_cells::{Command, FractalRenderer, RenderError, RenderSettings, RenderStatus};

/// Renders one frame of an escape-time fractal after applying a list of view commands.
#[derive(Debug, Parser)]
#[clap(name = "fractal_cells", version, author)]
struct Options {
    /// TOML settings file
    #[clap(short, long, value_name = "FILE")]
    config: Option<String>,

    /// Output PNG, overrides the settings file
    #[clap(short, long, value_name = "FILE")]
    output: Option<String>,

    /// up, down, left, right, in:RE,IM, out:RE,IM or rect:I0,J0,I1,J1
    #[clap(short, long = "action", value_name = "ACTION", multiple_occurrences = true)]
    actions: Vec<Command>,
}

fn main() -> Result<(), RenderError> {
    env_logger::init();

    let options = Options::parse();

    let mut settings = match &options.config {
        Some(path) => RenderSettings::from_file(path)?,
        None => RenderSettings::default(),
    };

    if let Some(output) = options.output {
        settings.output = output;
    }

    let time = Instant::now();

    let mut renderer = FractalRenderer::from_settings(&settings)?;

    println!("{:<14}{:>6} ms", "Initial", time.elapsed().as_millis());

    for command in options.actions {
        let time = Instant::now();

        if renderer.apply(command)? == RenderStatus::Cancelled {
            info!("{:?} was cancelled", command);
        }

        println!("{:<14}{:>6} ms", "Command", time.elapsed().as_millis());
    }

    let time = Instant::now();

    renderer.image().save(&settings.output)?;

    println!("{:<14}{:>6} ms", "Saving", time.elapsed().as_millis());

    let viewport = renderer.viewport();
    println!("{:<14}{} .. {}", "Viewport", viewport.min, viewport.max);

    Ok(())
}
