//! Command-line contour editor
//!
//! Reads a curve instance from JSON, moves, scales or rotates the selected
//! control points and writes the replacement instance.
//!
//! ```text
//! edit_contour -i profile.json --list
//! edit_contour -i profile.json -o out.json -p 0,3 move 1 0 0
//! edit_contour -i profile.json -p 2 rotate --pivot 0 0 0 --axis 0 0 1 --degrees 45
//! ```

use clap::{Parser, Subcommand};
use log::{error, info};
use std::path::PathBuf;
use std::process::ExitCode;

use contour_edit::io::{read_instance, write_instance_to, write_instance};
use contour_edit::{
    EditSettings, ModifyContourPoints, Pnt, PointTransform, Result, SpaceInstance, Vec3,
};

/// Edit contour control points from the command line
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct CliArgs {
    /// JSON file holding the instance to edit
    #[arg(short, long)]
    input: PathBuf,

    /// Where to write the result (stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Control-point indices to transform, comma separated
    #[arg(short, long, value_delimiter = ',')]
    points: Vec<usize>,

    /// TOML file overriding the edit thresholds
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Convert non-contour curves into a contour before binding
    #[arg(long, default_value_t = false)]
    normalize: bool,

    /// Print the control-point index and exit
    #[arg(long, default_value_t = false)]
    list: bool,

    #[command(subcommand)]
    transform: Option<TransformCommand>,
}

#[derive(Subcommand, Debug)]
enum TransformCommand {
    /// Translate by DX DY DZ
    Move {
        #[arg(num_args = 3, allow_negative_numbers = true)]
        delta: Vec<f64>,
    },
    /// Scale about a pivot
    Scale {
        #[arg(
            long,
            num_args = 3,
            allow_negative_numbers = true,
            default_values_t = [0.0, 0.0, 0.0]
        )]
        pivot: Vec<f64>,
        #[arg(long, num_args = 3, allow_negative_numbers = true)]
        factors: Vec<f64>,
    },
    /// Rotate about the line through a pivot
    Rotate {
        #[arg(
            long,
            num_args = 3,
            allow_negative_numbers = true,
            default_values_t = [0.0, 0.0, 0.0]
        )]
        pivot: Vec<f64>,
        #[arg(
            long,
            num_args = 3,
            allow_negative_numbers = true,
            default_values_t = [0.0, 0.0, 1.0]
        )]
        axis: Vec<f64>,
        #[arg(long, allow_negative_numbers = true)]
        degrees: f64,
    },
}

impl TransformCommand {
    fn to_transform(&self) -> PointTransform {
        match self {
            TransformCommand::Move { delta } => PointTransform::translate(vec3(delta)),
            TransformCommand::Scale { pivot, factors } => {
                PointTransform::scale(pnt(pivot), vec3(factors))
            }
            TransformCommand::Rotate {
                pivot,
                axis,
                degrees,
            } => PointTransform::rotate_degrees(pnt(pivot), vec3(axis), *degrees),
        }
    }
}

fn vec3(c: &[f64]) -> Vec3 {
    Vec3::new(c[0], c[1], c[2])
}

fn pnt(c: &[f64]) -> Pnt {
    Pnt::new(c[0], c[1], c[2])
}

fn main() -> ExitCode {
    env_logger::init();
    let args = CliArgs::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.is_no_op() => {
            info!("Nothing to do: {}", e);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            eprintln!("edit_contour: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &CliArgs) -> Result<()> {
    let settings = match &args.settings {
        Some(path) => EditSettings::load(path)?,
        None => EditSettings::default(),
    };

    let mut instance = read_instance(&args.input)?;
    if args.normalize && instance.curve.as_contour().is_none() {
        let contour = ModifyContourPoints::prepare(&instance)?;
        instance = SpaceInstance {
            name: instance.name,
            curve: contour.into(),
        };
    }

    let mut edit = ModifyContourPoints::bind_instance(&instance)?.with_settings(settings);

    if args.list {
        for (i, cp) in edit.control_point_info().iter().enumerate() {
            println!(
                "{:4}  segment {:3}  {:8}  ({:.6}, {:.6}, {:.6})",
                i,
                cp.segment_index,
                format!("{:?}", cp.limit),
                cp.origin.x,
                cp.origin.y,
                cp.origin.z
            );
        }
        return Ok(());
    }

    let Some(command) = &args.transform else {
        info!("No transform given; use --list to inspect control points");
        return Ok(());
    };

    edit.set_control_points(args.points.iter().copied())?;
    let transform = command.to_transform();
    let result = edit.commit(&transform)?;

    match &args.output {
        Some(path) => {
            write_instance(&result, path)?;
            info!("Wrote {}", path.display());
        }
        None => write_instance_to(&result, std::io::stdout().lock())?,
    }
    Ok(())
}
