//! `recotool` CLI: inspect geometry identifiers and curvilinear track parameters.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use event_data::{
    ChargePolicy, CurvilinearParameters, CurvilinearTrackParameters, NeutralCurvilinearParameters,
    Qop, TrackParameters, TransformConfig, Vector3,
};
use geometry::{GeometryId, Surface};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "recotool", about = "Geometry id and track parameter inspection")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Geometry identifier encode / decode.
    #[command(subcommand)]
    Id(IdCommand),
    /// Convert a global track state to curvilinear parameters (JSON output).
    Curvilinear(CurvilinearArgs),
}

#[derive(Subcommand)]
enum IdCommand {
    /// Split a raw value (decimal or 0x-prefixed hex) into its levels.
    Decode {
        #[arg(value_parser = parse_raw_id)]
        value: u64,
    },
    /// Pack per-level values into a raw identifier.
    Encode {
        #[arg(long, default_value_t = 0)]
        volume: u64,
        #[arg(long, default_value_t = 0)]
        boundary: u64,
        #[arg(long, default_value_t = 0)]
        layer: u64,
        #[arg(long, default_value_t = 0)]
        approach: u64,
        #[arg(long, default_value_t = 0)]
        sensitive: u64,
    },
    /// Parse the bracketed `[ v | b | l | a | s ]` form.
    Parse { text: String },
}

#[derive(Args)]
struct CurvilinearArgs {
    /// Global position x,y,z (mm)
    #[arg(long, value_parser = parse_vec3, allow_hyphen_values = true)]
    position: Vector3,
    /// Global momentum x,y,z (GeV)
    #[arg(long, value_parser = parse_vec3, allow_hyphen_values = true)]
    momentum: Vector3,
    /// Signed charge (e)
    #[arg(long, default_value_t = 1.0, allow_hyphen_values = true, conflicts_with = "neutral")]
    charge: f64,
    /// Treat the track as neutral
    #[arg(long)]
    neutral: bool,
    /// Overwrite q/p after construction
    #[arg(long, allow_hyphen_values = true)]
    set_qop: Option<f64>,
    /// Transform config (JSON)
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Id(cmd) => run_id(cmd)?,
        Commands::Curvilinear(args) => run_curvilinear(args)?,
    }

    Ok(())
}

fn run_id(cmd: IdCommand) -> Result<()> {
    let id = resolve_id(cmd)?;
    println!("{}", describe_id(&id));
    Ok(())
}

fn resolve_id(cmd: IdCommand) -> Result<GeometryId> {
    let id = match cmd {
        IdCommand::Decode { value } => GeometryId::new(value),
        IdCommand::Encode {
            volume,
            boundary,
            layer,
            approach,
            sensitive,
        } => {
            let mut id = GeometryId::default();
            id.set_volume(volume)
                .set_boundary(boundary)
                .set_layer(layer)
                .set_approach(approach)
                .set_sensitive(sensitive);
            id
        }
        IdCommand::Parse { text } => text
            .parse::<GeometryId>()
            .with_context(|| format!("parsing geometry id {text:?}"))?,
    };
    Ok(id)
}

/// Rendered form, raw value and per-level values, one per line.
fn describe_id(id: &GeometryId) -> String {
    format!(
        "{id}\nvalue: {} (0x{:016x})\nvolume={} boundary={} layer={} approach={} sensitive={}",
        id.value(),
        id.value(),
        id.volume(),
        id.boundary(),
        id.layer(),
        id.approach(),
        id.sensitive()
    )
}

#[derive(Serialize)]
struct SurfaceReport {
    center: [f64; 3],
    normal: [f64; 3],
}

#[derive(Serialize)]
struct CurvilinearReport {
    parameters: [f64; 5],
    position: [f64; 3],
    momentum: [f64; 3],
    charge: f64,
    pt: f64,
    eta: f64,
    surface: SurfaceReport,
}

fn run_curvilinear(args: CurvilinearArgs) -> Result<()> {
    let config = match &args.config {
        Some(path) => TransformConfig::load_json(path)?,
        None => TransformConfig::default(),
    };
    tracing::debug!(?config, "transform config");

    let report = if args.neutral {
        let mut state =
            NeutralCurvilinearParameters::with_config(None, args.position, args.momentum, &config);
        build_report(&mut state, args.set_qop)
    } else {
        let mut state = CurvilinearTrackParameters::with_config(
            None,
            args.position,
            args.momentum,
            args.charge,
            &config,
        );
        build_report(&mut state, args.set_qop)
    };

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn build_report<C: ChargePolicy>(
    state: &mut CurvilinearParameters<C>,
    set_qop: Option<f64>,
) -> CurvilinearReport {
    if let Some(qop) = set_qop {
        state.set::<Qop>(qop);
    }

    let surface = state.associated_surface();
    let surface = SurfaceReport {
        center: (*surface.center()).into(),
        normal: surface.normal().into(),
    };

    let p = state.parameters();
    CurvilinearReport {
        parameters: [p[0], p[1], p[2], p[3], p[4]],
        position: (*state.position()).into(),
        momentum: (*state.momentum()).into(),
        charge: state.charge(),
        pt: state.pt(),
        eta: state.eta(),
        surface,
    }
}

/// Parse `x,y,z` into a vector.
fn parse_vec3(s: &str) -> Result<Vector3, String> {
    let parts = s
        .split(',')
        .map(|c| c.trim().parse::<f64>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| format!("invalid component in {s:?}: {e}"))?;
    match parts.as_slice() {
        [x, y, z] => Ok(Vector3::new(*x, *y, *z)),
        _ => Err(format!("expected 3 comma-separated components, got {}", parts.len())),
    }
}

fn parse_raw_id(s: &str) -> Result<u64, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => s.parse::<u64>(),
    };
    parsed.map_err(|e| format!("invalid geometry id {s:?}: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vec3_argument() {
        assert_eq!(parse_vec3("1, -2.5,3").unwrap(), Vector3::new(1.0, -2.5, 3.0));
        assert!(parse_vec3("1,2").is_err());
        assert!(parse_vec3("1,a,2").is_err());
    }

    #[test]
    fn raw_id_argument() {
        assert_eq!(parse_raw_id("0x0102003040000005").unwrap(), 0x0102_0030_4000_0005);
        assert_eq!(parse_raw_id("42").unwrap(), 42);
        assert!(parse_raw_id("0xzz").is_err());
    }

    #[test]
    fn report_for_beam_axis_track() {
        let mut state =
            CurvilinearTrackParameters::new(None, Vector3::zeros(), Vector3::new(0.0, 0.0, 2.0), 1.0);
        let report = build_report(&mut state, Some(0.25));
        assert_eq!(report.parameters[0], 0.0);
        assert_eq!(report.parameters[4], 0.25);
        assert!((report.momentum[2] - 4.0).abs() < 1e-12);
        assert_eq!(report.surface.normal, [0.0, 0.0, 1.0]);
    }

    fn id_command(args: &[&str]) -> IdCommand {
        let argv = ["recotool", "id"].iter().chain(args).copied();
        let cli = Cli::try_parse_from(argv).unwrap();
        match cli.command {
            Commands::Id(cmd) => cmd,
            Commands::Curvilinear(_) => panic!("expected an id command"),
        }
    }

    #[test]
    fn encode_prints_rendered_id() {
        let cmd = id_command(&[
            "encode", "--volume", "1", "--boundary", "2", "--layer", "3", "--approach", "4",
            "--sensitive", "5",
        ]);
        let id = resolve_id(cmd).unwrap();
        let text = describe_id(&id);
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("[   1 |   2 |   3 |   4 |    5 ]"));
        let raw = 0x0102_0030_4000_0005_u64;
        assert_eq!(lines.next(), Some(format!("value: {raw} (0x0102003040000005)").as_str()));
        assert_eq!(
            lines.next(),
            Some("volume=1 boundary=2 layer=3 approach=4 sensitive=5")
        );
    }

    #[test]
    fn parse_round_trips_encode() {
        let encoded =
            resolve_id(id_command(&["encode", "--layer", "7", "--sensitive", "12"])).unwrap();
        let parsed = resolve_id(id_command(&["parse", &encoded.to_string()])).unwrap();
        assert_eq!(parsed, encoded);
        assert!(describe_id(&parsed)
            .ends_with("volume=0 boundary=0 layer=7 approach=0 sensitive=12"));
    }

    #[test]
    fn parse_error_names_the_input() {
        let err = resolve_id(id_command(&["parse", "1 | 2 | 3"])).unwrap_err();
        assert_eq!(err.to_string(), "parsing geometry id \"1 | 2 | 3\"");
        let cause = err.root_cause().to_string();
        assert!(cause.contains("brackets"), "unexpected cause: {cause}");
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
