use forecast_chart::api::{ChartConfig, PercentFormatter, build_chart_update};
use forecast_chart::core::{ForecastPayload, SlotLabels};
use std::fs;
use std::path::PathBuf;

const USAGE: &str = "usage: forecast_geometry_tool --input <payload.json> --output <path> [--width <px>] [--config <config.json>]";
const DEFAULT_WIDTH: u32 = 800;

#[derive(Debug)]
struct CliArgs {
    input: PathBuf,
    output: PathBuf,
    width: u32,
    config: Option<PathBuf>,
}

fn main() {
    let _ = forecast_chart::telemetry::init_default_tracing();
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args = parse_args()?;

    let config = match &args.config {
        Some(path) => ChartConfig::from_json_str(&read_file(path)?).map_err(|e| e.to_string())?,
        None => ChartConfig::default(),
    };
    let request = ForecastPayload::from_json_str(&read_file(&args.input)?)
        .and_then(ForecastPayload::into_request)
        .map_err(|e| e.to_string())?;
    let layout = config
        .layout_for_width(args.width)
        .map_err(|e| e.to_string())?;

    let update = build_chart_update(
        &request,
        layout,
        &SlotLabels::default(),
        config,
        &PercentFormatter,
    )
    .map_err(|e| e.to_string())?;
    let payload = update
        .to_json_contract_v1_pretty()
        .map_err(|e| e.to_string())?;
    fs::write(&args.output, payload)
        .map_err(|err| format!("failed to write `{}`: {err}", args.output.display()))
}

fn read_file(path: &PathBuf) -> Result<String, String> {
    fs::read_to_string(path).map_err(|err| format!("failed to read `{}`: {err}", path.display()))
}

fn parse_args() -> Result<CliArgs, String> {
    let mut args = std::env::args().skip(1);
    let mut input = None::<PathBuf>;
    let mut output = None::<PathBuf>;
    let mut width = DEFAULT_WIDTH;
    let mut config = None::<PathBuf>;

    while let Some(flag) = args.next() {
        match flag.as_str() {
            "--input" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --input".to_owned())?;
                input = Some(PathBuf::from(value));
            }
            "--output" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --output".to_owned())?;
                output = Some(PathBuf::from(value));
            }
            "--width" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --width".to_owned())?;
                width = value
                    .parse()
                    .map_err(|err| format!("invalid --width `{value}`: {err}"))?;
            }
            "--config" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --config".to_owned())?;
                config = Some(PathBuf::from(value));
            }
            "--help" | "-h" => return Err(USAGE.to_owned()),
            _ => return Err(format!("unknown argument `{flag}`")),
        }
    }

    Ok(CliArgs {
        input: input.ok_or_else(|| "missing --input".to_owned())?,
        output: output.ok_or_else(|| "missing --output".to_owned())?,
        width,
        config,
    })
}
