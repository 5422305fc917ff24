//! Command-line front end of the home advisor.

use std::collections::BTreeMap;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser};
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use fuzzy_home_advisor::config::{AdvisorConfig, OutputFormat};
use fuzzy_home_advisor::home::{
    Advice, CrispInput, Decision, HomeAdvisor, HomeTerm, Recommendations, RuleFiring, Sensor,
};

#[derive(Parser, Debug)]
#[command(name = "fuzzy-home-advisor", version)]
#[command(about = "Recommends lamp, climate and water heater targets from sensor readings")]
struct Args {
    /// Outdoor brightness, 0-100 %
    #[arg(long, value_name = "PERCENT", allow_negative_numbers = true)]
    outdoor_brightness: Option<f64>,

    /// Current lamp brightness, 0-100 %
    #[arg(long, value_name = "PERCENT", allow_negative_numbers = true)]
    lamp_brightness: Option<f64>,

    /// Indoor temperature, 0-40 °C
    #[arg(long, value_name = "CELSIUS", allow_negative_numbers = true)]
    indoor_temperature: Option<f64>,

    /// Water heater temperature, 20-80 °C
    #[arg(long, value_name = "CELSIUS", allow_negative_numbers = true)]
    water_heater_temperature: Option<f64>,

    /// Relative humidity, 0-100 %
    #[arg(long, value_name = "PERCENT", allow_negative_numbers = true)]
    humidity: Option<f64>,

    /// Output format (text, json)
    #[arg(short, long)]
    format: Option<OutputFormat>,

    /// Also report input memberships and fired rules
    #[arg(long)]
    explain: bool,

    /// Configuration file
    #[arg(short, long, value_name = "PATH", conflicts_with = "no_config")]
    config: Option<PathBuf>,

    /// Ignore configuration files
    #[arg(long)]
    no_config: bool,

    /// Raise log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn reading(&self, sensor: Sensor) -> Option<f64> {
        match sensor {
            Sensor::OutdoorBrightness => self.outdoor_brightness,
            Sensor::LampBrightness => self.lamp_brightness,
            Sensor::IndoorTemperature => self.indoor_temperature,
            Sensor::WaterHeaterTemperature => self.water_heater_temperature,
            Sensor::Humidity => self.humidity,
        }
    }
}

fn main() -> ExitCode {
    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<()> {
    let mut config = if args.no_config {
        AdvisorConfig::load_defaults()
    } else {
        AdvisorConfig::load(args.config.as_deref())
    }
    .context("Failed to load configuration")?;

    if let Some(format) = args.format {
        config.output.format = format;
    }
    config.output.explain |= args.explain;

    init_tracing(&config.log.level, args.verbose)?;
    debug!(?config, "configuration loaded");

    let model = config.inference().context("Invalid inference settings")?;
    let advisor = HomeAdvisor::with_inference(model).context("Invalid knowledge base")?;
    let input = collect_input(&advisor, &args)?;

    info!(?input, "readings collected");

    let recommendations = advisor.infer(&input).context("Inference failed")?;
    let advice = recommendations.advise(&input);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match config.output.format {
        OutputFormat::Text => write_text(&mut out, &advisor, &input, &recommendations, &advice, config.output.explain)?,
        OutputFormat::Json => {
            let report = Report::new(&advisor, &input, &recommendations, &advice, config.output.explain)?;

            serde_json::to_writer_pretty(&mut out, &report).context("Failed to write report")?;
            writeln!(out)?;
        }
    }

    Ok(())
}

fn init_tracing(level: &str, verbose: u8) -> Result<()> {
    let directive = match verbose {
        0 => level,
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(directive).with_context(|| format!("Invalid log filter `{directive}`"))?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    Ok(())
}

/// Takes readings from flags, prompting on stdin for the rest. A flag out of
/// range is an error; a typed answer out of range is asked again.
fn collect_input(advisor: &HomeAdvisor, args: &Args) -> Result<CrispInput> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut input = CrispInput::default();

    for sensor in Sensor::ALL {
        let value = match args.reading(sensor) {
            Some(value) => advisor.check_reading(sensor, value)?,
            None => prompt(advisor, sensor, &mut lines)?,
        };

        input.set(sensor, value);
    }

    Ok(input)
}

fn prompt(advisor: &HomeAdvisor, sensor: Sensor, lines: &mut impl Iterator<Item = io::Result<String>>) -> Result<f64> {
    let range = sensor.range();
    let mut err = io::stderr();

    loop {
        write!(err, "{sensor} [{}-{}{}] = ", range.start(), range.end(), sensor.unit())?;
        err.flush()?;

        let line = match lines.next() {
            Some(line) => line.context("Failed to read from stdin")?,
            None => bail!("Input ended before {} was entered", sensor.label().to_lowercase()),
        };
        let answer = line.trim();

        if answer.is_empty() {
            continue;
        }

        match answer.parse::<f64>() {
            Ok(value) => match advisor.check_reading(sensor, value) {
                Ok(value) => return Ok(value),
                Err(e) => writeln!(err, "OUT OF RANGE! {e}")?,
            }
            Err(_) => writeln!(err, "Not a number: `{answer}`")?,
        }
    }
}

fn write_text(
    out: &mut impl Write,
    advisor: &HomeAdvisor,
    input: &CrispInput,
    recommendations: &Recommendations,
    advice: &[Advice],
    explain: bool,
) -> Result<()> {
    if explain {
        writeln!(out, "Memberships:")?;

        for sensor in Sensor::ALL {
            let value = input.get(sensor);
            let degrees = advisor
                .memberships(sensor, value)?
                .into_iter()
                .filter(|(_, degree)| *degree > 0.)
                .map(|(term, degree)| format!("{term} {degree:.3}"))
                .collect::<Vec<_>>();

            writeln!(out, "  {sensor} = {value}{}: {}", sensor.unit(), degrees.join(", "))?;
        }

        writeln!(out, "Fired rules:")?;

        if recommendations.firings().is_empty() {
            writeln!(out, "  none")?;
        }

        for firing in recommendations.firings() {
            writeln!(
                out,
                "  #{} {} is {} (strength {:.3})",
                firing.rule, firing.decision, firing.term, firing.strength
            )?;
        }

        writeln!(out, "Targets:")?;

        for (decision, result) in recommendations.iter() {
            match result {
                Ok(target) => writeln!(out, "  {decision} = {target:.3}{}", decision.sensor().unit())?,
                Err(_) => writeln!(out, "  {decision} = none")?,
            }
        }

        writeln!(out)?;
    }

    if advice.is_empty() {
        writeln!(out, "Nothing to adjust.")?;
    }

    for advice in advice {
        writeln!(out, "{advice}")?;
    }

    Ok(())
}

#[derive(Serialize)]
struct Report<'a> {
    input: &'a CrispInput,
    /// `null` where aggregation was degenerate
    results: BTreeMap<Decision, Option<f64>>,
    advice: Vec<AdviceEntry<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    explain: Option<Explanation<'a>>,
}

#[derive(Serialize)]
struct AdviceEntry<'a> {
    #[serde(flatten)]
    advice: &'a Advice,
    message: String,
}

#[derive(Serialize)]
struct Explanation<'a> {
    memberships: BTreeMap<Sensor, Vec<TermDegree>>,
    firings: &'a [RuleFiring],
}

#[derive(Serialize)]
struct TermDegree {
    term: HomeTerm,
    degree: f64,
}

impl<'a> Report<'a> {
    fn new(
        advisor: &HomeAdvisor,
        input: &'a CrispInput,
        recommendations: &'a Recommendations,
        advice: &'a [Advice],
        explain: bool,
    ) -> Result<Self> {
        let results = recommendations
            .iter()
            .map(|(decision, result)| (decision, result.as_ref().ok().copied()))
            .collect();
        let advice = advice
            .iter()
            .map(|advice| AdviceEntry {
                advice,
                message: advice.to_string(),
            })
            .collect();
        let explain = if explain {
            let mut memberships = BTreeMap::new();

            for sensor in Sensor::ALL {
                let degrees = advisor
                    .memberships(sensor, input.get(sensor))?
                    .into_iter()
                    .map(|(term, degree)| TermDegree { term, degree })
                    .collect();

                memberships.insert(sensor, degrees);
            }

            Some(Explanation {
                memberships,
                firings: recommendations.firings(),
            })
        } else {
            None
        };

        Ok(Report {
            input,
            results,
            advice,
            explain,
        })
    }
}
