use std::{path::PathBuf, process::ExitCode};

use anyhow::Context;
use clap::Parser;
use inquire::{Text, required};
use weatherinfo_core::{
    Coordinates, DEFAULT_REPORT_FILE, OpenWeatherProvider, RunConfig, RunError, run,
};

const SIGN_UP_URL: &str = "https://home.openweathermap.org/users/sign_up";

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(
    name = "weatherinfo",
    version,
    about = "Fetch current weather and a 7-day forecast into a text report"
)]
pub struct Cli {
    /// Where to write the report; any existing file is overwritten.
    #[arg(short, long, default_value = DEFAULT_REPORT_FILE)]
    pub output: PathBuf,

    /// Log request details to stderr.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<ExitCode> {
        println!("Welcome to the Weather Information App!");
        println!("You need an API key to access weather data from OpenWeatherMap.");
        println!("You can obtain your API key by signing up at {SIGN_UP_URL}");

        let config = self.prompt_config()?;
        let provider = OpenWeatherProvider::new().context("Failed to build HTTP client")?;

        match run(&provider, &config).await {
            Ok(summary) => {
                println!("Weather information written to {}", summary.output_path.display());
                println!("Weather data fetched and written to file successfully.");
                Ok(ExitCode::SUCCESS)
            }
            Err(err) => {
                println!("{}", failure_message(&err));
                Ok(ExitCode::FAILURE)
            }
        }
    }

    fn prompt_config(&self) -> anyhow::Result<RunConfig> {
        let api_key = Text::new("Please enter your OpenWeatherMap API key:")
            .with_validator(required!("An API key is required"))
            .prompt()?;
        let latitude = Text::new("Enter the latitude:")
            .with_validator(required!("Latitude is required"))
            .prompt()?;
        let longitude = Text::new("Enter the longitude:")
            .with_validator(required!("Longitude is required"))
            .prompt()?;
        // Left unvalidated here; the pipeline rejects anything but C/F before fetching.
        let unit = Text::new("Enter the temperature unit. 'C' for Celsius and 'F' for Fahrenheit:")
            .prompt()?;

        Ok(RunConfig::new(api_key, Coordinates::new(latitude, longitude), unit)
            .with_output_path(self.output.clone()))
    }
}

fn failure_message(err: &RunError) -> String {
    match err {
        RunError::InvalidUnit(_) => "Temperature unit must either be 'C' or 'F'.".to_string(),
        RunError::Fetch(_) => {
            "Failed to fetch weather data. Please check your input and try again.".to_string()
        }
        RunError::Provider { message, .. } => format!("Error: {message}"),
        RunError::Report(err) => format!("Error writing to file: {err}"),
    }
}
