use std::io::Read;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use thiserror::Error;

use super::{
    ApiError, AppState, QuizPayload, SalarySimulationPayload, ignite_report, run_http_server,
    score_deep, score_quiz, simulate_salary, teaser,
};
use crate::core::{DeepFormData, IgniteUserData, Stage1Answers};

#[derive(Parser, Debug)]
#[command(
    name = "finhealth",
    about = "Personal financial health scoring: basic quiz, deep diagnostic and Ignite dashboard"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve the scoring engines as a JSON HTTP API
    Serve {
        #[arg(long, env = "FINHEALTH_HOST", default_value = "0.0.0.0")]
        host: IpAddr,
        #[arg(long, env = "FINHEALTH_PORT", default_value_t = 8080)]
        port: u16,
    },
    /// Score one JSON payload and print the result
    Score {
        #[arg(value_enum)]
        engine: Engine,
        #[arg(long, help = "Read the payload from a file instead of stdin")]
        input: Option<PathBuf>,
    },
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum Engine {
    Quiz,
    Deep,
    Ignite,
    Teaser,
    Salary,
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Request(#[from] ApiError),
}

pub async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Serve { host, port } => {
            run_http_server(SocketAddr::new(host, port), AppState::default()).await?;
        }
        Command::Score { engine, input } => {
            let payload = match input {
                Some(path) => std::fs::read_to_string(path)?,
                None => {
                    let mut buf = String::new();
                    std::io::stdin().read_to_string(&mut buf)?;
                    buf
                }
            };
            println!("{}", evaluate(engine, &payload)?);
        }
    }
    Ok(())
}

/// Runs one engine over a JSON payload shaped like the matching HTTP request body.
pub fn evaluate(engine: Engine, payload: &str) -> Result<String, ApiError> {
    match engine {
        Engine::Quiz => {
            let payload: QuizPayload = serde_json::from_str(payload)?;
            render(&score_quiz(&payload))
        }
        Engine::Deep => {
            let form: DeepFormData = serde_json::from_str(payload)?;
            render(&score_deep(&form)?)
        }
        Engine::Ignite => {
            let data: IgniteUserData = serde_json::from_str(payload)?;
            render(&ignite_report(&data)?)
        }
        Engine::Teaser => {
            let stage1: Stage1Answers = serde_json::from_str(payload)?;
            render(&teaser(&stage1))
        }
        Engine::Salary => {
            let payload: SalarySimulationPayload = serde_json::from_str(payload)?;
            render(&simulate_salary(&payload)?)
        }
    }
}

fn render<T: Serialize>(value: &T) -> Result<String, ApiError> {
    serde_json::to_string_pretty(value).map_err(|err| ApiError::Internal(err.to_string()))
}
