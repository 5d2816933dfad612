//! CLI: stdin JSON -> stdout JSON. One decision or report per invocation;
//! the caller owns persistence and alert delivery.
//!
//! Usage:
//!   echo '{"history":[100,100,100], "candidate":90}' | presswatch-validate validate
//!   echo '{"publication":{...}, "date":"2026-08-24", "amount":70, "as_of":"2026-08-24"}' | presswatch-validate register
//!   echo '{"amounts":[100, 90, 110]}' | presswatch-validate report
use chrono::NaiveDate;
use presswatch_core::{
    register_event, should_alert, summarize, validate, weekly_slice, AlertDecision, Publication,
    RegisterOutcome, Summary, Verdict, VolumeEvent,
};
use serde::{Deserialize, Serialize};
use std::{env, io};

#[derive(Debug, Deserialize)]
struct ValidateInput {
    history: Vec<i64>,
    candidate: i64,
}

#[derive(Debug, Deserialize)]
struct AlertInput {
    publication: Publication,
    event_date: String,
    amount: i64,
    as_of: String,
}

#[derive(Debug, Deserialize)]
struct RegisterInput {
    publication: Publication,
    date: String,
    amount: i64,
    as_of: String,
}

#[derive(Debug, Serialize)]
struct RegisterOutput {
    #[serde(flatten)]
    outcome: RegisterOutcome,
    publication: Publication,
}

#[derive(Debug, Deserialize)]
struct ReportInput {
    amounts: Vec<i64>,
}

#[derive(Debug, Serialize)]
struct ReportOutput {
    summary: Summary,
}

#[derive(Debug, Deserialize)]
struct WeeklyInput {
    events: Vec<VolumeEvent>,
    as_of: String,
}

#[derive(Debug, Serialize)]
struct WeeklyOutput {
    events: Vec<VolumeEvent>,
}

fn parse_date(s: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(&s[..s.len().min(10)], "%Y-%m-%d")
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    let cmd = args.get(1).map(|s| s.as_str()).unwrap_or("report");

    match cmd {
        "validate" => {
            let input: ValidateInput = serde_json::from_reader(io::stdin())?;
            let verdict: Verdict = validate(input.candidate, &input.history);
            serde_json::to_writer(io::stdout(), &verdict)?;
        }
        "alert" => {
            let input: AlertInput = serde_json::from_reader(io::stdin())?;
            let event_date = parse_date(&input.event_date)?;
            let as_of = parse_date(&input.as_of)?;
            let decision: AlertDecision =
                should_alert(&input.publication, event_date, input.amount, as_of);
            serde_json::to_writer(io::stdout(), &decision)?;
        }
        "register" => {
            let input: RegisterInput = serde_json::from_reader(io::stdin())?;
            let date = parse_date(&input.date)?;
            let as_of = parse_date(&input.as_of)?;
            let mut publication = input.publication;
            let outcome = register_event(&mut publication, date, input.amount, as_of);
            serde_json::to_writer(
                io::stdout(),
                &RegisterOutput {
                    outcome,
                    publication,
                },
            )?;
        }
        "weekly" => {
            let input: WeeklyInput = serde_json::from_reader(io::stdin())?;
            let as_of = parse_date(&input.as_of)?;
            let events = weekly_slice(&input.events, as_of);
            serde_json::to_writer(io::stdout(), &WeeklyOutput { events })?;
        }
        _ => {
            let input: ReportInput = serde_json::from_reader(io::stdin())?;
            let summary = summarize(&input.amounts);
            serde_json::to_writer(io::stdout(), &ReportOutput { summary })?;
        }
    }
    Ok(())
}
