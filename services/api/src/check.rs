use crate::infra::{parse_date, parse_expiration, seed_store};
use chrono::{Local, NaiveDate};
use clap::Args;
use credit_check::approval::{
    mask_card_number, CreditApplication, CreditCheckError, CreditCheckService, CreditDecision,
    CreditMetrics, ExpirationMonth,
};
use credit_check::config::AppConfig;
use credit_check::error::AppError;
use credit_check::telemetry;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct CheckArgs {
    #[arg(long)]
    pub(crate) first_name: String,
    #[arg(long)]
    pub(crate) last_name: String,
    /// Applicant date of birth (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub(crate) date_of_birth: NaiveDate,
    #[arg(long)]
    pub(crate) existing_customer: bool,
    #[arg(long)]
    pub(crate) card_number: String,
    /// Card expiration (YYYY-MM)
    #[arg(long, value_parser = parse_expiration)]
    pub(crate) expiration: ExpirationMonth,
    #[arg(long)]
    pub(crate) cvv: String,
    #[arg(long)]
    pub(crate) issuer: String,
    /// Stored credit score for the card; omitted values fall back to a random draw
    #[arg(long, requires = "duration")]
    pub(crate) score: Option<u32>,
    /// Stored credit history length in years
    #[arg(long, requires = "score")]
    pub(crate) duration: Option<u32>,
    /// CSV of card_number,score,duration rows to seed the store with
    #[arg(long)]
    pub(crate) metrics_csv: Option<PathBuf>,
    /// Evaluate as of this date instead of today (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

pub(crate) fn run_check(args: CheckArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let seed_path = args.metrics_csv.clone().or(config.metrics_seed);
    let store = Arc::new(seed_store(seed_path.as_deref())?);
    if let (Some(score), Some(duration)) = (args.score, args.duration) {
        store.insert_metrics(&args.card_number, CreditMetrics::new(score, duration));
    }

    let service = CreditCheckService::new(store.clone(), config.approval)?;
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let result = service.process_on(args.into_application(), today);

    println!("{}", render_result(&result));
    if let Some(record) = store.transactions().last() {
        println!(
            "recorded transaction for {} at {}",
            mask_card_number(&record.card_number),
            record.recorded_at.to_rfc3339()
        );
    }
    Ok(())
}

impl CheckArgs {
    fn into_application(self) -> CreditApplication {
        CreditApplication {
            first_name: self.first_name,
            last_name: self.last_name,
            date_of_birth: self.date_of_birth,
            is_existing_customer: self.existing_customer,
            credit_card_number: self.card_number,
            expiration_date: self.expiration,
            cvv: self.cvv,
            credit_card_issuer: self.issuer,
        }
    }
}

fn render_result(result: &Result<CreditDecision, CreditCheckError>) -> String {
    match result {
        Ok(decision) => format!(
            "credit_approval: {}\nrationale: {}",
            decision.status().label(),
            decision.outcome.summary()
        ),
        Err(CreditCheckError::ValidationFailed { detail, .. }) => {
            format!("rejected: {detail}")
        }
    }
}
