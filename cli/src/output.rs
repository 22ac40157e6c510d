//! Rendering of command results, as indented text or as JSON on stdout.

use paystream_types::Network;
use paystream_wallet_core::{ItemOutcome, PayrollRunReport, TransactionResult};
use serde_json::{Map, Value};

/// Ordered key/value pairs describing one result.
#[derive(Debug, Default)]
pub struct Fields(Vec<(&'static str, Value)>);

impl Fields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field. Null values are dropped.
    pub fn with(mut self, key: &'static str, value: impl Into<Value>) -> Self {
        let value = value.into();
        if !value.is_null() {
            self.0.push((key, value));
        }
        self
    }

    /// Digest, explorer link and net gas of an executed transaction.
    pub fn transaction(self, network: Network, result: &TransactionResult) -> Self {
        let gas = result
            .effects
            .as_ref()
            .and_then(|e| e.gas_used.as_ref())
            .map(|g| g.net().to_string());
        self.with("digest", result.digest.to_string())
            .with("explorer", network.explorer_tx_url(&result.digest))
            .with("gas_used_mist", gas)
    }

    fn to_json(&self) -> Value {
        let map: Map<String, Value> = self
            .0
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect();
        Value::Object(map)
    }
}

pub struct Output {
    json: bool,
    network: Network,
}

impl Output {
    pub fn new(json: bool, network: Network) -> Self {
        Self { json, network }
    }

    pub fn network(&self) -> Network {
        self.network
    }

    pub fn emit(&self, headline: &str, fields: Fields) -> anyhow::Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(&fields.to_json())?);
            return Ok(());
        }
        println!("{headline}");
        for (key, value) in &fields.0 {
            match value {
                Value::String(s) => println!("  {key}: {s}"),
                other => println!("  {key}: {other}"),
            }
        }
        Ok(())
    }

    pub fn payroll_run(&self, report: &PayrollRunReport) -> anyhow::Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(report)?);
            return Ok(());
        }
        match report.created {
            Some(digest) => println!("Payroll {} created ({digest})", report.payroll_id),
            None => println!("Payroll {}", report.payroll_id),
        }
        for e in &report.employees {
            println!(
                "  #{} {} {} SUI  added: {}  paid: {}",
                e.distribution_id,
                e.address,
                e.amount,
                outcome_text(&e.added),
                outcome_text(&e.paid)
            );
        }
        match report.summary() {
            Some(summary) => println!("{summary}"),
            None => println!("All employees added and paid"),
        }
        Ok(())
    }
}

fn outcome_text(outcome: &ItemOutcome) -> String {
    match outcome {
        ItemOutcome::Succeeded { digest } => digest.to_string(),
        ItemOutcome::Failed { message } => format!("failed ({message})"),
        ItemOutcome::Skipped => "skipped".to_string(),
    }
}
