use paystream_transactions::contracts::PAYROLL_OBJECT_TYPE;
use paystream_transactions::payroll::{
    AddEmployeeTx, CreatePayrollTx, ProcessAllPaymentsTx, ProcessPaymentTx,
};
use paystream_transactions::Operation;
use paystream_types::{to_smallest_unit, Clock, Mist, ObjectId, SuiAddress, TransactionDigest};
use serde::Serialize;

use super::{parse_hex_id, require_filled, PaystreamClient};
use crate::chain::{ChainClient, TransactionResult};
use crate::distribution::DistributionList;
use crate::error::ActionError;
use crate::signer::WalletSigner;

#[derive(Clone, Debug)]
pub struct PayrollCreated {
    pub result: TransactionResult,
    pub payroll_id: Option<ObjectId>,
}

/// Outcome of one transaction in a payroll run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ItemOutcome {
    Succeeded { digest: TransactionDigest },
    Failed { message: String },
    /// Not attempted because an earlier step for the same employee failed.
    Skipped,
}

impl ItemOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded { .. })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EmployeeOutcome {
    pub distribution_id: u32,
    pub address: String,
    pub amount: String,
    pub added: ItemOutcome,
    pub paid: ItemOutcome,
}

/// Per-employee results of [`PaystreamClient::distribute`].
///
/// Runs are not atomic: earlier transactions stay on chain when later ones fail.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PayrollRunReport {
    pub payroll_id: ObjectId,
    /// Set when the run created the payroll.
    pub created: Option<TransactionDigest>,
    pub employees: Vec<EmployeeOutcome>,
}

impl PayrollRunReport {
    pub fn is_complete(&self) -> bool {
        self.employees
            .iter()
            .all(|e| e.added.is_success() && e.paid.is_success())
    }

    pub fn failed(&self) -> impl Iterator<Item = &EmployeeOutcome> {
        self.employees
            .iter()
            .filter(|e| !(e.added.is_success() && e.paid.is_success()))
    }

    /// `None` when every employee was added and paid.
    pub fn summary(&self) -> Option<String> {
        let not_added = self.employees.iter().filter(|e| !e.added.is_success()).count();
        let not_paid = self.employees.iter().filter(|e| !e.paid.is_success()).count();
        if not_added == 0 && not_paid == 0 {
            return None;
        }
        Some(format!(
            "Some employees were not added/paid: {not_added} of {total} not added, {not_paid} of {total} not paid",
            total = self.employees.len()
        ))
    }
}

impl<C: ChainClient, W: WalletSigner, K: Clock> PaystreamClient<C, W, K> {
    /// Create a payroll funded with the configured bootstrap deposit.
    pub async fn create_payroll(&self) -> Result<PayrollCreated, ActionError> {
        self.account()?;
        let operation = Operation::CreatePayroll(CreatePayrollTx {
            funding: self.settings.payroll_funding,
            duration: self.settings.payroll_duration,
        });
        let result = self.execute(&operation).await?;
        let payroll_id = self.created_id(&operation, &result);
        Ok(PayrollCreated { result, payroll_id })
    }

    /// Register `employee` with a salary of `amount` SUI.
    pub async fn add_employee(
        &self,
        payroll_id: &str,
        employee: &str,
        amount: &str,
    ) -> Result<TransactionResult, ActionError> {
        self.account()?;
        require_filled(&[payroll_id, employee, amount], "Please fill all fields")?;
        let payroll_id = parse_hex_id(payroll_id, "Invalid payroll ID format")?;
        let employee = parse_hex_id(employee, "Invalid employee address format")?;
        let amount = to_smallest_unit(amount)?;
        self.add_employee_raw(payroll_id, employee, amount).await
    }

    async fn add_employee_raw(
        &self,
        payroll_id: ObjectId,
        employee: SuiAddress,
        amount: Mist,
    ) -> Result<TransactionResult, ActionError> {
        tracing::debug!(payroll = %payroll_id, employee = %employee, amount = amount.raw(), "adding employee");
        self.execute(&Operation::AddEmployee(AddEmployeeTx {
            payroll_id,
            employee,
            amount,
        }))
        .await
    }

    /// Pay one employee.
    pub async fn process_payment(
        &self,
        payroll_id: &str,
        employee: &str,
    ) -> Result<TransactionResult, ActionError> {
        self.account()?;
        require_filled(&[payroll_id, employee], "Please fill all fields")?;
        let payroll_id = parse_hex_id(payroll_id, "Invalid payroll ID format")?;
        let employee = parse_hex_id(employee, "Invalid employee address format")?;
        self.execute(&Operation::ProcessPayment(ProcessPaymentTx {
            payroll_id,
            employee,
        }))
        .await
    }

    /// Pay every employee of a payroll in one transaction.
    pub async fn process_all_payments(&self, payroll_id: &str) -> Result<TransactionResult, ActionError> {
        self.account()?;
        require_filled(&[payroll_id], "Please provide a payroll ID")?;
        let payroll_id = parse_hex_id(payroll_id, "Invalid payroll ID format")?;
        self.execute(&Operation::ProcessAllPayments(ProcessAllPaymentsTx { payroll_id }))
            .await
    }

    /// Run a payroll: create it unless `payroll_id` is given, add every entry of
    /// `list`, then pay every entry that was added.
    ///
    /// Transactions are sent one at a time. Failures of individual entries are
    /// recorded in the report and do not stop the run; failing to create the
    /// payroll does.
    pub async fn distribute(
        &self,
        payroll_id: Option<&str>,
        list: &DistributionList,
    ) -> Result<PayrollRunReport, ActionError> {
        self.account()?;
        let (payroll_id, created) = match payroll_id {
            Some(id) => (parse_hex_id(id, "Invalid payroll ID format")?, None),
            None => {
                let created = self.create_payroll().await?;
                let id = created.payroll_id.ok_or(ActionError::MissingCreatedObject {
                    digest: created.result.digest,
                    object_type: PAYROLL_OBJECT_TYPE,
                })?;
                (id, Some(created.result.digest))
            }
        };

        let mut employees = Vec::with_capacity(list.entries().len());
        let mut added = Vec::new();
        for entry in list.entries() {
            let parsed = parse_entry(&entry.address, &entry.amount);
            let outcome = match parsed {
                Ok((employee, amount)) => {
                    let outcome = item_outcome(self.add_employee_raw(payroll_id, employee, amount).await);
                    if outcome.is_success() {
                        added.push((employees.len(), employee));
                    }
                    outcome
                }
                Err(e) => ItemOutcome::Failed {
                    message: e.user_message(),
                },
            };
            tracing::info!(payroll = %payroll_id, entry = entry.id, outcome = ?outcome, "add employee");
            employees.push(EmployeeOutcome {
                distribution_id: entry.id,
                address: entry.address.clone(),
                amount: entry.amount.clone(),
                added: outcome,
                paid: ItemOutcome::Skipped,
            });
        }

        for (index, employee) in added {
            let outcome = item_outcome(
                self.execute(&Operation::ProcessPayment(ProcessPaymentTx {
                    payroll_id,
                    employee,
                }))
                .await,
            );
            tracing::info!(payroll = %payroll_id, employee = %employee, outcome = ?outcome, "process payment");
            employees[index].paid = outcome;
        }

        let report = PayrollRunReport {
            payroll_id,
            created,
            employees,
        };
        if let Some(summary) = report.summary() {
            tracing::warn!(payroll = %payroll_id, "{summary}");
        }
        Ok(report)
    }
}

fn parse_entry(address: &str, amount: &str) -> Result<(SuiAddress, Mist), ActionError> {
    require_filled(&[address, amount], "Please fill all fields")?;
    let employee = parse_hex_id(address, "Invalid employee address format")?;
    let amount = to_smallest_unit(amount)?;
    Ok((employee, amount))
}

fn item_outcome(result: Result<TransactionResult, ActionError>) -> ItemOutcome {
    match result {
        Ok(r) => ItemOutcome::Succeeded { digest: r.digest },
        Err(e) => ItemOutcome::Failed {
            message: e.user_message(),
        },
    }
}
