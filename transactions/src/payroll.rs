//! Payroll transactions.
//!
//! A payroll is created once with a bootstrap deposit, employees are added one
//! transaction at a time, and payments are processed per employee or all at once.

use paystream_types::{Mist, ObjectId, SuiAddress};

use crate::contracts::Contracts;
use crate::ptb::{PtbBuilder, UnresolvedTransaction};

/// Deposit split off the gas coin when a payroll is created (5 SUI).
pub const DEFAULT_BOOTSTRAP_FUNDING: Mist = Mist::from_sui(5);

/// Payroll duration argument passed at creation.
pub const DEFAULT_PAYROLL_DURATION: u64 = 2_592_000_000;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CreatePayrollTx {
    pub funding: Mist,
    pub duration: u64,
}

impl Default for CreatePayrollTx {
    fn default() -> Self {
        Self {
            funding: DEFAULT_BOOTSTRAP_FUNDING,
            duration: DEFAULT_PAYROLL_DURATION,
        }
    }
}

impl CreatePayrollTx {
    /// `create_payroll(coin, duration)`
    pub(crate) fn build(&self, contracts: &Contracts) -> UnresolvedTransaction {
        let mut b = PtbBuilder::new();
        let coin = b.split_gas(self.funding);
        let duration = b.pure_u64(self.duration);
        b.move_call(
            &contracts.create_payroll(),
            contracts.coin_type_args(),
            vec![coin, duration],
        );
        b.finish()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AddEmployeeTx {
    pub payroll_id: ObjectId,
    pub employee: SuiAddress,
    pub amount: Mist,
}

impl AddEmployeeTx {
    /// `add_employee_entry(payroll, amount, employee)`
    pub(crate) fn build(&self, contracts: &Contracts) -> UnresolvedTransaction {
        let mut b = PtbBuilder::new();
        let payroll = b.object(self.payroll_id, true);
        let amount = b.pure_u64(self.amount.raw());
        let employee = b.pure_address(self.employee);
        b.move_call(
            &contracts.add_employee(),
            contracts.coin_type_args(),
            vec![payroll, amount, employee],
        );
        b.finish()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProcessPaymentTx {
    pub payroll_id: ObjectId,
    pub employee: SuiAddress,
}

impl ProcessPaymentTx {
    /// `process_payment_entry(payroll, employee, clock)`
    pub(crate) fn build(&self, contracts: &Contracts) -> UnresolvedTransaction {
        let mut b = PtbBuilder::new();
        let payroll = b.object(self.payroll_id, true);
        let employee = b.pure_address(self.employee);
        let clock = b.clock();
        b.move_call(
            &contracts.process_payment(),
            contracts.coin_type_args(),
            vec![payroll, employee, clock],
        );
        b.finish()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProcessAllPaymentsTx {
    pub payroll_id: ObjectId,
}

impl ProcessAllPaymentsTx {
    /// `process_all_payments(payroll, clock)`
    pub(crate) fn build(&self, contracts: &Contracts) -> UnresolvedTransaction {
        let mut b = PtbBuilder::new();
        let payroll = b.object(self.payroll_id, true);
        let clock = b.clock();
        b.move_call(
            &contracts.process_all_payments(),
            contracts.coin_type_args(),
            vec![payroll, clock],
        );
        b.finish()
    }
}
