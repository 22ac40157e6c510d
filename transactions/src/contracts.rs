//! Deployed Move packages and their entry points.

use paystream_types::ObjectId;

use crate::type_tag::{MoveTarget, TypeTag};

pub const STREAMING_MODULE: &str = "streaming";
pub const VESTING_MODULE: &str = "linear_vesting";
pub const PAYROLL_MODULE: &str = "payroll";

/// Object type created by `streaming::create_stream_entry`.
pub const STREAM_OBJECT_TYPE: &str = "streaming::Stream";
/// Object type created by `linear_vesting::entry_new`.
pub const VESTING_WALLET_OBJECT_TYPE: &str = "linear_vesting::Wallet";
/// Object type created by `payroll::create_payroll`.
pub const PAYROLL_OBJECT_TYPE: &str = "payroll::Payroll";

pub const DEFAULT_STREAMING_PACKAGE: &str =
    "0xdebe630104899d2488485b82e953b02a4e8d95775f152dbd6fd6e7b91eb9ba8e";
pub const DEFAULT_VESTING_PACKAGE: &str =
    "0x3ef6a1a8b7d283ab502135e8a81629ba05f1fab7a020eb996b3bc6847827d559";
pub const DEFAULT_PAYROLL_PACKAGE: &str =
    "0x52b1773c371bf9003e7371426e519b17c9669cc310d138ace649785a977fd17e";

/// Where the three contracts live and which coin they are instantiated with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Contracts {
    pub streaming_package: ObjectId,
    pub vesting_package: ObjectId,
    pub payroll_package: ObjectId,
    pub coin_type: TypeTag,
}

impl Contracts {
    pub fn create_stream(&self) -> MoveTarget {
        MoveTarget::new(self.streaming_package, STREAMING_MODULE, "create_stream_entry")
    }

    pub fn withdraw_stream(&self) -> MoveTarget {
        MoveTarget::new(self.streaming_package, STREAMING_MODULE, "withdraw_entry")
    }

    pub fn new_vesting(&self) -> MoveTarget {
        MoveTarget::new(self.vesting_package, VESTING_MODULE, "entry_new")
    }

    pub fn claim_vesting(&self) -> MoveTarget {
        MoveTarget::new(self.vesting_package, VESTING_MODULE, "entry_claim")
    }

    pub fn create_payroll(&self) -> MoveTarget {
        MoveTarget::new(self.payroll_package, PAYROLL_MODULE, "create_payroll")
    }

    pub fn add_employee(&self) -> MoveTarget {
        MoveTarget::new(self.payroll_package, PAYROLL_MODULE, "add_employee_entry")
    }

    pub fn process_payment(&self) -> MoveTarget {
        MoveTarget::new(self.payroll_package, PAYROLL_MODULE, "process_payment_entry")
    }

    pub fn process_all_payments(&self) -> MoveTarget {
        MoveTarget::new(self.payroll_package, PAYROLL_MODULE, "process_all_payments")
    }

    pub(crate) fn coin_type_args(&self) -> Vec<TypeTag> {
        vec![self.coin_type.clone()]
    }
}

impl Default for Contracts {
    fn default() -> Self {
        // The defaults are compile-time literals and always parse.
        let parse = |s: &str| s.parse::<ObjectId>().unwrap_or_default();
        Self {
            streaming_package: parse(DEFAULT_STREAMING_PACKAGE),
            vesting_package: parse(DEFAULT_VESTING_PACKAGE),
            payroll_package: parse(DEFAULT_PAYROLL_PACKAGE),
            coin_type: TypeTag::sui(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_parse() {
        let c = Contracts::default();
        assert_eq!(c.streaming_package.to_string(), DEFAULT_STREAMING_PACKAGE);
        assert_eq!(c.vesting_package.to_string(), DEFAULT_VESTING_PACKAGE);
        assert_eq!(c.payroll_package.to_string(), DEFAULT_PAYROLL_PACKAGE);
    }

    #[test]
    fn targets_render_fully_qualified() {
        let c = Contracts::default();
        assert_eq!(
            c.withdraw_stream().to_string(),
            format!("{DEFAULT_STREAMING_PACKAGE}::streaming::withdraw_entry")
        );
        assert_eq!(c.claim_vesting().function, "entry_claim");
        assert_eq!(c.process_all_payments().module, "payroll");
    }
}
