//! Finding the objects a transaction created.

use paystream_types::ObjectId;

use crate::chain::{ObjectChange, TransactionResult};

/// Id of the first created object whose type contains `type_fragment`.
///
/// Object types carry the package address and type arguments
/// (`0xabc::payroll::Payroll<0x2::sui::SUI>`), so callers match on the
/// `module::Type` part alone.
pub fn extract_object_id(changes: &[ObjectChange], type_fragment: &str) -> Option<ObjectId> {
    changes.iter().find_map(|change| match change {
        ObjectChange::Created {
            object_id,
            object_type,
            ..
        } if object_type.contains(type_fragment) => Some(*object_id),
        _ => None,
    })
}

impl TransactionResult {
    pub fn created_object_id(&self, type_fragment: &str) -> Option<ObjectId> {
        extract_object_id(&self.object_changes, type_fragment)
    }
}
