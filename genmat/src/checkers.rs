//! Checking and allocation policies
//!
//! Policy objects built once per matrix type. An inert checker accepts
//! everything, trusting the caller.

use genmat_core::validation::{validate_product_extent, validate_same_extent};
use genmat_core::{Extent, Malloc, Operation, ResolvedConfig, Result};

use crate::container::GrowthPolicy;

/// Operand compatibility checking
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompatChecker {
    Active,
    Inert,
}

impl CompatChecker {
    pub fn new(enabled: bool) -> Self {
        if enabled {
            CompatChecker::Active
        } else {
            CompatChecker::Inert
        }
    }

    /// Elementwise operations and assignment need equal extents
    pub fn check_same(self, op: Operation, left: Extent, right: Extent) -> Result<()> {
        match self {
            CompatChecker::Active => validate_same_extent(op, left, right),
            CompatChecker::Inert => Ok(()),
        }
    }

    /// Products need the inner dimensions to agree
    pub fn check_product(self, left: Extent, right: Extent) -> Result<()> {
        match self {
            CompatChecker::Active => validate_product_extent(left, right),
            CompatChecker::Inert => Ok(()),
        }
    }
}

/// Buffer sizing for one matrix type
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AllocationPolicy {
    malloc: Malloc,
    size: usize,
    ratio: f64,
    growing: f64,
    checked: bool,
}

impl AllocationPolicy {
    pub fn from_config(config: &ResolvedConfig) -> Self {
        Self {
            malloc: config.malloc,
            size: config.size,
            ratio: config.ratio.value(),
            growing: config.growing.value(),
            checked: config.malloc_err_checking,
        }
    }

    /// Growth policy for a buffer covering `storable` positions
    pub fn growth(&self, storable: usize) -> GrowthPolicy {
        match self.malloc {
            Malloc::Fixed => GrowthPolicy::Fixed {
                capacity: self.size,
            },
            Malloc::Dynamic => {
                GrowthPolicy::dynamic(self.ratio, self.growing, storable, self.checked)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use genmat_core::{resolve_spec, MallocSpec, MatrixError, MatrixSpec};

    #[test]
    fn test_inert_checker_accepts_mismatch() {
        let (left, right) = (Extent::new(2, 3), Extent::new(4, 2));
        assert!(CompatChecker::Inert.check_product(left, right).is_ok());
        assert!(matches!(
            CompatChecker::Active.check_product(left, right),
            Err(MatrixError::IncompatibleOperands { .. })
        ));
        assert!(CompatChecker::Active
            .check_same(Operation::Add, left, left)
            .is_ok());
    }

    #[test]
    fn test_allocation_policy() {
        let fixed = resolve_spec(&MatrixSpec::new().with_malloc(MallocSpec::Fixed { size: Some(8) })).unwrap();
        assert_eq!(
            AllocationPolicy::from_config(&fixed).growth(100),
            GrowthPolicy::Fixed { capacity: 8 }
        );
        let dynamic = resolve_spec(&MatrixSpec::new()).unwrap();
        assert_eq!(
            AllocationPolicy::from_config(&dynamic).growth(20),
            GrowthPolicy::Dynamic {
                initial: 2,
                increment: 5,
                checked: true
            }
        );
    }
}
