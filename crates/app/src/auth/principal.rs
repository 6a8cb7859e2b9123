//! Authenticated principals and role capabilities.

use thiserror::Error;

use crate::domain::users::records::{Role, UserUuid};

/// An operation gated by role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Create, update and delete catalog products.
    ManageCatalog,

    /// Change an order's status or payment status.
    ManageOrders,

    /// Read orders that belong to other users.
    ViewAllOrders,
}

/// Raised when a principal lacks the capability an operation requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("principal lacks the {capability:?} capability")]
pub struct Forbidden {
    pub capability: Capability,
}

/// The authenticated caller every cart and order operation runs on behalf of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Principal {
    pub user: UserUuid,
    pub role: Role,
}

impl Principal {
    #[must_use]
    pub const fn new(user: UserUuid, role: Role) -> Self {
        Self { user, role }
    }

    #[must_use]
    pub const fn can(&self, capability: Capability) -> bool {
        match capability {
            Capability::ManageCatalog | Capability::ManageOrders | Capability::ViewAllOrders => {
                matches!(self.role, Role::Admin)
            }
        }
    }

    /// Check a capability once at the entry of an operation.
    ///
    /// # Errors
    ///
    /// Returns [`Forbidden`] when the principal's role does not grant `capability`.
    pub const fn require(&self, capability: Capability) -> Result<(), Forbidden> {
        if self.can(capability) {
            Ok(())
        } else {
            Err(Forbidden { capability })
        }
    }

    /// Whether the principal may read a record owned by `owner`.
    #[must_use]
    pub fn can_view_owned_by(&self, owner: UserUuid) -> bool {
        self.user == owner || self.can(Capability::ViewAllOrders)
    }
}
