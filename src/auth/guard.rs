//! Ownership-based authorization for letters.
//!
//! The guard is a pure function over the requester, the attempted
//! operation, and the letter's owner. It never touches storage, which
//! keeps the policy trivially testable and reusable from any handler.

/// Who is making the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requester {
    /// No authenticated account.
    Anonymous,
    /// An authenticated account with the given id.
    Account(i64),
}

/// What the requester is trying to do to a letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Read,
    Update,
    Delete,
}

/// The guard's verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny,
}

impl Decision {
    pub fn is_allowed(self) -> bool {
        self == Decision::Allow
    }
}

/// Decide whether `requester` may perform `operation` on a letter
/// owned by `owner_id`.
///
/// Reads are public: any letter can be read by anyone holding its id,
/// which is what makes share links work. Updates and deletes require
/// an authenticated requester whose account id equals the owner's.
pub fn authorize(operation: Operation, requester: Requester, owner_id: i64) -> Decision {
    match operation {
        Operation::Read => Decision::Allow,
        Operation::Update | Operation::Delete => match requester {
            Requester::Account(id) if id == owner_id => Decision::Allow,
            _ => Decision::Deny,
        },
    }
}
