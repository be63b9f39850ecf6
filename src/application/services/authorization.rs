use std::collections::HashSet;

use crate::domain::value_objects::RecipientId;

pub trait Authorizer: Send + Sync {
    fn is_authorized(&self, requester: RecipientId) -> bool;
}

/// Grants elevated privilege to a fixed set of operator ids.
#[derive(Debug, Clone, Default)]
pub struct AdminAllowList {
    admins: HashSet<RecipientId>,
}

impl AdminAllowList {
    pub fn new(admins: impl IntoIterator<Item = RecipientId>) -> Self {
        Self {
            admins: admins.into_iter().collect(),
        }
    }
}

impl Authorizer for AdminAllowList {
    fn is_authorized(&self, requester: RecipientId) -> bool {
        self.admins.contains(&requester)
    }
}
