use std::collections::BTreeSet;

/// Verified scopes attached to an inbound credential. Immutable once built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermissionClaim {
    subject: Option<String>,
    scopes: BTreeSet<String>,
}

impl PermissionClaim {
    pub fn new<I, S>(subject: Option<String>, scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            subject,
            scopes: scopes.into_iter().map(Into::into).collect(),
        }
    }

    pub fn from_scopes<I, S>(scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(None, scopes)
    }

    pub fn subject(&self) -> Option<&str> {
        self.subject.as_deref()
    }

    pub fn scopes(&self) -> &BTreeSet<String> {
        &self.scopes
    }

    pub fn has_scope(&self, scope: &str) -> bool {
        self.scopes.contains(scope)
    }
}
