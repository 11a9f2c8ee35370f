/// Outcome of running a deployment rule chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleVerdict {
    approved: bool,
    denied_rule_name: Option<String>,
}

impl RuleVerdict {
    pub fn approved() -> Self {
        Self {
            approved: true,
            denied_rule_name: None,
        }
    }

    pub fn denied(rule_name: impl Into<String>) -> Self {
        Self {
            approved: false,
            denied_rule_name: Some(rule_name.into()),
        }
    }

    pub fn is_approved(&self) -> bool {
        self.approved
    }

    /// Name of the first rule that denied the event; `None` when approved
    pub fn denied_rule_name(&self) -> Option<&str> {
        self.denied_rule_name.as_deref()
    }
}
