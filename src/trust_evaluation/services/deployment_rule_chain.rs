use crate::shared::Result;
use crate::trust_evaluation::domain::{RuleVerdict, WebhookEvent};
use crate::trust_evaluation::policies::DeploymentRule;
use std::sync::Arc;

/// DeploymentRuleChain service deciding whether a deployment may proceed
///
/// Enabled rules run strictly in order and evaluation stops at the first
/// rule that returns `false`; later rules are never invoked. An empty chain,
/// or one whose enabled rules all pass, approves.
pub struct DeploymentRuleChain {
    rules: Vec<Arc<dyn DeploymentRule>>,
}

impl DeploymentRuleChain {
    pub fn new(rules: Vec<Arc<dyn DeploymentRule>>) -> Self {
        Self { rules }
    }

    /// Names of the rules in evaluation order, disabled ones included
    pub fn rule_names(&self) -> Vec<&str> {
        self.rules.iter().map(|rule| rule.name()).collect()
    }

    /// # Errors
    /// Propagates the first rule error; no later rule is evaluated
    pub async fn evaluate(&self, event: &WebhookEvent) -> Result<RuleVerdict> {
        for rule in self.rules.iter().filter(|rule| rule.is_enabled()) {
            if !rule.evaluate(event).await? {
                return Ok(RuleVerdict::denied(rule.name()));
            }
        }
        Ok(RuleVerdict::approved())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trust_evaluation::domain::WebhookEventKind;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingRule {
        name: &'static str,
        result: bool,
        enabled: bool,
        calls: AtomicUsize,
    }

    impl CountingRule {
        fn new(name: &'static str, result: bool) -> Arc<Self> {
            Arc::new(Self {
                name,
                result,
                enabled: true,
                calls: AtomicUsize::new(0),
            })
        }

        fn disabled(name: &'static str, result: bool) -> Arc<Self> {
            Arc::new(Self {
                name,
                result,
                enabled: false,
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl DeploymentRule for CountingRule {
        fn name(&self) -> &str {
            self.name
        }

        fn is_enabled(&self) -> bool {
            self.enabled
        }

        async fn evaluate(&self, _event: &WebhookEvent) -> Result<bool> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.result)
        }
    }

    struct FailingRule;

    #[async_trait]
    impl DeploymentRule for FailingRule {
        fn name(&self) -> &str {
            "FailingRule"
        }

        fn is_enabled(&self) -> bool {
            true
        }

        async fn evaluate(&self, _event: &WebhookEvent) -> Result<bool> {
            anyhow::bail!("calendar unavailable")
        }
    }

    fn event() -> WebhookEvent {
        WebhookEvent::new(WebhookEventKind::DeploymentStatus)
    }

    #[tokio::test]
    async fn test_short_circuits_at_first_denial() {
        let a = CountingRule::new("A", true);
        let b = CountingRule::new("B", false);
        let c = CountingRule::new("C", true);
        let rules: Vec<Arc<dyn DeploymentRule>> = vec![a.clone(), b.clone(), c.clone()];
        let chain = DeploymentRuleChain::new(rules);

        let verdict = chain.evaluate(&event()).await.unwrap();

        assert!(!verdict.is_approved());
        assert_eq!(verdict.denied_rule_name(), Some("B"));
        assert_eq!(a.calls(), 1);
        assert_eq!(b.calls(), 1);
        assert_eq!(c.calls(), 0);
    }

    #[tokio::test]
    async fn test_empty_chain_approves() {
        let verdict = DeploymentRuleChain::new(Vec::new())
            .evaluate(&event())
            .await
            .unwrap();

        assert!(verdict.is_approved());
        assert_eq!(verdict.denied_rule_name(), None);
    }

    #[tokio::test]
    async fn test_all_passing_rules_approve() {
        let rules: Vec<Arc<dyn DeploymentRule>> =
            vec![CountingRule::new("A", true), CountingRule::new("B", true)];
        let chain = DeploymentRuleChain::new(rules);

        assert!(chain.evaluate(&event()).await.unwrap().is_approved());
    }

    #[tokio::test]
    async fn test_disabled_rules_are_skipped() {
        let skipped = CountingRule::disabled("Skipped", false);
        let rules: Vec<Arc<dyn DeploymentRule>> =
            vec![skipped.clone(), CountingRule::new("A", true)];
        let chain = DeploymentRuleChain::new(rules);

        assert!(chain.evaluate(&event()).await.unwrap().is_approved());
        assert_eq!(skipped.calls(), 0);
        assert_eq!(chain.rule_names(), vec!["Skipped", "A"]);
    }

    #[tokio::test]
    async fn test_rule_error_stops_the_chain() {
        let later = CountingRule::new("Later", true);
        let rules: Vec<Arc<dyn DeploymentRule>> = vec![Arc::new(FailingRule), later.clone()];
        let chain = DeploymentRuleChain::new(rules);

        assert!(chain.evaluate(&event()).await.is_err());
        assert_eq!(later.calls(), 0);
    }
}
