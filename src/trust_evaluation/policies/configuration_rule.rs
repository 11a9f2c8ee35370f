use super::DeploymentRule;
use crate::shared::Result;
use crate::trust_evaluation::domain::WebhookEvent;
use async_trait::async_trait;

/// Approves only when a boolean setting is on
pub struct ConfigurationRule {
    name: String,
    value: bool,
}

impl ConfigurationRule {
    /// # Arguments
    /// * `setting` - Configuration key, e.g. `deploy`
    /// * `value` - The key's configured value
    pub fn new(setting: &str, value: bool) -> Self {
        Self {
            name: format!("ConfigurationRule({})", setting),
            value,
        }
    }
}

#[async_trait]
impl DeploymentRule for ConfigurationRule {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_enabled(&self) -> bool {
        true
    }

    async fn evaluate(&self, _event: &WebhookEvent) -> Result<bool> {
        Ok(self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trust_evaluation::domain::WebhookEventKind;

    #[tokio::test]
    async fn test_reflects_setting() {
        let event = WebhookEvent::new(WebhookEventKind::DeploymentStatus);

        assert!(ConfigurationRule::new("deploy", true)
            .evaluate(&event)
            .await
            .unwrap());
        assert!(!ConfigurationRule::new("deploy", false)
            .evaluate(&event)
            .await
            .unwrap());
        assert_eq!(
            ConfigurationRule::new("deploy", false).name(),
            "ConfigurationRule(deploy)"
        );
    }
}
