mod deployment_rule_chain;

pub use deployment_rule_chain::DeploymentRuleChain;
