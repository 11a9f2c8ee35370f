/// DeploymentSettings - configuration consumed by the deployment rule chain
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeploymentSettings {
    /// Master switch for automated deployments
    pub deploy: bool,
    pub calendar_id: Option<String>,
    pub calendar_enabled: bool,
    /// Public holiday region such as `GB-ENG`
    pub holiday_region: Option<String>,
    pub holidays_enabled: bool,
}
