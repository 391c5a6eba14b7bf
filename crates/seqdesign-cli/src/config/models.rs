use seqdesign::engine::config as core_config;

pub struct AppConfig {
    pub design: core_config::DesignConfig,
    pub invocation: core_config::InvocationConfig,
}
