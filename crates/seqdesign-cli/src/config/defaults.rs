use seqdesign::engine::config as core_config;

pub struct DefaultsConfig {
    pub script: String,
    pub interpreter: String,
    pub weights_subdir: String,
    pub model_name: String,
    pub temperature: f64,
    pub seed: u64,
    pub timeout_seconds: u64,
    pub max_file_size_mb: f64,
    pub min_ca_atoms: usize,
    pub num_sequences: usize,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            script: "protein_mpnn_run.py".to_string(),
            interpreter: "python3".to_string(),
            weights_subdir: "vanilla_model_weights".to_string(),
            model_name: core_config::DEFAULT_MODEL_NAME.to_string(),
            temperature: core_config::DEFAULT_SAMPLING_TEMPERATURE,
            seed: core_config::DEFAULT_SEED,
            timeout_seconds: core_config::DEFAULT_TIMEOUT.as_secs(),
            max_file_size_mb: 10.0,
            min_ca_atoms: core_config::DEFAULT_MIN_CA_ATOMS,
            num_sequences: core_config::DEFAULT_NUM_SEQUENCES,
        }
    }
}
