//! `gatewayd` CLI flags (spec.md §6 "Network binding" + ambient logging/auth
//! concerns layered on top, mirroring the donor's flags-only `ojd` binary).

use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "gatewayd", about = "Local-first gateway over external coding-agent CLIs")]
pub struct GatewayConfig {
    /// Port to bind HTTP + WS on.
    #[arg(long, default_value_t = 18900)]
    pub port: u16,

    /// Host/interface to bind.
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Working directory for spawned agents and git-diff helpers.
    #[arg(long)]
    pub work_dir: Option<PathBuf>,

    /// Comma-separated preferred agent ids, in priority order.
    #[arg(long, value_delimiter = ',')]
    pub agents: Vec<String>,

    /// Chat history database path. `:memory:` disables persistence.
    #[arg(long, default_value = ":memory:")]
    pub db: String,

    /// Bearer token required on non-localhost requests.
    #[arg(long)]
    pub auth_token: Option<String>,

    /// tracing-subscriber env-filter directive, e.g. "info" or "gw_server=debug".
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Test-only: disables the localhost auth bypass. Not exposed as a CLI
    /// flag; set directly when constructing a `GatewayConfig` in tests.
    #[arg(skip = true)]
    pub trust_localhost: bool,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            port: 18900,
            host: "127.0.0.1".to_string(),
            work_dir: None,
            agents: Vec::new(),
            db: ":memory:".to_string(),
            auth_token: None,
            log_level: "info".to_string(),
            trust_localhost: true,
        }
    }
}
