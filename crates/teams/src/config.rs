//! Team config (spec.md §4.8, §3 "Team config"): `teams/<name>/config.json`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AgentType {
    TeamLead,
    TeamReviewer,
    TeamDebugger,
    TeamImplementer,
    GeneralPurpose,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamMember {
    pub name: String,
    pub agent_id: String,
    pub agent_type: AgentType,
}

impl TeamMember {
    pub fn new(name: impl Into<String>, agent_id: impl Into<String>, agent_type: AgentType) -> Self {
        Self {
            name: name.into(),
            agent_id: agent_id.into(),
            agent_type,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamConfig {
    pub team_name: String,
    pub team_id: String,
    pub created_at: i64,
    pub members: Vec<TeamMember>,
}
