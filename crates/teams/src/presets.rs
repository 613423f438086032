//! Fixed team presets (spec.md §4.8 "createTeamFromPreset", §8 scenario 8).

use crate::config::{AgentType, TeamMember};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeamPreset {
    Review,
    Debug,
    Feature,
    Fullstack,
    Research,
    Security,
    Migration,
    Custom,
}

impl TeamPreset {
    pub fn name(self) -> &'static str {
        match self {
            TeamPreset::Review => "review",
            TeamPreset::Debug => "debug",
            TeamPreset::Feature => "feature",
            TeamPreset::Fullstack => "fullstack",
            TeamPreset::Research => "research",
            TeamPreset::Security => "security",
            TeamPreset::Migration => "migration",
            TeamPreset::Custom => "custom",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Some(match s {
            "review" => TeamPreset::Review,
            "debug" => TeamPreset::Debug,
            "feature" => TeamPreset::Feature,
            "fullstack" => TeamPreset::Fullstack,
            "research" => TeamPreset::Research,
            "security" => TeamPreset::Security,
            "migration" => TeamPreset::Migration,
            "custom" => TeamPreset::Custom,
            _ => return None,
        })
    }
}

fn member(idx: usize, agent_type: AgentType) -> TeamMember {
    let label = match agent_type {
        AgentType::TeamLead => "lead",
        AgentType::TeamReviewer => "reviewer",
        AgentType::TeamDebugger => "debugger",
        AgentType::TeamImplementer => "implementer",
        AgentType::GeneralPurpose => "member",
    };
    TeamMember::new(format!("{label}-{idx}"), format!("{label}-{idx}"), agent_type)
}

/// Materialises a preset's fixed member distribution.
pub fn members_for(preset: TeamPreset) -> Vec<TeamMember> {
    match preset {
        TeamPreset::Review => vec![
            member(1, AgentType::TeamReviewer),
            member(2, AgentType::TeamReviewer),
            member(3, AgentType::TeamReviewer),
        ],
        TeamPreset::Debug => vec![member(1, AgentType::TeamDebugger), member(2, AgentType::TeamDebugger)],
        TeamPreset::Feature => vec![
            member(1, AgentType::TeamLead),
            member(2, AgentType::TeamImplementer),
            member(3, AgentType::TeamReviewer),
        ],
        TeamPreset::Fullstack => vec![
            member(1, AgentType::TeamLead),
            member(2, AgentType::TeamImplementer),
            member(3, AgentType::TeamImplementer),
            member(4, AgentType::TeamReviewer),
        ],
        TeamPreset::Research => vec![member(1, AgentType::GeneralPurpose), member(2, AgentType::GeneralPurpose)],
        TeamPreset::Security => vec![
            member(1, AgentType::TeamReviewer),
            member(2, AgentType::TeamReviewer),
            member(3, AgentType::TeamReviewer),
            member(4, AgentType::TeamReviewer),
        ],
        TeamPreset::Migration => vec![
            member(1, AgentType::TeamLead),
            member(2, AgentType::TeamImplementer),
            member(3, AgentType::TeamImplementer),
            member(4, AgentType::TeamReviewer),
        ],
        TeamPreset::Custom => vec![member(1, AgentType::GeneralPurpose)],
    }
}

#[cfg(test)]
#[path = "presets_tests.rs"]
mod tests;
