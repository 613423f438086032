use super::*;

#[test]
fn review_is_three_reviewers() {
    let members = members_for(TeamPreset::Review);
    assert_eq!(members.len(), 3);
    assert!(members.iter().all(|m| m.agent_type == AgentType::TeamReviewer));
}

#[test]
fn migration_is_lead_two_implementers_one_reviewer() {
    let members = members_for(TeamPreset::Migration);
    let count = |t: AgentType| members.iter().filter(|m| m.agent_type == t).count();
    assert_eq!(count(AgentType::TeamLead), 1);
    assert_eq!(count(AgentType::TeamImplementer), 2);
    assert_eq!(count(AgentType::TeamReviewer), 1);
}

#[test]
fn security_is_four_reviewers() {
    let members = members_for(TeamPreset::Security);
    assert_eq!(members.len(), 4);
    assert!(members.iter().all(|m| m.agent_type == AgentType::TeamReviewer));
}

#[test]
fn parse_round_trips_through_name() {
    for preset in [
        TeamPreset::Review,
        TeamPreset::Debug,
        TeamPreset::Feature,
        TeamPreset::Fullstack,
        TeamPreset::Research,
        TeamPreset::Security,
        TeamPreset::Migration,
        TeamPreset::Custom,
    ] {
        assert_eq!(TeamPreset::parse(preset.name()), Some(preset));
    }
}
