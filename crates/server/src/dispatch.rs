//! Dispatches one parsed client frame to the relevant component and builds
//! the reply frame (spec.md §4.4 "Dispatch"), grounded on the donor's
//! match-on-parsed-enum `handle_request_and_send` (serve/src/connection.rs).

use gw_core::{PtySessionId, RpcSessionId, ThreadId};
use gw_orchestrator::Mode;
use gw_pty::PtySpawnConfig;
use gw_teams::{MessageType, SpawnTeamOpts, TaskPartial, TeamMember, TeamPreset};
use gw_threads::{presets, ThreadSpec};
use serde_json::json;

use crate::error::ServerError;
use crate::frames::{ClientFrameBody, ServerFrame};
use crate::state::AppState;

fn ok(method: &str) -> ServerFrame {
    ServerFrame::Ok {
        id: None,
        method: method.to_string(),
    }
}

fn require_non_empty(value: &str, field: &str) -> Result<(), ServerError> {
    if value.trim().is_empty() {
        return Err(ServerError::Validation(format!("{field} must not be empty")));
    }
    Ok(())
}

fn thread_spec_for_preset(preset: &str, target: &str) -> Result<ThreadSpec, ServerError> {
    match preset {
        "review" => Ok(presets::review(target)),
        "parallel_review" => Ok(presets::parallel_review(target)),
        "plan_and_build" => Ok(presets::plan_and_build(target)),
        "debug_fusion" => Ok(presets::debug_fusion(target)),
        "parallel_research" => Ok(presets::parallel_research(target)),
        other => Err(ServerError::Validation(format!("unknown thread preset: {other}"))),
    }
}

pub async fn handle_frame(state: &AppState, body: ClientFrameBody) -> Result<ServerFrame, ServerError> {
    match body {
        ClientFrameBody::Send { message } => {
            require_non_empty(&message, "message")?;
            let session = state.session.clone();
            tokio::spawn(async move {
                session.process_message(message).await;
            });
            Ok(ok("send"))
        }
        ClientFrameBody::Health => {
            let health = state.session.agent_health().await;
            let health_json = json!(health
                .into_iter()
                .map(|(id, ok)| (id.as_str().to_string(), ok))
                .collect::<std::collections::HashMap<_, _>>());
            Ok(ServerFrame::Health { health: health_json })
        }
        ClientFrameBody::Agents => {
            let agents = state.session.available_agents().await.iter().map(|a| a.as_str().to_string()).collect();
            Ok(ServerFrame::Agents { agents })
        }
        ClientFrameBody::History => {
            let messages = state.session.get_history().await.into_iter().map(|m| json!(m)).collect();
            Ok(ServerFrame::History { messages })
        }
        ClientFrameBody::Clear => {
            state.session.clear_history().await;
            Ok(ok("clear"))
        }
        ClientFrameBody::Diff => {
            let diff = crate::diff::get_git_diff(&state.work_dir, false).await;
            Ok(ServerFrame::Diff { diff })
        }
        ClientFrameBody::DiffFull => {
            let diff = crate::diff::get_git_diff(&state.work_dir, true).await;
            Ok(ServerFrame::DiffFull { diff })
        }
        ClientFrameBody::Queue => {
            let queue = state.session.get_queue().await;
            Ok(ServerFrame::Queue { queue })
        }
        ClientFrameBody::Mode { mode } => {
            let parsed = match mode.as_str() {
                "execute" => Mode::Execute,
                "plan" => Mode::Plan,
                other => return Err(ServerError::Validation(format!("unknown mode: {other}"))),
            };
            state.session.set_mode(parsed).await;
            Ok(ServerFrame::Mode { mode })
        }
        ClientFrameBody::Preview { url } => Ok(ServerFrame::Preview { url }),

        ClientFrameBody::PtySpawn { agent_id, cmd, cwd, cols, rows } => {
            require_non_empty(&agent_id, "agentId")?;
            require_non_empty(&cmd, "cmd")?;
            let id = PtySessionId::new();
            let handle = state.pty.spawn(PtySpawnConfig {
                id: id.clone(),
                agent_id,
                cmd,
                cwd: cwd.map(std::path::PathBuf::from).or_else(|| Some(state.work_dir.clone())),
                env: vec![],
                cols,
                rows,
            })?;
            crate::broadcaster::spawn_pty_bridge(state.clone(), id.clone(), handle.clone());
            Ok(ServerFrame::PtySpawned {
                id: id.as_str().to_string(),
                cols: handle.cols(),
                rows: handle.rows(),
            })
        }
        ClientFrameBody::PtyInput { id, data } => {
            let handle = state.pty.get(&PtySessionId::from_string(id)).ok_or_else(|| ServerError::Validation("unknown pty session".to_string()))?;
            handle.write(&data)?;
            Ok(ok("pty_input"))
        }
        ClientFrameBody::PtyResize { id, cols, rows } => {
            let handle = state.pty.get(&PtySessionId::from_string(id)).ok_or_else(|| ServerError::Validation("unknown pty session".to_string()))?;
            handle.resize(cols, rows)?;
            Ok(ok("pty_resize"))
        }
        ClientFrameBody::PtyKill { id } => {
            if let Some(handle) = state.pty.get(&PtySessionId::from_string(id)) {
                handle.kill();
            }
            Ok(ok("pty_kill"))
        }
        ClientFrameBody::PtyList => {
            let sessions = state
                .pty
                .list()
                .iter()
                .map(|h| json!({"id": h.id.as_str(), "agentId": h.agent_id, "alive": h.is_alive(), "cols": h.cols(), "rows": h.rows()}))
                .collect();
            Ok(ServerFrame::PtyList { sessions })
        }

        ClientFrameBody::RpcNew { id, cwd } => {
            let session_id = RpcSessionId::from_string(id);
            state.rpc.create(session_id.clone(), cwd.map(std::path::PathBuf::from))?;
            Ok(ServerFrame::RpcCreated { id: session_id.as_str().to_string() })
        }
        ClientFrameBody::RpcPrompt { session_id, message } => {
            require_non_empty(&message, "message")?;
            state.rpc.prompt(&RpcSessionId::from_string(session_id), &message)?;
            Ok(ok("rpc_prompt"))
        }
        ClientFrameBody::RpcAbort { session_id } => {
            state.rpc.abort(&RpcSessionId::from_string(session_id));
            Ok(ok("rpc_abort"))
        }
        ClientFrameBody::RpcKill { session_id } => {
            state.rpc.kill(&RpcSessionId::from_string(session_id));
            Ok(ok("rpc_kill"))
        }
        ClientFrameBody::RpcList => {
            let sessions = state.rpc.list().into_iter().map(|s| json!(s)).collect();
            Ok(ServerFrame::RpcSessions { sessions })
        }

        ClientFrameBody::TeamsList => Ok(ServerFrame::TeamsList { teams: state.teams.list_teams()? }),
        ClientFrameBody::TeamsCreate { name, preset } => {
            require_non_empty(&name, "name")?;
            let config = match preset.as_deref().map(TeamPreset::parse) {
                Some(Some(preset)) => state.teams.create_team_from_preset(preset, Some(name))?,
                Some(None) => return Err(ServerError::Validation(format!("unknown team preset: {}", preset.unwrap()))),
                None => state.teams.create_team(&name, Vec::<TeamMember>::new())?,
            };
            Ok(ServerFrame::TeamsCreated { team: json!(config) })
        }
        ClientFrameBody::TeamsSpawn { name, initial_prompt, teammate_mode } => {
            require_non_empty(&name, "name")?;
            require_non_empty(&initial_prompt, "initialPrompt")?;
            state.teams.spawn_team(
                name.clone(),
                initial_prompt,
                SpawnTeamOpts {
                    teammate_mode: teammate_mode.unwrap_or_else(|| "async".to_string()),
                    cwd: Some(state.work_dir.clone()),
                },
            )?;
            Ok(ServerFrame::TeamsSpawned { name })
        }
        ClientFrameBody::TeamsTaskUpdate { team, task_id, patch } => {
            let partial: TaskPartial = serde_json::from_value(patch).map_err(|e| ServerError::Validation(e.to_string()))?;
            let task = state
                .teams
                .update_task(&team, &task_id, partial)?
                .ok_or_else(|| ServerError::Validation(format!("unknown task: {task_id}")))?;
            Ok(ServerFrame::TeamsTask { task: json!(task) })
        }
        ClientFrameBody::TeamsMessage { team, from, to, content, summary } => {
            require_non_empty(&content, "content")?;
            let msg = state.teams.send_message(&team, MessageType::Message, &from, &to, &content, summary)?;
            Ok(ServerFrame::TeamsMessage { message: json!(msg) })
        }
        ClientFrameBody::TeamsBroadcast { team, from, content, summary } => {
            require_non_empty(&content, "content")?;
            state.teams.broadcast(&team, &from, &content, summary)?;
            Ok(ok("teams_broadcast"))
        }
        ClientFrameBody::TeamsWatch { team } => {
            state.teams.watch(&team);
            Ok(ok("teams_watch"))
        }
        ClientFrameBody::TeamsDelete { team } => {
            state.teams.unwatch(&team);
            Ok(ok("teams_delete"))
        }

        ClientFrameBody::ThreadLaunch { preset, target, cwd } => {
            require_non_empty(&target, "target")?;
            let mut spec = match preset.as_deref() {
                Some(preset) => thread_spec_for_preset(preset, &target)?,
                None => ThreadSpec::base(target),
            };
            if let Some(cwd) = cwd {
                spec = spec.with_cwd(std::path::PathBuf::from(cwd));
            }
            let id = state.threads.launch(spec)?;
            Ok(ServerFrame::ThreadLaunched { thread_id: id.as_str().to_string() })
        }
        ClientFrameBody::ThreadList => {
            let threads = state.threads.list_threads().into_iter().map(|t| json!(t)).collect();
            Ok(ServerFrame::ThreadList { threads })
        }
        ClientFrameBody::ThreadKill { thread_id } => {
            state.threads.kill_thread(&ThreadId::from_string(thread_id))?;
            Ok(ok("thread_kill"))
        }
        ClientFrameBody::ThreadAbort { thread_id } => {
            state.threads.abort_thread(&ThreadId::from_string(thread_id))?;
            Ok(ok("thread_abort"))
        }
        ClientFrameBody::ThreadSteer { thread_id, message } => {
            require_non_empty(&message, "message")?;
            state.threads.steer_thread(&ThreadId::from_string(thread_id), &message)?;
            Ok(ok("thread_steer"))
        }
        ClientFrameBody::ThreadPreset { preset, target } => {
            require_non_empty(&target, "target")?;
            let spec = thread_spec_for_preset(&preset, &target)?;
            Ok(ServerFrame::ThreadPresetPreview { command: spec.compile() })
        }
        ClientFrameBody::ThreadAgents => {
            let agents = state.session.available_agents().await.iter().map(|a| a.as_str().to_string()).collect();
            Ok(ServerFrame::ThreadAgents { agents })
        }
        ClientFrameBody::ThreadAsyncList => {
            let threads = state.threads.list_threads().into_iter().map(|t| json!(t)).collect();
            Ok(ServerFrame::ThreadAsyncList { threads })
        }
    }
}
