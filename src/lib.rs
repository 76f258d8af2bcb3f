//! release-fanout: Slack-triggered release PR fan-out for GitHub
//!
//! On request from Slack, opens a pull request from the development branch
//! into each configured release branch, merges the ones that were created,
//! and replies with a report of what succeeded and what failed.
//!
//! - [`workflow`]: create-then-merge orchestration and report rendering
//! - [`platform`]: GitHub access behind [`platform::PlatformService`]
//! - [`slack`]: Slack payloads, trigger parsing and message delivery
//! - [`dispatch`]: runs triggered actions and replies
//! - [`server`]: axum receiver for Slack requests

pub mod config;
pub mod dispatch;
pub mod error;
pub mod platform;
pub mod server;
pub mod slack;
pub mod types;
pub mod workflow;
