//! Logging utilities
//!
//! Thin helpers over the `log` facade. The host installs the backend
//! (`console_log` in the browser, any `log` implementation natively).

#![allow(unused)]

const TARGET: &str = "conductor";

/// Log an info message
#[inline(always)]
pub fn info(msg: &str) {
    ::log::info!(target: TARGET, "{}", msg);
}

/// Log a warning message
#[inline(always)]
pub fn warn(msg: &str) {
    ::log::warn!(target: TARGET, "{}", msg);
}

/// Log an error message
#[inline(always)]
pub fn error(msg: &str) {
    ::log::error!(target: TARGET, "{}", msg);
}

/// Log a debug message with a label
#[inline(always)]
pub fn debug(label: &str, msg: &str) {
    ::log::debug!(target: TARGET, "[{}] {}", label, msg);
}

/// Log combat progress
#[inline(always)]
pub fn combat_summary(
    round: u32,
    rule: &str,
    tick: u32,
    player_alive: usize,
    enemy_alive: usize,
    heat: u8,
) {
    ::log::debug!(
        target: TARGET,
        "round={} rule={} tick={} alive={}v{} heat={}",
        round,
        rule,
        tick,
        player_alive,
        enemy_alive,
        heat
    );
}

/// Log an action being performed
#[inline(always)]
pub fn action(name: &str, details: &str) {
    ::log::info!(target: TARGET, "> {} ({})", name, details);
}

/// Log action result
#[inline(always)]
pub fn result(success: bool, msg: &str) {
    if success {
        ::log::info!(target: TARGET, "ok: {}", msg);
    } else {
        ::log::warn!(target: TARGET, "rejected: {}", msg);
    }
}
