//! Command dispatcher
//!
//! Sends one command at a time. A command refused by a busy link becomes
//! the single pending retry and the single retry timer is re-armed; any
//! later send supersedes it, so a replaced command is never resent.

use wristfeed_protocol::Command;

use crate::config::RetryPolicy;
use crate::traits::{Link, LinkError, PowerMode, RetryTimer};

/// Outcome of a send
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SendStatus {
    /// Handed to the link
    Sent,
    /// Link busy; retry scheduled
    Queued,
    /// Link busy and the retry policy is exhausted
    Abandoned,
    /// Link closed; command discarded
    Dropped,
}

/// The command awaiting a retry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PendingRetry {
    pub command: Command,
    /// Failed attempts so far
    pub attempts: u32,
}

/// Single-flight command dispatcher
#[derive(Debug, Clone)]
pub struct Dispatcher {
    policy: RetryPolicy,
    pending: Option<PendingRetry>,
}

impl Dispatcher {
    pub fn new(policy: RetryPolicy) -> Self {
        Self {
            policy,
            pending: None,
        }
    }

    /// Active retry policy
    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Command awaiting a retry, if any
    pub fn pending(&self) -> Option<PendingRetry> {
        self.pending
    }

    /// Send `command`, scheduling a retry if the link is busy
    pub fn send<H>(&mut self, host: &mut H, command: Command) -> SendStatus
    where
        H: Link + RetryTimer + ?Sized,
    {
        match host.try_send(command) {
            Ok(()) => {
                trace!("sent {}", command);
                host.set_power_mode(PowerMode::Reduced);
                host.cancel();
                self.pending = None;
                SendStatus::Sent
            }
            Err(LinkError::Busy) => {
                let attempts = match self.pending {
                    Some(pending) if pending.command == command => {
                        pending.attempts.saturating_add(1)
                    }
                    _ => 1,
                };

                if self.policy.is_exhausted(attempts) {
                    warn!("giving up on {} after {} attempts", command, attempts);
                    host.cancel();
                    self.pending = None;
                    return SendStatus::Abandoned;
                }

                debug!(
                    "link busy, retrying {} in {} ms (attempt {})",
                    command, self.policy.delay_ms, attempts
                );
                self.pending = Some(PendingRetry { command, attempts });
                host.arm(self.policy.delay_ms);
                SendStatus::Queued
            }
            Err(LinkError::Closed) => {
                warn!("link closed, dropping {}", command);
                host.cancel();
                self.pending = None;
                SendStatus::Dropped
            }
        }
    }

    /// Retry the pending command; `None` if nothing is pending
    pub fn fire<H>(&mut self, host: &mut H) -> Option<SendStatus>
    where
        H: Link + RetryTimer + ?Sized,
    {
        let pending = self.pending?;
        Some(self.send(host, pending.command))
    }

    /// A transfer finished; return the link to power-saving mode
    pub fn throttle<H>(&mut self, host: &mut H)
    where
        H: Link + ?Sized,
    {
        trace!("throttle");
        host.set_power_mode(PowerMode::Normal);
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new(RetryPolicy::default())
    }
}
