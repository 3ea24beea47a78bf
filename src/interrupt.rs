// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tunesday-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tunesday and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Process interrupt plumbing.
//!
//! A signal listener task owns the [`InterruptTrigger`]; screens hold an [`Interrupt`] and check it
//! between input polls. Nothing here touches the document.

use std::io;

use tokio::sync::watch;

/// Raising side of the interrupt flag.
#[derive(Debug)]
pub struct InterruptTrigger {
    tx: watch::Sender<bool>,
}

impl InterruptTrigger {
    /// Raises the flag. Idempotent.
    pub fn raise(&self) {
        self.tx.send_replace(true);
    }
}

/// Observing side of the interrupt flag. Cheap to clone.
#[derive(Debug, Clone)]
pub struct Interrupt {
    rx: watch::Receiver<bool>,
}

impl Interrupt {
    /// An interrupt that can never be raised.
    pub fn never() -> Self {
        let (_trigger, interrupt) = channel();
        interrupt
    }

    pub fn is_raised(&self) -> bool {
        *self.rx.borrow()
    }
}

pub fn channel() -> (InterruptTrigger, Interrupt) {
    let (tx, rx) = watch::channel(false);
    (InterruptTrigger { tx }, Interrupt { rx })
}

/// Resolves once the process receives SIGINT, SIGTERM or SIGHUP (Ctrl-C only on non-unix).
pub async fn wait_for_termination() -> io::Result<&'static str> {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        let mut terminate = signal(SignalKind::terminate())?;
        let mut hangup = signal(SignalKind::hangup())?;
        tokio::select! {
            res = tokio::signal::ctrl_c() => res.map(|()| "SIGINT"),
            _ = terminate.recv() => Ok("SIGTERM"),
            _ = hangup.recv() => Ok("SIGHUP"),
        }
    }

    #[cfg(not(unix))]
    {
        tokio::signal::ctrl_c().await.map(|()| "ctrl-c")
    }
}

/// Waits for a termination signal and raises the flag. Meant to be spawned on the runtime.
pub async fn listen(trigger: InterruptTrigger) {
    match wait_for_termination().await {
        Ok(signal) => {
            tracing::info!(signal, "termination signal received");
            trigger.raise();
        }
        Err(err) => tracing::warn!(error = %err, "cannot install signal handlers"),
    }
}
