// SPDX-License-Identifier: GPL-3.0-or-later
//
// masterpass
// Copyright (C) 2025  Nikita Podvirnyi <krypt0nn@vk.com>
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

use std::collections::VecDeque;
use std::io::Write;
use std::sync::Arc;
use std::time::{Duration, Instant};

use spin::Mutex;

/// Amount of notices displayed at the same time.
pub const SNACKBAR_MAX_NOTICES: usize = 3;

/// Time a notice stays visible.
pub const SNACKBAR_DURATION: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    Info,
    Success,
    Warning,
    Error
}

impl Variant {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Info    => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error   => "error"
        }
    }
}

/// Fire-and-forget user notifications.
pub trait Notifier: Send + Sync {
    fn enqueue(&self, message: String, variant: Variant);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub variant: Variant,
    pub created_at: Instant
}

/// Toast notifications rendered by the TUI. Keeps at most
/// `SNACKBAR_MAX_NOTICES` notices, the oldest one is dropped first.
#[derive(Debug, Clone)]
pub struct Snackbar {
    notices: Arc<Mutex<VecDeque<Notice>>>,
    duration: Duration
}

impl Default for Snackbar {
    #[inline]
    fn default() -> Self {
        Self::with_duration(SNACKBAR_DURATION)
    }
}

impl Snackbar {
    pub fn with_duration(duration: Duration) -> Self {
        Self {
            notices: Arc::new(Mutex::new(VecDeque::with_capacity(SNACKBAR_MAX_NOTICES))),
            duration
        }
    }

    /// Drop expired notices and return the remaining ones, oldest first.
    pub fn visible(&self) -> Vec<Notice> {
        let mut notices = self.notices.lock();

        notices.retain(|notice| notice.created_at.elapsed() < self.duration);

        notices.iter().cloned().collect()
    }

    /// Remove all the notices.
    pub fn dismiss(&self) {
        self.notices.lock().clear();
    }
}

impl Notifier for Snackbar {
    fn enqueue(&self, message: String, variant: Variant) {
        tracing::debug!(variant = variant.name(), ?message, "snackbar notice");

        let mut notices = self.notices.lock();

        while notices.len() >= SNACKBAR_MAX_NOTICES {
            notices.pop_front();
        }

        notices.push_back(Notice {
            message,
            variant,
            created_at: Instant::now()
        });
    }
}

/// Print notices to stdout (stderr for errors). Used by the headless commands.
#[derive(Debug, Default, Clone, Copy)]
pub struct Console;

impl Notifier for Console {
    fn enqueue(&self, message: String, variant: Variant) {
        let line = format!("[{}] {message}\n", variant.name());

        let _ = match variant {
            Variant::Error => std::io::stderr().write_all(line.as_bytes()),
            _ => std::io::stdout().write_all(line.as_bytes())
        };
    }
}

#[test]
fn test_snackbar_limit() {
    let snackbar = Snackbar::default();

    for i in 0..5 {
        snackbar.enqueue(format!("notice {i}"), Variant::Info);
    }

    let visible = snackbar.visible()
        .into_iter()
        .map(|notice| notice.message)
        .collect::<Vec<_>>();

    assert_eq!(visible, ["notice 2", "notice 3", "notice 4"]);

    snackbar.dismiss();

    assert!(snackbar.visible().is_empty());
}

#[test]
fn test_snackbar_expiry() {
    let snackbar = Snackbar::with_duration(Duration::ZERO);

    snackbar.enqueue(String::from("gone"), Variant::Warning);

    assert!(snackbar.visible().is_empty());
}
