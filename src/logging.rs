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

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Default log filter used when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "info";

/// Initialize logging into daily rotated files in the given folder.
///
/// The terminal is owned by the TUI, so nothing is printed to stdout. The
/// returned guard flushes pending records when dropped and must be kept alive
/// while the app is running.
pub fn init_logging(logs_folder: impl AsRef<Path>) -> anyhow::Result<WorkerGuard> {
    let logs_folder = logs_folder.as_ref();

    std::fs::create_dir_all(logs_folder)?;

    let file_appender = tracing_appender::rolling::daily(logs_folder, "masterpass.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_ansi(false)
                .with_writer(non_blocking)
        )
        .try_init()
        .map_err(|err| anyhow::anyhow!("failed to initialize logging: {err}"))?;

    Ok(guard)
}

#[test]
fn test_creates_folder() -> anyhow::Result<()> {
    let folder = tempfile::tempdir()?;
    let logs_folder = folder.path().join("nested").join("logs");

    // Global subscriber can be installed only once per process, so only the
    // folder creation is verified.
    let _guard = init_logging(&logs_folder);

    assert!(logs_folder.exists());

    Ok(())
}
