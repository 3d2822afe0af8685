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

use std::time::Duration;

use tokio::runtime::Handle;

use ratatui::DefaultTerminal;
use ratatui::crossterm::event::{self, Event, KeyCode, KeyEventKind};

use ratatui::layout::*;
use ratatui::widgets::*;
use ratatui::text::*;
use ratatui::style::*;

use crate::dialogs::{self, Form, SharedDialog};

pub mod app;
pub mod home;
pub mod dialog;
pub mod snackbar;
pub mod connect_wallet;
pub mod create_account;

use app::{AppState, ActiveDialog};
use dialog::DialogAction;
use home::HomeButton;

pub type RatatuiTerminal = DefaultTerminal;

/// How often the screen is redrawn while there's no user input. Submissions
/// and notices change the state in background.
pub const TUI_REFRESH_INTERVAL: Duration = Duration::from_millis(100);

/// Run the masterpass app.
///
/// This function handles keyboard inputs and draws the TUI. Dialog
/// submissions are spawned as separate async tasks which share the app state
/// using locks, so the screen is redrawn periodically to show their progress.
pub async fn run_app(
    runtime: Handle,
    state: AppState,
    terminal: &mut RatatuiTerminal
) -> anyhow::Result<()> {
    let mut selected_button = HomeButton::ConnectWallet;

    loop {
        let connected = state.session.read().is_connected();
        let buttons = HomeButton::visible(connected);

        if !buttons.contains(&selected_button) {
            selected_button = HomeButton::ConnectWallet;
        }

        terminal.draw(|frame| {
            home::render(frame, &state, &buttons, selected_button);

            match state.active_dialog() {
                Some(ActiveDialog::Payment)   => dialog::render(frame, &*state.payment.read()),
                Some(ActiveDialog::NftMint)   => dialog::render(frame, &*state.nft_mint.read()),
                Some(ActiveDialog::TokenMint) => dialog::render(frame, &*state.token_mint.read()),
                None => ()
            }

            snackbar::render(frame, &state.snackbar.visible());
        })?;

        if !event::poll(TUI_REFRESH_INTERVAL)? {
            continue;
        }

        let event = event::read()?;

        // Keyboard events are routed to the open dialog first.
        if let Some(active_dialog) = state.active_dialog() {
            match active_dialog {
                ActiveDialog::Payment   => handle_dialog_event(&runtime, &state, &state.payment, &event),
                ActiveDialog::NftMint   => handle_dialog_event(&runtime, &state, &state.nft_mint, &event),
                ActiveDialog::TokenMint => handle_dialog_event(&runtime, &state, &state.token_mint, &event)
            }

            continue;
        }

        let Event::Key(key) = event else {
            continue;
        };

        if key.kind != KeyEventKind::Press {
            continue;
        }

        match key.code {
            KeyCode::Esc => return Ok(()),

            KeyCode::Up | KeyCode::Left | KeyCode::BackTab => {
                selected_button = home::previous(&buttons, selected_button);
            }

            KeyCode::Down | KeyCode::Right | KeyCode::Tab => {
                selected_button = home::next(&buttons, selected_button);
            }

            KeyCode::Enter => match selected_button {
                HomeButton::ConnectWallet => {
                    connect_wallet::render(&state, terminal).await?;
                }

                HomeButton::SendPayment => state.payment.write().toggle(),
                HomeButton::MintNft     => state.nft_mint.write().toggle(),
                HomeButton::MintToken   => state.token_mint.write().toggle(),

                HomeButton::Exit => return Ok(())
            }

            _ => ()
        }
    }
}

fn handle_dialog_event<F: Form>(
    runtime: &Handle,
    state: &AppState,
    dialog: &SharedDialog<F>,
    event: &Event
) {
    let action = match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => {
            dialog::handle_key(&mut *dialog.write(), key.code)
        }

        Event::Paste(text) => dialog::handle_paste(&mut *dialog.write(), text),

        _ => DialogAction::None
    };

    match action {
        DialogAction::None => (),

        DialogAction::Close => dialog.write().toggle(),

        DialogAction::Submit => {
            let dialog = dialog.clone();
            let session = state.session.read().clone();
            let client = state.client.clone();
            let snackbar = state.snackbar.clone();

            runtime.spawn(async move {
                dialogs::submit(dialog.as_ref(), &session, client.as_ref(), &snackbar).await;
            });
        }
    }
}

/// Area of the given size in the center of the frame.
pub fn centered_area(area: Rect, width: u16, height: u16) -> Rect {
    let [_, area, _] = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Length(width.min(area.width)),
        Constraint::Fill(1)
    ]).areas(area);

    let [_, area, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(height.min(area.height)),
        Constraint::Fill(1)
    ]).areas(area);

    area
}

/// Bordered button, highlighted when selected.
pub fn button(label: &str, selected: bool) -> Paragraph<'_> {
    let block = if selected {
        Block::bordered().border_style(Style::new().fg(crate::consts::TUI_PRIMARY_COLOR))
    } else {
        Block::bordered()
    };

    Paragraph::new(Line::from(label))
        .centered()
        .block(block)
}

#[test]
fn test_centered_area() {
    let area = centered_area(Rect::new(0, 0, 100, 40), 60, 10);

    assert_eq!(area, Rect::new(20, 15, 60, 10));

    let area = centered_area(Rect::new(0, 0, 20, 5), 60, 10);

    assert_eq!(area, Rect::new(0, 0, 20, 5));
}
