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

use anyhow::Context;

use crate::accounts;
use crate::consts::*;
use crate::notifications::{Notifier, Variant};

use super::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Selection {
    Account,
    Buttons
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum SelectedButton {
    Connect,
    Create,
    Disconnect,
    Back
}

impl SelectedButton {
    const ALL: [Self; 4] = [
        Self::Connect,
        Self::Create,
        Self::Disconnect,
        Self::Back
    ];

    const fn label(&self) -> &'static str {
        match self {
            Self::Connect    => "connect",
            Self::Create     => "new account",
            Self::Disconnect => "disconnect",
            Self::Back       => "back"
        }
    }
}

/// Wallet connection screen. Lets the user choose one of the local accounts,
/// create or import a new one, or disconnect the current wallet.
pub async fn render(
    state: &AppState,
    terminal: &mut RatatuiTerminal
) -> anyhow::Result<()> {
    let mut accounts = accounts::read_from(&state.accounts_path)
        .context("failed to read accounts")?;

    let mut selection = if accounts.is_empty() {
        Selection::Buttons
    } else {
        Selection::Account
    };

    let mut selected_account = state.session.read()
        .active_address()
        .and_then(|address| {
            accounts.iter().position(|account| &account.address() == address)
        })
        .unwrap_or_default();

    let mut selected_button = if accounts.is_empty() {
        SelectedButton::Create
    } else {
        SelectedButton::Connect
    };

    loop {
        let connected_address = state.session.read().active_address().copied();

        terminal.draw(|frame| {
            // Calculate areas for all the widgets.

            let [_, area, _] = Layout::horizontal([
                Constraint::Percentage(15),
                Constraint::Fill(1),
                Constraint::Percentage(15)
            ]).areas(frame.area());

            let [_, title_area, account_area, _, buttons_area, _] = Layout::vertical([
                Constraint::Fill(1),
                Constraint::Length(2),
                Constraint::Length(6),
                Constraint::Length(2),
                Constraint::Length(3),
                Constraint::Fill(1)
            ]).areas(area);

            let [account_left_area, _, account_area, _, account_right_area] = Layout::horizontal([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Fill(1),
                Constraint::Length(1),
                Constraint::Length(1)
            ]).areas(account_area);

            let mut button_constraints = vec![Constraint::Fill(1)];

            for button in SelectedButton::ALL {
                button_constraints.push(Constraint::Length(button.label().len() as u16 + 4));
                button_constraints.push(Constraint::Length(1));
            }

            button_constraints.pop();
            button_constraints.push(Constraint::Fill(1));

            let button_areas = Layout::horizontal(button_constraints)
                .split(buttons_area);

            // Prepare styles.

            let primary_block = Block::bordered()
                .border_style(Style::new().fg(TUI_PRIMARY_COLOR));

            let disabled_style = Style::new().fg(TUI_DISABLED_COLOR);

            frame.render_widget(
                Paragraph::new("Select wallet account")
                    .centered()
                    .style(Style::new().add_modifier(Modifier::BOLD)),
                title_area
            );

            // Draw account selection widgets.

            let block = if selection == Selection::Account {
                primary_block.clone()
            } else {
                Block::bordered()
            };

            match accounts.get(selected_account) {
                Some(account) => {
                    let address = account.address();

                    let mut lines = vec![
                        Line::from(format!("{} {} [{}]", account.emoji(), account.title(), account.shortname())),
                        Line::from(address.to_string())
                    ];

                    if Some(address) == connected_address {
                        lines.push(Line::styled("connected", Style::new().fg(TUI_SUCCESS_COLOR)));
                    }

                    frame.render_widget(
                        Paragraph::new(lines)
                            .centered()
                            .wrap(Wrap { trim: true })
                            .block(block.title_top(format!("account {} / {}", selected_account + 1, accounts.len()))),
                        account_area
                    );
                }

                None => {
                    frame.render_widget(
                        Paragraph::new("no accounts yet, create a new one")
                            .centered()
                            .style(disabled_style)
                            .block(block.title_top("account")),
                        account_area
                    );
                }
            }

            if selected_account > 0 {
                frame.render_widget(Paragraph::new("<"), account_left_area);
            }

            if selected_account + 1 < accounts.len() {
                frame.render_widget(Paragraph::new(">"), account_right_area);
            }

            // Draw buttons.

            for (index, button) in SelectedButton::ALL.iter().enumerate() {
                let mut widget = super::button(
                    button.label(),
                    selection == Selection::Buttons && selected_button == *button
                );

                if *button == SelectedButton::Disconnect && connected_address.is_none() {
                    widget = widget.style(disabled_style);
                }

                frame.render_widget(widget, button_areas[index * 2 + 1]);
            }
        })?;

        loop {
            let Event::Key(key) = event::read()? else {
                continue;
            };

            if key.kind != KeyEventKind::Press {
                continue;
            }

            match key.code {
                KeyCode::Esc => return Ok(()),

                KeyCode::Up | KeyCode::PageUp if !accounts.is_empty() => {
                    selection = Selection::Account;

                    break;
                }

                KeyCode::Down | KeyCode::PageDown => {
                    selection = Selection::Buttons;

                    break;
                }

                KeyCode::Left => match selection {
                    Selection::Account if selected_account > 0 => {
                        selected_account -= 1;

                        break;
                    }

                    Selection::Buttons => {
                        let index = SelectedButton::ALL.iter()
                            .position(|button| *button == selected_button)
                            .unwrap_or_default();

                        selected_button = SelectedButton::ALL[index.saturating_sub(1)];

                        break;
                    }

                    _ => ()
                }

                KeyCode::Right => match selection {
                    Selection::Account if selected_account + 1 < accounts.len() => {
                        selected_account += 1;

                        break;
                    }

                    Selection::Buttons => {
                        let index = SelectedButton::ALL.iter()
                            .position(|button| *button == selected_button)
                            .unwrap_or_default();

                        selected_button = SelectedButton::ALL[(index + 1).min(SelectedButton::ALL.len() - 1)];

                        break;
                    }

                    _ => ()
                }

                KeyCode::Enter => match selection {
                    Selection::Account => {
                        selection = Selection::Buttons;
                        selected_button = SelectedButton::Connect;

                        break;
                    }

                    Selection::Buttons => match selected_button {
                        SelectedButton::Connect => {
                            if let Some(account) = accounts.get(selected_account) {
                                state.connect(account);

                                state.snackbar.enqueue(
                                    format!("Wallet {} connected", account.title()),
                                    Variant::Success
                                );

                                return Ok(());
                            }
                        }

                        SelectedButton::Create => {
                            if let Some(account) = create_account::render(terminal).await? {
                                let (index, inserted) = accounts::insert(&mut accounts, account);

                                if inserted {
                                    accounts::write_to(&state.accounts_path, accounts.clone())
                                        .context("failed to save accounts")?;
                                } else {
                                    state.snackbar.enqueue(
                                        format!("Account {} already exists", accounts[index].title()),
                                        Variant::Warning
                                    );
                                }

                                selected_account = index;
                                selection = Selection::Account;
                            }

                            break;
                        }

                        SelectedButton::Disconnect => {
                            if connected_address.is_some() {
                                state.disconnect();

                                state.snackbar.enqueue(
                                    String::from("Wallet disconnected"),
                                    Variant::Info
                                );

                                break;
                            }
                        }

                        SelectedButton::Back => return Ok(())
                    }
                }

                _ => ()
            }
        }
    }
}
