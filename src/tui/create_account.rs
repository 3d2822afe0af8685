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

use masterpass_protocol::prelude::*;

use crate::accounts::Account;
use crate::consts::*;
use crate::utils::*;

use super::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Selection {
    SecretKey,
    Title,
    Buttons
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum SelectedButton {
    Save,
    Random,
    Exit
}

/// Account creation screen. The secret key is randomly generated and can be
/// replaced by a pasted base64 key to import an existing account.
pub async fn render(
    terminal: &mut RatatuiTerminal
) -> anyhow::Result<Option<Account>> {
    let mut selection = Selection::Title;
    let mut selected_button = SelectedButton::Save;

    let mut rng = get_rng();

    let mut secret_key = SecretKey::random(&mut rng).to_base64();
    let mut title = String::new();

    loop {
        let parsed_key = SecretKey::from_base64(secret_key.trim());

        terminal.draw(|frame| {
            // Calculate areas for all the widgets.

            let [_, area, _] = Layout::horizontal([
                Constraint::Percentage(20),
                Constraint::Fill(1),
                Constraint::Percentage(20)
            ]).areas(frame.area());

            let [_, secret_key_area, address_area, title_area, _, buttons_area, _] = Layout::vertical([
                Constraint::Fill(1),
                Constraint::Length(3),
                Constraint::Length(2),
                Constraint::Length(3),
                Constraint::Length(2),
                Constraint::Length(3),
                Constraint::Fill(1)
            ]).areas(area);

            let [_, save_button_area, _, random_button_area, _, exit_button_area, _] = Layout::horizontal([
                Constraint::Fill(1),
                Constraint::Length(8),
                Constraint::Length(1),
                Constraint::Length(10),
                Constraint::Length(1),
                Constraint::Length(8),
                Constraint::Fill(1)
            ]).areas(buttons_area);

            // Prepare styles.

            let primary_block = Block::bordered()
                .border_style(Style::new().fg(TUI_PRIMARY_COLOR));

            let block_for = |current: Selection| {
                if selection == current {
                    primary_block.clone()
                } else {
                    Block::bordered()
                }
            };

            // Draw secret key input.

            frame.render_widget(
                Paragraph::new(secret_key.as_str())
                    .block(block_for(Selection::SecretKey).title_top("secret key (base64)")),
                secret_key_area
            );

            let address = match &parsed_key {
                Some(secret_key) => Line::styled(
                    format!(" {}", secret_key.address()),
                    Style::new().fg(TUI_DISABLED_COLOR)
                ),

                None => Line::styled(" invalid secret key", Style::new().fg(TUI_ERROR_COLOR))
            };

            frame.render_widget(Paragraph::new(address), address_area);

            // Draw title input.

            frame.render_widget(
                Paragraph::new(title.as_str())
                    .block(block_for(Selection::Title).title_top("title")),
                title_area
            );

            // Draw buttons.

            let is_selected = |button: SelectedButton| {
                selection == Selection::Buttons && selected_button == button
            };

            frame.render_widget(button("save", is_selected(SelectedButton::Save)), save_button_area);
            frame.render_widget(button("random", is_selected(SelectedButton::Random)), random_button_area);
            frame.render_widget(button("exit", is_selected(SelectedButton::Exit)), exit_button_area);
        })?;

        loop {
            let key = match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => key,

                Event::Paste(text) => {
                    match selection {
                        Selection::SecretKey => secret_key.push_str(text.trim()),
                        Selection::Title => title.push_str(text.trim_end_matches(['\r', '\n'])),
                        Selection::Buttons => continue
                    }

                    break;
                }

                _ => continue
            };

            match key.code {
                KeyCode::Esc => return Ok(None),

                KeyCode::Char(char) if selection != Selection::Buttons => {
                    match selection {
                        Selection::SecretKey => secret_key.push(char),
                        _ => title.push(char)
                    }

                    break;
                }

                KeyCode::Backspace if selection != Selection::Buttons => {
                    match selection {
                        Selection::SecretKey => secret_key.pop(),
                        _ => title.pop()
                    };

                    break;
                }

                KeyCode::Up | KeyCode::PageUp => {
                    selection = match selection {
                        Selection::SecretKey => Selection::SecretKey,
                        Selection::Title     => Selection::SecretKey,
                        Selection::Buttons   => Selection::Title
                    };

                    break;
                }

                KeyCode::Down | KeyCode::PageDown | KeyCode::Tab => {
                    selection = match selection {
                        Selection::SecretKey => Selection::Title,
                        Selection::Title     => Selection::Buttons,
                        Selection::Buttons   => Selection::Buttons
                    };

                    break;
                }

                KeyCode::Left if selection == Selection::Buttons => {
                    selected_button = match selected_button {
                        SelectedButton::Save   => SelectedButton::Save,
                        SelectedButton::Random => SelectedButton::Save,
                        SelectedButton::Exit   => SelectedButton::Random
                    };

                    break;
                }

                KeyCode::Right if selection == Selection::Buttons => {
                    selected_button = match selected_button {
                        SelectedButton::Save   => SelectedButton::Random,
                        SelectedButton::Random => SelectedButton::Exit,
                        SelectedButton::Exit   => SelectedButton::Exit
                    };

                    break;
                }

                KeyCode::Enter if selection == Selection::Buttons => {
                    match selected_button {
                        SelectedButton::Save => {
                            // Invalid keys can't be saved.
                            if let Some(secret_key) = &parsed_key {
                                let title = match title.trim() {
                                    "" => bytes_to_shortname(secret_key.public_key()),
                                    title => title.to_string()
                                };

                                return Ok(Some(Account::new(title, secret_key.clone())));
                            }
                        }

                        SelectedButton::Random => {
                            secret_key = SecretKey::random(&mut rng).to_base64();

                            break;
                        }

                        SelectedButton::Exit => return Ok(None)
                    }
                }

                KeyCode::Enter => {
                    selection = Selection::Buttons;

                    break;
                }

                _ => ()
            }
        }
    }
}
