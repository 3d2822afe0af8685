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

use ratatui::Frame;

use crate::consts::*;
use crate::dialogs::Dialog;

use super::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DialogAction {
    None,
    Submit,
    Close
}

/// Handle key press in the dialog.
///
/// Fields can't be edited while the submission is in flight.
pub fn handle_key<F: Form>(dialog: &mut Dialog<F>, key: KeyCode) -> DialogAction {
    let fields = F::FIELDS.len();

    match key {
        KeyCode::Esc => DialogAction::Close,

        KeyCode::Up | KeyCode::BackTab => {
            dialog.focus = dialog.focus.saturating_sub(1);

            DialogAction::None
        }

        KeyCode::Down | KeyCode::Tab => {
            dialog.focus = (dialog.focus + 1).min(Dialog::<F>::focusable() - 1);

            DialogAction::None
        }

        KeyCode::Left if dialog.focus == fields + 1 => {
            dialog.focus = fields;

            DialogAction::None
        }

        KeyCode::Right if dialog.focus == fields => {
            dialog.focus = fields + 1;

            DialogAction::None
        }

        KeyCode::Char(char) if !dialog.loading => {
            if let Some(field) = dialog.form.field_mut(dialog.focus) {
                field.push(char);
            }

            DialogAction::None
        }

        KeyCode::Backspace if !dialog.loading => {
            if let Some(field) = dialog.form.field_mut(dialog.focus) {
                field.pop();
            }

            DialogAction::None
        }

        KeyCode::Enter if dialog.focus < fields => {
            dialog.focus += 1;

            DialogAction::None
        }

        KeyCode::Enter if dialog.focus == fields => DialogAction::Submit,
        KeyCode::Enter => DialogAction::Close,

        _ => DialogAction::None
    }
}

/// Insert pasted text into the focused field.
pub fn handle_paste<F: Form>(dialog: &mut Dialog<F>, text: &str) -> DialogAction {
    if !dialog.loading {
        if let Some(field) = dialog.form.field_mut(dialog.focus) {
            field.push_str(text.trim_end_matches(['\r', '\n']));
        }
    }

    DialogAction::None
}

pub fn render<F: Form>(frame: &mut Frame, dialog: &Dialog<F>) {
    let fields = F::FIELDS.len();

    let area = centered_area(frame.area(), 72, fields as u16 * 3 + 8);

    let block = Block::bordered()
        .border_style(Style::new().fg(TUI_SECONDARY_COLOR))
        .title_top(Line::from(format!(" {} ", F::TITLE)).centered());

    let inner_area = block.inner(area);

    frame.render_widget(Clear, area);
    frame.render_widget(block, area);

    let mut constraints = vec![Constraint::Length(1)];

    constraints.extend((0..fields).map(|_| Constraint::Length(3)));
    constraints.extend([Constraint::Length(1), Constraint::Length(3)]);

    let areas = Layout::vertical(constraints).split(inner_area);

    let primary_block = Block::bordered()
        .border_style(Style::new().fg(TUI_PRIMARY_COLOR));

    let disabled_style = Style::new().fg(TUI_DISABLED_COLOR);

    // Draw fields.

    for (index, label) in F::FIELDS.iter().enumerate() {
        let value = dialog.form.field(index)
            .map(String::as_str)
            .unwrap_or_default();

        let block = if dialog.focus == index && !dialog.loading {
            primary_block.clone()
        } else {
            Block::bordered()
        };

        let mut input = Paragraph::new(value)
            .block(block.title_top(*label));

        if dialog.loading {
            input = input.style(disabled_style);
        }

        frame.render_widget(input, areas[index + 1]);
    }

    // Draw buttons.

    let [_, submit_button_area, _, close_button_area, _] = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Length(14),
        Constraint::Length(1),
        Constraint::Length(9),
        Constraint::Fill(1)
    ]).areas(areas[fields + 2]);

    let submit_label = if dialog.loading {
        String::from("working...")
    } else {
        F::SUBMIT.to_string()
    };

    let mut submit_button = button(&submit_label, dialog.focus == fields);

    if dialog.loading {
        submit_button = submit_button.style(disabled_style);
    }

    frame.render_widget(submit_button, submit_button_area);
    frame.render_widget(button("close", dialog.focus == fields + 1), close_button_area);
}

#[cfg(test)]
use crate::dialogs::{PaymentForm, TokenMintForm};

#[test]
fn test_typing() {
    let mut dialog = Dialog::<PaymentForm>::default();

    for char in "ABC".chars() {
        assert_eq!(handle_key(&mut dialog, KeyCode::Char(char)), DialogAction::None);
    }

    handle_key(&mut dialog, KeyCode::Backspace);
    handle_key(&mut dialog, KeyCode::Enter);
    handle_paste(&mut dialog, "1.5\n");

    assert_eq!(dialog.form.receiver, "AB");
    assert_eq!(dialog.form.amount, "1.5");
    assert_eq!(dialog.focus, 1);
}

#[test]
fn test_buttons() {
    let mut dialog = Dialog::<TokenMintForm>::default();

    for _ in 0..10 {
        handle_key(&mut dialog, KeyCode::Down);
    }

    assert_eq!(dialog.focus, 5);
    assert_eq!(handle_key(&mut dialog, KeyCode::Enter), DialogAction::Close);

    handle_key(&mut dialog, KeyCode::Left);

    assert_eq!(dialog.focus, 4);
    assert_eq!(handle_key(&mut dialog, KeyCode::Enter), DialogAction::Submit);
    assert_eq!(handle_key(&mut dialog, KeyCode::Esc), DialogAction::Close);
}

#[test]
fn test_locked_while_loading() {
    let mut dialog = Dialog::<PaymentForm>::default();

    dialog.loading = true;

    handle_key(&mut dialog, KeyCode::Char('A'));
    handle_paste(&mut dialog, "ABC");

    assert!(dialog.form.receiver.is_empty());
}
