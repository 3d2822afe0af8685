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
use crate::utils::shorten;

use super::*;

const HEADLINE: &str = "Welcome to AfriMesh MasterPass 🎟️";

const SUBHEADING: &str = "Your ticket to join the AfriMesh Web. AfriMesh is a \
    decentralized, community-powered WiFi network built on Algorand.";

const CALL_TO_ACTION: &str = "Connect, explore, and get inspired!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HomeButton {
    ConnectWallet,
    SendPayment,
    MintNft,
    MintToken,
    Exit
}

impl HomeButton {
    /// Buttons shown on the home screen. Wallet actions are available only
    /// when the wallet is connected.
    pub fn visible(connected: bool) -> Vec<Self> {
        if connected {
            vec![
                Self::ConnectWallet,
                Self::SendPayment,
                Self::MintNft,
                Self::MintToken,
                Self::Exit
            ]
        } else {
            vec![Self::ConnectWallet, Self::Exit]
        }
    }

    pub const fn label(&self, connected: bool) -> &'static str {
        match self {
            Self::ConnectWallet if connected => "Wallet connection",
            Self::ConnectWallet => "Please connect wallet",
            Self::SendPayment   => "Send payment",
            Self::MintNft       => "Mint AfriMesh MasterPass NFT",
            Self::MintToken     => "Mint token",
            Self::Exit          => "Exit"
        }
    }
}

/// Button selected after the `current` one.
pub fn next(buttons: &[HomeButton], current: HomeButton) -> HomeButton {
    let index = buttons.iter()
        .position(|button| button == &current)
        .map(|index| (index + 1).min(buttons.len().saturating_sub(1)))
        .unwrap_or_default();

    buttons.get(index).copied().unwrap_or(current)
}

/// Button selected before the `current` one.
pub fn previous(buttons: &[HomeButton], current: HomeButton) -> HomeButton {
    let index = buttons.iter()
        .position(|button| button == &current)
        .map(|index| index.saturating_sub(1))
        .unwrap_or_default();

    buttons.get(index).copied().unwrap_or(current)
}

pub fn render(
    frame: &mut Frame,
    state: &AppState,
    buttons: &[HomeButton],
    selected: HomeButton
) {
    let session = state.session.read();
    let connected = session.is_connected();

    let area = centered_area(frame.area(), 64, 12 + buttons.len() as u16 * 3);

    let block = Block::bordered()
        .border_style(Style::new().fg(TUI_PRIMARY_COLOR))
        .title_top(Line::from(" masterpass ").centered())
        .title_bottom(Line::from(format!(" {} ", state.network)).right_aligned());

    let inner_area = block.inner(area);

    frame.render_widget(block, area);

    let [headline_area, subheading_area, wallet_area, buttons_area] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(5),
        Constraint::Length(2),
        Constraint::Fill(1)
    ]).areas(inner_area);

    frame.render_widget(
        Paragraph::new(HEADLINE)
            .centered()
            .style(Style::new().fg(TUI_SECONDARY_COLOR).add_modifier(Modifier::BOLD)),
        headline_area
    );

    frame.render_widget(
        Paragraph::new(vec![
            Line::from(SUBHEADING),
            Line::from(CALL_TO_ACTION)
        ])
            .centered()
            .wrap(Wrap { trim: true }),
        subheading_area
    );

    let wallet = match (session.title(), session.active_address()) {
        (Some(title), Some(address)) => Line::from(vec![
            Span::raw(format!("{title}: ")),
            Span::styled(shorten(address.to_string(), 8), Style::new().fg(TUI_SUCCESS_COLOR))
        ]),

        _ => Line::styled("wallet is not connected", Style::new().fg(TUI_DISABLED_COLOR))
    };

    frame.render_widget(Paragraph::new(wallet).centered(), wallet_area);

    let [_, buttons_area, _] = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Length(34),
        Constraint::Fill(1)
    ]).areas(buttons_area);

    let areas = Layout::vertical(buttons.iter().map(|_| Constraint::Length(3)))
        .split(buttons_area);

    for (button, area) in buttons.iter().zip(areas.iter()) {
        frame.render_widget(
            super::button(button.label(connected), *button == selected),
            *area
        );
    }
}

#[test]
fn test_visible_buttons() {
    assert_eq!(HomeButton::visible(false), [HomeButton::ConnectWallet, HomeButton::Exit]);
    assert_eq!(HomeButton::visible(true).len(), 5);
}

#[test]
fn test_navigation() {
    let buttons = HomeButton::visible(true);

    assert_eq!(next(&buttons, HomeButton::ConnectWallet), HomeButton::SendPayment);
    assert_eq!(next(&buttons, HomeButton::Exit), HomeButton::Exit);
    assert_eq!(previous(&buttons, HomeButton::MintToken), HomeButton::MintNft);
    assert_eq!(previous(&buttons, HomeButton::ConnectWallet), HomeButton::ConnectWallet);

    let buttons = HomeButton::visible(false);

    assert_eq!(next(&buttons, HomeButton::MintNft), HomeButton::ConnectWallet);
}
