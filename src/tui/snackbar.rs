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
use crate::notifications::{Notice, Variant};

use super::*;

const NOTICE_WIDTH: u16 = 60;
const NOTICE_HEIGHT: u16 = 4;

pub const fn variant_color(variant: Variant) -> Color {
    match variant {
        Variant::Info    => TUI_INFO_COLOR,
        Variant::Success => TUI_SUCCESS_COLOR,
        Variant::Warning => TUI_WARNING_COLOR,
        Variant::Error   => TUI_ERROR_COLOR
    }
}

/// Draw notices stacked in the bottom left corner, the newest one at the
/// bottom.
pub fn render(frame: &mut Frame, notices: &[Notice]) {
    if notices.is_empty() {
        return;
    }

    let area = frame.area();

    let width = NOTICE_WIDTH.min(area.width);
    let height = (NOTICE_HEIGHT * notices.len() as u16).min(area.height);

    let area = Rect::new(
        area.x,
        area.y + area.height - height,
        width,
        height
    );

    let areas = Layout::vertical(notices.iter().map(|_| Constraint::Length(NOTICE_HEIGHT)))
        .split(area);

    for (notice, area) in notices.iter().zip(areas.iter()) {
        let color = variant_color(notice.variant);

        let block = Block::bordered()
            .border_style(Style::new().fg(color))
            .title_top(Line::styled(format!(" {} ", notice.variant.name()), Style::new().fg(color)));

        frame.render_widget(Clear, *area);

        frame.render_widget(
            Paragraph::new(notice.message.as_str())
                .wrap(Wrap { trim: true })
                .block(block),
            *area
        );
    }
}

#[test]
fn test_render() -> anyhow::Result<()> {
    use std::time::Instant;

    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    let mut terminal = Terminal::new(TestBackend::new(80, 20))?;

    let notices = [
        Notice {
            message: String::from("Minting NFT..."),
            variant: Variant::Info,
            created_at: Instant::now()
        },
        Notice {
            message: String::from("Failed to mint NFT"),
            variant: Variant::Error,
            created_at: Instant::now()
        }
    ];

    terminal.draw(|frame| render(frame, &notices))?;

    let buffer = terminal.backend().buffer();

    let rows = (0..20)
        .map(|y| {
            (0..80)
                .map(|x| buffer[(x, y)].symbol())
                .collect::<String>()
        })
        .collect::<Vec<_>>();

    assert!(rows[13].contains("Minting NFT..."));
    assert!(rows[17].contains("Failed to mint NFT"));

    Ok(())
}
