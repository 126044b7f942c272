pub mod color;
pub mod theme;
pub mod widgets;

use ratatui::{
    Frame,
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, BorderType, Paragraph, Wrap},
};

use crate::app::state::AppState;
use theme::{ColorCapability, card_palette, quantize};
use widgets::{
    card::{CardLayout, ProfileCard},
    storm::StormBackdrop,
};

const HINT: &str = "↑↓ select · enter open · q quit";

/// Draws one frame: the storm, then the card on top of it.
pub fn render(frame: &mut Frame, state: &AppState) {
    let area = frame.area();
    frame.render_widget(StormBackdrop { scene: &state.scene }, area);

    match CardLayout::compute(area, &state.profile, state.settings.icon_mode) {
        Some(layout) => {
            let palette = card_palette(state.settings.color_capability);
            frame.render_widget(
                ProfileCard {
                    profile: &state.profile,
                    layout: &layout,
                    selected: state.selected_link,
                    palette,
                    icons: state.settings.icon_mode,
                },
                area,
            );
            if layout.panel.bottom() < area.bottom() {
                let hint_row = Rect::new(area.x, area.bottom() - 1, area.width, 1);
                frame.render_widget(
                    Paragraph::new(Line::from(HINT))
                        .alignment(Alignment::Center)
                        .style(Style::default().fg(palette.border)),
                    hint_row,
                );
            }
        }
        None => render_too_small(frame, area),
    }

    quantize_buffer(frame.buffer_mut(), state.settings.color_capability);
}

fn render_too_small(frame: &mut Frame, area: Rect) {
    let width = area.width.min(34);
    let height = area.height.min(5);
    let popup = Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    );
    let warning = Paragraph::new("Terminal too small for the card. Enlarge it or press q.")
        .wrap(Wrap { trim: true })
        .alignment(Alignment::Center)
        .style(Style::default().add_modifier(Modifier::BOLD))
        .block(
            Block::bordered()
                .border_type(BorderType::Rounded)
                .title("stormbio"),
        );
    frame.render_widget(warning, popup);
}

fn quantize_buffer(buf: &mut Buffer, capability: ColorCapability) {
    if capability == ColorCapability::TrueColor {
        return;
    }
    for cell in &mut buf.content {
        cell.fg = quantize(cell.fg, capability);
        cell.bg = quantize(cell.bg, capability);
    }
}
