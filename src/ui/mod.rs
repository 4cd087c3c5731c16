pub mod background;
pub mod color;
pub mod flash;
pub mod particles;
pub mod raster;
pub mod renderer;
pub mod snapshot;
pub mod terminal;
pub mod transition;

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::Paragraph,
};

use crate::{app::state::AppState, ui::terminal::SurfaceView};

pub fn render(frame: &mut Frame, state: &AppState) {
    let area = frame.area();
    frame.render_widget(
        SurfaceView {
            surface: state.surface(),
            capability: state.capability,
        },
        area,
    );
    render_status_badge(frame, area, state);
}

fn render_status_badge(frame: &mut Frame, area: Rect, state: &AppState) {
    if area.height < 2 || area.width < 12 {
        return;
    }
    let (text, color) = match &state.last_error {
        Some(_) => (format!("⚠ {}", state.status_line()), Color::Yellow),
        None => (state.status_line(), Color::White),
    };
    let width = (text.chars().count() as u16 + 2).min(area.width);
    let badge_area = Rect {
        x: area.right().saturating_sub(width + 1),
        y: area.y,
        width,
        height: 1,
    };
    let badge = Paragraph::new(Line::from(text)).style(
        Style::default()
            .fg(color)
            .bg(Color::Black)
            .add_modifier(Modifier::BOLD),
    );
    frame.render_widget(badge, badge_area);
}
