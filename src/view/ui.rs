use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::app::{App, Field};
use crate::controller::FormState;

pub fn render(f: &mut Frame, app: &App, state: &FormState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),      // url
            Constraint::Length(3),      // question
            Constraint::Length(3),      // model + status
            Constraint::Percentage(45), // cleaned text
            Constraint::Min(0),         // answer
        ])
        .split(f.area());

    render_input(f, app, chunks[0], Field::Url, "🌐 URL (Enter to scrape)", &state.url);
    render_input(f, app, chunks[1], Field::Question, "❓ Question (Enter to ask)", &state.question);
    render_model_bar(f, app, state, chunks[2]);
    render_text_panel(
        f,
        chunks[3],
        "🧹 Cleaned text (editable)",
        &state.cleaned,
        app.focus == Field::Cleaned,
        app.cleaned_scroll,
    );
    render_text_panel(f, chunks[4], "💡 Answer", &state.answer, false, app.answer_scroll);

    if let Some(message) = app.alerts.current() {
        render_alert(f, &message);
    }
}

fn border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::Cyan)
    }
}

fn render_input(f: &mut Frame, app: &App, area: Rect, field: Field, title: &str, value: &str) {
    let focused = app.focus == field;
    let text = if focused {
        format!("{}_", value)
    } else {
        value.to_string()
    };

    let input = Paragraph::new(text)
        .style(Style::default().fg(Color::Green))
        .block(
            Block::default()
                .title(title.to_string())
                .borders(Borders::ALL)
                .border_style(border_style(focused)),
        );

    f.render_widget(input, area);
}

fn render_model_bar(f: &mut Frame, app: &App, state: &FormState, area: Rect) {
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let model = Paragraph::new(Line::from(vec![
        Span::raw("◀ "),
        Span::styled(
            state.model.as_str(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(" ▶"),
    ]))
    .block(
        Block::default()
            .title("🤖 Model")
            .borders(Borders::ALL)
            .border_style(border_style(app.focus == Field::Model)),
    );
    f.render_widget(model, halves[0]);

    let (status, style) = if state.loading {
        ("Loading...", Style::default().fg(Color::Yellow))
    } else {
        ("Ready  ·  Tab: next field  ·  Esc: quit", Style::default().fg(Color::Gray))
    };
    let status = Paragraph::new(status)
        .style(style)
        .block(Block::default().title("Status").borders(Borders::ALL));
    f.render_widget(status, halves[1]);
}

fn render_text_panel(f: &mut Frame, area: Rect, title: &str, body: &str, focused: bool, scroll: u16) {
    let text = if body.is_empty() {
        Text::from(Span::styled("(empty)", Style::default().fg(Color::DarkGray)))
    } else {
        Text::from(body.to_string())
    };

    let paragraph = Paragraph::new(text)
        .block(
            Block::default()
                .title(title.to_string())
                .borders(Borders::ALL)
                .border_style(border_style(focused)),
        )
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));

    f.render_widget(paragraph, area);
}

fn render_alert(f: &mut Frame, message: &str) {
    let area = centered(f.area(), 60, 7);
    let text = Text::from(vec![
        Line::from(message.to_string()),
        Line::from(""),
        Line::from(Span::styled(
            "Press Enter to dismiss",
            Style::default().fg(Color::Gray).add_modifier(Modifier::ITALIC),
        )),
    ]);

    let popup = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title("⚠ Alert")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        );

    f.render_widget(Clear, area);
    f.render_widget(popup, area);
}

fn centered(area: Rect, percent_x: u16, height: u16) -> Rect {
    let width = (u32::from(area.width) * u32::from(percent_x) / 100) as u16;
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
