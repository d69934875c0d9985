use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph};

use crate::tui::app::App;
use crate::tui::popup::ConfirmDialog;

use super::helpers::{center, centered_rect_fixed};

/// Render a yes/no question, defaulting to no
pub fn render_confirm(frame: &mut Frame, app: &App, dialog: &ConfirmDialog, area: Rect) {
    let popup_w: u16 = 50.min(area.width.saturating_sub(2));
    let inner_w = popup_w.saturating_sub(2) as usize;
    let text_style = Style::default().fg(app.theme.text);

    let lines = vec![
        Line::from(Span::styled(center(&dialog.message, inner_w), text_style)),
        Line::from(""),
        Line::from(Span::styled(
            center("y/N", inner_w),
            text_style.add_modifier(Modifier::BOLD),
        )),
    ];

    let popup_h = (lines.len() as u16) + 2;
    let overlay = centered_rect_fixed(popup_w, popup_h, area);
    frame.render_widget(Clear, overlay);

    let block = Block::bordered()
        .title(Span::styled(" Confirmation ", text_style))
        .border_style(Style::default().fg(app.theme.primary));
    frame.render_widget(Paragraph::new(lines).block(block), overlay);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::task::TaskId;
    use crate::tui::popup::ConfirmAction;
    use crate::tui::render::test_helpers::{TERM_H, TERM_W, app_with, render_to_string};

    #[test]
    fn shows_message_and_default() {
        let app = app_with(vec![("Todo", vec![])]);
        let dialog = ConfirmDialog {
            message: "Delete \"Ship it\"?".into(),
            action: ConfirmAction::DeleteTask {
                task_id: TaskId::new(),
            },
        };
        let out = render_to_string(TERM_W, TERM_H, |frame, area| {
            render_confirm(frame, &app, &dialog, area)
        });
        assert!(out.contains("Confirmation"));
        assert!(out.contains("Delete \"Ship it\"?"));
        assert!(out.contains("y/N"));
    }
}
