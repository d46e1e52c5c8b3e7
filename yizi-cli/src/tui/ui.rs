//! UI rendering using ratatui

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Tabs, Wrap},
    Frame,
};

use yizi_core::radicals;
use yizi_core::{CharacterRecord, SearchMode, SearchView};
use yizi_search::NO_MATCHES;

use super::app::App;

/// Page title
pub const TITLE: &str = "陳國昭老師趙孟頫每日一字教學影片查詢";

/// Primary accent color
const ACCENT: Color = Color::Cyan;
/// Secondary color for less important elements
const SECONDARY: Color = Color::DarkGray;
/// Highlight color for selected items
const HIGHLIGHT: Color = Color::Yellow;
/// Success color
const SUCCESS: Color = Color::Green;
/// Error color
const ERROR: Color = Color::Red;
/// Dim text color
const DIM: Color = Color::Rgb(100, 100, 100);

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

const HELP_TEXT: &str = "\
Tab        切換查詢方式 (字 / 部首)
?  F1      顯示說明
Esc Ctrl+C 離開

字
  輸入文字即查詢，Backspace 刪除

部首
  ← →      選擇筆畫數
  ↑ ↓      選擇部首
  Enter    查詢該部首的字

結果
  PgUp PgDn  捲動三筆  Ctrl+↑ ↓ 捲動一筆

連結
  陳國昭老師創作專欄
    https://www.facebook.com/groups/1396609563919682
  關於開發者
    https://readforwriting.art/";

/// Render the entire UI
pub fn render<S>(frame: &mut Frame, app: &App<S>) {
    let area = frame.area();

    // header + criteria + content + status
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tab header
            Constraint::Length(3), // Input / stroke row
            Constraint::Min(5),    // Content area
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    render_tabs(frame, app, chunks[0]);

    match app.mode() {
        SearchMode::Character => {
            render_input(frame, app, chunks[1]);
            render_results(frame, app, chunks[2]);
        }
        SearchMode::Radical => {
            render_stroke_row(frame, app, chunks[1]);
            let content = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Length(18), Constraint::Min(20)])
                .split(chunks[2]);
            render_radical_list(frame, app, content[0]);
            render_results(frame, app, content[1]);
        }
    }

    render_status_bar(frame, app, chunks[3]);

    if app.show_help {
        render_help_overlay(frame);
    }
}

/// Render the tab header
fn render_tabs<S>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let titles = vec!["1:字", "2:部首"];
    let selected = match app.mode() {
        SearchMode::Character => 0,
        SearchMode::Radical => 1,
    };

    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .title(format!(" {} ", TITLE))
                .title_style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(SECONDARY)),
        )
        .select(selected)
        .style(Style::default().fg(Color::White))
        .highlight_style(Style::default().fg(HIGHLIGHT).add_modifier(Modifier::BOLD));

    frame.render_widget(tabs, area);
}

fn render_input<S>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let block = Block::default()
        .title(" 輸入中文字 ")
        .title_style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ACCENT));

    let line = if app.input.is_empty() {
        Line::from(Span::styled("請輸入要查詢的字", Style::default().fg(DIM)))
    } else {
        Line::from(vec![
            Span::styled(app.input.as_str(), Style::default().fg(Color::White)),
            Span::styled("|", Style::default().fg(ACCENT)),
        ])
    };

    frame.render_widget(Paragraph::new(line).block(block), area);
}

fn render_stroke_row<S>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let current = app.controller.state().stroke_count;
    let mut spans = Vec::new();
    for count in radicals::stroke_counts() {
        let style = if Some(count) == current {
            Style::default().fg(Color::Black).bg(HIGHLIGHT).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        spans.push(Span::styled(format!(" {} ", count), style));
    }

    let block = Block::default()
        .title(" 筆畫數 (← →) ")
        .title_style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ACCENT));

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn render_radical_list<S>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let offered = app.offered_radicals();
    let selected = app.controller.state().selected_radical;

    let items: Vec<ListItem> = offered
        .iter()
        .map(|entry| {
            let marker = if Some(*entry) == selected { "● " } else { "  " };
            ListItem::new(Line::from(vec![
                Span::styled(marker, Style::default().fg(SUCCESS)),
                Span::styled(format!("{:>3} ", entry.number), Style::default().fg(DIM)),
                Span::styled(entry.glyph, Style::default().fg(Color::White)),
            ]))
        })
        .collect();

    let title = if offered.is_empty() {
        " 部首 ".to_string()
    } else {
        format!(" 部首 ({}) ", offered.len())
    };

    let list = List::new(items)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(SECONDARY)),
        )
        .highlight_style(Style::default().fg(HIGHLIGHT).add_modifier(Modifier::BOLD))
        .highlight_symbol("▶");

    let mut state = ListState::default();
    if !offered.is_empty() {
        state.select(Some(app.radical_index));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

/// Lines shown in the results pane for the current view, starting at record `skip`
pub fn result_lines<'a>(view: &SearchView<'a>, tick: usize, skip: usize) -> Vec<Line<'a>> {
    match *view {
        SearchView::Idle => vec![Line::from(Span::styled(
            "輸入文字或選擇部首開始查詢",
            Style::default().fg(DIM),
        ))],
        SearchView::Loading => vec![Line::from(vec![
            Span::styled(SPINNER[tick % SPINNER.len()], Style::default().fg(ACCENT)),
            Span::raw(" 查詢中..."),
        ])],
        SearchView::Error(message) => vec![Line::from(Span::styled(
            format!("錯誤：{}", message),
            Style::default().fg(ERROR).add_modifier(Modifier::BOLD),
        ))],
        SearchView::NoMatches => vec![Line::from(Span::styled(
            NO_MATCHES,
            Style::default().fg(HIGHLIGHT),
        ))],
        SearchView::Results(records) => records.iter().skip(skip).flat_map(record_lines).collect(),
    }
}

fn record_lines(record: &CharacterRecord) -> Vec<Line<'_>> {
    let link = record
        .embed_url()
        .unwrap_or_else(|| record.video_url.clone());
    vec![
        Line::from(Span::styled(
            record.glyph.as_str(),
            Style::default().fg(HIGHLIGHT).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(record.metadata_line(), Style::default().fg(Color::White))),
        Line::from(Span::styled(link, Style::default().fg(ACCENT))),
        Line::from(""),
    ]
}

fn render_results<S>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let view = app.controller.view();
    let title = match view {
        SearchView::Results(records) if app.results_scroll > 0 => format!(
            " 查詢結果 ({}) 第 {} 筆起 ",
            records.len(),
            app.results_scroll + 1
        ),
        SearchView::Results(records) => format!(" 查詢結果 ({}) ", records.len()),
        _ => " 查詢結果 ".to_string(),
    };

    let block = Block::default()
        .title(title)
        .title_style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(SECONDARY));

    let paragraph = Paragraph::new(Text::from(result_lines(&view, app.tick, app.results_scroll)))
        .block(block)
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}

/// Render the status bar
fn render_status_bar<S>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let hints = match app.mode() {
        SearchMode::Character => "PgUp/PgDn:捲動  Tab:部首  ?:說明  Esc:離開",
        SearchMode::Radical => "←→:筆畫  ↑↓:部首  Enter:查詢  PgDn:捲動  Tab:字  ?:說明",
    };

    let mut spans = vec![Span::styled(
        format!(" {} ", app.mode().display_name()),
        Style::default().fg(Color::Black).bg(ACCENT).add_modifier(Modifier::BOLD),
    )];
    if let Some(ref msg) = app.status_message {
        spans.push(Span::styled(format!(" {} ", msg), Style::default().fg(SUCCESS)));
    }
    spans.push(Span::styled(format!(" {}", hints), Style::default().fg(DIM)));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Render the help overlay
fn render_help_overlay(frame: &mut Frame) {
    let area = frame.area();
    let lines = HELP_TEXT.lines().count();
    let height = ((lines + 2) as u16).min(area.height.saturating_sub(2));
    let width = 60.min(area.width.saturating_sub(4));

    let popup_area = Rect {
        x: (area.width.saturating_sub(width)) / 2,
        y: (area.height.saturating_sub(height)) / 2,
        width,
        height,
    };

    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(" 說明 (任意鍵關閉) ")
        .title_style(Style::default().fg(SUCCESS).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(SUCCESS));

    let paragraph = Paragraph::new(HELP_TEXT)
        .block(block)
        .wrap(Wrap { trim: false })
        .style(Style::default().fg(Color::White));

    frame.render_widget(paragraph, popup_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    fn record() -> CharacterRecord {
        CharacterRecord {
            id: 1,
            chapter: 9,
            serial: 1423,
            glyph: "閶".to_string(),
            radical_number: Some(169),
            video_url: "https://www.youtube.com/watch?v=abc&t=3".to_string(),
        }
    }

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn text_of(lines: &[Line<'_>]) -> String {
        lines
            .iter()
            .map(|line| line.spans.iter().map(|s| s.content.as_ref()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_result_lines_for_records() {
        let records = vec![record()];
        let text = text_of(&result_lines(&SearchView::Results(&records), 0, 0));
        assert!(text.contains("閶"));
        assert!(text.contains("章節：9 | 序號：1423 | 部首：169 門"));
        assert!(text.contains("https://www.youtube.com/embed/abc"));
    }

    #[test]
    fn test_result_lines_distinguish_empty_and_error() {
        assert_eq!(text_of(&result_lines(&SearchView::NoMatches, 0, 0)), NO_MATCHES);
        assert_eq!(
            text_of(&result_lines(&SearchView::Error("network timeout"), 0, 0)),
            "錯誤：network timeout"
        );
        assert!(text_of(&result_lines(&SearchView::Loading, 3, 0)).contains("查詢中"));
    }

    #[test]
    fn test_render_both_modes() {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut app = App::new(());

        terminal.draw(|frame| render(frame, &app)).unwrap();

        app.toggle_mode();
        app.stroke_next();
        app.show_help();
        terminal.draw(|frame| render(frame, &app)).unwrap();
    }

    #[test]
    fn test_scrolling_reaches_last_record() {
        let glyphs = ["一", "二", "三", "四", "五", "六", "七", "八", "九", "十"];
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut app = App::new(());

        let pending = app.input_char('一').unwrap();
        let records = glyphs
            .iter()
            .map(|glyph| CharacterRecord {
                glyph: glyph.to_string(),
                radical_number: None,
                ..record()
            })
            .collect();
        app.complete(pending.seq, Ok(records));

        terminal.draw(|frame| render(frame, &app)).unwrap();
        let screen = screen_text(&terminal);
        assert!(screen.contains("二"));
        assert!(!screen.contains("十"));

        while app.results_scroll < glyphs.len() - 1 {
            app.scroll_results_down(crate::tui::app::RESULTS_PAGE);
        }
        terminal.draw(|frame| render(frame, &app)).unwrap();
        let screen = screen_text(&terminal);
        assert!(screen.contains("十"));
        assert!(!screen.contains("二"));
    }

    #[test]
    fn test_help_lists_links() {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut app = App::new(());
        app.show_help();

        terminal.draw(|frame| render(frame, &app)).unwrap();
        let screen = screen_text(&terminal);
        assert!(screen.contains("https://readforwriting.art/"));
        assert!(screen.contains("https://www.facebook.com/groups/1396609563919682"));
    }
}
