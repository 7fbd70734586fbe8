use artifact_demo_core::app::{TagViewMode, BROWSER_TAB, COMMANDS_TAB, MAIN_GROUP};
use artifact_demo_core::domain::{lookup, render_invocation, NavbarStyle, Parameters};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Tabs, Wrap},
    Frame,
};

use super::model::{InputMode, TuiModel};
use super::showcase::{CopyState, DocLine, DEMO_GROUP, NAVBAR_HEIGHT};
use crate::cli::Page;

/// Rows of the title bar
const TITLE_HEIGHT: u16 = 1;

/// Rows of the status/input bar
const STATUS_HEIGHT: u16 = 3;

/// The View component of MVU - responsible for rendering the model
pub struct TuiView;

impl TuiView {
    /// Rows left for the showcase document on a terminal `height` rows tall
    pub fn showcase_document_rows(height: u16) -> usize {
        height.saturating_sub(TITLE_HEIGHT + STATUS_HEIGHT + NAVBAR_HEIGHT as u16) as usize
    }

    /// Render the entire TUI based on the current model state
    pub fn render(model: &TuiModel, frame: &mut Frame) {
        let size = frame.area();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(TITLE_HEIGHT),  // Title bar
                Constraint::Min(0),                // Main content
                Constraint::Length(STATUS_HEIGHT), // Status/input bar
            ])
            .split(size);

        Self::render_title_bar(model, frame, chunks[0]);

        match model.page {
            Page::Demo => Self::render_demo_page(model, frame, chunks[1]),
            Page::Showcase => Self::render_showcase_page(model, frame, chunks[1]),
        }

        Self::render_status_bar(model, frame, chunks[2]);
    }

    /// Render the title bar
    fn render_title_bar(model: &TuiModel, frame: &mut Frame, area: Rect) {
        let title = match model.page {
            Page::Demo => "Git Artifact Manager - Demo",
            Page::Showcase => "Git Artifact - Showcase",
        };

        let pending = model.demo.pending();
        let running_indicator = if pending > 0 {
            format!(" [RUNNING {}]", pending)
        } else {
            String::new()
        };

        let title_paragraph = Paragraph::new(format!("{}{}", title, running_indicator))
            .style(Style::default().fg(Color::White).bg(Color::Blue))
            .alignment(Alignment::Center);

        frame.render_widget(title_paragraph, area);
    }

    fn render_demo_page(model: &TuiModel, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(area);

        Self::render_main_tabs(model, frame, chunks[0]);

        match model.active_tab() {
            COMMANDS_TAB | BROWSER_TAB => {
                let body = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
                    .split(chunks[1]);

                if model.active_tab() == COMMANDS_TAB {
                    Self::render_commands(model, frame, body[0]);
                } else {
                    Self::render_tag_browser(model, frame, body[0]);
                }
                Self::render_output(model, frame, body[1]);
            }
            _ => Self::render_help_view(frame, chunks[1]),
        }
    }

    fn render_main_tabs(model: &TuiModel, frame: &mut Frame, area: Rect) {
        let Some(group) = model.demo.view().group(MAIN_GROUP) else {
            return;
        };

        let titles: Vec<Line> = group
            .tabs()
            .iter()
            .map(|tab| Line::from(tab.title.clone()))
            .collect();

        let tabs = Tabs::new(titles)
            .block(Block::default().borders(Borders::ALL))
            .select(group.active_index().unwrap_or(0))
            .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));

        frame.render_widget(tabs, area);
    }

    /// Render the command picker and the focused command's form
    fn render_commands(model: &TuiModel, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
            .split(area);

        let items: Vec<ListItem> = model
            .form
            .commands()
            .iter()
            .enumerate()
            .map(|(index, kind)| {
                let style = if index == model.form.selected_index() {
                    Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                ListItem::new(Line::from(Span::styled(kind.id(), style)))
            })
            .collect();

        let list = List::new(items).block(Block::default().borders(Borders::ALL).title("Commands"));
        frame.render_widget(list, chunks[0]);

        let kind = model.form.selected_kind();
        let mut lines = vec![
            Line::from(Span::styled(kind.summary(), Style::default().add_modifier(Modifier::BOLD))),
            Line::from(""),
        ];

        if kind.params().is_empty() {
            lines.push(Line::from(Span::styled("No options", Style::default().fg(Color::Gray))));
        }

        for (index, spec) in kind.params().iter().enumerate() {
            let focused = index == model.form.focused_index();
            let marker = if focused { "> " } else { "  " };
            let required = if spec.required { "*" } else { "" };
            let value = model.form.value(kind, spec.name);
            let cursor = if focused { "_" } else { "" };

            let label_style = if focused {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            lines.push(Line::from(vec![
                Span::styled(format!("{}{}{}: ", marker, spec.name.label(), required), label_style),
                Span::raw(format!("{}{}", value, cursor)),
            ]));
        }

        let params = Parameters::project(kind, &model.form.raw_params());
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("$ {}", render_invocation(kind, &params)),
            Style::default().fg(Color::Green),
        )));

        let form = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title(kind.id()))
            .wrap(Wrap { trim: false });
        frame.render_widget(form, chunks[1]);
    }

    fn render_tag_browser(model: &TuiModel, frame: &mut Frame, area: Rect) {
        let browser = model.demo.tag_browser();
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(area);

        let items: Vec<ListItem> = browser
            .visible_tags()
            .into_iter()
            .enumerate()
            .map(|(index, tag)| {
                let text = match browser.view_mode() {
                    TagViewMode::Graph => match tag.split_once('/') {
                        Some((_, leaf)) => format!("│ └─ {}", leaf),
                        None => format!("● {}", tag),
                    },
                    TagViewMode::List => tag.to_string(),
                    TagViewMode::Timeline => format!("{}  {}", lookup(tag).date, tag),
                };
                let style = if index == browser.cursor() {
                    Style::default().bg(Color::DarkGray)
                } else {
                    Style::default()
                };
                ListItem::new(Line::from(Span::styled(text, style)))
            })
            .collect();

        let title = if browser.search().is_empty() {
            format!("Tags [{}]", browser.view_mode())
        } else {
            format!("Tags [{}] /{}", browser.view_mode(), browser.search())
        };
        let list = List::new(items).block(Block::default().borders(Borders::ALL).title(title));
        frame.render_widget(list, chunks[0]);

        let lines = match browser.detail() {
            Some((name, detail)) => vec![
                Line::from(Span::styled(name.to_string(), Style::default().add_modifier(Modifier::BOLD))),
                Line::from(""),
                Line::from(format!("Commit:    {}", detail.commit)),
                Line::from(format!("Date:      {}", detail.date)),
                Line::from(format!("Author:    {}", detail.author)),
                Line::from(format!("Message:   {}", detail.message)),
                Line::from(format!("Artifacts: {}", detail.artifacts.join(", "))),
            ],
            None => vec![Line::from(Span::styled(
                "Select a tag and press Enter",
                Style::default().fg(Color::Gray),
            ))],
        };

        let details = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title("Tag Details"))
            .wrap(Wrap { trim: true });
        frame.render_widget(details, chunks[1]);
    }

    /// Render the transcript, anchored to its tail unless scrolled back
    fn render_output(model: &TuiModel, frame: &mut Frame, area: Rect) {
        let lines = model.demo.output().lines();
        let height = area.height.saturating_sub(2) as usize;
        let top = lines
            .len()
            .saturating_sub(height)
            .saturating_sub(model.output_scroll);

        let title = if model.output_scroll > 0 {
            format!("Output (+{})", model.output_scroll)
        } else {
            "Output".to_string()
        };

        let text: Vec<Line> = lines.into_iter().map(Line::from).collect();
        let output = Paragraph::new(text)
            .block(Block::default().borders(Borders::ALL).title(title))
            .scroll((top.min(u16::MAX as usize) as u16, 0));
        frame.render_widget(output, area);
    }

    fn render_help_view(frame: &mut Frame, area: Rect) {
        let help_text = vec![
            Line::from(Span::styled("Git Artifact Demo Help", Style::default().add_modifier(Modifier::BOLD))),
            Line::from(""),
            Line::from(Span::styled("Global:", Style::default().add_modifier(Modifier::UNDERLINED))),
            Line::from("  Tab/Shift+Tab  Switch tab"),
            Line::from("  F2             Demo / showcase page"),
            Line::from("  F1 or ?        This help"),
            Line::from("  q or Ctrl+C    Quit"),
            Line::from(""),
            Line::from(Span::styled("Commands:", Style::default().add_modifier(Modifier::UNDERLINED))),
            Line::from("  ↑/↓            Choose command"),
            Line::from("  ←/→            Choose field, then type to edit it"),
            Line::from("  Enter          Execute"),
            Line::from("  Ctrl+L         Clear output"),
            Line::from("  PgUp/PgDn      Scroll output"),
            Line::from(""),
            Line::from(Span::styled("Tag Browser:", Style::default().add_modifier(Modifier::UNDERLINED))),
            Line::from("  /              Search tags"),
            Line::from("  j/k            Select tag, Enter for details"),
            Line::from("  l / r          Load / refresh repository"),
            Line::from("  v              Cycle view mode"),
            Line::from(""),
            Line::from(Span::styled("Showcase:", Style::default().add_modifier(Modifier::UNDERLINED))),
            Line::from("  j/k PgUp/PgDn  Scroll"),
            Line::from("  1-6            Jump to section"),
            Line::from("  ←/→            Demo tabs"),
            Line::from("  n / c          Next snippet / copy it"),
        ];

        let help = Paragraph::new(help_text)
            .block(Block::default().borders(Borders::ALL).title("Help"))
            .wrap(Wrap { trim: false });
        frame.render_widget(help, area);
    }

    fn render_showcase_page(model: &TuiModel, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(NAVBAR_HEIGHT as u16), Constraint::Min(0)])
            .split(area);

        Self::render_navbar(model, frame, chunks[0]);
        Self::render_document(model, frame, chunks[1]);
    }

    /// Section links; the one under the viewport top is highlighted
    fn render_navbar(model: &TuiModel, frame: &mut Frame, area: Rect) {
        let showcase = &model.showcase;
        let active = showcase.active_section().map(|section| section.id.as_str());

        let mut spans = Vec::new();
        for (index, section) in showcase.sections().iter().enumerate() {
            let style = if Some(section.id.as_str()) == active {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            spans.push(Span::styled(format!(" {} {} ", index + 1, section.title), style));
        }

        let navbar_style = match showcase.navbar_style() {
            NavbarStyle::Solid => Style::default().fg(Color::White).bg(Color::Blue),
            NavbarStyle::Translucent => Style::default().add_modifier(Modifier::DIM),
        };

        let navbar = Paragraph::new(Line::from(spans))
            .block(Block::default().borders(Borders::ALL))
            .style(navbar_style);
        frame.render_widget(navbar, area);
    }

    fn render_document(model: &TuiModel, frame: &mut Frame, area: Rect) {
        let showcase = &model.showcase;
        let height = area.height as usize;

        let lines: Vec<Line> = showcase
            .document()
            .iter()
            .skip(showcase.scroll())
            .take(height)
            .map(|line| match line {
                DocLine::Heading { section } => Line::from(Span::styled(
                    format!("## {}", showcase.section_title(*section)),
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                )),
                DocLine::Text(text) => Line::from(*text),
                DocLine::Snippet(index) => {
                    let Some(snippet) = showcase.snippets().get(*index) else {
                        return Line::from("");
                    };
                    let code_style = if *index == showcase.focused_snippet() {
                        Style::default().fg(Color::Green).add_modifier(Modifier::REVERSED)
                    } else {
                        Style::default().fg(Color::Green)
                    };
                    let label_style = match snippet.state {
                        CopyState::Idle => Style::default().fg(Color::Gray),
                        CopyState::Copied => Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                        CopyState::Failed => Style::default().fg(Color::Red),
                    };
                    Line::from(vec![
                        Span::styled(format!("  $ {}", snippet.text), code_style),
                        Span::raw("  "),
                        Span::styled(format!("[{}]", snippet.label()), label_style),
                    ])
                }
                DocLine::DemoTabs => {
                    let mut spans = vec![Span::raw("  ")];
                    if let Some(group) = showcase.view().group(DEMO_GROUP) {
                        for (tab, active) in group.iter_with_state() {
                            let style = if active {
                                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
                            } else {
                                Style::default().fg(Color::Gray)
                            };
                            spans.push(Span::styled(format!("[{}] ", tab.title), style));
                        }
                    }
                    Line::from(spans)
                }
                DocLine::DemoPanel(row) => {
                    let text = showcase.demo_panel().get(*row).copied().unwrap_or_default();
                    Line::from(Span::styled(format!("  │ {}", text), Style::default().fg(Color::Green)))
                }
                DocLine::Blank => Line::from(""),
            })
            .collect();

        frame.render_widget(Paragraph::new(lines), area);
    }

    /// Render the status/input bar at the bottom
    fn render_status_bar(model: &TuiModel, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Length(1), Constraint::Length(1)])
            .split(area);

        // Input line
        if model.input.mode != InputMode::None {
            let input_text = format!("{} {}", model.input.prompt, model.input.text);
            let input_paragraph = Paragraph::new(input_text).style(Style::default().fg(Color::Yellow));
            frame.render_widget(input_paragraph, chunks[0]);
        } else {
            frame.render_widget(Paragraph::new(""), chunks[0]);
        }

        // Status line
        let status_paragraph = Paragraph::new(Self::build_status_text(model))
            .style(Style::default().fg(Color::White).bg(Color::DarkGray));
        frame.render_widget(status_paragraph, chunks[1]);

        // Key hints
        let hints_paragraph = Paragraph::new(Self::get_key_hints(model)).style(Style::default().fg(Color::Gray));
        frame.render_widget(hints_paragraph, chunks[2]);
    }

    /// Build status text for the status bar
    fn build_status_text(model: &TuiModel) -> String {
        match model.page {
            Page::Demo => {
                let browser = model.demo.tag_browser();
                let mut status_parts = vec![
                    format!("{} pending", model.demo.pending()),
                    format!("{} output lines", model.demo.output().lines().len()),
                ];
                if browser.is_loaded() {
                    status_parts.push("repository loaded".to_string());
                }
                status_parts.push(format!("view: {}", browser.view_mode()));
                status_parts.join(" | ")
            }
            Page::Showcase => {
                let showcase = &model.showcase;
                let section = showcase
                    .active_section()
                    .map(|section| section.title.as_str())
                    .unwrap_or("-");
                format!(
                    "{} | line {}/{}",
                    section,
                    showcase.scroll() + 1,
                    showcase.document().len()
                )
            }
        }
    }

    /// Get key hints for current mode
    fn get_key_hints(model: &TuiModel) -> String {
        if model.input.mode == InputMode::Search {
            return "Type to filter | Enter Keep | Esc Clear".to_string();
        }
        match model.page {
            Page::Showcase => "j/k Scroll | 1-6 Jump | ←/→ Demo | n Next | c Copy | F2 Demo | q Quit",
            Page::Demo => match model.active_tab() {
                COMMANDS_TAB => "↑/↓ Command | ←/→ Field | Enter Execute | Ctrl+L Clear | Tab Next | Esc Quit",
                BROWSER_TAB => "/ Search | Enter Details | l Load | r Refresh | v View | ? Help | q Quit",
                _ => "Esc Back | Tab Next | F2 Showcase | q Quit",
            },
        }
        .to_string()
    }
}
