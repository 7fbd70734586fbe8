use anyhow::Result;
use artifact_demo_core::app::{BROWSER_TAB, COMMANDS_TAB, HELP_TAB, MAIN_GROUP};
use crossterm::event::{KeyCode, KeyModifiers};
use tracing::debug;

use super::model::{InputMode, TuiModel};
use super::showcase::DEMO_GROUP;
use super::view::TuiView;
use crate::cli::Page;

/// Lines moved by one page of scrolling
const PAGE_SCROLL: usize = 10;

/// Side effects the update asks the runtime to perform
#[derive(Debug, Clone, PartialEq)]
pub enum TuiMessage {
    /// Leave the application
    Quit,

    /// Put `text` on the clipboard, then report back for snippet `index`
    CopyToClipboard { index: usize, text: String },

    /// No action needed
    None,
}

/// The Update function - handles user input and updates the model
pub struct TuiUpdate;

impl TuiUpdate {
    /// Handle a key press and update the model accordingly.
    /// Returns a TuiMessage the runtime should act on.
    pub fn handle_key(model: &mut TuiModel, key: KeyCode, modifiers: KeyModifiers) -> Result<TuiMessage> {
        // Handle global keys first (quit, help, page switch)
        if let Some(msg) = Self::handle_global_keys(model, key, modifiers)? {
            return Ok(msg);
        }

        // Handle input mode keys if we're in text input
        if model.input.mode != InputMode::None {
            return Self::handle_input_keys(model, key);
        }

        let tab = model.active_tab().to_string();
        let msg = match model.page {
            Page::Showcase => Self::handle_showcase_keys(model, key),
            Page::Demo => match tab.as_str() {
                COMMANDS_TAB => Self::handle_commands_keys(model, key, modifiers),
                BROWSER_TAB => Self::handle_browser_keys(model, key),
                _ => Self::handle_help_keys(model, key),
            },
        };

        model.follow_output();
        msg
    }

    /// Handle terminal resize
    pub fn handle_resize(model: &mut TuiModel, width: u16, height: u16) -> Result<TuiMessage> {
        model.terminal_width = width;
        model.terminal_height = height;
        model.showcase.set_viewport(TuiView::showcase_document_rows(height));
        Ok(TuiMessage::None)
    }

    /// Whether plain characters go into a text field right now
    fn is_typing(model: &TuiModel) -> bool {
        model.is_editing() || (model.page == Page::Demo && model.active_tab() == COMMANDS_TAB)
    }

    /// Handle global keys that work in any mode
    fn handle_global_keys(model: &mut TuiModel, key: KeyCode, modifiers: KeyModifiers) -> Result<Option<TuiMessage>> {
        match key {
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Ok(Some(TuiMessage::Quit)),

            KeyCode::Char('q') if modifiers.is_empty() && !Self::is_typing(model) => {
                Ok(Some(TuiMessage::Quit))
            }

            KeyCode::F(2) => {
                model.end_input();
                model.toggle_page();
                debug!("Switched to {:?} page", model.page);
                Ok(Some(TuiMessage::None))
            }

            KeyCode::F(1) => {
                Self::open_help(model);
                Ok(Some(TuiMessage::None))
            }

            KeyCode::Char('?') if !Self::is_typing(model) => {
                Self::open_help(model);
                Ok(Some(TuiMessage::None))
            }

            KeyCode::Tab if model.page == Page::Demo => {
                model.end_input();
                model.demo.view_mut().select_next(MAIN_GROUP);
                Ok(Some(TuiMessage::None))
            }

            KeyCode::BackTab if model.page == Page::Demo => {
                model.end_input();
                model.demo.view_mut().select_prev(MAIN_GROUP);
                Ok(Some(TuiMessage::None))
            }

            _ => Ok(None),
        }
    }

    fn open_help(model: &mut TuiModel) {
        model.end_input();
        model.page = Page::Demo;
        model.demo.show_tab(HELP_TAB);
    }

    /// Handle keys while the tag search is open. The filter follows every
    /// keystroke; Enter keeps it, Esc drops it.
    fn handle_input_keys(model: &mut TuiModel, key: KeyCode) -> Result<TuiMessage> {
        match key {
            KeyCode::Char(c) => {
                model.input.text.push(c);
                model.demo.tag_browser_mut().push_search_char(c);
            }

            KeyCode::Backspace => {
                model.input.text.pop();
                model.demo.tag_browser_mut().pop_search_char();
            }

            KeyCode::Enter => model.end_input(),

            KeyCode::Esc => {
                model.end_input();
                model.demo.tag_browser_mut().set_search("");
            }

            _ => {}
        }
        Ok(TuiMessage::None)
    }

    /// Handle keys on the Commands tab
    fn handle_commands_keys(model: &mut TuiModel, key: KeyCode, modifiers: KeyModifiers) -> Result<TuiMessage> {
        match key {
            KeyCode::Esc => return Ok(TuiMessage::Quit),

            KeyCode::Char('l') if modifiers.contains(KeyModifiers::CONTROL) => {
                model.demo.clear_output();
            }

            // Navigation
            KeyCode::Up => model.form.select_prev_command(),
            KeyCode::Down => model.form.select_next_command(),
            KeyCode::Left => model.form.prev_field(),
            KeyCode::Right => model.form.next_field(),

            KeyCode::PageUp => model.scroll_output_up(PAGE_SCROLL),
            KeyCode::PageDown => model.scroll_output_down(PAGE_SCROLL),

            // Editing
            KeyCode::Char(c) if !modifiers.contains(KeyModifiers::CONTROL) => model.form.push_char(c),
            KeyCode::Backspace => model.form.pop_char(),

            KeyCode::Enter => {
                let kind = model.form.selected_kind();
                let params = model.form.raw_params();
                model.demo.execute(kind.id(), &params);
            }

            _ => {}
        }
        Ok(TuiMessage::None)
    }

    /// Handle keys on the Tag Browser tab
    fn handle_browser_keys(model: &mut TuiModel, key: KeyCode) -> Result<TuiMessage> {
        match key {
            KeyCode::Up | KeyCode::Char('k') => model.demo.tag_browser_mut().select_prev(),
            KeyCode::Down | KeyCode::Char('j') => model.demo.tag_browser_mut().select_next(),

            KeyCode::Char('/') => {
                let current = model.demo.tag_browser().search().to_string();
                model.start_input(InputMode::Search, "Search tags:", current);
            }

            KeyCode::Enter => {
                if let Some(tag) = model.demo.tag_browser().selected_tag() {
                    model.demo.show_tag_details(tag);
                }
            }

            KeyCode::Char('l') => {
                model.demo.load_repository();
            }

            KeyCode::Char('r') => {
                model.demo.refresh_tags();
            }

            KeyCode::Char('v') => {
                let next = model.demo.tag_browser().view_mode().next();
                model.demo.change_view_mode(next);
            }

            KeyCode::PageUp => model.scroll_output_up(PAGE_SCROLL),
            KeyCode::PageDown => model.scroll_output_down(PAGE_SCROLL),

            _ => {}
        }
        Ok(TuiMessage::None)
    }

    fn handle_help_keys(model: &mut TuiModel, key: KeyCode) -> Result<TuiMessage> {
        if matches!(key, KeyCode::Esc | KeyCode::Char('b')) {
            model.demo.show_tab(COMMANDS_TAB);
        }
        Ok(TuiMessage::None)
    }

    /// Handle keys on the showcase page
    fn handle_showcase_keys(model: &mut TuiModel, key: KeyCode) -> Result<TuiMessage> {
        let showcase = &mut model.showcase;
        match key {
            KeyCode::Up | KeyCode::Char('k') => showcase.scroll_by(-1),
            KeyCode::Down | KeyCode::Char('j') => showcase.scroll_by(1),
            KeyCode::PageUp => showcase.scroll_by(-(PAGE_SCROLL as isize)),
            KeyCode::PageDown => showcase.scroll_by(PAGE_SCROLL as isize),
            KeyCode::Home => showcase.scroll_to_top(),
            KeyCode::End => showcase.scroll_to_bottom(),

            KeyCode::Char(c @ '1'..='9') => {
                let index = c as usize - '1' as usize;
                showcase.jump_to(index);
            }

            KeyCode::Left => showcase.view_mut().select_prev(DEMO_GROUP),
            KeyCode::Right => showcase.view_mut().select_next(DEMO_GROUP),

            KeyCode::Char('n') => showcase.focus_next_snippet(),

            KeyCode::Char('c') => {
                if let Some(text) = showcase.focused_text() {
                    return Ok(TuiMessage::CopyToClipboard {
                        index: showcase.focused_snippet(),
                        text: text.to_string(),
                    });
                }
            }

            _ => {}
        }
        Ok(TuiMessage::None)
    }
}
