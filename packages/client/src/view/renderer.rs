//! Renderers applying render commands to a display surface.

use std::collections::BTreeMap;

#[cfg(test)]
use mockall::automock;

use crate::domain::QUEUE_DISPLAY_SLOTS;

use super::{
    command::{ElementId, RenderCommand, clear_current_track, clear_position, clear_queue},
    formatter::DashboardFormatter,
};

/// A display surface that accepts render commands.
#[cfg_attr(test, automock)]
pub trait Renderer {
    /// Apply one command
    fn apply(&mut self, command: &RenderCommand);

    /// Called once after all commands of one inbound message were applied
    fn flush(&mut self);
}

/// Apply a batch of commands, then flush once.
pub fn apply_all<R: Renderer + ?Sized>(renderer: &mut R, commands: &[RenderCommand]) {
    for command in commands {
        renderer.apply(command);
    }
    renderer.flush();
}

/// Observable state of one display element.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementState {
    pub source: Option<String>,
    pub text: String,
    pub href: Option<String>,
    pub width_percent: f64,
    pub visible: bool,
}

/// In-memory mirror of the dashboard's display elements.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    elements: BTreeMap<ElementId, ElementState>,
    queue_slots: usize,
}

impl DashboardView {
    /// A view in the cleared state: no current track, no position, empty slots.
    pub fn new(queue_slots: usize) -> Self {
        let mut view = Self {
            elements: BTreeMap::new(),
            queue_slots,
        };
        let mut initial = clear_current_track();
        initial.extend(clear_position());
        initial.extend(clear_queue(queue_slots));
        for command in &initial {
            view.apply_command(command);
        }
        view
    }

    pub fn queue_slots(&self) -> usize {
        self.queue_slots
    }

    pub fn element(&self, id: ElementId) -> Option<&ElementState> {
        self.elements.get(&id)
    }

    /// Text of an element, empty when the element was never written
    pub fn text(&self, id: ElementId) -> &str {
        self.element(id).map_or("", |element| element.text.as_str())
    }

    pub fn elements(&self) -> impl Iterator<Item = (&ElementId, &ElementState)> {
        self.elements.iter()
    }

    fn apply_command(&mut self, command: &RenderCommand) {
        let element = self.elements.entry(command.element()).or_default();
        match command {
            RenderCommand::SetSource { url, .. } => element.source = Some(url.clone()),
            RenderCommand::SetText { text, .. } => element.text = text.clone(),
            RenderCommand::SetLink { href, .. } => element.href = Some(href.clone()),
            RenderCommand::SetWidth { percent, .. } => element.width_percent = *percent,
            RenderCommand::SetVisible { visible, .. } => element.visible = *visible,
        }
    }
}

impl Default for DashboardView {
    fn default() -> Self {
        Self::new(QUEUE_DISPLAY_SLOTS)
    }
}

impl Renderer for DashboardView {
    fn apply(&mut self, command: &RenderCommand) {
        self.apply_command(command);
    }

    fn flush(&mut self) {}
}

/// Renderer printing the dashboard to stdout whenever a message changed it.
#[derive(Debug)]
pub struct TerminalRenderer {
    view: DashboardView,
    printed: Option<DashboardView>,
}

impl TerminalRenderer {
    pub fn new(queue_slots: usize) -> Self {
        Self {
            view: DashboardView::new(queue_slots),
            printed: None,
        }
    }

    pub fn view(&self) -> &DashboardView {
        &self.view
    }
}

impl Renderer for TerminalRenderer {
    fn apply(&mut self, command: &RenderCommand) {
        self.view.apply(command);
    }

    fn flush(&mut self) {
        if self.printed.as_ref() == Some(&self.view) {
            return;
        }
        print!("{}", DashboardFormatter::format_dashboard(&self.view));
        self.printed = Some(self.view.clone());
    }
}
